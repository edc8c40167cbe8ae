use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::types::Tick;

pub const SECONDS_PER_HALF_HOUR: i64 = 1_800;
pub const SECONDS_PER_HOUR: i64 = 3_600;

/// Longest span (inclusive) that still gets half-hour ticks.
pub const HALF_HOUR_MAX_SPAN_SECS: i64 = 3 * SECONDS_PER_HOUR;
/// Longest span (inclusive) that still gets hourly ticks.
pub const HOUR_MAX_SPAN_SECS: i64 = 24 * SECONDS_PER_HOUR;

/// Spacing category of the time axis.
///
/// No tier exists between a day and a year: multi-day spans
/// get yearly ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TickGranularity {
    HalfHour,
    Hour,
    Year,
}

impl TickGranularity {
    #[must_use]
    pub fn for_span(span_secs: i64) -> Self {
        if span_secs <= HALF_HOUR_MAX_SPAN_SECS {
            Self::HalfHour
        } else if span_secs <= HOUR_MAX_SPAN_SECS {
            Self::Hour
        } else {
            Self::Year
        }
    }

    /// Fixed step in seconds, or `None` for calendar-year steps.
    #[must_use]
    pub fn step_seconds(self) -> Option<i64> {
        match self {
            Self::HalfHour => Some(SECONDS_PER_HALF_HOUR),
            Self::Hour => Some(SECONDS_PER_HOUR),
            Self::Year => None,
        }
    }

    /// Floors `instant` to the unit boundary ticks start from: the top of the
    /// hour for sub-day granularities, January 1st 00:00:00 UTC for years.
    #[must_use]
    pub fn align_floor(self, instant: i64) -> Option<i64> {
        match self {
            Self::HalfHour | Self::Hour => {
                instant.checked_sub(instant.rem_euclid(SECONDS_PER_HOUR))
            }
            Self::Year => {
                let year = DateTime::<Utc>::from_timestamp(instant, 0)?.year();
                start_of_year(year)
            }
        }
    }

    /// Next tick after `instant`, which must already be aligned.
    #[must_use]
    pub fn advance(self, instant: i64) -> Option<i64> {
        match self.step_seconds() {
            Some(step) => instant.checked_add(step),
            None => {
                let year = DateTime::<Utc>::from_timestamp(instant, 0)?.year();
                start_of_year(year.checked_add(1)?)
            }
        }
    }
}

fn start_of_year(year: i32) -> Option<i64> {
    let date = NaiveDate::from_ymd_opt(year, 1, 1)?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp())
}

/// Granularity and tick instants for one time span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeAxisPlan {
    pub granularity: TickGranularity,
    pub ticks: Vec<Tick>,
}

/// Plans the time axis for `[min_time, max_time]`.
///
/// Starts from the aligned floor of `min_time` and advances while the instant
/// is strictly below `max_time`, keeping instants at or after `min_time`.
#[must_use]
pub fn plan_time_ticks(min_time: i64, max_time: i64) -> TimeAxisPlan {
    let granularity = TickGranularity::for_span(max_time.saturating_sub(min_time));
    let ticks = time_ticks(granularity, min_time, max_time);
    TimeAxisPlan { granularity, ticks }
}

/// Enumerates aligned tick instants in `[min_time, max_time)`.
#[must_use]
pub fn time_ticks(granularity: TickGranularity, min_time: i64, max_time: i64) -> Vec<Tick> {
    let mut ticks = Vec::new();
    let Some(mut current) = granularity.align_floor(min_time) else {
        return ticks;
    };

    while current < max_time {
        if current >= min_time {
            ticks.push(Tick::new(current));
        }
        match granularity.advance(current) {
            Some(next) => current = next,
            None => break,
        }
    }

    ticks
}

#[cfg(test)]
mod tests {
    use super::{TickGranularity, start_of_year};

    #[test]
    fn hour_alignment_floors_negative_instants() {
        assert_eq!(TickGranularity::Hour.align_floor(-1), Some(-3_600));
        assert_eq!(TickGranularity::HalfHour.align_floor(5_400), Some(3_600));
    }

    #[test]
    fn hour_alignment_below_i64_min_is_none() {
        assert_eq!(TickGranularity::Hour.align_floor(i64::MIN), None);
        assert_eq!(TickGranularity::HalfHour.align_floor(i64::MIN + 1), None);
    }

    #[test]
    fn year_alignment_lands_on_january_first() {
        // 2021-06-15T12:00:00Z
        assert_eq!(
            TickGranularity::Year.align_floor(1_623_758_400),
            start_of_year(2021)
        );
        assert_eq!(start_of_year(1970), Some(0));
    }

    #[test]
    fn year_advance_handles_leap_years() {
        let start_2020 = start_of_year(2020).expect("2020");
        let start_2021 = TickGranularity::Year.advance(start_2020).expect("2021");
        assert_eq!(start_2021 - start_2020, 366 * 86_400);
    }
}
