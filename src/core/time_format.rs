use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::time_ticks::TickGranularity;

/// Where a formatted instant is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeFormatContext {
    /// Time-axis tick text.
    Axis,
    /// Hover label of a data point or annotation.
    Label,
}

/// Formats `instant` in UTC for the active granularity.
///
/// Sub-day granularities use `HH:MM`. Year granularity shows the year on the
/// axis and the full date on labels. Instants chrono cannot represent fall
/// back to the raw epoch seconds.
#[must_use]
pub fn format_time(
    instant: i64,
    granularity: TickGranularity,
    context: TimeFormatContext,
) -> String {
    let Some(dt) = DateTime::<Utc>::from_timestamp(instant, 0) else {
        return instant.to_string();
    };

    let pattern = match (granularity, context) {
        (TickGranularity::HalfHour | TickGranularity::Hour, _) => "%H:%M",
        (TickGranularity::Year, TimeFormatContext::Axis) => "%Y",
        (TickGranularity::Year, TimeFormatContext::Label) => "%Y-%m-%d",
    };
    dt.format(pattern).to_string()
}

#[cfg(test)]
mod tests {
    use super::{TimeFormatContext, format_time};
    use crate::core::time_ticks::TickGranularity;

    #[test]
    fn unrepresentable_instant_falls_back_to_seconds() {
        let text = format_time(i64::MAX, TickGranularity::Hour, TimeFormatContext::Axis);
        assert_eq!(text, i64::MAX.to_string());
    }
}
