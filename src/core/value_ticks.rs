use smallvec::SmallVec;

/// Number of horizontal rules the value axis aims for.
pub const VALUE_TICK_TARGET_COUNT: usize = 10;

/// Round-number ticks across a value domain.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueTicks {
    /// Distance between consecutive ticks; `0.0` for a collapsed domain.
    pub step: f64,
    pub values: SmallVec<[f64; 16]>,
}

/// Picks a 1/2/5 x 10^n step giving roughly `count` ticks over `[min, max]`.
#[must_use]
pub fn value_tick_step(min: f64, max: f64, count: usize) -> Option<f64> {
    let half_span = 0.5 * max - 0.5 * min;
    if count == 0 || !half_span.is_finite() || half_span <= 0.0 {
        return None;
    }

    let per_tick = half_span / count as f64 * 2.0;
    let mut step = 10f64.powf(per_tick.log10().floor());
    let err = step / per_tick;
    if err <= 0.15 {
        step *= 10.0;
    } else if err <= 0.35 {
        step *= 5.0;
    } else if err <= 0.75 {
        step *= 2.0;
    }
    Some(step)
}

/// Enumerates multiples of the chosen step inside `[min, max]`.
///
/// A collapsed or non-finite domain yields a single tick at `min` when it is
/// finite and no ticks otherwise.
#[must_use]
pub fn value_ticks(min: f64, max: f64, count: usize) -> ValueTicks {
    let Some(step) = value_tick_step(min, max, count) else {
        let mut values = SmallVec::new();
        if min.is_finite() {
            values.push(min);
        }
        return ValueTicks { step: 0.0, values };
    };

    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    // Dividing by the inverse keeps fractional steps such as 0.1 exact.
    let inverse = if step < 1.0 { Some((1.0 / step).round()) } else { None };

    let values = (first..=last)
        .map(|index| match inverse {
            Some(inverse) => index as f64 / inverse,
            None => index as f64 * step,
        })
        .collect();
    ValueTicks { step, values }
}

/// Formats a tick with as many decimals as the step needs and comma grouping.
#[must_use]
pub fn format_value_tick(value: f64, step: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if !step.is_finite() || step <= 0.0 {
        return value.to_string();
    }

    let precision = (-(step.log10() + 0.01).floor()).max(0.0) as usize;
    let value = if value == 0.0 { 0.0 } else { value };
    let fixed = format!("{value:.precision$}");
    group_thousands(&fixed)
}

fn group_thousands(fixed: &str) -> String {
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(fixed.len() + integer.len() / 3);
    grouped.push_str(sign);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::{format_value_tick, value_tick_step, value_ticks};

    #[test]
    fn unit_domain_uses_tenth_steps() {
        let ticks = value_ticks(0.0, 1.0, 10);
        assert!((ticks.step - 0.1).abs() < 1e-12);
        assert_eq!(ticks.values.len(), 11);
        assert_eq!(ticks.values[3], 0.3);
        assert_eq!(ticks.values[10], 1.0);
    }

    #[test]
    fn step_widens_to_five_and_two() {
        assert_eq!(value_tick_step(0.0, 42.0, 10), Some(5.0));
        assert_eq!(value_tick_step(0.0, 15.0, 10), Some(2.0));
        assert_eq!(value_tick_step(0.0, 100.0, 10), Some(10.0));
    }

    #[test]
    fn collapsed_domain_yields_single_tick() {
        let ticks = value_ticks(3.5, 3.5, 10);
        assert_eq!(ticks.step, 0.0);
        assert_eq!(ticks.values.as_slice(), &[3.5]);
    }

    #[test]
    fn formatting_groups_thousands_and_fixes_precision() {
        assert_eq!(format_value_tick(12_500.0, 500.0), "12,500");
        assert_eq!(format_value_tick(-1_234_567.0, 1.0), "-1,234,567");
        assert_eq!(format_value_tick(0.30000000000000004, 0.1), "0.3");
        assert_eq!(format_value_tick(2.25, 0.05), "2.25");
        assert_eq!(format_value_tick(-0.0, 1.0), "0");
    }
}
