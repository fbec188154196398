use crate::db::models::SleepWindow;
use crate::settings::DefaultSleepConfig;

const HOURS_PER_DAY: f64 = 24.0;

/// Hours slept for one day, falling back to the default window when the day
/// has no record or its end has not been written yet.
pub fn duration_hours(window: Option<&SleepWindow>, fallback: &DefaultSleepConfig) -> f64 {
    match window.and_then(|w| w.end_time().map(|end| (w.start_time(), end))) {
        Some((start, end)) => span_hours(start.hour(), start.minute(), end.hour(), end.minute()),
        None => fallback_hours(fallback),
    }
}

/// Length of the default window. It wraps by the same (hour, minute) rule
/// as recorded days, so 06:30 -> 06:00 is 23.5 hours rather than -0.5.
pub fn fallback_hours(fallback: &DefaultSleepConfig) -> f64 {
    span_hours(
        fallback.start_hour,
        fallback.start_minute,
        fallback.end_hour,
        fallback.end_minute,
    )
}

/// Length of `start -> end`, wrapping past midnight whenever the end is
/// earlier on the clock than the start. An equal hour with a smaller end
/// minute wraps too.
fn span_hours(start_hour: u8, start_minute: u8, end_hour: u8, end_minute: u8) -> f64 {
    let mut hours = (end_hour as f64 - start_hour as f64)
        + (end_minute as f64 - start_minute as f64) / 60.0;
    if (end_hour, end_minute) < (start_hour, start_minute) {
        hours += HOURS_PER_DAY;
    }
    hours
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_key::DateKey;
    use approx::assert_abs_diff_eq;

    fn window(start: (u8, u8), end: Option<(u8, u8)>) -> SleepWindow {
        SleepWindow {
            date_key: DateKey::try_from(20240501u32).unwrap(),
            start_hour: start.0,
            start_minute: start.1,
            end_hour: end.map(|e| e.0),
            end_minute: end.map(|e| e.1),
        }
    }

    fn fallback() -> DefaultSleepConfig {
        DefaultSleepConfig {
            start_hour: 22,
            start_minute: 0,
            end_hour: 6,
            end_minute: 0,
        }
    }

    #[test]
    fn wraps_past_midnight() {
        let w = window((23, 30), Some((0, 30)));
        assert_abs_diff_eq!(duration_hours(Some(&w), &fallback()), 1.0);
    }

    #[test]
    fn equal_hour_with_earlier_minute_wraps_a_full_day() {
        let w = window((10, 45), Some((10, 15)));
        assert_abs_diff_eq!(duration_hours(Some(&w), &fallback()), 23.5);
    }

    #[test]
    fn same_day_window() {
        let w = window((13, 15), Some((14, 45)));
        assert_abs_diff_eq!(duration_hours(Some(&w), &fallback()), 1.5);
    }

    #[test]
    fn identical_start_and_end_is_zero() {
        let w = window((1, 0), Some((1, 0)));
        assert_abs_diff_eq!(duration_hours(Some(&w), &fallback()), 0.0);
    }

    #[test]
    fn missing_day_uses_fallback() {
        assert_abs_diff_eq!(duration_hours(None, &fallback()), 8.0);
    }

    #[test]
    fn pending_end_uses_fallback() {
        let w = window((23, 0), None);
        assert_abs_diff_eq!(duration_hours(Some(&w), &fallback()), 8.0);
    }

    #[test]
    fn half_written_end_uses_fallback() {
        let mut w = window((23, 0), Some((7, 0)));
        w.end_minute = None;
        assert_abs_diff_eq!(duration_hours(Some(&w), &fallback()), 8.0);
    }

    #[test]
    fn fallback_with_equal_hour_wraps_like_recorded_days() {
        let late_start = DefaultSleepConfig {
            start_hour: 6,
            start_minute: 30,
            end_hour: 6,
            end_minute: 0,
        };
        assert_abs_diff_eq!(fallback_hours(&late_start), 23.5);
        assert_abs_diff_eq!(duration_hours(None, &late_start), 23.5);
    }

    #[test]
    fn default_fallback_is_six_hours() {
        assert_abs_diff_eq!(fallback_hours(&DefaultSleepConfig::default()), 6.0);
    }
}
