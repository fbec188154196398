use serde::{Deserialize, Serialize};

use crate::date_key::{DateKey, DAYS_PER_WEEK};
use crate::db::models::SleepWindow;
use crate::settings::DefaultSleepConfig;

use super::duration::duration_hours;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DayStatus {
    Past,
    Today,
    Upcoming,
}

/// One bar of the weekly chart: fractional start/end hours plus whether the
/// day is already behind us.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyBar {
    pub date_key: DateKey,
    pub start_hours: f64,
    pub end_hours: f64,
    pub status: DayStatus,
}

/// Mean sleep duration over seven days (normally `DateKey::trailing_week`).
pub fn weekly_average_hours<F>(
    keys: &[DateKey; DAYS_PER_WEEK],
    lookup: F,
    fallback: &DefaultSleepConfig,
) -> f64
where
    F: Fn(DateKey) -> Option<SleepWindow>,
{
    keys.iter()
        .map(|&key| duration_hours(lookup(key).as_ref(), fallback) / DAYS_PER_WEEK as f64)
        .sum()
}

/// `(start, end)` in fractional hours for each day of a Sunday-anchored week.
///
/// Missing days take the default window. A day still being tracked keeps its
/// own start and borrows the default end.
pub fn weekly_series<F>(
    week: &[DateKey; DAYS_PER_WEEK],
    lookup: F,
    fallback: &DefaultSleepConfig,
) -> [(f64, f64); DAYS_PER_WEEK]
where
    F: Fn(DateKey) -> Option<SleepWindow>,
{
    let mut series = [(0.0, 0.0); DAYS_PER_WEEK];
    for (slot, &key) in series.iter_mut().zip(week.iter()) {
        *slot = day_span(lookup(key).as_ref(), fallback);
    }
    series
}

fn day_span(window: Option<&SleepWindow>, fallback: &DefaultSleepConfig) -> (f64, f64) {
    let start_hour = window.map_or(fallback.start_hour, |w| w.start_hour);
    let start_minute = window.map_or(fallback.start_minute, |w| w.start_minute);
    let end_hour = window
        .and_then(|w| w.end_hour)
        .unwrap_or(fallback.end_hour);
    let end_minute = window
        .and_then(|w| w.end_minute)
        .unwrap_or(fallback.end_minute);

    (
        start_hour as f64 + start_minute as f64 / 60.0,
        end_hour as f64 + end_minute as f64 / 60.0,
    )
}

pub fn day_status(day: DateKey, today: DateKey) -> DayStatus {
    match day.cmp(&today) {
        std::cmp::Ordering::Less => DayStatus::Past,
        std::cmp::Ordering::Equal => DayStatus::Today,
        std::cmp::Ordering::Greater => DayStatus::Upcoming,
    }
}

pub fn weekly_bars<F>(
    week: &[DateKey; DAYS_PER_WEEK],
    today: DateKey,
    lookup: F,
    fallback: &DefaultSleepConfig,
) -> [WeeklyBar; DAYS_PER_WEEK]
where
    F: Fn(DateKey) -> Option<SleepWindow>,
{
    let series = weekly_series(week, lookup, fallback);
    let mut bars = [WeeklyBar {
        date_key: today,
        start_hours: 0.0,
        end_hours: 0.0,
        status: DayStatus::Today,
    }; DAYS_PER_WEEK];

    for ((bar, &key), (start, end)) in bars.iter_mut().zip(week.iter()).zip(series) {
        *bar = WeeklyBar {
            date_key: key,
            start_hours: start,
            end_hours: end,
            status: day_status(key, today),
        };
    }
    bars
}
