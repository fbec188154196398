use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date_key::{DateKey, DAYS_PER_WEEK};
use crate::db::models::SleepWindow;
use crate::settings::DefaultSleepConfig;

use super::weekly::{weekly_average_hours, weekly_bars, WeeklyBar};

/// A duration rounded to whole minutes, shown as `7h30m`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoursMinutes {
    pub hours: u32,
    pub minutes: u32,
}

impl HoursMinutes {
    pub fn from_hours(hours: f64) -> Self {
        let total_minutes = (hours * 60.0).round().max(0.0) as u32;
        Self {
            hours: total_minutes / 60,
            minutes: total_minutes % 60,
        }
    }
}

impl fmt::Display for HoursMinutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h{}m", self.hours, self.minutes)
    }
}

/// Everything the trend card needs for one refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyReport {
    pub today: DateKey,
    pub average_hours: f64,
    pub average: HoursMinutes,
    pub bars: [WeeklyBar; DAYS_PER_WEEK],
}

impl WeeklyReport {
    /// Keys `build` will ask `lookup` about: the trailing seven days and the
    /// Sunday-anchored week containing `today`.
    pub fn required_keys(today: NaiveDate) -> Vec<DateKey> {
        let mut keys: Vec<DateKey> = DateKey::trailing_week(DateKey::from_date(today))
            .into_iter()
            .chain(DateKey::sunday_week(today))
            .collect();
        keys.sort_unstable();
        keys.dedup();
        keys
    }

    pub fn build<F>(today: NaiveDate, lookup: F, fallback: &DefaultSleepConfig) -> Self
    where
        F: Fn(DateKey) -> Option<SleepWindow>,
    {
        let today_key = DateKey::from_date(today);
        let average_hours =
            weekly_average_hours(&DateKey::trailing_week(today_key), &lookup, fallback);
        let bars = weekly_bars(&DateKey::sunday_week(today), today_key, &lookup, fallback);

        Self {
            today: today_key,
            average_hours,
            average: HoursMinutes::from_hours(average_hours),
            bars,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ring::ClockTime;
    use approx::assert_abs_diff_eq;

    #[test]
    fn formats_hours_and_minutes() {
        assert_eq!(HoursMinutes::from_hours(7.5).to_string(), "7h30m");
        assert_eq!(HoursMinutes::from_hours(8.0).to_string(), "8h0m");
        // 6h59.7m rounds up into the next hour.
        assert_eq!(HoursMinutes::from_hours(6.995).to_string(), "7h0m");
    }

    #[test]
    fn required_keys_cover_both_weeks() {
        // Wednesday: trailing week reaches back into the previous Sunday-week.
        let today = NaiveDate::from_ymd_opt(2024, 10, 16).unwrap();
        let keys = WeeklyReport::required_keys(today);
        assert_eq!(keys.first().unwrap().value(), 20241010);
        assert_eq!(keys.last().unwrap().value(), 20241019);
        assert_eq!(keys.len(), 10);
    }

    #[test]
    fn builds_from_lookup() {
        let today = NaiveDate::from_ymd_opt(2024, 10, 16).unwrap();
        let today_key = DateKey::from_date(today);
        let night = SleepWindow::new(
            today_key,
            ClockTime::new(23, 0).unwrap(),
            Some(ClockTime::new(6, 0).unwrap()),
        );
        let fallback = DefaultSleepConfig::default();

        let report = WeeklyReport::build(
            today,
            |key| (key == today_key).then_some(night),
            &fallback,
        );

        assert_abs_diff_eq!(report.average_hours, (7.0 + 6.0 * 6.0) / 7.0, epsilon = 1e-9);
        assert_eq!(report.average.to_string(), "6h9m");
        assert_eq!(report.bars[3].start_hours, 23.0);
        assert_eq!(report.bars[0].start_hours, 0.0);
    }
}
