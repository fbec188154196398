use anyhow::Result;
use chrono::NaiveDate;

use crate::date_key::DateKey;
use crate::db::connection::Database;
use crate::settings::DefaultSleepConfig;
use crate::stats::{AudioStats, WeeklyReport};

impl Database {
    /// Fetch the windows the trend card needs and aggregate them.
    pub async fn weekly_report(
        &self,
        today: NaiveDate,
        fallback: &DefaultSleepConfig,
    ) -> Result<WeeklyReport> {
        let windows = self
            .get_sleep_windows(WeeklyReport::required_keys(today))
            .await?;
        Ok(WeeklyReport::build(
            today,
            |key| windows.get(&key).copied(),
            fallback,
        ))
    }

    pub async fn audio_stats(&self, date_key: DateKey) -> Result<AudioStats> {
        let events = self.audio_events_for_day(date_key).await?;
        Ok(AudioStats::for_day(date_key, &events))
    }
}
