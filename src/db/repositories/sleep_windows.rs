use std::collections::HashMap;

use anyhow::{anyhow, Result};
use rusqlite::{params, OptionalExtension, Row};

use crate::date_key::DateKey;
use crate::db::{
    connection::Database,
    helpers::{parse_date_key, parse_end, to_hour, to_minute},
    models::SleepWindow,
};
use crate::ring::ClockTime;

fn row_to_sleep_window(row: &Row) -> Result<SleepWindow> {
    let date_key: i64 = row.get("date_key")?;
    let start_hour: i64 = row.get("start_hour")?;
    let start_minute: i64 = row.get("start_minute")?;
    let (end_hour, end_minute) = parse_end(row.get("end_hour")?, row.get("end_minute")?)?;

    Ok(SleepWindow {
        date_key: parse_date_key(date_key, "date_key")?,
        start_hour: to_hour(start_hour, "start_hour")?,
        start_minute: to_minute(start_minute, "start_minute")?,
        end_hour,
        end_minute,
    })
}

fn validate(window: &SleepWindow) -> Result<()> {
    to_hour(window.start_hour as i64, "start_hour")?;
    to_minute(window.start_minute as i64, "start_minute")?;
    parse_end(
        window.end_hour.map(i64::from),
        window.end_minute.map(i64::from),
    )?;
    Ok(())
}

impl Database {
    /// Insert or replace the window for `window.date_key`.
    pub async fn upsert_sleep_window(&self, window: &SleepWindow) -> Result<()> {
        validate(window)?;
        let record = *window;
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO sleep_windows (date_key, start_hour, start_minute, end_hour, end_minute)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(date_key) DO UPDATE SET
                     start_hour = excluded.start_hour,
                     start_minute = excluded.start_minute,
                     end_hour = excluded.end_hour,
                     end_minute = excluded.end_minute",
                params![
                    record.date_key.value(),
                    record.start_hour,
                    record.start_minute,
                    record.end_hour,
                    record.end_minute,
                ],
            )?;
            Ok(())
        })
        .await
    }

    /// Record the wake-up time for a day that already has a window.
    pub async fn update_sleep_window_end(&self, date_key: DateKey, end: ClockTime) -> Result<()> {
        self.execute(move |conn| {
            let rows_affected = conn.execute(
                "UPDATE sleep_windows
                 SET end_hour = ?1,
                     end_minute = ?2
                 WHERE date_key = ?3",
                params![end.hour(), end.minute(), date_key.value()],
            )?;

            if rows_affected == 0 {
                return Err(anyhow!("No sleep window recorded for {date_key}"));
            }

            Ok(())
        })
        .await
    }

    pub async fn get_sleep_window(&self, date_key: DateKey) -> Result<Option<SleepWindow>> {
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT date_key, start_hour, start_minute, end_hour, end_minute
                 FROM sleep_windows
                 WHERE date_key = ?1
                 LIMIT 1",
            )?;

            let window = stmt
                .query_row(params![date_key.value()], |row| Ok(row_to_sleep_window(row)))
                .optional()?
                .transpose()?;

            Ok(window)
        })
        .await
    }

    /// Point lookups for several days in one round trip to the DB thread.
    pub async fn get_sleep_windows(
        &self,
        date_keys: Vec<DateKey>,
    ) -> Result<HashMap<DateKey, SleepWindow>> {
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT date_key, start_hour, start_minute, end_hour, end_minute
                 FROM sleep_windows
                 WHERE date_key = ?1",
            )?;

            let mut windows = HashMap::with_capacity(date_keys.len());
            for key in date_keys {
                let mut rows = stmt.query(params![key.value()])?;
                if let Some(row) = rows.next()? {
                    windows.insert(key, row_to_sleep_window(row)?);
                }
            }

            Ok(windows)
        })
        .await
    }

    /// Remove every sleep window and audio event.
    pub async fn clear_all(&self) -> Result<()> {
        self.execute(|conn| {
            let tx = conn.transaction()?;
            tx.execute("DELETE FROM audio_events", [])?;
            tx.execute("DELETE FROM sleep_windows", [])?;
            tx.commit()?;
            Ok(())
        })
        .await
    }
}
