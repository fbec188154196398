use anyhow::Result;
use rusqlite::{params, Row};

use crate::date_key::DateKey;
use crate::db::{
    connection::Database,
    helpers::{check_score, parse_date_key},
    models::{AudioEvent, NewAudioEvent},
};

fn row_to_audio_event(row: &Row) -> Result<AudioEvent> {
    let date_key: i64 = row.get("date_key")?;

    Ok(AudioEvent {
        id: row.get("id")?,
        date_key: parse_date_key(date_key, "date_key")?,
        label: row.get("label")?,
        score: row.get("score")?,
        timestamp_millis: row.get("timestamp_millis")?,
    })
}

impl Database {
    /// Append one classifier observation; returns the assigned id.
    pub async fn insert_audio_event(&self, event: &NewAudioEvent) -> Result<i64> {
        check_score(event.score)?;
        let record = event.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO audio_events (date_key, label, score, timestamp_millis)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    record.date_key.value(),
                    record.label,
                    record.score,
                    record.timestamp_millis,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
    }

    /// Append a whole inference result in one transaction.
    pub async fn insert_audio_events(&self, events: Vec<NewAudioEvent>) -> Result<usize> {
        for event in &events {
            check_score(event.score)?;
        }
        self.execute(move |conn| {
            let tx = conn.transaction()?;
            {
                let mut stmt = tx.prepare(
                    "INSERT INTO audio_events (date_key, label, score, timestamp_millis)
                     VALUES (?1, ?2, ?3, ?4)",
                )?;
                for event in &events {
                    stmt.execute(params![
                        event.date_key.value(),
                        event.label,
                        event.score,
                        event.timestamp_millis,
                    ])?;
                }
            }
            tx.commit()?;
            Ok(events.len())
        })
        .await
    }

    /// Sum of scores for `label` on `date_key`; 0.0 when nothing matches.
    pub async fn total_score_for_label(&self, date_key: DateKey, label: &str) -> Result<f64> {
        let label = label.to_string();
        self.execute(move |conn| {
            let total: Option<f64> = conn.query_row(
                "SELECT SUM(score) FROM audio_events WHERE label = ?1 AND date_key = ?2",
                params![label, date_key.value()],
                |row| row.get(0),
            )?;
            Ok(total.unwrap_or(0.0))
        })
        .await
    }

    pub async fn audio_events_for_day(&self, date_key: DateKey) -> Result<Vec<AudioEvent>> {
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, date_key, label, score, timestamp_millis
                 FROM audio_events
                 WHERE date_key = ?1
                 ORDER BY timestamp_millis ASC, id ASC",
            )?;

            let mut rows = stmt.query(params![date_key.value()])?;
            let mut events = Vec::new();
            while let Some(row) = rows.next()? {
                events.push(row_to_audio_event(row)?);
            }

            Ok(events)
        })
        .await
    }
}
