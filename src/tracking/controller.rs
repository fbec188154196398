use std::sync::Arc;

use anyhow::{anyhow, bail, Result};
use chrono::{DateTime, Local, NaiveDateTime, Timelike};
use tokio::sync::Mutex;

use crate::{
    date_key::DateKey,
    db::{Classification, Database, NewAudioEvent, SleepWindow},
    ring::{ClockTime, RingSelection},
};

use super::{alarm::next_alarm_at, TrackingState, TrackingStatus};

const ENABLE_LOGS: bool = true;

/// Drives one night of tracking: writes the sleep window when tracking
/// starts and stops, and files classifier output under the night's date.
#[derive(Clone)]
pub struct SleepTracker {
    state: Arc<Mutex<TrackingState>>,
    db: Database,
}

impl SleepTracker {
    pub fn new(db: Database) -> Self {
        Self {
            state: Arc::new(Mutex::new(TrackingState::new())),
            db,
        }
    }

    pub async fn snapshot(&self) -> TrackingState {
        self.state.lock().await.clone()
    }

    pub async fn start_tracking(&self, selection: RingSelection) -> Result<TrackingState> {
        self.start_tracking_at(selection, Local::now()).await
    }

    pub async fn start_tracking_at(
        &self,
        selection: RingSelection,
        now: DateTime<Local>,
    ) -> Result<TrackingState> {
        let date_key = DateKey::from_date(now.date_naive());

        // Claim the tracker before touching the store so a second start fails fast.
        {
            let mut state = self.state.lock().await;
            if state.status != TrackingStatus::Idle {
                bail!("sleep tracking already active");
            }
            state.begin(date_key, now.naive_local(), selection.start, selection.end);
            state.status = TrackingStatus::Starting;
        }

        let window = SleepWindow::new(date_key, selection.start, None);
        if let Err(err) = self.db.upsert_sleep_window(&window).await {
            self.state.lock().await.finish();
            crate::log_error!("Failed to record start of night {date_key}: {err:#}");
            return Err(err);
        }
        self.state.lock().await.status = TrackingStatus::Tracking;

        crate::log_info!(
            "Tracking night {date_key}: {} -> {}",
            selection.start,
            selection.end
        );

        Ok(self.snapshot().await)
    }

    pub async fn stop_tracking(&self) -> Result<SleepWindow> {
        self.stop_tracking_at(Local::now()).await
    }

    /// Writes the wake-up time and returns the completed window.
    pub async fn stop_tracking_at(&self, now: DateTime<Local>) -> Result<SleepWindow> {
        let end = ClockTime::new(now.hour() as i64, now.minute() as i64)?;

        // Only one stop may own the session; later callers see it as inactive.
        let date_key = {
            let mut state = self.state.lock().await;
            match (state.status, state.date_key) {
                (TrackingStatus::Tracking, Some(key)) => {
                    state.status = TrackingStatus::Stopping;
                    key
                }
                _ => bail!("sleep tracking is not active"),
            }
        };

        if let Err(err) = self.db.update_sleep_window_end(date_key, end).await {
            self.state.lock().await.status = TrackingStatus::Tracking;
            crate::log_error!("Failed to record end of night {date_key}: {err:#}");
            return Err(err);
        }

        let recorded = {
            let mut state = self.state.lock().await;
            let recorded = state.events_recorded;
            state.finish();
            recorded
        };

        crate::log_info!("Stopped tracking night {date_key} at {end} ({recorded} audio events)");

        self.db
            .get_sleep_window(date_key)
            .await?
            .ok_or_else(|| anyhow!("sleep window for {date_key} disappeared"))
    }

    pub async fn record_classifications(&self, results: Vec<Classification>) -> Result<usize> {
        self.record_classifications_at(results, Local::now()).await
    }

    /// Files one inference result under the night being tracked.
    pub async fn record_classifications_at(
        &self,
        results: Vec<Classification>,
        now: DateTime<Local>,
    ) -> Result<usize> {
        let (date_key, started_at) = {
            let state = self.state.lock().await;
            match (state.status, state.date_key) {
                (TrackingStatus::Tracking, Some(key)) => (key, state.started_at),
                _ => bail!("cannot record audio events while not tracking"),
            }
        };

        let timestamp_millis = now.timestamp_millis();
        let events = results
            .into_iter()
            .map(|result| NewAudioEvent {
                date_key,
                label: result.label,
                score: result.score,
                timestamp_millis,
            })
            .collect::<Vec<_>>();

        let inserted = self.db.insert_audio_events(events).await?;
        {
            let mut state = self.state.lock().await;
            // The night may have been stopped while the insert ran.
            if state.is_session(date_key, started_at) {
                state.events_recorded += inserted as u64;
            }
        }
        crate::log_debug!("Recorded {inserted} audio events for {date_key}");

        Ok(inserted)
    }

    /// When the wake-up alarm should fire, if a night is being tracked.
    pub async fn next_alarm(&self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        let state = self.state.lock().await;
        match (state.status, state.planned_wake) {
            (TrackingStatus::Tracking, Some(wake)) => Some(next_alarm_at(now, wake)),
            _ => None,
        }
    }
}
