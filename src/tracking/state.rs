use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::date_key::DateKey;
use crate::ring::ClockTime;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum TrackingStatus {
    #[default]
    Idle,
    /// Start window is being written; not yet accepting events.
    Starting,
    Tracking,
    /// A stop has claimed the session and is writing the wake-up time.
    Stopping,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrackingState {
    pub status: TrackingStatus,
    /// Day the current night is filed under.
    pub date_key: Option<DateKey>,
    pub started_at: Option<NaiveDateTime>,
    pub planned_start: Option<ClockTime>,
    pub planned_wake: Option<ClockTime>,
    pub events_recorded: u64,
}

impl TrackingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_tracking(&self) -> bool {
        self.status == TrackingStatus::Tracking
    }

    pub fn begin(
        &mut self,
        date_key: DateKey,
        started_at: NaiveDateTime,
        planned_start: ClockTime,
        planned_wake: ClockTime,
    ) {
        *self = Self {
            status: TrackingStatus::Tracking,
            date_key: Some(date_key),
            started_at: Some(started_at),
            planned_start: Some(planned_start),
            planned_wake: Some(planned_wake),
            events_recorded: 0,
        };
    }

    /// Whether `self` still describes the session that began at `started_at`
    /// on `date_key`.
    pub fn is_session(&self, date_key: DateKey, started_at: Option<NaiveDateTime>) -> bool {
        self.status != TrackingStatus::Idle
            && self.date_key == Some(date_key)
            && self.started_at == started_at
    }

    pub fn finish(&mut self) {
        *self = Self::default();
    }
}
