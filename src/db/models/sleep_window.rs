//! Sleep window data model.
//!
//! One row per calendar day, keyed by `DateKey`. The end fields stay empty
//! while the night is still being tracked.

use serde::{Deserialize, Serialize};

use crate::date_key::DateKey;
use crate::ring::ClockTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepWindow {
    pub date_key: DateKey,
    pub start_hour: u8,
    pub start_minute: u8,
    pub end_hour: Option<u8>,
    pub end_minute: Option<u8>,
}

impl SleepWindow {
    pub fn new(date_key: DateKey, start: ClockTime, end: Option<ClockTime>) -> Self {
        Self {
            date_key,
            start_hour: start.hour(),
            start_minute: start.minute(),
            end_hour: end.map(ClockTime::hour),
            end_minute: end.map(ClockTime::minute),
        }
    }

    pub fn start_time(&self) -> ClockTime {
        ClockTime::from_minutes_of_day(self.start_hour as i64 * 60 + self.start_minute as i64)
    }

    /// `None` until both end fields are recorded.
    pub fn end_time(&self) -> Option<ClockTime> {
        match (self.end_hour, self.end_minute) {
            (Some(hour), Some(minute)) => {
                Some(ClockTime::from_minutes_of_day(hour as i64 * 60 + minute as i64))
            }
            _ => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.end_time().is_some()
    }
}
