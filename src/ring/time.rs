use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MINUTES_PER_HOUR: i64 = 60;
pub const MINUTES_PER_DAY: i64 = 24 * MINUTES_PER_HOUR;
pub const GRID_MINUTES: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid time of day {hour}:{minute:02} (expected hour 0-23, minute 0-59)")]
pub struct InvalidTimeError {
    pub hour: i64,
    pub minute: i64,
}

/// A wall-clock time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime { hour: 0, minute: 0 };

    pub fn new(hour: i64, minute: i64) -> Result<Self, InvalidTimeError> {
        if !(0..24).contains(&hour) || !(0..60).contains(&minute) {
            return Err(InvalidTimeError { hour, minute });
        }
        Ok(Self {
            hour: hour as u8,
            minute: minute as u8,
        })
    }

    /// Wraps any minute count (negative included) onto the 24h clock.
    pub fn from_minutes_of_day(minutes: i64) -> Self {
        let wrapped = minutes.rem_euclid(MINUTES_PER_DAY);
        Self {
            hour: (wrapped / MINUTES_PER_HOUR) as u8,
            minute: (wrapped % MINUTES_PER_HOUR) as u8,
        }
    }

    pub fn hour(self) -> u8 {
        self.hour
    }

    pub fn minute(self) -> u8 {
        self.minute
    }

    pub fn minutes_of_day(self) -> i64 {
        self.hour as i64 * MINUTES_PER_HOUR + self.minute as i64
    }

    /// Fractional hour, e.g. 22:30 -> 22.5.
    pub fn as_hours(self) -> f64 {
        self.hour as f64 + self.minute as f64 / MINUTES_PER_HOUR as f64
    }

    pub fn add_minutes(self, minutes: i64) -> Self {
        Self::from_minutes_of_day(self.minutes_of_day() + minutes)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_ranges() {
        assert!(ClockTime::new(23, 59).is_ok());
        assert_eq!(
            ClockTime::new(24, 0),
            Err(InvalidTimeError { hour: 24, minute: 0 })
        );
        assert!(ClockTime::new(-1, 0).is_err());
        assert!(ClockTime::new(7, 60).is_err());
    }

    #[test]
    fn wraps_minute_counts() {
        assert_eq!(ClockTime::from_minutes_of_day(-5), ClockTime::new(23, 55).unwrap());
        assert_eq!(ClockTime::from_minutes_of_day(1445), ClockTime::new(0, 5).unwrap());
        assert_eq!(ClockTime::new(21, 0).unwrap().add_minutes(6 * 60).to_string(), "03:00");
    }
}
