//! Angle <-> time-of-day mapping for the 24 hour sleep dial.
//!
//! Angles are in radians and follow screen space: they come straight from
//! `atan2(dy, dx)` with y growing downward, so they increase clockwise on
//! screen. The anchor hour sits at angle zero (3 o'clock). With the default
//! anchor of 6:00, midnight lands at the top of the dial.

use std::f64::consts::TAU;

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use super::time::{ClockTime, InvalidTimeError, GRID_MINUTES, MINUTES_PER_DAY, MINUTES_PER_HOUR};

pub const DEFAULT_ANCHOR_HOUR: u8 = 6;
/// Length of the selection offered before the user touches the dial.
pub const DEFAULT_SELECTION_HOURS: i64 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRing {
    anchor_hour: u8,
}

impl Default for TimeRing {
    fn default() -> Self {
        Self {
            anchor_hour: DEFAULT_ANCHOR_HOUR,
        }
    }
}

/// Arc to draw for a sleep window, in degrees for the canvas API.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArcSweep {
    /// In `[0, 360)`.
    pub start_degrees: f64,
    /// Clockwise extent from the start handle to the end handle, in `[0, 360)`.
    pub sweep_degrees: f64,
}

impl TimeRing {
    pub fn new(anchor_hour: u8) -> Result<Self, InvalidTimeError> {
        if anchor_hour >= 24 {
            return Err(InvalidTimeError {
                hour: anchor_hour as i64,
                minute: 0,
            });
        }
        Ok(Self { anchor_hour })
    }

    pub fn anchor_hour(&self) -> u8 {
        self.anchor_hour
    }

    pub fn angle_to_time(&self, angle: f64) -> ClockTime {
        let total_minutes = (angle / TAU * MINUTES_PER_DAY as f64).floor() as i64;
        let rounded = snap_to_grid(total_minutes);
        let hour = (self.anchor_hour as i64 + rounded.div_euclid(MINUTES_PER_HOUR)).rem_euclid(24);
        let minute = rounded.rem_euclid(MINUTES_PER_HOUR);
        ClockTime::from_minutes_of_day(hour * MINUTES_PER_HOUR + minute)
    }

    pub fn time_to_angle(&self, hour: i64, minute: i64) -> Result<f64, InvalidTimeError> {
        let time = ClockTime::new(hour, minute)?;
        Ok(self.clock_time_to_angle(time))
    }

    pub fn clock_time_to_angle(&self, time: ClockTime) -> f64 {
        let minute = snap_to_grid(time.minute() as i64);
        let total_minutes =
            (time.hour() as i64 - self.anchor_hour as i64) * MINUTES_PER_HOUR + minute;
        total_minutes as f64 / MINUTES_PER_DAY as f64 * TAU
    }

    /// Snaps a raw drag angle onto the nearest 5 minute grid line.
    pub fn adjust_angle_for_grid(&self, angle: f64) -> f64 {
        self.clock_time_to_angle(self.angle_to_time(angle))
    }
}

fn snap_to_grid(minutes: i64) -> i64 {
    (minutes as f64 / GRID_MINUTES as f64).round() as i64 * GRID_MINUTES
}

pub fn compute_arc_sweep(start_angle: f64, end_angle: f64) -> ArcSweep {
    let start = start_angle.to_degrees();
    let end = end_angle.to_degrees();
    ArcSweep {
        start_degrees: normalize_degrees(start),
        sweep_degrees: normalize_degrees(end - start),
    }
}

fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Whether `angle` lies on the clockwise arc running from `start` to `end`.
pub fn arc_contains(start: f64, end: f64, angle: f64) -> bool {
    let start = start.rem_euclid(TAU);
    let end = end.rem_euclid(TAU);
    let angle = angle.rem_euclid(TAU);

    if start <= end {
        (start..=end).contains(&angle)
    } else {
        angle >= start || angle <= end
    }
}

/// Selection shown before the user drags: now rounded up to the next 5
/// minutes, ending six hours later.
pub fn default_selection(now: NaiveDateTime) -> (ClockTime, ClockTime) {
    let minutes = now.hour() as i64 * MINUTES_PER_HOUR + now.minute() as i64;
    let rounded_up = (minutes + GRID_MINUTES - 1) / GRID_MINUTES * GRID_MINUTES;
    let start = ClockTime::from_minutes_of_day(rounded_up);
    (start, start.add_minutes(DEFAULT_SELECTION_HOURS * MINUTES_PER_HOUR))
}
