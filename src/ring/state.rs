use serde::{Deserialize, Serialize};

use super::model::{arc_contains, compute_arc_sweep, ArcSweep, TimeRing};
use super::time::ClockTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RingHandle {
    Start,
    End,
}

/// Times currently selected on the dial. Returned from every drag update in
/// place of a listener callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RingSelection {
    pub start: ClockTime,
    pub end: ClockTime,
}

/// The two handle angles of the dial while the user is interacting with it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingAngleState {
    ring: TimeRing,
    start_angle: f64,
    end_angle: f64,
}

impl RingAngleState {
    pub fn from_times(ring: TimeRing, start: ClockTime, end: ClockTime) -> Self {
        Self {
            ring,
            start_angle: ring.clock_time_to_angle(start),
            end_angle: ring.clock_time_to_angle(end),
        }
    }

    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    pub fn end_angle(&self) -> f64 {
        self.end_angle
    }

    pub fn selection(&self) -> RingSelection {
        RingSelection {
            start: self.ring.angle_to_time(self.start_angle),
            end: self.ring.angle_to_time(self.end_angle),
        }
    }

    pub fn sweep(&self) -> ArcSweep {
        compute_arc_sweep(self.start_angle, self.end_angle)
    }

    pub fn contains(&self, angle: f64) -> bool {
        arc_contains(self.start_angle, self.end_angle, angle)
    }

    /// Moves one handle to the grid line nearest `raw_angle`.
    pub fn drag_handle(&mut self, handle: RingHandle, raw_angle: f64) -> RingSelection {
        let snapped = self.ring.adjust_angle_for_grid(raw_angle);
        match handle {
            RingHandle::Start => self.start_angle = snapped,
            RingHandle::End => self.end_angle = snapped,
        }
        self.selection()
    }

    /// Rotates the whole window by the angle the finger travelled along the arc.
    /// Both finger positions snap to the grid first, so the handles stay on
    /// 5 minute lines.
    pub fn drag_arc(&mut self, from_angle: f64, to_angle: f64) -> RingSelection {
        let delta =
            self.ring.adjust_angle_for_grid(to_angle) - self.ring.adjust_angle_for_grid(from_angle);
        self.start_angle = self.ring.adjust_angle_for_grid(self.start_angle + delta);
        self.end_angle = self.ring.adjust_angle_for_grid(self.end_angle + delta);
        self.selection()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, TAU};

    fn time(hour: i64, minute: i64) -> ClockTime {
        ClockTime::new(hour, minute).unwrap()
    }

    fn state() -> RingAngleState {
        RingAngleState::from_times(TimeRing::default(), time(23, 0), time(7, 0))
    }

    #[test]
    fn selection_reflects_initial_times() {
        let selection = state().selection();
        assert_eq!(selection.start, time(23, 0));
        assert_eq!(selection.end, time(7, 0));
    }

    #[test]
    fn dragging_a_handle_snaps_to_the_grid() {
        let mut ring = state();
        let per_minute = TAU / 1440.0;
        // 7:02 and a bit, past the anchor.
        let selection = ring.drag_handle(RingHandle::End, 62.4 * per_minute);
        assert_eq!(selection.end, time(7, 0));
        assert_eq!(selection.start, time(23, 0));
        assert_eq!(ring.end_angle(), TimeRing::default().clock_time_to_angle(time(7, 0)));
    }

    #[test]
    fn dragging_the_arc_keeps_the_window_length() {
        let mut ring = state();
        let before = ring.sweep().sweep_degrees;
        let selection = ring.drag_arc(0.0, FRAC_PI_2 / 3.0);
        assert_eq!(selection.start, time(1, 0));
        assert_eq!(selection.end, time(9, 0));
        assert!((ring.sweep().sweep_degrees - before).abs() < 1e-9);
    }

    #[test]
    fn dragging_the_arc_keeps_handles_on_the_grid() {
        let mut ring = state();
        let model = TimeRing::default();
        let per_minute = TAU / 1440.0;
        // Finger moves from just past 6:01 to just past 7:02.
        let selection = ring.drag_arc(1.3 * per_minute, 62.4 * per_minute);
        assert_eq!(selection.start, time(0, 0));
        assert_eq!(selection.end, time(8, 0));
        assert_eq!(ring.start_angle(), model.clock_time_to_angle(time(0, 0)));
        assert_eq!(ring.end_angle(), model.clock_time_to_angle(time(8, 0)));

        // Repeated small drags do not accumulate off-grid drift.
        for _ in 0..12 {
            ring.drag_arc(0.0, 2.2 * per_minute);
        }
        assert_eq!(ring.start_angle(), model.clock_time_to_angle(time(0, 0)));
        assert_eq!(ring.selection().end, time(8, 0));
    }

    #[test]
    fn contains_angles_inside_the_window() {
        let ring = state();
        // Midnight is inside 23:00 -> 07:00, noon is not.
        let ring_model = TimeRing::default();
        assert!(ring.contains(ring_model.clock_time_to_angle(time(0, 0))));
        assert!(!ring.contains(ring_model.clock_time_to_angle(time(12, 0))));
    }

    #[test]
    fn sweep_spans_the_sleep_window() {
        // 8 hours of a 24 hour dial.
        assert!((state().sweep().sweep_degrees - 120.0).abs() < 1e-9);
    }
}
