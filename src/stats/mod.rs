//! Sleep statistics derived from stored windows and audio events.
//!
//! Everything here is a pure function of already-fetched records; callers
//! pass the default window in rather than reading it from global state.

pub mod audio;
pub mod duration;
pub mod report;
pub mod weekly;

pub use audio::{total_score_for_label, AudioStats};
pub use duration::{duration_hours, fallback_hours};
pub use report::{HoursMinutes, WeeklyReport};
pub use weekly::{weekly_average_hours, weekly_bars, weekly_series, DayStatus, WeeklyBar};
