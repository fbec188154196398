pub mod alarm;
pub mod controller;
pub mod state;

pub use alarm::next_alarm_at;
pub use controller::SleepTracker;
pub use state::{TrackingState, TrackingStatus};
