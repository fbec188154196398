pub mod model;
pub mod state;
pub mod time;

pub use model::{arc_contains, compute_arc_sweep, default_selection, ArcSweep, TimeRing};
pub use state::{RingAngleState, RingHandle, RingSelection};
pub use time::{ClockTime, InvalidTimeError};
