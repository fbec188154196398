pub mod audio_event;
pub mod sleep_window;

pub use audio_event::{AudioEvent, Classification, NewAudioEvent};
pub use sleep_window::SleepWindow;
