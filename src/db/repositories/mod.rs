mod audio_events;
mod reports;
mod sleep_windows;
