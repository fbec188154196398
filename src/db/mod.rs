//! SQLite-backed store for sleep windows and audio events.
//!
//! Provides the operations the rest of the app relies on: upsert and point
//! lookup of windows by date key, append-only audio events, per-label score
//! sums and a bulk clear of both tables.

mod connection;
pub mod helpers;
mod migrations;
pub mod models;
mod repositories;

pub use connection::Database;
pub use models::{AudioEvent, Classification, NewAudioEvent, SleepWindow};
