pub mod date_key;
pub mod db;
pub mod ring;
pub mod settings;
pub mod stats;
pub mod tracking;
mod utils;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;

pub use date_key::DateKey;
pub use db::{AudioEvent, Classification, Database, NewAudioEvent, SleepWindow};
pub use ring::{ClockTime, RingAngleState, RingSelection, TimeRing};
pub use settings::{DefaultSleepConfig, SettingsStore};
pub use stats::{AudioStats, WeeklyReport};
pub use tracking::{SleepTracker, TrackingState};

const DATA_DIR_ENV: &str = "SLEEPFAST_DATA_DIR";
const DEFAULT_DATA_DIR: &str = "./sleepfast-data";

fn data_dir() -> PathBuf {
    std::env::var_os(DATA_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

pub fn run() -> Result<()> {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("SleepFast starting up...");

    let data_dir = data_dir();
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("failed to create data dir {}", data_dir.display()))?;

    let settings = SettingsStore::new(data_dir.join("settings.json"))?;
    let database = Database::new(data_dir.join("sleepfast.sqlite3"))?;

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    runtime.block_on(async move {
        let now = Local::now().naive_local();
        let today = now.date();
        let fallback = settings.default_sleep();

        let (start, end) = ring::default_selection(now);
        log::info!("Suggested window tonight: {start} -> {end}");

        let report = database.weekly_report(today, &fallback).await?;
        log::info!(
            "Weekly average sleep: {} ({:.2}h)",
            report.average,
            report.average_hours
        );
        for bar in &report.bars {
            log::info!(
                "  {} {:?}: {:.2}h -> {:.2}h",
                bar.date_key,
                bar.status,
                bar.start_hours,
                bar.end_hours
            );
        }

        let audio = database.audio_stats(report.today).await?;
        log::info!(
            "Audio for {}: snore {:.2}, speech {:.2}, room {:.2}",
            report.today,
            audio.snore,
            audio.speech,
            audio.room
        );

        Ok::<(), anyhow::Error>(())
    })
}
