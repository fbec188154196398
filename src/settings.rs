use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use crate::ring::{ClockTime, TimeRing};

const ENABLE_LOGS: bool = true;

/// Sleep window assumed for days with nothing recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultSleepConfig {
    pub start_hour: u8,
    pub start_minute: u8,
    pub end_hour: u8,
    pub end_minute: u8,
}

impl Default for DefaultSleepConfig {
    fn default() -> Self {
        Self {
            start_hour: 0,
            start_minute: 0,
            end_hour: 6,
            end_minute: 0,
        }
    }
}

impl DefaultSleepConfig {
    pub fn new(start: ClockTime, end: ClockTime) -> Self {
        Self {
            start_hour: start.hour(),
            start_minute: start.minute(),
            end_hour: end.hour(),
            end_minute: end.minute(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        ClockTime::new(self.start_hour as i64, self.start_minute as i64)
            .context("invalid default sleep start")?;
        ClockTime::new(self.end_hour as i64, self.end_minute as i64)
            .context("invalid default sleep end")?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct UserSettings {
    default_sleep: DefaultSleepConfig,
    ring_anchor_hour: u8,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            default_sleep: DefaultSleepConfig::default(),
            ring_anchor_hour: TimeRing::default().anchor_hour(),
        }
    }
}

impl UserSettings {
    fn validate(&self) -> Result<()> {
        self.default_sleep.validate()?;
        TimeRing::new(self.ring_anchor_hour).context("invalid ring anchor hour")?;
        Ok(())
    }
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    /// Opens the settings file, writing the defaults on first run.
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            match serde_json::from_str::<UserSettings>(&contents)
                .map_err(anyhow::Error::from)
                .and_then(|data| data.validate().map(|()| data))
            {
                Ok(data) => data,
                Err(err) => {
                    crate::log_warn!(
                        "Ignoring unusable settings at {}: {err:#}",
                        path.display()
                    );
                    UserSettings::default()
                }
            }
        } else {
            let defaults = UserSettings::default();
            persist_to(&path, &defaults)?;
            crate::log_info!("Wrote default settings to {}", path.display());
            defaults
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn default_sleep(&self) -> DefaultSleepConfig {
        self.read().default_sleep
    }

    /// The dial configured with the stored anchor hour.
    pub fn ring(&self) -> TimeRing {
        TimeRing::new(self.read().ring_anchor_hour).unwrap_or_default()
    }

    pub fn update_default_sleep(&self, config: DefaultSleepConfig) -> Result<()> {
        config.validate()?;
        let mut guard = self.write();
        guard.default_sleep = config;
        persist_to(&self.path, &guard)
    }

    pub fn update_ring_anchor(&self, anchor_hour: u8) -> Result<()> {
        if anchor_hour >= 24 {
            bail!("ring anchor hour {anchor_hour} out of range");
        }
        let mut guard = self.write();
        guard.ring_anchor_hour = anchor_hour;
        persist_to(&self.path, &guard)
    }

    pub fn reload(&self) -> Result<()> {
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings from {}", self.path.display()))?;
        let data: UserSettings = serde_json::from_str(&contents)?;
        data.validate()?;
        *self.write() = data;
        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, UserSettings> {
        self.data.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, UserSettings> {
        self.data.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn persist_to(path: &Path, data: &UserSettings) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create settings directory {}", parent.display()))?;
    }
    let serialized = serde_json::to_string_pretty(data)?;
    fs::write(path, serialized)
        .with_context(|| format!("Failed to write settings to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn first_run_writes_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let store = SettingsStore::new(path.clone()).unwrap();

        assert!(path.exists());
        assert_eq!(store.default_sleep(), DefaultSleepConfig::default());
        assert_eq!(store.ring().anchor_hour(), 6);
    }

    #[test]
    fn updates_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let store = SettingsStore::new(path.clone()).unwrap();
        let config = DefaultSleepConfig {
            start_hour: 22,
            start_minute: 30,
            end_hour: 6,
            end_minute: 45,
        };
        store.update_default_sleep(config).unwrap();
        store.update_ring_anchor(0).unwrap();

        let reopened = SettingsStore::new(path).unwrap();
        assert_eq!(reopened.default_sleep(), config);
        assert_eq!(reopened.ring().anchor_hour(), 0);
    }

    #[test]
    fn rejects_out_of_range_config() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json")).unwrap();
        let bad = DefaultSleepConfig {
            start_hour: 24,
            start_minute: 0,
            end_hour: 6,
            end_minute: 0,
        };
        assert!(store.update_default_sleep(bad).is_err());
        assert!(store.update_ring_anchor(24).is_err());
        assert_eq!(store.default_sleep(), DefaultSleepConfig::default());
    }

    #[test]
    fn unreadable_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        let store = SettingsStore::new(path).unwrap();
        assert_eq!(store.default_sleep(), DefaultSleepConfig::default());
    }

    #[test]
    fn out_of_range_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(
            &path,
            r#"{"defaultSleep":{"startHour":30,"startMinute":99,"endHour":6,"endMinute":0}}"#,
        )
        .unwrap();
        let store = SettingsStore::new(path).unwrap();
        assert_eq!(store.default_sleep(), DefaultSleepConfig::default());
        assert!(crate::stats::fallback_hours(&store.default_sleep()) >= 0.0);

        let anchor_path = dir.path().join("anchor.json");
        fs::write(&anchor_path, r#"{"ringAnchorHour":31}"#).unwrap();
        let store = SettingsStore::new(anchor_path).unwrap();
        assert_eq!(store.ring().anchor_hour(), 6);
    }

    #[test]
    fn reload_rejects_out_of_range_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let store = SettingsStore::new(path.clone()).unwrap();
        fs::write(
            &path,
            r#"{"defaultSleep":{"startHour":30,"startMinute":0,"endHour":6,"endMinute":0}}"#,
        )
        .unwrap();
        assert!(store.reload().is_err());
        assert_eq!(store.default_sleep(), DefaultSleepConfig::default());

        fs::write(&path, r#"{"ringAnchorHour":24}"#).unwrap();
        assert!(store.reload().is_err());
        assert_eq!(store.ring().anchor_hour(), 6);
    }

    #[test]
    fn reload_picks_up_external_edits() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let store = SettingsStore::new(path.clone()).unwrap();
        fs::write(
            &path,
            r#"{"defaultSleep":{"startHour":23,"startMinute":0,"endHour":7,"endMinute":0}}"#,
        )
        .unwrap();

        store.reload().unwrap();
        assert_eq!(store.default_sleep().start_hour, 23);
        // Missing keys keep their defaults.
        assert_eq!(store.ring().anchor_hour(), 6);
    }
}
