//! Application settings stored in `~/.config/retbro/settings.toml`.
//!
//! Every field has a default, so a missing or partial file is fine. A file
//! that fails to parse is logged and replaced by defaults in memory.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use retbro_core::metadata::DEFAULT_PLACEHOLDER_BASE;

use crate::gamepad::GamepadConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub input: InputSettings,
    #[serde(default)]
    pub player: PlayerSettings,
    #[serde(default)]
    pub metadata: MetadataSettings,
}

/// Gamepad sampling and analog stick behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    /// Normalized stick magnitude below which movement is ignored.
    pub dead_zone: f64,
    /// Interval between repeated moves while the stick is held.
    pub repeat_interval_ms: u64,
    /// Gamepad sampling period (one display frame).
    pub poll_interval_ms: u64,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            dead_zone: 0.45,
            repeat_interval_ms: 160,
            poll_interval_ms: 16,
        }
    }
}

impl InputSettings {
    pub fn repeat_interval(&self) -> Duration {
        Duration::from_millis(self.repeat_interval_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    pub fn gamepad_config(&self) -> GamepadConfig {
        GamepadConfig {
            dead_zone: self.dead_zone.abs() as f32,
            repeat_interval: self.repeat_interval(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Page that receives the playback handoff.
    pub page: String,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            page: "emulator.html".to_string(),
        }
    }
}

/// Which metadata provider answers lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    ScreenScraper,
    Offline,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ScreenScraper => write!(f, "screenscraper"),
            Self::Offline => write!(f, "offline"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataSettings {
    pub provider: ProviderKind,
    /// Base URL of the placeholder image service used for fallback covers.
    pub placeholder_base: String,
    pub timeout_secs: u64,
    pub min_request_interval_ms: u64,
}

impl Default for MetadataSettings {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            placeholder_base: DEFAULT_PLACEHOLDER_BASE.to_string(),
            timeout_secs: 30,
            min_request_interval_ms: 1200,
        }
    }
}

/// Canonical path to the settings file: `~/.config/retbro/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("retbro").join("settings.toml")
}

/// Load settings from the canonical path.
pub fn load_settings() -> Settings {
    load_settings_from(&settings_path())
}

/// Load settings from disk, returning defaults if missing or corrupt.
pub fn load_settings_from(path: &Path) -> Settings {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
            log::warn!("Failed to parse settings at {}: {}", path.display(), e);
            Settings::default()
        }),
        Err(_) => Settings::default(),
    }
}

/// Save settings to the canonical path.
pub fn save_settings(settings: &Settings) -> io::Result<()> {
    save_settings_to(&settings_path(), settings)
}

/// Save settings atomically (write to temp, then rename).
pub fn save_settings_to(path: &Path, settings: &Settings) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let contents = toml::to_string_pretty(settings).map_err(io::Error::other)?;
    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, contents)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

/// Effective settings rendered as TOML for display.
pub fn settings_to_string(settings: &Settings) -> String {
    toml::to_string_pretty(settings).unwrap_or_default()
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
