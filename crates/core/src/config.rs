//! Application configuration.

use std::{fs, path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use config::{Config, File};
use serde::{Deserialize, Serialize};

/// Config file location under the user's config directory.
pub const DEFAULT_CONFIG_PATH: &str = "st/config.json";

const DEFAULT_STARTING_CREDITS: u32 = 1_000;
const DEFAULT_TURN_DELAY_MS: u64 = 2_000;

/// Runtime settings for a game session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Credits the bank loans the player at session start.
    pub starting_credits: u32,
    /// Cosmetic pause between turns, in milliseconds.
    pub turn_delay_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            starting_credits: DEFAULT_STARTING_CREDITS,
            turn_delay_ms: DEFAULT_TURN_DELAY_MS,
        }
    }
}

impl AppConfig {
    /// Load settings from the default config file, falling back to defaults
    /// for anything the file does not set.
    pub fn load() -> Result<Self> {
        Self::load_from(default_path())
    }

    /// Load settings from the given file. A missing file yields defaults.
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let settings = Config::builder()
            .set_default("starting_credits", i64::from(DEFAULT_STARTING_CREDITS))?
            .set_default("turn_delay_ms", DEFAULT_TURN_DELAY_MS as i64)?
            .add_source(File::from(path.clone()).required(false))
            .build()
            .with_context(|| format!("failed to read config {}", path.display()))?;
        settings
            .try_deserialize()
            .with_context(|| format!("failed to parse config {}", path.display()))
    }

    /// The pacing delay as a [`Duration`].
    pub fn turn_delay(&self) -> Duration {
        Duration::from_millis(self.turn_delay_ms)
    }
}

/// Default config file path inside the user's config directory.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_CONFIG_PATH)
}

/// Write a default config file if none exists yet, returning its path.
pub fn ensure_default_config() -> Result<PathBuf> {
    let path = default_path();
    if path.exists() {
        return Ok(path);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let serialized = serde_json::to_string_pretty(&AppConfig::default())
        .context("failed to serialize default config")?;
    fs::write(&path, serialized)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}
