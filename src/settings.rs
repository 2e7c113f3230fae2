//! Demo settings with persistence
//!
//! Settings are read from `~/.config/arcade/settings.toml` unless a path is
//! given on the command line.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use arcade_core::TimeConfig;
use arcade_game::{CameraConfig, ControlsConfig};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// All demo settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    pub controls: ControlsConfig,
    pub camera: CameraConfig,
    pub time: TimeConfig,
    pub demo: DemoConfig,
}

impl DemoSettings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("arcade"))
    }

    /// Get the default settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from the default location, or return defaults
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load settings from `path`, falling back to defaults on any failure
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No settings file at {:?}, using defaults", path);
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match Self::parse(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse settings: {:#}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Parse and validate a TOML document
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let settings: Self = toml::from_str(content).context("invalid TOML")?;
        settings
            .controls
            .validate()
            .context("invalid [controls] section")?;
        Ok(settings)
    }

    /// Save settings to the default location
    pub fn save(&self) -> anyhow::Result<()> {
        let Some(path) = Self::settings_path() else {
            anyhow::bail!("Could not determine config directory");
        };
        self.save_to(&path)
    }

    /// Save settings to `path`, creating its directory if needed
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)
                    .with_context(|| format!("creating config directory {:?}", dir))?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).with_context(|| format!("writing {:?}", path))?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }
}

/// Headless run parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Number of ticks to simulate
    pub ticks: u32,
    /// Wall-clock milliseconds per tick before time scaling
    pub tick_ms: f64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            ticks: 300,
            tick_ms: 1000.0 / 60.0,
        }
    }
}
