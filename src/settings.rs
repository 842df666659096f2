//! Game settings and preferences
//!
//! Loaded from an optional JSON file; every field falls back to its default.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{MOUSE_MOVE_CHANCE, SPAWN_INTERVAL_MS};
use crate::sim::{FIRST_LEVEL, LAST_LEVEL};

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("setting `{field}` out of range: {reason}")]
    OutOfRange { field: &'static str, reason: String },
}

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed (random when absent)
    pub seed: Option<u64>,
    /// Level the session starts on
    pub starting_level: u8,

    // === Timers ===
    /// Auto-spawn cadence in milliseconds
    pub spawn_interval_ms: u64,
    /// Chance that each mouse moves on a mouse-move tick (0.0 - 1.0)
    pub mouse_move_chance: f64,
    /// Whether the auto-spawn timer spawns at all
    pub auto_spawn: bool,

    // === Front end ===
    /// Simulated milliseconds that pass per terminal input
    pub step_ms: u64,
    /// Suppress sound cue output
    pub mute: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            starting_level: FIRST_LEVEL,

            spawn_interval_ms: SPAWN_INTERVAL_MS,
            mouse_move_chance: MOUSE_MOVE_CHANCE,
            auto_spawn: true,

            step_ms: 500,
            mute: false,
        }
    }
}

impl Settings {
    /// Read and validate settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Settings = serde_json::from_str(&json)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(0.0..=1.0).contains(&self.mouse_move_chance) {
            return Err(SettingsError::OutOfRange {
                field: "mouse_move_chance",
                reason: format!("{} is not within 0.0..=1.0", self.mouse_move_chance),
            });
        }
        if self.spawn_interval_ms == 0 {
            return Err(SettingsError::OutOfRange {
                field: "spawn_interval_ms",
                reason: "must be positive".to_string(),
            });
        }
        if !(FIRST_LEVEL..=LAST_LEVEL).contains(&self.starting_level) {
            return Err(SettingsError::OutOfRange {
                field: "starting_level",
                reason: format!(
                    "{} is not within {}..={}",
                    self.starting_level, FIRST_LEVEL, LAST_LEVEL
                ),
            });
        }
        Ok(())
    }
}
