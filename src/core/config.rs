//=========================================================================
// Configuration Service
//=========================================================================
//
// Player settings persisted as TOML.
//
// Lifecycle:
//   startup  → read file (missing file → defaults, malformed → fatal)
//   running  → scenes read/modify Settings, changes mark the service dirty
//   shutdown → write file back if dirty
//
// Without a path the service keeps settings in memory only.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::subsystem::{Subsystem, SubsystemError};

//=== Errors ==============================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings from {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed settings file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to encode settings")]
    Encode(#[from] toml::ser::Error),

    #[error("failed to write settings to {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

//=== Settings ============================================================

/// Number of best scores kept.
pub const MAX_BEST_SCORES: usize = 10;

/// Persisted player settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// 0.0..=1.0
    pub master_volume: f32,
    pub muted: bool,
    /// Highest first, at most [`MAX_BEST_SCORES`] entries.
    pub best_scores: Vec<u32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            muted: false,
            best_scores: Vec::new(),
        }
    }
}

impl Settings {
    fn sanitize(&mut self) {
        if !self.master_volume.is_finite() {
            self.master_volume = Settings::default().master_volume;
        }
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.best_scores.sort_unstable_by(|a, b| b.cmp(a));
        self.best_scores.truncate(MAX_BEST_SCORES);
    }
}

//=== ConfigService =======================================================

pub struct ConfigService {
    path: Option<PathBuf>,
    settings: Settings,
    last_score: Option<u32>,
    dirty: bool,
}

impl ConfigService {
    pub(crate) fn new(path: Option<PathBuf>) -> Self {
        Self {
            path,
            settings: Settings::default(),
            last_score: None,
            dirty: false,
        }
    }

    //--- Persistence ------------------------------------------------------

    fn load(path: &Path) -> Result<Option<Settings>, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let mut settings: Settings = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.sanitize();
        Ok(Some(settings))
    }

    /// Writes the settings to the configured path, if any.
    pub fn save(&mut self) -> Result<(), ConfigError> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };

        let text = toml::to_string_pretty(&self.settings)?;
        fs::write(path, text).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("Settings written to {}", path.display());
        self.dirty = false;
        Ok(())
    }

    //--- Settings Access --------------------------------------------------

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Sets the master volume, clamped to 0.0..=1.0.
    pub fn set_master_volume(&mut self, volume: f32) {
        let volume = volume.clamp(0.0, 1.0);
        if volume != self.settings.master_volume {
            self.settings.master_volume = volume;
            self.dirty = true;
        }
    }

    /// Flips mute and returns the new state.
    pub fn toggle_mute(&mut self) -> bool {
        self.settings.muted = !self.settings.muted;
        self.dirty = true;
        self.settings.muted
    }

    /// Volume audio should play at, zero while muted.
    pub fn effective_volume(&self) -> f32 {
        if self.settings.muted {
            0.0
        } else {
            self.settings.master_volume
        }
    }

    //--- Scores -----------------------------------------------------------

    /// Records the result of a run.
    ///
    /// Returns the zero-based rank if the score made the best list.
    pub fn record_score(&mut self, score: u32) -> Option<usize> {
        self.last_score = Some(score);

        let scores = &mut self.settings.best_scores;
        let rank = scores.iter().position(|&best| score > best).unwrap_or(scores.len());
        if rank >= MAX_BEST_SCORES {
            return None;
        }

        scores.insert(rank, score);
        scores.truncate(MAX_BEST_SCORES);
        self.dirty = true;
        info!("Score {} recorded at rank {}", score, rank + 1);
        Some(rank)
    }

    /// Score of the most recent run in this process.
    pub fn last_score(&self) -> Option<u32> {
        self.last_score
    }

    pub fn best_score(&self) -> Option<u32> {
        self.settings.best_scores.first().copied()
    }
}

//=== Subsystem ===========================================================

impl Subsystem for ConfigService {
    fn name(&self) -> &'static str {
        "config"
    }

    fn startup(&mut self) -> Result<(), SubsystemError> {
        self.dirty = false;
        self.last_score = None;

        let Some(path) = self.path.as_deref() else {
            debug!("No settings path, using defaults");
            self.settings = Settings::default();
            return Ok(());
        };

        match Self::load(path)? {
            Some(settings) => {
                info!("Settings loaded from {}", path.display());
                self.settings = settings;
            }
            None => {
                info!("No settings at {}, using defaults", path.display());
                self.settings = Settings::default();
            }
        }
        Ok(())
    }

    fn shutdown(&mut self) {
        if !self.dirty {
            return;
        }
        if let Err(err) = self.save() {
            error!("Settings not saved: {}", err);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
