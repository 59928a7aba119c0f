//! Runtime configuration.
//!
//! Every field has a default taken from `constants`, so a config file only
//! needs the keys it overrides. No file at all is the same as `{}`.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use crate::audio::Volumes;
use crate::constants::*;
use crate::error::ConfigError;
use crate::systems::experience::XpCurve;

/// Configuration for a run of the game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct GameConfig {
    /// Random seed for the run (None = seeded from the clock)
    pub seed: Option<u64>,

    /// Name used for a new run when the menu supplies none
    pub player_name: String,

    /// XP to go from level 1 to 2
    pub exp_for_level_2: u32,

    /// Growth factor of the XP requirement per level
    pub exp_scaling: f32,

    pub save_path: PathBuf,
    pub backup_path: PathBuf,

    pub volumes: Volumes,

    pub viewport_width: f32,
    pub viewport_height: f32,

    /// Fixed simulation step in seconds
    pub frame_dt: f32,

    /// Frames the headless shell runs before exiting (0 = until game over)
    pub headless_frames: u64,

    /// Enable puffin scopes
    pub profiling: bool,

    /// Roll melee crits from the player's own stats instead of the fixed
    /// 15% / 1.8x profile
    pub crit_from_player: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            player_name: PLAYER_DEFAULT_NAME.to_string(),
            exp_for_level_2: EXP_FOR_LEVEL_2,
            exp_scaling: EXP_SCALING,
            save_path: PathBuf::from(SAVE_FILE_PATH),
            backup_path: PathBuf::from(SAVE_BACKUP_PATH),
            volumes: Volumes::default(),
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            frame_dt: DEFAULT_FRAME_DT,
            headless_frames: DEFAULT_HEADLESS_FRAMES,
            profiling: false,
            crit_from_player: false,
        }
    }
}

impl GameConfig {
    /// Read a JSON config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text).map_err(|err| match err {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate config text
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.frame_dt > 0.0 && self.frame_dt <= 1.0) {
            return Err(ConfigError::Invalid {
                field: "frame_dt",
                reason: format!("{} is outside (0, 1]", self.frame_dt),
            });
        }
        if self.exp_for_level_2 == 0 {
            return Err(ConfigError::Invalid {
                field: "exp_for_level_2",
                reason: "must be positive".to_string(),
            });
        }
        if self.exp_scaling < 1.0 {
            return Err(ConfigError::Invalid {
                field: "exp_scaling",
                reason: format!("{} would shrink requirements", self.exp_scaling),
            });
        }
        if self.viewport_width <= 0.0 || self.viewport_height <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "viewport",
                reason: format!("{}x{}", self.viewport_width, self.viewport_height),
            });
        }
        Ok(())
    }

    pub fn xp_curve(&self) -> XpCurve {
        XpCurve {
            exp_for_level_2: self.exp_for_level_2,
            scaling: self.exp_scaling,
        }
    }

    /// The configured seed, or one drawn from the clock
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }
}
