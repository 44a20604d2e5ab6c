//! Tunable playfield geometry and speeds.
//!
//! Every field has a default, so a TOML file only needs the keys it changes.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config: {source}")]
    Syntax {
        #[from]
        source: toml::de::Error,
    },
    #[error("invalid value {value} for `{field}`: must be finite and not negative")]
    Invalid { field: &'static str, value: f32 },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub field_width: f32,
    pub field_height: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub bullet_width: f32,
    pub bullet_height: f32,
    pub enemy_width: f32,
    pub enemy_height: f32,
    /// Field units a bullet climbs per tick.  Kept at half an enemy's height
    /// so a bullet cannot step clean over an enemy between ticks.
    pub bullet_speed: f32,
    /// Field units an enemy descends per tick.
    pub enemy_speed: f32,
    /// Step used by hosts for keyboard nudges.  The simulation never reads it.
    pub player_speed: f32,
    pub enemy_spawn_period_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: 800.0,
            field_height: 600.0,
            player_width: 50.0,
            player_height: 50.0,
            bullet_width: 5.0,
            bullet_height: 10.0,
            enemy_width: 40.0,
            enemy_height: 40.0,
            bullet_speed: 20.0,
            enemy_speed: 2.0,
            player_speed: 25.0,
            enemy_spawn_period_ms: 1000,
        }
    }
}

impl GameConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject sizes and speeds that are negative, infinite or NaN.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("bullet_width", self.bullet_width),
            ("bullet_height", self.bullet_height),
            ("enemy_width", self.enemy_width),
            ("enemy_height", self.enemy_height),
            ("bullet_speed", self.bullet_speed),
            ("enemy_speed", self.enemy_speed),
            ("player_speed", self.player_speed),
        ];
        match fields.iter().find(|(_, v)| !v.is_finite() || *v < 0.0) {
            Some(&(field, value)) => Err(ConfigError::Invalid { field, value }),
            None => Ok(()),
        }
    }

    pub fn spawn_period(&self) -> Duration {
        Duration::from_millis(self.enemy_spawn_period_ms)
    }
}
