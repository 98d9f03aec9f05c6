//! Game configuration
//!
//! Tunables are read once at startup and never change while a world runs.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors raised while loading a configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Playing field bounds, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

impl Arena {
    pub fn center(&self) -> glam::Vec2 {
        glam::Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// True if a point lies inside [0, width] x [0, height]
    pub fn contains(&self, pos: glam::Vec2) -> bool {
        pos.x >= 0.0 && pos.x <= self.width && pos.y >= 0.0 && pos.y <= self.height
    }
}

/// Game tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub arena: Arena,

    // === Tanks ===
    pub tank_size: f32,
    /// Units per tick
    pub tank_speed: f32,
    pub player_shoot_cooldown_ms: f64,
    pub enemy_shoot_cooldown_ms: f64,

    // === Bullets ===
    pub bullet_size: f32,
    /// Units per tick
    pub bullet_speed: f32,

    // === Explosions ===
    pub explosion_radius: f32,
    pub explosion_damage: f32,
    pub particle_count: u32,

    // === Walls ===
    pub wall_size: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena: Arena::default(),

            tank_size: TANK_SIZE,
            tank_speed: TANK_SPEED,
            player_shoot_cooldown_ms: PLAYER_SHOOT_COOLDOWN_MS,
            enemy_shoot_cooldown_ms: ENEMY_SHOOT_COOLDOWN_MS,

            bullet_size: BULLET_SIZE,
            bullet_speed: BULLET_SPEED,

            explosion_radius: EXPLOSION_RADIUS,
            explosion_damage: EXPLOSION_DAMAGE,
            particle_count: PARTICLE_COUNT,

            wall_size: WALL_SIZE,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("arena.width", self.arena.width),
            ("arena.height", self.arena.height),
            ("tank_size", self.tank_size),
            ("bullet_size", self.bullet_size),
            ("wall_size", self.wall_size),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }

        if self.tank_speed < 0.0 || self.bullet_speed < 0.0 {
            return Err(ConfigError::Invalid("speeds must not be negative".into()));
        }
        if self.player_shoot_cooldown_ms < 0.0 || self.enemy_shoot_cooldown_ms < 0.0 {
            return Err(ConfigError::Invalid("cooldowns must not be negative".into()));
        }

        // Enemies spawn inside a margin band, walls on a grid
        let min_side = 2.0 * SPAWN_MARGIN + self.tank_size;
        if self.arena.width < min_side || self.arena.height < min_side {
            return Err(ConfigError::Invalid(format!(
                "arena {}x{} too small, need at least {min_side} per side",
                self.arena.width, self.arena.height
            )));
        }
        if self.arena.width <= self.wall_size || self.arena.height <= self.wall_size {
            return Err(ConfigError::Invalid("arena must be larger than one wall".into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.arena.width, 800.0);
        assert_eq!(config.arena.height, 600.0);
        assert_eq!(config.particle_count, 20);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GameConfig::from_json(r#"{ "tank_speed": 5.0, "arena": { "width": 1024, "height": 768 } }"#)
            .expect("valid config");
        assert_eq!(config.tank_speed, 5.0);
        assert_eq!(config.arena.width, 1024.0);
        assert_eq!(config.bullet_speed, BULLET_SPEED);
    }

    #[test]
    fn test_rejects_bad_json() {
        let err = GameConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_rejects_tiny_arena() {
        let err = GameConfig::from_json(r#"{ "arena": { "width": 100, "height": 100 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_zero_tank_size() {
        let err = GameConfig::from_json(r#"{ "tank_size": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = GameConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_arena_contains_is_inclusive() {
        let arena = Arena::default();
        assert!(arena.contains(glam::Vec2::new(0.0, 600.0)));
        assert!(!arena.contains(glam::Vec2::new(-0.1, 300.0)));
        assert!(!arena.contains(glam::Vec2::new(400.0, 600.1)));
    }
}
