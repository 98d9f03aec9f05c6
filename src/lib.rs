//! Tank Arena - A top-down arcade tank battle
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tanks, bullets, walls, explosions, waves)
//! - `config`: Tunables fixed at process start

pub mod config;
pub mod sim;

pub use config::{Arena, ConfigError, GameConfig};

use glam::Vec2;

/// Game rule constants
pub mod consts {
    /// Arena defaults
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Tank defaults (speed is per tick)
    pub const TANK_SIZE: f32 = 40.0;
    pub const TANK_SPEED: f32 = 3.0;
    pub const PLAYER_MAX_HP: f32 = 100.0;
    /// Muzzle sits this far past the hull edge
    pub const BARREL_OVERHANG: f32 = 10.0;

    /// Bullet defaults (size doubles as hit radius)
    pub const BULLET_SIZE: f32 = 8.0;
    pub const BULLET_SPEED: f32 = 8.0;
    /// Enemy bullets hit the player for a flat amount, no splash
    pub const DIRECT_HIT_DAMAGE: f32 = 20.0;

    /// Explosion defaults
    pub const EXPLOSION_RADIUS: f32 = 80.0;
    pub const EXPLOSION_DAMAGE: f32 = 40.0;
    pub const PARTICLE_COUNT: u32 = 20;

    /// Walls snap to a grid of this pitch
    pub const WALL_SIZE: f32 = 40.0;
    pub const BRICK_HP: f32 = 50.0;
    pub const STEEL_HP: f32 = 999_999.0;
    pub const BRICK_CHANCE: f32 = 0.7;

    /// Fire cooldowns (ms)
    pub const PLAYER_SHOOT_COOLDOWN_MS: f64 = 500.0;
    pub const ENEMY_SHOOT_COOLDOWN_MS: f64 = 2000.0;

    /// Enemy AI
    pub const AI_MIN_CHANGE_INTERVAL_MS: f64 = 1000.0;
    pub const AI_MAX_CHANGE_INTERVAL_MS: f64 = 3000.0;
    pub const AI_FIRE_RANGE: f32 = 400.0;
    pub const AI_FIRE_CHANCE: f32 = 0.02;

    /// Wave generation
    pub const BASE_ENEMY_COUNT: u32 = 3;
    pub const ENEMY_BASE_HP: f32 = 50.0;
    pub const ENEMY_HP_PER_LEVEL: f32 = 10.0;
    pub const BASE_WALL_COUNT: u32 = 15;
    pub const WALLS_PER_LEVEL: u32 = 2;
    pub const SPAWN_CLEARANCE: f32 = 200.0;
    pub const SPAWN_MARGIN: f32 = 50.0;
    pub const MAX_SPAWN_ATTEMPTS: u32 = 256;

    /// Scoring
    pub const KILL_SCORE: u64 = 100;
    pub const WAVE_CLEAR_SCORE: u64 = 1000;
    pub const WAVE_CLEAR_HEAL: f32 = 30.0;

    /// Virtual joystick offsets shorter than this are ignored
    pub const JOYSTICK_DEAD_ZONE: f32 = 10.0;
}

/// Degrees to radians
#[inline]
pub fn to_radians(degrees: f32) -> f32 {
    degrees * std::f32::consts::PI / 180.0
}

/// Radians to degrees
#[inline]
pub fn to_degrees(radians: f32) -> f32 {
    radians * 180.0 / std::f32::consts::PI
}

/// Heading in degrees pointing from `from` toward `to`
#[inline]
pub fn heading_between(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    to_degrees(d.y.atan2(d.x))
}

/// Unit vector for a heading in degrees
#[inline]
pub fn direction_from_degrees(degrees: f32) -> Vec2 {
    let rad = to_radians(degrees);
    Vec2::new(rad.cos(), rad.sin())
}
