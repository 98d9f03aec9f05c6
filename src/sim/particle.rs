//! Explosion debris (visual only, never affects gameplay)

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::random::RandomSource;

/// Downward pull applied each tick
pub const PARTICLE_GRAVITY: f32 = 0.2;
/// Life lost per tick (starts at 1.0)
pub const PARTICLE_FADE: f32 = 0.02;
/// Spray speed spans [-MAX/2, MAX/2) on each axis
pub const PARTICLE_MAX_SPEED: f32 = 10.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 1.0 at spawn, dead at or below 0
    pub life: f32,
    pub size: f32,
    /// HSL hue in degrees, orange to red
    pub hue: f32,
}

impl Particle {
    /// Spawn a particle with a random spray velocity, size and hue
    pub fn spawn(pos: Vec2, rng: &mut impl RandomSource) -> Self {
        let half = PARTICLE_MAX_SPEED / 2.0;
        let vx = rng.range(-half, half);
        let vy = rng.range(-half, half);
        Self {
            pos,
            vel: Vec2::new(vx, vy),
            life: 1.0,
            size: rng.range(3.0, 8.0),
            hue: rng.range(10.0, 70.0),
        }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
        self.vel.y += PARTICLE_GRAVITY;
        self.life -= PARTICLE_FADE;
    }

    pub fn is_dead(&self) -> bool {
        self.life <= 0.0
    }

    /// Opacity for rendering
    pub fn alpha(&self) -> f32 {
        self.life.clamp(0.0, 1.0)
    }
}
