//! Straight-line projectiles

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::config::Arena;
use crate::direction_from_degrees;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    /// Assigned when the bullet joins a world
    pub id: u32,
    pub pos: Vec2,
    /// Heading in degrees
    pub angle: f32,
    /// Fixed at creation
    pub vel: Vec2,
    /// Hit radius
    pub size: f32,
    /// Fired by the player (explodes) or by an enemy (direct hit)
    pub is_player: bool,
    /// Cleared on impact or when leaving the arena, purged at end of tick
    pub active: bool,
}

impl Bullet {
    pub fn new(pos: Vec2, angle: f32, speed: f32, size: f32, is_player: bool) -> Self {
        Self {
            id: 0,
            pos,
            angle,
            vel: direction_from_degrees(angle) * speed,
            size,
            is_player,
            active: true,
        }
    }

    /// Advance one tick; deactivates once outside the arena
    pub fn update(&mut self, arena: &Arena) {
        self.pos += self.vel;
        if !arena.contains(self.pos) {
            self.active = false;
        }
    }

    /// Box used against walls (edge length is twice the radius)
    pub fn hit_box(&self) -> Rect {
        Rect::centered(self.pos, self.size * 2.0)
    }
}
