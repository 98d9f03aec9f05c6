//! Grid-aligned obstacles

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::{BRICK_HP, STEEL_HP};

/// Wall material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WallKind {
    /// Breaks after enough explosion damage
    #[default]
    Brick,
    /// Indestructible
    Steel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wall {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub size: f32,
    pub kind: WallKind,
    pub hp: f32,
}

impl Wall {
    pub fn new(id: u32, pos: Vec2, size: f32, kind: WallKind) -> Self {
        let hp = match kind {
            WallKind::Brick => BRICK_HP,
            WallKind::Steel => STEEL_HP,
        };
        Self { id, pos, size, kind, hp }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }

    /// Geometric center, used for splash distance
    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    /// Apply damage; returns true if this hit destroyed the wall.
    /// Steel ignores damage entirely.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        match self.kind {
            WallKind::Brick => {
                self.hp -= amount;
                self.hp <= 0.0
            }
            WallKind::Steel => false,
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.kind == WallKind::Brick && self.hp <= 0.0
    }
}
