//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied frame time only
//! - Seeded or scripted randomness only
//! - Stable iteration order (entity vectors in insertion order)
//! - No rendering, input device or platform dependencies

pub mod bullet;
pub mod collision;
pub mod particle;
pub mod random;
pub mod state;
pub mod tank;
pub mod tick;
pub mod wall;

pub use bullet::Bullet;
pub use collision::{Rect, circle_collision, distance, rect_collision};
pub use particle::Particle;
pub use random::{RandomSource, seeded};
pub use state::{GameEvent, GamePhase, HudState, World, WorldSnapshot};
pub use tank::{AiState, Tank};
pub use tick::{TickInput, create_explosion, tick};
pub use wall::{Wall, WallKind};
