//! World state and wave generation
//!
//! The world owns every entity. Nothing holds a reference back to it, and
//! all randomness flows through the world's [`RandomSource`].

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bullet::Bullet;
use super::collision::distance;
use super::particle::Particle;
use super::random::{RandomSource, seeded};
use super::tank::Tank;
use super::wall::{Wall, WallKind};
use crate::config::GameConfig;
use crate::consts::*;

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Running,
    /// Frozen until toggled back
    Paused,
    /// Terminal until an explicit restart
    GameOver,
}

/// State changes for the presentation layer (HUD, overlays, audio)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    HealthChanged { hp: f32, max_hp: f32 },
    ScoreChanged { score: u64 },
    EnemyDestroyed { id: u32 },
    WallDestroyed { id: u32 },
    /// `level` is the wave that was just cleared
    WaveCleared { level: u32 },
    PhaseChanged { phase: GamePhase },
    GameOver { score: u64, level: u32 },
    Restarted,
}

/// Everything the HUD shows
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HudState {
    /// Rounded up for display
    pub hp: f32,
    pub max_hp: f32,
    pub score: u64,
    pub level: u32,
    pub enemies_left: usize,
    pub phase: GamePhase,
}

/// Read-only view handed to the renderer each frame
#[derive(Debug, Serialize)]
pub struct WorldSnapshot<'a> {
    pub player: &'a Tank,
    pub enemies: &'a [Tank],
    pub bullets: &'a [Bullet],
    pub walls: &'a [Wall],
    pub particles: &'a [Particle],
    pub hud: HudState,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct World<R: RandomSource = Pcg32> {
    pub config: GameConfig,
    pub score: u64,
    /// Starts at 1
    pub level: u32,
    pub phase: GamePhase,
    /// Simulation clock (ms), advanced only while running
    pub clock_ms: f64,
    pub player: Tank,
    pub enemies: Vec<Tank>,
    pub bullets: Vec<Bullet>,
    pub walls: Vec<Wall>,
    /// Visual only
    pub particles: Vec<Particle>,
    pub rng: R,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl World<Pcg32> {
    /// Start a new game seeded for reproducibility
    pub fn new(config: GameConfig, seed: u64) -> Self {
        log::info!("New game with seed {seed}");
        Self::with_rng(config, seeded(seed))
    }
}

impl<R: RandomSource> World<R> {
    /// Start a new game drawing from `rng`
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        let player = Tank::player(1, config.arena.center(), &config);
        let mut world = Self {
            config,
            score: 0,
            level: 1,
            phase: GamePhase::Running,
            clock_ms: 0.0,
            player,
            enemies: Vec::new(),
            bullets: Vec::new(),
            walls: Vec::new(),
            particles: Vec::new(),
            rng,
            events: Vec::new(),
            next_id: 2,
        };
        world.generate_level();
        world
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Rebuild enemies and walls for the current level
    pub fn generate_level(&mut self) {
        let level = self.level;

        self.enemies.clear();
        let enemy_count = BASE_ENEMY_COUNT + level;
        let enemy_hp = ENEMY_BASE_HP + level as f32 * ENEMY_HP_PER_LEVEL;
        for _ in 0..enemy_count {
            let pos = self.pick_enemy_spawn();
            let id = self.next_entity_id();
            let enemy = Tank::enemy(id, pos, enemy_hp, &self.config, &mut self.rng);
            self.enemies.push(enemy);
        }

        self.walls.clear();
        let wall_count = BASE_WALL_COUNT + level * WALLS_PER_LEVEL;
        let size = self.config.wall_size;
        let arena = self.config.arena;
        for _ in 0..wall_count {
            // Snap to the grid, keeping the whole wall inside the arena
            let x = (self.rng.next_unit() * (arena.width - size) / size).floor() * size;
            let y = (self.rng.next_unit() * (arena.height - size) / size).floor() * size;
            let kind = if self.rng.chance(BRICK_CHANCE) {
                WallKind::Brick
            } else {
                WallKind::Steel
            };
            let id = self.next_entity_id();
            self.walls.push(Wall::new(id, Vec2::new(x, y), size, kind));
        }

        log::info!(
            "Level {}: {} enemies ({} hp), {} walls",
            level,
            enemy_count,
            enemy_hp,
            wall_count
        );
    }

    /// Rejection-sample a spawn point clear of the player. Gives up after
    /// `MAX_SPAWN_ATTEMPTS` and uses the farthest sample seen.
    fn pick_enemy_spawn(&mut self) -> Vec2 {
        let arena = self.config.arena;
        let player = self.player.pos;
        let mut farthest: Option<(Vec2, f32)> = None;

        for _ in 0..MAX_SPAWN_ATTEMPTS {
            let x = self.rng.range(SPAWN_MARGIN, arena.width - SPAWN_MARGIN);
            let y = self.rng.range(SPAWN_MARGIN, arena.height - SPAWN_MARGIN);
            let pos = Vec2::new(x, y);
            let dist = distance(pos, player);
            if dist >= SPAWN_CLEARANCE {
                return pos;
            }
            if farthest.is_none_or(|(_, best)| dist > best) {
                farthest = Some((pos, dist));
            }
        }

        let (pos, dist) = farthest.unwrap_or((arena.center(), 0.0));
        log::warn!(
            "No spawn point {SPAWN_CLEARANCE} from the player after {MAX_SPAWN_ATTEMPTS} tries, using one {dist:.0} away"
        );
        pos
    }

    /// Reset to level 1 with a fresh player and wave
    pub fn restart(&mut self) {
        self.score = 0;
        self.level = 1;
        self.phase = GamePhase::Running;
        self.clock_ms = 0.0;
        self.bullets.clear();
        self.particles.clear();

        let id = self.next_entity_id();
        self.player = Tank::player(id, self.config.arena.center(), &self.config);
        self.generate_level();

        log::info!("Game restarted");
        self.emit(GameEvent::Restarted);
        self.emit(GameEvent::PhaseChanged { phase: self.phase });
        self.emit_health();
        self.emit(GameEvent::ScoreChanged { score: self.score });
    }

    /// Flip between Running and Paused; ignored after game over
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Running => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Running,
            GamePhase::GameOver => return,
        };
        log::debug!("Phase -> {:?}", self.phase);
        self.emit(GameEvent::PhaseChanged { phase: self.phase });
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Give a bullet an ID and add it to the world
    pub fn add_bullet(&mut self, mut bullet: Bullet) {
        bullet.id = self.next_entity_id();
        self.bullets.push(bullet);
    }

    pub fn add_score(&mut self, points: u64) {
        self.score += points;
        self.emit(GameEvent::ScoreChanged { score: self.score });
    }

    /// Hurt the player; a lethal hit ends the game
    pub fn damage_player(&mut self, amount: f32) {
        let dead = self.player.take_damage(amount);
        self.emit_health();
        if dead {
            self.game_over();
        }
    }

    pub fn heal_player(&mut self, amount: f32) {
        self.player.heal(amount);
        self.emit_health();
    }

    fn game_over(&mut self) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        log::info!("Game over: score {} at level {}", self.score, self.level);
        self.emit(GameEvent::PhaseChanged { phase: self.phase });
        self.emit(GameEvent::GameOver {
            score: self.score,
            level: self.level,
        });
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    fn emit_health(&mut self) {
        self.emit(GameEvent::HealthChanged {
            hp: self.player.hp,
            max_hp: self.player.max_hp,
        });
    }

    /// Hand buffered events to the presentation layer
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn hud(&self) -> HudState {
        HudState {
            hp: self.player.hp.ceil(),
            max_hp: self.player.max_hp,
            score: self.score,
            level: self.level,
            enemies_left: self.enemies.len(),
            phase: self.phase,
        }
    }

    pub fn snapshot(&self) -> WorldSnapshot<'_> {
        WorldSnapshot {
            player: &self.player,
            enemies: &self.enemies,
            bullets: &self.bullets,
            walls: &self.walls,
            particles: &self.particles,
            hud: self.hud(),
        }
    }
}
