//! Tanks: movement with collision, firing, damage and enemy AI

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bullet::Bullet;
use super::collision::{Rect, circle_collision, distance, rect_collision};
use super::random::RandomSource;
use super::wall::Wall;
use crate::config::{Arena, GameConfig};
use crate::consts::*;
use crate::{direction_from_degrees, heading_between};

/// Wander state for AI-driven tanks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiState {
    /// Time since the last direction change (ms)
    pub timer_ms: f64,
    /// Wander heading in degrees, independent of the turret facing
    pub direction: f32,
    /// Time until the next direction change (ms)
    pub change_interval_ms: f64,
}

impl AiState {
    pub fn random(rng: &mut impl RandomSource) -> Self {
        Self {
            timer_ms: 0.0,
            direction: rng.range(0.0, 360.0),
            change_interval_ms: random_interval(rng),
        }
    }
}

fn random_interval(rng: &mut impl RandomSource) -> f64 {
    rng.range(AI_MIN_CHANGE_INTERVAL_MS as f32, AI_MAX_CHANGE_INTERVAL_MS as f32) as f64
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tank {
    pub id: u32,
    /// Hull center
    pub pos: Vec2,
    /// Hull edge length
    pub size: f32,
    /// Facing in degrees
    pub angle: f32,
    /// Units per tick
    pub speed: f32,
    pub is_player: bool,
    pub hp: f32,
    pub max_hp: f32,
    /// Clock time of the last shot, `None` until the first one
    pub last_shot_ms: Option<f64>,
    pub shoot_cooldown_ms: f64,
    /// Present only on enemies
    pub ai: Option<AiState>,
}

impl Tank {
    pub fn player(id: u32, pos: Vec2, config: &GameConfig) -> Self {
        Self {
            id,
            pos,
            size: config.tank_size,
            angle: 0.0,
            speed: config.tank_speed,
            is_player: true,
            hp: PLAYER_MAX_HP,
            max_hp: PLAYER_MAX_HP,
            last_shot_ms: None,
            shoot_cooldown_ms: config.player_shoot_cooldown_ms,
            ai: None,
        }
    }

    pub fn enemy(
        id: u32,
        pos: Vec2,
        max_hp: f32,
        config: &GameConfig,
        rng: &mut impl RandomSource,
    ) -> Self {
        Self {
            id,
            pos,
            size: config.tank_size,
            angle: 0.0,
            speed: config.tank_speed,
            is_player: false,
            hp: max_hp,
            max_hp,
            last_shot_ms: None,
            shoot_cooldown_ms: config.enemy_shoot_cooldown_ms,
            ai: Some(AiState::random(rng)),
        }
    }

    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0.0
    }

    /// Health bar fill in [0, 1]
    pub fn hp_ratio(&self) -> f32 {
        if self.max_hp > 0.0 {
            (self.hp / self.max_hp).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Step along `dir` by `speed`. The move is all-or-nothing: if the
    /// new hull would leave the arena, overlap a wall, or overlap another
    /// tank, the tank stays put. Returns true if the tank moved.
    ///
    /// Destroyed walls and dead tanks still pending removal are ignored.
    pub fn move_by<'a>(
        &mut self,
        dir: Vec2,
        arena: &Arena,
        walls: &[Wall],
        others: impl IntoIterator<Item = &'a Tank>,
    ) -> bool {
        let candidate = self.pos + dir * self.speed;
        let half = self.radius();

        // Touching the edge counts as leaving
        if candidate.x - half <= 0.0
            || candidate.x + half >= arena.width
            || candidate.y - half <= 0.0
            || candidate.y + half >= arena.height
        {
            return false;
        }

        let hull = Rect::centered(candidate, self.size);
        if walls
            .iter()
            .any(|w| !w.is_destroyed() && rect_collision(hull, w.rect()))
        {
            return false;
        }

        let blocked = others.into_iter().any(|other| {
            other.id != self.id
                && other.is_alive()
                && circle_collision(candidate, other.pos, half, other.radius())
        });
        if blocked {
            return false;
        }

        self.pos = candidate;
        true
    }

    /// Fire along `angle` (or the current facing) if the cooldown allows.
    /// The bullet leaves from the muzzle, just past the hull edge.
    pub fn shoot(
        &mut self,
        now_ms: f64,
        angle: Option<f32>,
        config: &GameConfig,
    ) -> Option<Bullet> {
        if let Some(last) = self.last_shot_ms {
            if now_ms - last < self.shoot_cooldown_ms {
                return None;
            }
        }
        self.last_shot_ms = Some(now_ms);

        let angle = angle.unwrap_or(self.angle);
        let muzzle = self.pos + direction_from_degrees(angle) * (self.radius() + BARREL_OVERHANG);
        Some(Bullet::new(
            muzzle,
            angle,
            config.bullet_speed,
            config.bullet_size,
            self.is_player,
        ))
    }

    /// Apply damage, clamping at zero. Returns true if the tank is now dead.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        self.hp = (self.hp - amount).max(0.0);
        self.hp <= 0.0
    }

    /// Heal up to `max_hp`
    pub fn heal(&mut self, amount: f32) {
        self.hp = (self.hp + amount).min(self.max_hp);
    }

    /// Run one tick of enemy behaviour: wander, face the player, and
    /// occasionally fire when in range. Player tanks do nothing.
    #[allow(clippy::too_many_arguments)]
    pub fn update_ai<'a>(
        &mut self,
        player: &Tank,
        arena: &Arena,
        walls: &[Wall],
        others: impl IntoIterator<Item = &'a Tank>,
        delta_ms: f64,
        now_ms: f64,
        config: &GameConfig,
        rng: &mut impl RandomSource,
    ) -> Option<Bullet> {
        let ai = self.ai.as_mut()?;

        ai.timer_ms += delta_ms;
        if ai.timer_ms > ai.change_interval_ms {
            ai.timer_ms = 0.0;
            ai.direction = rng.range(0.0, 360.0);
            ai.change_interval_ms = random_interval(rng);
        }
        let wander = direction_from_degrees(ai.direction);

        // Turret tracks the player every tick, whatever the wander heading
        self.angle = heading_between(self.pos, player.pos);
        self.move_by(wander, arena, walls, others);

        if distance(self.pos, player.pos) < AI_FIRE_RANGE && rng.chance(AI_FIRE_CHANCE) {
            return self.shoot(now_ms, None, config);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::random::ScriptedRandom;
    use crate::sim::wall::WallKind;
    use proptest::prelude::*;

    fn config() -> GameConfig {
        GameConfig::default()
    }

    fn player_at(x: f32, y: f32) -> Tank {
        Tank::player(1, Vec2::new(x, y), &config())
    }

    fn enemy_at(id: u32, x: f32, y: f32, rng: &mut impl RandomSource) -> Tank {
        Tank::enemy(id, Vec2::new(x, y), 60.0, &config(), rng)
    }

    #[test]
    fn test_move_free() {
        let arena = Arena::default();
        let mut tank = player_at(400.0, 300.0);
        assert!(tank.move_by(Vec2::new(1.0, 0.0), &arena, &[], []));
        assert_eq!(tank.pos, Vec2::new(403.0, 300.0));
    }

    #[test]
    fn test_move_zero_keeps_position() {
        let arena = Arena::default();
        let mut tank = player_at(400.0, 300.0);
        tank.move_by(Vec2::ZERO, &arena, &[], []);
        assert_eq!(tank.pos, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_move_rejected_at_boundary() {
        let arena = Arena::default();
        // One step lands the hull exactly on the left edge
        let mut tank = player_at(23.0, 300.0);
        assert!(!tank.move_by(Vec2::new(-1.0, 0.0), &arena, &[], []));
        assert_eq!(tank.pos, Vec2::new(23.0, 300.0));

        let mut tank = player_at(400.0, 578.0);
        assert!(!tank.move_by(Vec2::new(0.0, 1.0), &arena, &[], []));
        assert_eq!(tank.pos.y, 578.0);
    }

    #[test]
    fn test_move_blocked_by_wall_without_sliding() {
        let arena = Arena::default();
        let wall = Wall::new(9, Vec2::new(421.0, 260.0), 40.0, WallKind::Steel);
        let mut tank = player_at(400.0, 300.0);
        // Diagonal: the x component would collide, so nothing moves
        let dir = Vec2::new(1.0, 1.0).normalize();
        assert!(!tank.move_by(dir, &arena, std::slice::from_ref(&wall), []));
        assert_eq!(tank.pos, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_move_ignores_destroyed_wall() {
        let arena = Arena::default();
        let mut wall = Wall::new(9, Vec2::new(421.0, 280.0), 40.0, WallKind::Brick);
        wall.take_damage(100.0);
        let mut tank = player_at(400.0, 300.0);
        assert!(tank.move_by(Vec2::new(1.0, 0.0), &arena, &[wall], []));
    }

    #[test]
    fn test_move_blocked_by_other_tank() {
        let arena = Arena::default();
        let mut rng = ScriptedRandom::constant(0.5);
        let other = enemy_at(2, 441.0, 300.0, &mut rng);
        let mut tank = player_at(400.0, 300.0);
        assert!(!tank.move_by(Vec2::new(1.0, 0.0), &arena, &[], [&other]));
        assert_eq!(tank.pos.x, 400.0);

        // Moving away is fine
        assert!(tank.move_by(Vec2::new(-1.0, 0.0), &arena, &[], [&other]));
    }

    #[test]
    fn test_move_skips_self() {
        let arena = Arena::default();
        let mut tank = player_at(400.0, 300.0);
        let copy = tank.clone();
        assert!(tank.move_by(Vec2::new(1.0, 0.0), &arena, &[], [&copy]));
    }

    #[test]
    fn test_shoot_cooldown() {
        let config = config();
        let mut tank = player_at(400.0, 300.0);
        assert!(tank.shoot(0.0, None, &config).is_some());
        assert!(tank.shoot(499.0, None, &config).is_none());
        assert!(tank.shoot(500.0, None, &config).is_some());
    }

    #[test]
    fn test_shoot_muzzle_and_owner() {
        let config = config();
        let mut tank = player_at(400.0, 300.0);
        tank.angle = 0.0;
        let bullet = tank.shoot(0.0, Some(90.0), &config).expect("off cooldown");
        assert!(bullet.is_player);
        assert_eq!(bullet.angle, 90.0);
        assert!((bullet.pos.x - 400.0).abs() < 1e-3);
        assert!((bullet.pos.y - 330.0).abs() < 1e-3);
        // Facing is unchanged by an override
        assert_eq!(tank.angle, 0.0);
    }

    #[test]
    fn test_take_damage_clamps() {
        let mut tank = player_at(400.0, 300.0);
        assert!(!tank.take_damage(20.0));
        assert_eq!(tank.hp, 80.0);
        assert!(tank.take_damage(500.0));
        assert_eq!(tank.hp, 0.0);
        assert!(!tank.is_alive());
    }

    #[test]
    fn test_hp_ratio() {
        let mut rng = ScriptedRandom::constant(0.5);
        let mut enemy = enemy_at(2, 400.0, 300.0, &mut rng);
        assert_eq!(enemy.hp_ratio(), 1.0);
        enemy.take_damage(45.0);
        assert_eq!(enemy.hp_ratio(), 0.25);
        enemy.take_damage(100.0);
        assert_eq!(enemy.hp_ratio(), 0.0);
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut tank = player_at(400.0, 300.0);
        tank.take_damage(10.0);
        tank.heal(30.0);
        assert_eq!(tank.hp, 100.0);
    }

    #[test]
    fn test_ai_noop_for_player() {
        let config = config();
        let arena = config.arena;
        let mut rng = ScriptedRandom::constant(0.0);
        let target = player_at(100.0, 100.0);
        let mut tank = player_at(400.0, 300.0);
        let shot = tank.update_ai(&target, &arena, &[], [], 16.0, 0.0, &config, &mut rng);
        assert!(shot.is_none());
        assert_eq!(tank.pos, Vec2::new(400.0, 300.0));
        assert_eq!(tank.angle, 0.0);
    }

    #[test]
    fn test_ai_faces_player_and_wanders() {
        let config = config();
        let arena = config.arena;
        // Spawn draws 0.0: wander east, 1000ms interval. Tick draws 0.5: no shot
        let mut rng = ScriptedRandom::constant(0.0);
        let mut enemy = enemy_at(2, 200.0, 300.0, &mut rng);
        let player = player_at(200.0, 500.0);

        let mut rng = ScriptedRandom::constant(0.5);
        let shot = enemy.update_ai(&player, &arena, &[], [], 16.0, 0.0, &config, &mut rng);
        assert!(shot.is_none());
        assert!((enemy.angle - 90.0).abs() < 1e-4, "turret faces the player below");
        assert_eq!(enemy.pos, Vec2::new(203.0, 300.0), "hull wanders east");
    }

    #[test]
    fn test_ai_changes_direction_after_interval() {
        let config = config();
        let arena = config.arena;
        let mut rng = ScriptedRandom::constant(0.0);
        let mut enemy = enemy_at(2, 400.0, 300.0, &mut rng);
        let player = player_at(100.0, 100.0);
        assert_eq!(enemy.ai.as_ref().map(|a| a.change_interval_ms), Some(1000.0));

        // 0.25 -> 90 degrees, 0.25 -> 1500ms, then fire roll 0.25 misses
        let mut rng = ScriptedRandom::constant(0.25);
        enemy.update_ai(&player, &arena, &[], [], 1001.0, 1001.0, &config, &mut rng);
        let ai = enemy.ai.as_ref().expect("enemy has ai");
        assert_eq!(ai.timer_ms, 0.0);
        assert_eq!(ai.direction, 90.0);
        assert_eq!(ai.change_interval_ms, 1500.0);
        assert!((enemy.pos.y - 303.0).abs() < 1e-4);
    }

    #[test]
    fn test_ai_fires_in_range_on_lucky_roll() {
        let config = config();
        let arena = config.arena;
        let mut rng = ScriptedRandom::constant(0.0);
        let mut enemy = enemy_at(2, 400.0, 300.0, &mut rng);
        let player = player_at(400.0, 500.0);

        let mut rng = ScriptedRandom::constant(0.01);
        let shot = enemy
            .update_ai(&player, &arena, &[], [], 16.0, 0.0, &config, &mut rng)
            .expect("roll below fire chance");
        assert!(!shot.is_player);
        assert!((shot.angle - 90.0).abs() < 1e-4);

        // Still on cooldown next tick
        let again = enemy.update_ai(&player, &arena, &[], [], 16.0, 16.0, &config, &mut rng);
        assert!(again.is_none());
    }

    #[test]
    fn test_ai_holds_fire_out_of_range() {
        let config = config();
        let arena = config.arena;
        let mut rng = ScriptedRandom::constant(0.0);
        let mut enemy = enemy_at(2, 50.0, 50.0, &mut rng);
        let player = player_at(700.0, 550.0);

        let mut rng = ScriptedRandom::constant(0.0);
        let shot = enemy.update_ai(&player, &arena, &[], [], 16.0, 0.0, &config, &mut rng);
        assert!(shot.is_none());
    }

    proptest! {
        #[test]
        fn hp_stays_in_bounds(hits in prop::collection::vec(0.0f32..200.0, 0..40)) {
            let mut tank = player_at(400.0, 300.0);
            for amount in hits {
                let dead = tank.take_damage(amount);
                prop_assert!(tank.hp >= 0.0 && tank.hp <= tank.max_hp);
                prop_assert_eq!(dead, tank.hp == 0.0);
            }
        }

        #[test]
        fn move_never_leaves_arena(
            x in 25.0f32..775.0,
            y in 25.0f32..575.0,
            dirs in prop::collection::vec((-1.0f32..1.0, -1.0f32..1.0), 1..200),
        ) {
            let arena = Arena::default();
            let mut tank = player_at(x, y);
            for (dx, dy) in dirs {
                let dir = Vec2::new(dx, dy).normalize_or_zero();
                tank.move_by(dir, &arena, &[], []);
                prop_assert!(tank.pos.x - tank.radius() >= 0.0);
                prop_assert!(tank.pos.x + tank.radius() <= arena.width);
                prop_assert!(tank.pos.y - tank.radius() >= 0.0);
                prop_assert!(tank.pos.y + tank.radius() <= arena.height);
            }
        }
    }
}
