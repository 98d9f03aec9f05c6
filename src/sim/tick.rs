//! Simulation tick
//!
//! Advances the world one frame. Step order is fixed:
//! player, enemy AI, bullets and impacts, particles, wave check.

use glam::Vec2;

use super::collision::{circle_collision, distance, rect_collision};
use super::particle::Particle;
use super::random::RandomSource;
use super::state::{GameEvent, GamePhase, World};
use crate::consts::*;
use crate::heading_between;

/// Input intent for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Summed direction keys, e.g. up = (0, -1); normalized before use
    pub movement: Vec2,
    /// Pointer position the turret should face
    pub aim_point: Option<Vec2>,
    /// Virtual stick offset. While present it overrides pointer aim, and
    /// past the dead zone it also replaces `movement` and sets the facing.
    pub joystick: Option<Vec2>,
    /// Fire once along the facing
    pub fire: bool,
    /// Pause toggle
    pub toggle_pause: bool,
    /// Start over from level 1
    pub restart: bool,
}

/// Advance the world by one frame of `delta_ms` milliseconds
pub fn tick<R: RandomSource>(world: &mut World<R>, input: &TickInput, delta_ms: f64) {
    if input.restart {
        world.restart();
    }
    if input.toggle_pause {
        world.toggle_pause();
    }

    // Frozen frames stay visible, nothing moves
    if !world.is_running() {
        return;
    }

    world.clock_ms += delta_ms;

    steer_player(world, input);
    if input.fire {
        let now = world.clock_ms;
        if let Some(bullet) = world.player.shoot(now, None, &world.config) {
            world.add_bullet(bullet);
        }
    }

    run_enemy_ai(world, delta_ms);
    resolve_bullets(world);

    for particle in &mut world.particles {
        particle.update();
    }
    world.particles.retain(|p| !p.is_dead());

    // A dead player does not advance to the next wave
    if world.enemies.is_empty() && world.phase == GamePhase::Running {
        level_complete(world);
    }
}

fn steer_player<R: RandomSource>(world: &mut World<R>, input: &TickInput) {
    let mut dir = input.movement;

    if let Some(stick) = input.joystick {
        if stick.length() > JOYSTICK_DEAD_ZONE {
            dir = stick.normalize();
            world.player.angle = heading_between(Vec2::ZERO, stick);
        }
    }

    if dir != Vec2::ZERO {
        let dir = dir.normalize();
        world
            .player
            .move_by(dir, &world.config.arena, &world.walls, world.enemies.iter());
    }

    if input.joystick.is_none() {
        if let Some(aim) = input.aim_point {
            world.player.angle = heading_between(world.player.pos, aim);
        }
    }
}

fn run_enemy_ai<R: RandomSource>(world: &mut World<R>, delta_ms: f64) {
    let now = world.clock_ms;
    for i in 0..world.enemies.len() {
        let (before, rest) = world.enemies.split_at_mut(i);
        let Some((enemy, after)) = rest.split_first_mut() else {
            break;
        };
        let shot = enemy.update_ai(
            &world.player,
            &world.config.arena,
            &world.walls,
            before.iter().chain(after.iter()),
            delta_ms,
            now,
            &world.config,
            &mut world.rng,
        );
        if let Some(bullet) = shot {
            world.add_bullet(bullet);
        }
    }
}

/// Move every bullet and resolve what it hits. Bullets are taken out of the
/// world for the pass, so explosions can reshape enemies and walls freely.
fn resolve_bullets<R: RandomSource>(world: &mut World<R>) {
    let mut bullets = std::mem::take(&mut world.bullets);

    for bullet in &mut bullets {
        bullet.update(&world.config.arena);

        let hit_box = bullet.hit_box();
        let hit_wall = world
            .walls
            .iter()
            .any(|w| !w.is_destroyed() && rect_collision(hit_box, w.rect()));
        if hit_wall {
            bullet.active = false;
            // Only player shells explode
            if bullet.is_player {
                create_explosion(world, bullet.pos);
            }
        }

        if !bullet.active {
            continue;
        }

        if bullet.is_player {
            let hit_enemy = world.enemies.iter().any(|e| {
                e.is_alive() && circle_collision(bullet.pos, e.pos, bullet.size, e.radius())
            });
            if hit_enemy {
                bullet.active = false;
                create_explosion(world, bullet.pos);
            }
        } else if circle_collision(
            bullet.pos,
            world.player.pos,
            bullet.size,
            world.player.radius(),
        ) {
            bullet.active = false;
            world.damage_player(DIRECT_HIT_DAMAGE);
        }
    }

    bullets.retain(|b| b.active);
    // Anything added to the world mid-pass goes after the survivors
    bullets.append(&mut world.bullets);
    world.bullets = bullets;
}

/// Burst of particles plus splash damage to everything within the blast
/// radius, measured center to center with no occlusion. Killed enemies and
/// broken walls leave the world before this returns.
pub fn create_explosion<R: RandomSource>(world: &mut World<R>, at: Vec2) {
    for _ in 0..world.config.particle_count {
        let particle = Particle::spawn(at, &mut world.rng);
        world.particles.push(particle);
    }

    let radius = world.config.explosion_radius;
    let damage = world.config.explosion_damage;
    log::debug!("Explosion at ({:.0}, {:.0})", at.x, at.y);

    if distance(at, world.player.pos) < radius {
        world.damage_player(damage);
    }

    let mut killed = Vec::new();
    for enemy in world.enemies.iter_mut().filter(|e| e.is_alive()) {
        if distance(at, enemy.pos) < radius && enemy.take_damage(damage) {
            killed.push(enemy.id);
        }
    }

    let mut broken = Vec::new();
    for wall in world.walls.iter_mut().filter(|w| !w.is_destroyed()) {
        if distance(at, wall.center()) < radius && wall.take_damage(damage) {
            broken.push(wall.id);
        }
    }

    for id in broken {
        world.emit(GameEvent::WallDestroyed { id });
    }
    if !killed.is_empty() {
        log::debug!("Explosion destroyed {} enemies", killed.len());
        let bonus = killed.len() as u64 * KILL_SCORE;
        for id in killed {
            world.emit(GameEvent::EnemyDestroyed { id });
        }
        world.add_score(bonus);
    }

    world.enemies.retain(|e| e.is_alive());
    world.walls.retain(|w| !w.is_destroyed());
}

/// Wave cleared: bonus, heal, next wave. Bullets and particles carry over.
fn level_complete<R: RandomSource>(world: &mut World<R>) {
    let cleared = world.level;
    world.level += 1;
    log::info!("Level {cleared} cleared");
    world.emit(GameEvent::WaveCleared { level: cleared });
    world.add_score(WAVE_CLEAR_SCORE);
    world.heal_player(WAVE_CLEAR_HEAL);
    world.generate_level();
}
