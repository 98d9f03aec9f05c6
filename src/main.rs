//! Tank Arena entry point
//!
//! Runs a headless session with a scripted pilot and prints the final HUD.
//! Usage: `tank-arena [config.json] [seed]`

#[cfg(not(target_arch = "wasm32"))]
use tank_arena::GameConfig;
#[cfg(not(target_arch = "wasm32"))]
use tank_arena::sim::{GamePhase, TickInput, World, tick};

#[cfg(not(target_arch = "wasm32"))]
const FRAME_MS: f64 = 16.0;
/// About five minutes of play at 60 fps
#[cfg(not(target_arch = "wasm32"))]
const SESSION_TICKS: u32 = 18_000;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Tank Arena (native) starting...");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => match GameConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load config {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => GameConfig::default(),
    };
    let seed = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            log::error!("Invalid seed: {}", e);
            std::process::exit(1);
        }
        None => 42,
    };

    let mut world = World::new(config, seed);
    let mut ticks = 0;
    while ticks < SESSION_TICKS && world.phase != GamePhase::GameOver {
        let input = pilot(&world);
        tick(&mut world, &input, FRAME_MS);
        for event in world.drain_events() {
            log::debug!("{:?}", event);
        }
        ticks += 1;
    }
    log::info!(
        "Session ended after {} ticks: score {} at level {}",
        ticks,
        world.score,
        world.level
    );

    match serde_json::to_string_pretty(&world.hud()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize HUD: {}", e),
    }
}

/// Aim at the nearest enemy, fire whenever possible, and drift toward it
/// while keeping some distance.
#[cfg(not(target_arch = "wasm32"))]
fn pilot(world: &World) -> TickInput {
    let me = world.player.pos;
    let target = world
        .enemies
        .iter()
        .map(|e| e.pos)
        .min_by(|a, b| a.distance_squared(me).total_cmp(&b.distance_squared(me)));

    let Some(target) = target else {
        return TickInput::default();
    };

    let offset = target - me;
    let movement = if offset.length() > 250.0 {
        offset.normalize_or_zero()
    } else {
        glam::Vec2::ZERO
    };

    TickInput {
        movement,
        aim_point: Some(target),
        fire: true,
        ..Default::default()
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser shell drives the library directly
}
