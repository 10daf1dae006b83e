//! Fish spawning for the free-swimming pool and the tank

use fishtank_logic::area::Area;
use fishtank_logic::pattern::Pattern;
use hecs::{Entity, World};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::components::*;
use crate::config::GameConfig;

/// Maximum speed along each axis, in pixels per tick
pub const MAX_SPEED: f32 = 3.0;

/// Sample a velocity with independent components in `[-3, 3]`.
/// A fish is never left static.
pub fn random_velocity(rng: &mut impl Rng) -> Velocity {
    let mut velocity = Velocity::new(
        rng.gen_range(-MAX_SPEED..=MAX_SPEED),
        rng.gen_range(-MAX_SPEED..=MAX_SPEED),
    );
    if velocity.is_static() {
        velocity.dx = 1.0;
    }
    velocity
}

/// Random top-left position that keeps a sprite of `size` inside the play area.
pub fn random_position(config: &GameConfig, size: (f32, f32), rng: &mut impl Rng) -> Position {
    let bounds = config.play_area();
    let max_x = (bounds.right - size.0).max(bounds.left);
    let max_y = (bounds.bottom - size.1).max(bounds.top);
    Position::new(
        rng.gen_range(bounds.left..=max_x),
        rng.gen_range(bounds.top..=max_y),
    )
}

/// Spawn a single fish entity at a random position with a random velocity.
pub fn spawn_fish(
    world: &mut World,
    config: &GameConfig,
    fish: Fish,
    location: Location,
    rng: &mut impl Rng,
) -> Entity {
    let size = fish.sprite_size(config.base_sprite());
    let position = random_position(config, size, rng);
    let velocity = random_velocity(rng);
    world.spawn((fish, position, velocity, location))
}

/// Generate a random fish for `area` using the configured palette and the
/// area's pattern table.
pub fn random_fish(
    config: &GameConfig,
    area: Area,
    size_multiplier: f32,
    rng: &mut impl Rng,
) -> Fish {
    let color = config.palette.choose(rng).copied().unwrap_or(Rgb::GRAY);
    let pattern = config
        .areas
        .patterns_for(area)
        .choose(rng)
        .copied()
        .unwrap_or(Pattern::Plain);
    Fish::new(color, pattern, size_multiplier)
}

/// Despawn every pool fish in `members` and refill with `count` new fish
/// drawn from `area`. Returns the new handles.
pub fn spawn_pool(
    world: &mut World,
    config: &GameConfig,
    members: &[Entity],
    area: Area,
    count: usize,
    size_multiplier: f32,
    rng: &mut impl Rng,
) -> Vec<Entity> {
    for &entity in members {
        let _ = world.despawn(entity);
    }

    let mut spawned = Vec::with_capacity(count);
    for _ in 0..count {
        let fish = random_fish(config, area, size_multiplier, rng);
        spawned.push(spawn_fish(world, config, fish, Location::Pool, rng));
    }

    log::debug!("Spawned {} fish for {}", spawned.len(), area);
    spawned
}
