//! Breeding system - tank fish produce offspring on a timer
//!
//! Two distinct tank fish are picked as parents. The child takes each of
//! colour and pattern from a coin-flip between the parents, and deep-copies
//! one parent's cosmetic list. Breeding stops at the configured tank cap.

use hecs::{Entity, World};
use rand::seq::index::sample;
use rand::Rng;

use crate::components::*;
use crate::config::GameConfig;
use crate::generation::spawn_fish;

/// Result of one breeding attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreedOutcome {
    /// A child was born
    Born(Entity),
    /// Fewer than two fish in the tank
    TooFew,
    /// Tank already at capacity
    TankFull,
}

/// Combine two parents into a child. The child's size follows the player's
/// current size multiplier, not the parents'.
pub fn make_child(a: &Fish, b: &Fish, size_multiplier: f32, rng: &mut impl Rng) -> Fish {
    let color = if rng.gen_bool(0.5) { a.color } else { b.color };
    let pattern = if rng.gen_bool(0.5) { a.pattern } else { b.pattern };
    let cosmetics = if rng.gen_bool(0.5) {
        a.cosmetics.clone()
    } else {
        b.cosmetics.clone()
    };
    Fish::new(color, pattern, size_multiplier).with_cosmetics(cosmetics)
}

/// Attempt one breeding in the tank.
pub fn breed(
    world: &mut World,
    player: &mut Player,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> BreedOutcome {
    if player.tank_fish.len() < 2 {
        return BreedOutcome::TooFew;
    }
    if player.tank_fish.len() >= config.tank_capacity {
        player.add_message("The tank is too crowded to breed.");
        return BreedOutcome::TankFull;
    }

    let picks = sample(rng, player.tank_fish.len(), 2);
    let first = player.tank_fish[picks.index(0)];
    let second = player.tank_fish[picks.index(1)];

    let parents = (
        world.get::<&Fish>(first).map(|f| (*f).clone()),
        world.get::<&Fish>(second).map(|f| (*f).clone()),
    );
    let (a, b) = match parents {
        (Ok(a), Ok(b)) => (a, b),
        _ => {
            // Drop handles whose entities vanished.
            player.tank_fish.retain(|&e| world.contains(e));
            return BreedOutcome::TooFew;
        }
    };

    let child = make_child(&a, &b, player.fish_size_multiplier as f32, rng);
    let entity = spawn_fish(world, config, child, Location::Tank, rng);
    player.tank_fish.push(entity);
    player.add_message("A new baby fish was born!");
    log::debug!(
        "Bred {} x {} in tank (population {})",
        a.pattern,
        b.pattern,
        player.tank_fish.len()
    );

    BreedOutcome::Born(entity)
}
