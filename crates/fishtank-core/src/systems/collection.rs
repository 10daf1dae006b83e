//! Collection system - manual and automatic capture, selling, and transfers
//! between storage and the tank.
//!
//! Every fish handle lives in exactly one of the pool, the player's storage,
//! or the player's tank. The functions here relocate handles and keep each
//! fish's [`Location`] component in step with the list that owns it.

use fishtank_logic::area::Area;
use fishtank_logic::economy::{self, COLLECT_REWARD};
use hecs::{Entity, World};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::components::*;
use crate::config::GameConfig;
use crate::error::GameError;
use crate::generation::spawn_pool;

/// The active free-swimming pool and the area that populated it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FishPool {
    pub area: Area,
    #[serde(skip)]
    pub members: Vec<Entity>,
}

impl FishPool {
    pub fn new(area: Area) -> Self {
        Self {
            area,
            members: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.members.contains(&entity)
    }

    fn remove(&mut self, entity: Entity) -> bool {
        match self.members.iter().position(|&e| e == entity) {
            Some(idx) => {
                self.members.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Clear and refill with `config.pool_size` fish from `area`.
    pub fn refill(
        &mut self,
        world: &mut World,
        config: &GameConfig,
        area: Area,
        size_multiplier: f64,
        rng: &mut impl Rng,
    ) {
        self.members = spawn_pool(
            world,
            config,
            &self.members,
            area,
            config.pool_size,
            size_multiplier as f32,
            rng,
        );
        self.area = area;
    }
}

/// Who triggered a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectSource {
    /// The player tapped the fish
    Manual,
    /// The Auto-Collector upgrade fired
    Auto,
}

/// What happened to a collected fish
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectOutcome {
    /// Rewarded and released
    Released,
    /// Rewarded and moved into storage
    Stored,
    /// Rolled for storage but storage was full; released
    StorageFull,
}

/// Collect `fish` from the pool: grants experience and a coin, logs the
/// catch, and with the luck-scaled chance keeps the fish in storage.
/// Refills the pool when it runs dry.
pub fn collect_fish(
    world: &mut World,
    player: &mut Player,
    pool: &mut FishPool,
    config: &GameConfig,
    fish: Entity,
    source: CollectSource,
    rng: &mut impl Rng,
) -> Result<CollectOutcome, GameError> {
    if !pool.contains(fish) {
        return Err(GameError::InvalidSelection);
    }
    let data = match world.get::<&Fish>(fish) {
        Ok(f) => (*f).clone(),
        Err(_) => {
            pool.remove(fish);
            return Err(GameError::InvalidSelection);
        }
    };

    pool.remove(fish);
    player.add_experience(COLLECT_REWARD);
    player.coins += COLLECT_REWARD;
    match source {
        CollectSource::Manual => player.add_message(format!(
            "Collected a {} fish and earned {} coin!",
            data.pattern, COLLECT_REWARD
        )),
        CollectSource::Auto => player.add_message(format!(
            "Auto-collected a fish and earned {} coin!",
            COLLECT_REWARD
        )),
    }

    let keeps = economy::roll_keeps(rng.gen::<f64>(), player.luck_multiplier);
    let outcome = if keeps && !player.storage_full() {
        if let Ok(mut loc) = world.get::<&mut Location>(fish) {
            *loc = Location::Storage;
        }
        player.stored_fish.push(fish);
        CollectOutcome::Stored
    } else {
        let _ = world.despawn(fish);
        if keeps {
            CollectOutcome::StorageFull
        } else {
            CollectOutcome::Released
        }
    };

    player.collected_fish.push(CatchRecord {
        color: data.color,
        pattern: data.pattern,
        area: pool.area,
        stored: outcome == CollectOutcome::Stored,
    });

    match outcome {
        CollectOutcome::Stored => {
            player.add_message(format!("Stored a {} fish!", data.pattern));
        }
        CollectOutcome::StorageFull => {
            player.add_message("Storage is full!");
        }
        CollectOutcome::Released => {}
    }

    if pool.is_empty() {
        let area = pool.area;
        pool.refill(world, config, area, player.fish_size_multiplier, rng);
    }

    Ok(outcome)
}

/// Collect a uniformly random pool fish. `None` when the pool is empty.
pub fn auto_collect(
    world: &mut World,
    player: &mut Player,
    pool: &mut FishPool,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> Option<CollectOutcome> {
    let fish = *pool.members.choose(rng)?;
    let outcome = collect_fish(world, player, pool, config, fish, CollectSource::Auto, rng).ok()?;
    log::debug!("Auto-collect: {:?}", outcome);
    Some(outcome)
}

/// Sell a stored fish for five times its base value.
pub fn sell_fish(world: &mut World, player: &mut Player, fish: Entity) -> Result<u64, GameError> {
    let Some(idx) = player.stored_fish.iter().position(|&e| e == fish) else {
        player.add_message("That fish is not in storage.");
        return Err(GameError::InvalidSelection);
    };

    let (pattern, value) = match world.get::<&Fish>(fish) {
        Ok(f) => (f.pattern, f.sell_value()),
        Err(_) => {
            player.stored_fish.remove(idx);
            player.add_message("That fish is not in storage.");
            return Err(GameError::InvalidSelection);
        }
    };

    player.stored_fish.remove(idx);
    let _ = world.despawn(fish);
    player.coins += value;
    player.add_message(format!("Sold a {} fish for {} coins!", pattern, value));
    log::debug!("Sold {} fish for {}", pattern, value);
    Ok(value)
}

/// Move a stored fish into the tank. Only allowed while in the Tank.
pub fn move_to_tank(
    world: &mut World,
    player: &mut Player,
    config: &GameConfig,
    area: Area,
    fish: Entity,
    rng: &mut impl Rng,
) -> Result<(), GameError> {
    if !area.is_tank() {
        player.add_message("Visit the Tank to move fish.");
        return Err(GameError::WrongArea { area });
    }
    let Some(idx) = player.stored_fish.iter().position(|&e| e == fish) else {
        return Err(GameError::InvalidSelection);
    };
    if player.tank_fish.len() >= config.tank_capacity {
        player.add_message("The tank is full!");
        return Err(GameError::CapacityExceeded {
            capacity: config.tank_capacity,
        });
    }

    let size = match world.get::<&Fish>(fish) {
        Ok(f) => f.sprite_size(config.base_sprite()),
        Err(_) => {
            player.stored_fish.remove(idx);
            return Err(GameError::InvalidSelection);
        }
    };

    player.stored_fish.remove(idx);
    let position = crate::generation::random_position(config, size, rng);
    let _ = world.insert(fish, (Location::Tank, position));
    player.tank_fish.push(fish);

    let pattern = world.get::<&Fish>(fish).map(|f| f.pattern).ok();
    if let Some(pattern) = pattern {
        player.add_message(format!("Moved {} fish to tank", pattern));
    }
    Ok(())
}

/// Move a tank fish back into storage. Only allowed while in the Tank; a
/// full storage leaves the fish in the tank.
pub fn move_to_storage(
    world: &mut World,
    player: &mut Player,
    area: Area,
    fish: Entity,
) -> Result<(), GameError> {
    if !area.is_tank() {
        player.add_message("Visit the Tank to move fish.");
        return Err(GameError::WrongArea { area });
    }
    let Some(idx) = player.tank_fish.iter().position(|&e| e == fish) else {
        return Err(GameError::InvalidSelection);
    };
    if player.storage_full() {
        player.add_message("Storage is full!");
        return Err(GameError::CapacityExceeded {
            capacity: player.storage_capacity,
        });
    }

    player.tank_fish.remove(idx);
    if let Ok(mut loc) = world.get::<&mut Location>(fish) {
        *loc = Location::Storage;
    }
    player.stored_fish.push(fish);

    let pattern = world.get::<&Fish>(fish).map(|f| f.pattern).ok();
    if let Some(pattern) = pattern {
        player.add_message(format!("Moved {} fish to storage", pattern));
    }
    Ok(())
}
