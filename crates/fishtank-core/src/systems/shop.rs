//! Shop system - upgrade purchases, cosmetics, and area unlocks
//!
//! All three shops debit coins from the player and leave the state
//! untouched on refusal. Refusals push a player-visible message and return
//! the matching [`GameError`].

use fishtank_logic::area::{self, Area};
use fishtank_logic::upgrades::{
    self, PurchaseRefusal, UpgradeKind, AUTO_COLLECT_FLOOR_MS, BREEDING_FLOOR_MS,
    COST_GROWTH_RANGE, INTERVAL_SHRINK_RANGE, LUCK_STEP, SIZE_STEP, STORAGE_STEP,
};
use hecs::{Entity, World};
use rand::Rng;

use crate::components::*;
use crate::config::GameConfig;
use crate::error::GameError;

/// Buy one level of `kind`. Returns the coins debited.
pub fn purchase_upgrade(
    player: &mut Player,
    kind: UpgradeKind,
    rng: &mut impl Rng,
) -> Result<u64, GameError> {
    let growth = rng.gen_range(COST_GROWTH_RANGE.0..=COST_GROWTH_RANGE.1);
    let coins = player.coins;

    let result = match player.upgrades.get_mut(&kind) {
        Some(upgrade) => upgrade.purchase(coins, growth).map(|debit| (debit, upgrade.level)),
        None => Err(PurchaseRefusal::MaxLevel),
    };

    let (debit, level) = match result {
        Ok(ok) => ok,
        Err(refusal) => {
            player.add_message("Cannot purchase upgrade.");
            return Err(match refusal {
                PurchaseRefusal::MaxLevel => GameError::MaxLevel,
                PurchaseRefusal::InsufficientFunds { cost, available } => {
                    GameError::InsufficientFunds {
                        needed: cost.ceil() as u64,
                        available,
                    }
                }
            });
        }
    };

    player.coins -= debit;
    player.add_message(format!("Purchased {} Upgrade Level {}!", kind.name(), level));
    apply_effect(player, kind, rng);
    log::info!("Purchased {} level {} for {} coins", kind, level, debit);
    Ok(debit)
}

/// Apply the fixed per-level effect of `kind`.
fn apply_effect(player: &mut Player, kind: UpgradeKind, rng: &mut impl Rng) {
    match kind {
        UpgradeKind::AutoCollector => {
            let factor = sample_shrink(rng);
            player.auto_collect_interval = upgrades::shrink_interval(
                player.auto_collect_interval,
                factor,
                AUTO_COLLECT_FLOOR_MS,
            );
        }
        UpgradeKind::BiggerFish => player.fish_size_multiplier += SIZE_STEP,
        UpgradeKind::IncreasedStorage => player.storage_capacity += STORAGE_STEP,
        UpgradeKind::IncreasedBreeding => {
            let factor = sample_shrink(rng);
            player.breeding_interval =
                upgrades::shrink_interval(player.breeding_interval, factor, BREEDING_FLOOR_MS);
        }
        UpgradeKind::Luck => player.luck_multiplier += LUCK_STEP,
    }
}

fn sample_shrink(rng: &mut impl Rng) -> f64 {
    rng.gen_range(INTERVAL_SHRINK_RANGE.0..=INTERVAL_SHRINK_RANGE.1)
}

/// Buy catalog cosmetic `id` into the inventory.
pub fn buy_cosmetic(player: &mut Player, config: &GameConfig, id: u32) -> Result<(), GameError> {
    let Some(spec) = config.cosmetic(id) else {
        return Err(GameError::InvalidSelection);
    };
    if player.coins < spec.cost {
        player.add_message("Not enough coins!");
        return Err(GameError::InsufficientFunds {
            needed: spec.cost,
            available: player.coins,
        });
    }

    player.coins -= spec.cost;
    player.cosmetics_inventory.push(spec.item());
    player.add_message(format!("Purchased {}!", spec.name));
    Ok(())
}

/// Attach the oldest inventory cosmetic to a tank fish.
pub fn apply_cosmetic(
    world: &mut World,
    player: &mut Player,
    config: &GameConfig,
    fish: Entity,
) -> Result<(), GameError> {
    if player.cosmetics_inventory.is_empty() {
        player.add_message("You have no cosmetics!");
        return Err(GameError::NothingToApply);
    }
    if !player.tank_fish.contains(&fish) {
        return Err(GameError::InvalidSelection);
    }
    let item = &player.cosmetics_inventory[0];
    let Some(spec) = config.cosmetic(item.id) else {
        // Catalog entry gone; discard the orphaned item.
        player.cosmetics_inventory.remove(0);
        return Err(GameError::InvalidSelection);
    };

    {
        let Ok(mut target) = world.get::<&mut Fish>(fish) else {
            return Err(GameError::InvalidSelection);
        };
        target.cosmetics.push(spec.applied());
    }

    let item = player.cosmetics_inventory.remove(0);
    player.add_message(format!("Applied {} to a fish!", item.name));
    Ok(())
}

/// Buy access to a locked spawning area. Does not travel there.
pub fn unlock_area(player: &mut Player, target: Area) -> Result<u64, GameError> {
    if player.is_unlocked(target) {
        return Ok(0);
    }
    let cost = area::unlock_cost(target.index());
    if player.coins < cost {
        player.add_message("Not enough coins!");
        return Err(GameError::InsufficientFunds {
            needed: cost,
            available: player.coins,
        });
    }

    player.coins -= cost;
    player.unlocked_areas.insert(target);
    player.add_message(format!("Unlocked {}!", target));
    log::info!("Unlocked {} for {} coins", target, cost);
    Ok(cost)
}
