//! The Player aggregate - progression, economy, inventory, and timers.
//!
//! Player is an engine-level resource rather than an entity. It owns the
//! ordered handle lists for storage and tank; the fish themselves live in
//! the ECS world.

use std::collections::{BTreeMap, BTreeSet};

use fishtank_logic::area::{self, Area};
use fishtank_logic::cosmetics::CosmeticItem;
use fishtank_logic::messages::MessageLog;
use fishtank_logic::progression::Progression;
use fishtank_logic::upgrades::{Upgrade, UpgradeKind};
use hecs::Entity;
use serde::{Deserialize, Serialize};

use super::CatchRecord;
use crate::config::GameConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub progression: Progression,
    pub coins: u64,
    /// Every fish ever collected, oldest first
    pub collected_fish: Vec<CatchRecord>,
    /// Fish handles in storage, in display order.
    /// Entities are not serializable; persistence rebuilds these.
    #[serde(skip)]
    pub stored_fish: Vec<Entity>,
    /// Fish handles in the tank, in display order
    #[serde(skip)]
    pub tank_fish: Vec<Entity>,
    pub storage_capacity: usize,
    pub unlocked_areas: BTreeSet<Area>,
    pub upgrades: BTreeMap<UpgradeKind, Upgrade>,
    /// Purchased, not yet applied cosmetics (FIFO)
    pub cosmetics_inventory: Vec<CosmeticItem>,
    pub fish_size_multiplier: f64,
    pub luck_multiplier: f64,
    /// Milliseconds between auto-collects
    pub auto_collect_interval: f64,
    /// Milliseconds between tank breedings
    pub breeding_interval: f64,
    pub messages: MessageLog,
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        let upgrades = UpgradeKind::ALL
            .iter()
            .map(|&kind| (kind, Upgrade::new(kind, config.upgrade_cost(kind))))
            .collect();

        let mut unlocked_areas = BTreeSet::new();
        unlocked_areas.insert(Area::STARTING);

        Self {
            progression: Progression::new(),
            coins: 0,
            collected_fish: Vec::new(),
            stored_fish: Vec::new(),
            tank_fish: Vec::new(),
            storage_capacity: config.storage_capacity,
            unlocked_areas,
            upgrades,
            cosmetics_inventory: Vec::new(),
            fish_size_multiplier: 1.0,
            luck_multiplier: 1.0,
            auto_collect_interval: config.auto_collect_interval_ms,
            breeding_interval: config.breeding_interval_ms,
            messages: MessageLog::new(),
        }
    }

    pub fn level(&self) -> u32 {
        self.progression.level
    }

    pub fn experience(&self) -> u64 {
        self.progression.experience
    }

    pub fn experience_needed(&self) -> u64 {
        self.progression.experience_needed
    }

    /// Grant experience, announcing every level reached.
    pub fn add_experience(&mut self, amount: u64) {
        for level in self.progression.add_experience(amount) {
            log::info!("Player reached level {}", level);
            self.add_message(format!("You've reached level {}!", level));
        }
    }

    pub fn add_message(&mut self, message: impl Into<String>) {
        self.messages.push(message);
    }

    pub fn storage_full(&self) -> bool {
        self.stored_fish.len() >= self.storage_capacity
    }

    pub fn upgrade(&self, kind: UpgradeKind) -> Option<&Upgrade> {
        self.upgrades.get(&kind)
    }

    pub fn upgrade_level(&self, kind: UpgradeKind) -> u32 {
        self.upgrade(kind).map(|u| u.level).unwrap_or(0)
    }

    pub fn is_unlocked(&self, area: Area) -> bool {
        area.is_tank() || self.unlocked_areas.contains(&area)
    }

    /// Unlocked areas in registry order, Tank excluded.
    pub fn unlocked_list(&self) -> Vec<Area> {
        let unlocked: Vec<Area> = self.unlocked_areas.iter().copied().collect();
        Area::ALL
            .iter()
            .copied()
            .filter(|a| !a.is_tank() && area::is_unlocked(*a, &unlocked))
            .collect()
    }

    /// Restore invariants after loading: starting area unlocked, every
    /// upgrade kind present.
    pub fn normalize(&mut self, config: &GameConfig) {
        self.unlocked_areas.insert(Area::STARTING);
        for kind in UpgradeKind::ALL {
            self.upgrades
                .entry(kind)
                .or_insert_with(|| Upgrade::new(kind, config.upgrade_cost(kind)));
        }
        self.fish_size_multiplier = self.fish_size_multiplier.max(1.0);
        self.luck_multiplier = self.luck_multiplier.max(1.0);
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}
