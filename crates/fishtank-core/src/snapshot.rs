//! Render snapshot - everything the presentation layer needs to draw a frame.
//!
//! The snapshot is plain owned data. It carries final display strings so a
//! renderer only has to place text and sprites.

use fishtank_logic::area::{self, Area};
use fishtank_logic::pattern::Pattern;
use hecs::{Entity, World};
use serde::Serialize;

use crate::components::*;
use crate::config::GameConfig;
use crate::input::UiMode;
use crate::layout::{self, Rect};
use crate::systems::FishPool;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub area: Area,
    /// Background asset key, the lowercase area name
    pub background: String,
    pub sidebar: SidebarText,
    /// Oldest first
    pub messages: Vec<String>,
    pub storage: StoragePanel,
    pub buttons: Vec<ButtonSprite>,
    /// Fish swimming in the current view
    pub fish: Vec<FishSprite>,
    pub shop: Option<ShopPanel>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SidebarText {
    pub level: String,
    pub experience: String,
    pub area: String,
    pub coins: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoragePanel {
    pub title: String,
    pub slots: Vec<StorageSlot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StorageSlot {
    #[serde(skip)]
    pub entity: Entity,
    pub rect: Rect,
    pub color: Rgb,
    pub pattern: Pattern,
    pub sell_value: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ButtonSprite {
    pub label: &'static str,
    pub rect: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FishSprite {
    #[serde(skip)]
    pub entity: Entity,
    pub position: Position,
    pub size: (f32, f32),
    pub color: Rgb,
    pub pattern: Pattern,
    /// Sprite rotation, 0 = facing up
    pub heading: f32,
    pub cosmetics: Vec<CosmeticSprite>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CosmeticSprite {
    pub cosmetic_id: u32,
    /// Absolute screen position
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShopPanel {
    pub title: String,
    pub rows: Vec<ShopRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShopRow {
    pub rect: Rect,
    pub label: String,
    pub detail: String,
}

/// Build a snapshot of the current frame.
pub fn capture(
    world: &World,
    player: &Player,
    config: &GameConfig,
    current: Area,
    pool: &FishPool,
    ui_mode: UiMode,
) -> RenderSnapshot {
    let sidebar = SidebarText {
        level: format!("Level: {}", player.level()),
        experience: format!(
            "EXP: {}/{}",
            player.experience(),
            player.experience_needed()
        ),
        area: format!("Area: {}", current),
        coins: format!("Coins: {}", player.coins),
    };

    let slots = player
        .stored_fish
        .iter()
        .enumerate()
        .filter_map(|(i, &entity)| {
            let fish = world.get::<&Fish>(entity).ok()?;
            Some(StorageSlot {
                entity,
                rect: layout::storage_slot(config, i),
                color: fish.color,
                pattern: fish.pattern,
                sell_value: fish.sell_value(),
            })
        })
        .collect();

    let visible: &[Entity] = if current.is_tank() {
        &player.tank_fish
    } else {
        &pool.members
    };
    let fish = visible
        .iter()
        .filter_map(|&entity| fish_sprite(world, config, entity))
        .collect();

    RenderSnapshot {
        area: current,
        background: current.name().to_lowercase(),
        sidebar,
        messages: player.messages.iter().map(str::to_string).collect(),
        storage: StoragePanel {
            title: format!(
                "Storage ({}/{})",
                player.stored_fish.len(),
                player.storage_capacity
            ),
            slots,
        },
        buttons: vec![
            ButtonSprite {
                label: "World Map",
                rect: layout::world_map_button(config),
            },
            ButtonSprite {
                label: "Cosmetics",
                rect: layout::cosmetics_button(config),
            },
            ButtonSprite {
                label: "Upgrades",
                rect: layout::upgrades_button(config),
            },
        ],
        fish,
        shop: shop_panel(player, config, ui_mode),
    }
}

fn fish_sprite(world: &World, config: &GameConfig, entity: Entity) -> Option<FishSprite> {
    let fish = world.get::<&Fish>(entity).ok()?;
    let position = *world.get::<&Position>(entity).ok()?;
    let heading = world
        .get::<&Velocity>(entity)
        .map(|v| v.heading_degrees())
        .unwrap_or(0.0);

    let cosmetics = fish
        .cosmetics
        .iter()
        .map(|c| CosmeticSprite {
            cosmetic_id: c.cosmetic_id,
            position: Position::new(position.x + c.offset_x, position.y + c.offset_y),
        })
        .collect();

    Some(FishSprite {
        entity,
        position,
        size: fish.sprite_size(config.base_sprite()),
        color: fish.color,
        pattern: fish.pattern,
        heading,
        cosmetics,
    })
}

fn shop_panel(player: &Player, config: &GameConfig, ui_mode: UiMode) -> Option<ShopPanel> {
    let title = ui_mode.title()?.to_string();
    let rows = match ui_mode {
        UiMode::Normal => return None,
        UiMode::AreaShop => Area::ALL
            .iter()
            .enumerate()
            .map(|(i, &a)| ShopRow {
                rect: layout::area_row(config, i),
                label: a.name().to_string(),
                detail: if player.is_unlocked(a) {
                    "Unlocked".to_string()
                } else {
                    format!("Cost: {} coins", area::unlock_cost(i))
                },
            })
            .collect(),
        UiMode::UpgradeShop => player
            .upgrades
            .values()
            .enumerate()
            .map(|(i, up)| ShopRow {
                rect: layout::shop_row(config, i),
                label: format!("{} (Level {}/{})", up.kind, up.level, up.max_level),
                detail: format!("Cost: {} coins", up.debit()),
            })
            .collect(),
        UiMode::CosmeticsShop => config
            .cosmetics
            .iter()
            .enumerate()
            .map(|(i, c)| ShopRow {
                rect: layout::shop_row(config, i),
                label: c.name.clone(),
                detail: format!("Cost: {} coins", c.cost),
            })
            .collect(),
    };
    Some(ShopPanel { title, rows })
}
