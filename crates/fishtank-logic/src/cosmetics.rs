//! Cosmetic catalog and applied overlays.
//!
//! Cosmetics are bought into an inventory, then applied to tank fish in
//! first-in first-out order. An applied cosmetic is a catalog id plus the
//! render offset (relative to the fish sprite's top-left) the presentation
//! layer draws it at.

use serde::{Deserialize, Serialize};

/// One purchasable cosmetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CosmeticSpec {
    pub id: u32,
    pub name: String,
    pub cost: u64,
    /// Draw offset relative to the fish sprite.
    pub offset: (f32, f32),
}

/// A purchased, not yet applied cosmetic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CosmeticItem {
    pub id: u32,
    pub name: String,
}

/// A cosmetic attached to a fish.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AppliedCosmetic {
    pub cosmetic_id: u32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl CosmeticSpec {
    pub fn item(&self) -> CosmeticItem {
        CosmeticItem {
            id: self.id,
            name: self.name.clone(),
        }
    }

    pub fn applied(&self) -> AppliedCosmetic {
        AppliedCosmetic {
            cosmetic_id: self.id,
            offset_x: self.offset.0,
            offset_y: self.offset.1,
        }
    }
}

/// The default catalog: a single hat, centred above a 60×30 fish.
pub fn default_catalog() -> Vec<CosmeticSpec> {
    vec![CosmeticSpec {
        id: 0,
        name: "Hat".to_string(),
        cost: 30,
        offset: (15.0, -30.0),
    }]
}

/// Look up a catalog entry by id.
pub fn find<'a>(catalog: &'a [CosmeticSpec], id: u32) -> Option<&'a CosmeticSpec> {
    catalog.iter().find(|c| c.id == id)
}
