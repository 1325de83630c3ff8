//! Airdrop definition schema

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use windfall_core::DefId;

/// Airdrop subsystem settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirdropConfig {
    /// Seconds between scheduled airdrops
    #[serde(default = "default_interval")]
    pub interval: u64,
    /// Where airdrops may land
    #[serde(default)]
    pub region: RegionBounds,
    /// Airdrop types by key, in declaration order
    #[serde(default)]
    pub types: IndexMap<DefId, AirdropTypeDef>,
}

pub(crate) fn default_interval() -> u64 {
    7200
}

impl Default for AirdropConfig {
    fn default() -> Self {
        Self {
            interval: default_interval(),
            region: RegionBounds::default(),
            types: IndexMap::new(),
        }
    }
}

/// Rectangular landing region
///
/// Corners may be given in any order; min/max are taken at lookup time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionBounds {
    #[serde(default = "default_world")]
    pub world: String,
    #[serde(default)]
    pub x1: i32,
    #[serde(default)]
    pub z1: i32,
    #[serde(default)]
    pub x2: i32,
    #[serde(default)]
    pub z2: i32,
}

fn default_world() -> String {
    "world".to_string()
}

impl RegionBounds {
    /// Create a region from two corners
    pub fn new(world: impl Into<String>, x1: i32, z1: i32, x2: i32, z2: i32) -> Self {
        Self {
            world: world.into(),
            x1,
            z1,
            x2,
            z2,
        }
    }

    pub fn min_x(&self) -> i32 {
        self.x1.min(self.x2)
    }

    pub fn max_x(&self) -> i32 {
        self.x1.max(self.x2)
    }

    pub fn min_z(&self) -> i32 {
        self.z1.min(self.z2)
    }

    pub fn max_z(&self) -> i32 {
        self.z1.max(self.z2)
    }

    /// Whether `(x, z)` lies inside the region, edges included
    pub fn contains(&self, x: i32, z: i32) -> bool {
        (self.min_x()..=self.max_x()).contains(&x) && (self.min_z()..=self.max_z()).contains(&z)
    }
}

impl Default for RegionBounds {
    fn default() -> Self {
        Self::new(default_world(), -500, -500, 500, 500)
    }
}

/// Definition of an airdrop type (e.g. common, legendary)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirdropTypeDef {
    /// Selection weight relative to the other types
    #[serde(default = "default_chance", alias = "weight")]
    pub chance: u32,
    /// Loot entries keyed by material id, in declaration order
    #[serde(default)]
    pub items: IndexMap<String, LootEntry>,
}

fn default_chance() -> u32 {
    100
}

impl AirdropTypeDef {
    /// Create an airdrop type with no items
    pub fn new(chance: u32) -> Self {
        Self {
            chance,
            items: IndexMap::new(),
        }
    }

    /// Add a loot entry for a material
    pub fn with_item(mut self, material: impl Into<String>, entry: LootEntry) -> Self {
        self.items.insert(material.into(), entry);
        self
    }
}

/// One possible item in an airdrop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootEntry {
    #[serde(default = "default_amount")]
    pub amount_min: u32,
    #[serde(default = "default_amount")]
    pub amount_max: u32,
    /// Percent chance (0-100) the entry is included at all
    #[serde(default = "default_inclusion")]
    pub chance_of_inclusion: u32,
    /// Display name, `&` colour codes allowed
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub lore: Vec<String>,
    /// Enchantments as `"ID: LEVEL"` strings
    #[serde(default)]
    pub enchants: Vec<String>,
}

fn default_amount() -> u32 {
    1
}

fn default_inclusion() -> u32 {
    100
}

impl LootEntry {
    /// An entry with an amount range and inclusion chance
    pub fn new(amount_min: u32, amount_max: u32, chance_of_inclusion: u32) -> Self {
        Self {
            amount_min,
            amount_max,
            chance_of_inclusion,
            name: None,
            lore: Vec::new(),
            enchants: Vec::new(),
        }
    }

    /// Set the display name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add an `"ID: LEVEL"` enchantment string
    pub fn enchanted(mut self, enchant: impl Into<String>) -> Self {
        self.enchants.push(enchant.into());
        self
    }
}
