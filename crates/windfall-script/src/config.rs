//! Immutable configuration snapshot
//!
//! The engine holds a `ContentConfig` behind an `Arc` and hands it to every
//! scheduling cycle. Reloading builds a new snapshot; nothing mutates one in
//! place.

use crate::error::{Error, Result};
use crate::messages::MessageTable;
use crate::schema::{
    AirdropConfig, AirdropTypeDef, EventCategory, EventDef, EventSchedule, LootEntry,
    SpecialEffect, SustainedDamageConfig,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use windfall_core::DefId;

/// Everything the content engine reads from configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    #[serde(default)]
    pub airdrop: AirdropConfig,
    /// Event timer settings
    #[serde(default)]
    pub event: EventSchedule,
    /// Event definitions by key, in declaration order
    #[serde(default)]
    pub events: IndexMap<DefId, EventDef>,
    #[serde(default)]
    pub sustained_damage: SustainedDamageConfig,
    /// Overrides on top of the built-in templates
    #[serde(default = "MessageTable::with_defaults")]
    pub messages: MessageTable,
}

impl ContentConfig {
    /// A configuration with no catalogs and default timers
    pub fn empty() -> Self {
        Self {
            airdrop: AirdropConfig::default(),
            event: EventSchedule::default(),
            events: IndexMap::new(),
            sustained_damage: SustainedDamageConfig::default(),
            messages: MessageTable::with_defaults(),
        }
    }

    /// Look up an airdrop type
    pub fn airdrop_type(&self, key: &str) -> Option<&AirdropTypeDef> {
        self.airdrop.types.get(key)
    }

    /// Look up an event definition
    pub fn event_def(&self, key: &str) -> Option<&EventDef> {
        self.events.get(key)
    }

    /// Events whose category is one of `categories`, in declaration order
    pub fn events_in<'a>(
        &'a self,
        categories: &'a [EventCategory],
    ) -> impl Iterator<Item = (&'a DefId, &'a EventDef)> + 'a {
        self.events
            .iter()
            .filter(move |(_, def)| categories.contains(&def.category))
    }

    /// Check the invariants the engine relies on
    pub fn validate(&self) -> Result<()> {
        if self.airdrop.interval == 0 {
            return Err(Error::InvalidSchema("airdrop.interval must be at least 1".into()));
        }
        if self.event.interval == 0 {
            return Err(Error::InvalidSchema("event.interval must be at least 1".into()));
        }
        if self.sustained_damage.interval == 0 {
            return Err(Error::InvalidSchema(
                "sustained_damage.interval must be at least 1".into(),
            ));
        }
        if self.airdrop.region.world.is_empty() {
            return Err(Error::MissingField("airdrop.region.world".into()));
        }

        for (key, def) in &self.airdrop.types {
            for (material, entry) in &def.items {
                if entry.amount_min > entry.amount_max {
                    return Err(Error::InvalidSchema(format!(
                        "airdrop.types.{}.items.{}: amount_min {} exceeds amount_max {}",
                        key, material, entry.amount_min, entry.amount_max
                    )));
                }
                if entry.chance_of_inclusion > 100 {
                    return Err(Error::InvalidSchema(format!(
                        "airdrop.types.{}.items.{}: chance_of_inclusion {} exceeds 100",
                        key, material, entry.chance_of_inclusion
                    )));
                }
            }
        }

        for (key, def) in &self.events {
            if let Some((effect, _)) = def.effects.iter().find(|(_, level)| **level == 0) {
                return Err(Error::InvalidSchema(format!(
                    "events.{}.effects.{}: level must be at least 1",
                    key, effect
                )));
            }
        }

        Ok(())
    }
}

impl Default for ContentConfig {
    /// Example catalogs written out on first run
    fn default() -> Self {
        let mut config = Self::empty();

        for (key, chance) in [("common", 40), ("rare", 20), ("legendary", 10), ("mystic", 5)] {
            config.airdrop.types.insert(DefId::new(key), example_airdrop(chance));
        }

        config.events.insert(
            DefId::new("festival_of_strength"),
            EventDef::new("Festival of Strength", EventCategory::Good, 600)
                .with_effect("STRENGTH", 1)
                .with_effect("SPEED", 1),
        );
        config.events.insert(
            DefId::new("suns_wrath"),
            EventDef::new("Sun's Wrath", EventCategory::Bad, 300)
                .with_special(SpecialEffect::SustainedDamage),
        );
        config.events.insert(
            DefId::new("draining_aura"),
            EventDef::new("Draining Aura", EventCategory::Bad, 600)
                .with_effect("MINING_FATIGUE", 1),
        );

        config
    }
}

fn example_airdrop(chance: u32) -> AirdropTypeDef {
    AirdropTypeDef::new(chance)
        .with_item("DIAMOND", LootEntry::new(16, 32, 40))
        .with_item("NETHERITE_SCRAP", LootEntry::new(1, 5, 20))
        .with_item("GOLDEN_APPLE", LootEntry::new(2, 5, 50))
}
