//! Event definition schema

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Whether an event helps, hurts, or is global flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventCategory {
    Good,
    Bad,
    Neutral,
}

/// Behaviour beyond plain status effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpecialEffect {
    #[default]
    None,
    /// Periodic damage to participants under open sky
    #[serde(alias = "SUNS_WRATH")]
    SustainedDamage,
}

/// Event subsystem timer settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSchedule {
    /// Seconds between bulk event firings
    #[serde(default = "crate::schema::airdrop::default_interval")]
    pub interval: u64,
}

impl Default for EventSchedule {
    fn default() -> Self {
        Self { interval: 7200 }
    }
}

/// Definition of a timed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDef {
    /// Display name (falls back to the key when empty)
    #[serde(default)]
    pub name: String,
    #[serde(alias = "type")]
    pub category: EventCategory,
    /// Seconds the status effects last
    #[serde(default = "default_duration")]
    pub duration: u64,
    /// Status effect id to level (level 1 = amplifier 0)
    #[serde(default)]
    pub effects: IndexMap<String, u32>,
    #[serde(default)]
    pub special_effect: SpecialEffect,
    /// Selection weight within its category
    #[serde(default = "default_weight")]
    pub weight: u32,
}

fn default_duration() -> u64 {
    300
}

fn default_weight() -> u32 {
    1
}

impl EventDef {
    /// Create an event with no effects
    pub fn new(name: impl Into<String>, category: EventCategory, duration: u64) -> Self {
        Self {
            name: name.into(),
            category,
            duration,
            effects: IndexMap::new(),
            special_effect: SpecialEffect::None,
            weight: default_weight(),
        }
    }

    /// Add a status effect at the given level
    pub fn with_effect(mut self, effect: impl Into<String>, level: u32) -> Self {
        self.effects.insert(effect.into(), level);
        self
    }

    /// Set the special effect
    pub fn with_special(mut self, special: SpecialEffect) -> Self {
        self.special_effect = special;
        self
    }

    /// Name shown to players
    pub fn display_name<'a>(&'a self, key: &'a str) -> &'a str {
        if self.name.is_empty() {
            key
        } else {
            &self.name
        }
    }
}

/// Sustained-damage sub-schedule settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SustainedDamageConfig {
    /// Seconds between damage evaluations
    #[serde(default = "default_damage_interval")]
    pub interval: u64,
    /// Damage dealt per evaluation
    #[serde(default = "default_damage")]
    pub damage: f64,
}

fn default_damage_interval() -> u64 {
    30
}

fn default_damage() -> f64 {
    1.0
}

impl Default for SustainedDamageConfig {
    fn default() -> Self {
        Self {
            interval: default_damage_interval(),
            damage: default_damage(),
        }
    }
}
