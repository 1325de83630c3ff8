//! Turning catalog definitions into concrete content
//!
//! A bad entry never fails the whole assembly: it is logged, recorded as a
//! [`Skipped`] and the rest of the definition is still used.

use std::fmt;
use tracing::{debug, warn};
use windfall_core::{seconds_to_ticks, GameRng, ItemStack, Registry, StatusEffect};
use windfall_script::{colorize, AirdropTypeDef, EventDef, LootEntry};

/// Why part of a definition was left out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    UnknownMaterial,
    UnknownEffect,
    /// Effect level below 1
    InvalidLevel(u32),
    /// Enchant string not of the form `ID: LEVEL`
    MalformedEnchantment(String),
    UnknownEnchantment(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UnknownMaterial => write!(f, "unknown material"),
            SkipReason::UnknownEffect => write!(f, "unknown status effect"),
            SkipReason::InvalidLevel(level) => write!(f, "invalid level {}", level),
            SkipReason::MalformedEnchantment(raw) => write!(f, "malformed enchantment '{}'", raw),
            SkipReason::UnknownEnchantment(id) => write!(f, "unknown enchantment '{}'", id),
        }
    }
}

/// A left-out entry or attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    /// Catalog key of the entry (material or effect id)
    pub entry: String,
    pub reason: SkipReason,
}

/// Result of assembling one definition
#[derive(Debug, Clone, PartialEq)]
pub struct Assembly<T> {
    pub items: Vec<T>,
    pub skipped: Vec<Skipped>,
}

impl<T> Assembly<T> {
    fn new() -> Self {
        Self {
            items: Vec::new(),
            skipped: Vec::new(),
        }
    }

    fn skip(&mut self, entry: &str, reason: SkipReason) {
        warn!(entry, %reason, "skipping catalog entry");
        self.skipped.push(Skipped {
            entry: entry.to_string(),
            reason,
        });
    }
}

/// Parse an `"ID: LEVEL"` enchantment string
///
/// The id is trimmed and upper-cased; the level must be a positive integer.
pub fn parse_enchantment(raw: &str) -> Option<(String, u32)> {
    let mut parts = raw.split(':');
    let (id, level) = match (parts.next(), parts.next(), parts.next()) {
        (Some(id), Some(level), None) => (id.trim(), level.trim()),
        _ => return None,
    };
    if id.is_empty() {
        return None;
    }
    match level.parse::<u32>() {
        Ok(level) if level > 0 => Some((id.to_ascii_uppercase(), level)),
        _ => None,
    }
}

/// Roll every loot entry of an airdrop type in declaration order
pub fn assemble_loot<R: Registry + ?Sized>(
    registry: &R,
    def: &AirdropTypeDef,
    rng: &mut GameRng,
) -> Assembly<ItemStack> {
    let mut assembly = Assembly::new();

    for (material_key, entry) in &def.items {
        if !rng.percent(entry.chance_of_inclusion) {
            continue;
        }
        let Some(material) = registry.material(material_key) else {
            assembly.skip(material_key, SkipReason::UnknownMaterial);
            continue;
        };

        let amount = rng.range_u32(entry.amount_min, entry.amount_max);
        if amount == 0 {
            debug!(material = %material, "rolled an empty stack");
            continue;
        }

        let mut stack = ItemStack::new(material, amount);
        decorate(registry, material_key, entry, &mut stack, &mut assembly);
        assembly.items.push(stack);
    }

    assembly
}

fn decorate<R: Registry + ?Sized>(
    registry: &R,
    material_key: &str,
    entry: &LootEntry,
    stack: &mut ItemStack,
    assembly: &mut Assembly<ItemStack>,
) {
    stack.display_name = entry.name.as_deref().map(colorize);
    stack.lore = entry.lore.iter().map(|line| colorize(line)).collect();

    for raw in &entry.enchants {
        let Some((id, level)) = parse_enchantment(raw) else {
            assembly.skip(material_key, SkipReason::MalformedEnchantment(raw.clone()));
            continue;
        };
        match registry.enchantment(&id) {
            Some(enchantment) => {
                stack.enchantments.insert(enchantment, level);
            }
            None => assembly.skip(material_key, SkipReason::UnknownEnchantment(id)),
        }
    }
}

/// Resolve an event's status effects
///
/// Every effect lasts the event's duration; amplifier is `level - 1`.
pub fn assemble_effects<R: Registry + ?Sized>(registry: &R, def: &EventDef) -> Assembly<StatusEffect> {
    let mut assembly = Assembly::new();
    let duration_ticks = seconds_to_ticks(def.duration);

    for (effect_key, &level) in &def.effects {
        if level == 0 {
            assembly.skip(effect_key, SkipReason::InvalidLevel(level));
            continue;
        }
        let Some(kind) = registry.status_effect(&effect_key.to_ascii_uppercase()) else {
            assembly.skip(effect_key, SkipReason::UnknownEffect);
            continue;
        };
        assembly.items.push(StatusEffect {
            kind,
            duration_ticks,
            amplifier: level - 1,
        });
    }

    assembly
}
