//! Schema definitions for RON configuration

pub mod airdrop;
pub mod event;

pub use airdrop::{AirdropConfig, AirdropTypeDef, LootEntry, RegionBounds};
pub use event::{EventCategory, EventDef, EventSchedule, SpecialEffect, SustainedDamageConfig};
