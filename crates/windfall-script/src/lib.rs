//! Windfall Script - RON configuration loader and catalog schema
//!
//! Loads the content engine's configuration from RON:
//! - Airdrop timer, landing region and weighted airdrop types with loot tables
//! - Event timer and event definitions with status effects
//! - Sustained-damage settings
//! - Message templates with `&` colour codes

mod config;
mod error;
mod loader;
pub mod messages;
mod schema;

pub use config::ContentConfig;
pub use error::{Error, Result};
pub use loader::{from_str, Loader};
pub use messages::{colorize, strip_colors, MessageTable};
pub use schema::{
    AirdropConfig, AirdropTypeDef, EventCategory, EventDef, EventSchedule, LootEntry,
    RegionBounds, SpecialEffect, SustainedDamageConfig,
};
