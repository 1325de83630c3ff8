//! Windfall Engine - Scheduled weighted-selection content
//!
//! Two subsystems share one tick-driven scheduler:
//! - **Airdrops**: a weighted-random loot container dropped at a random valid
//!   column inside a configured region, announced publicly with a teleport
//!   notice for staff.
//! - **Events**: weighted-random timed status effects per group plus one
//!   global event, with an optional sustained-damage sub-schedule.
//!
//! The engine talks to the host only through the collaborator traits in
//! `windfall-core` and reads an immutable `ContentConfig` snapshot.

mod airdrop;
pub mod assembler;
mod channels;
mod engine;
mod error;
mod events;
pub mod location;
pub mod memory;
pub mod runner;
pub mod selector;
pub mod targets;

pub use airdrop::AirdropReport;
pub use assembler::{Assembly, SkipReason, Skipped};
pub use channels::{ChannelRegistry, ChatChannel};
pub use engine::{ContentEngine, DamageTick, EngineState, EngineTask, TickResult};
pub use error::{Error, Result};
pub use events::{ActivationId, ActiveEvent, EventReport};
pub use runner::{DamageRunner, DamageStep};
