//! Windfall Core - Building blocks for the scheduled content engine
//!
//! This crate provides the host-facing primitives the engine is built on:
//! - Participant and definition identifiers
//! - Tick clock and a cancellable task scheduler
//! - Deterministic RNG and cumulative-weight selection tables
//! - Concrete content types (item stacks, status effects, visual cues)
//! - Collaborator traits for the world, id registries and group membership
//!
//! Nothing here knows about airdrops or events; see `windfall-engine`.

mod content;
mod error;
mod identity;
mod rng;
pub mod scheduler;
pub mod time;
mod weighted;
mod world;

pub use content::{BlockPos, Color, ItemStack, Notice, StatusEffect, Surface, VisualCue};
pub use error::{Error, Result};
pub use identity::{DefId, ParticipantId};
pub use rng::GameRng;
pub use scheduler::{Due, Scheduler, TaskHandle};
pub use time::{seconds_to_ticks, Clock, Tick, TICKS_PER_SECOND};
pub use weighted::WeightedTable;
pub use world::{Membership, Registry, World};
