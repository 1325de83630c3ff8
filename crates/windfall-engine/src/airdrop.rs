//! Airdrop firing: select, locate, assemble, place, announce

use crate::assembler::{assemble_loot, Skipped};
use crate::engine::{log_cycle_failure, ContentEngine};
use crate::error::{Error, Result};
use crate::location::find_drop_location;
use crate::selector::airdrop_catalog;
use std::sync::Arc;
use tracing::info;
use windfall_core::{BlockPos, DefId, ItemStack, Membership, Notice, VisualCue, World};

/// What one airdrop produced
#[derive(Debug, Clone, PartialEq)]
pub struct AirdropReport {
    pub airdrop_type: DefId,
    pub world: String,
    /// Where the container was placed (one above the surface)
    pub position: BlockPos,
    pub items: Vec<ItemStack>,
    pub skipped: Vec<Skipped>,
    /// Privileged participants sent a teleport notice
    pub notified: usize,
    /// Line to echo back to whoever asked for the drop
    pub confirmation: String,
}

impl<W: World, M: Membership> ContentEngine<W, M> {
    /// Spawn one airdrop
    ///
    /// With `None` the type is drawn from the weighted catalog; with a key
    /// that type is used directly. Unknown keys fail without touching the
    /// world.
    ///
    /// Failures are logged before being returned, whether the drop was
    /// scheduled or asked for by hand.
    pub fn spawn_content(&mut self, type_key: Option<&str>) -> Result<AirdropReport> {
        self.ensure_running()?;
        self.try_spawn(type_key).map_err(|err| {
            log_cycle_failure("airdrop", &err);
            err
        })
    }

    fn try_spawn(&mut self, type_key: Option<&str>) -> Result<AirdropReport> {
        let config = Arc::clone(&self.config);

        let key = match type_key {
            Some(key) => DefId::new(key),
            None => airdrop_catalog(&config)
                .select(&mut self.rng)
                .cloned()
                .ok_or_else(|| Error::ConfigurationGap("no airdrop types with a positive chance".into()))?,
        };
        let def = config
            .airdrop_type(key.as_str())
            .ok_or_else(|| Error::not_found("Airdrop type", key.as_str()))?;

        let region = &config.airdrop.region;
        let position = find_drop_location(&self.world, region, &mut self.rng).map_err(|failure| {
            Error::LocationUnavailable {
                world: region.world.clone(),
                attempts: failure.attempts(),
            }
        })?;

        let loot = assemble_loot(&self.world, def, &mut self.rng);
        self.world.place_container(&region.world, position, &loot.items);
        self.world
            .spawn_visual_cue(&region.world, position, &VisualCue::default());

        let label = key.as_str().to_uppercase();
        let messages = &config.messages;
        self.world.broadcast(&messages.format(
            "airdrop.announcement",
            &[&label, &position.x, &position.z],
        ));

        let notice = Notice::plain(messages.format("airdrop.teleport_click", &[]))
            .on_click(format!("/teleport {} {} {}", position.x, position.y, position.z))
            .with_hover(messages.format("airdrop.teleport_hover", &[]));
        let staff = self.world.privileged_participants();
        for participant in &staff {
            self.world.whisper(*participant, &notice);
        }

        info!(
            airdrop_type = %key,
            world = %region.world,
            %position,
            items = loot.items.len(),
            skipped = loot.skipped.len(),
            "airdrop spawned"
        );

        Ok(AirdropReport {
            confirmation: messages.format("airdrop.spawned", &[&label]),
            airdrop_type: key,
            world: region.world.clone(),
            position,
            items: loot.items,
            skipped: loot.skipped,
            notified: staff.len(),
        })
    }
}
