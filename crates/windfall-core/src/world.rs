//! Collaborator traits implemented by the host environment
//!
//! The engine never talks to a concrete server. Everything it needs from the
//! world, from the id registries and from group membership goes through these
//! traits, so tests and the headless demo can supply in-memory doubles.

use crate::{BlockPos, DefId, ItemStack, Notice, ParticipantId, StatusEffect, Surface, VisualCue};

/// Resolves configuration identifiers to canonical ids known by the host
///
/// Each lookup returns `None` for unknown identifiers; callers skip the entry.
pub trait Registry {
    /// Resolve a material name (e.g. `"DIAMOND"`)
    fn material(&self, id: &str) -> Option<DefId>;

    /// Resolve an enchantment name (e.g. `"SHARPNESS"`)
    fn enchantment(&self, id: &str) -> Option<DefId>;

    /// Resolve a status effect name (e.g. `"STRENGTH"`)
    fn status_effect(&self, id: &str) -> Option<DefId>;
}

/// Live world and actor environment
pub trait World: Registry {
    /// Whether a world with this id is loaded
    fn has_world(&self, world: &str) -> bool;

    /// Highest occupied cell of the column at `(x, z)`
    fn surface_at(&self, world: &str, x: i32, z: i32) -> Option<Surface>;

    /// Column-validity predicate used for placing containers
    fn is_valid_surface(&self, surface: &Surface) -> bool {
        surface.solid && !surface.liquid
    }

    /// Turn the block at `pos` into a container holding `items`
    fn place_container(&mut self, world: &str, pos: BlockPos, items: &[ItemStack]);

    /// Spawn a purely visual marker at `pos`
    fn spawn_visual_cue(&mut self, world: &str, pos: BlockPos, cue: &VisualCue);

    /// Everyone currently connected
    fn online_participants(&self) -> Vec<ParticipantId>;

    /// Connected participants allowed to receive staff notifications
    fn privileged_participants(&self) -> Vec<ParticipantId>;

    /// Send a message to every connected participant
    fn broadcast(&mut self, message: &str);

    /// Send a message to one participant
    fn whisper(&mut self, to: ParticipantId, notice: &Notice);

    /// Apply a status effect; `false` if the participant is unreachable
    fn apply_status_effect(&mut self, to: ParticipantId, effect: &StatusEffect) -> bool;

    /// Whether the participant stands with open sky above them
    ///
    /// `None` if the participant can no longer be reached.
    fn is_under_open_sky(&self, who: ParticipantId) -> Option<bool>;

    /// Deal damage; `false` if the participant is unreachable
    fn damage(&mut self, who: ParticipantId, amount: f64) -> bool;
}

/// Classifies participants into named groups
pub trait Membership {
    /// Every group known to the host, in a stable order
    fn groups(&self) -> Vec<String>;

    /// The group a participant currently belongs to
    fn group_of(&self, participant: ParticipantId) -> Option<String>;
}
