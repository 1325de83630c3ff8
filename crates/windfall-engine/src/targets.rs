//! Resolving which participants an event applies to

use indexmap::IndexSet;
use windfall_core::{Membership, ParticipantId, World};

/// Snapshot of the participants an event targets
///
/// `None` targets everyone online. A group targets the online members whose
/// current group equals it exactly; an unknown group simply yields nobody.
/// The set is taken once at activation and never re-evaluated.
pub fn resolve_targets<W, M>(world: &W, membership: &M, group: Option<&str>) -> IndexSet<ParticipantId>
where
    W: World + ?Sized,
    M: Membership + ?Sized,
{
    let online = world.online_participants().into_iter();
    match group {
        None => online.collect(),
        Some(group) => online
            .filter(|p| membership.group_of(*p).as_deref() == Some(group))
            .collect(),
    }
}
