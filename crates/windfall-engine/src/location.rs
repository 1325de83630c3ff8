//! Bounded random search for a landing column

use tracing::{debug, warn};
use windfall_core::{BlockPos, GameRng, World};
use windfall_script::RegionBounds;

/// Columns probed before giving up
pub const MAX_ATTEMPTS: usize = 10;

/// Why no landing column was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFailure {
    /// The region's world is not loaded; no column was probed
    UnknownWorld,
    /// Every probed column was invalid
    Exhausted { attempts: usize },
}

impl SearchFailure {
    /// Columns probed before failing
    pub fn attempts(&self) -> usize {
        match self {
            SearchFailure::UnknownWorld => 0,
            SearchFailure::Exhausted { attempts } => *attempts,
        }
    }
}

/// Pick a random column in `region` whose surface passes the world's predicate
///
/// Returns the position one block above the surface. Columns the world has
/// no surface for count as failed attempts.
pub fn find_drop_location<W: World + ?Sized>(
    world: &W,
    region: &RegionBounds,
    rng: &mut GameRng,
) -> Result<BlockPos, SearchFailure> {
    if !world.has_world(&region.world) {
        warn!(world = %region.world, "airdrop world is not loaded");
        return Err(SearchFailure::UnknownWorld);
    }

    for attempt in 1..=MAX_ATTEMPTS {
        let x = rng.range_i64(region.min_x() as i64, region.max_x() as i64) as i32;
        let z = rng.range_i64(region.min_z() as i64, region.max_z() as i64) as i32;

        match world.surface_at(&region.world, x, z) {
            Some(surface) if world.is_valid_surface(&surface) => {
                return Ok(BlockPos::new(x, surface.y, z).above());
            }
            Some(surface) => debug!(attempt, x, z, liquid = surface.liquid, "rejected column"),
            None => debug!(attempt, x, z, "no surface"),
        }
    }

    Err(SearchFailure::Exhausted {
        attempts: MAX_ATTEMPTS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryWorld;
    use windfall_core::Surface;

    #[test]
    fn test_single_valid_column() {
        let world = MemoryWorld::new("world").with_surface(3, -2, Surface::solid(64));
        let region = RegionBounds::new("world", 3, -2, 3, -2);

        let pos = find_drop_location(&world, &region, &mut GameRng::new(5)).unwrap();
        assert_eq!(pos, BlockPos::new(3, 65, -2));
        assert_eq!(world.surface_queries(), 1);
    }

    #[test]
    fn test_gives_up_after_max_attempts() {
        let world = MemoryWorld::new("world").with_default_surface(Surface::liquid(62));
        let region = RegionBounds::new("world", -50, -50, 50, 50);

        assert_eq!(
            find_drop_location(&world, &region, &mut GameRng::new(5)),
            Err(SearchFailure::Exhausted { attempts: MAX_ATTEMPTS })
        );
        assert_eq!(world.surface_queries(), MAX_ATTEMPTS);
    }

    #[test]
    fn test_missing_surfaces_count_as_attempts() {
        let world = MemoryWorld::new("world");
        let region = RegionBounds::new("world", -5, -5, 5, 5);

        let result = find_drop_location(&world, &region, &mut GameRng::new(8));
        assert_eq!(result, Err(SearchFailure::Exhausted { attempts: 10 }));
        assert_eq!(world.surface_queries(), 10);
    }

    #[test]
    fn test_unknown_world_makes_no_queries() {
        let world = MemoryWorld::new("world").with_default_surface(Surface::solid(70));
        let region = RegionBounds::new("nether", 0, 0, 10, 10);

        let failure = find_drop_location(&world, &region, &mut GameRng::new(5)).unwrap_err();
        assert_eq!(failure, SearchFailure::UnknownWorld);
        assert_eq!(failure.attempts(), 0);
        assert_eq!(world.surface_queries(), 0);
    }

    #[test]
    fn test_result_stays_in_region() {
        let world = MemoryWorld::new("world").with_default_surface(Surface::solid(70));
        let region = RegionBounds::new("world", 20, 10, -20, -10);
        let mut rng = GameRng::new(77);

        for _ in 0..100 {
            let pos = find_drop_location(&world, &region, &mut rng).unwrap();
            assert!(region.contains(pos.x, pos.z));
            assert_eq!(pos.y, 71);
        }
    }
}
