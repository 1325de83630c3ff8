//! Weighted catalogs built from a configuration snapshot

use windfall_core::{DefId, WeightedTable};
use windfall_script::{ContentConfig, EventCategory};

/// Airdrop types weighted by their `chance`
pub fn airdrop_catalog(config: &ContentConfig) -> WeightedTable<DefId> {
    config
        .airdrop
        .types
        .iter()
        .map(|(key, def)| (key.clone(), def.chance))
        .collect()
}

/// Events in any of `categories`, weighted by their `weight`
pub fn event_catalog(config: &ContentConfig, categories: &[EventCategory]) -> WeightedTable<DefId> {
    config
        .events_in(categories)
        .map(|(key, def)| (key.clone(), def.weight))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use windfall_core::GameRng;
    use windfall_script::{AirdropTypeDef, EventDef};

    #[test]
    fn test_airdrop_catalog_uses_chance() {
        let config = ContentConfig::default();
        let table = airdrop_catalog(&config);
        assert_eq!(table.len(), 4);
        assert_eq!(table.total(), 40 + 20 + 10 + 5);
    }

    #[test]
    fn test_zero_chance_type_is_never_chosen() {
        let mut config = ContentConfig::empty();
        config.airdrop.types.insert(DefId::new("never"), AirdropTypeDef::new(0));
        config.airdrop.types.insert(DefId::new("always"), AirdropTypeDef::new(3));

        let table = airdrop_catalog(&config);
        let mut rng = GameRng::new(9);
        for _ in 0..500 {
            assert_eq!(table.select(&mut rng).map(DefId::as_str), Some("always"));
        }
    }

    #[test]
    fn test_event_catalog_filters_categories() {
        let mut config = ContentConfig::default();
        config.events.insert(
            DefId::new("calm_winds"),
            EventDef::new("Calm Winds", EventCategory::Neutral, 120),
        );

        let good_bad = event_catalog(&config, &[EventCategory::Good, EventCategory::Bad]);
        let keys: Vec<_> = good_bad.keys().map(DefId::as_str).collect();
        assert_eq!(keys, vec!["festival_of_strength", "suns_wrath", "draining_aura"]);

        let neutral = event_catalog(&config, &[EventCategory::Neutral]);
        assert_eq!(neutral.len(), 1);
    }

    #[test]
    fn test_empty_category_selects_nothing() {
        let config = ContentConfig::default();
        let neutral = event_catalog(&config, &[EventCategory::Neutral]);
        assert!(neutral.select(&mut GameRng::new(1)).is_none());
    }
}
