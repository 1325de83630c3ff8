//! Engine lifecycle: start, reload, restart and shutdown.

use windfall_core::{ParticipantId, Surface, TICKS_PER_SECOND};
use windfall_engine::memory::{MemoryMembership, MemoryWorld};
use windfall_engine::{ChatChannel, ContentEngine, EngineState, Error};
use windfall_script::{from_str, AirdropTypeDef, ContentConfig, LootEntry};

type Engine = ContentEngine<MemoryWorld, MemoryMembership>;

fn start(config: ContentConfig) -> Engine {
    let mut world = MemoryWorld::new("world").with_default_surface(Surface::solid(64));
    world.join(ParticipantId::new(1));
    ContentEngine::start(config, world, MemoryMembership::new(), 7).unwrap()
}

fn with_intervals(airdrop: u64, event: u64) -> ContentConfig {
    let mut config = ContentConfig::default();
    config.airdrop.interval = airdrop;
    config.event.interval = event;
    config
}

#[test]
fn reload_keeps_period_restart_applies_it() {
    let mut engine = start(with_intervals(1, 1));
    assert_eq!(engine.airdrop_period(), Some(TICKS_PER_SECOND));

    engine.reload(with_intervals(2, 5)).unwrap();
    assert_eq!(engine.config().airdrop.interval, 2);
    assert_eq!(engine.airdrop_period(), Some(TICKS_PER_SECOND));
    assert_eq!(engine.event_period(), Some(TICKS_PER_SECOND));

    engine.restart().unwrap();
    assert_eq!(engine.airdrop_period(), Some(2 * TICKS_PER_SECOND));
    assert_eq!(engine.event_period(), Some(5 * TICKS_PER_SECOND));
}

#[test]
fn reload_swaps_catalog_for_next_cycle() {
    let mut engine = start(with_intervals(1, 3600));

    let mut replacement = with_intervals(1, 3600);
    replacement.airdrop.types.clear();
    replacement.airdrop.types.insert(
        "supply".into(),
        AirdropTypeDef::new(1).with_item("BREAD", LootEntry::new(8, 8, 100)),
    );
    engine.reload(replacement).unwrap();

    let drops = engine.advance(TICKS_PER_SECOND).unwrap().remove(0).airdrops;
    assert_eq!(drops[0].airdrop_type.as_str(), "supply");
    assert_eq!(drops[0].items[0].amount, 8);
}

#[test]
fn invalid_reload_keeps_current_snapshot() {
    let mut engine = start(with_intervals(1, 1));
    let mut broken = ContentConfig::default();
    broken.sustained_damage.interval = 0;

    assert!(matches!(engine.reload(broken), Err(Error::Script(_))));
    assert_eq!(engine.config().sustained_damage.interval, 30);
}

#[test]
fn shutdown_leaves_no_tasks() {
    let mut engine = start(ContentConfig::default());
    engine.trigger_event(None, "suns_wrath").unwrap();
    engine
        .channels_mut()
        .select(ParticipantId::new(1), ChatChannel::Civilisation);
    assert_eq!(engine.scheduled_tasks(), 3);

    engine.shutdown();
    assert_eq!(engine.state(), EngineState::Stopped);
    assert_eq!(engine.scheduled_tasks(), 0);
    assert_eq!(engine.active_events().count(), 0);
    assert_eq!(engine.channels().channel_of(ParticipantId::new(1)), ChatChannel::Global);
    assert_eq!(engine.next_airdrop(), None);
    assert!(matches!(engine.tick(), Err(Error::EngineStopped)));
}

#[test]
fn restart_after_shutdown_runs_again() {
    let mut engine = start(with_intervals(1, 3600));
    engine.shutdown();
    engine.restart().unwrap();

    let results = engine.advance(TICKS_PER_SECOND).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].airdrops.len(), 1);
}

#[test]
fn engine_runs_from_ron_document() {
    let config = from_str(
        r#"(
            airdrop: (
                interval: 1,
                region: (world: "world", x1: -3, z1: -3, x2: 3, z2: 3),
                types: {
                    "crate": (chance: 1, items: {
                        "IRON_INGOT": (amount_min: 4, amount_max: 4),
                        "BOW": (enchants: ["POWER: 2", "broken"]),
                    }),
                },
            ),
        )"#,
    )
    .unwrap();
    let mut engine = start(config);

    let report = engine.advance(TICKS_PER_SECOND).unwrap().remove(0).airdrops.remove(0);
    assert_eq!(report.items.len(), 2);
    assert_eq!(report.items[1].enchantments.get("POWER"), Some(&2));
    assert_eq!(report.skipped.len(), 1);
    assert!((-3..=3).contains(&report.position.x));

    let (world, _) = engine.into_parts();
    assert_eq!(world.containers().len(), 1);
}
