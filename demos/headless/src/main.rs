//! Headless Simulation
//!
//! Runs the content engine over an in-memory island for ten simulated
//! minutes: airdrops every minute, events every ninety seconds.
//!
//! Pass a directory of RON files to use your own configuration:
//! `cargo run -p headless -- path/to/config`. Set `RUST_LOG=debug` to see
//! scheduler dispatch.

use std::env;
use std::error::Error;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use windfall_core::{ParticipantId, Surface, TICKS_PER_SECOND};
use windfall_engine::memory::{MemoryMembership, MemoryWorld};
use windfall_engine::{ChatChannel, ContentEngine};
use windfall_script::{strip_colors, EventCategory, EventDef, Loader, RegionBounds};

const SIMULATED_SECONDS: u64 = 600;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Windfall Headless Simulation ===\n");

    let config = match env::args().nth(1) {
        Some(dir) => {
            let mut loader = Loader::new();
            loader.load_directory(&dir)?;
            loader.finish()?
        }
        None => {
            let mut loader = Loader::with_defaults();
            loader.load_str(DEMO_CONFIG)?;
            let mut config = loader.finish()?;
            config.events.insert(
                "calm_winds".into(),
                EventDef::new("Calm Winds", EventCategory::Neutral, 120).with_effect("SPEED", 1),
            );
            config
        }
    };

    let (world, membership) = island(&config.airdrop.region);
    let mut engine = ContentEngine::start(config, world, membership, 1444)?;
    engine
        .channels_mut()
        .select(ParticipantId::new(1), ChatChannel::Staff);

    println!(
        "Airdrops every {}s, events every {}s; simulating {}s\n",
        engine.config().airdrop.interval,
        engine.config().event.interval,
        SIMULATED_SECONDS
    );

    let results = engine.advance(SIMULATED_SECONDS * TICKS_PER_SECOND)?;
    for result in &results {
        let seconds = result.tick / TICKS_PER_SECOND;
        for drop in &result.airdrops {
            println!(
                "[{:>4}s] airdrop {} at {} with {} stacks",
                seconds,
                drop.airdrop_type,
                drop.position,
                drop.items.len()
            );
        }
        for event in &result.events {
            println!(
                "[{:>4}s] event {} for {} ({} participants)",
                seconds,
                event.event,
                event.group.as_deref().unwrap_or("everyone"),
                event.participants.len()
            );
        }
        for damage in &result.damage {
            println!(
                "[{:>4}s] {} burned {} participant(s)",
                seconds,
                damage.activation,
                damage.damaged.len()
            );
        }
        for failure in &result.failures {
            println!("[{:>4}s] cycle failed: {}", seconds, failure);
        }
    }

    // Manual trigger, as a command would
    match engine.spawn_content(Some("mystic")) {
        Ok(report) => println!("\n{}", strip_colors(&report.confirmation)),
        Err(err) => println!("\n{}", strip_colors(&err.user_message(&engine.config().messages))),
    }

    let staff_channel = engine.channels().channel_of(ParticipantId::new(1));
    println!(
        "{}",
        strip_colors(&staff_channel.render(&engine.config().messages, "all quiet on the island"))
    );

    let (world, _) = engine.into_parts();
    println!("\n=== Summary ===");
    println!("Containers placed: {}", world.containers().len());
    println!("Broadcasts sent:   {}", world.broadcasts().len());
    for id in 1..=6 {
        let id = ParticipantId::new(id);
        if let Some(state) = world.participant(id) {
            println!(
                "  {}: health {:.1}, {} effect(s), {} notice(s)",
                id,
                state.health,
                state.effects.len(),
                state.inbox.len()
            );
        }
    }

    info!("simulation finished");
    Ok(())
}

const DEMO_CONFIG: &str = r#"
(
    airdrop: (
        interval: 60,
        region: (world: "island", x1: -40, z1: -40, x2: 40, z2: 40),
    ),
    event: (interval: 90),
    sustained_damage: (interval: 15, damage: 0.5),
)
"#;

/// A small island: dry land in the middle, sea around the edge
fn island(region: &RegionBounds) -> (MemoryWorld, MemoryMembership) {
    let mut world = MemoryWorld::new(region.world.clone()).with_default_surface(Surface::liquid(62));
    for x in -25..=25 {
        for z in -25..=25 {
            world.set_surface(x, z, Surface::solid(64 + (x.abs() + z.abs()) / 10));
        }
    }

    let mut membership = MemoryMembership::new();
    for id in 1..=6 {
        let participant = ParticipantId::new(id);
        let state = world.join(participant);
        state.privileged = id == 1;
        state.under_open_sky = id % 3 != 0;
        membership.assign(participant, if id % 2 == 0 { "Avalon" } else { "Carthage" });
    }

    (world, membership)
}
