//! The content engine: lifecycle, scheduling and dispatch
//!
//! The engine owns a scheduler with two periodic tasks (airdrops and bulk
//! events) plus one sub-schedule per running sustained-damage effect. Each
//! call to [`ContentEngine::tick`] advances the clock by one tick and runs
//! whatever is due, in registration order.

use crate::airdrop::AirdropReport;
use crate::channels::ChannelRegistry;
use crate::error::{Error, Result};
use crate::events::{ActivationId, ActiveEvent, EventReport};
use crate::runner::DamageRunner;
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use windfall_core::{
    seconds_to_ticks, GameRng, Membership, ParticipantId, Scheduler, TaskHandle, Tick, World,
};
use windfall_script::ContentConfig;

/// Work the scheduler can hand back to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineTask {
    Airdrop,
    Events,
    SustainedDamage(ActivationId),
}

/// Whether the engine accepts work
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Running,
    Stopped,
}

/// One sustained-damage evaluation as seen from a tick
#[derive(Debug, Clone, PartialEq)]
pub struct DamageTick {
    pub activation: ActivationId,
    pub damaged: Vec<ParticipantId>,
    /// Evaluations left (`None` when unbounded)
    pub remaining: Option<u64>,
}

/// Everything that happened during one tick
#[derive(Debug, Default)]
pub struct TickResult {
    pub tick: Tick,
    pub airdrops: Vec<AirdropReport>,
    pub events: Vec<EventReport>,
    pub damage: Vec<DamageTick>,
    /// Cycles that produced nothing; already logged
    pub failures: Vec<Error>,
}

impl TickResult {
    fn new(tick: Tick) -> Self {
        Self {
            tick,
            ..Default::default()
        }
    }

    /// True if nothing ran this tick
    pub fn is_idle(&self) -> bool {
        self.airdrops.is_empty()
            && self.events.is_empty()
            && self.damage.is_empty()
            && self.failures.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
struct Timers {
    airdrop: TaskHandle,
    events: TaskHandle,
}

/// Scheduled airdrops and events over a host world
pub struct ContentEngine<W, M> {
    pub(crate) config: Arc<ContentConfig>,
    pub(crate) world: W,
    pub(crate) membership: M,
    pub(crate) rng: GameRng,
    pub(crate) scheduler: Scheduler<EngineTask>,
    pub(crate) runners: IndexMap<ActivationId, DamageRunner>,
    pub(crate) active: IndexMap<ActivationId, ActiveEvent>,
    pub(crate) next_activation: u64,
    channels: ChannelRegistry,
    timers: Option<Timers>,
    state: EngineState,
}

impl<W: World, M: Membership> ContentEngine<W, M> {
    /// Validate `config` and arm both periodic timers
    ///
    /// The first firing of each timer is one full interval after start.
    /// Message templates the configuration leaves out fall back to the
    /// built-in ones.
    pub fn start(mut config: ContentConfig, world: W, membership: M, seed: u64) -> Result<Self> {
        config.messages.fill_defaults();
        config.validate()?;

        let mut engine = Self {
            config: Arc::new(config),
            world,
            membership,
            rng: GameRng::new(seed),
            scheduler: Scheduler::new(),
            runners: IndexMap::new(),
            active: IndexMap::new(),
            next_activation: 1,
            channels: ChannelRegistry::new(),
            timers: None,
            state: EngineState::Running,
        };
        engine.arm_timers()?;

        info!(
            airdrop_interval = engine.config.airdrop.interval,
            event_interval = engine.config.event.interval,
            seed,
            "content engine started"
        );
        Ok(engine)
    }

    fn arm_timers(&mut self) -> Result<()> {
        let airdrop = seconds_to_ticks(self.config.airdrop.interval);
        let events = seconds_to_ticks(self.config.event.interval);
        self.timers = Some(Timers {
            airdrop: self
                .scheduler
                .schedule_repeating(airdrop, airdrop, EngineTask::Airdrop)?,
            events: self
                .scheduler
                .schedule_repeating(events, events, EngineTask::Events)?,
        });
        Ok(())
    }

    pub(crate) fn ensure_running(&self) -> Result<()> {
        match self.state {
            EngineState::Running => Ok(()),
            EngineState::Stopped => Err(Error::EngineStopped),
        }
    }

    /// Advance one tick and run everything due
    pub fn tick(&mut self) -> Result<TickResult> {
        self.ensure_running()?;

        let due = self.scheduler.tick();
        let now = self.scheduler.now();
        let mut result = TickResult::new(now);

        for task in due {
            debug!(handle = %task.handle, task = ?task.payload, tick = now, "dispatching task");
            match task.payload {
                EngineTask::Airdrop => match self.spawn_content(None) {
                    Ok(report) => result.airdrops.push(report),
                    Err(err) => result.failures.push(err),
                },
                EngineTask::Events => {
                    let (reports, failures) = self.fire_events();
                    result.events.extend(reports);
                    result.failures.extend(failures);
                }
                EngineTask::SustainedDamage(activation) => {
                    if let Some(step) = self.step_runner(task.handle, activation) {
                        result.damage.push(step);
                    }
                }
            }
        }

        self.prune_finished(now);
        Ok(result)
    }

    /// Run `ticks` ticks, collecting every non-idle result
    pub fn advance(&mut self, ticks: u64) -> Result<Vec<TickResult>> {
        let mut results = Vec::new();
        for _ in 0..ticks {
            let result = self.tick()?;
            if !result.is_idle() {
                results.push(result);
            }
        }
        Ok(results)
    }

    fn step_runner(&mut self, handle: TaskHandle, activation: ActivationId) -> Option<DamageTick> {
        let Some(runner) = self.runners.get_mut(&activation) else {
            // Runner is gone but its task survived; drop the task.
            let _ = self.scheduler.cancel(handle);
            return None;
        };

        let step = runner.step(&mut self.world);
        debug!(
            %activation,
            damaged = step.damaged.len(),
            remaining = ?step.remaining,
            "sustained damage evaluated"
        );
        if step.finished {
            self.finish_runner(activation);
        }

        Some(DamageTick {
            activation,
            damaged: step.damaged,
            remaining: step.remaining,
        })
    }

    /// Remove a runner and cancel its sub-schedule
    pub(crate) fn finish_runner(&mut self, activation: ActivationId) -> bool {
        let Some(runner) = self.runners.shift_remove(&activation) else {
            return false;
        };
        if let Err(err) = self.scheduler.cancel(runner.handle()) {
            debug!(%activation, %err, "runner task already gone");
        }
        if let Some(active) = self.active.get_mut(&activation) {
            active.runner = None;
        }
        true
    }

    fn prune_finished(&mut self, now: Tick) {
        let before = self.active.len();
        self.active.retain(|_, event| !event.is_finished(now));
        let pruned = before - self.active.len();
        if pruned > 0 {
            debug!(pruned, tick = now, "active events finished");
        }
    }

    /// Swap in a new configuration snapshot
    ///
    /// Catalogs and messages take effect on the next cycle. Timer periods do
    /// not change until [`restart`](Self::restart).
    pub fn reload(&mut self, mut config: ContentConfig) -> Result<()> {
        config.messages.fill_defaults();
        config.validate()?;
        if config.airdrop.interval != self.config.airdrop.interval
            || config.event.interval != self.config.event.interval
        {
            warn!("timer intervals changed; they take effect after a restart");
        }
        self.config = Arc::new(config);
        info!(
            airdrop_types = self.config.airdrop.types.len(),
            events = self.config.events.len(),
            "configuration reloaded"
        );
        Ok(())
    }

    /// Stop everything and re-arm both timers from the current snapshot
    pub fn restart(&mut self) -> Result<()> {
        self.shutdown();
        self.state = EngineState::Running;
        self.arm_timers()?;
        info!(
            airdrop_interval = self.config.airdrop.interval,
            event_interval = self.config.event.interval,
            "content engine restarted"
        );
        Ok(())
    }

    /// Cancel every task and runner and clear transient state
    pub fn shutdown(&mut self) {
        let cancelled = self.scheduler.cancel_all();
        self.runners.clear();
        self.active.clear();
        self.channels.clear();
        self.timers = None;
        self.state = EngineState::Stopped;
        info!(cancelled, "content engine stopped");
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == EngineState::Running
    }

    /// Current tick of the engine clock
    pub fn now(&self) -> Tick {
        self.scheduler.now()
    }

    /// Current configuration snapshot
    pub fn config(&self) -> &Arc<ContentConfig> {
        &self.config
    }

    /// Events whose effects or sustained damage are still running
    pub fn active_events(&self) -> impl Iterator<Item = &ActiveEvent> {
        self.active.values()
    }

    pub fn active_event(&self, activation: ActivationId) -> Option<&ActiveEvent> {
        self.active.get(&activation)
    }

    pub fn runner(&self, activation: ActivationId) -> Option<&DamageRunner> {
        self.runners.get(&activation)
    }

    /// Number of scheduled tasks, timers and sub-schedules included
    pub fn scheduled_tasks(&self) -> usize {
        self.scheduler.len()
    }

    /// Period of the airdrop timer in ticks, if armed
    pub fn airdrop_period(&self) -> Option<Tick> {
        self.timers
            .and_then(|timers| self.scheduler.period(timers.airdrop))
    }

    /// Period of the event timer in ticks, if armed
    pub fn event_period(&self) -> Option<Tick> {
        self.timers
            .and_then(|timers| self.scheduler.period(timers.events))
    }

    /// Tick at which the next airdrop fires, if armed
    pub fn next_airdrop(&self) -> Option<Tick> {
        self.timers
            .and_then(|timers| self.scheduler.next_fire(timers.airdrop))
    }

    /// Tick at which the next bulk event firing happens, if armed
    pub fn next_events(&self) -> Option<Tick> {
        self.timers
            .and_then(|timers| self.scheduler.next_fire(timers.events))
    }

    pub fn channels(&self) -> &ChannelRegistry {
        &self.channels
    }

    pub fn channels_mut(&mut self) -> &mut ChannelRegistry {
        &mut self.channels
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    pub fn membership(&self) -> &M {
        &self.membership
    }

    pub fn membership_mut(&mut self) -> &mut M {
        &mut self.membership
    }

    /// Stop the engine and hand back its collaborators
    pub fn into_parts(mut self) -> (W, M) {
        self.shutdown();
        (self.world, self.membership)
    }
}

pub(crate) fn log_cycle_failure(subsystem: &str, err: &Error) {
    match err {
        Error::LocationUnavailable { .. } => error!(subsystem, %err, "cycle aborted"),
        Error::ConfigurationGap(_) => error!(subsystem, %err, "cycle aborted: empty catalog"),
        _ => warn!(subsystem, %err, "cycle aborted"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryMembership, MemoryWorld};
    use windfall_core::Surface;

    fn engine(config: ContentConfig) -> ContentEngine<MemoryWorld, MemoryMembership> {
        let world = MemoryWorld::new("world").with_default_surface(Surface::solid(64));
        ContentEngine::start(config, world, MemoryMembership::new(), 42).unwrap()
    }

    fn short_config() -> ContentConfig {
        let mut config = ContentConfig::default();
        config.airdrop.interval = 2;
        config.event.interval = 3;
        config
    }

    #[test]
    fn test_first_firing_after_one_interval() {
        let mut engine = engine(short_config());
        assert_eq!(engine.next_airdrop(), Some(40));
        assert_eq!(engine.next_events(), Some(60));

        for _ in 0..39 {
            assert!(engine.tick().unwrap().airdrops.is_empty());
        }
        assert_eq!(engine.tick().unwrap().airdrops.len(), 1);
        assert_eq!(engine.next_airdrop(), Some(80));
    }

    #[test]
    fn test_start_rejects_invalid_config() {
        let mut config = ContentConfig::default();
        config.airdrop.region.world.clear();
        let result = ContentEngine::start(
            config,
            MemoryWorld::new("world"),
            MemoryMembership::new(),
            1,
        );
        assert!(matches!(result, Err(Error::Script(_))));
    }

    #[test]
    fn test_stopped_engine_refuses_work() {
        let mut engine = engine(short_config());
        engine.shutdown();

        assert_eq!(engine.state(), EngineState::Stopped);
        assert!(matches!(engine.tick(), Err(Error::EngineStopped)));
        assert!(matches!(engine.spawn_content(None), Err(Error::EngineStopped)));
        assert!(matches!(
            engine.trigger_event(None, "suns_wrath"),
            Err(Error::EngineStopped)
        ));
    }

    #[test]
    fn test_shutdown_clears_channels() {
        let mut engine = engine(short_config());
        engine
            .channels_mut()
            .select(ParticipantId::new(1), crate::ChatChannel::Staff);
        engine.shutdown();
        assert!(engine.channels().is_empty());
        assert_eq!(engine.scheduled_tasks(), 0);
    }

    #[test]
    fn test_restart_resumes() {
        let mut engine = engine(short_config());
        engine.advance(10).unwrap();
        engine.restart().unwrap();

        assert!(engine.is_running());
        assert_eq!(engine.scheduled_tasks(), 2);
        assert_eq!(engine.next_airdrop(), Some(engine.now() + 40));
    }
}
