//! Timed events: manual triggers, bulk firing and active-event tracking

use crate::assembler::{assemble_effects, Skipped};
use crate::engine::{log_cycle_failure, ContentEngine, EngineTask};
use crate::error::{Error, Result};
use crate::runner::DamageRunner;
use crate::selector::event_catalog;
use crate::targets::resolve_targets;
use indexmap::IndexSet;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};
use windfall_core::{
    seconds_to_ticks, DefId, Membership, ParticipantId, StatusEffect, TaskHandle, Tick, World,
};
use windfall_script::{EventCategory, EventDef, SpecialEffect};

/// Identifies one triggering of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActivationId(pub u64);

impl fmt::Display for ActivationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "activation:{}", self.0)
    }
}

/// An event that is still having an effect on the world
#[derive(Debug, Clone)]
pub struct ActiveEvent {
    pub id: ActivationId,
    pub event: DefId,
    pub definition: EventDef,
    /// `None` when the event targets everyone
    pub group: Option<String>,
    /// Captured once at trigger time
    pub participants: IndexSet<ParticipantId>,
    pub started_at: Tick,
    /// Tick at which the status effects run out
    pub effects_until: Tick,
    /// Sub-schedule of a running sustained-damage effect
    pub runner: Option<TaskHandle>,
}

impl ActiveEvent {
    /// Effects have expired and no sub-schedule is left
    pub fn is_finished(&self, now: Tick) -> bool {
        now >= self.effects_until && self.runner.is_none()
    }
}

/// What one event trigger did
#[derive(Debug, Clone, PartialEq)]
pub struct EventReport {
    pub activation: ActivationId,
    pub event: DefId,
    pub group: Option<String>,
    pub participants: Vec<ParticipantId>,
    pub effects: Vec<StatusEffect>,
    /// Effect applications the world accepted
    pub applied: usize,
    pub skipped: Vec<Skipped>,
    /// Evaluations scheduled for sustained damage, if any
    pub damage_intervals: Option<u64>,
    pub confirmation: String,
}

impl<W: World, M: Membership> ContentEngine<W, M> {
    /// Trigger `event_key` for one group, or for everyone with `None`
    ///
    /// The announcement is broadcast even when nobody is in the group.
    pub fn trigger_event(&mut self, group: Option<&str>, event_key: &str) -> Result<EventReport> {
        self.ensure_running()?;
        let config = Arc::clone(&self.config);
        let (key, def) = config
            .events
            .get_key_value(event_key)
            .ok_or_else(|| Error::not_found("Event", event_key))?;
        Ok(self.activate(group, key, def))
    }

    /// Bulk firing: one GOOD/BAD event per known group, then one NEUTRAL
    /// event for everyone
    ///
    /// Each draw is independent; an empty catalog only skips its own trigger.
    pub(crate) fn fire_events(&mut self) -> (Vec<EventReport>, Vec<Error>) {
        let config = Arc::clone(&self.config);
        let per_group = event_catalog(&config, &[EventCategory::Good, EventCategory::Bad]);
        let global = event_catalog(&config, &[EventCategory::Neutral]);

        let mut reports = Vec::new();
        let mut failures = Vec::new();

        let mut draws: Vec<(Option<String>, Option<DefId>)> = self
            .membership
            .groups()
            .into_iter()
            .map(|group| {
                let pick = per_group.select(&mut self.rng).cloned();
                (Some(group), pick)
            })
            .collect();
        draws.push((None, global.select(&mut self.rng).cloned()));

        for (group, pick) in draws {
            let Some(key) = pick else {
                let scope = group.as_deref().unwrap_or("everyone");
                let err = Error::ConfigurationGap(format!("no events to fire for {}", scope));
                log_cycle_failure("events", &err);
                failures.push(err);
                continue;
            };
            match config.events.get_key_value(key.as_str()) {
                Some((key, def)) => reports.push(self.activate(group.as_deref(), key, def)),
                None => {
                    let err = Error::not_found("Event", key.as_str());
                    log_cycle_failure("events", &err);
                    failures.push(err);
                }
            }
        }

        (reports, failures)
    }

    fn activate(&mut self, group: Option<&str>, key: &DefId, def: &EventDef) -> EventReport {
        let id = ActivationId(self.next_activation);
        self.next_activation += 1;
        let now = self.scheduler.now();

        let participants = resolve_targets(&self.world, &self.membership, group);
        let effects = assemble_effects(&self.world, def);

        let mut applied = 0;
        for participant in &participants {
            for effect in &effects.items {
                if self.world.apply_status_effect(*participant, effect) {
                    applied += 1;
                }
            }
        }

        let damage_intervals = match def.special_effect {
            SpecialEffect::SustainedDamage => self.start_sustained_damage(id, def, &participants),
            SpecialEffect::None => None,
        };

        let messages = &self.config.messages;
        let audience = match group {
            Some(group) => group.to_string(),
            None => messages.format("event.everyone", &[]),
        };
        let display_name = def.display_name(key.as_str());
        let announcement = messages.format("event.start", &[&display_name, &audience]);
        let confirmation = messages.format("event.success", &[key, &audience]);
        self.world.broadcast(&announcement);

        info!(
            event = %key,
            %id,
            group = group.unwrap_or("everyone"),
            participants = participants.len(),
            applied,
            "event triggered"
        );

        self.active.insert(
            id,
            ActiveEvent {
                id,
                event: key.clone(),
                definition: def.clone(),
                group: group.map(str::to_string),
                participants: participants.clone(),
                started_at: now,
                effects_until: now.saturating_add(seconds_to_ticks(def.duration)),
                runner: self.runners.get(&id).map(DamageRunner::handle),
            },
        );

        EventReport {
            activation: id,
            event: key.clone(),
            group: group.map(str::to_string),
            participants: participants.into_iter().collect(),
            effects: effects.items,
            applied,
            skipped: effects.skipped,
            damage_intervals,
            confirmation,
        }
    }

    /// Start the sustained-damage sub-schedule; returns the evaluation count
    fn start_sustained_damage(
        &mut self,
        id: ActivationId,
        def: &EventDef,
        participants: &IndexSet<ParticipantId>,
    ) -> Option<u64> {
        let settings = &self.config.sustained_damage;
        let intervals = def.duration.div_ceil(settings.interval);
        if intervals == 0 {
            return None;
        }

        let period = seconds_to_ticks(settings.interval);
        let damage = settings.damage;
        let handle = match self
            .scheduler
            .schedule_repeating(period, period, EngineTask::SustainedDamage(id))
        {
            Ok(handle) => handle,
            Err(err) => {
                warn!(%id, %err, "could not schedule sustained damage");
                return None;
            }
        };

        self.runners.insert(
            id,
            DamageRunner::bounded(handle, participants.clone(), damage, intervals),
        );
        Some(intervals)
    }

    /// Stop an activation's sustained damage early
    ///
    /// Status effects already applied keep running in the world.
    pub fn cancel_event(&mut self, activation: ActivationId) -> Result<()> {
        self.ensure_running()?;
        if !self.active.contains_key(&activation) {
            return Err(Error::not_found("Activation", activation.to_string()));
        }
        if self.finish_runner(activation) {
            info!(%activation, "sustained damage cancelled");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryMembership, MemoryWorld};
    use windfall_script::{strip_colors, ContentConfig};

    fn engine_with(ids: &[u64]) -> ContentEngine<MemoryWorld, MemoryMembership> {
        let mut world = MemoryWorld::new("world");
        for id in ids {
            world.join(ParticipantId::new(*id));
        }
        ContentEngine::start(ContentConfig::default(), world, MemoryMembership::new(), 5).unwrap()
    }

    #[test]
    fn test_unknown_event() {
        let mut engine = engine_with(&[1]);
        let err = engine.trigger_event(None, "eclipse").unwrap_err();
        assert!(matches!(err, Error::NotFound { kind: "Event", .. }));
        assert!(engine.world().broadcasts().is_empty());
        assert_eq!(engine.active_events().count(), 0);
    }

    #[test]
    fn test_effects_applied_to_everyone() {
        let mut engine = engine_with(&[1, 2]);
        let report = engine.trigger_event(None, "festival_of_strength").unwrap();

        assert_eq!(report.participants.len(), 2);
        assert_eq!(report.effects.len(), 2);
        assert_eq!(report.applied, 4);
        assert_eq!(report.damage_intervals, None);
        assert_eq!(
            strip_colors(&engine.world().broadcasts()[0]),
            "⚡ Festival of Strength has begun for everyone!"
        );
        assert_eq!(
            strip_colors(&report.confirmation),
            "Successfully triggered event festival_of_strength for everyone."
        );

        let effects = &engine.world().participant(ParticipantId::new(1)).unwrap().effects;
        assert_eq!(effects[0].duration_ticks, 600 * 20);
    }

    #[test]
    fn test_active_event_expires_with_effects() {
        let mut config = ContentConfig::default();
        config
            .events
            .insert(DefId::new("blink"), EventDef::new("Blink", EventCategory::Good, 1).with_effect("SPEED", 1));
        let mut engine =
            ContentEngine::start(config, MemoryWorld::new("world"), MemoryMembership::new(), 5).unwrap();

        let report = engine.trigger_event(None, "blink").unwrap();
        assert!(engine.active_event(report.activation).is_some());

        engine.advance(19).unwrap();
        assert!(engine.active_event(report.activation).is_some());
        engine.tick().unwrap();
        assert!(engine.active_event(report.activation).is_none());
    }

    #[test]
    fn test_zero_duration_starts_no_runner() {
        let mut config = ContentConfig::default();
        config.events.insert(
            DefId::new("flash"),
            EventDef::new("Flash", EventCategory::Bad, 0).with_special(SpecialEffect::SustainedDamage),
        );
        let mut engine =
            ContentEngine::start(config, MemoryWorld::new("world"), MemoryMembership::new(), 5).unwrap();

        let report = engine.trigger_event(None, "flash").unwrap();
        assert_eq!(report.damage_intervals, None);
        assert!(engine.runner(report.activation).is_none());
        assert_eq!(engine.scheduled_tasks(), 2);
    }

    #[test]
    fn test_partial_interval_rounds_up() {
        let mut config = ContentConfig::default();
        config.events.insert(
            DefId::new("glare"),
            EventDef::new("Glare", EventCategory::Bad, 31).with_special(SpecialEffect::SustainedDamage),
        );
        let mut engine =
            ContentEngine::start(config, MemoryWorld::new("world"), MemoryMembership::new(), 5).unwrap();

        let report = engine.trigger_event(None, "glare").unwrap();
        assert_eq!(report.damage_intervals, Some(2));
    }

    #[test]
    fn test_cancel_unknown_activation() {
        let mut engine = engine_with(&[]);
        assert!(matches!(
            engine.cancel_event(ActivationId(99)),
            Err(Error::NotFound { .. })
        ));
    }
}
