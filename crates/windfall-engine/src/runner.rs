//! Sustained-damage runner
//!
//! A runner owns a fixed set of participants and deals damage to those under
//! open sky each time its sub-schedule fires. The engine drives it from the
//! scheduler; the runner itself only counts evaluations.

use indexmap::IndexSet;
use tracing::trace;
use windfall_core::{ParticipantId, TaskHandle, World};

/// What one evaluation did
#[derive(Debug, Clone, PartialEq)]
pub struct DamageStep {
    /// Participants that took damage
    pub damaged: Vec<ParticipantId>,
    /// Evaluations left afterwards (`None` when unbounded)
    pub remaining: Option<u64>,
    pub finished: bool,
}

/// Periodic damage over a fixed participant set
#[derive(Debug, Clone)]
pub struct DamageRunner {
    participants: IndexSet<ParticipantId>,
    damage: f64,
    remaining: Option<u64>,
    evaluations: u64,
    handle: TaskHandle,
}

impl DamageRunner {
    /// A runner that stops after `intervals` evaluations
    pub fn bounded(
        handle: TaskHandle,
        participants: IndexSet<ParticipantId>,
        damage: f64,
        intervals: u64,
    ) -> Self {
        Self {
            participants,
            damage,
            remaining: Some(intervals),
            evaluations: 0,
            handle,
        }
    }

    /// A runner that only stops when cancelled
    pub fn unbounded(handle: TaskHandle, participants: IndexSet<ParticipantId>, damage: f64) -> Self {
        Self {
            participants,
            damage,
            remaining: None,
            evaluations: 0,
            handle,
        }
    }

    /// Scheduler task driving this runner
    pub fn handle(&self) -> TaskHandle {
        self.handle
    }

    pub fn participants(&self) -> &IndexSet<ParticipantId> {
        &self.participants
    }

    pub fn remaining(&self) -> Option<u64> {
        self.remaining
    }

    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    pub fn is_finished(&self) -> bool {
        self.remaining == Some(0)
    }

    /// Run one evaluation
    ///
    /// Unreachable participants and those in shade are left alone. Calling
    /// this on a finished runner does nothing.
    pub fn step<W: World + ?Sized>(&mut self, world: &mut W) -> DamageStep {
        if self.is_finished() {
            return DamageStep {
                damaged: Vec::new(),
                remaining: Some(0),
                finished: true,
            };
        }

        let mut damaged = Vec::new();
        for &participant in &self.participants {
            match world.is_under_open_sky(participant) {
                Some(true) => {
                    if world.damage(participant, self.damage) {
                        damaged.push(participant);
                    }
                }
                Some(false) => {}
                None => trace!(%participant, "participant unreachable"),
            }
        }

        self.evaluations += 1;
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining = remaining.saturating_sub(1);
        }

        DamageStep {
            damaged,
            remaining: self.remaining,
            finished: self.is_finished(),
        }
    }
}
