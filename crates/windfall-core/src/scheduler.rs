//! Tick-driven task scheduler
//!
//! The host clock primitive the engine registers its timers with. Tasks are
//! either delayed one-shots or periodic, each identified by a [`TaskHandle`]
//! that cancels it. The scheduler never runs callbacks itself: [`Scheduler::tick`]
//! returns the payloads that came due and the owner dispatches them, so a
//! callback can freely mutate the owner (including cancelling other tasks).

use crate::error::{Error, Result};
use crate::time::{Clock, Tick};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cancellation handle for a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskHandle(pub u64);

impl fmt::Display for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task:{}", self.0)
    }
}

/// A task that came due on the current tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Due<T> {
    pub handle: TaskHandle,
    pub payload: T,
}

#[derive(Debug, Clone)]
struct ScheduledTask<T> {
    handle: TaskHandle,
    next_fire: Tick,
    /// `None` for one-shot tasks
    period: Option<Tick>,
    payload: T,
}

/// Registry of pending tasks plus the clock that drives them
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    clock: Clock,
    /// Kept in registration order so ties fire in that order
    tasks: Vec<ScheduledTask<T>>,
    next_handle: u64,
}

impl<T: Clone> Scheduler<T> {
    /// Create an empty scheduler at tick 0
    pub fn new() -> Self {
        Self {
            clock: Clock::new(),
            tasks: Vec::new(),
            next_handle: 1,
        }
    }

    /// Current tick
    pub fn now(&self) -> Tick {
        self.clock.tick
    }

    /// Run `payload` once, `delay` ticks from now
    pub fn schedule_once(&mut self, delay: Tick, payload: T) -> Result<TaskHandle> {
        if delay == 0 {
            return Err(Error::InvalidInterval(delay));
        }
        Ok(self.insert(delay, None, payload))
    }

    /// Run `payload` every `period` ticks, first after `delay` ticks
    pub fn schedule_repeating(&mut self, delay: Tick, period: Tick, payload: T) -> Result<TaskHandle> {
        if delay == 0 {
            return Err(Error::InvalidInterval(delay));
        }
        if period == 0 {
            return Err(Error::InvalidInterval(period));
        }
        Ok(self.insert(delay, Some(period), payload))
    }

    fn insert(&mut self, delay: Tick, period: Option<Tick>, payload: T) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        self.tasks.push(ScheduledTask {
            handle,
            next_fire: self.clock.tick.saturating_add(delay),
            period,
            payload,
        });
        handle
    }

    /// Cancel a task so it never fires again
    pub fn cancel(&mut self, handle: TaskHandle) -> Result<()> {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.handle != handle);
        if self.tasks.len() == before {
            return Err(Error::TaskNotFound(handle));
        }
        Ok(())
    }

    /// Cancel every task, returning how many were pending
    pub fn cancel_all(&mut self) -> usize {
        let count = self.tasks.len();
        self.tasks.clear();
        count
    }

    /// Whether the task is still pending
    pub fn is_scheduled(&self, handle: TaskHandle) -> bool {
        self.tasks.iter().any(|task| task.handle == handle)
    }

    /// Tick at which the task fires next
    pub fn next_fire(&self, handle: TaskHandle) -> Option<Tick> {
        self.find(handle).map(|task| task.next_fire)
    }

    /// Repeat period of the task (`None` for one-shots or unknown handles)
    pub fn period(&self, handle: TaskHandle) -> Option<Tick> {
        self.find(handle).and_then(|task| task.period)
    }

    /// Number of pending tasks
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// True if no task is pending
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn find(&self, handle: TaskHandle) -> Option<&ScheduledTask<T>> {
        self.tasks.iter().find(|task| task.handle == handle)
    }

    /// Advance the clock by one tick and collect every task due on it
    ///
    /// Periodic tasks are re-armed for `now + period`; one-shots are removed.
    pub fn tick(&mut self) -> Vec<Due<T>> {
        self.clock.advance();
        let now = self.clock.tick;

        let mut due = Vec::new();
        for task in &mut self.tasks {
            if task.next_fire <= now {
                due.push(Due {
                    handle: task.handle,
                    payload: task.payload.clone(),
                });
                if let Some(period) = task.period {
                    task.next_fire = now.saturating_add(period);
                }
            }
        }

        self.tasks
            .retain(|task| task.period.is_some() || task.next_fire > now);
        due
    }
}

impl<T: Clone> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run<T: Clone>(scheduler: &mut Scheduler<T>, ticks: u64) -> Vec<(Tick, T)> {
        let mut fired = Vec::new();
        for _ in 0..ticks {
            for due in scheduler.tick() {
                fired.push((scheduler.now(), due.payload));
            }
        }
        fired
    }

    #[test]
    fn test_repeating_fires_each_period() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_repeating(10, 10, "airdrop").unwrap();

        let fired = run(&mut scheduler, 35);
        let ticks: Vec<_> = fired.iter().map(|(t, _)| *t).collect();
        assert_eq!(ticks, vec![10, 20, 30]);
    }

    #[test]
    fn test_once_fires_once() {
        let mut scheduler = Scheduler::new();
        let handle = scheduler.schedule_once(3, 7u8).unwrap();

        let fired = run(&mut scheduler, 10);
        assert_eq!(fired, vec![(3, 7)]);
        assert!(!scheduler.is_scheduled(handle));
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_cancel_stops_firing() {
        let mut scheduler = Scheduler::new();
        let handle = scheduler.schedule_repeating(5, 5, ()).unwrap();

        assert_eq!(run(&mut scheduler, 5).len(), 1);
        scheduler.cancel(handle).unwrap();
        assert_eq!(run(&mut scheduler, 50).len(), 0);
        assert_eq!(scheduler.cancel(handle), Err(Error::TaskNotFound(handle)));
    }

    #[test]
    fn test_ties_fire_in_registration_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_repeating(4, 4, "first").unwrap();
        scheduler.schedule_repeating(4, 4, "second").unwrap();

        let fired: Vec<_> = run(&mut scheduler, 4).into_iter().map(|(_, p)| p).collect();
        assert_eq!(fired, vec!["first", "second"]);
    }

    #[test]
    fn test_zero_intervals_rejected() {
        let mut scheduler: Scheduler<()> = Scheduler::new();
        assert_eq!(scheduler.schedule_once(0, ()), Err(Error::InvalidInterval(0)));
        assert_eq!(
            scheduler.schedule_repeating(1, 0, ()),
            Err(Error::InvalidInterval(0))
        );
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_next_fire_and_period() {
        let mut scheduler = Scheduler::new();
        let handle = scheduler.schedule_repeating(600, 600, ()).unwrap();
        assert_eq!(scheduler.next_fire(handle), Some(600));
        assert_eq!(scheduler.period(handle), Some(600));

        run(&mut scheduler, 600);
        assert_eq!(scheduler.next_fire(handle), Some(1200));
    }

    #[test]
    fn test_cancel_all() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_repeating(1, 1, 1).unwrap();
        scheduler.schedule_once(2, 2).unwrap();
        assert_eq!(scheduler.cancel_all(), 2);
        assert!(run(&mut scheduler, 10).is_empty());
    }
}
