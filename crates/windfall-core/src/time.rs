//! Time system for tick-based simulation
//!
//! - `Tick` - Logical time unit of the host clock
//! - `Clock` - Simulation clock with state

/// A discrete tick identifier (logical time unit)
pub type Tick = u64;

/// Host clock rate
pub const TICKS_PER_SECOND: u64 = 20;

/// Convert whole seconds of simulated time to ticks
pub fn seconds_to_ticks(seconds: u64) -> Tick {
    seconds.saturating_mul(TICKS_PER_SECOND)
}

/// Simulation clock state
#[derive(Debug, Clone, Default)]
pub struct Clock {
    /// Current tick number
    pub tick: Tick,
}

impl Clock {
    /// Create a new clock at tick 0
    pub fn new() -> Self {
        Self { tick: 0 }
    }

    /// Advance to the next tick
    pub fn advance(&mut self) {
        self.tick += 1;
    }

    /// Whole simulated seconds elapsed
    pub fn elapsed_seconds(&self) -> u64 {
        self.tick / TICKS_PER_SECOND
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock() {
        let mut clock = Clock::new();
        assert_eq!(clock.tick, 0);

        for _ in 0..40 {
            clock.advance();
        }
        assert_eq!(clock.tick, 40);
        assert_eq!(clock.elapsed_seconds(), 2);
    }

    #[test]
    fn test_seconds_to_ticks() {
        assert_eq!(seconds_to_ticks(30), 600);
        assert_eq!(seconds_to_ticks(7200), 144_000);
        assert_eq!(seconds_to_ticks(u64::MAX), u64::MAX);
    }
}
