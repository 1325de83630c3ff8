//! Deterministic random number generator
//!
//! Uses a simple xorshift64 algorithm for reproducibility across platforms.
//! The engine is always seeded explicitly, so a given seed replays the same
//! airdrops and events.

/// A deterministic random number generator
///
/// Uses xorshift64 for simplicity and reproducibility.
/// Never use OS randomness in engine logic.
#[derive(Debug, Clone)]
pub struct GameRng {
    state: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        // Ensure non-zero state (xorshift requires this)
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate the next raw u64 value
    pub fn next_u64(&mut self) -> u64 {
        // xorshift64 algorithm
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Generate a uniform integer in `[0, bound)`
    ///
    /// Uses rejection sampling so small bounds carry no modulo bias.
    /// Returns 0 when `bound` is 0.
    pub fn below(&mut self, bound: u64) -> u64 {
        if bound == 0 {
            return 0;
        }
        // 2^64 mod bound; draws under this are the biased tail
        let threshold = bound.wrapping_neg() % bound;
        loop {
            let x = self.next_u64();
            if x >= threshold {
                return x % bound;
            }
        }
    }

    /// Generate a random i64 in range [min, max] (inclusive, bounds in any order)
    pub fn range_i64(&mut self, a: i64, b: i64) -> i64 {
        let (min, max) = if a <= b { (a, b) } else { (b, a) };
        let span = (max as i128 - min as i128 + 1) as u128;
        if span > u64::MAX as u128 {
            return self.next_u64() as i64;
        }
        (min as i128 + self.below(span as u64) as i128) as i64
    }

    /// Generate a random u32 in range [min, max] (inclusive, bounds in any order)
    pub fn range_u32(&mut self, a: u32, b: u32) -> u32 {
        self.range_i64(a as i64, b as i64) as u32
    }

    /// Roll against a whole-number percentage
    ///
    /// Draws `roll` in `[0, 100)` and succeeds when `roll < percent`,
    /// so 100 always succeeds and 0 never does.
    pub fn percent(&mut self, percent: u32) -> bool {
        self.below(100) < percent as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.next_u64(), rng2.next_u64());
        }
    }

    #[test]
    fn test_zero_seed_is_usable() {
        let mut rng = GameRng::new(0);
        assert_ne!(rng.next_u64(), 0);
    }

    #[test]
    fn test_range() {
        let mut rng = GameRng::new(42);

        for _ in 0..1000 {
            let i = rng.range_i64(10, 20);
            assert!((10..=20).contains(&i));
        }
    }

    #[test]
    fn test_range_accepts_reversed_bounds() {
        let mut rng = GameRng::new(7);
        for _ in 0..1000 {
            let i = rng.range_i64(500, -500);
            assert!((-500..=500).contains(&i));
        }
    }

    #[test]
    fn test_range_hits_both_ends() {
        let mut rng = GameRng::new(99);
        let mut seen = [false; 3];
        for _ in 0..1000 {
            seen[rng.range_u32(2, 4) as usize - 2] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_degenerate_range() {
        let mut rng = GameRng::new(3);
        assert_eq!(rng.range_i64(5, 5), 5);
        assert_eq!(rng.below(1), 0);
        assert_eq!(rng.below(0), 0);
    }

    #[test]
    fn test_percent_extremes() {
        let mut rng = GameRng::new(11);
        for _ in 0..1000 {
            assert!(rng.percent(100));
            assert!(!rng.percent(0));
        }
    }
}
