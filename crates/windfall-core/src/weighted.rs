//! Cumulative-weight selection table
//!
//! Picks one key from a catalog of `(key, weight)` pairs with probability
//! `weight / total`. Memory is one slot per key regardless of weight size.

use crate::GameRng;

/// A weighted catalog prepared for repeated selection
///
/// `bounds[i]` is the running total of weights up to and including `keys[i]`,
/// so the table is strictly increasing. Zero-weight keys are never stored.
#[derive(Debug, Clone)]
pub struct WeightedTable<K> {
    keys: Vec<K>,
    bounds: Vec<u64>,
}

impl<K> WeightedTable<K> {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            bounds: Vec::new(),
        }
    }

    /// Append a key with the given weight
    ///
    /// Zero weights are dropped: such keys can never be selected.
    pub fn push(&mut self, key: K, weight: u32) {
        if weight == 0 {
            return;
        }
        let total = self.total() + weight as u64;
        self.keys.push(key);
        self.bounds.push(total);
    }

    /// Sum of all weights
    pub fn total(&self) -> u64 {
        self.bounds.last().copied().unwrap_or(0)
    }

    /// Number of selectable keys
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// True when nothing can be selected (empty or all weights zero)
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Selectable keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.keys.iter()
    }

    /// Pick a key, or `None` when the table has no positive weight
    pub fn select(&self, rng: &mut GameRng) -> Option<&K> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        let draw = rng.below(total);
        let index = self.bounds.partition_point(|bound| *bound <= draw);
        self.keys.get(index)
    }
}

impl<K> Default for WeightedTable<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> FromIterator<(K, u32)> for WeightedTable<K> {
    fn from_iter<I: IntoIterator<Item = (K, u32)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (key, weight) in iter {
            table.push(key, weight);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table_selects_nothing() {
        let table: WeightedTable<&str> = WeightedTable::new();
        let mut rng = GameRng::new(1);
        assert!(table.is_empty());
        assert_eq!(table.select(&mut rng), None);
    }

    #[test]
    fn test_all_zero_weights_select_nothing() {
        let table: WeightedTable<&str> = [("a", 0), ("b", 0)].into_iter().collect();
        let mut rng = GameRng::new(1);
        for _ in 0..100 {
            assert_eq!(table.select(&mut rng), None);
        }
    }

    #[test]
    fn test_single_entry_always_selected() {
        let table: WeightedTable<&str> = [("only", 3)].into_iter().collect();
        let mut rng = GameRng::new(9);
        for _ in 0..1000 {
            assert_eq!(table.select(&mut rng), Some(&"only"));
        }
    }

    #[test]
    fn test_zero_weight_never_selected() {
        let table: WeightedTable<&str> = [("never", 0), ("always", 1), ("nope", 0)]
            .into_iter()
            .collect();
        let mut rng = GameRng::new(17);
        assert_eq!(table.len(), 1);
        for _ in 0..1000 {
            assert_eq!(table.select(&mut rng), Some(&"always"));
        }
    }

    #[test]
    fn test_distribution_matches_weights() {
        let weights = [("common", 40u32), ("rare", 20), ("legendary", 10), ("mystic", 5)];
        let table: WeightedTable<&str> = weights.iter().copied().collect();
        assert_eq!(table.total(), 75);

        let mut rng = GameRng::new(2024);
        let trials = 200_000;
        let mut counts = [0usize; 4];
        for _ in 0..trials {
            let key = table.select(&mut rng).copied();
            let slot = weights.iter().position(|(k, _)| Some(*k) == key);
            counts[slot.expect("selected key must come from the catalog")] += 1;
        }

        for (i, (_, weight)) in weights.iter().enumerate() {
            let expected = *weight as f64 / 75.0;
            let observed = counts[i] as f64 / trials as f64;
            assert!(
                (observed - expected).abs() < 0.01,
                "slot {} observed {:.4}, expected {:.4}",
                i,
                observed,
                expected
            );
        }
    }

    #[test]
    fn test_large_weights_do_not_allocate_per_unit() {
        let table: WeightedTable<u8> = [(1, u32::MAX), (2, u32::MAX)].into_iter().collect();
        assert_eq!(table.len(), 2);
        assert_eq!(table.total(), 2 * u32::MAX as u64);
    }
}
