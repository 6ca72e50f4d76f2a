//! Search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Counters collected by [`BacktrackBot`](super::BacktrackBot).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Root decisions made.
    pub decisions: u32,

    /// States whose options were enumerated.
    pub nodes_expanded: u64,

    /// Heuristic evaluations.
    pub leaf_evaluations: u64,

    /// Memo lookups answered from the table.
    pub memo_hits: u64,

    /// Memo lookups that had to search.
    pub memo_misses: u64,

    /// Random playouts run.
    pub rollouts: u64,

    /// Deepest level reached below the root.
    pub max_depth: u32,

    /// Total time spent searching (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Share of memo lookups that hit.
    #[must_use]
    pub fn memo_hit_rate(&self) -> f64 {
        let lookups = self.memo_hits + self.memo_misses;
        if lookups == 0 {
            0.0
        } else {
            self.memo_hits as f64 / lookups as f64
        }
    }

    #[must_use]
    pub fn nodes_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.nodes_expanded as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_rate() {
        let mut stats = SearchStats::new();
        assert_eq!(stats.memo_hit_rate(), 0.0);
        stats.memo_hits = 3;
        stats.memo_misses = 1;
        assert_eq!(stats.memo_hit_rate(), 0.75);
    }

    #[test]
    fn test_nodes_per_second() {
        let mut stats = SearchStats::new();
        stats.nodes_expanded = 500;
        stats.time_us = 500_000;
        assert_eq!(stats.nodes_per_second(), 1000.0);
    }

    #[test]
    fn test_reset() {
        let mut stats = SearchStats::new();
        stats.decisions = 4;
        stats.memo_hits = 10;
        stats.reset();
        assert_eq!(stats, SearchStats::default());
    }
}
