//! Look-ahead search configuration.

use serde::{Deserialize, Serialize};

/// Parameters of [`BacktrackBot`](super::BacktrackBot).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Player decisions to look ahead. Must be at least 1.
    pub depth: u32,

    /// Reuse results for states with identical content.
    pub memoize: bool,

    /// Random playouts averaged at the depth limit (0 = plain heuristic).
    pub rollouts: u32,

    /// Decisions a single playout may take before it is cut off.
    pub max_rollout_steps: u32,

    /// Added to the heuristic of a won state.
    pub win_bonus: i64,

    /// Subtracted from the heuristic of a lost state.
    pub loss_penalty: i64,

    /// Seed for branch shuffles and playouts.
    pub seed: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            memoize: true,
            rollouts: 0,
            max_rollout_steps: 20,
            win_bonus: 1000,
            loss_penalty: 1000,
            seed: 42,
        }
    }
}

impl SearchConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    #[must_use]
    pub fn with_memoize(mut self, memoize: bool) -> Self {
        self.memoize = memoize;
        self
    }

    /// Estimate depth-limit states with `rollouts` random playouts of at
    /// most `max_steps` decisions.
    #[must_use]
    pub fn with_rollouts(mut self, rollouts: u32, max_steps: u32) -> Self {
        self.rollouts = rollouts;
        self.max_rollout_steps = max_steps;
        self
    }

    #[must_use]
    pub fn with_terminal_scores(mut self, win_bonus: i64, loss_penalty: i64) -> Self {
        self.win_bonus = win_bonus;
        self.loss_penalty = loss_penalty;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
