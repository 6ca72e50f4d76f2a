//! Battle configuration.
//!
//! A `BattleConfig` is the game context handed to bots alongside the battle
//! state: how much mana a turn grants, how many cards are drawn, the
//! ascension level content scales with, and the RNG seed.

use serde::{Deserialize, Serialize};

/// Upper bound for an agent's block.
pub const MAX_BLOCK: i32 = 999;

/// Upper bound for the player's mana.
pub const MAX_MANA: i32 = 999;

/// Upper bound for a summed status value.
pub const MAX_STATUS: i32 = 999;

/// Per-encounter settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleConfig {
    /// Mana restored at the start of every player turn.
    pub max_mana: i32,

    /// Cards drawn at the start of every player turn.
    pub draw_count: usize,

    /// Difficulty level enemy content scales with.
    pub ascension: u32,

    /// Seed for shuffles, range values and enemy patterns.
    pub seed: u64,

    /// Turn after which the battle counts as lost (`None` = unlimited).
    pub max_turns: Option<u32>,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            max_mana: 3,
            draw_count: 5,
            ascension: 0,
            seed: 42,
            max_turns: None,
        }
    }
}

impl BattleConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_mana(mut self, max_mana: i32) -> Self {
        self.max_mana = max_mana.clamp(0, MAX_MANA);
        self
    }

    #[must_use]
    pub fn with_draw_count(mut self, draw_count: usize) -> Self {
        self.draw_count = draw_count;
        self
    }

    #[must_use]
    pub fn with_ascension(mut self, ascension: u32) -> Self {
        self.ascension = ascension;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = Some(max_turns);
        self
    }
}
