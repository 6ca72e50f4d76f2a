//! Uniformly random decisions.

use crate::battle::{BattleState, PlayerChoice};
use crate::core::error::{BattleError, Result};
use crate::core::{AgentId, BattleConfig, CardUid, GameRng};

use super::bot::{Bot, TargetChooser};

/// Picks uniformly among the legal options and target candidates.
#[derive(Clone, Debug)]
pub struct RandomBot {
    rng: GameRng,
}

impl RandomBot {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self { rng: GameRng::new(seed) }
    }
}

impl TargetChooser for RandomBot {
    fn choose_agent_target(&mut self, _: &BattleState, _: &str, candidates: &[AgentId]) -> Option<AgentId> {
        self.rng.choose(candidates).copied()
    }

    fn choose_card_target(&mut self, _: &BattleState, _: &str, candidates: &[CardUid]) -> Option<CardUid> {
        self.rng.choose(candidates).copied()
    }
}

impl Bot for RandomBot {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_card(&mut self, _ctx: &BattleConfig, battle: &BattleState) -> Result<PlayerChoice> {
        let options = battle.player_options();
        self.rng.choose(&options).copied().ok_or(BattleError::NoLegalOption)
    }
}
