//! The decision protocol between the battle and whoever plays it.
//!
//! A battle asks for two kinds of decisions:
//! - which card to play next (or to end the turn), through [`Bot`]
//! - which agent or card a choosing selector lands on, through
//!   [`TargetChooser`]
//!
//! Target choosers are only asked when the candidate list is non-empty, and
//! may answer `None` to turn the effect into a no-op.

use crate::battle::{BattleState, PlayerChoice};
use crate::core::error::Result;
use crate::core::{AgentId, BattleConfig, CardUid};

/// Picks targets for choosing selectors.
pub trait TargetChooser {
    /// Pick one of `candidates` from the agent list named `list_name`.
    fn choose_agent_target(
        &mut self,
        battle: &BattleState,
        list_name: &str,
        candidates: &[AgentId],
    ) -> Option<AgentId>;

    /// Pick one of `candidates` from the pile named `list_name`.
    fn choose_card_target(
        &mut self,
        battle: &BattleState,
        list_name: &str,
        candidates: &[CardUid],
    ) -> Option<CardUid>;
}

/// A player decision maker.
pub trait Bot: TargetChooser {
    fn name(&self) -> &str;

    /// Pick the next decision from [`BattleState::player_options`].
    fn choose_card(&mut self, ctx: &BattleConfig, battle: &BattleState) -> Result<PlayerChoice>;
}

/// Always picks the first candidate.
///
/// Used for enemy moves and inside look-ahead branches, where no external
/// decision maker is available.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstCandidate;

impl TargetChooser for FirstCandidate {
    fn choose_agent_target(&mut self, _: &BattleState, _: &str, candidates: &[AgentId]) -> Option<AgentId> {
        candidates.first().copied()
    }

    fn choose_card_target(&mut self, _: &BattleState, _: &str, candidates: &[CardUid]) -> Option<CardUid> {
        candidates.first().copied()
    }
}
