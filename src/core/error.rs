//! Errors raised when a battle is driven outside its contract.

use thiserror::Error;

use super::entity::{AgentId, CardUid};

/// Contract violations that abort the current operation.
///
/// An empty target list is not an error: it is modelled as `None` by the
/// target choosers and resolves as a no-op.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BattleError {
    #[error("negative {kind} amount {amount}")]
    NegativeAmount { kind: &'static str, amount: i32 },

    #[error("card index {index} out of range for hand of {hand_len}")]
    CardIndexOutOfRange { index: usize, hand_len: usize },

    #[error("card {name} costs {cost} but only {mana} mana is available")]
    CardNotPlayable { name: String, cost: i32, mana: i32 },

    #[error("mana underflow: {mana} + ({delta})")]
    ManaUnderflow { mana: i32, delta: i32 },

    #[error("unknown agent {0}")]
    UnknownAgent(AgentId),

    #[error("chooser picked {0}, which was not offered")]
    InvalidAgentChoice(AgentId),

    #[error("chooser picked {0}, which was not offered")]
    InvalidCardChoice(CardUid),

    #[error("battle is already over")]
    BattleOver,

    #[error("no legal option to choose from")]
    NoLegalOption,
}

pub type Result<T> = std::result::Result<T, BattleError>;
