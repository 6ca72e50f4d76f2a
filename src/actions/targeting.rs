//! Target selectors for agent and card effects.
//!
//! A selector is resolved once per play into an ordered candidate list.
//! Choosing selectors ask the player's [`TargetChooser`](crate::bots::TargetChooser);
//! an empty list or a "none available" answer turns the effect into a no-op.

use crate::zones::PileKind;

/// Which agents a choosing or all-targeting selector draws from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AgentSet {
    /// Living enemies, in encounter order.
    Enemies,
    /// The player followed by the living enemies.
    All,
}

impl AgentSet {
    /// Label shown to decision makers.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            AgentSet::Enemies => "enemies",
            AgentSet::All => "all agents",
        }
    }
}

/// Selects the agents an [`AgentEffect`](super::AgentEffect) applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AgentTarget {
    /// The acting agent.
    SelfAgent,
    Player,
    /// One agent picked by the decision maker.
    Choose(AgentSet),
    /// Every agent of the set.
    All(AgentSet),
    /// One agent of the set, uniformly at random.
    Random(AgentSet),
}

impl std::fmt::Display for AgentTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentTarget::SelfAgent => write!(f, "self"),
            AgentTarget::Player => write!(f, "player"),
            AgentTarget::Choose(set) => write!(f, "chosen of {}", set.label()),
            AgentTarget::All(AgentSet::Enemies) => write!(f, "all enemies"),
            AgentTarget::All(AgentSet::All) => write!(f, "everyone"),
            AgentTarget::Random(set) => write!(f, "random of {}", set.label()),
        }
    }
}

/// Selects the cards a [`CardEffect`](super::CardEffect) applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CardTarget {
    /// The card being played.
    SelfCard,
    /// One card of the pile, picked by the decision maker.
    Choose(PileKind),
}

impl std::fmt::Display for CardTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardTarget::SelfCard => write!(f, "this card"),
            CardTarget::Choose(pile) => write!(f, "chosen card of {}", pile.label()),
        }
    }
}
