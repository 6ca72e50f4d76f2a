//! The action algebra.
//!
//! Effects are built from small constructors, composed with `and`, and bound
//! to a target selector with `to`, which produces an [`Action`]:
//!
//! ```
//! use card_battler::actions::{Action, AgentEffect, AgentSet, AgentTarget};
//! use card_battler::core::Value;
//! use card_battler::status::repo;
//!
//! let bash: Action = AgentEffect::attack(Value::upgradable(8, 10))
//!     .and(AgentEffect::apply_status(Value::upgradable(2, 3), &repo::VULNERABLE))
//!     .to(AgentTarget::Choose(AgentSet::Enemies));
//!
//! assert_eq!(
//!     bash.to_string(),
//!     "DealAttackDamage(8) and ApplyStatus(2-Vulnerable) to chosen of enemies"
//! );
//! ```
//!
//! Descriptions are produced without executing anything, so they can be shown
//! as enemy intentions or handed to text-driven decision makers.

use crate::core::Value;
use crate::status::StatusEffectDefinition;
use crate::zones::PileKind;

use super::targeting::{AgentTarget, CardTarget};

/// Something an agent does.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Change the player's mana by the value (negative values spend).
    AddMana(Value),
    /// Play the card at this hand index.
    PlayCard(usize),
    /// End the acting agent's turn.
    EndAgentTurn,
    NoAction,
    /// Resolve every action in order.
    And(Vec<Action>),
    ToAgents { effect: AgentEffect, target: AgentTarget },
    ToCards { effect: CardEffect, target: CardTarget },
}

impl Action {
    #[must_use]
    pub fn add_mana(value: impl Into<Value>) -> Self {
        Action::AddMana(value.into())
    }

    /// Sequence `other` after this action.
    #[must_use]
    pub fn and(self, other: Action) -> Self {
        match self {
            Action::And(mut actions) => {
                actions.push(other);
                Action::And(actions)
            }
            first => Action::And(vec![first, other]),
        }
    }

    /// Upgrade every value inside this action.
    pub fn upgrade(&mut self, times: u32) {
        match self {
            Action::AddMana(value) => value.upgrade(times),
            Action::And(actions) => actions.iter_mut().for_each(|a| a.upgrade(times)),
            Action::ToAgents { effect, .. } => effect.upgrade(times),
            Action::PlayCard(_) | Action::EndAgentTurn | Action::NoAction | Action::ToCards { .. } => {}
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::AddMana(value) => write!(f, "AddMana({value})"),
            Action::PlayCard(index) => write!(f, "Play card {index} from your hand"),
            Action::EndAgentTurn => write!(f, "End turn"),
            Action::NoAction => write!(f, "NoAction"),
            Action::And(actions) => write_joined(f, actions),
            Action::ToAgents { effect, target } => write!(f, "{effect} to {target}"),
            Action::ToCards { effect, target } => write!(f, "{effect} to {target}"),
        }
    }
}

/// An effect applied to each resolved agent.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AgentEffect {
    /// Damage that bypasses attack modifiers.
    DealDamage(Value),
    /// Damage piped through the attack-damage event, dealt `times` times.
    DealAttackDamage { value: Value, times: u32 },
    AddBlock(Value),
    ApplyStatus { value: Value, status: &'static StatusEffectDefinition },
    Heal(Value),
    /// Every effect, in order, on the same agent.
    And(Vec<AgentEffect>),
}

impl AgentEffect {
    #[must_use]
    pub fn damage(value: impl Into<Value>) -> Self {
        AgentEffect::DealDamage(value.into())
    }

    #[must_use]
    pub fn attack(value: impl Into<Value>) -> Self {
        Self::attack_times(value, 1)
    }

    #[must_use]
    pub fn attack_times(value: impl Into<Value>, times: u32) -> Self {
        AgentEffect::DealAttackDamage { value: value.into(), times }
    }

    #[must_use]
    pub fn block(value: impl Into<Value>) -> Self {
        AgentEffect::AddBlock(value.into())
    }

    #[must_use]
    pub fn apply_status(value: impl Into<Value>, status: &'static StatusEffectDefinition) -> Self {
        AgentEffect::ApplyStatus { value: value.into(), status }
    }

    #[must_use]
    pub fn heal(value: impl Into<Value>) -> Self {
        AgentEffect::Heal(value.into())
    }

    #[must_use]
    pub fn and(self, other: AgentEffect) -> Self {
        match self {
            AgentEffect::And(mut effects) => {
                effects.push(other);
                AgentEffect::And(effects)
            }
            first => AgentEffect::And(vec![first, other]),
        }
    }

    /// Bind this effect to a target selector.
    #[must_use]
    pub fn to(self, target: AgentTarget) -> Action {
        Action::ToAgents { effect: self, target }
    }

    pub fn upgrade(&mut self, times: u32) {
        match self {
            AgentEffect::DealDamage(value)
            | AgentEffect::DealAttackDamage { value, .. }
            | AgentEffect::AddBlock(value)
            | AgentEffect::ApplyStatus { value, .. }
            | AgentEffect::Heal(value) => value.upgrade(times),
            AgentEffect::And(effects) => effects.iter_mut().for_each(|e| e.upgrade(times)),
        }
    }
}

impl std::fmt::Display for AgentEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentEffect::DealDamage(value) => write!(f, "DealDamage({value})"),
            AgentEffect::DealAttackDamage { value, times: 1 } => write!(f, "DealAttackDamage({value})"),
            AgentEffect::DealAttackDamage { value, times } => write!(f, "DealAttackDamage({value}x{times})"),
            AgentEffect::AddBlock(value) => write!(f, "AddBlock({value})"),
            AgentEffect::ApplyStatus { value, status } => write!(f, "ApplyStatus({value}-{status})"),
            AgentEffect::Heal(value) => write!(f, "Heal({value})"),
            AgentEffect::And(effects) => write_joined(f, effects),
        }
    }
}

/// An effect applied to each resolved card.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CardEffect {
    /// Move the card to the exhaust pile.
    Exhaust,
    /// Put a fresh copy of the card into a pile.
    AddCopy(PileKind),
    Upgrade,
    /// Move the card from the hand to the discard pile.
    Discard,
    And(Vec<CardEffect>),
}

impl CardEffect {
    #[must_use]
    pub fn and(self, other: CardEffect) -> Self {
        match self {
            CardEffect::And(mut effects) => {
                effects.push(other);
                CardEffect::And(effects)
            }
            first => CardEffect::And(vec![first, other]),
        }
    }

    /// Bind this effect to a target selector.
    #[must_use]
    pub fn to(self, target: CardTarget) -> Action {
        Action::ToCards { effect: self, target }
    }
}

impl std::fmt::Display for CardEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardEffect::Exhaust => write!(f, "Exhaust"),
            CardEffect::AddCopy(pile) => write!(f, "AddCopy({})", pile.label()),
            CardEffect::Upgrade => write!(f, "UpgradeCard"),
            CardEffect::Discard => write!(f, "DiscardCard"),
            CardEffect::And(effects) => write_joined(f, effects),
        }
    }
}

fn write_joined<T: std::fmt::Display>(f: &mut std::fmt::Formatter<'_>, items: &[T]) -> std::fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(" and ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::AgentSet;
    use crate::status::repo;

    #[test]
    fn test_and_flattens() {
        let action = Action::NoAction.and(Action::EndAgentTurn).and(Action::add_mana(1));
        match action {
            Action::And(actions) => assert_eq!(actions.len(), 3),
            other => panic!("expected And, got {other:?}"),
        }
    }

    #[test]
    fn test_descriptions() {
        let thrash = AgentEffect::attack(7)
            .to(AgentTarget::Player)
            .and(AgentEffect::block(5).to(AgentTarget::SelfAgent));
        assert_eq!(thrash.to_string(), "DealAttackDamage(7) to player and AddBlock(5) to self");

        let twin = AgentEffect::attack_times(5, 2).to(AgentTarget::Choose(AgentSet::Enemies));
        assert_eq!(twin.to_string(), "DealAttackDamage(5x2) to chosen of enemies");

        let anger = CardEffect::AddCopy(PileKind::Discard).to(CardTarget::SelfCard);
        assert_eq!(anger.to_string(), "AddCopy(discard) to this card");

        assert_eq!(Action::PlayCard(2).to_string(), "Play card 2 from your hand");
        assert_eq!(Action::EndAgentTurn.to_string(), "End turn");
    }

    #[test]
    fn test_upgrade_reaches_nested_values() {
        let mut bash = AgentEffect::attack(Value::upgradable(8, 10))
            .and(AgentEffect::apply_status(Value::upgradable(2, 3), &repo::VULNERABLE))
            .to(AgentTarget::Choose(AgentSet::Enemies))
            .and(Action::add_mana(Value::upgradable(0, 1)));

        bash.upgrade(1);
        assert_eq!(
            bash.to_string(),
            "DealAttackDamage(10) and ApplyStatus(3-Vulnerable) to chosen of enemies and AddMana(1)"
        );
    }

    #[test]
    fn test_structural_equality() {
        let a = AgentEffect::attack(5).to(AgentTarget::Player);
        let b = AgentEffect::attack(5).to(AgentTarget::Player);
        let c = AgentEffect::attack(6).to(AgentTarget::Player);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
