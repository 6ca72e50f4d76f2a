//! The events a battle broadcasts, and the standard subscriber wiring.
//!
//! ## Standard order
//!
//! Attack damage:
//! - apply: strength, vigor, vulnerable, weak
//! - after: consume vigor
//!
//! Side turn:
//! - after: metallicize, bomb
//!
//! The apply order is part of the damage rules: additive bonuses come
//! before the multiplicative ones, so `(6 + 2) * 1.5 = 12` rather than
//! `6 * 1.5 + 2 = 11`.

use serde::{Deserialize, Serialize};

use crate::battle::BattleState;
use crate::core::AgentId;
use crate::status::modifiers;

use super::bus::Event;

/// Context of one attack-damage application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttackContext {
    pub by: AgentId,
    pub target: AgentId,
}

/// The two sides of a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemies,
}

impl Side {
    #[must_use]
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Enemies,
            Side::Enemies => Side::Player,
        }
    }
}

/// Context of a side's turn boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnContext {
    pub side: Side,
}

/// Every event a battle broadcasts.
#[derive(Debug)]
pub struct BattleEvents {
    pub attack_damage: Event<AttackContext, BattleState>,
    /// `before` fires when a side starts its turn, `after` when it ends it.
    pub side_turn: Event<TurnContext, BattleState>,
}

impl BattleEvents {
    /// Events with no subscribers.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            attack_damage: Event::new("attack_damage"),
            side_turn: Event::new("side_turn"),
        }
    }

    /// The built-in status effect subscribers, in rule order.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            attack_damage: Event::new("attack_damage")
                .subscribe_apply("strength", modifiers::strength)
                .subscribe_apply("vigor", modifiers::vigor)
                .subscribe_apply("vulnerable", modifiers::vulnerable)
                .subscribe_apply("weak", modifiers::weak)
                .subscribe_after("consume_vigor", modifiers::consume_vigor),
            side_turn: Event::new("side_turn")
                .subscribe_after("metallicize", modifiers::metallicize)
                .subscribe_after("bomb", modifiers::bomb),
        }
    }
}

impl Default for BattleEvents {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_apply_order() {
        let events = BattleEvents::standard();
        let order: Vec<_> = events.attack_damage.apply_order().collect();
        assert_eq!(order, vec!["strength", "vigor", "vulnerable", "weak"]);
    }

    #[test]
    fn test_opponent() {
        assert_eq!(Side::Player.opponent(), Side::Enemies);
        assert_eq!(Side::Enemies.opponent(), Side::Player);
    }
}
