//! Card instances.
//!
//! A `Card` carries its own cost and actions, so upgrading one copy never
//! touches another. The battle assigns every instance a [`CardUid`] when the
//! card enters play; freshly built cards carry `CardUid(0)` until then.

use serde::{Deserialize, Serialize};

use crate::actions::Action;
use crate::core::{CardUid, GameRng, Value};

/// Card category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Attack,
    Skill,
    /// Stays in play once played instead of going to the discard pile.
    Power,
}

/// A playable card.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Card {
    uid: CardUid,
    name: String,
    card_type: CardType,
    mana_cost: Value,
    actions: Vec<Action>,
    upgrade_count: u32,
}

impl Card {
    #[must_use]
    pub fn new(name: impl Into<String>, card_type: CardType, mana_cost: impl Into<Value>) -> Self {
        Self {
            uid: CardUid::new(0),
            name: name.into(),
            card_type,
            mana_cost: mana_cost.into(),
            actions: Vec::new(),
            upgrade_count: 0,
        }
    }

    /// Append an action; actions resolve in the order they were added.
    #[must_use]
    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    #[must_use]
    pub fn uid(&self) -> CardUid {
        self.uid
    }

    pub(crate) fn set_uid(&mut self, uid: CardUid) {
        self.uid = uid;
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn card_type(&self) -> CardType {
        self.card_type
    }

    #[must_use]
    pub fn mana_cost(&self) -> &Value {
        &self.mana_cost
    }

    pub(crate) fn mana_cost_mut(&mut self) -> &mut Value {
        &mut self.mana_cost
    }

    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub(crate) fn actions_mut(&mut self) -> &mut [Action] {
        &mut self.actions
    }

    #[must_use]
    pub fn upgrade_count(&self) -> u32 {
        self.upgrade_count
    }

    /// Memoize and return the cost this card will be played for.
    pub fn peek_cost(&mut self, rng: &mut GameRng) -> i32 {
        self.mana_cost.peek(rng)
    }

    /// The cost used for playability checks.
    #[must_use]
    pub fn current_cost(&self) -> i32 {
        self.mana_cost.nominal()
    }

    /// Upgrade the cost and every action value. Upgrades only accumulate.
    pub fn upgrade(&mut self, times: u32) {
        if times == 0 {
            return;
        }
        self.upgrade_count = self.upgrade_count.saturating_add(times);
        self.mana_cost.upgrade(times);
        for action in &mut self.actions {
            action.upgrade(times);
        }
    }

    /// Full description: name, cost and actions.
    #[must_use]
    pub fn describe(&self) -> String {
        let actions: Vec<String> = self.actions.iter().map(ToString::to_string).collect();
        format!("{} ({}): {}", self, self.mana_cost, actions.join(", "))
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.upgrade_count {
            0 => write!(f, "{}", self.name),
            1 => write!(f, "{}+", self.name),
            n => write!(f, "{}+{}", self.name, n),
        }
    }
}
