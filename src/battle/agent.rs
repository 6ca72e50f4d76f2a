//! Combatants.
//!
//! Health stays within `0..=max_health` and block within `0..=MAX_BLOCK`.
//! Damage is absorbed by block first; an agent at zero health is dead.

use crate::actions::Action;
use crate::core::config::MAX_BLOCK;
use crate::core::error::{BattleError, Result};
use crate::core::{AgentId, GameRng, ItemSet};
use crate::status::{StatusEffectDefinition, StatusEffectState};

/// Health, block and status effects of one combatant.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Agent {
    id: AgentId,
    name: String,
    max_health: i32,
    health: i32,
    block: i32,
    status: StatusEffectState,
}

impl Agent {
    /// A fresh agent at full health.
    ///
    /// # Panics
    ///
    /// Panics if `max_health` is not positive.
    #[must_use]
    pub fn new(name: impl Into<String>, max_health: i32) -> Self {
        assert!(max_health > 0, "Agent must have positive max health");
        Self {
            id: AgentId::PLAYER,
            name: name.into(),
            max_health,
            health: max_health,
            block: 0,
            status: StatusEffectState::new(),
        }
    }

    /// Start the battle at `health` instead of full health.
    #[must_use]
    pub fn with_health(mut self, health: i32) -> Self {
        self.health = health.clamp(0, self.max_health);
        self
    }

    #[must_use]
    pub fn id(&self) -> AgentId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: AgentId) {
        self.id = id;
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn health(&self) -> i32 {
        self.health
    }

    #[must_use]
    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    #[must_use]
    pub fn block(&self) -> i32 {
        self.block
    }

    #[must_use]
    pub fn status(&self) -> &StatusEffectState {
        &self.status
    }

    pub fn status_mut(&mut self) -> &mut StatusEffectState {
        &mut self.status
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Take `amount` damage, block first. Returns the health lost.
    pub fn take_damage(&mut self, amount: i32) -> Result<i32> {
        if amount < 0 {
            return Err(BattleError::NegativeAmount { kind: "damage", amount });
        }
        Ok(self.absorb_damage(amount))
    }

    pub(crate) fn absorb_damage(&mut self, amount: i32) -> i32 {
        let amount = amount.max(0);
        let blocked = self.block.min(amount);
        self.block -= blocked;
        let lost = (amount - blocked).min(self.health);
        self.health -= lost;
        lost
    }

    pub fn gain_block(&mut self, amount: i32) -> Result<()> {
        if amount < 0 {
            return Err(BattleError::NegativeAmount { kind: "block", amount });
        }
        self.add_block(amount);
        Ok(())
    }

    pub(crate) fn add_block(&mut self, amount: i32) {
        self.block = self.block.saturating_add(amount.max(0)).min(MAX_BLOCK);
    }

    pub fn clear_block(&mut self) {
        self.block = 0;
    }

    pub fn heal(&mut self, amount: i32) -> Result<()> {
        if amount < 0 {
            return Err(BattleError::NegativeAmount { kind: "heal", amount });
        }
        self.health = self.health.saturating_add(amount).min(self.max_health);
        Ok(())
    }

    pub fn apply_status(&mut self, definition: &'static StatusEffectDefinition, amount: i32) -> Result<()> {
        self.status.apply(definition, amount)
    }
}

impl std::fmt::Display for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-hp:[{}/{}]-block:{}-status:[{}]",
            self.name, self.health, self.max_health, self.block, self.status
        )
    }
}

/// An agent driven by a scripted move pattern.
#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    agent: Agent,
    pattern: ItemSet<Action>,
}

impl Enemy {
    #[must_use]
    pub fn new(name: impl Into<String>, max_health: i32, pattern: ItemSet<Action>) -> Self {
        Self { agent: Agent::new(name, max_health), pattern }
    }

    #[must_use]
    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn agent_mut(&mut self) -> &mut Agent {
        &mut self.agent
    }

    #[must_use]
    pub fn id(&self) -> AgentId {
        self.agent.id
    }

    /// The move this enemy will make next, without committing to it.
    pub fn intention(&mut self, rng: &mut GameRng) -> Option<&Action> {
        self.pattern.peek(rng)
    }

    /// The move already peeked, if any.
    #[must_use]
    pub fn peeked_intention(&self) -> Option<&Action> {
        self.pattern.peeked()
    }

    /// Commit to the next move.
    pub fn next_move(&mut self, rng: &mut GameRng) -> Option<Action> {
        self.pattern.get(rng)
    }
}
