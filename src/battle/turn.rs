//! The turn state machine.
//!
//! ```text
//! TurnStart -> PlayerActing -> EnemyActing(id)... -> TurnEnd -> TurnStart
//! ```
//!
//! - **Turn start**: turn counter up, mana refilled, player side-turn
//!   `before` hooks, hand drawn.
//! - **Player side**: one decision per [`BattleState::tick_player`] until a
//!   decision ends the turn. Then the hand is discarded, the player side-turn
//!   `after` hooks run, player statuses tick and enemy block is cleared.
//! - **Enemy side**: each living enemy, in encounter order, resolves its
//!   scripted move followed by an end-turn. Then enemy side-turn `after`
//!   hooks run, enemy statuses tick and player block is cleared.
//!
//! Cleanup runs after every decision and every enemy move, and the end
//! condition is checked after each of them.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::actions::Action;
use crate::bots::{Bot, FirstCandidate, TargetChooser};
use crate::core::error::{BattleError, Result};
use crate::core::AgentId;
use crate::events::{Side, TurnContext};

use super::state::{BattleResult, BattleState, TurnPhase};

/// A decision the player can make.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerChoice {
    /// Play the card at this hand index.
    PlayCard(usize),
    EndTurn,
}

impl PlayerChoice {
    #[must_use]
    pub fn into_action(self) -> Action {
        match self {
            PlayerChoice::PlayCard(index) => Action::PlayCard(index),
            PlayerChoice::EndTurn => Action::EndAgentTurn,
        }
    }
}

impl std::fmt::Display for PlayerChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.into_action())
    }
}

/// What a single player decision led to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// The player is still acting.
    Continue,
    /// The turn ended; the enemies acted and the next turn has started.
    TurnEnded,
    Finished(BattleResult),
}

impl BattleState {
    /// Run the first turn start if it has not run yet.
    pub fn start(&mut self) {
        if self.phase == TurnPhase::TurnStart {
            self.start_turn();
        }
    }

    fn start_turn(&mut self) {
        self.turn += 1;
        self.mana = self.config.max_mana;
        self.phase = TurnPhase::TurnStart;

        let events = Arc::clone(&self.events);
        events.side_turn.broadcast_before(&TurnContext { side: Side::Player }, self);

        let drawn = self.piles.draw(self.config.draw_count, &mut self.rng);
        debug!(turn = self.turn, drawn, mana = self.mana, "turn started");
        self.phase = TurnPhase::PlayerActing;
    }

    /// Legal decisions: every playable hand index, then ending the turn.
    /// Empty once the battle is over.
    #[must_use]
    pub fn player_options(&self) -> Vec<PlayerChoice> {
        if self.is_over() {
            return Vec::new();
        }
        let mut options: Vec<PlayerChoice> = self
            .playable_indices()
            .into_iter()
            .map(PlayerChoice::PlayCard)
            .collect();
        options.push(PlayerChoice::EndTurn);
        options
    }

    /// Advance exactly one player decision.
    ///
    /// When the decision ends the player's turn, the whole enemy side and the
    /// next turn start run before this returns.
    pub fn tick_player<C: TargetChooser + ?Sized>(&mut self, choice: PlayerChoice, chooser: &mut C) -> Result<Tick> {
        if self.is_over() {
            return Err(BattleError::BattleOver);
        }
        self.start();

        let description = match choice {
            PlayerChoice::PlayCard(index) => self.hand().get(index).map(|card| card.describe()),
            PlayerChoice::EndTurn => None,
        };
        let mut action = choice.into_action();
        self.resolve(&mut action, AgentId::PLAYER, chooser)?;
        self.last_action = Some((AgentId::PLAYER, description.unwrap_or_else(|| action.to_string())));
        self.clean_up();

        if let Some(result) = self.result() {
            return Ok(Tick::Finished(result));
        }
        if !self.agent_turn_ended {
            return Ok(Tick::Continue);
        }

        self.finish_player_side();
        self.enemy_side()?;
        if let Some(result) = self.result() {
            return Ok(Tick::Finished(result));
        }

        self.start_turn();
        match self.result() {
            Some(result) => Ok(Tick::Finished(result)),
            None => Ok(Tick::TurnEnded),
        }
    }

    fn finish_player_side(&mut self) {
        self.piles.discard_hand();

        let events = Arc::clone(&self.events);
        events.side_turn.broadcast_after(&TurnContext { side: Side::Player }, self);

        self.player.status_mut().end_turn();
        for enemy in &mut self.enemies {
            enemy.agent_mut().clear_block();
        }
        self.agent_turn_ended = false;
        self.clean_up();
    }

    fn enemy_side(&mut self) -> Result<()> {
        let events = Arc::clone(&self.events);
        if self.result().is_none() {
            events.side_turn.broadcast_before(&TurnContext { side: Side::Enemies }, self);
        }

        for id in self.living_enemy_ids() {
            if self.is_over() {
                break;
            }
            if self.agent(id).map_or(true, |agent| agent.is_dead()) {
                continue;
            }

            self.phase = TurnPhase::EnemyActing(id);
            self.agent_turn_ended = false;
            while !self.agent_turn_ended && !self.is_over() {
                let Some(enemy) = self.enemies.iter_mut().find(|e| e.id() == id) else {
                    break;
                };
                let mut action = enemy
                    .next_move(&mut self.rng)
                    .unwrap_or(Action::NoAction)
                    .and(Action::EndAgentTurn);
                debug!(turn = self.turn, agent = %id, action = %action, "enemy acts");

                self.last_action = Some((id, action.to_string()));
                self.resolve(&mut action, id, &mut FirstCandidate)?;
                self.clean_up();
            }
            self.agent_turn_ended = false;
        }

        if self.result().is_none() {
            events.side_turn.broadcast_after(&TurnContext { side: Side::Enemies }, self);
            for enemy in &mut self.enemies {
                enemy.agent_mut().status_mut().end_turn();
            }
            self.player.clear_block();
            self.clean_up();
        }
        self.phase = TurnPhase::TurnEnd;
        Ok(())
    }

    /// Play the battle to the end with `bot` making every player decision.
    pub fn run<B: Bot + ?Sized>(&mut self, bot: &mut B) -> Result<BattleResult> {
        self.start();
        loop {
            if let Some(result) = self.result() {
                info!(
                    bot = bot.name(),
                    ?result,
                    turn = self.turn,
                    health = self.player.health(),
                    "battle finished"
                );
                return Ok(result);
            }
            let choice = bot.choose_card(&self.config, self)?;
            self.tick_player(choice, bot)?;
        }
    }
}
