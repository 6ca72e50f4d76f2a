//! Adapter for text-driven decision makers.
//!
//! A `PromptedBot` renders each decision as a numbered list, hands the text
//! to a responder closure (a human at a terminal, a language model client,
//! a script) and reads the first integer out of the reply. Replies that do
//! not parse or name an index outside the list are retried a bounded number
//! of times and tallied in [`ResponseStats`]; when every attempt fails the
//! bot falls back to ending the turn, or to the first candidate for targets.
//!
//! ```
//! use card_battler::bots::PromptedBot;
//!
//! let bot = PromptedBot::new("scripted", |_prompt: &str| "I pick 0".to_string());
//! assert_eq!(bot.stats().prompts, 0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::battle::{BattleState, PlayerChoice};
use crate::core::error::Result;
use crate::core::{AgentId, BattleConfig, CardUid};

use super::bot::{Bot, TargetChooser};

/// Default number of attempts per decision.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Diagnostics about the responder's replies.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseStats {
    pub prompts: u32,
    /// Replies without a number.
    pub malformed: u32,
    /// Replies naming an index outside the list.
    pub out_of_range: u32,
    /// Decisions settled by the fallback.
    pub fallbacks: u32,
}

/// Bot driven by a text responder.
pub struct PromptedBot<R> {
    name: String,
    responder: R,
    max_attempts: u32,
    stats: ResponseStats,
}

impl<R: FnMut(&str) -> String> PromptedBot<R> {
    #[must_use]
    pub fn new(name: impl Into<String>, responder: R) -> Self {
        Self {
            name: name.into(),
            responder,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            stats: ResponseStats::default(),
        }
    }

    /// Attempts per decision before falling back. At least one.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    #[must_use]
    pub fn stats(&self) -> &ResponseStats {
        &self.stats
    }

    /// Ask until the reply names an index below `count`.
    fn ask(&mut self, prompt: &str, count: usize) -> Option<usize> {
        for _ in 0..self.max_attempts {
            self.stats.prompts += 1;
            let reply = (self.responder)(prompt);
            match parse_index(&reply) {
                Some(index) if index < count => return Some(index),
                Some(_) => self.stats.out_of_range += 1,
                None => self.stats.malformed += 1,
            }
        }
        None
    }

    fn choose_from<T: Copy>(&mut self, prompt: &str, candidates: &[T]) -> Option<T> {
        if let Some(index) = self.ask(prompt, candidates.len()) {
            return candidates.get(index).copied();
        }
        self.stats.fallbacks += 1;
        warn!(bot = %self.name, attempts = self.max_attempts, "no usable reply, taking first candidate");
        candidates.first().copied()
    }
}

/// The first run of ASCII digits in `reply`.
fn parse_index(reply: &str) -> Option<usize> {
    let start = reply.find(|c: char| c.is_ascii_digit())?;
    let digits: String = reply[start..].chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

fn card_prompt(battle: &BattleState, options: &[PlayerChoice]) -> String {
    let mut prompt = format!("{battle}\n\nChoose an option:\n");
    for (i, option) in options.iter().enumerate() {
        let line = match option {
            PlayerChoice::PlayCard(index) => battle
                .hand()
                .get(*index)
                .map_or_else(|| option.to_string(), |card| card.describe()),
            PlayerChoice::EndTurn => option.to_string(),
        };
        prompt.push_str(&format!("{i}: {line}\n"));
    }
    prompt
}

impl<R: FnMut(&str) -> String> TargetChooser for PromptedBot<R> {
    fn choose_agent_target(&mut self, battle: &BattleState, list_name: &str, candidates: &[AgentId]) -> Option<AgentId> {
        let mut prompt = format!("Choose a target from {list_name}:\n");
        for (i, id) in candidates.iter().enumerate() {
            match battle.agent(*id) {
                Some(agent) => prompt.push_str(&format!("{i}: {agent}\n")),
                None => prompt.push_str(&format!("{i}: {id}\n")),
            }
        }
        self.choose_from(&prompt, candidates)
    }

    fn choose_card_target(&mut self, battle: &BattleState, list_name: &str, candidates: &[CardUid]) -> Option<CardUid> {
        let mut prompt = format!("Choose a card from {list_name}:\n");
        for (i, uid) in candidates.iter().enumerate() {
            match battle.find_card(*uid) {
                Some(card) => prompt.push_str(&format!("{i}: {}\n", card.describe())),
                None => prompt.push_str(&format!("{i}: {uid}\n")),
            }
        }
        self.choose_from(&prompt, candidates)
    }
}

impl<R: FnMut(&str) -> String> Bot for PromptedBot<R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_card(&mut self, _ctx: &BattleConfig, battle: &BattleState) -> Result<PlayerChoice> {
        let options = battle.player_options();
        let prompt = card_prompt(battle, &options);
        if let Some(index) = self.ask(&prompt, options.len()) {
            return Ok(options[index]);
        }
        self.stats.fallbacks += 1;
        warn!(bot = %self.name, attempts = self.max_attempts, "no usable reply, ending turn");
        Ok(PlayerChoice::EndTurn)
    }
}
