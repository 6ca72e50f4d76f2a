//! Depth-bounded look-ahead search.
//!
//! ## Algorithm
//!
//! For every legal option at a decision point:
//! 1. Branch the battle with [`BattleState::clone_undeterministic`], which
//!    reshuffles the draw pile so the search cannot peek at the real order.
//! 2. Apply the option with [`BattleState::tick_player`].
//! 3. If the tick ended the turn or the battle, score the branch with the
//!    heuristic. Otherwise search it again one level shallower.
//!
//! At the depth limit a state is scored with the heuristic, or with the
//! average of several random playouts when `rollouts > 0`. An option only
//! replaces the current best when its value is strictly greater, so ties
//! keep the first option seen.
//!
//! ## Memoization
//!
//! Recursive results are keyed by `(content_hash, depth)`. The content hash
//! ignores pile order, so states that differ only in shuffle order share an
//! entry. The table lives as long as the bot: use one bot per encounter.
//!
//! ## Heuristic
//!
//! `player health - sum(enemy health)`, plus `win_bonus` for a won state and
//! minus `loss_penalty` for a lost one.

use std::time::Instant;

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::battle::{BattleResult, BattleState, PlayerChoice, Tick};
use crate::core::error::{BattleError, Result};
use crate::core::{AgentId, BattleConfig, CardUid, GameRng};

use super::bot::{Bot, FirstCandidate, TargetChooser};
use super::config::SearchConfig;
use super::stats::SearchStats;

/// Look-ahead search bot.
///
/// Targets are picked with [`FirstCandidate`], both in real play and inside
/// branches, so searched lines replay exactly.
#[derive(Clone, Debug)]
pub struct BacktrackBot {
    config: SearchConfig,
    rng: GameRng,
    memo: FxHashMap<(u64, u32), i64>,
    stats: SearchStats,
}

impl BacktrackBot {
    #[must_use]
    pub fn new(config: SearchConfig) -> Self {
        let rng = GameRng::new(config.seed);
        Self {
            config,
            rng,
            memo: FxHashMap::default(),
            stats: SearchStats::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Number of memo lookups answered from the table.
    #[must_use]
    pub fn hit_count(&self) -> u64 {
        self.stats.memo_hits
    }

    #[must_use]
    pub fn memo_len(&self) -> usize {
        self.memo.len()
    }

    /// Forget memoized results and statistics.
    pub fn reset(&mut self) {
        self.memo.clear();
        self.stats.reset();
    }

    /// Heuristic value of `battle`.
    #[must_use]
    pub fn evaluate(&self, battle: &BattleState) -> i64 {
        let enemy_health: i64 = battle.enemies().iter().map(|e| i64::from(e.agent().health())).sum();
        let mut value = i64::from(battle.player().health()) - enemy_health;
        match battle.result() {
            Some(BattleResult::Win) => value += self.config.win_bonus,
            Some(BattleResult::Loss) => value -= self.config.loss_penalty,
            None => {}
        }
        value
    }

    /// Best option for `battle` and its value. `battle` is never modified.
    pub fn search(&mut self, battle: &BattleState) -> Result<(PlayerChoice, i64)> {
        if self.config.depth == 0 {
            return Err(BattleError::NoLegalOption);
        }
        self.best_option(battle, self.config.depth)?
            .ok_or(BattleError::NoLegalOption)
    }

    fn best_option(&mut self, battle: &BattleState, depth: u32) -> Result<Option<(PlayerChoice, i64)>> {
        self.stats.nodes_expanded += 1;
        self.stats.max_depth = self.stats.max_depth.max(self.config.depth - depth);

        let mut best: Option<(PlayerChoice, i64)> = None;
        for choice in battle.player_options() {
            let mut branch = battle.clone_undeterministic(&mut self.rng);
            let value = match branch.tick_player(choice, &mut FirstCandidate)? {
                Tick::Continue => self.value_at(&branch, depth - 1)?,
                Tick::TurnEnded | Tick::Finished(_) => self.leaf(&branch),
            };
            trace!(depth, %choice, value, "option scored");
            if best.map_or(true, |(_, best_value)| value > best_value) {
                best = Some((choice, value));
            }
        }
        Ok(best)
    }

    fn value_at(&mut self, battle: &BattleState, depth: u32) -> Result<i64> {
        if depth == 0 || battle.is_over() {
            return self.estimate(battle);
        }

        let key = (battle.content_hash(), depth);
        if self.config.memoize {
            if let Some(&value) = self.memo.get(&key) {
                self.stats.memo_hits += 1;
                return Ok(value);
            }
            self.stats.memo_misses += 1;
        }

        let value = match self.best_option(battle, depth)? {
            Some((_, value)) => value,
            None => self.leaf(battle),
        };
        if self.config.memoize {
            self.memo.insert(key, value);
        }
        Ok(value)
    }

    fn leaf(&mut self, battle: &BattleState) -> i64 {
        self.stats.leaf_evaluations += 1;
        self.evaluate(battle)
    }

    fn estimate(&mut self, battle: &BattleState) -> Result<i64> {
        if self.config.rollouts == 0 || battle.is_over() {
            return Ok(self.leaf(battle));
        }
        let mut total = 0;
        for _ in 0..self.config.rollouts {
            total += self.rollout(battle)?;
        }
        Ok(total / i64::from(self.config.rollouts))
    }

    /// Play random options until the turn or the battle ends.
    fn rollout(&mut self, battle: &BattleState) -> Result<i64> {
        self.stats.rollouts += 1;
        let mut branch = battle.clone_undeterministic(&mut self.rng);
        for _ in 0..self.config.max_rollout_steps {
            let options = branch.player_options();
            let Some(&choice) = self.rng.choose(&options) else {
                break;
            };
            if branch.tick_player(choice, &mut FirstCandidate)? != Tick::Continue {
                break;
            }
        }
        Ok(self.leaf(&branch))
    }
}

impl TargetChooser for BacktrackBot {
    fn choose_agent_target(&mut self, battle: &BattleState, list_name: &str, candidates: &[AgentId]) -> Option<AgentId> {
        FirstCandidate.choose_agent_target(battle, list_name, candidates)
    }

    fn choose_card_target(&mut self, battle: &BattleState, list_name: &str, candidates: &[CardUid]) -> Option<CardUid> {
        FirstCandidate.choose_card_target(battle, list_name, candidates)
    }
}

impl Bot for BacktrackBot {
    fn name(&self) -> &str {
        "backtrack"
    }

    fn choose_card(&mut self, _ctx: &BattleConfig, battle: &BattleState) -> Result<PlayerChoice> {
        let start = Instant::now();
        self.stats.decisions += 1;
        let (choice, value) = self.search(battle)?;
        self.stats.time_us += start.elapsed().as_micros() as u64;
        trace!(turn = battle.turn(), %choice, value, memo = self.memo.len(), "search finished");
        Ok(choice)
    }
}
