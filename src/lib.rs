//! # card-battler
//!
//! A turn-based deck-building card battle simulator with look-ahead bots.
//!
//! ## Design Principles
//!
//! 1. **Closed effect algebra**: actions, agent effects and card effects are
//!    sum types built with `and` / `to` and resolved by one dispatch.
//!
//! 2. **Explicit modifier bus**: attack damage and turn boundaries run
//!    through before/apply/after events with a documented subscriber order.
//!
//! 3. **Cheap branching**: piles are persistent vectors and the event bus is
//!    shared, so search can clone a battle per option.
//!
//! 4. **Injected decisions**: bots and target choosers are passed to the
//!    driver, never stored in the state.
//!
//! ## Modules
//!
//! - `core`: ids, RNG, configuration, errors, value and item generators
//! - `status`: status effect definitions, per-agent state, modifiers
//! - `events`: generic event bus and the battle's events
//! - `actions`: action algebra, target selectors, resolution
//! - `cards`: card instances
//! - `zones`: draw, hand, discard and exhaust piles
//! - `battle`: agents, battle state, turn state machine, snapshots
//! - `bots`: search, random and prompted decision makers
//! - `games`: starter content

pub mod core;
pub mod status;
pub mod events;
pub mod actions;
pub mod cards;
pub mod zones;
pub mod battle;
pub mod bots;
pub mod games;

// Re-export commonly used types
pub use crate::core::{AgentId, BattleConfig, BattleError, CardUid, GameRng, ItemSet, Result, Value};

pub use crate::status::{repo, StatusEffectDefinition, StatusEffectState};

pub use crate::events::{BattleEvents, Event};

pub use crate::actions::{Action, AgentEffect, AgentSet, AgentTarget, CardEffect, CardTarget};

pub use crate::cards::{Card, CardType};

pub use crate::zones::{CardPiles, PileKind};

pub use crate::battle::{Agent, BattleResult, BattleState, Enemy, PlayerChoice, Tick, TurnPhase};

pub use crate::bots::{BacktrackBot, Bot, FirstCandidate, PromptedBot, RandomBot, SearchConfig, SearchStats, TargetChooser};
