//! Core building blocks: identifiers, RNG, configuration, errors, and the
//! memoized generators cards and enemies are built from.

pub mod entity;
pub mod rng;
pub mod config;
pub mod error;
pub mod value;
pub mod item_set;

pub use entity::{AgentId, CardUid};
pub use rng::GameRng;
pub use config::{BattleConfig, MAX_BLOCK, MAX_MANA, MAX_STATUS};
pub use error::{BattleError, Result};
pub use value::{Value, ValueKind};
pub use item_set::{ItemSet, ItemSource, SequenceEntry};
