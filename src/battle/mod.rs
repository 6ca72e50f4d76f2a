//! Combatants, battle state and the turn state machine.

pub mod agent;
pub mod state;
pub mod turn;
pub mod snapshot;

pub use agent::{Agent, Enemy};
pub use state::{BattleResult, BattleState, TurnPhase};
pub use turn::{PlayerChoice, Tick};
