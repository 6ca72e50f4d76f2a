//! Status effects: definitions, the per-agent state machine, and the event
//! subscribers that give the built-in effects their meaning.

pub mod definition;
pub mod state;
pub mod modifiers;

pub use definition::{repo, DonePolicy, EndTurnPolicy, StackPolicy, StatusEffectDefinition};
pub use state::{StatusEffectObject, StatusEffectState};
