//! Actions, effects, target selectors and their resolution.

pub mod action;
pub mod targeting;
mod resolver;

pub use action::{Action, AgentEffect, CardEffect};
pub use targeting::{AgentSet, AgentTarget, CardTarget};
