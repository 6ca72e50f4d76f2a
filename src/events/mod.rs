//! Before/apply/after events and the battle's standard subscribers.

pub mod bus;
pub mod battle;

pub use bus::{ApplyFn, Event, HookFn, Subscriber};
pub use battle::{AttackContext, BattleEvents, Side, TurnContext};
