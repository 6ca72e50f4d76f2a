//! Cards: a name, a type, a cost and an ordered list of actions.

pub mod card;

pub use card::{Card, CardType};
