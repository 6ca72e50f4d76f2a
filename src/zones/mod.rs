//! Card piles: draw, hand, discard and exhaust.

pub mod piles;

pub use piles::{CardPiles, PileKind};
