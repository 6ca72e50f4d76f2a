//! Game content built on the engine.

pub mod starter;
