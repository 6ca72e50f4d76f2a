//! Status effect definitions and the built-in repository.
//!
//! A definition is static data: how new applications stack onto existing
//! ones, how the value changes at the end of the owner's turn, and when the
//! effect is finished. Definitions are compared by name, so every definition
//! must have a unique one.

use crate::core::config::MAX_STATUS;

/// How a new application combines with existing objects of the same definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StackPolicy {
    /// Values are summed into a single object, capped at `MAX_STATUS`.
    SumCapped,
    /// The earliest object is kept; later applications are discarded.
    NoStack,
    /// Every application stays a distinct object.
    Unique,
}

/// How the value changes at the end of the owner's turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EndTurnPolicy {
    /// Decrease by one, floored at zero.
    Decrease,
    /// Drop to zero.
    Reset,
    NoChange,
    /// Increase by a fixed step, capped at `MAX_STATUS`.
    Increase(i32),
}

/// When an object is finished and gets purged at the next cleanup pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DonePolicy {
    ValueZero,
    Never,
    Immediate,
}

/// Static description of a status effect.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct StatusEffectDefinition {
    pub name: &'static str,
    pub stacking: StackPolicy,
    pub end_turn: EndTurnPolicy,
    pub done: DonePolicy,
    /// Hidden effects work normally but are left out of rendered state.
    pub hidden: bool,
}

impl StatusEffectDefinition {
    /// Value after the end-of-turn transition.
    #[must_use]
    pub fn next_value(&self, value: i32) -> i32 {
        match self.end_turn {
            EndTurnPolicy::Decrease => (value - 1).max(0),
            EndTurnPolicy::Reset => 0,
            EndTurnPolicy::NoChange => value,
            EndTurnPolicy::Increase(step) => value.saturating_add(step).min(MAX_STATUS),
        }
    }

    #[must_use]
    pub fn is_done(&self, value: i32) -> bool {
        match self.done {
            DonePolicy::ValueZero => value <= 0,
            DonePolicy::Never => false,
            DonePolicy::Immediate => true,
        }
    }
}

impl std::fmt::Display for StatusEffectDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}

/// Built-in status effects.
pub mod repo {
    use super::{DonePolicy, EndTurnPolicy, StackPolicy, StatusEffectDefinition};

    /// Takes 50% more attack damage.
    pub static VULNERABLE: StatusEffectDefinition = StatusEffectDefinition {
        name: "Vulnerable",
        stacking: StackPolicy::SumCapped,
        end_turn: EndTurnPolicy::Decrease,
        done: DonePolicy::ValueZero,
        hidden: false,
    };

    /// Deals 25% less attack damage.
    pub static WEAK: StatusEffectDefinition = StatusEffectDefinition {
        name: "Weak",
        stacking: StackPolicy::SumCapped,
        end_turn: EndTurnPolicy::Decrease,
        done: DonePolicy::ValueZero,
        hidden: false,
    };

    /// Cannot play attacks this turn.
    pub static ENTANGLE: StatusEffectDefinition = StatusEffectDefinition {
        name: "Entangle",
        stacking: StackPolicy::NoStack,
        end_turn: EndTurnPolicy::Reset,
        done: DonePolicy::ValueZero,
        hidden: false,
    };

    /// Adds its value to every attack.
    pub static STRENGTH: StatusEffectDefinition = StatusEffectDefinition {
        name: "Strength",
        stacking: StackPolicy::SumCapped,
        end_turn: EndTurnPolicy::NoChange,
        done: DonePolicy::ValueZero,
        hidden: false,
    };

    /// Adds its value to the next attack, then is consumed.
    pub static VIGOR: StatusEffectDefinition = StatusEffectDefinition {
        name: "Vigor",
        stacking: StackPolicy::SumCapped,
        end_turn: EndTurnPolicy::NoChange,
        done: DonePolicy::ValueZero,
        hidden: false,
    };

    /// Gains its value in block at the end of the owner's turn.
    pub static METALLICIZE: StatusEffectDefinition = StatusEffectDefinition {
        name: "Metallicize",
        stacking: StackPolicy::SumCapped,
        end_turn: EndTurnPolicy::NoChange,
        done: DonePolicy::ValueZero,
        hidden: false,
    };

    /// Counts down each turn; deals [`BOMB_DAMAGE`] to every opponent when it
    /// reaches zero. Each bomb ticks independently.
    pub static BOMB: StatusEffectDefinition = StatusEffectDefinition {
        name: "Bomb",
        stacking: StackPolicy::Unique,
        end_turn: EndTurnPolicy::Decrease,
        done: DonePolicy::ValueZero,
        hidden: false,
    };

    /// Damage a bomb deals when it goes off.
    pub const BOMB_DAMAGE: i32 = 40;
}
