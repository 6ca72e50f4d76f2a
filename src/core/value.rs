//! Numeric value generators used by cards and enemy moves.
//!
//! A `Value` produces an integer on demand. The generated number is memoized
//! between [`Value::peek`] and [`Value::get`], so an intention preview shows
//! exactly the amount that will be used when the action resolves:
//!
//! ```
//! use card_battler::core::{GameRng, Value};
//!
//! let mut rng = GameRng::new(1);
//! let mut damage = Value::range(5, 9);
//!
//! let preview = damage.peek(&mut rng);
//! assert_eq!(damage.peek(&mut rng), preview);
//! assert_eq!(damage.get(&mut rng), preview);
//! assert_eq!(damage.peeked(), None);
//! ```
//!
//! ## Kinds
//!
//! | Kind | Output |
//! |------|--------|
//! | `Const(v)` | `v` |
//! | `Range { low, high }` | uniform in `[low, high]`, resampled after each `get` |
//! | `Upgradable { base, upgraded, threshold }` | `base` until `threshold` upgrades, then `upgraded` |
//! | `Linear { base, step, threshold }` | `base + step * (upgrades / threshold)` |

use serde::{Deserialize, Serialize};

use super::rng::GameRng;

/// How a [`Value`] computes its number.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    Const(i32),
    Range { low: i32, high: i32 },
    Upgradable { base: i32, upgraded: i32, threshold: u32 },
    Linear { base: i32, step: i32, threshold: u32 },
}

/// A memoized integer generator.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Value {
    kind: ValueKind,
    upgrade_count: u32,
    negated: bool,
    memo: Option<i32>,
}

impl Value {
    #[must_use]
    pub fn new(kind: ValueKind) -> Self {
        Self {
            kind,
            upgrade_count: 0,
            negated: false,
            memo: None,
        }
    }

    #[must_use]
    pub fn constant(value: i32) -> Self {
        Self::new(ValueKind::Const(value))
    }

    /// Uniform random value in `[low, high]`.
    #[must_use]
    pub fn range(low: i32, high: i32) -> Self {
        Self::new(ValueKind::Range { low, high })
    }

    /// `base` before the first upgrade, `upgraded` after.
    #[must_use]
    pub fn upgradable(base: i32, upgraded: i32) -> Self {
        Self::upgradable_at(base, upgraded, 1)
    }

    /// `base` until `threshold` upgrades have been applied, `upgraded` after.
    #[must_use]
    pub fn upgradable_at(base: i32, upgraded: i32, threshold: u32) -> Self {
        Self::new(ValueKind::Upgradable { base, upgraded, threshold })
    }

    /// Grows by `step` every `threshold` upgrades.
    #[must_use]
    pub fn linear(base: i32, step: i32, threshold: u32) -> Self {
        Self::new(ValueKind::Linear { base, step, threshold })
    }

    #[must_use]
    pub fn kind(&self) -> &ValueKind {
        &self.kind
    }

    #[must_use]
    pub fn upgrade_count(&self) -> u32 {
        self.upgrade_count
    }

    /// Return the memoized number, sampling it first if needed.
    pub fn peek(&mut self, rng: &mut GameRng) -> i32 {
        let raw = match self.memo {
            Some(raw) => raw,
            None => {
                let raw = self.sample(rng);
                self.memo = Some(raw);
                raw
            }
        };
        self.sign(raw)
    }

    /// Return the number and clear the memo.
    pub fn get(&mut self, rng: &mut GameRng) -> i32 {
        let value = self.peek(rng);
        self.memo = None;
        value
    }

    /// The memoized number, if one has been peeked since the last `get`.
    #[must_use]
    pub fn peeked(&self) -> Option<i32> {
        self.memo.map(|raw| self.sign(raw))
    }

    /// The number this value produces without randomness.
    ///
    /// Range values report their memo if present, otherwise their lower bound.
    #[must_use]
    pub fn nominal(&self) -> i32 {
        if let Some(value) = self.peeked() {
            return value;
        }
        let raw = match self.kind {
            ValueKind::Range { low, high } => low.min(high),
            _ => self.deterministic(),
        };
        self.sign(raw)
    }

    /// Apply `times` upgrades. Upgrades are never undone.
    pub fn upgrade(&mut self, times: u32) {
        self.upgrade_count = self.upgrade_count.saturating_add(times);
        if !matches!(self.kind, ValueKind::Range { .. }) {
            self.memo = None;
        }
    }

    /// The same generator with its output negated.
    #[must_use]
    pub fn negative(&self) -> Self {
        let mut negated = self.clone();
        negated.negated = !self.negated;
        negated
    }

    fn sample(&self, rng: &mut GameRng) -> i32 {
        match self.kind {
            ValueKind::Range { low, high } => rng.gen_inclusive(low, high),
            _ => self.deterministic(),
        }
    }

    fn deterministic(&self) -> i32 {
        match self.kind {
            ValueKind::Const(value) => value,
            ValueKind::Range { low, .. } => low,
            ValueKind::Upgradable { base, upgraded, threshold } => {
                if self.upgrade_count < threshold {
                    base
                } else {
                    upgraded
                }
            }
            ValueKind::Linear { base, step, threshold } => {
                let tiers = self.upgrade_count / threshold.max(1);
                base.saturating_add(step.saturating_mul(tiers as i32))
            }
        }
    }

    fn sign(&self, raw: i32) -> i32 {
        if self.negated {
            -raw
        } else {
            raw
        }
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::constant(value)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.negated { "-" } else { "" };
        match (&self.kind, self.memo) {
            (ValueKind::Range { low, high }, None) => write!(f, "{sign}({low}-{high})"),
            _ => write!(f, "{}", self.nominal()),
        }
    }
}
