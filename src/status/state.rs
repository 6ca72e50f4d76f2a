//! Per-agent status effect collection.
//!
//! ## Lifecycle
//!
//! 1. `apply` appends a new object and runs the definition's stacking policy
//!    over every live object of that definition.
//! 2. `end_turn` moves every value through its end-of-turn policy, then runs
//!    the cleanup pass.
//! 3. `remove` marks every object of a definition for purging. Marked objects
//!    stop counting immediately and are dropped by the next cleanup pass.
//! 4. `clean_up` drops marked objects and objects whose done predicate holds.

use std::hash::{Hash, Hasher};

use crate::core::config::MAX_STATUS;
use crate::core::error::{BattleError, Result};

use super::definition::{StackPolicy, StatusEffectDefinition};

/// One application of a status effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusEffectObject {
    pub definition: &'static StatusEffectDefinition,
    pub value: i32,
    purged: bool,
}

impl StatusEffectObject {
    fn new(definition: &'static StatusEffectDefinition, value: i32) -> Self {
        Self { definition, value, purged: false }
    }

    /// Whether this object still counts.
    #[must_use]
    pub fn is_live(&self) -> bool {
        !self.purged
    }

    fn is_finished(&self) -> bool {
        self.purged || self.definition.is_done(self.value)
    }
}

/// All status effects currently attached to an agent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusEffectState {
    objects: Vec<StatusEffectObject>,
}

impl StatusEffectState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `amount` of `definition`.
    pub fn apply(&mut self, definition: &'static StatusEffectDefinition, amount: i32) -> Result<()> {
        if amount < 0 {
            return Err(BattleError::NegativeAmount { kind: "status", amount });
        }
        self.objects.push(StatusEffectObject::new(definition, amount));
        self.stack(definition);
        Ok(())
    }

    fn stack(&mut self, definition: &'static StatusEffectDefinition) {
        match definition.stacking {
            StackPolicy::Unique => {}
            StackPolicy::NoStack => {
                let mut seen = false;
                self.objects.retain(|o| {
                    if !o.is_live() || o.definition != definition {
                        return true;
                    }
                    let keep = !seen;
                    seen = true;
                    keep
                });
            }
            StackPolicy::SumCapped => {
                let total = self.live(definition).fold(0, |sum: i32, o| sum.saturating_add(o.value));
                let mut first = true;
                self.objects.retain_mut(|o| {
                    if !o.is_live() || o.definition != definition {
                        return true;
                    }
                    if first {
                        first = false;
                        o.value = total.min(MAX_STATUS);
                        true
                    } else {
                        false
                    }
                });
            }
        }
    }

    fn live(&self, definition: &StatusEffectDefinition) -> impl Iterator<Item = &StatusEffectObject> + '_ {
        let name = definition.name;
        self.objects
            .iter()
            .filter(move |o| o.is_live() && o.definition.name == name)
    }

    /// Summed value of the live objects of `definition` (0 if absent).
    #[must_use]
    pub fn get(&self, definition: &StatusEffectDefinition) -> i32 {
        self.live(definition).fold(0, |sum, o| sum.saturating_add(o.value))
    }

    /// Whether a live object of `definition` with a positive value exists.
    #[must_use]
    pub fn has(&self, definition: &StatusEffectDefinition) -> bool {
        self.get(definition) > 0
    }

    /// Live objects of `definition`, in application order.
    pub fn instances<'a>(
        &'a self,
        definition: &'a StatusEffectDefinition,
    ) -> impl Iterator<Item = &'a StatusEffectObject> + 'a {
        self.live(definition)
    }

    /// Mark every object of `definition` for purging.
    pub fn remove(&mut self, definition: &StatusEffectDefinition) {
        for object in self.objects.iter_mut().filter(|o| o.definition.name == definition.name) {
            object.purged = true;
        }
    }

    /// Run every end-of-turn policy, then clean up.
    pub fn end_turn(&mut self) {
        for object in self.objects.iter_mut().filter(|o| o.is_live()) {
            object.value = object.definition.next_value(object.value);
        }
        self.clean_up();
    }

    /// Drop marked and finished objects.
    pub fn clean_up(&mut self) {
        self.objects.retain(|o| !o.is_finished());
    }

    /// Every object, live or marked, in application order.
    pub fn iter(&self) -> impl Iterator<Item = &StatusEffectObject> {
        self.objects.iter()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Hash for StatusEffectState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut entries: Vec<(&str, i32)> = self
            .objects
            .iter()
            .filter(|o| o.is_live())
            .map(|o| (o.definition.name, o.value))
            .collect();
        entries.sort_unstable();
        entries.hash(state);
    }
}

impl std::fmt::Display for StatusEffectState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for object in self.objects.iter().filter(|o| o.is_live() && !o.definition.hidden) {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{}:{}", object.definition.name, object.value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::definition::{repo, DonePolicy, EndTurnPolicy};

    static HIDDEN_COUNTER: StatusEffectDefinition = StatusEffectDefinition {
        name: "HiddenCounter",
        stacking: StackPolicy::SumCapped,
        end_turn: EndTurnPolicy::Increase(1),
        done: DonePolicy::Never,
        hidden: true,
    };

    static FLASH: StatusEffectDefinition = StatusEffectDefinition {
        name: "Flash",
        stacking: StackPolicy::Unique,
        end_turn: EndTurnPolicy::NoChange,
        done: DonePolicy::Immediate,
        hidden: false,
    };

    #[test]
    fn test_sum_stacking_caps() {
        let mut state = StatusEffectState::new();
        state.apply(&repo::STRENGTH, 2).unwrap();
        state.apply(&repo::STRENGTH, 3).unwrap();
        assert_eq!(state.get(&repo::STRENGTH), 5);
        assert_eq!(state.instances(&repo::STRENGTH).count(), 1);

        state.apply(&repo::STRENGTH, MAX_STATUS).unwrap();
        assert_eq!(state.get(&repo::STRENGTH), MAX_STATUS);
    }

    #[test]
    fn test_huge_amount_saturates_at_cap() {
        let mut state = StatusEffectState::new();
        state.apply(&repo::STRENGTH, 1).unwrap();
        state.apply(&repo::STRENGTH, i32::MAX).unwrap();
        assert_eq!(state.get(&repo::STRENGTH), MAX_STATUS);

        state.apply(&repo::BOMB, i32::MAX).unwrap();
        state.apply(&repo::BOMB, i32::MAX).unwrap();
        assert_eq!(state.get(&repo::BOMB), i32::MAX);
    }

    #[test]
    fn test_no_stack_keeps_earliest() {
        let mut state = StatusEffectState::new();
        state.apply(&repo::ENTANGLE, 1).unwrap();
        state.apply(&repo::ENTANGLE, 5).unwrap();
        assert_eq!(state.get(&repo::ENTANGLE), 1);
    }

    #[test]
    fn test_unique_keeps_every_instance() {
        let mut state = StatusEffectState::new();
        state.apply(&repo::BOMB, 3).unwrap();
        state.apply(&repo::BOMB, 2).unwrap();
        let values: Vec<_> = state.instances(&repo::BOMB).map(|o| o.value).collect();
        assert_eq!(values, vec![3, 2]);
    }

    #[test]
    fn test_negative_amount_is_rejected() {
        let mut state = StatusEffectState::new();
        assert_eq!(
            state.apply(&repo::WEAK, -1),
            Err(BattleError::NegativeAmount { kind: "status", amount: -1 })
        );
        assert!(state.is_empty());
    }

    #[test]
    fn test_end_turn_decrements_and_purges() {
        let mut state = StatusEffectState::new();
        state.apply(&repo::VULNERABLE, 1).unwrap();
        state.apply(&repo::WEAK, 2).unwrap();
        state.end_turn();
        assert_eq!(state.get(&repo::VULNERABLE), 0);
        assert_eq!(state.instances(&repo::VULNERABLE).count(), 0);
        assert_eq!(state.get(&repo::WEAK), 1);
    }

    #[test]
    fn test_remove_takes_effect_before_cleanup() {
        let mut state = StatusEffectState::new();
        state.apply(&repo::VIGOR, 8).unwrap();
        state.remove(&repo::VIGOR);
        assert_eq!(state.get(&repo::VIGOR), 0);
        assert!(!state.is_empty());

        state.apply(&repo::VIGOR, 2).unwrap();
        assert_eq!(state.get(&repo::VIGOR), 2);

        state.clean_up();
        assert_eq!(state.iter().count(), 1);
    }

    #[test]
    fn test_increase_never_done_and_immediate() {
        let mut state = StatusEffectState::new();
        state.apply(&HIDDEN_COUNTER, 0).unwrap();
        state.apply(&FLASH, 4).unwrap();
        assert_eq!(state.get(&FLASH), 4);

        state.end_turn();
        assert_eq!(state.get(&HIDDEN_COUNTER), 1);
        assert_eq!(state.get(&FLASH), 0);
    }

    #[test]
    fn test_display_hides_hidden_effects() {
        let mut state = StatusEffectState::new();
        state.apply(&HIDDEN_COUNTER, 3).unwrap();
        state.apply(&repo::WEAK, 1).unwrap();
        state.apply(&repo::STRENGTH, 2).unwrap();
        assert_eq!(state.to_string(), "Weak:1, Strength:2");
    }

    #[test]
    fn test_hash_ignores_application_order() {
        use rustc_hash::FxHasher;

        let mut a = StatusEffectState::new();
        a.apply(&repo::WEAK, 1).unwrap();
        a.apply(&repo::STRENGTH, 2).unwrap();
        let mut b = StatusEffectState::new();
        b.apply(&repo::STRENGTH, 2).unwrap();
        b.apply(&repo::WEAK, 1).unwrap();

        let hash = |s: &StatusEffectState| {
            let mut hasher = FxHasher::default();
            s.hash(&mut hasher);
            hasher.finish()
        };
        assert_eq!(hash(&a), hash(&b));
    }
}
