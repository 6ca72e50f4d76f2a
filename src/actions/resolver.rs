//! Action resolution.
//!
//! Resolution is a single dispatch over the action tree. Target selectors
//! are resolved once per bound effect into an ordered candidate list, then
//! the effect runs against each candidate in list order. A composite effect
//! runs all of its parts against one candidate before moving to the next.
//!
//! Values are consumed with `get` as they resolve, so a value peeked for an
//! intention preview is exactly the value applied.

use std::sync::Arc;

use smallvec::SmallVec;
use tracing::debug;

use crate::battle::state::ActingCard;
use crate::battle::BattleState;
use crate::bots::TargetChooser;
use crate::core::error::{BattleError, Result};
use crate::core::{AgentId, CardUid, Value};
use crate::events::AttackContext;

use super::action::{Action, AgentEffect, CardEffect};
use super::targeting::{AgentSet, AgentTarget, CardTarget};

type AgentTargets = SmallVec<[AgentId; 4]>;
type CardTargets = SmallVec<[CardUid; 4]>;

impl BattleState {
    /// Resolve `action` on behalf of `by`.
    ///
    /// Choosing selectors ask `chooser`; it is never asked to pick from an
    /// empty list.
    pub fn resolve<C: TargetChooser + ?Sized>(
        &mut self,
        action: &mut Action,
        by: AgentId,
        chooser: &mut C,
    ) -> Result<()> {
        match action {
            Action::AddMana(value) => {
                let delta = value.get(&mut self.rng);
                self.add_mana(delta)
            }
            Action::PlayCard(index) => self.play_card(*index, chooser),
            Action::EndAgentTurn => {
                self.agent_turn_ended = true;
                Ok(())
            }
            Action::NoAction => Ok(()),
            Action::And(actions) => actions.iter_mut().try_for_each(|a| self.resolve(a, by, &mut *chooser)),
            Action::ToAgents { effect, target } => {
                for id in self.agent_targets(*target, by, chooser)? {
                    self.apply_agent_effect(effect, by, id)?;
                }
                Ok(())
            }
            Action::ToCards { effect, target } => {
                for uid in self.card_targets(*target, chooser)? {
                    self.apply_card_effect(effect, uid);
                }
                Ok(())
            }
        }
    }

    /// Play the card at `index` of the hand.
    ///
    /// Mana is spent first, then the card's actions resolve in order with
    /// the player as actor. The card ends up in the exhaust pile if it was
    /// exhausted while resolving, in the power row if it is a power, and in
    /// the discard pile otherwise.
    ///
    /// A failing action stops resolution but the card still settles, so it
    /// never leaves play. Effects that already resolved are kept.
    pub fn play_card<C: TargetChooser + ?Sized>(&mut self, index: usize, chooser: &mut C) -> Result<()> {
        let hand_len = self.piles.hand().len();
        let card = self
            .piles
            .hand()
            .get(index)
            .ok_or(BattleError::CardIndexOutOfRange { index, hand_len })?;
        if !self.can_play(card) {
            return Err(BattleError::CardNotPlayable {
                name: card.name().to_string(),
                cost: card.current_cost(),
                mana: self.mana,
            });
        }

        let mut card = self.piles.take_from_hand(index)?;
        card.peek_cost(&mut self.rng);
        let mut spend = Action::AddMana(card.mana_cost().negative());
        if let Err(err) = self.resolve(&mut spend, AgentId::PLAYER, chooser) {
            self.piles.return_to_hand(index, card);
            return Err(err);
        }
        card.mana_cost_mut().get(&mut self.rng);
        debug!(turn = self.turn, card = %card, mana = self.mana, "card played");

        let previous = self.acting.replace(ActingCard::new(card.clone()));
        let resolved = card
            .actions_mut()
            .iter_mut()
            .try_for_each(|action| self.resolve(action, AgentId::PLAYER, &mut *chooser));
        let acting = std::mem::replace(&mut self.acting, previous);
        self.settle_played(card, acting);
        resolved
    }

    fn agent_set(&self, set: AgentSet) -> AgentTargets {
        let mut ids = self.living_enemy_ids();
        if set == AgentSet::All {
            ids.insert(0, AgentId::PLAYER);
        }
        ids
    }

    fn agent_targets<C: TargetChooser + ?Sized>(
        &mut self,
        target: AgentTarget,
        by: AgentId,
        chooser: &mut C,
    ) -> Result<AgentTargets> {
        let targets = match target {
            AgentTarget::SelfAgent => SmallVec::from_elem(by, 1),
            AgentTarget::Player => SmallVec::from_elem(AgentId::PLAYER, 1),
            AgentTarget::All(set) => self.agent_set(set),
            AgentTarget::Random(set) => {
                let candidates = self.agent_set(set);
                self.rng.choose(&candidates).copied().into_iter().collect()
            }
            AgentTarget::Choose(set) => {
                let candidates = self.agent_set(set);
                if candidates.is_empty() {
                    return Ok(SmallVec::new());
                }
                match chooser.choose_agent_target(self, set.label(), &candidates) {
                    Some(id) if candidates.contains(&id) => SmallVec::from_elem(id, 1),
                    Some(id) => return Err(BattleError::InvalidAgentChoice(id)),
                    None => SmallVec::new(),
                }
            }
        };
        Ok(targets)
    }

    fn card_targets<C: TargetChooser + ?Sized>(&mut self, target: CardTarget, chooser: &mut C) -> Result<CardTargets> {
        let targets = match target {
            CardTarget::SelfCard => self.acting_card().map(|card| card.uid()).into_iter().collect(),
            CardTarget::Choose(pile) => {
                let candidates = self.piles.uids(pile);
                if candidates.is_empty() {
                    return Ok(SmallVec::new());
                }
                match chooser.choose_card_target(self, pile.label(), &candidates) {
                    Some(uid) if candidates.contains(&uid) => SmallVec::from_elem(uid, 1),
                    Some(uid) => return Err(BattleError::InvalidCardChoice(uid)),
                    None => SmallVec::new(),
                }
            }
        };
        Ok(targets)
    }

    fn apply_agent_effect(&mut self, effect: &mut AgentEffect, by: AgentId, target: AgentId) -> Result<()> {
        match effect {
            AgentEffect::DealDamage(value) => {
                let amount = value.get(&mut self.rng);
                self.require_agent_mut(target)?.take_damage(amount)?;
            }
            AgentEffect::DealAttackDamage { value, times } => {
                self.deal_attack_damage(value, *times, by, target)?;
            }
            AgentEffect::AddBlock(value) => {
                let amount = value.get(&mut self.rng);
                self.require_agent_mut(target)?.gain_block(amount)?;
            }
            AgentEffect::ApplyStatus { value, status } => {
                let amount = value.get(&mut self.rng);
                self.require_agent_mut(target)?.apply_status(*status, amount)?;
            }
            AgentEffect::Heal(value) => {
                let amount = value.get(&mut self.rng);
                self.require_agent_mut(target)?.heal(amount)?;
            }
            AgentEffect::And(effects) => {
                for effect in effects {
                    self.apply_agent_effect(effect, by, target)?;
                }
            }
        }
        Ok(())
    }

    /// Attack damage: before hooks, the apply chain on the base amount, the
    /// hits, then after hooks. Each hit re-checks block.
    fn deal_attack_damage(&mut self, value: &mut Value, times: u32, by: AgentId, target: AgentId) -> Result<()> {
        let base = value.get(&mut self.rng);
        if base < 0 {
            return Err(BattleError::NegativeAmount { kind: "damage", amount: base });
        }

        let ctx = AttackContext { by, target };
        let events = Arc::clone(&self.events);
        events.attack_damage.broadcast_before(&ctx, self);
        let amount = events.attack_damage.broadcast_apply(base, &ctx, self).max(0);

        let agent = self.require_agent_mut(target)?;
        let mut lost = 0;
        for _ in 0..times {
            lost += agent.take_damage(amount)?;
        }
        debug!(%by, %target, base, amount, times, lost, "attack resolved");

        events.attack_damage.broadcast_after(&ctx, self);
        Ok(())
    }

    fn apply_card_effect(&mut self, effect: &CardEffect, uid: CardUid) {
        match effect {
            CardEffect::Exhaust => {
                self.exhaust_card(uid);
            }
            CardEffect::AddCopy(pile) => {
                self.add_copy(uid, *pile);
            }
            CardEffect::Upgrade => {
                self.upgrade_card(uid, 1);
            }
            CardEffect::Discard => {
                self.discard_card(uid);
            }
            CardEffect::And(effects) => {
                for effect in effects {
                    self.apply_card_effect(effect, uid);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::{Agent, Enemy};
    use crate::bots::FirstCandidate;
    use crate::cards::{Card, CardType};
    use crate::core::{BattleConfig, ItemSet};
    use crate::status::repo;
    use crate::zones::PileKind;

    fn battle(enemy_health: &[i32], deck: Vec<Card>) -> BattleState {
        let enemies = enemy_health
            .iter()
            .map(|&hp| Enemy::new("Dummy", hp, ItemSet::round_robin(0, vec![Action::NoAction])))
            .collect();
        let config = BattleConfig::default().with_draw_count(deck.len());
        let mut state = BattleState::new(config, Agent::new("Hero", 80), deck, enemies);
        state.start();
        state
    }

    /// Picks the last candidate.
    struct LastCandidate;

    impl TargetChooser for LastCandidate {
        fn choose_agent_target(&mut self, _: &BattleState, _: &str, candidates: &[AgentId]) -> Option<AgentId> {
            candidates.last().copied()
        }

        fn choose_card_target(&mut self, _: &BattleState, _: &str, candidates: &[CardUid]) -> Option<CardUid> {
            candidates.last().copied()
        }
    }

    /// Always answers with an id that was never offered.
    struct Stray;

    impl TargetChooser for Stray {
        fn choose_agent_target(&mut self, _: &BattleState, _: &str, _: &[AgentId]) -> Option<AgentId> {
            Some(AgentId(200))
        }

        fn choose_card_target(&mut self, _: &BattleState, _: &str, _: &[CardUid]) -> Option<CardUid> {
            None
        }
    }

    fn health(state: &BattleState, id: AgentId) -> i32 {
        state.agent(id).map_or(0, Agent::health)
    }

    #[test]
    fn test_all_targets_every_living_enemy() {
        let mut state = battle(&[20, 20, 20], vec![]);
        let mut cleave = AgentEffect::attack(8).to(AgentTarget::All(AgentSet::Enemies));
        state.resolve(&mut cleave, AgentId::PLAYER, &mut FirstCandidate).unwrap();
        for id in state.living_enemy_ids() {
            assert_eq!(health(&state, id), 12);
        }
    }

    #[test]
    fn test_choose_uses_chooser() {
        let mut state = battle(&[20, 20], vec![]);
        let mut strike = AgentEffect::attack(6).to(AgentTarget::Choose(AgentSet::Enemies));
        state.resolve(&mut strike, AgentId::PLAYER, &mut LastCandidate).unwrap();
        assert_eq!(health(&state, AgentId::enemy(0)), 20);
        assert_eq!(health(&state, AgentId::enemy(1)), 14);
    }

    #[test]
    fn test_invalid_choice_is_an_error() {
        let mut state = battle(&[20], vec![]);
        let mut strike = AgentEffect::attack(6).to(AgentTarget::Choose(AgentSet::Enemies));
        assert_eq!(
            state.resolve(&mut strike, AgentId::PLAYER, &mut Stray),
            Err(BattleError::InvalidAgentChoice(AgentId(200)))
        );
    }

    #[test]
    fn test_empty_card_choice_is_noop() {
        let mut state = battle(&[20], vec![]);
        let mut armaments = CardEffect::Upgrade.to(CardTarget::Choose(PileKind::Hand));
        assert!(state.resolve(&mut armaments, AgentId::PLAYER, &mut Stray).is_ok());
    }

    #[test]
    fn test_and_applies_per_target_in_order() {
        let mut state = battle(&[20, 20], vec![]);
        // Vulnerable lands before the hit on each target.
        let mut bash = AgentEffect::apply_status(1, &repo::VULNERABLE)
            .and(AgentEffect::attack(10))
            .to(AgentTarget::All(AgentSet::Enemies));
        state.resolve(&mut bash, AgentId::PLAYER, &mut FirstCandidate).unwrap();
        assert_eq!(health(&state, AgentId::enemy(0)), 5);
        assert_eq!(health(&state, AgentId::enemy(1)), 5);
    }

    #[test]
    fn test_multi_hit_rechecks_block() {
        let mut state = battle(&[30], vec![]);
        let enemy = AgentId::enemy(0);
        state.agent_mut(enemy).unwrap().gain_block(7).unwrap();
        let mut twin = AgentEffect::attack_times(5, 2).to(AgentTarget::Player);
        state.resolve(&mut twin, enemy, &mut FirstCandidate).unwrap();
        assert_eq!(state.player().health(), 70);

        let mut twin = AgentEffect::attack_times(5, 2).to(AgentTarget::SelfAgent);
        state.resolve(&mut twin, enemy, &mut FirstCandidate).unwrap();
        assert_eq!(health(&state, enemy), 27);
        assert_eq!(state.agent(enemy).unwrap().block(), 0);
    }

    #[test]
    fn test_plain_damage_skips_modifiers() {
        let mut state = battle(&[30], vec![]);
        let enemy = AgentId::enemy(0);
        state.agent_mut(enemy).unwrap().apply_status(&repo::VULNERABLE, 2).unwrap();
        let mut poke = AgentEffect::damage(10).to(AgentTarget::Choose(AgentSet::Enemies));
        state.resolve(&mut poke, AgentId::PLAYER, &mut FirstCandidate).unwrap();
        assert_eq!(health(&state, enemy), 20);
    }

    #[test]
    fn test_negative_attack_is_rejected() {
        let mut state = battle(&[30], vec![]);
        let mut bad = AgentEffect::attack(-4).to(AgentTarget::Player);
        assert_eq!(
            state.resolve(&mut bad, AgentId::enemy(0), &mut FirstCandidate),
            Err(BattleError::NegativeAmount { kind: "damage", amount: -4 })
        );
    }

    #[test]
    fn test_play_card_spends_mana_and_discards() {
        let strike = Card::new("Strike", CardType::Attack, 1)
            .with_action(AgentEffect::attack(6).to(AgentTarget::Choose(AgentSet::Enemies)));
        let mut state = battle(&[20], vec![strike]);
        assert_eq!(state.mana(), 3);

        state.play_card(0, &mut FirstCandidate).unwrap();
        assert_eq!(state.mana(), 2);
        assert_eq!(health(&state, AgentId::enemy(0)), 14);
        assert!(state.hand().is_empty());
        assert_eq!(state.piles().pile(PileKind::Discard).len(), 1);
    }

    #[test]
    fn test_failed_play_keeps_the_card() {
        let strike = Card::new("Strike", CardType::Attack, 1)
            .with_action(AgentEffect::attack(6).to(AgentTarget::Choose(AgentSet::Enemies)));
        let mut state = battle(&[20], vec![strike]);

        assert_eq!(
            state.play_card(0, &mut Stray),
            Err(BattleError::InvalidAgentChoice(AgentId(200)))
        );
        assert_eq!(state.card_count(), 1);
        assert_eq!(state.mana(), 2);
        assert!(state.acting_card().is_none());
        assert_eq!(state.piles().pile(PileKind::Discard).len(), 1);
        assert_eq!(health(&state, AgentId::enemy(0)), 20);
    }

    #[test]
    fn test_unplayable_card_is_rejected() {
        let heavy = Card::new("Heavy", CardType::Attack, 5);
        let mut state = battle(&[20], vec![heavy]);
        assert_eq!(
            state.play_card(0, &mut FirstCandidate),
            Err(BattleError::CardNotPlayable { name: "Heavy".to_string(), cost: 5, mana: 3 })
        );
        assert_eq!(state.hand().len(), 1);
        assert_eq!(
            state.play_card(4, &mut FirstCandidate),
            Err(BattleError::CardIndexOutOfRange { index: 4, hand_len: 1 })
        );
    }

    #[test]
    fn test_self_exhaust_skips_discard() {
        let flash = Card::new("Flash", CardType::Skill, 0).with_action(CardEffect::Exhaust.to(CardTarget::SelfCard));
        let mut state = battle(&[20], vec![flash]);
        state.play_card(0, &mut FirstCandidate).unwrap();
        assert!(state.piles().pile(PileKind::Discard).is_empty());
        assert_eq!(state.piles().pile(PileKind::Exhaust).len(), 1);
        assert_eq!(state.card_count(), 1);
    }

    #[test]
    fn test_self_upgrade_applies_after_play() {
        let grow = Card::new("Grow", CardType::Skill, 0)
            .with_action(AgentEffect::block(Value::linear(2, 3, 1)).to(AgentTarget::SelfAgent))
            .with_action(CardEffect::Upgrade.to(CardTarget::SelfCard));
        let mut state = battle(&[20], vec![grow]);
        state.play_card(0, &mut FirstCandidate).unwrap();
        assert_eq!(state.player().block(), 2);
        let played = &state.piles().pile(PileKind::Discard)[0];
        assert_eq!(played.upgrade_count(), 1);
        assert_eq!(played.to_string(), "Grow+");
    }

    #[test]
    fn test_powers_stay_in_play() {
        let inflame = Card::new("Inflame", CardType::Power, 1)
            .with_action(AgentEffect::apply_status(2, &repo::STRENGTH).to(AgentTarget::SelfAgent));
        let mut state = battle(&[20], vec![inflame]);
        state.play_card(0, &mut FirstCandidate).unwrap();
        assert_eq!(state.powers().len(), 1);
        assert_eq!(state.player().status().get(&repo::STRENGTH), 2);
        assert_eq!(state.card_count(), 1);
    }

    #[test]
    fn test_copy_of_acting_card() {
        let anger = Card::new("Anger", CardType::Attack, 0)
            .with_action(AgentEffect::attack(6).to(AgentTarget::Choose(AgentSet::Enemies)))
            .with_action(CardEffect::AddCopy(PileKind::Discard).to(CardTarget::SelfCard));
        let mut state = battle(&[40], vec![anger]);
        state.play_card(0, &mut FirstCandidate).unwrap();
        let discard = state.piles().pile(PileKind::Discard);
        assert_eq!(discard.len(), 2);
        assert_ne!(discard[0].uid(), discard[1].uid());
    }
}
