//! Battle state: agents, piles, counters and the shared event bus.
//!
//! A `BattleState` is built once per encounter from a deck and a list of
//! enemies. It is cheap to clone: piles are persistent vectors and the event
//! bus is shared behind an `Arc`, so look-ahead search can branch freely.
//!
//! ## Card locations
//!
//! Every card instance lives in exactly one place:
//! - one of the four [`CardPiles`]
//! - the power row, once a power has been played
//! - the acting slot, while its actions resolve

use std::sync::Arc;

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::actions::Action;
use crate::cards::{Card, CardType};
use crate::core::config::MAX_MANA;
use crate::core::error::{BattleError, Result};
use crate::core::{AgentId, BattleConfig, CardUid, GameRng};
use crate::events::{BattleEvents, Side};
use crate::status::repo;
use crate::zones::{CardPiles, PileKind};

use super::agent::{Agent, Enemy};

/// Where a turn currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    TurnStart,
    PlayerActing,
    EnemyActing(AgentId),
    TurnEnd,
}

/// Terminal outcome of an encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattleResult {
    Win,
    Loss,
}

impl BattleResult {
    /// +1 for a win, -1 for a loss.
    #[must_use]
    pub fn score(self) -> i32 {
        match self {
            BattleResult::Win => 1,
            BattleResult::Loss => -1,
        }
    }

    #[must_use]
    pub fn is_win(self) -> bool {
        self == BattleResult::Win
    }
}

/// The card whose actions are resolving.
#[derive(Clone, Debug)]
pub(crate) struct ActingCard {
    pub card: Card,
    pub exhausted: bool,
    pub pending_upgrades: u32,
}

impl ActingCard {
    pub fn new(card: Card) -> Self {
        Self { card, exhausted: false, pending_upgrades: 0 }
    }
}

/// Complete state of one encounter.
#[derive(Clone, Debug)]
pub struct BattleState {
    pub(crate) config: BattleConfig,
    pub(crate) player: Agent,
    pub(crate) enemies: Vec<Enemy>,
    pub(crate) piles: CardPiles,
    pub(crate) powers: Vector<Card>,
    pub(crate) mana: i32,
    pub(crate) turn: u32,
    pub(crate) phase: TurnPhase,
    pub(crate) agent_turn_ended: bool,
    pub(crate) acting: Option<ActingCard>,
    pub(crate) last_action: Option<(AgentId, String)>,
    pub(crate) next_uid: u32,
    pub(crate) rng: GameRng,
    pub(crate) events: Arc<BattleEvents>,
}

impl BattleState {
    /// Set up an encounter with the standard event subscribers.
    ///
    /// Deck cards get uids `1..=n` in deck order; the deck is then shuffled
    /// into the draw pile with an RNG seeded from `config.seed`.
    ///
    /// # Panics
    ///
    /// Panics if there are more than 254 enemies.
    #[must_use]
    pub fn new(
        config: BattleConfig,
        player: Agent,
        deck: impl IntoIterator<Item = Card>,
        enemies: Vec<Enemy>,
    ) -> Self {
        Self::with_events(config, player, deck, enemies, Arc::new(BattleEvents::standard()))
    }

    /// Set up an encounter with a custom event bus.
    ///
    /// # Panics
    ///
    /// Panics if there are more than 254 enemies.
    #[must_use]
    pub fn with_events(
        config: BattleConfig,
        mut player: Agent,
        deck: impl IntoIterator<Item = Card>,
        enemies: Vec<Enemy>,
        events: Arc<BattleEvents>,
    ) -> Self {
        assert!(enemies.len() < usize::from(u8::MAX), "Too many enemies for one battle");

        let mut rng = GameRng::new(config.seed);
        player.set_id(AgentId::PLAYER);

        let enemies = enemies
            .into_iter()
            .zip(0u8..)
            .map(|(mut enemy, index)| {
                enemy.agent_mut().set_id(AgentId::enemy(index));
                enemy
            })
            .collect();

        let deck: Vec<Card> = deck
            .into_iter()
            .zip(1u32..)
            .map(|(mut card, uid)| {
                card.set_uid(CardUid::new(uid));
                card
            })
            .collect();
        let next_uid = deck.len() as u32 + 1;
        let piles = CardPiles::new(deck, &mut rng);

        Self {
            config,
            player,
            enemies,
            piles,
            powers: Vector::new(),
            mana: 0,
            turn: 0,
            phase: TurnPhase::TurnStart,
            agent_turn_ended: false,
            acting: None,
            last_action: None,
            next_uid,
            rng,
            events,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    #[must_use]
    pub fn player(&self) -> &Agent {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Agent {
        &mut self.player
    }

    /// Enemies still in the active list, in encounter order.
    #[must_use]
    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    #[must_use]
    pub fn piles(&self) -> &CardPiles {
        &self.piles
    }

    #[must_use]
    pub fn hand(&self) -> &Vector<Card> {
        self.piles.hand()
    }

    /// Powers played this battle.
    #[must_use]
    pub fn powers(&self) -> &Vector<Card> {
        &self.powers
    }

    #[must_use]
    pub fn mana(&self) -> i32 {
        self.mana
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    #[must_use]
    pub fn agent_turn_ended(&self) -> bool {
        self.agent_turn_ended
    }

    /// The card currently resolving, if any.
    #[must_use]
    pub fn acting_card(&self) -> Option<&Card> {
        self.acting.as_ref().map(|acting| &acting.card)
    }

    /// Who did what last, as a human-readable description.
    #[must_use]
    pub fn last_action(&self) -> Option<(AgentId, &str)> {
        self.last_action.as_ref().map(|(id, text)| (*id, text.as_str()))
    }

    /// The shared event bus.
    #[must_use]
    pub fn events(&self) -> Arc<BattleEvents> {
        Arc::clone(&self.events)
    }

    pub fn rng_mut(&mut self) -> &mut GameRng {
        &mut self.rng
    }

    // === Agents ===

    #[must_use]
    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        if id.is_player() {
            return Some(&self.player);
        }
        self.enemies.iter().find(|e| e.id() == id).map(Enemy::agent)
    }

    pub fn agent_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        if id.is_player() {
            return Some(&mut self.player);
        }
        self.enemies.iter_mut().find(|e| e.id() == id).map(Enemy::agent_mut)
    }

    pub(crate) fn require_agent_mut(&mut self, id: AgentId) -> Result<&mut Agent> {
        self.agent_mut(id).ok_or(BattleError::UnknownAgent(id))
    }

    /// Living agents on one side.
    #[must_use]
    pub fn side_ids(&self, side: Side) -> SmallVec<[AgentId; 4]> {
        match side {
            Side::Player => SmallVec::from_elem(AgentId::PLAYER, 1),
            Side::Enemies => self.living_enemy_ids(),
        }
    }

    /// Ids of enemies that are not dead, in encounter order.
    #[must_use]
    pub fn living_enemy_ids(&self) -> SmallVec<[AgentId; 4]> {
        self.enemies
            .iter()
            .filter(|e| !e.agent().is_dead())
            .map(Enemy::id)
            .collect()
    }

    /// The move an enemy will make next. Peeking does not commit it.
    pub fn enemy_intention(&mut self, id: AgentId) -> Option<Action> {
        let Self { enemies, rng, .. } = self;
        enemies.iter_mut().find(|e| e.id() == id)?.intention(rng).cloned()
    }

    // === Mana and playability ===

    /// Change mana by `delta`, capped at `MAX_MANA`.
    pub fn add_mana(&mut self, delta: i32) -> Result<()> {
        let mana = self.mana.saturating_add(delta);
        if mana < 0 {
            return Err(BattleError::ManaUnderflow { mana: self.mana, delta });
        }
        self.mana = mana.min(MAX_MANA);
        Ok(())
    }

    /// Whether `card` could be played right now.
    #[must_use]
    pub fn can_play(&self, card: &Card) -> bool {
        if card.current_cost() > self.mana {
            return false;
        }
        !(card.card_type() == CardType::Attack && self.player.status().has(&repo::ENTANGLE))
    }

    #[must_use]
    pub fn is_playable(&self, index: usize) -> bool {
        self.piles.hand().get(index).is_some_and(|card| self.can_play(card))
    }

    /// Hand indices of every playable card.
    #[must_use]
    pub fn playable_indices(&self) -> Vec<usize> {
        (0..self.piles.hand().len()).filter(|&i| self.is_playable(i)).collect()
    }

    // === Card operations ===

    pub(crate) fn alloc_uid(&mut self) -> CardUid {
        let uid = CardUid::new(self.next_uid);
        self.next_uid += 1;
        uid
    }

    fn acting_mut(&mut self, uid: CardUid) -> Option<&mut ActingCard> {
        self.acting.as_mut().filter(|acting| acting.card.uid() == uid)
    }

    /// Look a card up in the piles, the power row or the acting slot.
    #[must_use]
    pub fn find_card(&self, uid: CardUid) -> Option<&Card> {
        self.acting_card()
            .filter(|card| card.uid() == uid)
            .or_else(|| self.piles.card(uid))
            .or_else(|| self.powers.iter().find(|card| card.uid() == uid))
    }

    /// Exhaust a card. The acting card is exhausted once it finishes
    /// resolving instead of going to the discard pile.
    pub fn exhaust_card(&mut self, uid: CardUid) -> bool {
        if let Some(acting) = self.acting_mut(uid) {
            acting.exhausted = true;
            return true;
        }
        let exhausted = self.piles.exhaust(uid);
        if exhausted {
            debug!(turn = self.turn, card = %uid, "card exhausted");
        }
        exhausted
    }

    /// Upgrade a card `times` times.
    pub fn upgrade_card(&mut self, uid: CardUid, times: u32) -> bool {
        if let Some(acting) = self.acting_mut(uid) {
            acting.pending_upgrades += times;
            acting.card.upgrade(times);
            return true;
        }
        match self.piles.card_mut(uid) {
            Some(card) => {
                card.upgrade(times);
                true
            }
            None => false,
        }
    }

    /// Put a copy of a card into `pile`. The copy gets a fresh uid.
    pub fn add_copy(&mut self, uid: CardUid, pile: PileKind) -> Option<CardUid> {
        let mut copy = self.find_card(uid)?.clone();
        let copy_uid = self.alloc_uid();
        copy.set_uid(copy_uid);
        if pile == PileKind::Hand {
            copy.peek_cost(&mut self.rng);
        }
        self.piles.add(pile, copy);
        Some(copy_uid)
    }

    /// Move a card from the hand to the discard pile.
    pub fn discard_card(&mut self, uid: CardUid) -> bool {
        match self.piles.locate(uid) {
            Some((PileKind::Hand, _)) => self.piles.move_to(uid, PileKind::Discard).is_some(),
            _ => false,
        }
    }

    /// Put a played card where it belongs once its actions resolved.
    pub(crate) fn settle_played(&mut self, mut card: Card, acting: Option<ActingCard>) {
        let (exhausted, pending) = acting.map_or((false, 0), |a| (a.exhausted, a.pending_upgrades));
        card.upgrade(pending);
        if exhausted {
            self.piles.add(PileKind::Exhaust, card);
        } else if card.card_type() == CardType::Power {
            self.powers.push_back(card);
        } else {
            self.piles.add(PileKind::Discard, card);
        }
    }

    /// Cards across the piles, the power row and the acting slot.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.piles.total() + self.powers.len() + usize::from(self.acting.is_some())
    }

    // === Cleanup and end conditions ===

    /// Purge finished statuses and drop dead enemies from the active list.
    pub fn clean_up(&mut self) {
        self.player.status_mut().clean_up();
        for enemy in &mut self.enemies {
            enemy.agent_mut().status_mut().clean_up();
        }

        let turn = self.turn;
        self.enemies.retain(|enemy| {
            let alive = !enemy.agent().is_dead();
            if !alive {
                debug!(turn, agent = %enemy.id(), name = enemy.agent().name(), "enemy died");
            }
            alive
        });
    }

    /// The outcome, once the battle has one.
    #[must_use]
    pub fn result(&self) -> Option<BattleResult> {
        if self.player.is_dead() {
            return Some(BattleResult::Loss);
        }
        if self.enemies.iter().all(|e| e.agent().is_dead()) {
            return Some(BattleResult::Win);
        }
        if self.config.max_turns.is_some_and(|max| self.turn > max) {
            return Some(BattleResult::Loss);
        }
        None
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.result().is_some()
    }
}

impl std::fmt::Display for BattleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Turn {} | mana {}/{}", self.turn, self.mana, self.config.max_mana)?;
        writeln!(f, "{}", self.player)?;
        for enemy in &self.enemies {
            write!(f, "{}", enemy.agent())?;
            match enemy.peeked_intention() {
                Some(action) => writeln!(f, " intends {action}")?,
                None => writeln!(f)?,
            }
        }
        for (i, card) in self.piles.hand().iter().enumerate() {
            writeln!(f, "  [{i}] {}", card.describe())?;
        }
        write!(
            f,
            "draw {} | discard {} | exhaust {}",
            self.piles.pile(PileKind::Draw).len(),
            self.piles.pile(PileKind::Discard).len(),
            self.piles.pile(PileKind::Exhaust).len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ItemSet;

    fn card(name: &str, cost: i32) -> Card {
        Card::new(name, CardType::Skill, cost)
    }

    fn battle(deck: Vec<Card>) -> BattleState {
        let enemies = vec![
            Enemy::new("A", 10, ItemSet::round_robin(0, vec![Action::NoAction])),
            Enemy::new("B", 12, ItemSet::round_robin(0, vec![Action::NoAction])),
        ];
        BattleState::new(BattleConfig::default(), Agent::new("Hero", 80), deck, enemies)
    }

    #[test]
    fn test_ids_are_assigned() {
        let state = battle(vec![card("X", 1), card("Y", 1)]);
        assert_eq!(state.enemies()[0].id(), AgentId::enemy(0));
        assert_eq!(state.enemies()[1].id(), AgentId::enemy(1));
        let mut uids = state.piles().uids(PileKind::Draw);
        uids.sort();
        assert_eq!(uids, vec![CardUid::new(1), CardUid::new(2)]);
    }

    #[test]
    #[should_panic(expected = "Too many enemies")]
    fn test_enemy_limit() {
        let enemies: Vec<Enemy> = (0..255)
            .map(|_| Enemy::new("Swarm", 1, ItemSet::round_robin(0, vec![Action::NoAction])))
            .collect();
        let _ = BattleState::new(BattleConfig::default(), Agent::new("Hero", 80), Vec::new(), enemies);
    }

    #[test]
    fn test_mana_underflow() {
        let mut state = battle(vec![]);
        state.add_mana(2).unwrap();
        assert_eq!(state.add_mana(-3), Err(BattleError::ManaUnderflow { mana: 2, delta: -3 }));
        assert_eq!(state.mana(), 2);
    }

    #[test]
    fn test_entangle_blocks_attacks() {
        let mut state = battle(vec![Card::new("Hit", CardType::Attack, 0), card("Guard", 0)]);
        state.piles.draw(2, &mut state.rng);
        state.player.apply_status(&repo::ENTANGLE, 1).unwrap();

        let playable: Vec<_> = state
            .playable_indices()
            .into_iter()
            .map(|i| state.hand()[i].name().to_string())
            .collect();
        assert_eq!(playable, vec!["Guard".to_string()]);
    }

    #[test]
    fn test_clean_up_removes_dead_enemies_only() {
        let mut state = battle(vec![]);
        state.agent_mut(AgentId::enemy(0)).unwrap().take_damage(10).unwrap();
        assert_eq!(state.living_enemy_ids().as_slice(), &[AgentId::enemy(1)]);

        state.clean_up();
        assert_eq!(state.enemies().len(), 1);
        assert!(state.agent(AgentId::enemy(0)).is_none());
        assert_eq!(state.enemies()[0].id(), AgentId::enemy(1));
        assert_eq!(state.result(), None);
    }

    #[test]
    fn test_results() {
        let mut state = battle(vec![]);
        for id in state.living_enemy_ids() {
            state.agent_mut(id).unwrap().take_damage(50).unwrap();
        }
        assert_eq!(state.result(), Some(BattleResult::Win));

        let mut state = battle(vec![]);
        state.player_mut().take_damage(80).unwrap();
        assert_eq!(state.result(), Some(BattleResult::Loss));
        assert_eq!(BattleResult::Loss.score(), -1);
    }

    #[test]
    fn test_copy_gets_fresh_uid() {
        let mut state = battle(vec![card("X", 1)]);
        let original = CardUid::new(1);
        let copy = state.add_copy(original, PileKind::Hand).unwrap();
        assert_eq!(copy, CardUid::new(2));
        assert_eq!(state.piles().locate(copy), Some((PileKind::Hand, 0)));
        assert!(state.piles().contains(original));
        assert_eq!(state.card_count(), 2);
    }

    #[test]
    fn test_discard_only_from_hand() {
        let mut state = battle(vec![card("X", 1), card("Y", 1)]);
        state.piles.draw(1, &mut state.rng);
        let in_hand = state.piles().uids(PileKind::Hand)[0];
        let in_draw = state.piles().uids(PileKind::Draw)[0];

        assert!(!state.discard_card(in_draw));
        assert!(state.discard_card(in_hand));
        assert_eq!(state.piles().uids(PileKind::Discard), vec![in_hand]);
    }
}
