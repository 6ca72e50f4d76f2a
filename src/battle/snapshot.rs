//! Branching copies and content hashes for look-ahead search.

use std::hash::{Hash, Hasher};

use im::Vector;
use rustc_hash::FxHasher;

use crate::cards::Card;
use crate::core::GameRng;
use crate::zones::PileKind;

use super::state::BattleState;

impl BattleState {
    /// An independent copy with its own RNG and a reshuffled draw pile.
    ///
    /// The copy's RNG is forked from `rng`, so branches explored by a search
    /// do not inherit the frozen draw order or random rolls of the original.
    #[must_use]
    pub fn clone_undeterministic(&self, rng: &mut GameRng) -> Self {
        let mut branch = self.clone();
        let mut branch_rng = rng.fork();
        branch.piles.shuffle_draw(&mut branch_rng);
        branch.rng = branch_rng;
        branch
    }

    /// Hash of the observable battle content.
    ///
    /// Covers the counters, every agent, and every pile as a sorted multiset
    /// of `(name, upgrades)`. Pile order, card uids, the RNG and enemy move
    /// patterns are left out, so two states that differ only in shuffle
    /// order hash the same.
    ///
    /// Enemy pattern progress and peeked intentions are not hashed. This is
    /// only sound while memo entries stay within one player turn, where
    /// every branch shares the intentions of the root. Memoizing across an
    /// enemy side would need them in the key.
    #[must_use]
    pub fn content_hash(&self) -> u64 {
        let mut hasher = FxHasher::default();
        self.turn.hash(&mut hasher);
        self.mana.hash(&mut hasher);
        self.phase.hash(&mut hasher);
        self.agent_turn_ended.hash(&mut hasher);

        self.player.hash(&mut hasher);
        for enemy in &self.enemies {
            enemy.agent().hash(&mut hasher);
        }

        for kind in PileKind::ALL {
            pile_key(self.piles.pile(kind)).hash(&mut hasher);
        }
        pile_key(&self.powers).hash(&mut hasher);
        hasher.finish()
    }
}

fn pile_key(cards: &Vector<Card>) -> Vec<(&str, u32)> {
    let mut key: Vec<(&str, u32)> = cards.iter().map(|c| (c.name(), c.upgrade_count())).collect();
    key.sort_unstable();
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{Action, AgentEffect, AgentTarget};
    use crate::battle::{Agent, Enemy, PlayerChoice};
    use crate::bots::FirstCandidate;
    use crate::cards::CardType;
    use crate::core::{AgentId, BattleConfig, ItemSet};

    fn battle(seed: u64) -> BattleState {
        let deck: Vec<Card> = (0..10)
            .map(|i| {
                let name = if i % 2 == 0 { "Strike" } else { "Defend" };
                Card::new(name, CardType::Skill, 1)
            })
            .collect();
        let enemy = Enemy::new("Worm", 40, ItemSet::round_robin(0, vec![AgentEffect::attack(3).to(AgentTarget::Player)]));
        BattleState::new(BattleConfig::default().with_seed(seed), Agent::new("Hero", 50), deck, vec![enemy])
    }

    #[test]
    fn test_clone_leaves_original_alone() {
        let mut state = battle(1);
        state.start();
        let before = state.content_hash();

        let mut rng = GameRng::new(5);
        let mut branch = state.clone_undeterministic(&mut rng);
        branch.tick_player(PlayerChoice::EndTurn, &mut FirstCandidate).unwrap();

        assert_eq!(state.content_hash(), before);
        assert_eq!(state.turn(), 1);
        assert_eq!(branch.turn(), 2);
    }

    #[test]
    fn test_hash_ignores_pile_order() {
        let state = battle(1);
        let mut rng = GameRng::new(5);
        let branch = state.clone_undeterministic(&mut rng);
        assert_eq!(state.content_hash(), branch.content_hash());
    }

    #[test]
    fn test_hash_sees_content() {
        let mut state = battle(1);
        state.start();
        let before = state.content_hash();

        let mut changed = state.clone();
        changed.player_mut().take_damage(1).unwrap();
        assert_ne!(changed.content_hash(), before);

        let mut upgraded = state.clone();
        let uid = upgraded.hand()[0].uid();
        upgraded.upgrade_card(uid, 1);
        assert_ne!(upgraded.content_hash(), before);

        let mut spent = state.clone();
        spent.resolve(&mut Action::add_mana(-1), AgentId::PLAYER, &mut FirstCandidate).unwrap();
        assert_ne!(spent.content_hash(), before);
    }
}
