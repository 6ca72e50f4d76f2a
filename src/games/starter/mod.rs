//! Starter content: the Ironclad, a small card pool and six enemies.
//!
//! ```
//! use card_battler::bots::RandomBot;
//! use card_battler::core::BattleConfig;
//! use card_battler::games::starter;
//!
//! let config = BattleConfig::default().with_seed(3).with_max_turns(30);
//! let mut battle = starter::encounter(config, |asc, rng| {
//!     vec![starter::acid_slime_small(asc, rng), starter::spike_slime_small(asc, rng)]
//! });
//! assert_eq!(battle.enemies().len(), 2);
//!
//! battle.run(&mut RandomBot::new(1)).unwrap();
//! assert!(battle.is_over());
//! ```

mod cards;
mod enemies;

pub use cards::*;
pub use enemies::*;

use crate::battle::{Agent, BattleState, Enemy};
use crate::core::{BattleConfig, GameRng};

/// Health of the starter character.
pub const IRONCLAD_HEALTH: i32 = 80;

#[must_use]
pub fn ironclad() -> Agent {
    Agent::new("Ironclad", IRONCLAD_HEALTH)
}

/// An Ironclad with the starter deck against the enemies `build` returns.
///
/// `build` gets the ascension level and an RNG derived from the battle seed.
pub fn encounter<F>(config: BattleConfig, build: F) -> BattleState
where
    F: FnOnce(u32, &mut GameRng) -> Vec<Enemy>,
{
    let mut rng = GameRng::new(config.seed).fork();
    let enemies = build(config.ascension, &mut rng);
    BattleState::new(config, ironclad(), starter_deck(), enemies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zones::PileKind;

    #[test]
    fn test_encounter_setup() {
        let mut battle = encounter(BattleConfig::default(), |asc, rng| vec![jaw_worm(asc, rng)]);
        assert_eq!(battle.player().health(), 80);
        assert_eq!(battle.piles().pile(PileKind::Draw).len(), 10);

        battle.start();
        assert_eq!(battle.hand().len(), 5);
        assert_eq!(battle.piles().pile(PileKind::Draw).len(), 5);
    }

    #[test]
    fn test_same_seed_same_encounter() {
        let build = |asc, rng: &mut GameRng| vec![acid_slime_small(asc, rng), jaw_worm(asc, rng)];
        let a = encounter(BattleConfig::default().with_seed(9), build);
        let b = encounter(BattleConfig::default().with_seed(9), build);
        assert_eq!(a.content_hash(), b.content_hash());
        assert_eq!(a.piles().uids(PileKind::Draw), b.piles().uids(PileKind::Draw));
    }
}
