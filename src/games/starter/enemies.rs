//! Starter enemies.
//!
//! Every builder takes the ascension level and an RNG for rolled starting
//! health and random pattern starts. Thresholds:
//! - 2: stronger attacks
//! - 7: more health
//! - 17: stronger or fixed patterns

use crate::actions::{Action, AgentEffect, AgentTarget};
use crate::battle::Enemy;
use crate::core::{GameRng, ItemSet, SequenceEntry, Value};
use crate::status::repo;

fn health(rng: &mut GameRng, low: i32, high: i32) -> i32 {
    Value::range(low, high).get(rng)
}

fn by_ascension(ascension: u32, threshold: u32, base: i32, raised: i32) -> i32 {
    if ascension >= threshold {
        raised
    } else {
        base
    }
}

fn attack(amount: i32) -> Action {
    AgentEffect::attack(amount).to(AgentTarget::Player)
}

fn block(amount: i32) -> Action {
    AgentEffect::block(amount).to(AgentTarget::SelfAgent)
}

/// Alternates a tackle and a Weak-applying lick.
pub fn acid_slime_small(ascension: u32, rng: &mut GameRng) -> Enemy {
    let max_health = if ascension >= 7 { health(rng, 9, 13) } else { health(rng, 8, 12) };
    let tackle = attack(by_ascension(ascension, 2, 3, 4));
    let lick = AgentEffect::apply_status(1, &repo::WEAK).to(AgentTarget::Player);
    let pattern = if ascension >= 17 {
        ItemSet::round_robin(0, vec![tackle, lick])
    } else {
        ItemSet::round_robin_random_start(vec![tackle, lick], rng)
    };
    Enemy::new("Acid Slime (S)", max_health, pattern)
}

pub fn spike_slime_small(ascension: u32, rng: &mut GameRng) -> Enemy {
    let max_health = if ascension >= 7 { health(rng, 11, 15) } else { health(rng, 10, 14) };
    let tackle = attack(by_ascension(ascension, 2, 5, 6));
    Enemy::new("Spike Slime (S)", max_health, ItemSet::round_robin(0, vec![tackle]))
}

/// Opens with Chomp, then picks weighted moves without long repeats.
pub fn jaw_worm(ascension: u32, rng: &mut GameRng) -> Enemy {
    let max_health = if ascension >= 7 { health(rng, 42, 46) } else { health(rng, 40, 44) };
    let chomp = attack(by_ascension(ascension, 2, 11, 12));
    let thrash = attack(7).and(block(5));
    let strength = match ascension {
        0..=1 => 3,
        2..=16 => 4,
        _ => 5,
    };
    let bellow = AgentEffect::apply_status(strength, &repo::STRENGTH)
        .and(AgentEffect::block(5))
        .to(AgentTarget::SelfAgent);

    // The opening Chomp counts toward the repeat limit.
    let moves = ItemSet::weighted(vec![(bellow.clone(), 0.45), (thrash.clone(), 0.30), (chomp.clone(), 0.25)]);
    let pattern = ItemSet::sequence(vec![SequenceEntry::Item(chomp.clone()), SequenceEntry::Set(moves)])
        .prevent_repeats(vec![(bellow, 2), (thrash, 3), (chomp, 2)], true);
    Enemy::new("Jaw Worm", max_health, pattern)
}

pub fn goblin(_ascension: u32, _rng: &mut GameRng) -> Enemy {
    Enemy::new("Goblin", 44, ItemSet::round_robin(0, vec![attack(11), attack(7).and(block(5))]))
}

pub fn hob_goblin(_ascension: u32, _rng: &mut GameRng) -> Enemy {
    Enemy::new("Hob Goblin", 44, ItemSet::round_robin(0, vec![attack(22), attack(10).and(block(10))]))
}

pub fn leech(_ascension: u32, _rng: &mut GameRng) -> Enemy {
    let drain = attack(1).and(AgentEffect::apply_status(1, &repo::WEAK).to(AgentTarget::Player));
    Enemy::new("Leech", 70, ItemSet::round_robin(0, vec![drain, attack(4)]))
}
