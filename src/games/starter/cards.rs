//! Starter card pool.

use crate::actions::{Action, AgentEffect, AgentSet, AgentTarget, CardEffect, CardTarget};
use crate::cards::{Card, CardType};
use crate::core::Value;
use crate::status::repo;
use crate::zones::PileKind;

fn enemy() -> AgentTarget {
    AgentTarget::Choose(AgentSet::Enemies)
}

fn exhaust_self() -> Action {
    CardEffect::Exhaust.to(CardTarget::SelfCard)
}

pub fn strike() -> Card {
    Card::new("Strike", CardType::Attack, 1).with_action(AgentEffect::attack(Value::upgradable(6, 9)).to(enemy()))
}

pub fn defend() -> Card {
    Card::new("Defend", CardType::Skill, 1)
        .with_action(AgentEffect::block(Value::upgradable(5, 8)).to(AgentTarget::SelfAgent))
}

/// Damage and Vulnerable on one enemy.
pub fn bash() -> Card {
    Card::new("Bash", CardType::Attack, 2).with_action(
        AgentEffect::attack(Value::upgradable(8, 10))
            .and(AgentEffect::apply_status(Value::upgradable(2, 3), &repo::VULNERABLE))
            .to(enemy()),
    )
}

/// Grows by 4 with every upgrade, without limit.
pub fn searing_blow() -> Card {
    Card::new("Searing Blow", CardType::Attack, 2).with_action(AgentEffect::attack(Value::linear(12, 4, 1)).to(enemy()))
}

pub fn twin_strike() -> Card {
    Card::new("Twin Strike", CardType::Attack, 1)
        .with_action(AgentEffect::attack_times(Value::upgradable(5, 7), 2).to(enemy()))
}

pub fn cleave() -> Card {
    Card::new("Cleave", CardType::Attack, 1)
        .with_action(AgentEffect::attack(Value::upgradable(8, 11)).to(AgentTarget::All(AgentSet::Enemies)))
}

/// Three hits, each on a random enemy.
pub fn sword_boomerang() -> Card {
    let hit = || AgentEffect::attack(Value::upgradable(3, 4)).to(AgentTarget::Random(AgentSet::Enemies));
    Card::new("Sword Boomerang", CardType::Attack, 1).with_action(hit().and(hit()).and(hit()))
}

/// Free attack that shuffles a copy of itself into the discard pile.
pub fn anger() -> Card {
    Card::new("Anger", CardType::Attack, 0)
        .with_action(AgentEffect::attack(Value::upgradable(6, 8)).to(enemy()))
        .with_action(CardEffect::AddCopy(PileKind::Discard).to(CardTarget::SelfCard))
}

pub fn armaments() -> Card {
    Card::new("Armaments", CardType::Skill, 1)
        .with_action(AgentEffect::block(5).to(AgentTarget::SelfAgent))
        .with_action(CardEffect::Upgrade.to(CardTarget::Choose(PileKind::Hand)))
}

pub fn true_grit() -> Card {
    Card::new("True Grit", CardType::Skill, 1)
        .with_action(AgentEffect::block(Value::upgradable(7, 9)).to(AgentTarget::SelfAgent))
        .with_action(CardEffect::Exhaust.to(CardTarget::Choose(PileKind::Hand)))
}

pub fn inflame() -> Card {
    Card::new("Inflame", CardType::Power, 1)
        .with_action(AgentEffect::apply_status(Value::upgradable(2, 3), &repo::STRENGTH).to(AgentTarget::SelfAgent))
}

pub fn metallicize() -> Card {
    Card::new("Metallicize", CardType::Power, 1)
        .with_action(AgentEffect::apply_status(Value::upgradable(3, 4), &repo::METALLICIZE).to(AgentTarget::SelfAgent))
}

/// Costs 1, 0 once upgraded.
pub fn seeing_red() -> Card {
    Card::new("Seeing Red", CardType::Skill, Value::upgradable(1, 0))
        .with_action(Action::add_mana(2))
        .with_action(exhaust_self())
}

pub fn bandage_up() -> Card {
    Card::new("Bandage Up", CardType::Skill, 0)
        .with_action(AgentEffect::heal(Value::upgradable(4, 6)).to(AgentTarget::SelfAgent))
        .with_action(exhaust_self())
}

/// Vigor for the next attack.
pub fn wreath_of_flame() -> Card {
    Card::new("Wreath of Flame", CardType::Skill, 1)
        .with_action(AgentEffect::apply_status(Value::upgradable(5, 8), &repo::VIGOR).to(AgentTarget::SelfAgent))
}

/// Goes off against every enemy at the end of the third turn.
pub fn the_bomb() -> Card {
    Card::new("The Bomb", CardType::Skill, 2).with_action(AgentEffect::apply_status(3, &repo::BOMB).to(AgentTarget::SelfAgent))
}

/// 5 Strike, 4 Defend, 1 Bash.
#[must_use]
pub fn starter_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(10);
    deck.extend(std::iter::repeat_with(strike).take(5));
    deck.extend(std::iter::repeat_with(defend).take(4));
    deck.push(bash());
    deck
}

/// Every card in the pool, unupgraded.
#[must_use]
pub fn all_cards() -> Vec<Card> {
    vec![
        strike(),
        defend(),
        bash(),
        searing_blow(),
        twin_strike(),
        cleave(),
        sword_boomerang(),
        anger(),
        armaments(),
        true_grit(),
        inflame(),
        metallicize(),
        seeing_red(),
        bandage_up(),
        wreath_of_flame(),
        the_bomb(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starter_deck() {
        let deck = starter_deck();
        assert_eq!(deck.len(), 10);
        assert_eq!(deck.iter().filter(|c| c.name() == "Strike").count(), 5);
        assert_eq!(deck.iter().filter(|c| c.name() == "Defend").count(), 4);
        assert_eq!(deck.iter().filter(|c| c.name() == "Bash").count(), 1);
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(
            bash().describe(),
            "Bash (2): DealAttackDamage(8) and ApplyStatus(2-Vulnerable) to chosen of enemies"
        );
        assert_eq!(cleave().describe(), "Cleave (1): DealAttackDamage(8) to all enemies");
        assert_eq!(
            seeing_red().describe(),
            "Seeing Red (1): AddMana(2), Exhaust to this card"
        );
    }

    #[test]
    fn test_upgrades() {
        let mut blow = searing_blow();
        blow.upgrade(3);
        assert_eq!(blow.describe(), "Searing Blow+3 (2): DealAttackDamage(24) to chosen of enemies");

        let mut red = seeing_red();
        red.upgrade(1);
        assert_eq!(red.current_cost(), 0);
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<_> = all_cards().iter().map(|c| c.name().to_string()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 16);
    }
}
