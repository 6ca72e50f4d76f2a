//! Event subscribers implementing the built-in status effects.

use tracing::debug;

use crate::battle::BattleState;
use crate::events::{AttackContext, TurnContext};

use super::definition::repo;

pub fn strength(amount: i32, ctx: &AttackContext, battle: &BattleState) -> i32 {
    amount.saturating_add(battle.agent(ctx.by).map_or(0, |a| a.status().get(&repo::STRENGTH)))
}

pub fn vigor(amount: i32, ctx: &AttackContext, battle: &BattleState) -> i32 {
    amount.saturating_add(battle.agent(ctx.by).map_or(0, |a| a.status().get(&repo::VIGOR)))
}

/// x1.5, rounded down.
pub fn vulnerable(amount: i32, ctx: &AttackContext, battle: &BattleState) -> i32 {
    let vulnerable = battle.agent(ctx.target).is_some_and(|a| a.status().has(&repo::VULNERABLE));
    if vulnerable {
        amount.saturating_add(amount / 2)
    } else {
        amount
    }
}

/// x0.75, rounded down.
pub fn weak(amount: i32, ctx: &AttackContext, battle: &BattleState) -> i32 {
    let weak = battle.agent(ctx.by).is_some_and(|a| a.status().has(&repo::WEAK));
    if weak {
        amount / 4 * 3 + amount % 4 * 3 / 4
    } else {
        amount
    }
}

pub fn consume_vigor(ctx: &AttackContext, battle: &mut BattleState) {
    if let Some(agent) = battle.agent_mut(ctx.by) {
        agent.status_mut().remove(&repo::VIGOR);
    }
}

pub fn metallicize(ctx: &TurnContext, battle: &mut BattleState) {
    for id in battle.side_ids(ctx.side) {
        if let Some(agent) = battle.agent_mut(id) {
            let amount = agent.status().get(&repo::METALLICIZE);
            agent.add_block(amount);
        }
    }
}

/// Every bomb on its last turn goes off against the opposing side.
pub fn bomb(ctx: &TurnContext, battle: &mut BattleState) {
    let mut blasts = 0;
    for id in battle.side_ids(ctx.side) {
        if let Some(agent) = battle.agent(id) {
            blasts += agent.status().instances(&repo::BOMB).filter(|b| b.value == 1).count();
        }
    }
    if blasts == 0 {
        return;
    }

    let targets = battle.side_ids(ctx.side.opponent());
    debug!(blasts, side = ?ctx.side, "bombs exploding");
    for _ in 0..blasts {
        for &id in &targets {
            if let Some(agent) = battle.agent_mut(id) {
                agent.absorb_damage(repo::BOMB_DAMAGE);
            }
        }
    }
}
