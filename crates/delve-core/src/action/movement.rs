//! Movement and melee resolution.

use super::ActionResult;
use crate::data::colors;
use crate::entity::{EntityId, RenderOrder};
use crate::gameloop::GameState;

/// Step one cell. Walls, map edges, and occupied cells are silent
/// no-ops rather than errors.
pub(crate) fn step(state: &mut GameState, actor: EntityId, dx: i32, dy: i32) -> ActionResult {
    let Some(entity) = state.store.get(actor) else {
        return ActionResult::NoTime;
    };
    let x = entity.x + dx;
    let y = entity.y + dy;
    if !state.map.is_walkable(x, y) || state.store.blocking_entity_at(x, y).is_some() {
        return ActionResult::NoTime;
    }
    if let Some(entity) = state.store.get_mut(actor) {
        entity.x = x;
        entity.y = y;
    }
    ActionResult::Success
}

/// Attack the actor one cell over. Deterministic damage:
/// `max(attacker power − defender defense, 0)`.
pub(crate) fn melee(state: &mut GameState, actor: EntityId, dx: i32, dy: i32) -> ActionResult {
    let Some(attacker) = state.store.get(actor) else {
        return ActionResult::NoTime;
    };
    let attacker_name = attacker.name.clone();
    let power = attacker.power();
    let tx = attacker.x + dx;
    let ty = attacker.y + dy;

    let Some(target) = state.store.actor_at(tx, ty) else {
        return ActionResult::NoTime;
    };
    let target_id = target.id;
    if target_id == actor {
        return ActionResult::NoTime;
    }
    let target_name = target.name.clone();
    let damage = (power - target.defense()).max(0);

    let fg = if actor == state.player {
        colors::PLAYER_ATK
    } else {
        colors::ENEMY_ATK
    };
    let desc = format!("{attacker_name} attacks {target_name}");
    if damage > 0 {
        state.log.add(format!("{desc} for {damage} hit points."), fg);
        deal_damage(state, target_id, damage);
    } else {
        state.log.add(format!("{desc} but does no damage."), fg);
    }
    ActionResult::Success
}

/// Melee when a live actor occupies the destination, move otherwise.
pub(crate) fn bump(state: &mut GameState, actor: EntityId, dx: i32, dy: i32) -> ActionResult {
    let Some(entity) = state.store.get(actor) else {
        return ActionResult::NoTime;
    };
    let x = entity.x + dx;
    let y = entity.y + dy;
    if state.store.actor_at(x, y).is_some() {
        melee(state, actor, dx, dy)
    } else {
        step(state, actor, dx, dy)
    }
}

/// Apply damage to an entity's fighter, converting it to a corpse on
/// lethal damage.
pub(crate) fn deal_damage(state: &mut GameState, target: EntityId, amount: i32) {
    let Some(entity) = state.store.get_mut(target) else {
        return;
    };
    let Some(fighter) = entity.fighter.as_mut() else {
        return;
    };
    fighter.take_damage(amount);
    if fighter.is_dead() && entity.ai.is_some() {
        kill(state, target);
    }
}

/// The death transition: the entity stays in the store as a
/// non-blocking, AI-less corpse. A dead player additionally flips the
/// terminal game-over state.
fn kill(state: &mut GameState, target: EntityId) {
    let is_player = target == state.player;
    let Some(entity) = state.store.get_mut(target) else {
        return;
    };
    let name = entity.name.clone();
    let xp = entity.level.as_ref().map_or(0, |l| l.xp_given);
    entity.glyph = '%';
    entity.color = colors::CORPSE;
    entity.blocks_movement = false;
    entity.ai = None;
    entity.render_order = RenderOrder::Corpse;
    entity.name = format!("remains of {}", name.to_lowercase());

    if is_player {
        state.game_over = true;
        state.log.add("YOU DIED!", colors::PLAYER_DIE);
    } else {
        state.log.add(format!("{name} has perished."), colors::ENEMY_DIE);
        award_xp(state, xp);
    }
}

fn award_xp(state: &mut GameState, xp: u32) {
    if xp == 0 {
        return;
    }
    let Some(level) = state
        .store
        .get_mut(state.player)
        .and_then(|p| p.level.as_mut())
    else {
        return;
    };
    level.add_xp(xp);
    let next = level.current_level + 1;
    let leveled = level.requires_level_up();
    state
        .log
        .info(format!("You gain {xp} experience points."));
    if leveled {
        state.log.info(format!("You advance to level {next}!"));
    }
}
