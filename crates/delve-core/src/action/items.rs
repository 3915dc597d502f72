//! Item handling: pickup, drop, use, equip.

use super::{movement, ActionResult};
use crate::component::Consumable;
use crate::data::colors;
use crate::entity::EntityId;
use crate::gameloop::GameState;

/// Pick up an item from the acting entity's cell.
pub(crate) fn pickup(state: &mut GameState, actor: EntityId) -> ActionResult {
    let Some(entity) = state.store.get(actor) else {
        return ActionResult::NoTime;
    };
    let (x, y) = (entity.x, entity.y);

    let item_id = state
        .store
        .entities_at(x, y)
        .find(|e| e.id != actor && (e.consumable.is_some() || e.equippable.is_some()))
        .map(|e| e.id);
    let Some(item_id) = item_id else {
        return ActionResult::Impossible("There is nothing here to pick up.".into());
    };

    let Some(item) = state.store.remove(item_id) else {
        return ActionResult::NoTime;
    };
    let name = item.name.clone();
    let Some(inventory) = state
        .store
        .get_mut(actor)
        .and_then(|e| e.inventory.as_mut())
    else {
        state.store.insert(item);
        return ActionResult::Impossible("You cannot carry anything.".into());
    };
    match inventory.add(item) {
        Ok(()) => {
            state.log.info(format!("You picked up the {name}!"));
            ActionResult::Success
        }
        Err(item) => {
            state.store.insert(item);
            ActionResult::Impossible("Your inventory is full.".into())
        }
    }
}

/// Drop a carried item onto the acting entity's cell, unequipping it
/// first if worn.
pub(crate) fn drop_item(state: &mut GameState, actor: EntityId, item: EntityId) -> ActionResult {
    let Some(entity) = state.store.get_mut(actor) else {
        return ActionResult::NoTime;
    };
    let (x, y) = (entity.x, entity.y);
    if let Some(equipment) = entity.equipment.as_mut() {
        if equipment.is_equipped(item) {
            equipment.unequip(item);
        }
    }
    let Some(mut dropped) = entity
        .inventory
        .as_mut()
        .and_then(|inv| inv.remove(item))
    else {
        return ActionResult::Impossible("You do not have that item.".into());
    };
    dropped.x = x;
    dropped.y = y;
    let name = dropped.name.clone();
    state.store.insert(dropped);
    state.log.info(format!("You dropped the {name}."));
    ActionResult::Success
}

/// Equip a carried item into its slot, or take it off if already
/// worn. Whatever occupied the slot is displaced, not dropped.
pub(crate) fn toggle_equip(state: &mut GameState, actor: EntityId, item: EntityId) -> ActionResult {
    let Some(entity) = state.store.get_mut(actor) else {
        return ActionResult::NoTime;
    };
    let Some((slot, name)) = entity
        .inventory
        .as_ref()
        .and_then(|inv| inv.get(item))
        .and_then(|i| i.equippable.map(|e| (e.slot, i.name.clone())))
    else {
        return ActionResult::Impossible("You cannot equip that.".into());
    };
    let Some(equipment) = entity.equipment.as_mut() else {
        return ActionResult::Impossible("You cannot equip that.".into());
    };

    if equipment.is_equipped(item) {
        equipment.unequip(item);
        state.log.info(format!("You remove the {name}."));
    } else {
        equipment.set_slot(slot, Some(item));
        state.log.info(format!("You equip the {name}."));
    }
    ActionResult::Success
}

/// Use a carried consumable. Targeted items without a resolved target
/// come back as `NeedsTarget` with nothing mutated.
pub(crate) fn use_item(
    state: &mut GameState,
    actor: EntityId,
    item: EntityId,
    target: Option<(i32, i32)>,
) -> ActionResult {
    let Some(consumable) = state
        .store
        .get(actor)
        .and_then(|e| e.inventory.as_ref())
        .and_then(|inv| inv.get(item))
        .and_then(|i| i.consumable)
    else {
        return ActionResult::Impossible("You cannot use that.".into());
    };

    if target.is_none() {
        if let Some(request) = consumable.target_request() {
            return ActionResult::NeedsTarget(request);
        }
    }

    match consumable {
        Consumable::Healing { amount } => heal(state, actor, item, amount),
        Consumable::Lightning {
            damage,
            maximum_range,
        } => lightning(state, actor, item, damage, maximum_range),
        Consumable::Confusion { turns } => match target {
            Some(cell) => confusion(state, actor, item, turns, cell),
            None => ActionResult::NoTime,
        },
        Consumable::Fireball { damage, radius } => match target {
            Some(cell) => fireball(state, actor, item, damage, radius, cell),
            None => ActionResult::NoTime,
        },
    }
}

/// Remove a spent consumable from the user's inventory.
fn consume(state: &mut GameState, actor: EntityId, item: EntityId) {
    if let Some(inventory) = state
        .store
        .get_mut(actor)
        .and_then(|e| e.inventory.as_mut())
    {
        inventory.remove(item);
    }
}

fn item_name(state: &GameState, actor: EntityId, item: EntityId) -> String {
    state
        .store
        .get(actor)
        .and_then(|e| e.inventory.as_ref())
        .and_then(|inv| inv.get(item))
        .map_or_else(String::new, |i| i.name.clone())
}

fn heal(state: &mut GameState, actor: EntityId, item: EntityId, amount: i32) -> ActionResult {
    let name = item_name(state, actor, item);
    let Some(fighter) = state
        .store
        .get_mut(actor)
        .and_then(|e| e.fighter.as_mut())
    else {
        return ActionResult::NoTime;
    };
    let recovered = fighter.heal(amount);
    if recovered == 0 {
        return ActionResult::Impossible("Your health is already full.".into());
    }
    state.log.add(
        format!("You consume the {name}, and recover {recovered} HP!"),
        colors::HEALTH_RECOVERED,
    );
    consume(state, actor, item);
    ActionResult::Success
}

fn lightning(
    state: &mut GameState,
    actor: EntityId,
    item: EntityId,
    damage: i32,
    maximum_range: i32,
) -> ActionResult {
    let Some(user) = state.store.get(actor) else {
        return ActionResult::NoTime;
    };
    let (ux, uy) = (user.x, user.y);

    // nearest visible actor, the user excepted
    let mut target: Option<(EntityId, String)> = None;
    let mut closest = maximum_range as f64 + 1.0;
    for candidate in state.store.actors() {
        if candidate.id == actor || !state.map.is_visible(candidate.x, candidate.y) {
            continue;
        }
        let distance = candidate.distance(ux, uy);
        if distance < closest {
            closest = distance;
            target = Some((candidate.id, candidate.name.clone()));
        }
    }

    let Some((target_id, target_name)) = target else {
        return ActionResult::Impossible("No enemy is close enough to strike.".into());
    };
    state.log.add(
        format!(
            "A lightning bolt strikes the {target_name} with a loud thunder, for {damage} damage!"
        ),
        colors::PLAYER_ATK,
    );
    movement::deal_damage(state, target_id, damage);
    consume(state, actor, item);
    ActionResult::Success
}

fn confusion(
    state: &mut GameState,
    actor: EntityId,
    item: EntityId,
    turns: u32,
    (tx, ty): (i32, i32),
) -> ActionResult {
    if !state.map.is_visible(tx, ty) {
        return ActionResult::Impossible("You cannot target an area that you cannot see.".into());
    }
    let Some(target) = state.store.actor_at(tx, ty) else {
        return ActionResult::Impossible("You must select an enemy to target.".into());
    };
    if target.id == actor {
        return ActionResult::Impossible("You cannot confuse yourself!".into());
    }
    let target_id = target.id;
    let target_name = target.name.clone();

    if let Some(entity) = state.store.get_mut(target_id) {
        if let Some(previous) = entity.ai.take() {
            entity.ai = Some(crate::component::Ai::confused(previous, turns));
        }
    }
    state.log.add(
        format!("The eyes of the {target_name} look vacant, as it starts to stumble around!"),
        colors::STATUS_EFFECT_APPLIED,
    );
    consume(state, actor, item);
    ActionResult::Success
}

fn fireball(
    state: &mut GameState,
    actor: EntityId,
    item: EntityId,
    damage: i32,
    radius: i32,
    (tx, ty): (i32, i32),
) -> ActionResult {
    if !state.map.is_visible(tx, ty) {
        return ActionResult::Impossible("You cannot target an area that you cannot see.".into());
    }

    // everyone in the blast, the user included
    let hits: Vec<(EntityId, String)> = state
        .store
        .actors()
        .filter(|a| a.distance(tx, ty) <= radius as f64)
        .map(|a| (a.id, a.name.clone()))
        .collect();
    if hits.is_empty() {
        return ActionResult::Impossible("There are no targets in the radius.".into());
    }

    for (id, name) in hits {
        state.log.add(
            format!("The {name} is engulfed in a fiery explosion, taking {damage} damage!"),
            colors::PLAYER_ATK,
        );
        movement::deal_damage(state, id, damage);
    }
    consume(state, actor, item);
    ActionResult::Success
}
