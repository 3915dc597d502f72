//! Player and monster intents, and their resolution.
//!
//! An [`Action`] is a one-shot intent; resolving it mutates
//! [`crate::gameloop::GameState`] and reports how it went through
//! [`ActionResult`]. Only `Success` consumes the acting entity's turn.

pub mod items;
pub mod movement;

use crate::entity::EntityId;
use crate::error::GameError;
use crate::gameloop::GameState;

/// One turn's worth of intent for a single entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Step by a direction delta. Silently does nothing against
    /// walls, map edges, or blocking entities.
    Move { dx: i32, dy: i32 },
    /// Attack the actor one cell away in the given direction.
    /// Silently does nothing if no actor stands there.
    Melee { dx: i32, dy: i32 },
    /// Melee if a live actor occupies the destination, Move otherwise.
    Bump { dx: i32, dy: i32 },
    /// Pass the turn.
    Wait,
    /// Request an orderly exit from the run loop.
    Escape,
    /// Pick up an item from the acting entity's cell.
    Pickup,
    /// Drop a carried item onto the acting entity's cell.
    Drop { item: EntityId },
    /// Use a carried consumable, optionally at a resolved target cell.
    UseItem {
        item: EntityId,
        target: Option<(i32, i32)>,
    },
    /// Equip a carried item, or unequip it if already worn.
    ToggleEquip { item: EntityId },
    /// Take the stairs down to the next floor.
    Descend,
}

/// Target the external layer must resolve before a [`Action::UseItem`]
/// can complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetRequest {
    /// A single visible cell holding an actor.
    Cell,
    /// A visible cell; everything within `radius` is affected.
    Area { radius: i32 },
}

/// Outcome of resolving one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult {
    /// State changed; the turn is consumed.
    Success,
    /// Silent no-op. No state change, no message, turn preserved.
    NoTime,
    /// User-facing rejection. The message is logged and the turn is
    /// preserved; no other state changed.
    Impossible(String),
    /// A targeted item needs a cell before it can resolve. Nothing
    /// was mutated.
    NeedsTarget(TargetRequest),
    /// Shutdown was requested.
    Quit,
}

/// Resolve one action for one entity. Errors only surface from floor
/// regeneration during descent.
pub(crate) fn resolve(
    state: &mut GameState,
    actor: EntityId,
    action: Action,
) -> Result<ActionResult, GameError> {
    let result = match action {
        Action::Move { dx, dy } => movement::step(state, actor, dx, dy),
        Action::Melee { dx, dy } => movement::melee(state, actor, dx, dy),
        Action::Bump { dx, dy } => movement::bump(state, actor, dx, dy),
        Action::Wait => ActionResult::Success,
        Action::Escape => ActionResult::Quit,
        Action::Pickup => items::pickup(state, actor),
        Action::Drop { item } => items::drop_item(state, actor, item),
        Action::UseItem { item, target } => items::use_item(state, actor, item, target),
        Action::ToggleEquip { item } => items::toggle_equip(state, actor, item),
        Action::Descend => return state.descend(),
    };
    Ok(result)
}
