//! Monster decision making.

use std::collections::VecDeque;
use std::mem;

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::consts::COMPASS;
use crate::entity::{EntityId, EntityStore};
use crate::map::GameMap;
use crate::path;
use crate::rng::GameRng;

/// Behaviour state for an actor. `Confused` wraps the AI it will
/// revert to when its counter runs out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Ai {
    Hostile {
        /// Cached route toward the player's last known cell, consumed
        /// one step per turn while the player is out of sight.
        path: VecDeque<(i32, i32)>,
    },
    Confused {
        previous: Box<Ai>,
        turns_left: u32,
    },
}

impl Ai {
    pub fn hostile() -> Self {
        Ai::Hostile { path: VecDeque::new() }
    }

    pub fn confused(previous: Ai, turns: u32) -> Self {
        Ai::Confused {
            previous: Box::new(previous),
            turns_left: turns,
        }
    }

    pub fn is_confused(&self) -> bool {
        matches!(self, Ai::Confused { .. })
    }

    /// Pick this actor's action for the turn. Mutates cached state
    /// (path consumption, confusion countdown and revert) but touches
    /// nothing outside the component.
    pub fn decide(
        &mut self,
        map: &GameMap,
        store: &EntityStore,
        me: EntityId,
        player: EntityId,
        rng: &mut GameRng,
    ) -> Action {
        match self {
            Ai::Hostile { path } => Self::decide_hostile(path, map, store, me, player),
            Ai::Confused { previous, turns_left } => {
                *turns_left = turns_left.saturating_sub(1);
                if *turns_left == 0 {
                    let prev = mem::replace(previous, Box::new(Ai::hostile()));
                    *self = *prev;
                    Action::Wait
                } else {
                    let (dx, dy) = COMPASS[rng.below(COMPASS.len() as u32) as usize];
                    Action::Bump { dx, dy }
                }
            }
        }
    }

    fn decide_hostile(
        path: &mut VecDeque<(i32, i32)>,
        map: &GameMap,
        store: &EntityStore,
        me: EntityId,
        player: EntityId,
    ) -> Action {
        let (Some(me), Some(target)) = (store.get(me), store.get(player)) else {
            return Action::Wait;
        };

        // The visibility field is computed from the player, so a
        // monster standing on a visible cell can see the player back.
        if map.is_visible(me.x, me.y) {
            let dx = target.x - me.x;
            let dy = target.y - me.y;
            if dx.abs().max(dy.abs()) <= 1 {
                return Action::Melee { dx, dy };
            }
            *path = path::find_path(map, store, (me.x, me.y), (target.x, target.y))
                .into_iter()
                .collect();
        }

        match path.pop_front() {
            Some((x, y)) => Action::Move {
                dx: x - me.x,
                dy: y - me.y,
            },
            None => Action::Wait,
        }
    }
}
