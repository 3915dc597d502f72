//! delve-core: turn engine for a grid-world roguelike
//!
//! This crate contains all game logic with no rendering or input
//! dependencies. The external layers (terminal UI, key translation,
//! menus) submit one [`Action`] per player turn and read back the tile
//! grid, entity list, and message log.
//!
//! State mutation is strictly turn-synchronous: a tick resolves the
//! player action, drives every other actor's AI once, then recomputes
//! the field of view. Nothing here blocks or runs concurrently.

pub mod action;
pub mod component;
pub mod data;
pub mod entity;
pub mod map;
pub mod message;
pub mod path;
pub mod save;

mod consts;
mod error;
mod gameloop;
mod rng;

pub use action::{Action, ActionResult, TargetRequest};
pub use consts::*;
pub use error::GameError;
pub use gameloop::{GameLoop, GameState, TickResult};
pub use rng::GameRng;
