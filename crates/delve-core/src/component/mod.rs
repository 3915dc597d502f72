//! Optional per-entity components.
//!
//! Components are plain owned data on [`crate::entity::Entity`]; there
//! is no registry or archetype machinery. An entity is an actor when it
//! carries both a `Fighter` and an `Ai`.

pub mod ai;
pub mod consumable;
pub mod equipment;
pub mod fighter;
pub mod inventory;
pub mod level;

pub use ai::Ai;
pub use consumable::Consumable;
pub use equipment::{Equipment, Equippable, Slot};
pub use fighter::Fighter;
pub use inventory::Inventory;
pub use level::Level;
