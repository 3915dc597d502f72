//! Equipped-item slots and wearable stats.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::entity::EntityId;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Slot {
    Weapon,
    Armor,
}

/// Marks an item as wearable and carries its stat bonuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equippable {
    pub slot: Slot,
    pub power_bonus: i32,
    pub defense_bonus: i32,
}

impl Equippable {
    pub fn weapon(power_bonus: i32) -> Self {
        Self {
            slot: Slot::Weapon,
            power_bonus,
            defense_bonus: 0,
        }
    }

    pub fn armor(defense_bonus: i32) -> Self {
        Self {
            slot: Slot::Armor,
            power_bonus: 0,
            defense_bonus,
        }
    }
}

/// The actor's equipped slots. Each slot references an item held in
/// the same entity's inventory; dropping an equipped item unequips it
/// first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub weapon: Option<EntityId>,
    pub armor: Option<EntityId>,
}

impl Equipment {
    pub fn is_equipped(&self, id: EntityId) -> bool {
        self.weapon == Some(id) || self.armor == Some(id)
    }

    pub fn slot(&self, slot: Slot) -> Option<EntityId> {
        match slot {
            Slot::Weapon => self.weapon,
            Slot::Armor => self.armor,
        }
    }

    pub fn set_slot(&mut self, slot: Slot, id: Option<EntityId>) {
        match slot {
            Slot::Weapon => self.weapon = id,
            Slot::Armor => self.armor = id,
        }
    }

    /// Clear whichever slot holds `id`, if any.
    pub fn unequip(&mut self, id: EntityId) {
        if self.weapon == Some(id) {
            self.weapon = None;
        }
        if self.armor == Some(id) {
            self.armor = None;
        }
    }
}
