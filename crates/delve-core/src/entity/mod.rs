//! Entities and their store.

mod store;

pub use store::EntityStore;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::component::{Ai, Consumable, Equipment, Equippable, Fighter, Inventory, Level, Slot};
use crate::data::colors::Rgb;

/// Stable identifier handed out by [`EntityStore`]. Ids survive moves
/// between the map and an inventory, and across floors.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct EntityId(pub u64);

/// Draw layer, lowest first. Corpses sit under items, items under
/// live actors sharing the cell.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
#[repr(u8)]
pub enum RenderOrder {
    Corpse = 0,
    Item = 1,
    Actor = 2,
}

/// A thing on the map: actor, item, or corpse. Capabilities are
/// optional owned components rather than subtypes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    pub glyph: char,
    pub color: Rgb,
    pub x: i32,
    pub y: i32,
    pub blocks_movement: bool,
    pub render_order: RenderOrder,
    pub fighter: Option<Fighter>,
    pub ai: Option<Ai>,
    pub consumable: Option<Consumable>,
    pub equippable: Option<Equippable>,
    pub inventory: Option<Inventory>,
    pub equipment: Option<Equipment>,
    pub level: Option<Level>,
}

impl Entity {
    /// Bare entity with no components; templates chain the `with_*`
    /// builders onto this. The store assigns the real id on spawn.
    pub fn new(name: &str, glyph: char, color: Rgb) -> Self {
        Self {
            id: EntityId(0),
            name: name.to_string(),
            glyph,
            color,
            x: 0,
            y: 0,
            blocks_movement: false,
            render_order: RenderOrder::Item,
            fighter: None,
            ai: None,
            consumable: None,
            equippable: None,
            inventory: None,
            equipment: None,
            level: None,
        }
    }

    pub fn blocking(mut self) -> Self {
        self.blocks_movement = true;
        self.render_order = RenderOrder::Actor;
        self
    }

    pub fn with_fighter(mut self, fighter: Fighter) -> Self {
        self.fighter = Some(fighter);
        self
    }

    pub fn with_ai(mut self, ai: Ai) -> Self {
        self.ai = Some(ai);
        self
    }

    pub fn with_consumable(mut self, consumable: Consumable) -> Self {
        self.consumable = Some(consumable);
        self
    }

    pub fn with_equippable(mut self, equippable: Equippable) -> Self {
        self.equippable = Some(equippable);
        self
    }

    pub fn with_inventory(mut self, capacity: usize) -> Self {
        self.inventory = Some(Inventory::new(capacity));
        self
    }

    pub fn with_equipment(mut self) -> Self {
        self.equipment = Some(Equipment::default());
        self
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    /// True while the entity can act: both stats and a brain. Corpses
    /// fail this (their `ai` is cleared on death).
    pub fn is_actor(&self) -> bool {
        self.fighter.is_some() && self.ai.is_some()
    }

    pub fn chebyshev_distance(&self, x: i32, y: i32) -> i32 {
        (self.x - x).abs().max((self.y - y).abs())
    }

    pub fn distance(&self, x: i32, y: i32) -> f64 {
        let dx = (self.x - x) as f64;
        let dy = (self.y - y) as f64;
        (dx * dx + dy * dy).sqrt()
    }

    fn bonus(&self, pick: impl Fn(&Equippable) -> i32) -> i32 {
        let (Some(equipment), Some(inventory)) = (&self.equipment, &self.inventory) else {
            return 0;
        };
        [Slot::Weapon, Slot::Armor]
            .into_iter()
            .filter_map(|slot| equipment.slot(slot))
            .filter_map(|id| inventory.get(id))
            .filter_map(|item| item.equippable.as_ref())
            .map(&pick)
            .sum()
    }

    /// Effective melee power: base stat plus equipment bonuses.
    pub fn power(&self) -> i32 {
        let base = self.fighter.as_ref().map_or(0, |f| f.base_power);
        base + self.bonus(|e| e.power_bonus)
    }

    /// Effective defense: base stat plus equipment bonuses.
    pub fn defense(&self) -> i32 {
        let base = self.fighter.as_ref().map_or(0, |f| f.base_defense);
        base + self.bonus(|e| e.defense_bonus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::templates;

    #[test]
    fn test_render_order_layers() {
        assert!(RenderOrder::Corpse < RenderOrder::Item);
        assert!(RenderOrder::Item < RenderOrder::Actor);
    }

    #[test]
    fn test_equipment_bonuses_apply() {
        let mut player = templates::player();
        let mut sword = templates::sword();
        sword.id = EntityId(7);
        player.inventory.as_mut().unwrap().add(sword).unwrap();
        assert_eq!(player.power(), 5);
        player
            .equipment
            .as_mut()
            .unwrap()
            .set_slot(Slot::Weapon, Some(EntityId(7)));
        assert_eq!(player.power(), 9);
        assert_eq!(player.defense(), 2);
    }

    #[test]
    fn test_corpse_is_not_an_actor() {
        let mut orc = templates::orc();
        assert!(orc.is_actor());
        orc.ai = None;
        assert!(!orc.is_actor());
    }
}
