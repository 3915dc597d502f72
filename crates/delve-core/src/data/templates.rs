//! Entity factories.
//!
//! Each factory builds a fresh entity with fresh components; spawning
//! never clones a shared template object.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::colors::{self, Rgb};
use crate::component::{Ai, Consumable, Equippable, Fighter, Level};
use crate::entity::Entity;

/// Spawnable content kinds referenced by the floor tables.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum SpawnKind {
    Orc,
    Troll,
    HealthPotion,
    LightningScroll,
    ConfusionScroll,
    FireballScroll,
    Sword,
    ChainMail,
}

impl SpawnKind {
    pub fn instantiate(&self) -> Entity {
        match self {
            SpawnKind::Orc => orc(),
            SpawnKind::Troll => troll(),
            SpawnKind::HealthPotion => health_potion(),
            SpawnKind::LightningScroll => lightning_scroll(),
            SpawnKind::ConfusionScroll => confusion_scroll(),
            SpawnKind::FireballScroll => fireball_scroll(),
            SpawnKind::Sword => sword(),
            SpawnKind::ChainMail => chain_mail(),
        }
    }
}

pub fn player() -> Entity {
    Entity::new("Player", '@', Rgb(255, 255, 255))
        .blocking()
        .with_fighter(Fighter::new(30, 2, 5))
        .with_ai(Ai::hostile())
        .with_inventory(26)
        .with_equipment()
        .with_level(Level::new(200, 0))
}

pub fn orc() -> Entity {
    Entity::new("Orc", 'o', Rgb(63, 127, 63))
        .blocking()
        .with_fighter(Fighter::new(10, 0, 3))
        .with_ai(Ai::hostile())
        .with_level(Level::new(0, 35))
}

pub fn troll() -> Entity {
    Entity::new("Troll", 'T', Rgb(48, 138, 135))
        .blocking()
        .with_fighter(Fighter::new(16, 1, 4))
        .with_ai(Ai::hostile())
        .with_level(Level::new(0, 100))
}

pub fn health_potion() -> Entity {
    Entity::new("Health Potion", '!', Rgb(205, 13, 58))
        .with_consumable(Consumable::Healing { amount: 4 })
}

pub fn lightning_scroll() -> Entity {
    Entity::new("Lightning Scroll", '~', Rgb(188, 209, 50)).with_consumable(
        Consumable::Lightning {
            damage: 20,
            maximum_range: 5,
        },
    )
}

pub fn confusion_scroll() -> Entity {
    Entity::new("Confusion Scroll", '~', Rgb(207, 63, 255))
        .with_consumable(Consumable::Confusion { turns: 10 })
}

pub fn fireball_scroll() -> Entity {
    Entity::new("Fireball Scroll", '~', Rgb(205, 13, 58)).with_consumable(Consumable::Fireball {
        damage: 12,
        radius: 3,
    })
}

pub fn dagger() -> Entity {
    Entity::new("Dagger", '/', colors::WHITE).with_equippable(Equippable::weapon(2))
}

pub fn sword() -> Entity {
    Entity::new("Sword", '/', colors::WHITE).with_equippable(Equippable::weapon(4))
}

pub fn leather_armor() -> Entity {
    Entity::new("Leather Armor", '[', Rgb(139, 69, 19)).with_equippable(Equippable::armor(1))
}

pub fn chain_mail() -> Entity {
    Entity::new("Chain Mail", '[', Rgb(139, 69, 19)).with_equippable(Equippable::armor(3))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::RenderOrder;

    #[test]
    fn test_actor_templates_are_actors() {
        for entity in [player(), orc(), troll()] {
            assert!(entity.is_actor(), "{} should be an actor", entity.name);
            assert!(entity.blocks_movement);
            assert_eq!(entity.render_order, RenderOrder::Actor);
        }
    }

    #[test]
    fn test_item_templates_do_not_block() {
        for kind in [
            SpawnKind::HealthPotion,
            SpawnKind::LightningScroll,
            SpawnKind::ConfusionScroll,
            SpawnKind::FireballScroll,
            SpawnKind::Sword,
            SpawnKind::ChainMail,
        ] {
            let entity = kind.instantiate();
            assert!(!entity.blocks_movement, "{} should not block", entity.name);
            assert_eq!(entity.render_order, RenderOrder::Item);
        }
    }

    #[test]
    fn test_factories_build_fresh_components() {
        let mut a = orc();
        let b = orc();
        a.fighter.as_mut().unwrap().take_damage(5);
        assert_eq!(b.fighter.as_ref().unwrap().hp, 10);
    }
}
