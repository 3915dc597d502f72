//! Per-floor entity container.

use serde::{Deserialize, Serialize};

use super::{Entity, EntityId};

/// Owns every entity on one floor. Ids are unique for the lifetime of
/// the store and are never reused, including for entities that have
/// moved into an inventory and back.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityStore {
    entities: Vec<Entity>,
    next_id: u64,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Store whose ids begin at `first_id`. A new floor's store starts
    /// above the previous floor's counter, so entities carried between
    /// floors (the player, inventory items dropped later) never share
    /// an id with fresh spawns.
    pub fn starting_at(first_id: u64) -> Self {
        Self {
            entities: Vec::new(),
            next_id: first_id.max(1),
        }
    }

    /// The id the next allocation will hand out.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Hand out a fresh id without placing an entity. Used for items
    /// created directly inside an inventory.
    pub fn allocate_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Place a freshly built entity at a cell, assigning its id.
    pub fn spawn(&mut self, mut entity: Entity, x: i32, y: i32) -> EntityId {
        entity.id = self.allocate_id();
        entity.x = x;
        entity.y = y;
        let id = entity.id;
        self.entities.push(entity);
        id
    }

    /// Re-insert an entity that already has an id, e.g. a dropped item
    /// or the player arriving on a new floor.
    pub fn insert(&mut self, entity: Entity) {
        self.next_id = self.next_id.max(entity.id.0 + 1);
        self.entities.push(entity);
    }

    /// Take an entity out of the store.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let pos = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.remove(pos))
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Everything standing on a cell, corpses and items included.
    pub fn entities_at(&self, x: i32, y: i32) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(move |e| e.x == x && e.y == y)
    }

    /// The blocking entity on a cell, if any. At most one can occupy
    /// a cell since movement checks this before stepping.
    pub fn blocking_entity_at(&self, x: i32, y: i32) -> Option<&Entity> {
        self.entities_at(x, y).find(|e| e.blocks_movement)
    }

    /// Live actors only: entities with both a fighter and an AI.
    pub fn actors(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.is_actor())
    }

    /// The live actor on a cell, if any.
    pub fn actor_at(&self, x: i32, y: i32) -> Option<&Entity> {
        self.entities_at(x, y).find(|e| e.is_actor())
    }

    /// Entities in draw order: corpses first, then items, then live
    /// actors, so later entries paint over earlier ones.
    pub fn render_sorted(&self) -> Vec<&Entity> {
        let mut sorted: Vec<&Entity> = self.entities.iter().collect();
        sorted.sort_by_key(|e| e.render_order);
        sorted
    }

    /// Snapshot of every id, in insertion order. The AI sweep iterates
    /// this so entities spawned or killed mid-sweep cannot skew it.
    pub fn ids(&self) -> Vec<EntityId> {
        self.entities.iter().map(|e| e.id).collect()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
