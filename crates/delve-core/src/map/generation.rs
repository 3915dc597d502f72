//! Dungeon generation: rooms-and-corridors with overlap rejection.
//!
//! Candidate rectangular rooms are sampled and rejected if they touch
//! any accepted room (the overlap test is inclusive of the 1-cell wall
//! border, so rooms never share walls). Each accepted room after the
//! first is connected to the previous room's center with an elbow
//! corridor. The first room's center is the player spawn; the last
//! room's center gets the stairs down.

use serde::{Deserialize, Serialize};

use super::{GameMap, TileKind};
use crate::GameError;
use crate::data::tables::{FloorCaps, SpawnTable};
use crate::entity::EntityStore;
use crate::rng::GameRng;

/// Everything the generator needs, passed in rather than read from
/// globals: dimensions, room bounds, and the per-floor content tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DungeonConfig {
    pub map_width: i32,
    pub map_height: i32,
    pub max_rooms: u32,
    pub room_min_size: i32,
    pub room_max_size: i32,
    pub max_monsters: FloorCaps,
    pub max_items: FloorCaps,
    pub monsters: SpawnTable,
    pub items: SpawnTable,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            map_width: crate::MAP_WIDTH,
            map_height: crate::MAP_HEIGHT,
            max_rooms: crate::MAX_ROOMS,
            room_min_size: crate::ROOM_MIN_SIZE,
            room_max_size: crate::ROOM_MAX_SIZE,
            max_monsters: FloorCaps::monsters(),
            max_items: FloorCaps::items(),
            monsters: SpawnTable::monsters(),
            items: SpawnTable::items(),
        }
    }
}

/// A rectangular room. `x2`/`y2` are the outer wall line; the interior
/// carved to floor is `x1+1..x2` by `y1+1..y2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x1: x,
            y1: y,
            x2: x + width,
            y2: y + height,
        }
    }

    /// Center cell of the room
    pub fn center(&self) -> (i32, i32) {
        ((self.x1 + self.x2) / 2, (self.y1 + self.y2) / 2)
    }

    /// Inclusive bounding-box overlap test. Touching edges count as an
    /// overlap, so accepted rooms keep at least one cell of wall
    /// between their interiors.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x1 <= other.x2 && self.x2 >= other.x1 && self.y1 <= other.y2 && self.y2 >= other.y1
    }

    /// Number of interior (carvable) cells
    pub fn inner_area(&self) -> i32 {
        ((self.x2 - self.x1 - 1) * (self.y2 - self.y1 - 1)).max(0)
    }

    /// Check if a cell lies in the interior
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x > self.x1 && x < self.x2 && y > self.y1 && y < self.y2
    }
}

/// Result of generating one floor: the map, its initial entities, and
/// the player spawn cell.
pub struct GeneratedFloor {
    pub map: GameMap,
    pub store: EntityStore,
    pub spawn: (i32, i32),
    pub rooms: Vec<Rect>,
}

/// Generate one dungeon floor. Spawned entities get ids starting at
/// `first_id`, so floors generated in sequence never reuse an id.
///
/// Deterministic up to `rng`. Fails with
/// [`GameError::GenerationFailed`] if every candidate room was
/// rejected; a degenerate empty map is never returned.
pub fn generate(
    config: &DungeonConfig,
    floor: u32,
    first_id: u64,
    rng: &mut GameRng,
) -> Result<GeneratedFloor, GameError> {
    let mut map = GameMap::new(config.map_width, config.map_height);
    let mut store = EntityStore::starting_at(first_id);
    let mut rooms: Vec<Rect> = Vec::new();

    for _ in 0..config.max_rooms {
        let room_width = rng.range(config.room_min_size, config.room_max_size);
        let room_height = rng.range(config.room_min_size, config.room_max_size);

        // A candidate that cannot sit inside the map is rejected, never
        // clamped into a degenerate room.
        if room_width + 1 >= config.map_width || room_height + 1 >= config.map_height {
            continue;
        }

        let x = rng.range(0, config.map_width - room_width - 1);
        let y = rng.range(0, config.map_height - room_height - 1);

        let new_room = Rect::new(x, y, room_width, room_height);
        if rooms.iter().any(|other| new_room.intersects(other)) {
            continue;
        }

        carve_room(&mut map, &new_room);

        if let Some(prev) = rooms.last() {
            carve_tunnel(&mut map, prev.center(), new_room.center(), rng);
        }

        // Hostile density skips the spawn room; items may still appear.
        let spawn_room = rooms.is_empty();
        place_entities(config, &new_room, &mut map, &mut store, floor, spawn_room, rng);

        rooms.push(new_room);
    }

    let Some(first) = rooms.first() else {
        return Err(GameError::GenerationFailed {
            attempts: config.max_rooms,
        });
    };
    let spawn = first.center();

    if let Some(last) = rooms.last() {
        let stairs = last.center();
        map.set_tile(stairs.0, stairs.1, TileKind::StairsDown);
        map.downstairs = Some(stairs);
    }

    Ok(GeneratedFloor {
        map,
        store,
        spawn,
        rooms,
    })
}

fn carve_room(map: &mut GameMap, room: &Rect) {
    for x in (room.x1 + 1)..room.x2 {
        for y in (room.y1 + 1)..room.y2 {
            map.set_tile(x, y, TileKind::Floor);
        }
    }
}

/// Elbow corridor between two cells: one bend, with the bend order
/// (horizontal-first or vertical-first) chosen 50/50.
fn carve_tunnel(map: &mut GameMap, start: (i32, i32), end: (i32, i32), rng: &mut GameRng) {
    let (x1, y1) = start;
    let (x2, y2) = end;

    let (corner_x, corner_y) = if rng.one_in(2) { (x2, y1) } else { (x1, y2) };

    carve_segment(map, (x1, y1), (corner_x, corner_y));
    carve_segment(map, (corner_x, corner_y), (x2, y2));
}

/// Rasterize an axis-aligned segment to floor tiles.
fn carve_segment(map: &mut GameMap, from: (i32, i32), to: (i32, i32)) {
    let (x1, y1) = from;
    let (x2, y2) = to;
    for x in x1.min(x2)..=x1.max(x2) {
        for y in y1.min(y2)..=y1.max(y2) {
            map.set_tile(x, y, TileKind::Floor);
        }
    }
}

/// Populate one room from the floor's content tables.
///
/// Placement retries a fresh in-room cell while the chosen cell is
/// occupied, bounded by the room's interior area so generation always
/// terminates; an exhausted entity is silently skipped.
fn place_entities(
    config: &DungeonConfig,
    room: &Rect,
    map: &GameMap,
    store: &mut EntityStore,
    floor: u32,
    spawn_room: bool,
    rng: &mut GameRng,
) {
    let monster_count = if spawn_room {
        0
    } else {
        rng.range(0, config.max_monsters.cap(floor) as i32)
    };
    let item_count = rng.range(0, config.max_items.cap(floor) as i32);

    let mut picks = Vec::new();
    for _ in 0..monster_count {
        if let Some(kind) = config.monsters.pick(floor, rng) {
            picks.push(kind);
        }
    }
    for _ in 0..item_count {
        if let Some(kind) = config.items.pick(floor, rng) {
            picks.push(kind);
        }
    }

    for kind in picks {
        let mut tries = room.inner_area();
        while tries > 0 {
            let x = rng.range(room.x1 + 1, room.x2 - 1);
            let y = rng.range(room.y1 + 1, room.y2 - 1);
            if map.is_walkable(x, y) && store.entities_at(x, y).next().is_none() {
                store.spawn(kind.instantiate(), x, y);
                break;
            }
            tries -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rect_center_and_area() {
        let r = Rect::new(10, 10, 6, 6);
        assert_eq!(r.center(), (13, 13));
        assert_eq!(r.inner_area(), 25);
    }

    #[test]
    fn test_rect_intersects_is_inclusive() {
        let a = Rect::new(0, 0, 6, 6);
        // shares the wall line x = 6
        let touching = Rect::new(6, 0, 6, 6);
        assert!(a.intersects(&touching));
        // one cell of separation
        let apart = Rect::new(7, 0, 6, 6);
        assert!(!a.intersects(&apart));
    }

    #[test]
    fn test_generate_places_stairs_and_spawn() {
        let config = DungeonConfig::default();
        let mut rng = GameRng::new(42);
        let floor = generate(&config, 1, 1, &mut rng).unwrap();

        let (sx, sy) = floor.spawn;
        assert!(floor.map.is_walkable(sx, sy));

        let stairs = floor.map.downstairs.unwrap();
        assert_eq!(floor.map.tile(stairs.0, stairs.1), Some(TileKind::StairsDown));
    }

    #[test]
    fn test_generate_fails_when_no_room_fits() {
        // 4x4 map cannot hold a 6..10 room
        let config = DungeonConfig {
            map_width: 4,
            map_height: 4,
            ..DungeonConfig::default()
        };
        let mut rng = GameRng::new(42);
        let result = generate(&config, 1, 1, &mut rng);
        assert!(matches!(result, Err(GameError::GenerationFailed { .. })));
    }

    #[test]
    fn test_oversized_candidates_are_rejected_not_clamped() {
        // 9x9 holds a 6- or 7-wide room but not 8..10; oversized
        // candidates must be skipped rather than squeezed in at the
        // edge.
        let config = DungeonConfig {
            map_width: 9,
            map_height: 9,
            ..DungeonConfig::default()
        };
        for seed in 0..20 {
            let mut rng = GameRng::new(seed);
            // rejection of every candidate is legitimate on a map this
            // tight; accepted rooms must still fit
            if let Ok(floor) = generate(&config, 1, 1, &mut rng) {
                for room in &floor.rooms {
                    assert!(room.x1 >= 0 && room.y1 >= 0, "seed {seed}: {room:?}");
                    assert!(
                        room.x2 < config.map_width && room.y2 < config.map_height,
                        "seed {seed}: {room:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_spawn_room_has_no_monsters() {
        for seed in 0..20 {
            let config = DungeonConfig::default();
            let mut rng = GameRng::new(seed);
            let floor = generate(&config, 7, 1, &mut rng).unwrap();

            let spawn_room = floor.rooms[0];
            for entity in floor.store.actors() {
                assert!(
                    !spawn_room.contains(entity.x, entity.y),
                    "monster {:?} inside spawn room",
                    (entity.x, entity.y)
                );
            }
        }
    }

    /// Flood fill over walkable tiles from the spawn cell.
    fn reachable_cells(map: &GameMap, from: (i32, i32)) -> Vec<(i32, i32)> {
        let mut seen = vec![false; (map.width() * map.height()) as usize];
        let mut stack = vec![from];
        let mut out = Vec::new();
        while let Some((x, y)) = stack.pop() {
            if !map.in_bounds(x, y) || !map.is_walkable(x, y) {
                continue;
            }
            let i = (y * map.width() + x) as usize;
            if seen[i] {
                continue;
            }
            seen[i] = true;
            out.push((x, y));
            for (dx, dy) in crate::COMPASS {
                stack.push((x + dx, y + dy));
            }
        }
        out
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// Every walkable tile is reachable from spawn: corridor
        /// carving connects all accepted rooms.
        #[test]
        fn prop_dungeon_fully_connected(seed in any::<u64>()) {
            let config = DungeonConfig::default();
            let mut rng = GameRng::new(seed);
            let floor = generate(&config, 1, 1, &mut rng).unwrap();

            let reached = reachable_cells(&floor.map, floor.spawn);
            let mut walkable = 0;
            for x in 0..floor.map.width() {
                for y in 0..floor.map.height() {
                    if floor.map.is_walkable(x, y) {
                        walkable += 1;
                    }
                }
            }
            prop_assert_eq!(reached.len(), walkable);
        }

        /// Accepted rooms never overlap, walls included.
        #[test]
        fn prop_rooms_disjoint(seed in any::<u64>()) {
            let config = DungeonConfig::default();
            let mut rng = GameRng::new(seed);
            let floor = generate(&config, 1, 1, &mut rng).unwrap();

            for (i, a) in floor.rooms.iter().enumerate() {
                for b in floor.rooms.iter().skip(i + 1) {
                    prop_assert!(!a.intersects(b));
                }
            }
        }

        /// Entities only ever land on walkable tiles, at most one
        /// blocking entity per cell.
        #[test]
        fn prop_placement_valid(seed in any::<u64>()) {
            let config = DungeonConfig::default();
            let mut rng = GameRng::new(seed);
            let floor = generate(&config, 9, 1, &mut rng).unwrap();

            for e in floor.store.entities() {
                prop_assert!(floor.map.is_walkable(e.x, e.y));
            }
            for x in 0..floor.map.width() {
                for y in 0..floor.map.height() {
                    let blockers = floor
                        .store
                        .entities_at(x, y)
                        .filter(|e| e.blocks_movement)
                        .count();
                    prop_assert!(blockers <= 1);
                }
            }
        }
    }
}
