//! Grid pathfinding.
//!
//! Dijkstra over the 8-connected grid with a dynamic cost field:
//! walkable cells cost 1, cells holding a blocking entity cost 11, so
//! routes flow around occupied cells without treating them as walls.
//! Edge cost is the destination cell's cost times a step multiplier
//! that makes diagonals dearer than cardinals, which keeps paths from
//! zig-zagging when a straight line exists.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::consts::{COMPASS, PATH_BLOCKER_PENALTY, PATH_CARDINAL_COST, PATH_DIAGONAL_COST};
use crate::entity::EntityStore;
use crate::map::GameMap;

fn cell_cost(map: &GameMap, store: &EntityStore, x: i32, y: i32) -> Option<u32> {
    if !map.is_walkable(x, y) {
        return None;
    }
    let mut cost = 1;
    if store.blocking_entity_at(x, y).is_some() {
        cost += PATH_BLOCKER_PENALTY;
    }
    Some(cost)
}

/// Cheapest route from `start` to `goal`, excluding `start` itself.
/// Returns an empty vector when the goal is unreachable or either
/// endpoint is off the map.
pub fn find_path(
    map: &GameMap,
    store: &EntityStore,
    start: (i32, i32),
    goal: (i32, i32),
) -> Vec<(i32, i32)> {
    if !map.in_bounds(start.0, start.1) || !map.in_bounds(goal.0, goal.1) {
        return Vec::new();
    }
    if start == goal {
        return Vec::new();
    }

    let width = map.width();
    let len = (width * map.height()) as usize;
    let idx = |x: i32, y: i32| (y * width + x) as usize;

    let mut dist = vec![u32::MAX; len];
    let mut prev = vec![usize::MAX; len];
    let mut heap = BinaryHeap::new();

    let start_idx = idx(start.0, start.1);
    let goal_idx = idx(goal.0, goal.1);
    dist[start_idx] = 0;
    heap.push(Reverse((0u32, start_idx)));

    while let Some(Reverse((cost, current))) = heap.pop() {
        if current == goal_idx {
            break;
        }
        if cost > dist[current] {
            continue;
        }
        let cx = current as i32 % width;
        let cy = current as i32 / width;
        for (dx, dy) in COMPASS {
            let nx = cx + dx;
            let ny = cy + dy;
            if !map.in_bounds(nx, ny) {
                continue;
            }
            let Some(cell) = cell_cost(map, store, nx, ny) else {
                continue;
            };
            let step = if dx != 0 && dy != 0 {
                PATH_DIAGONAL_COST
            } else {
                PATH_CARDINAL_COST
            };
            let next = idx(nx, ny);
            let next_cost = cost + cell * step;
            if next_cost < dist[next] {
                dist[next] = next_cost;
                prev[next] = current;
                heap.push(Reverse((next_cost, next)));
            }
        }
    }

    if dist[goal_idx] == u32::MAX {
        return Vec::new();
    }

    let mut path = Vec::new();
    let mut current = goal_idx;
    while current != start_idx {
        path.push((current as i32 % width, current as i32 / width));
        current = prev[current];
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::templates;
    use crate::map::TileKind;

    fn open_map(width: i32, height: i32) -> GameMap {
        let mut map = GameMap::new(width, height);
        for y in 0..height {
            for x in 0..width {
                map.set_tile(x, y, TileKind::Floor);
            }
        }
        map
    }

    #[test]
    fn test_straight_line_path() {
        let map = open_map(10, 10);
        let store = EntityStore::new();
        let path = find_path(&map, &store, (1, 5), (6, 5));
        assert_eq!(path, vec![(2, 5), (3, 5), (4, 5), (5, 5), (6, 5)]);
    }

    #[test]
    fn test_path_excludes_start_and_ends_at_goal() {
        let map = open_map(10, 10);
        let store = EntityStore::new();
        let path = find_path(&map, &store, (2, 2), (7, 6));
        assert_ne!(path.first(), Some(&(2, 2)));
        assert_eq!(path.last(), Some(&(7, 6)));
        // consecutive steps are king moves
        let mut from = (2, 2);
        for &(x, y) in &path {
            assert!((x - from.0).abs() <= 1 && (y - from.1).abs() <= 1);
            from = (x, y);
        }
    }

    #[test]
    fn test_unreachable_goal_yields_empty_path() {
        let mut map = open_map(10, 10);
        // wall off the right half
        for y in 0..10 {
            map.set_tile(5, y, TileKind::Wall);
        }
        let store = EntityStore::new();
        assert!(find_path(&map, &store, (1, 1), (8, 8)).is_empty());
    }

    #[test]
    fn test_routes_around_walls() {
        let mut map = open_map(10, 10);
        for y in 0..9 {
            map.set_tile(5, y, TileKind::Wall);
        }
        let store = EntityStore::new();
        let path = find_path(&map, &store, (1, 1), (8, 1));
        assert!(!path.is_empty());
        assert!(path.iter().any(|&(_, y)| y == 9));
        assert_eq!(path.last(), Some(&(8, 1)));
    }

    #[test]
    fn test_blocking_entity_is_detoured_not_walled() {
        let mut map = GameMap::new(5, 3);
        // single corridor, so the only route runs through the blocker
        for x in 0..5 {
            map.set_tile(x, 1, TileKind::Floor);
        }
        let mut store = EntityStore::new();
        store.spawn(templates::orc(), 2, 1);
        let path = find_path(&map, &store, (0, 1), (4, 1));
        assert_eq!(path, vec![(1, 1), (2, 1), (3, 1), (4, 1)]);

        // given a side route, the blocker's penalty pushes the path
        // around it
        let open = open_map(5, 3);
        let mut store = EntityStore::new();
        store.spawn(templates::orc(), 2, 1);
        let path = find_path(&open, &store, (0, 1), (4, 1));
        assert!(!path.contains(&(2, 1)));
        assert_eq!(path.last(), Some(&(4, 1)));
    }

    #[test]
    fn test_start_equals_goal() {
        let map = open_map(4, 4);
        let store = EntityStore::new();
        assert!(find_path(&map, &store, (2, 2), (2, 2)).is_empty());
    }
}
