//! Tile grid with visibility and exploration tracking.

pub mod fov;
pub mod generation;
mod tile;

pub use generation::{DungeonConfig, Rect};
pub use tile::{Graphic, TileKind};

use serde::{Deserialize, Serialize};

/// Fixed-size tile grid for one dungeon floor.
///
/// Dimensions are set at generation time and never change. The
/// `visible` array is fully recomputed each turn by [`fov::compute`];
/// `explored` only ever flips false to true.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMap {
    width: i32,
    height: i32,
    tiles: Vec<TileKind>,
    visible: Vec<bool>,
    explored: Vec<bool>,
    /// Cell holding the stairs-down tile, if the floor has one
    pub downstairs: Option<(i32, i32)>,
}

impl GameMap {
    /// Create a map of the given dimensions, filled with wall.
    pub fn new(width: i32, height: i32) -> Self {
        let len = (width * height) as usize;
        Self {
            width,
            height,
            tiles: vec![TileKind::Wall; len],
            visible: vec![false; len],
            explored: vec![false; len],
            downstairs: None,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Check if (x, y) is on the map. Out-of-bounds coordinates are
    /// rejected everywhere, never wrapped.
    pub const fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some((y * self.width + x) as usize)
        } else {
            None
        }
    }

    /// Tile kind at a cell, or `None` out of bounds.
    pub fn tile(&self, x: i32, y: i32) -> Option<TileKind> {
        self.idx(x, y).map(|i| self.tiles[i])
    }

    /// Overwrite the tile kind at a cell. Out of bounds is a no-op.
    pub fn set_tile(&mut self, x: i32, y: i32, kind: TileKind) {
        if let Some(i) = self.idx(x, y) {
            self.tiles[i] = kind;
        }
    }

    /// Check if a cell can be walked on (false out of bounds).
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.tile(x, y).is_some_and(|t| t.is_walkable())
    }

    /// Check if sight passes through a cell (false out of bounds).
    pub fn is_transparent(&self, x: i32, y: i32) -> bool {
        self.tile(x, y).is_some_and(|t| t.is_transparent())
    }

    /// Check if a cell is in the current field of view.
    pub fn is_visible(&self, x: i32, y: i32) -> bool {
        self.idx(x, y).is_some_and(|i| self.visible[i])
    }

    /// Check if a cell has ever been seen.
    pub fn is_explored(&self, x: i32, y: i32) -> bool {
        self.idx(x, y).is_some_and(|i| self.explored[i])
    }

    pub(crate) fn clear_visible(&mut self) {
        self.visible.fill(false);
    }

    /// Mark a cell visible and fold it into the explored set.
    pub(crate) fn reveal(&mut self, x: i32, y: i32) {
        if let Some(i) = self.idx(x, y) {
            self.visible[i] = true;
            self.explored[i] = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_map_is_all_wall() {
        let map = GameMap::new(10, 8);
        for x in 0..10 {
            for y in 0..8 {
                assert_eq!(map.tile(x, y), Some(TileKind::Wall));
                assert!(!map.is_visible(x, y));
                assert!(!map.is_explored(x, y));
            }
        }
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let map = GameMap::new(10, 8);
        assert!(!map.in_bounds(-1, 0));
        assert!(!map.in_bounds(10, 0));
        assert!(!map.in_bounds(0, 8));
        assert_eq!(map.tile(-1, -1), None);
        assert!(!map.is_walkable(100, 100));
        assert!(!map.is_visible(-5, 3));
    }

    #[test]
    fn test_set_tile() {
        let mut map = GameMap::new(10, 8);
        map.set_tile(3, 4, TileKind::Floor);
        assert!(map.is_walkable(3, 4));
        // out of bounds write is a no-op, not a wrap
        map.set_tile(-1, 4, TileKind::Floor);
        assert_eq!(map.tile(9, 3), Some(TileKind::Wall));
    }
}
