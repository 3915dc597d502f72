//! Core game constants.

/// Default map dimensions
pub const MAP_WIDTH: i32 = 80;
pub const MAP_HEIGHT: i32 = 43;

/// Room placement limits
pub const MAX_ROOMS: u32 = 30;
pub const ROOM_MIN_SIZE: i32 = 6;
pub const ROOM_MAX_SIZE: i32 = 10;

/// Sight radius for the per-turn visibility recompute (diamond metric)
pub const FOV_RADIUS: i32 = 8;

/// Step costs for 8-directional pathfinding (3/2 approximates sqrt(2))
pub const PATH_CARDINAL_COST: u32 = 2;
pub const PATH_DIAGONAL_COST: u32 = 3;

/// Soft cost added to walkable cells occupied by a blocking entity.
/// Low values crowd pursuers into hallways; high values make them
/// take long routes to surround their target.
pub const PATH_BLOCKER_PENALTY: u32 = 10;

/// The eight compass directions as (dx, dy) deltas
pub const COMPASS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];
