//! Field-of-view computation.
//!
//! Recomputes the visible set from the observer's cell once per turn:
//! every cell within a diamond-shaped radius is visible if an
//! unobstructed sight line can be traced to it. A sight-blocking tile
//! is itself visible but terminates the ray, so room walls light up
//! without exposing anything behind them. Newly visible cells are
//! folded into the cumulative explored set.

use super::GameMap;

/// Recompute `map.visible` from the observer at (ox, oy) and union the
/// result into `map.explored`.
pub fn compute(map: &mut GameMap, ox: i32, oy: i32, radius: i32) {
    map.clear_visible();

    if !map.in_bounds(ox, oy) {
        return;
    }
    map.reveal(ox, oy);

    for dx in -radius..=radius {
        for dy in -radius..=radius {
            // Diamond metric: |dx| + |dy| within radius
            if dx.abs() + dy.abs() > radius {
                continue;
            }
            let tx = ox + dx;
            let ty = oy + dy;
            if map.in_bounds(tx, ty) && line_of_sight(map, ox, oy, tx, ty) {
                map.reveal(tx, ty);
            }
        }
    }
}

/// Trace a Bresenham line from (x0, y0) to (x1, y1) over tile
/// transparency. The endpoint may be opaque (you can see a wall); any
/// opaque cell before it blocks the line.
pub fn line_of_sight(map: &GameMap, x0: i32, y0: i32, x1: i32, y1: i32) -> bool {
    let mut x = x0;
    let mut y = y0;

    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if x != x0 || y != y0 {
            if !map.in_bounds(x, y) {
                return false;
            }
            if !map.is_transparent(x, y) {
                return x == x1 && y == y1;
            }
        }

        if x == x1 && y == y1 {
            return true;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}
