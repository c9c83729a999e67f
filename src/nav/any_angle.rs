//! Any-angle pathfinding: 8-directional BFS plus line-of-sight
//! simplification
//!
//! The raw 8-directional path hugs the grid; the simplification pass
//! skips ahead along straight segments whenever the segment's tile
//! traversal stays clear of the blocked map, then re-quantizes to tiles.

use std::collections::VecDeque;

use ahash::AHashMap;

use crate::core::types::{TilePos, Vec2};
use crate::map::grid::TileGrid;
use crate::nav::blocked::BlockedMap;
use crate::sim::constants::TILE_SIZE;

/// Find an any-angle path from `start` to `goal`, excluding `start`
///
/// `other_units` inflate the blocked map by `unit_margin`; mountains by
/// `mountain_margin`. Returns empty when start or goal is blocked, out
/// of bounds, or unreachable.
pub fn any_angle_path(
    grid: &TileGrid,
    start: TilePos,
    goal: TilePos,
    other_units: &[Vec2],
    mountain_margin: f32,
    unit_margin: f32,
) -> Vec<TilePos> {
    if start == goal {
        return Vec::new();
    }

    let blocked = BlockedMap::build(grid, other_units, mountain_margin, unit_margin);
    if blocked.is_blocked(start) || blocked.is_blocked(goal) {
        return Vec::new();
    }

    let tile_path = bfs8(&blocked, start, goal);
    if tile_path.is_empty() {
        return Vec::new();
    }

    // Tile path → pixel waypoints at tile centers → LOS simplification
    let waypoints: Vec<Vec2> = tile_path.iter().map(|pos| grid.tile_center(*pos)).collect();
    let simplified = simplify_by_line_of_sight(&waypoints, &blocked);

    // Re-quantize, dropping the start tile and consecutive duplicates
    let mut tiles = Vec::with_capacity(simplified.len());
    for point in &simplified {
        if let Some(tile) = grid.tile_at(*point) {
            if tile != start && tiles.last() != Some(&tile) {
                tiles.push(tile);
            }
        }
    }
    tiles
}

/// 8-directional BFS over the blocked map, including `start` in the
/// result
///
/// Diagonal steps require both adjacent orthogonal tiles to be clear so
/// the path never squeezes through a corner.
fn bfs8(blocked: &BlockedMap, start: TilePos, goal: TilePos) -> Vec<TilePos> {
    let mut parent: AHashMap<TilePos, TilePos> = AHashMap::new();
    let mut queue = VecDeque::new();
    parent.insert(start, start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        if current == goal {
            break;
        }

        for neighbor in current.neighbors8() {
            if blocked.is_blocked(neighbor) || parent.contains_key(&neighbor) {
                continue;
            }

            let dx = neighbor.x - current.x;
            let dy = neighbor.y - current.y;
            if dx != 0 && dy != 0 {
                let side_a = TilePos::new(current.x + dx, current.y);
                let side_b = TilePos::new(current.x, current.y + dy);
                if blocked.is_blocked(side_a) || blocked.is_blocked(side_b) {
                    continue;
                }
            }

            parent.insert(neighbor, current);
            queue.push_back(neighbor);
        }
    }

    if !parent.contains_key(&goal) {
        return Vec::new();
    }

    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        current = parent[&current];
        path.push(current);
    }
    path.reverse();
    path
}

/// Greedy forward-skip: from each anchor, keep the furthest waypoint
/// reachable by a straight segment that avoids all blocked tiles
fn simplify_by_line_of_sight(waypoints: &[Vec2], blocked: &BlockedMap) -> Vec<Vec2> {
    if waypoints.len() <= 2 {
        return waypoints.to_vec();
    }

    let mut result = vec![waypoints[0]];
    let mut anchor = 0;

    while anchor < waypoints.len() - 1 {
        let mut best = anchor + 1;
        for candidate in (anchor + 1)..waypoints.len() {
            if segment_is_clear(waypoints[anchor], waypoints[candidate], blocked) {
                best = candidate;
            }
        }
        result.push(waypoints[best]);
        anchor = best;
    }

    result
}

/// Does the segment stay on unblocked tiles for its whole length?
fn segment_is_clear(from: Vec2, to: Vec2, blocked: &BlockedMap) -> bool {
    segment_tiles(from, to).iter().all(|pos| !blocked.is_blocked(*pos))
}

/// All tiles a segment passes through (supercover grid traversal)
///
/// When the segment crosses a tile corner both side tiles are included,
/// so the result errs toward reporting more tiles, never fewer.
fn segment_tiles(from: Vec2, to: Vec2) -> Vec<TilePos> {
    let mut x = (from.x / TILE_SIZE).floor() as i32;
    let mut y = (from.y / TILE_SIZE).floor() as i32;
    let end_x = (to.x / TILE_SIZE).floor() as i32;
    let end_y = (to.y / TILE_SIZE).floor() as i32;

    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let step_x: i32 = if dx >= 0.0 { 1 } else { -1 };
    let step_y: i32 = if dy >= 0.0 { 1 } else { -1 };

    let t_delta_x = if dx != 0.0 { TILE_SIZE / dx.abs() } else { f32::INFINITY };
    let t_delta_y = if dy != 0.0 { TILE_SIZE / dy.abs() } else { f32::INFINITY };

    let next_boundary_x = if dx >= 0.0 {
        (x + 1) as f32 * TILE_SIZE
    } else {
        x as f32 * TILE_SIZE
    };
    let next_boundary_y = if dy >= 0.0 {
        (y + 1) as f32 * TILE_SIZE
    } else {
        y as f32 * TILE_SIZE
    };
    let mut t_max_x = if dx != 0.0 { (next_boundary_x - from.x) / dx } else { f32::INFINITY };
    let mut t_max_y = if dy != 0.0 { (next_boundary_y - from.y) / dy } else { f32::INFINITY };

    let mut tiles = vec![TilePos::new(x, y)];
    let max_steps = ((dx.abs() + dy.abs()) / TILE_SIZE) as usize + 4;

    for _ in 0..max_steps {
        if x == end_x && y == end_y {
            break;
        }

        if (t_max_x - t_max_y).abs() < 1e-6 {
            // Corner crossing: include both side tiles
            tiles.push(TilePos::new(x + step_x, y));
            tiles.push(TilePos::new(x, y + step_y));
            x += step_x;
            y += step_y;
            t_max_x += t_delta_x;
            t_max_y += t_delta_y;
        } else if t_max_x < t_max_y {
            x += step_x;
            t_max_x += t_delta_x;
        } else {
            y += step_y;
            t_max_y += t_delta_y;
        }
        tiles.push(TilePos::new(x, y));
    }

    tiles
}
