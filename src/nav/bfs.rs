//! 4-directional breadth-first pathfinding over the tile grid

use std::collections::VecDeque;

use ahash::AHashMap;

use crate::core::types::TilePos;
use crate::map::grid::TileGrid;

/// Find a path from `start` to `goal`, excluding `start` itself
///
/// Mountains are impassable; all other terrain is walkable (water slows
/// movement but does not block it). Returns an empty path when either
/// tile is out of bounds, start equals goal, or no route exists.
pub fn bfs_path(grid: &TileGrid, start: TilePos, goal: TilePos) -> Vec<TilePos> {
    if !grid.in_bounds(start) || !grid.in_bounds(goal) || start == goal {
        return Vec::new();
    }

    let mut parent: AHashMap<TilePos, TilePos> = AHashMap::new();
    let mut queue = VecDeque::new();
    parent.insert(start, start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        if current == goal {
            break;
        }

        for neighbor in current.neighbors4() {
            let Some(terrain) = grid.get(neighbor) else {
                continue;
            };
            if terrain.blocks_ground() || parent.contains_key(&neighbor) {
                continue;
            }
            parent.insert(neighbor, current);
            queue.push_back(neighbor);
        }
    }

    if !parent.contains_key(&goal) {
        return Vec::new();
    }

    let mut path = Vec::new();
    let mut current = goal;
    while current != start {
        path.push(current);
        current = parent[&current];
    }
    path.reverse();
    path
}
