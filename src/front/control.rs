//! Territory-control map derived from dual capital flood fills

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::types::{Team, TilePos, Vec2};
use crate::map::grid::TileGrid;

/// Ownership of a single tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Owner {
    #[default]
    Neutral,
    Held(Team),
}

/// Per-tile ownership, recomputed on an interval rather than every tick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerritoryMap {
    width: usize,
    height: usize,
    owners: Vec<Owner>,
}

impl TerritoryMap {
    /// Derive ownership from hop distances to each capital
    ///
    /// Ties and tiles unreachable from both capitals stay Neutral.
    pub fn compute(grid: &TileGrid, red_capital: TilePos, blue_capital: TilePos) -> Self {
        let width = grid.width();
        let height = grid.height();

        let red_distance = distance_field(grid, red_capital);
        let blue_distance = distance_field(grid, blue_capital);

        let mut owners = vec![Owner::Neutral; width * height];
        for (index, owner) in owners.iter_mut().enumerate() {
            let red = red_distance[index];
            let blue = blue_distance[index];
            *owner = if red == u32::MAX && blue == u32::MAX {
                Owner::Neutral
            } else if red < blue {
                Owner::Held(Team::Red)
            } else if blue < red {
                Owner::Held(Team::Blue)
            } else {
                Owner::Neutral
            };
        }

        Self { width, height, owners }
    }

    pub fn owner_at(&self, pos: TilePos) -> Owner {
        if pos.x < 0 || pos.y < 0 || pos.x as usize >= self.width || pos.y as usize >= self.height {
            return Owner::Neutral;
        }
        self.owners[pos.y as usize * self.width + pos.x as usize]
    }

    /// Is this world position inside territory held by the enemy of `team`?
    pub fn is_enemy_territory(&self, grid: &TileGrid, pos: Vec2, team: Team) -> bool {
        match grid.tile_at(pos) {
            Some(tile) => self.owner_at(tile) == Owner::Held(team.opponent()),
            None => false,
        }
    }

    /// Segments between pixel centers of adjacent tiles with differing
    /// non-neutral owners - the drawable front line
    pub fn boundary_segments(&self, grid: &TileGrid) -> Vec<(Vec2, Vec2)> {
        let mut segments = Vec::new();

        for pos in grid.positions() {
            let here = self.owner_at(pos);
            if here == Owner::Neutral {
                continue;
            }

            // Right and down only, so each pair is emitted once
            for neighbor in [TilePos::new(pos.x + 1, pos.y), TilePos::new(pos.x, pos.y + 1)] {
                if !grid.in_bounds(neighbor) {
                    continue;
                }
                let there = self.owner_at(neighbor);
                if there != Owner::Neutral && there != here {
                    segments.push((grid.tile_center(pos), grid.tile_center(neighbor)));
                }
            }
        }

        segments
    }
}

/// BFS hop distance from a seed over flood-traversable terrain
/// (`u32::MAX` = unreachable)
fn distance_field(grid: &TileGrid, seed: TilePos) -> Vec<u32> {
    let width = grid.width();
    let mut distances = vec![u32::MAX; width * grid.height()];

    let traversable = |pos: TilePos| {
        grid.get(pos).map(|t| !t.blocks_any_angle()).unwrap_or(false)
    };

    if !traversable(seed) {
        return distances;
    }

    let index = |pos: TilePos| pos.y as usize * width + pos.x as usize;

    let mut queue = VecDeque::new();
    distances[index(seed)] = 0;
    queue.push_back(seed);

    while let Some(current) = queue.pop_front() {
        let next_distance = distances[index(current)] + 1;
        for neighbor in current.neighbors4() {
            if traversable(neighbor) && distances[index(neighbor)] == u32::MAX {
                distances[index(neighbor)] = next_distance;
                queue.push_back(neighbor);
            }
        }
    }

    distances
}
