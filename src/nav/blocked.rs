//! Per-query blocked map combining static terrain and dynamic units

use crate::core::types::{TilePos, Vec2};
use crate::map::grid::TileGrid;
use crate::sim::constants::TILE_SIZE;

/// Per-tile boolean obstacle map, built fresh for each any-angle query
///
/// Out-of-bounds coordinates always read as blocked, so callers never
/// need a separate bounds check.
#[derive(Debug, Clone)]
pub struct BlockedMap {
    width: usize,
    height: usize,
    blocked: Vec<bool>,
}

impl BlockedMap {
    /// Build from terrain plus the current positions of other units
    ///
    /// Mountains are inflated by `mountain_margin` world units and each
    /// unit blocks a `unit_margin` radius around its tile, both rounded
    /// up to whole tiles.
    pub fn build(
        grid: &TileGrid,
        other_units: &[Vec2],
        mountain_margin: f32,
        unit_margin: f32,
    ) -> Self {
        let width = grid.width();
        let height = grid.height();
        let mut map = Self {
            width,
            height,
            blocked: vec![false; width * height],
        };

        let mountain_radius = (mountain_margin / TILE_SIZE).ceil() as i32;
        for pos in grid.positions() {
            let Some(terrain) = grid.get(pos) else { continue };
            if terrain.blocks_any_angle() {
                map.mark(pos);
                if terrain.blocks_ground() {
                    map.mark_radius(pos, mountain_radius);
                }
            }
        }

        let unit_radius = (unit_margin / TILE_SIZE).ceil() as i32;
        for unit_pos in other_units {
            if let Some(tile) = grid.tile_at(*unit_pos) {
                map.mark_radius(tile, unit_radius);
            }
        }

        map
    }

    pub fn is_blocked(&self, pos: TilePos) -> bool {
        if pos.x < 0 || pos.y < 0 || pos.x as usize >= self.width || pos.y as usize >= self.height {
            return true;
        }
        self.blocked[pos.y as usize * self.width + pos.x as usize]
    }

    fn mark(&mut self, pos: TilePos) {
        if pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height {
            self.blocked[pos.y as usize * self.width + pos.x as usize] = true;
        }
    }

    fn mark_radius(&mut self, center: TilePos, radius: i32) {
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                self.mark(TilePos::new(center.x + dx, center.y + dy));
            }
        }
    }
}
