//! Dense tile grid with world-unit conversions

use serde::{Deserialize, Serialize};

use crate::core::types::{TilePos, Vec2};
use crate::map::terrain::Terrain;
use crate::sim::constants::TILE_SIZE;

/// 2D grid of terrain, immutable after generation except for capital
/// normalization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tiles: Vec<Terrain>,
}

impl TileGrid {
    /// Create a grid filled with plains
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            tiles: vec![Terrain::Plain; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: TilePos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    #[inline]
    pub fn get(&self, pos: TilePos) -> Option<Terrain> {
        if self.in_bounds(pos) {
            Some(self.tiles[pos.y as usize * self.width + pos.x as usize])
        } else {
            None
        }
    }

    #[inline]
    pub fn set(&mut self, pos: TilePos, terrain: Terrain) {
        if self.in_bounds(pos) {
            self.tiles[pos.y as usize * self.width + pos.x as usize] = terrain;
        }
    }

    /// Tile containing a world position (out of bounds → None)
    pub fn tile_at(&self, pos: Vec2) -> Option<TilePos> {
        let tile = TilePos::new(
            (pos.x / TILE_SIZE).floor() as i32,
            (pos.y / TILE_SIZE).floor() as i32,
        );
        if self.in_bounds(tile) {
            Some(tile)
        } else {
            None
        }
    }

    /// World-unit center of a tile
    pub fn tile_center(&self, pos: TilePos) -> Vec2 {
        Vec2::new(
            pos.x as f32 * TILE_SIZE + TILE_SIZE / 2.0,
            pos.y as f32 * TILE_SIZE + TILE_SIZE / 2.0,
        )
    }

    /// Iterate all tile positions row by row
    pub fn positions(&self) -> impl Iterator<Item = TilePos> + '_ {
        let width = self.width;
        (0..self.height).flat_map(move |y| (0..width).map(move |x| TilePos::new(x as i32, y as i32)))
    }

    /// Count tiles of a given terrain
    pub fn count(&self, terrain: Terrain) -> usize {
        self.tiles.iter().filter(|t| **t == terrain).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_all_plain() {
        let grid = TileGrid::new(10, 8);
        assert_eq!(grid.count(Terrain::Plain), 80);
    }

    #[test]
    fn test_get_out_of_bounds_is_none() {
        let grid = TileGrid::new(10, 10);
        assert!(grid.get(TilePos::new(-1, 0)).is_none());
        assert!(grid.get(TilePos::new(10, 0)).is_none());
        assert!(grid.get(TilePos::new(0, 10)).is_none());
    }

    #[test]
    fn test_set_and_get() {
        let mut grid = TileGrid::new(10, 10);
        grid.set(TilePos::new(3, 4), Terrain::Forest);
        assert_eq!(grid.get(TilePos::new(3, 4)), Some(Terrain::Forest));
    }

    #[test]
    fn test_set_out_of_bounds_ignored() {
        let mut grid = TileGrid::new(10, 10);
        grid.set(TilePos::new(50, 50), Terrain::Mountain);
        assert_eq!(grid.count(Terrain::Mountain), 0);
    }

    #[test]
    fn test_tile_at_world_position() {
        let grid = TileGrid::new(10, 10);
        let tile = grid.tile_at(Vec2::new(TILE_SIZE * 2.5, TILE_SIZE * 0.5));
        assert_eq!(tile, Some(TilePos::new(2, 0)));
        assert!(grid.tile_at(Vec2::new(-1.0, 0.0)).is_none());
    }

    #[test]
    fn test_tile_center_round_trip() {
        let grid = TileGrid::new(10, 10);
        let pos = TilePos::new(4, 7);
        let center = grid.tile_center(pos);
        assert_eq!(grid.tile_at(center), Some(pos));
    }
}
