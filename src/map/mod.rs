//! Tile map: terrain types, the dense grid, and procedural generation

pub mod generation;
pub mod grid;
pub mod terrain;

pub use generation::generate;
pub use grid::TileGrid;
pub use terrain::Terrain;
