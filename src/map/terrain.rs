//! Terrain types and their effects on movement and placement

use serde::{Deserialize, Serialize};

/// Terrain kind for a single tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Terrain {
    DeepWater,
    River,
    #[default]
    Plain,
    Forest,
    Mountain,
    Bridge,
    Lake,
}

impl Terrain {
    /// Water tiles slow units down but remain crossable
    pub fn is_water(&self) -> bool {
        matches!(self, Terrain::DeepWater | Terrain::River | Terrain::Lake)
    }

    /// Impassable for the 4-directional grid pathfinder
    pub fn blocks_ground(&self) -> bool {
        matches!(self, Terrain::Mountain)
    }

    /// Statically blocked for the any-angle planner
    ///
    /// Stricter than `blocks_ground`: the any-angle planner routes
    /// around standing water instead of wading through it.
    pub fn blocks_any_angle(&self) -> bool {
        matches!(self, Terrain::Mountain | Terrain::Lake | Terrain::DeepWater)
    }

    /// A direct-line step onto this terrain is cancelled, not clipped
    pub fn cancels_direct_step(&self) -> bool {
        matches!(self, Terrain::Mountain | Terrain::Lake | Terrain::DeepWater)
    }

    /// Valid for initial unit placement
    pub fn valid_for_placement(&self) -> bool {
        !matches!(
            self,
            Terrain::Mountain | Terrain::Lake | Terrain::River | Terrain::DeepWater
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_water_classification() {
        assert!(Terrain::River.is_water());
        assert!(Terrain::Lake.is_water());
        assert!(Terrain::DeepWater.is_water());
        assert!(!Terrain::Bridge.is_water());
        assert!(!Terrain::Plain.is_water());
    }

    #[test]
    fn test_only_mountain_blocks_ground() {
        assert!(Terrain::Mountain.blocks_ground());
        assert!(!Terrain::Lake.blocks_ground());
        assert!(!Terrain::River.blocks_ground());
    }

    #[test]
    fn test_any_angle_blocks_standing_water() {
        assert!(Terrain::Lake.blocks_any_angle());
        assert!(Terrain::DeepWater.blocks_any_angle());
        assert!(!Terrain::River.blocks_any_angle());
    }

    #[test]
    fn test_placement_excludes_hazards() {
        assert!(Terrain::Plain.valid_for_placement());
        assert!(Terrain::Forest.valid_for_placement());
        assert!(Terrain::Bridge.valid_for_placement());
        assert!(!Terrain::River.valid_for_placement());
        assert!(!Terrain::Mountain.valid_for_placement());
    }
}
