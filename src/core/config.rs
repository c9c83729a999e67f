//! Match configuration with documented knobs
//!
//! Per-match parameters are collected here with explanations of their
//! purpose. World-scale tuning constants live in `sim::constants`.

use serde::{Deserialize, Serialize};

use crate::core::error::{FrontError, Result};

/// Configuration for a single match
///
/// These values have been tuned to produce a playable map and pacing.
/// The config is passed explicitly into `MatchWorld::new` - there is no
/// global config state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchConfig {
    // === MAP ===
    /// Map width in tiles
    pub map_width: usize,

    /// Map height in tiles
    pub map_height: usize,

    /// Seed for the map generator and unit placement
    ///
    /// The same seed over the same config produces the same map, which
    /// is what the generation tests rely on.
    pub seed: u64,

    /// Target fraction of the map covered by forest (0.08-0.20 plays well)
    pub forest_ratio: f32,

    // === UNITS ===
    /// Units spawned near each capital at match setup
    ///
    /// There are no reinforcements; this is the whole army.
    pub units_per_team: usize,

    /// Tile radius around the capital where starting units appear
    pub spawn_spread: i32,

    // === PACING ===
    /// Simulation ticks per second (drives dt for capture timers)
    pub tick_rate: f32,

    /// Seconds an uncontested unit must hold an enemy capital to win
    pub capture_time: f32,

    /// World-unit radius around a capital that counts as standing on it
    pub capture_radius: f32,

    /// Ticks between territory-control recomputes
    ///
    /// The dual flood fill is cheap but not free; recomputing every
    /// tick is wasted work since units cross at most a fraction of a
    /// tile per tick.
    pub front_recompute_interval: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            map_width: 80,
            map_height: 60,
            seed: 12345,
            forest_ratio: 0.20,
            units_per_team: 10,
            spawn_spread: 3,
            tick_rate: 30.0,
            capture_time: 10.0,
            capture_radius: 11.0,
            front_recompute_interval: 15,
        }
    }
}

impl MatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.map_width < 20 || self.map_height < 20 {
            return Err(FrontError::InvalidConfig(format!(
                "map must be at least 20x20 tiles, got {}x{}",
                self.map_width, self.map_height
            )));
        }

        if !(0.0..=1.0).contains(&self.forest_ratio) {
            return Err(FrontError::InvalidConfig(format!(
                "forest_ratio must be in [0, 1], got {}",
                self.forest_ratio
            )));
        }

        if self.units_per_team == 0 {
            return Err(FrontError::InvalidConfig(
                "units_per_team must be positive".into(),
            ));
        }

        if self.tick_rate <= 0.0 {
            return Err(FrontError::InvalidConfig(
                "tick_rate must be positive".into(),
            ));
        }

        if self.capture_radius < crate::sim::constants::UNIT_RADIUS {
            return Err(FrontError::InvalidConfig(format!(
                "capture_radius ({}) must cover at least one unit radius ({})",
                self.capture_radius,
                crate::sim::constants::UNIT_RADIUS
            )));
        }

        if self.front_recompute_interval == 0 {
            return Err(FrontError::InvalidConfig(
                "front_recompute_interval must be at least 1".into(),
            ));
        }

        Ok(())
    }
}
