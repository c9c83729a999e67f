//! The unit: position, health, motion intent, and the per-unit timers
//! that drive encirclement and capital capture

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::types::{Team, TilePos, Vec2};
use crate::map::grid::TileGrid;
use crate::sim::constants::{DEAD_SENTINEL_TICKS, ENCIRCLED_TICK_LIMIT};

/// Unique identifier for units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitId(pub Uuid);

impl UnitId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UnitId {
    fn default() -> Self {
        Self::new()
    }
}

/// What a unit is trying to do with its feet
///
/// One variant at a time - the single motion representation replaces the
/// historical split between tile-path queues and pixel destinations.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum MotionIntent {
    #[default]
    Idle,
    /// Follow a queue of tile waypoints (any-angle path output)
    FollowPath { waypoints: VecDeque<TilePos> },
    /// Head straight for a world point
    SeekPoint { target: Vec2 },
    /// Chase a live unit; `aim` is the last snapshot of its position,
    /// refreshed on the chase cooldown
    SeekUnit { target: UnitId, aim: Option<Vec2> },
}

impl MotionIntent {
    /// The point the unit is currently heading for, if any
    pub fn destination(&self, grid: &TileGrid) -> Option<Vec2> {
        match self {
            MotionIntent::Idle => None,
            MotionIntent::FollowPath { waypoints } => {
                waypoints.front().map(|tile| grid.tile_center(*tile))
            }
            MotionIntent::SeekPoint { target } => Some(*target),
            MotionIntent::SeekUnit { aim, .. } => *aim,
        }
    }
}

/// A single soldier on the map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub team: Team,
    pub pos: Vec2,
    pub hp: f32,
    pub intent: MotionIntent,

    /// Ticks until the next chase re-aim
    pub chase_cooldown: u32,
    /// Movement suppressed this tick; cleared immediately after
    pub blocked: bool,
    /// Consecutive ticks spent in enemy territory
    pub encircled_ticks: u32,
    /// Seconds of uncontested presence on the enemy capital
    pub capture_timer: f32,

    pub morale: f32,
    pub fatigue: f32,

    /// Damage queued by the combat resolver, applied next unit pass
    pub pending_damage: f32,

    pub selected: bool,
}

impl Unit {
    pub fn new(pos: Vec2, team: Team) -> Self {
        Self {
            id: UnitId::new(),
            team,
            pos,
            hp: 100.0,
            intent: MotionIntent::Idle,
            chase_cooldown: 0,
            blocked: false,
            encircled_ticks: 0,
            capture_timer: 0.0,
            morale: 100.0,
            fatigue: 0.0,
            pending_damage: 0.0,
            selected: false,
        }
    }

    /// Tile currently under the unit (None when pushed off-map mid-resolve)
    pub fn tile_pos(&self, grid: &TileGrid) -> Option<TilePos> {
        grid.tile_at(self.pos)
    }

    /// Apply queued combat damage; zero HP marks the unit for the sweep
    pub fn apply_pending_damage(&mut self) {
        if self.pending_damage > 0.0 {
            self.hp -= self.pending_damage;
            self.pending_damage = 0.0;
            if self.hp <= 0.0 {
                self.hp = 0.0;
                self.encircled_ticks = DEAD_SENTINEL_TICKS;
            }
        }
    }

    /// Should the next death sweep remove this unit?
    pub fn marked_for_removal(&self) -> bool {
        self.hp <= 0.0 || self.encircled_ticks > ENCIRCLED_TICK_LIMIT
    }

    /// Drop destination and chase target
    pub fn halt(&mut self) {
        self.intent = MotionIntent::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_unit_is_healthy_and_idle() {
        let unit = Unit::new(Vec2::new(10.0, 10.0), Team::Blue);
        assert_eq!(unit.hp, 100.0);
        assert_eq!(unit.intent, MotionIntent::Idle);
        assert!(!unit.marked_for_removal());
    }

    #[test]
    fn test_pending_damage_applies_once() {
        let mut unit = Unit::new(Vec2::default(), Team::Red);
        unit.pending_damage = 30.0;
        unit.apply_pending_damage();
        assert_eq!(unit.hp, 70.0);
        assert_eq!(unit.pending_damage, 0.0);

        unit.apply_pending_damage();
        assert_eq!(unit.hp, 70.0);
    }

    #[test]
    fn test_lethal_damage_clamps_and_marks() {
        let mut unit = Unit::new(Vec2::default(), Team::Red);
        unit.pending_damage = 250.0;
        unit.apply_pending_damage();
        assert_eq!(unit.hp, 0.0);
        assert!(unit.marked_for_removal());
    }

    #[test]
    fn test_encirclement_limit_marks_for_removal() {
        let mut unit = Unit::new(Vec2::default(), Team::Blue);
        unit.encircled_ticks = ENCIRCLED_TICK_LIMIT;
        assert!(!unit.marked_for_removal());
        unit.encircled_ticks = ENCIRCLED_TICK_LIMIT + 1;
        assert!(unit.marked_for_removal());
    }

    #[test]
    fn test_destination_of_path_intent() {
        let grid = TileGrid::new(10, 10);
        let mut unit = Unit::new(Vec2::default(), Team::Blue);

        let mut waypoints = VecDeque::new();
        waypoints.push_back(TilePos::new(3, 3));
        unit.intent = MotionIntent::FollowPath { waypoints };

        assert_eq!(unit.intent.destination(&grid), Some(grid.tile_center(TilePos::new(3, 3))));
        assert_eq!(MotionIntent::Idle.destination(&grid), None);
    }
}
