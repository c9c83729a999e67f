//! Single movement step shared by every motion intent

use crate::core::types::Vec2;
use crate::map::grid::TileGrid;
use crate::sim::constants::{ARRIVE_EPSILON, MOVE_SPEED, TILE_SIZE, WATER_SLOW_FACTOR};
use crate::units::morale::speed_multiplier;
use crate::units::unit::{MotionIntent, Unit};

/// Advance a unit one tick along its motion intent
///
/// Returns true if the unit moved. A direct-line step that would land on
/// impassable terrain cancels the intent and raises the blocked flag
/// instead of clipping into the hazard.
pub fn step(unit: &mut Unit, grid: &TileGrid) -> bool {
    let speed = step_length(unit, grid);

    match std::mem::take(&mut unit.intent) {
        MotionIntent::Idle => false,

        MotionIntent::FollowPath { mut waypoints } => {
            let Some(&next_tile) = waypoints.front() else {
                return false;
            };

            let target = grid.tile_center(next_tile);
            let arrived = advance_toward(unit, target, speed);
            if arrived {
                waypoints.pop_front();
            }
            if !waypoints.is_empty() {
                unit.intent = MotionIntent::FollowPath { waypoints };
            }
            true
        }

        MotionIntent::SeekPoint { target } => {
            if direct_step_lands_on_hazard(unit, target, speed, grid) {
                unit.blocked = true;
                return false;
            }
            let arrived = advance_toward(unit, target, speed);
            if !arrived {
                unit.intent = MotionIntent::SeekPoint { target };
            }
            true
        }

        MotionIntent::SeekUnit { target, aim } => {
            let moved = match aim {
                Some(point) => {
                    if direct_step_lands_on_hazard(unit, point, speed, grid) {
                        unit.blocked = true;
                        return false;
                    }
                    let arrived = advance_toward(unit, point, speed);
                    let aim = if arrived { None } else { Some(point) };
                    unit.intent = MotionIntent::SeekUnit { target, aim };
                    true
                }
                None => {
                    unit.intent = MotionIntent::SeekUnit { target, aim: None };
                    false
                }
            };
            moved
        }
    }
}

/// World units covered this tick, after terrain and morale penalties
fn step_length(unit: &Unit, grid: &TileGrid) -> f32 {
    let terrain_factor = match unit.tile_pos(grid).and_then(|tile| grid.get(tile)) {
        Some(terrain) if terrain.is_water() => WATER_SLOW_FACTOR,
        _ => 1.0,
    };
    MOVE_SPEED * TILE_SIZE * terrain_factor * speed_multiplier(unit)
}

/// Move toward `target` by at most `speed`; returns true on arrival
fn advance_toward(unit: &mut Unit, target: Vec2, speed: f32) -> bool {
    let delta = target - unit.pos;
    let distance = delta.length();

    if distance < ARRIVE_EPSILON || distance <= speed {
        unit.pos = target;
        return true;
    }

    unit.pos = unit.pos + delta.normalize() * speed;
    false
}

/// Would the next direct-line step land on terrain that cancels it?
fn direct_step_lands_on_hazard(unit: &Unit, target: Vec2, speed: f32, grid: &TileGrid) -> bool {
    let delta = target - unit.pos;
    let distance = delta.length();
    let next = if distance <= speed {
        target
    } else {
        unit.pos + delta.normalize() * speed
    };

    match grid.tile_at(next).and_then(|tile| grid.get(tile)) {
        Some(terrain) => terrain.cancels_direct_step(),
        None => true,
    }
}
