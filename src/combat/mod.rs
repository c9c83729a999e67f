//! Local-density skirmish resolution
//!
//! No paired attacker/defender: each tick every unit counts friends and
//! foes inside its attack range, and the outnumbered side accrues
//! damage. An isolated unit facing any single enemy always takes damage.
//! Damage is queued on the unit and applied by the next unit pass, so
//! resolution order within a tick cannot bias the outcome.

use crate::sim::constants::{ATTACK_RANGE, BASE_DAMAGE, ENCIRCLED_DAMAGE_MULTIPLIER};
use crate::units::unit::Unit;

/// Queue damage for every locally outnumbered unit
pub fn resolve_skirmishes(units: &mut [Unit]) {
    let range_squared = ATTACK_RANGE * ATTACK_RANGE;
    let mut damage = vec![0.0_f32; units.len()];

    for (i, unit) in units.iter().enumerate() {
        let mut allies = 0usize;
        let mut enemies = 0usize;

        for (j, other) in units.iter().enumerate() {
            if i == j {
                continue;
            }
            if unit.pos.distance_squared(&other.pos) < range_squared {
                if other.team == unit.team {
                    allies += 1;
                } else {
                    enemies += 1;
                }
            }
        }

        if enemies > allies {
            let mut amount = BASE_DAMAGE;
            if unit.encircled_ticks > 0 {
                amount *= ENCIRCLED_DAMAGE_MULTIPLIER;
            }
            damage[i] = amount;
        }
    }

    for (unit, amount) in units.iter_mut().zip(damage) {
        unit.pending_damage += amount;
    }
}
