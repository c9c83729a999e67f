//! Morale and fatigue dynamics
//!
//! Low health drains morale (faster while encircled), rest restores it.
//! Fatigue rises on the march and falls while idle. Both feed back into
//! movement speed as multiplicative penalties.

use crate::sim::constants::{
    FATIGUE_RECOVERY_RATE, FATIGUE_RISE_RATE, FATIGUE_SPEED_PENALTY, LOW_HP_THRESHOLD,
    MORALE_DECAY_RATE, MORALE_ENCIRCLED_MULTIPLIER, MORALE_RECOVERY_RATE, MORALE_SPEED_FLOOR,
};
use crate::units::unit::Unit;

/// Advance morale and fatigue by one tick
pub fn update(unit: &mut Unit, moving: bool) {
    if unit.hp < LOW_HP_THRESHOLD {
        let mut decay = MORALE_DECAY_RATE;
        if unit.encircled_ticks > 0 {
            decay *= MORALE_ENCIRCLED_MULTIPLIER;
        }
        unit.morale -= decay;
    } else {
        unit.morale += MORALE_RECOVERY_RATE;
    }
    unit.morale = unit.morale.clamp(0.0, 100.0);

    if moving {
        unit.fatigue += FATIGUE_RISE_RATE;
    } else {
        unit.fatigue -= FATIGUE_RECOVERY_RATE;
    }
    unit.fatigue = unit.fatigue.clamp(0.0, 100.0);
}

/// Combined movement-speed multiplier from morale and fatigue
///
/// Full morale and no fatigue yield exactly 1.0.
pub fn speed_multiplier(unit: &Unit) -> f32 {
    let morale_factor = MORALE_SPEED_FLOOR + (1.0 - MORALE_SPEED_FLOOR) * unit.morale / 100.0;
    let fatigue_factor = 1.0 - FATIGUE_SPEED_PENALTY * unit.fatigue / 100.0;
    morale_factor * fatigue_factor
}
