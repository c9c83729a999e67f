//! Simple per-team commander: every friendly unit chases its nearest
//! enemy
//!
//! No formations, no retreat, no resource awareness. Runs only while
//! movement is globally permitted.

use crate::core::types::{Team, Vec2};
use crate::units::unit::{MotionIntent, Unit, UnitId};

/// Nearest-enemy targeting for one team
#[derive(Debug, Clone)]
pub struct Commander {
    pub team: Team,
}

impl Commander {
    pub fn new(team: Team) -> Self {
        Self { team }
    }

    /// Point every non-blocked friendly unit at its nearest enemy
    ///
    /// Re-targeting an unchanged nearest enemy keeps the existing chase
    /// aim so the cooldown is not reset every tick.
    pub fn update(&self, units: &mut [Unit]) {
        let enemies: Vec<(UnitId, Vec2)> = units
            .iter()
            .filter(|unit| unit.team != self.team)
            .map(|unit| (unit.id, unit.pos))
            .collect();

        if enemies.is_empty() {
            return;
        }

        for unit in units.iter_mut().filter(|unit| unit.team == self.team) {
            if unit.blocked {
                continue;
            }

            let nearest = enemies
                .iter()
                .min_by(|(_, a), (_, b)| {
                    let da = unit.pos.distance_squared(a);
                    let db = unit.pos.distance_squared(b);
                    da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
                })
                .map(|(id, _)| *id);

            if let Some(best) = nearest {
                let already_chasing = matches!(
                    unit.intent,
                    MotionIntent::SeekUnit { target, .. } if target == best
                );
                if !already_chasing {
                    unit.intent = MotionIntent::SeekUnit { target: best, aim: None };
                    unit.chase_cooldown = 0;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_at(x: f32, y: f32, team: Team) -> Unit {
        Unit::new(Vec2::new(x, y), team)
    }

    #[test]
    fn test_targets_nearest_enemy() {
        let mut units = vec![
            unit_at(0.0, 0.0, Team::Red),
            unit_at(50.0, 0.0, Team::Blue),
            unit_at(200.0, 0.0, Team::Blue),
        ];
        let near_id = units[1].id;

        Commander::new(Team::Red).update(&mut units);

        match units[0].intent {
            MotionIntent::SeekUnit { target, .. } => assert_eq!(target, near_id),
            ref other => panic!("expected SeekUnit, got {:?}", other),
        }
    }

    #[test]
    fn test_no_enemies_leaves_units_idle() {
        let mut units = vec![unit_at(0.0, 0.0, Team::Red), unit_at(10.0, 0.0, Team::Red)];
        Commander::new(Team::Red).update(&mut units);
        assert_eq!(units[0].intent, MotionIntent::Idle);
    }

    #[test]
    fn test_blocked_units_skipped() {
        let mut units = vec![unit_at(0.0, 0.0, Team::Red), unit_at(50.0, 0.0, Team::Blue)];
        units[0].blocked = true;

        Commander::new(Team::Red).update(&mut units);
        assert_eq!(units[0].intent, MotionIntent::Idle);
    }

    #[test]
    fn test_stable_target_keeps_chase_aim() {
        let mut units = vec![unit_at(0.0, 0.0, Team::Red), unit_at(50.0, 0.0, Team::Blue)];
        let target = units[1].id;
        units[0].intent = MotionIntent::SeekUnit { target, aim: Some(Vec2::new(50.0, 0.0)) };
        units[0].chase_cooldown = 7;

        Commander::new(Team::Red).update(&mut units);

        assert_eq!(units[0].chase_cooldown, 7);
        match units[0].intent {
            MotionIntent::SeekUnit { target: t, aim } => {
                assert_eq!(t, target);
                assert!(aim.is_some());
            }
            ref other => panic!("expected SeekUnit, got {:?}", other),
        }
    }

    #[test]
    fn test_only_own_team_is_commanded() {
        let mut units = vec![unit_at(0.0, 0.0, Team::Red), unit_at(50.0, 0.0, Team::Blue)];
        Commander::new(Team::Red).update(&mut units);
        assert_eq!(units[1].intent, MotionIntent::Idle);
    }
}
