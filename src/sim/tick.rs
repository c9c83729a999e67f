//! One synchronous simulation step
//!
//! Tick order: AI targeting → collision resolution → damage application
//! → movement/encirclement/capture → combat accrual → front recompute →
//! death sweep → victory check. The tick is the unit of atomicity; host
//! input must land between ticks.

use serde::Serialize;

use crate::core::types::Team;
use crate::front::control::TerritoryMap;
use crate::sim::constants::CHASE_COOLDOWN_TICKS;
use crate::sim::world::{MatchPhase, MatchWorld};
use crate::units::unit::MotionIntent;
use crate::units::{collision, morale, motion};

/// How a match was won
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VictoryReason {
    /// The losing team has no units left
    Elimination,
    /// An enemy capital was held for the full capture time
    CapitalCaptured,
}

/// Terminal match result, returned by `tick` once and then latched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Victory {
    pub winner: Team,
    pub reason: VictoryReason,
}

impl MatchWorld {
    /// Advance the simulation one step
    ///
    /// `movement_allowed` is false during the placement/freeze phase:
    /// collisions still resolve and queued damage still applies, but
    /// nothing moves, fights, or captures.
    pub fn tick(&mut self, dt: f32, movement_allowed: bool) -> Option<Victory> {
        if self.victory.is_some() {
            return self.victory;
        }

        self.tick_count += 1;
        if movement_allowed && self.phase == MatchPhase::Placement {
            self.phase = MatchPhase::Active;
        }

        if movement_allowed {
            for commander in &self.commanders {
                commander.update(&mut self.units);
            }
        }

        collision::resolve_collisions(&mut self.units);

        for unit in &mut self.units {
            unit.apply_pending_damage();
        }

        if movement_allowed {
            self.advance_units();
            self.update_capture_timers(dt);
            crate::combat::resolve_skirmishes(&mut self.units);
        } else {
            for unit in &mut self.units {
                morale::update(unit, false);
            }
        }

        if self.tick_count % self.config.front_recompute_interval == 0 {
            self.territory = TerritoryMap::compute(&self.grid, self.red_capital, self.blue_capital);
        }

        self.sweep_dead();

        self.victory = self.check_victory();
        if let Some(victory) = self.victory {
            self.phase = MatchPhase::Finished;
            tracing::info!(winner = ?victory.winner, reason = ?victory.reason, "match over");
        }
        self.victory
    }

    /// Movement, encirclement, and morale for every unit
    fn advance_units(&mut self) {
        for index in 0..self.units.len() {
            if self.units[index].blocked {
                // Clear-immediately policy: a blocked unit loses its
                // orders for one tick and is free again the next.
                let unit = &mut self.units[index];
                unit.blocked = false;
                unit.halt();
                morale::update(unit, false);
                continue;
            }

            self.refresh_chase_aim(index);

            let moved = motion::step(&mut self.units[index], &self.grid);

            let in_enemy = self.territory.is_enemy_territory(
                &self.grid,
                self.units[index].pos,
                self.units[index].team,
            );
            let unit = &mut self.units[index];
            if in_enemy {
                unit.encircled_ticks = unit.encircled_ticks.saturating_add(1);
            } else if unit.hp > 0.0 {
                // The dead sentinel must survive until the sweep
                unit.encircled_ticks = 0;
            }

            morale::update(unit, moved);
        }
    }

    /// Drop stale chase targets; re-aim live ones on the cooldown
    fn refresh_chase_aim(&mut self, index: usize) {
        let target = match &self.units[index].intent {
            MotionIntent::SeekUnit { target, .. } => *target,
            _ => return,
        };

        let target_pos = self.units.iter().find(|unit| unit.id == target).map(|unit| unit.pos);

        let unit = &mut self.units[index];
        match target_pos {
            None => unit.halt(),
            Some(pos) => {
                if unit.chase_cooldown == 0 {
                    unit.chase_cooldown = CHASE_COOLDOWN_TICKS;
                    if let MotionIntent::SeekUnit { aim, .. } = &mut unit.intent {
                        *aim = Some(pos);
                    }
                } else {
                    unit.chase_cooldown -= 1;
                }
            }
        }
    }

    /// Per-unit capture accrual and per-capital maxima
    ///
    /// A defender anywhere inside the radius contests the capital and
    /// zeroes every attacker's timer that tick.
    fn update_capture_timers(&mut self, dt: f32) {
        let red_center = self.grid.tile_center(self.red_capital);
        let blue_center = self.grid.tile_center(self.blue_capital);
        let radius = self.config.capture_radius;

        let red_defended = self
            .units
            .iter()
            .any(|unit| unit.team == Team::Red && unit.pos.distance(&red_center) < radius);
        let blue_defended = self
            .units
            .iter()
            .any(|unit| unit.team == Team::Blue && unit.pos.distance(&blue_center) < radius);

        let mut red_progress: f32 = 0.0;
        let mut blue_progress: f32 = 0.0;

        for unit in &mut self.units {
            let (enemy_capital, contested) = match unit.team {
                Team::Blue => (red_center, red_defended),
                Team::Red => (blue_center, blue_defended),
            };

            if !contested && unit.pos.distance(&enemy_capital) < radius {
                unit.capture_timer += dt;
            } else {
                unit.capture_timer = 0.0;
            }

            match unit.team {
                Team::Blue => red_progress = red_progress.max(unit.capture_timer),
                Team::Red => blue_progress = blue_progress.max(unit.capture_timer),
            }
        }

        self.red_capital_progress = red_progress;
        self.blue_capital_progress = blue_progress;
    }

    /// Atomic removal of everything marked dead this tick
    fn sweep_dead(&mut self) {
        let before = self.units.len();
        self.units.retain(|unit| !unit.marked_for_removal());
        let removed = before - self.units.len();
        if removed > 0 {
            tracing::debug!(removed, "death sweep");
        }
    }

    fn check_victory(&self) -> Option<Victory> {
        let red_alive = self.units.iter().any(|unit| unit.team == Team::Red);
        let blue_alive = self.units.iter().any(|unit| unit.team == Team::Blue);

        if !blue_alive {
            return Some(Victory { winner: Team::Red, reason: VictoryReason::Elimination });
        }
        if !red_alive {
            return Some(Victory { winner: Team::Blue, reason: VictoryReason::Elimination });
        }
        if self.red_capital_progress >= self.config.capture_time {
            return Some(Victory { winner: Team::Blue, reason: VictoryReason::CapitalCaptured });
        }
        if self.blue_capital_progress >= self.config.capture_time {
            return Some(Victory { winner: Team::Red, reason: VictoryReason::CapitalCaptured });
        }
        None
    }
}
