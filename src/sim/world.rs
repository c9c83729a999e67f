//! MatchWorld - the owning world-state container
//!
//! All mutable match state lives here and is passed explicitly into the
//! systems that need it; there are no ambient globals. The host mutates
//! units only through the command surface, between ticks.

use ahash::AHashSet;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::ai::Commander;
use crate::core::config::MatchConfig;
use crate::core::error::{FrontError, Result};
use crate::core::types::{Team, Tick, TilePos, Vec2};
use crate::front::control::TerritoryMap;
use crate::map::generation::generate;
use crate::map::grid::TileGrid;
use crate::map::terrain::Terrain;
use crate::nav::any_angle::any_angle_path;
use crate::sim::constants::{MOUNTAIN_MARGIN, UNIT_MARGIN};
use crate::sim::tick::Victory;
use crate::units::unit::{MotionIntent, Unit, UnitId};

/// Coarse match lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    /// Units may still be placed; movement is frozen
    Placement,
    /// Fighting is underway
    Active,
    /// A victory condition fired; state no longer advances
    Finished,
}

/// The full match state
pub struct MatchWorld {
    pub(crate) config: MatchConfig,
    pub(crate) grid: TileGrid,
    pub(crate) red_capital: TilePos,
    pub(crate) blue_capital: TilePos,
    pub(crate) units: Vec<Unit>,
    pub(crate) territory: TerritoryMap,
    pub(crate) commanders: Vec<Commander>,
    pub(crate) tick_count: Tick,
    pub(crate) phase: MatchPhase,
    /// Best progress by Blue toward taking the Red capital (seconds)
    pub(crate) red_capital_progress: f32,
    /// Best progress by Red toward taking the Blue capital (seconds)
    pub(crate) blue_capital_progress: f32,
    pub(crate) victory: Option<Victory>,
}

impl MatchWorld {
    /// Generate a map and spawn both armies around their capitals
    ///
    /// Red is AI-driven by default, mirroring a player-vs-computer match;
    /// use `enable_ai` to drive Blue too.
    pub fn new(config: MatchConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut grid = generate(&config, &mut rng);

        let mid_y = (config.map_height / 2) as i32;
        let blue_capital = TilePos::new(3, mid_y);
        let red_capital = TilePos::new(config.map_width as i32 - 4, mid_y);
        grid.set(blue_capital, Terrain::Plain);
        grid.set(red_capital, Terrain::Plain);

        let mut units = Vec::with_capacity(config.units_per_team * 2);
        spawn_around(&grid, blue_capital, Team::Blue, &config, &mut rng, &mut units);
        spawn_around(&grid, red_capital, Team::Red, &config, &mut rng, &mut units);

        let territory = TerritoryMap::compute(&grid, red_capital, blue_capital);

        tracing::info!(
            width = config.map_width,
            height = config.map_height,
            seed = config.seed,
            units = units.len(),
            "match world created"
        );

        Ok(Self {
            config,
            grid,
            red_capital,
            blue_capital,
            units,
            territory,
            commanders: vec![Commander::new(Team::Red)],
            tick_count: 0,
            phase: MatchPhase::Placement,
            red_capital_progress: 0.0,
            blue_capital_progress: 0.0,
            victory: None,
        })
    }

    /// Add an AI commander for a team (idempotent)
    pub fn enable_ai(&mut self, team: Team) {
        if !self.commanders.iter().any(|c| c.team == team) {
            self.commanders.push(Commander::new(team));
        }
    }

    // === READ-ONLY QUERIES ===

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn territory(&self) -> &TerritoryMap {
        &self.territory
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|unit| unit.id == id)
    }

    pub fn is_alive(&self, id: UnitId) -> bool {
        self.unit(id).is_some()
    }

    pub fn units_of(&self, team: Team) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(move |unit| unit.team == team)
    }

    pub fn capital(&self, team: Team) -> TilePos {
        match team {
            Team::Red => self.red_capital,
            Team::Blue => self.blue_capital,
        }
    }

    /// Seconds of uncontested enemy presence on this team's capital
    pub fn capture_progress(&self, team: Team) -> f32 {
        match team {
            Team::Red => self.red_capital_progress,
            Team::Blue => self.blue_capital_progress,
        }
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn victory(&self) -> Option<Victory> {
        self.victory
    }

    pub fn tick_count(&self) -> Tick {
        self.tick_count
    }

    /// Drawable front line derived from the territory map
    pub fn boundary_segments(&self) -> Vec<(Vec2, Vec2)> {
        self.territory.boundary_segments(&self.grid)
    }

    // === COMMANDS (host input, applied between ticks) ===

    pub fn select(&mut self, id: UnitId) {
        if let Some(unit) = self.units.iter_mut().find(|unit| unit.id == id) {
            unit.selected = true;
        }
    }

    pub fn clear_selection(&mut self) {
        for unit in &mut self.units {
            unit.selected = false;
        }
    }

    pub fn selected_units(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(|unit| unit.selected)
    }

    /// Route each unit to the target point via the any-angle planner
    ///
    /// Units with no route stay where they are. Unknown ids are ignored.
    pub fn issue_move(&mut self, ids: &[UnitId], target: Vec2) {
        let Some(goal) = self.grid.tile_at(target) else {
            return;
        };

        for &id in ids {
            let Some(index) = self.units.iter().position(|unit| unit.id == id) else {
                continue;
            };
            let Some(start) = self.units[index].tile_pos(&self.grid) else {
                continue;
            };

            let others: Vec<Vec2> = self
                .units
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != index)
                .map(|(_, unit)| unit.pos)
                .collect();

            let path = any_angle_path(&self.grid, start, goal, &others, MOUNTAIN_MARGIN, UNIT_MARGIN);

            let unit = &mut self.units[index];
            if path.is_empty() {
                unit.halt();
            } else {
                unit.intent = MotionIntent::FollowPath { waypoints: path.into_iter().collect() };
            }
        }
    }

    /// Order each unit to chase a target unit
    pub fn issue_attack(&mut self, ids: &[UnitId], target: UnitId) {
        if !self.is_alive(target) {
            return;
        }

        for &id in ids {
            if id == target {
                continue;
            }
            if let Some(unit) = self.units.iter_mut().find(|unit| unit.id == id) {
                unit.intent = MotionIntent::SeekUnit { target, aim: None };
                unit.chase_cooldown = 0;
            }
        }
    }

    /// Place an extra unit during the placement phase
    ///
    /// The tile must lie in the team's placement zone: everything
    /// reachable from its capital without crossing mountains or water.
    pub fn place_unit(&mut self, team: Team, tile: TilePos) -> Result<UnitId> {
        if self.phase != MatchPhase::Placement {
            return Err(FrontError::PlacementPhaseOver);
        }

        if !self.placement_zone(team).contains(&tile) {
            return Err(FrontError::OutsidePlacementZone(tile, team));
        }

        let unit = Unit::new(self.grid.tile_center(tile), team);
        let id = unit.id;
        self.units.push(unit);
        Ok(id)
    }

    /// Tiles reachable from the team's capital over placeable terrain
    pub fn placement_zone(&self, team: Team) -> AHashSet<TilePos> {
        let capital = self.capital(team);
        let mut zone = AHashSet::new();

        let placeable = |pos: TilePos| {
            self.grid
                .get(pos)
                .map(|t| t.valid_for_placement())
                .unwrap_or(false)
        };

        if !placeable(capital) {
            return zone;
        }

        let mut stack = vec![capital];
        zone.insert(capital);
        while let Some(current) = stack.pop() {
            for neighbor in current.neighbors4() {
                if placeable(neighbor) && zone.insert(neighbor) {
                    stack.push(neighbor);
                }
            }
        }

        zone
    }
}

/// Scatter a team's starting units on plain tiles near its capital
fn spawn_around(
    grid: &TileGrid,
    capital: TilePos,
    team: Team,
    config: &MatchConfig,
    rng: &mut ChaCha8Rng,
    units: &mut Vec<Unit>,
) {
    let mut placed = 0;
    let mut attempts = 0;
    let max_attempts = config.units_per_team * 1000;

    while placed < config.units_per_team && attempts < max_attempts {
        attempts += 1;
        let tile = TilePos::new(
            capital.x + rng.gen_range(-config.spawn_spread..=config.spawn_spread),
            capital.y + rng.gen_range(-config.spawn_spread..=config.spawn_spread),
        );
        if grid.get(tile) == Some(Terrain::Plain) {
            units.push(Unit::new(grid.tile_center(tile), team));
            placed += 1;
        }
    }

    // The capital tile is always plain; stacked spawns separate on the
    // first collision pass.
    while placed < config.units_per_team {
        units.push(Unit::new(grid.tile_center(capital), team));
        placed += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> MatchConfig {
        MatchConfig {
            map_width: 40,
            map_height: 30,
            units_per_team: 5,
            seed: 42,
            ..Default::default()
        }
    }

    #[test]
    fn test_new_world_spawns_both_armies() {
        let world = MatchWorld::new(small_config()).unwrap();
        assert_eq!(world.units_of(Team::Red).count(), 5);
        assert_eq!(world.units_of(Team::Blue).count(), 5);
        assert_eq!(world.phase(), MatchPhase::Placement);
    }

    #[test]
    fn test_capitals_normalized_to_plain() {
        let world = MatchWorld::new(small_config()).unwrap();
        assert_eq!(world.grid().get(world.capital(Team::Red)), Some(Terrain::Plain));
        assert_eq!(world.grid().get(world.capital(Team::Blue)), Some(Terrain::Plain));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = MatchConfig { map_width: 2, ..Default::default() };
        assert!(MatchWorld::new(config).is_err());
    }

    #[test]
    fn test_selection_round_trip() {
        let mut world = MatchWorld::new(small_config()).unwrap();
        let id = world.units()[0].id;

        world.select(id);
        assert_eq!(world.selected_units().count(), 1);

        world.clear_selection();
        assert_eq!(world.selected_units().count(), 0);
    }

    #[test]
    fn test_placement_zone_excludes_hazards() {
        let world = MatchWorld::new(small_config()).unwrap();
        let zone = world.placement_zone(Team::Blue);

        assert!(zone.contains(&world.capital(Team::Blue)));
        for tile in &zone {
            let terrain = world.grid().get(*tile).unwrap();
            assert!(terrain.valid_for_placement(), "{:?} in zone", terrain);
        }
    }

    #[test]
    fn test_place_unit_in_zone() {
        let mut world = MatchWorld::new(small_config()).unwrap();
        let capital = world.capital(Team::Blue);

        let before = world.units().len();
        let id = world.place_unit(Team::Blue, capital).unwrap();
        assert_eq!(world.units().len(), before + 1);
        assert!(world.is_alive(id));
    }

    #[test]
    fn test_place_unit_rejects_mountain() {
        let mut world = MatchWorld::new(small_config()).unwrap();
        // Find some mountain tile
        let mountain = world
            .grid()
            .positions()
            .find(|pos| world.grid().get(*pos) == Some(Terrain::Mountain))
            .expect("generated map has mountains");

        assert!(world.place_unit(Team::Blue, mountain).is_err());
    }

    #[test]
    fn test_issue_attack_sets_chase_intent() {
        let mut world = MatchWorld::new(small_config()).unwrap();
        let attacker = world.units_of(Team::Blue).next().unwrap().id;
        let target = world.units_of(Team::Red).next().unwrap().id;

        world.issue_attack(&[attacker], target);

        match world.unit(attacker).unwrap().intent {
            MotionIntent::SeekUnit { target: t, .. } => assert_eq!(t, target),
            ref other => panic!("expected SeekUnit, got {:?}", other),
        }
    }

    #[test]
    fn test_issue_move_to_unreachable_leaves_unit_stationary() {
        let mut world = MatchWorld::new(small_config()).unwrap();
        let id = world.units_of(Team::Blue).next().unwrap().id;

        // Aim at a lake tile: the any-angle goal is blocked, path empty
        let lake = world
            .grid()
            .positions()
            .find(|pos| world.grid().get(*pos) == Some(Terrain::Lake));
        if let Some(lake) = lake {
            let target = world.grid().tile_center(lake);
            world.issue_move(&[id], target);
            assert_eq!(world.unit(id).unwrap().intent, MotionIntent::Idle);
        }
    }
}
