//! Simulation constants - all world-scale tunable values in one place
//!
//! Per-match knobs (map size, seed, pacing) live in `core::config`.

/// Edge length of one tile in world units
pub const TILE_SIZE: f32 = 10.0;

/// Collision radius of a unit in world units
pub const UNIT_RADIUS: f32 = 6.0;

/// Base movement speed as a fraction of a tile per tick
pub const MOVE_SPEED: f32 = 0.1;

/// Speed multiplier while crossing water tiles
pub const WATER_SLOW_FACTOR: f32 = 0.5;

/// Distance below which a unit snaps onto its destination
pub const ARRIVE_EPSILON: f32 = 1.0;

/// Consecutive ticks in enemy territory before a unit is destroyed
pub const ENCIRCLED_TICK_LIMIT: u32 = 300;

/// Sentinel forced into the encirclement counter when HP reaches zero,
/// guaranteeing removal on the next death sweep
pub const DEAD_SENTINEL_TICKS: u32 = 999_999;

/// Ticks between re-aims while chasing a moving target
pub const CHASE_COOLDOWN_TICKS: u32 = 15;

// Combat (per tick)
/// Radius of the local skirmish neighborhood in world units
pub const ATTACK_RANGE: f32 = 40.0;
/// Damage queued against an outnumbered unit each tick
pub const BASE_DAMAGE: f32 = 1.0;
/// Damage multiplier against a unit standing in enemy territory
pub const ENCIRCLED_DAMAGE_MULTIPLIER: f32 = 2.0;

// Pathfinding margins (world units)
/// Clearance kept from mountain tiles by the any-angle planner
pub const MOUNTAIN_MARGIN: f32 = 12.0;
/// Clearance kept from other units by the any-angle planner
pub const UNIT_MARGIN: f32 = 8.0;

// Morale / fatigue (per tick, values clamp to [0, 100])
/// HP below which morale starts draining
pub const LOW_HP_THRESHOLD: f32 = 30.0;
pub const MORALE_DECAY_RATE: f32 = 0.05;
/// Morale drains this much faster while encircled
pub const MORALE_ENCIRCLED_MULTIPLIER: f32 = 2.0;
pub const MORALE_RECOVERY_RATE: f32 = 0.02;
pub const FATIGUE_RISE_RATE: f32 = 0.03;
pub const FATIGUE_RECOVERY_RATE: f32 = 0.05;

/// Floor of the morale speed multiplier (morale 0 halves speed)
pub const MORALE_SPEED_FLOOR: f32 = 0.5;
/// Fatigue 100 removes this fraction of speed
pub const FATIGUE_SPEED_PENALTY: f32 = 0.3;
