//! Unit state and per-tick mechanics: motion, collision, morale

pub mod collision;
pub mod morale;
pub mod motion;
pub mod unit;

pub use collision::resolve_collisions;
pub use unit::{MotionIntent, Unit, UnitId};
