pub mod config;
pub mod error;
pub mod types;

pub use config::MatchConfig;
pub use error::{FrontError, Result};
pub use types::{Team, Tick, TilePos, Vec2};
