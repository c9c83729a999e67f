//! Match orchestration: the owning world state, the tick loop, and the
//! tunable constants

pub mod constants;
pub mod tick;
pub mod world;

pub use tick::{Victory, VictoryReason};
pub use world::{MatchPhase, MatchWorld};
