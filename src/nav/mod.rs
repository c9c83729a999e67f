//! Grid pathfinding: plain BFS, blocked-map construction, and the
//! any-angle planner built on top of both
//!
//! Every query that cannot be satisfied returns an empty path, never an
//! error - callers treat empty as "no route, stay put".

pub mod any_angle;
pub mod bfs;
pub mod blocked;

pub use any_angle::any_angle_path;
pub use bfs::bfs_path;
pub use blocked::BlockedMap;
