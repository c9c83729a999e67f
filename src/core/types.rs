//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Game tick counter (simulation time unit)
pub type Tick = u64;

/// One of the two factions contesting the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    Red,
    Blue,
}

impl Team {
    /// The opposing faction
    pub fn opponent(&self) -> Team {
        match self {
            Team::Red => Team::Blue,
            Team::Blue => Team::Red,
        }
    }
}

/// Integer tile coordinate on the map grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TilePos {
    pub x: i32,
    pub y: i32,
}

impl TilePos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The 4 cardinal neighbors
    pub fn neighbors4(&self) -> [TilePos; 4] {
        [
            TilePos::new(self.x + 1, self.y),
            TilePos::new(self.x - 1, self.y),
            TilePos::new(self.x, self.y + 1),
            TilePos::new(self.x, self.y - 1),
        ]
    }

    /// The 8 cardinal + diagonal neighbors
    pub fn neighbors8(&self) -> [TilePos; 8] {
        [
            TilePos::new(self.x + 1, self.y),
            TilePos::new(self.x - 1, self.y),
            TilePos::new(self.x, self.y + 1),
            TilePos::new(self.x, self.y - 1),
            TilePos::new(self.x + 1, self.y + 1),
            TilePos::new(self.x + 1, self.y - 1),
            TilePos::new(self.x - 1, self.y + 1),
            TilePos::new(self.x - 1, self.y - 1),
        ]
    }
}

/// 2D position in continuous world units
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn distance_squared(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 0.0001 {
            Self { x: self.x / len, y: self.y / len }
        } else {
            Self::default()
        }
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self { x: self.x * rhs, y: self.y * rhs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_opponent() {
        assert_eq!(Team::Red.opponent(), Team::Blue);
        assert_eq!(Team::Blue.opponent(), Team::Red);
        assert_eq!(Team::Red.opponent().opponent(), Team::Red);
    }

    #[test]
    fn test_tile_pos_neighbors4() {
        let p = TilePos::new(3, 5);
        let n = p.neighbors4();
        assert!(n.contains(&TilePos::new(2, 5)));
        assert!(n.contains(&TilePos::new(3, 6)));
        assert!(!n.contains(&TilePos::new(4, 6)));
    }

    #[test]
    fn test_tile_pos_neighbors8_include_diagonals() {
        let p = TilePos::new(0, 0);
        let n = p.neighbors8();
        assert_eq!(n.len(), 8);
        assert!(n.contains(&TilePos::new(1, 1)));
        assert!(n.contains(&TilePos::new(-1, -1)));
    }

    #[test]
    fn test_vec2_distance() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-6);
        assert!((a.distance_squared(&b) - 25.0).abs() < 1e-6);
    }

    #[test]
    fn test_vec2_normalize_zero_is_zero() {
        let v = Vec2::default().normalize();
        assert_eq!(v.x, 0.0);
        assert_eq!(v.y, 0.0);
    }
}
