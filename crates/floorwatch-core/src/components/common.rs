//! Components shared by people and assets.

use floorwatch_logic::geometry::Point;
use serde::{Deserialize, Serialize};

/// Where an entity is on the floor map
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub Point);

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self(Point::new(x, y))
    }

    pub fn point(&self) -> Point {
        self.0
    }
}

/// Spawn order. Snapshots are sorted by it so the roster reads the same
/// every tick regardless of archetype layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RosterIndex(pub u32);
