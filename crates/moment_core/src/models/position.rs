use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Map edge length in game units (both axes).
pub const MAP_SIZE: f64 = 14_400.0;

/// Map-space coordinate, roughly 0..=14400 per axis.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const CENTER: Position = Position { x: MAP_SIZE / 2.0, y: MAP_SIZE / 2.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Arithmetic mean of a set of points, `None` for an empty set.
    pub fn average(points: &[Position]) -> Option<Position> {
        if points.is_empty() {
            return None;
        }
        let n = points.len() as f64;
        let (sx, sy) = points.iter().fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Some(Position { x: sx / n, y: sy / n })
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::CENTER
    }
}
