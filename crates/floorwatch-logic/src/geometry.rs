//! Planar geometry for the warehouse floor.
//!
//! Zones are tested against the axis-aligned bounding box of their boundary
//! points, so a zone always behaves as a rectangle no matter how many
//! points describe it.
//!
//! ```
//! use floorwatch_logic::geometry::{calculate_distance, format_time, Point};
//!
//! let d = calculate_distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0));
//! assert_eq!(d, 5.0);
//! assert_eq!(format_time(65.0), "1:05");
//! ```

use serde::{Deserialize, Serialize};

use crate::model::Zone;

/// 2D position on the floor map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn distance(&self, other: &Self) -> f32 {
        calculate_distance(*self, *other)
    }
}

/// Axis-aligned bounding box of a set of points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Bounds {
    /// Bounding box of `points`, or `None` for an empty slice.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let mut bounds = Self {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };
        for p in &points[1..] {
            bounds.min_x = bounds.min_x.min(p.x);
            bounds.max_x = bounds.max_x.max(p.x);
            bounds.min_y = bounds.min_y.min(p.y);
            bounds.max_y = bounds.max_y.max(p.y);
        }
        Some(bounds)
    }

    /// Inclusive containment.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }
}

/// The walkable part of the floor: `[padding, dimension - padding]` on each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub width: f32,
    pub height: f32,
    pub padding: f32,
}

impl WorldBounds {
    pub fn new(width: f32, height: f32, padding: f32) -> Self {
        Self {
            width,
            height,
            padding,
        }
    }

    pub fn min_x(&self) -> f32 {
        self.padding
    }
    pub fn max_x(&self) -> f32 {
        self.width - self.padding
    }
    pub fn min_y(&self) -> f32 {
        self.padding
    }
    pub fn max_y(&self) -> f32 {
        self.height - self.padding
    }

    pub fn x_in_range(&self, x: f32) -> bool {
        x >= self.min_x() && x <= self.max_x()
    }

    pub fn y_in_range(&self, y: f32) -> bool {
        y >= self.min_y() && y <= self.max_y()
    }

    pub fn contains(&self, point: Point) -> bool {
        self.x_in_range(point.x) && self.y_in_range(point.y)
    }

    /// Clamp each axis independently into the padded range.
    pub fn clamp(&self, point: Point) -> Point {
        Point {
            x: point.x.clamp(self.min_x(), self.max_x()),
            y: point.y.clamp(self.min_y(), self.max_y()),
        }
    }
}

/// True iff `point` lies inside the bounding box of the zone's boundary points.
pub fn is_point_in_zone(point: Point, zone: &Zone) -> bool {
    Bounds::from_points(&zone.points).is_some_and(|b| b.contains(point))
}

/// Euclidean distance.
pub fn calculate_distance(p1: Point, p2: Point) -> f32 {
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    (dx * dx + dy * dy).sqrt()
}

/// Format seconds as `M:SS`. Negative or non-finite input reads as zero.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    };
    let minutes = (total / 60.0).floor() as u64;
    let secs = (total % 60.0).floor() as u64;
    format!("{}:{:02}", minutes, secs)
}

/// Clamp a point into the padded world.
pub fn clamp_to_world(point: Point, bounds: &WorldBounds) -> Point {
    bounds.clamp(point)
}
