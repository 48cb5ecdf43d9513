use crate::angle::segment_angle_deg;
use serde::{Deserialize, Serialize};

/// Finite line segment with integer pixel endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSegment {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl LineSegment {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Orientation in degrees, `(-90, 90]`.
    pub fn angle_deg(&self) -> f32 {
        segment_angle_deg(self.x1 as f32, self.y1 as f32, self.x2 as f32, self.y2 as f32)
    }

    /// Integer midpoint; coordinates are non-negative so this truncates.
    pub fn midpoint(&self) -> (i32, i32) {
        ((self.x1 + self.x2) / 2, (self.y1 + self.y2) / 2)
    }

    pub fn length(&self) -> f32 {
        let dx = (self.x2 - self.x1) as f32;
        let dy = (self.y2 - self.y1) as f32;
        (dx * dx + dy * dy).sqrt()
    }
}
