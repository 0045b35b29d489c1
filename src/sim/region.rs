//! Axis-aligned hit regions
//!
//! Every ability resolves to a rectangle in street space. A point is inside
//! when it lies on or within the edges.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Build from any two opposite corners
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// A box that starts at `edge_x` and extends `length` in direction `dir` (±1),
    /// vertically centred on `center_y`
    pub fn extending(edge_x: f32, dir: f32, length: f32, center_y: f32, height: f32) -> Self {
        let half = height * 0.5;
        Self::from_corners(
            Vec2::new(edge_x, center_y - half),
            Vec2::new(edge_x + dir * length, center_y + half),
        )
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }
}
