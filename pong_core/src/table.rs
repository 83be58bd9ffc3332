use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::components::Side;
use crate::params::Params;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Check if circle intersects AABB
    pub fn intersects_circle(&self, center: Vec2, radius: f32) -> bool {
        let closest = Vec2::new(
            center.x.clamp(self.min.x, self.max.x),
            center.y.clamp(self.min.y, self.max.y),
        );
        (center - closest).length_squared() <= radius * radius
    }
}

/// Static table geometry.
///
/// The origin is the bottom-left corner and y grows toward the top player.
/// Two vertical walls run along the left and right edges; the top and bottom
/// edges are open goal lines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Table {
    pub width: f32,
    pub height: f32,
    pub wall_thickness: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_edge_offset: f32,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            width: Params::TABLE_WIDTH,
            height: Params::TABLE_HEIGHT,
            wall_thickness: Params::WALL_THICKNESS,
            paddle_width: Params::PADDLE_WIDTH,
            paddle_height: Params::PADDLE_HEIGHT,
            paddle_edge_offset: Params::PADDLE_EDGE_OFFSET,
        }
    }
}

impl Table {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Ball spawn point (table center)
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn midline(&self) -> f32 {
        self.height / 2.0
    }

    /// Fixed y of a paddle, measured from the wall it defends
    pub fn paddle_y(&self, side: Side) -> f32 {
        match side {
            Side::Bottom => self.paddle_edge_offset,
            Side::Top => self.height - self.paddle_edge_offset,
        }
    }

    pub fn paddle_size(&self) -> Vec2 {
        Vec2::new(self.paddle_width, self.paddle_height)
    }

    /// Clamp paddle X so the whole paddle stays on the table
    pub fn clamp_paddle_x(&self, x: f32) -> f32 {
        let half_width = self.paddle_width / 2.0;
        x.clamp(half_width, self.width - half_width)
    }

    /// Inner x limits a ball may reach before bouncing off a wall
    pub fn wall_bounds(&self) -> (f32, f32) {
        let half = self.wall_thickness / 2.0;
        (half, self.width - half)
    }

    pub fn paddle_aabb(&self, side: Side, x: f32) -> Aabb {
        Aabb::from_center_size(Vec2::new(x, self.paddle_y(side)), self.paddle_size())
    }
}
