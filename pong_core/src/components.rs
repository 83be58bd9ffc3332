use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Which player a paddle, goal or win belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Top,
    Bottom,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Top, Side::Bottom];

    pub fn opponent(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
        }
    }
}

/// Stable ball identifier, reassigned whenever balls are recreated
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BallId(pub u32);

/// Ball component
#[derive(Debug, Clone, Copy)]
pub struct Ball {
    pub id: BallId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(id: BallId, pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            id,
            pos,
            vel,
            radius,
        }
    }

    /// Relocate to `center` with a fresh velocity from `rng`
    pub fn respawn(&mut self, center: Vec2, speed: (f32, f32), rng: &mut crate::GameRng) {
        self.pos = center;
        self.vel = rng.respawn_velocity(speed.0, speed.1);
    }
}

/// Paddle component. Only `x` moves; `y` is fixed by the table.
#[derive(Debug, Clone, Copy)]
pub struct Paddle {
    pub side: Side,
    pub x: f32,
    pub y: f32,
}

impl Paddle {
    pub fn new(side: Side, x: f32, y: f32) -> Self {
        Self { side, x, y }
    }
}

/// Paddle x positions handed to the physics step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaddlePositions {
    pub top: f32,
    pub bottom: f32,
}

impl PaddlePositions {
    pub fn new(top: f32, bottom: f32) -> Self {
        Self { top, bottom }
    }

    pub fn get(&self, side: Side) -> f32 {
        match side {
            Side::Top => self.top,
            Side::Bottom => self.bottom,
        }
    }
}
