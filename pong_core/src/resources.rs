use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::components::{BallId, Side};

/// Game score tracking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub top: u32,    // Top player score
    pub bottom: u32, // Bottom player score
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Top => self.top,
            Side::Bottom => self.bottom,
        }
    }

    pub fn increment(&mut self, side: Side) {
        match side {
            Side::Top => self.top += 1,
            Side::Bottom => self.bottom += 1,
        }
    }

    pub fn has_winner(&self, win_score: u32) -> Option<Side> {
        if self.top >= win_score {
            Some(Side::Top)
        } else if self.bottom >= win_score {
            Some(Side::Bottom)
        } else {
            None
        }
    }
}

/// Random number generator
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::from_entropy())
    }

    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::new)
    }

    /// Each component gets its own magnitude in `[min, max]` and its own sign.
    pub fn respawn_velocity(&mut self, min: f32, max: f32) -> Vec2 {
        let vx = self.signed_magnitude(min, max);
        let vy = self.signed_magnitude(min, max);
        Vec2::new(vx, vy)
    }

    fn signed_magnitude(&mut self, min: f32, max: f32) -> f32 {
        let magnitude = self.0.gen_range(min..=max);
        if self.0.gen_bool(0.5) {
            magnitude
        } else {
            -magnitude
        }
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

/// Something the host may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// A ball crossed a goal line; `Side` is the player who scores
    Goal(Side),
    /// A ball bounced off a paddle (audio cue)
    Contact(BallId),
    /// Host asked to leave the table for the menu
    ReturnHome,
}

/// Events that occurred during a step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Events {
    pub list: Vec<Event>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.list.clear();
    }

    pub fn push(&mut self, event: Event) {
        self.list.push(event);
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn goals(&self) -> impl Iterator<Item = Side> + '_ {
        self.list.iter().filter_map(|e| match e {
            Event::Goal(side) => Some(*side),
            _ => None,
        })
    }

    pub fn contacts(&self) -> impl Iterator<Item = BallId> + '_ {
        self.list.iter().filter_map(|e| match e {
            Event::Contact(id) => Some(*id),
            _ => None,
        })
    }

    pub fn into_vec(self) -> Vec<Event> {
        self.list
    }
}
