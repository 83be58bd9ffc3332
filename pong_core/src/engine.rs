//! Composition root handed to the host shell.

use serde::Serialize;

use crate::{
    Config, ConfigError, Event, GameRng, GameState, InputRouter, Lifecycle, Mode, PaddlePositions,
    Params, PhysicsWorld, Score, Side, Table,
};

/// One ball as seen by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BallSnapshot {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
}

/// Everything a host needs to draw a frame and react to it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub balls: Vec<BallSnapshot>,
    pub paddles: PaddlePositions,
    pub score: Score,
    pub lifecycle: Lifecycle,
    pub mode: Mode,
    pub events: Vec<Event>,
}

impl Snapshot {
    pub fn winner(&self) -> Option<Side> {
        match self.lifecycle {
            Lifecycle::Ended { winner } => Some(winner),
            Lifecycle::Playing => None,
        }
    }
}

pub struct Engine {
    config: Config,
    physics: PhysicsWorld,
    input: InputRouter,
    state: GameState,
    tick: u64,
    pending: Vec<Event>,
}

impl Engine {
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;

        let rng = GameRng::from_seed(config.seed);
        let mut physics = PhysicsWorld::new(&config, rng);
        let input = InputRouter::new(config.table, config.remote_policy, config.remote_mode);
        let state = GameState::new(config.initial_mode, config.win_score);
        physics.spawn_balls(state.mode);

        log::info!(
            "engine ready: {}x{} table, {:?}, first to {}",
            config.table.width,
            config.table.height,
            state.mode,
            config.win_score
        );

        Ok(Self {
            config,
            physics,
            input,
            state,
            tick: 0,
            pending: Vec::new(),
        })
    }

    /// Advance the simulation by `dt` frames.
    ///
    /// `dt` is clamped to `Params::MAX_DT` and split into sub-steps no longer
    /// than `Params::FIXED_DT`. A non-positive or non-finite `dt`, or an
    /// ended match, leaves the world untouched.
    pub fn step(&mut self, dt: f32) -> Snapshot {
        let mut events = std::mem::take(&mut self.pending);

        if dt.is_finite() && dt > 0.0 && self.state.is_playing() {
            let mut remaining = dt.min(Params::MAX_DT);
            while remaining > 0.0 && self.state.is_playing() {
                let step_dt = remaining.min(Params::FIXED_DT);
                remaining -= step_dt;

                let step_events = self.physics.step(step_dt, self.input.positions());
                self.state.apply_events(&step_events);
                events.extend(step_events);
            }
            self.tick += 1;
        }

        self.snapshot_with(events)
    }

    pub fn set_paddle_position(&self, side: Side, raw_x: f32) -> f32 {
        self.input.set_paddle_position(side, raw_x)
    }

    /// Applied at the next `reset`
    pub fn set_mode(&mut self, mode: Mode) {
        log::info!("mode {:?} queued for next reset", mode);
        self.state.set_mode(mode);
    }

    pub fn reset(&mut self) {
        let mode = self.state.reset();
        self.physics.spawn_balls(mode);
        self.input.reset();
        log::info!("reset: {:?}, score cleared", mode);
    }

    /// Forward a "return to menu" request to the host via the next snapshot
    pub fn request_home(&mut self) {
        self.pending.push(Event::ReturnHome);
    }

    /// Shared input handle for touch callbacks and accessory threads
    pub fn input(&self) -> InputRouter {
        self.input.clone()
    }

    /// Current state without stepping; queued events stay queued
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot_with(Vec::new())
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    /// Move one live ball; scenario setup for tests only
    #[cfg(any(test, feature = "test-support"))]
    pub fn place_ball(&mut self, id: crate::BallId, pos: glam::Vec2, vel: glam::Vec2) -> bool {
        self.physics.set_ball(id, pos, vel)
    }

    pub fn table(&self) -> &Table {
        &self.config.table
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn snapshot_with(&self, events: Vec<Event>) -> Snapshot {
        let balls = self
            .physics
            .balls()
            .into_iter()
            .map(|ball| BallSnapshot {
                id: ball.id.0,
                x: ball.pos.x,
                y: ball.pos.y,
                vx: ball.vel.x,
                vy: ball.vel.y,
            })
            .collect();

        Snapshot {
            tick: self.tick,
            balls,
            paddles: self.input.positions(),
            score: self.state.score,
            lifecycle: self.state.lifecycle,
            mode: self.state.mode,
            events,
        }
    }
}
