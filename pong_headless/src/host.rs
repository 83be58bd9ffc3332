//! Headless host shell.
//!
//! Owns the engine, steps it at a fixed rate, stands in for the touch screen
//! with a simple autopilot on the bottom paddle, and reports what a renderer
//! and audio layer would react to.

use std::path::Path;
use std::time::Duration;

use glam::Vec2;
use pong_core::*;

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Load a JSON config; fields left out fall back to defaults
pub fn load_config(path: Option<&Path>) -> Result<Config, HostError> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let json = std::fs::read_to_string(path).map_err(|source| HostError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(serde_json::from_str(&json)?)
}

/// Side the simulated accessory drives
pub const ACCESSORY_SIDE: Side = Side::Top;

/// Make sure the accessory's paddle has a remote channel.
///
/// The bottom paddle belongs to the autopilot, so a config that leaves the
/// top paddle without a channel is switched to `Single(Top)`.
pub fn attach_accessory(config: &mut Config) -> Side {
    if !config.remote_mode.drives(ACCESSORY_SIDE) {
        log::info!(
            "remote mode {:?} does not drive the {:?} paddle; using Single({:?})",
            config.remote_mode,
            ACCESSORY_SIDE,
            ACCESSORY_SIDE
        );
        config.remote_mode = RemoteMode::Single(ACCESSORY_SIDE);
    }
    ACCESSORY_SIDE
}

pub struct Host {
    pub engine: Engine,
    touch: InputRouter,
    max_frames: u64,
    frame_delay: Duration,
}

impl Host {
    pub fn new(config: Config, max_frames: u64, frame_delay: Duration) -> Result<Self, HostError> {
        let engine = Engine::new(config)?;
        let touch = engine.input();
        Ok(Self {
            engine,
            touch,
            max_frames,
            frame_delay,
        })
    }

    /// One rendered frame: touch input, step, report
    pub fn frame(&mut self) -> Snapshot {
        let before = self.engine.snapshot();
        if let Some(pointer) = autopilot_touch(self.engine.table(), &before) {
            self.touch.touch_moved(&[pointer]);
        }

        let snapshot = self.engine.step(Params::FIXED_DT);
        report(&snapshot);
        snapshot
    }

    /// Step until someone wins or the frame budget runs out
    pub fn run_match(&mut self) -> Snapshot {
        let mut snapshot = self.engine.snapshot();
        for _ in 0..self.max_frames {
            snapshot = self.frame();
            if snapshot.winner().is_some() {
                break;
            }
            if !self.frame_delay.is_zero() {
                std::thread::sleep(self.frame_delay);
            }
        }
        snapshot
    }
}

/// Pointer position that keeps the bottom paddle under the lowest descending
/// ball, or parks it at the center when nothing is coming.
pub fn autopilot_touch(table: &Table, snapshot: &Snapshot) -> Option<Vec2> {
    let target_x = snapshot
        .balls
        .iter()
        .filter(|ball| ball.vy < 0.0)
        .min_by(|a, b| a.y.total_cmp(&b.y))
        .map_or(table.center().x, |ball| ball.x);

    if target_x == snapshot.paddles.bottom {
        return None;
    }
    Some(Vec2::new(target_x, table.midline() / 2.0))
}

/// Log what the renderer, audio and navigation layers would act on
pub fn report(snapshot: &Snapshot) {
    for event in &snapshot.events {
        match event {
            Event::Contact(id) => log::debug!("tick {}: paddle hit by ball {}", snapshot.tick, id.0),
            Event::Goal(side) => log::info!(
                "tick {}: goal for {:?}, score top={} bottom={}",
                snapshot.tick,
                side,
                snapshot.score.top,
                snapshot.score.bottom
            ),
            Event::ReturnHome => log::info!("tick {}: returning to menu", snapshot.tick),
        }
    }
}
