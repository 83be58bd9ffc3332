use serde::{Deserialize, Serialize};

use crate::{Event, Score, Side};

/// Ball count variant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Standard,
    TwoBalls,
}

impl Mode {
    pub fn ball_count(self) -> usize {
        match self {
            Mode::Standard => 1,
            Mode::TwoBalls => 2,
        }
    }
}

/// Match lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lifecycle {
    Playing,
    /// Left only through an explicit reset
    Ended { winner: Side },
}

/// Score, mode and lifecycle of the current round
#[derive(Debug, Clone)]
pub struct GameState {
    pub score: Score,
    pub mode: Mode,
    pub pending_mode: Option<Mode>,
    pub lifecycle: Lifecycle,
    pub win_score: u32,
}

impl GameState {
    pub fn new(mode: Mode, win_score: u32) -> Self {
        Self {
            score: Score::new(),
            mode,
            pending_mode: None,
            lifecycle: Lifecycle::Playing,
            win_score,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.lifecycle == Lifecycle::Playing
    }

    /// Count a goal for `side`. Returns false if the match is already over.
    pub fn apply_goal(&mut self, side: Side) -> bool {
        if !self.is_playing() {
            log::debug!("ignoring goal for {:?}, match has ended", side);
            return false;
        }

        self.score.increment(side);
        log::info!("score top={} bottom={}", self.score.top, self.score.bottom);

        if self.score.get(side) >= self.win_score {
            self.lifecycle = Lifecycle::Ended { winner: side };
            log::info!(
                "{:?} wins {}-{}",
                side,
                self.score.get(side),
                self.score.get(side.opponent())
            );
        }
        true
    }

    /// Feed a batch of physics events; only goals matter here
    pub fn apply_events(&mut self, events: &[Event]) {
        for event in events {
            if let Event::Goal(side) = event {
                self.apply_goal(*side);
            }
        }
    }

    /// Takes effect at the next reset
    pub fn set_mode(&mut self, mode: Mode) {
        self.pending_mode = Some(mode);
    }

    /// Back to a fresh round. Returns the mode the new balls should use.
    pub fn reset(&mut self) -> Mode {
        if let Some(mode) = self.pending_mode.take() {
            self.mode = mode;
        }
        self.score = Score::new();
        self.lifecycle = Lifecycle::Playing;
        self.mode
    }
}
