use serde::{Deserialize, Serialize};

use crate::components::Side;
use crate::game_state::Mode;
use crate::params::Params;
use crate::table::Table;

/// How remote accessory samples move a paddle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RemotePolicy {
    /// Sample is an absolute x; ignored unless it moves the paddle by more than `threshold`
    AbsoluteDeadband { threshold: f32 },
    /// Sample is a signed delta added to the current x
    Incremental,
}

impl Default for RemotePolicy {
    fn default() -> Self {
        RemotePolicy::AbsoluteDeadband {
            threshold: Params::REMOTE_DEADBAND,
        }
    }
}

/// Which paddles have a remote channel attached
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteMode {
    #[default]
    Disabled,
    Single(Side),
    Dual,
}

impl RemoteMode {
    pub fn drives(&self, side: Side) -> bool {
        match self {
            RemoteMode::Disabled => false,
            RemoteMode::Single(remote_side) => *remote_side == side,
            RemoteMode::Dual => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be positive and finite, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("paddle width {paddle} does not fit on a table {table} wide")]
    PaddleTooWide { paddle: f32, table: f32 },
    #[error("paddle edge offset {offset} must lie within the lower half of a table {height} high")]
    PaddleOffset { offset: f32, height: f32 },
    #[error("respawn speed range [{min}, {max}] is empty or non-positive")]
    SpeedRange { min: f32, max: f32 },
    #[error("respawn speed {max} would let a ball skip past a paddle; at most {limit} per step")]
    TooFast { max: f32, limit: f32 },
    #[error("remote deadband must be non-negative, got {0}")]
    Deadband(f32),
    #[error("winning score must be at least 1")]
    WinScore,
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub table: Table,
    pub ball_radius: f32,
    pub win_score: u32,
    pub respawn_speed_min: f32,
    pub respawn_speed_max: f32,
    pub initial_mode: Mode,
    pub remote_policy: RemotePolicy,
    pub remote_mode: RemoteMode,
    /// Fixed RNG seed; `None` seeds from OS entropy
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            table: Table::default(),
            ball_radius: Params::BALL_RADIUS,
            win_score: Params::WIN_SCORE,
            respawn_speed_min: Params::RESPAWN_SPEED_MIN,
            respawn_speed_max: Params::RESPAWN_SPEED_MAX,
            initial_mode: Mode::Standard,
            remote_policy: RemotePolicy::default(),
            remote_mode: RemoteMode::default(),
            seed: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn respawn_speed(&self) -> (f32, f32) {
        (self.respawn_speed_min, self.respawn_speed_max)
    }

    /// Fastest per-step travel a paddle can still catch.
    ///
    /// A ball bounces only while its center is on the court side of the
    /// paddle center and its circle overlaps the paddle, a band of
    /// `paddle_height / 2 + ball_radius`.
    pub fn max_catchable_speed(&self) -> f32 {
        (self.table.paddle_height / 2.0 + self.ball_radius) / Params::FIXED_DT
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let table = &self.table;
        for (field, value) in [
            ("table.width", table.width),
            ("table.height", table.height),
            ("table.paddle_width", table.paddle_width),
            ("table.paddle_height", table.paddle_height),
            ("ball_radius", self.ball_radius),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if !(table.wall_thickness.is_finite() && table.wall_thickness >= 0.0) {
            return Err(ConfigError::NonPositive {
                field: "table.wall_thickness",
                value: table.wall_thickness,
            });
        }
        if table.paddle_width > table.width {
            return Err(ConfigError::PaddleTooWide {
                paddle: table.paddle_width,
                table: table.width,
            });
        }
        if !(table.paddle_edge_offset > 0.0 && table.paddle_edge_offset < table.midline()) {
            return Err(ConfigError::PaddleOffset {
                offset: table.paddle_edge_offset,
                height: table.height,
            });
        }
        let (min, max) = self.respawn_speed();
        if !(min.is_finite() && max.is_finite() && min > 0.0 && min <= max) {
            return Err(ConfigError::SpeedRange { min, max });
        }
        let limit = self.max_catchable_speed();
        if max > limit {
            return Err(ConfigError::TooFast { max, limit });
        }
        if let RemotePolicy::AbsoluteDeadband { threshold } = self.remote_policy {
            if threshold.is_nan() || threshold < 0.0 {
                return Err(ConfigError::Deadband(threshold));
            }
        }
        if self.win_score == 0 {
            return Err(ConfigError::WinScore);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::new();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.ball_radius, 10.0);
        assert_eq!(config.win_score, 10);
        assert_eq!(config.respawn_speed(), (5.0, 8.0));
    }

    #[test]
    fn test_rejects_paddle_wider_than_table() {
        let mut config = Config::new();
        config.table.paddle_width = 500.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PaddleTooWide { .. })
        ));
    }

    #[test]
    fn test_rejects_inverted_speed_range() {
        let mut config = Config::new();
        config.respawn_speed_min = 9.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::SpeedRange { min: 9.0, max: 8.0 })
        );
    }

    #[test]
    fn test_rejects_speed_that_tunnels_through_paddle() {
        let mut config = Config::new();
        config.respawn_speed_max = 40.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::TooFast {
                max: 40.0,
                limit: 15.0
            })
        );

        config.respawn_speed_max = 15.0;
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_rejects_nan_geometry() {
        let mut config = Config::new();
        config.table.height = f32::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive {
                field: "table.height",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_zero_win_score() {
        let mut config = Config::new();
        config.win_score = 0;
        assert_eq!(config.validate(), Err(ConfigError::WinScore));
    }

    #[test]
    fn test_remote_mode_drives() {
        assert!(!RemoteMode::Disabled.drives(Side::Top));
        assert!(RemoteMode::Single(Side::Top).drives(Side::Top));
        assert!(!RemoteMode::Single(Side::Top).drives(Side::Bottom));
        assert!(RemoteMode::Dual.drives(Side::Bottom));
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let json = r#"{
            "win_score": 3,
            "table": { "width": 320.0 },
            "remote_policy": { "kind": "incremental" },
            "remote_mode": "dual"
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.win_score, 3);
        assert_eq!(config.table.width, 320.0);
        assert_eq!(config.table.height, Params::TABLE_HEIGHT);
        assert_eq!(config.remote_policy, RemotePolicy::Incremental);
        assert_eq!(config.remote_mode, RemoteMode::Dual);
        assert_eq!(config.validate(), Ok(()));
    }
}
