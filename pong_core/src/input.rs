//! Paddle input reconciliation.
//!
//! Touch handlers and remote accessories may run on other threads. They all
//! write into one slot per paddle; the physics step reads whatever was stored
//! last. A slot is a single `AtomicU32` holding the bits of an `f32`, so a
//! write can never be seen half-done.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use glam::Vec2;

use crate::{PaddlePositions, RemoteMode, RemotePolicy, Side, Table};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("no remote channel configured for the {0:?} paddle")]
    Unavailable(Side),
    #[error("remote read failed for the {side:?} paddle: {reason}")]
    ReadFailure { side: Side, reason: String },
}

/// An accessory that can be asked for its latest sample
pub trait RemoteSource {
    /// Absolute x or signed delta, depending on the router's policy
    fn read(&mut self) -> Result<f32, InputError>;
}

#[derive(Debug)]
struct PaddleSlot(AtomicU32);

impl PaddleSlot {
    fn new(x: f32) -> Self {
        Self(AtomicU32::new(x.to_bits()))
    }

    fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Acquire))
    }

    fn store(&self, x: f32) {
        self.0.store(x.to_bits(), Ordering::Release);
    }

    /// Apply `f` atomically; returns the new value
    fn update(&self, f: impl Fn(f32) -> f32) -> f32 {
        let previous = self
            .0
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |bits| {
                Some(f(f32::from_bits(bits)).to_bits())
            })
            .unwrap_or_else(|bits| bits);
        f(f32::from_bits(previous))
    }
}

#[derive(Debug)]
struct Slots {
    top: PaddleSlot,
    bottom: PaddleSlot,
}

impl Slots {
    fn get(&self, side: Side) -> &PaddleSlot {
        match side {
            Side::Top => &self.top,
            Side::Bottom => &self.bottom,
        }
    }
}

/// Authoritative paddle targets.
///
/// Clones share the same slots, so a clone can be moved into a touch
/// callback or an accessory thread while the engine keeps stepping.
#[derive(Debug, Clone)]
pub struct InputRouter {
    table: Table,
    policy: RemotePolicy,
    remote_mode: RemoteMode,
    slots: Arc<Slots>,
}

impl InputRouter {
    pub fn new(table: Table, policy: RemotePolicy, remote_mode: RemoteMode) -> Self {
        let center = table.center().x;
        Self {
            table,
            policy,
            remote_mode,
            slots: Arc::new(Slots {
                top: PaddleSlot::new(center),
                bottom: PaddleSlot::new(center),
            }),
        }
    }

    pub fn policy(&self) -> RemotePolicy {
        self.policy
    }

    pub fn remote_mode(&self) -> RemoteMode {
        self.remote_mode
    }

    /// Clamp and store a new target. NaN is ignored.
    pub fn set_paddle_position(&self, side: Side, raw_x: f32) -> f32 {
        let slot = self.slots.get(side);
        if raw_x.is_nan() {
            return slot.load();
        }
        let x = self.table.clamp_paddle_x(raw_x);
        slot.store(x);
        x
    }

    pub fn current_position(&self, side: Side) -> f32 {
        self.slots.get(side).load()
    }

    pub fn positions(&self) -> PaddlePositions {
        PaddlePositions::new(
            self.current_position(Side::Top),
            self.current_position(Side::Bottom),
        )
    }

    /// Both paddles back to the table center
    pub fn reset(&self) {
        let center = self.table.center().x;
        for side in Side::BOTH {
            self.slots.get(side).store(center);
        }
    }

    /// Route the first active pointer to the paddle on its half of the table.
    ///
    /// Returns the paddle moved and its stored x, or `None` when there is no
    /// pointer or it sits exactly on the midline.
    pub fn touch_moved(&self, touches: &[Vec2]) -> Option<(Side, f32)> {
        let touch = touches.first()?;
        let midline = self.table.midline();
        let side = if touch.y < midline {
            Side::Bottom
        } else if touch.y > midline {
            Side::Top
        } else {
            return None;
        };
        Some((side, self.set_paddle_position(side, touch.x)))
    }

    /// Apply one accessory sample under the configured policy.
    ///
    /// `Ok(None)` means the sample fell inside the deadband and was dropped.
    pub fn apply_remote(&self, side: Side, sample: f32) -> Result<Option<f32>, InputError> {
        if !self.remote_mode.drives(side) {
            return Err(InputError::Unavailable(side));
        }
        if !sample.is_finite() {
            return Err(InputError::ReadFailure {
                side,
                reason: format!("non-finite sample {sample}"),
            });
        }

        match self.policy {
            RemotePolicy::AbsoluteDeadband { threshold } => {
                let current = self.current_position(side);
                if (sample - current).abs() > threshold {
                    Ok(Some(self.set_paddle_position(side, sample)))
                } else {
                    Ok(None)
                }
            }
            RemotePolicy::Incremental => {
                let table = self.table;
                let x = self
                    .slots
                    .get(side)
                    .update(|current| table.clamp_paddle_x(current + sample));
                Ok(Some(x))
            }
        }
    }

    /// Read one sample from `source` and apply it.
    ///
    /// Failures leave the paddle where it was and are only logged.
    pub fn pump(&self, side: Side, source: &mut dyn RemoteSource) -> Option<f32> {
        let result = source
            .read()
            .and_then(|sample| self.apply_remote(side, sample));
        match result {
            Ok(x) => x,
            Err(err) => {
                log::warn!("{err}; holding paddle at {}", self.current_position(side));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router(policy: RemotePolicy, remote_mode: RemoteMode) -> InputRouter {
        InputRouter::new(Table::new(400.0, 800.0), policy, remote_mode)
    }

    fn touch_router() -> InputRouter {
        router(RemotePolicy::default(), RemoteMode::Disabled)
    }

    struct Scripted(Vec<Result<f32, InputError>>);

    impl RemoteSource for Scripted {
        fn read(&mut self) -> Result<f32, InputError> {
            self.0.remove(0)
        }
    }

    #[test]
    fn test_paddles_start_centered() {
        let input = touch_router();
        assert_eq!(input.positions(), PaddlePositions::new(200.0, 200.0));
    }

    #[test]
    fn test_set_paddle_position_clamps() {
        let input = touch_router();
        assert_eq!(input.set_paddle_position(Side::Bottom, -10.0), 50.0);
        assert_eq!(input.current_position(Side::Bottom), 50.0);
        assert_eq!(input.set_paddle_position(Side::Bottom, 1000.0), 350.0);
        assert_eq!(input.current_position(Side::Bottom), 350.0);
        assert_eq!(input.current_position(Side::Top), 200.0, "Other paddle untouched");
    }

    #[test]
    fn test_nan_target_is_ignored() {
        let input = touch_router();
        input.set_paddle_position(Side::Top, 120.0);
        assert_eq!(input.set_paddle_position(Side::Top, f32::NAN), 120.0);
        assert_eq!(input.current_position(Side::Top), 120.0);
    }

    #[test]
    fn test_last_write_wins() {
        let input = touch_router();
        input.set_paddle_position(Side::Top, 100.0);
        input.set_paddle_position(Side::Top, 300.0);
        assert_eq!(input.positions().top, 300.0);
    }

    #[test]
    fn test_touch_below_midline_moves_bottom_paddle() {
        let input = touch_router();
        let moved = input.touch_moved(&[Vec2::new(120.0, 150.0), Vec2::new(300.0, 700.0)]);
        assert_eq!(moved, Some((Side::Bottom, 120.0)));
        assert_eq!(input.current_position(Side::Top), 200.0, "Second pointer ignored");
    }

    #[test]
    fn test_touch_above_midline_moves_top_paddle() {
        let input = touch_router();
        assert_eq!(
            input.touch_moved(&[Vec2::new(390.0, 650.0)]),
            Some((Side::Top, 350.0))
        );
        assert_eq!(input.current_position(Side::Bottom), 200.0);
    }

    #[test]
    fn test_no_active_touch_is_a_no_op() {
        let input = touch_router();
        assert_eq!(input.touch_moved(&[]), None);
        assert_eq!(input.touch_moved(&[Vec2::new(10.0, 400.0)]), None);
        assert_eq!(input.positions(), PaddlePositions::new(200.0, 200.0));
    }

    #[test]
    fn test_deadband_drops_small_moves() {
        let input = router(RemotePolicy::default(), RemoteMode::Single(Side::Top));
        assert_eq!(input.apply_remote(Side::Top, 204.0), Ok(None));
        assert_eq!(input.apply_remote(Side::Top, 195.0), Ok(None));
        assert_eq!(input.current_position(Side::Top), 200.0);

        assert_eq!(input.apply_remote(Side::Top, 206.0), Ok(Some(206.0)));
        assert_eq!(input.apply_remote(Side::Top, -80.0), Ok(Some(50.0)), "Clamped");
    }

    #[test]
    fn test_incremental_adds_delta() {
        let input = router(RemotePolicy::Incremental, RemoteMode::Dual);
        assert_eq!(input.apply_remote(Side::Bottom, 15.0), Ok(Some(215.0)));
        assert_eq!(input.apply_remote(Side::Bottom, -2.5), Ok(Some(212.5)));
        assert_eq!(input.apply_remote(Side::Top, 500.0), Ok(Some(350.0)));
        assert_eq!(input.positions(), PaddlePositions::new(350.0, 212.5));
    }

    #[test]
    fn test_remote_without_channel_is_unavailable() {
        let input = router(RemotePolicy::default(), RemoteMode::Single(Side::Top));
        assert_eq!(
            input.apply_remote(Side::Bottom, 300.0),
            Err(InputError::Unavailable(Side::Bottom))
        );
        assert_eq!(input.current_position(Side::Bottom), 200.0);
    }

    #[test]
    fn test_pump_holds_position_on_failure() {
        let input = router(RemotePolicy::default(), RemoteMode::Dual);
        let mut source = Scripted(vec![
            Ok(300.0),
            Err(InputError::ReadFailure {
                side: Side::Top,
                reason: "notification dropped".to_string(),
            }),
            Ok(f32::INFINITY),
            Ok(100.0),
        ]);

        assert_eq!(input.pump(Side::Top, &mut source), Some(300.0));
        assert_eq!(input.pump(Side::Top, &mut source), None);
        assert_eq!(input.current_position(Side::Top), 300.0);
        assert_eq!(input.pump(Side::Top, &mut source), None);
        assert_eq!(input.current_position(Side::Top), 300.0);
        assert_eq!(input.pump(Side::Top, &mut source), Some(100.0), "Recovers on next sample");
    }

    #[test]
    fn test_writes_from_another_thread_are_visible() {
        let input = router(RemotePolicy::Incremental, RemoteMode::Single(Side::Bottom));
        let remote = input.clone();

        let handle = std::thread::spawn(move || {
            for _ in 0..100 {
                remote.apply_remote(Side::Bottom, 1.0).unwrap();
            }
        });
        handle.join().unwrap();

        assert_eq!(input.current_position(Side::Bottom), 300.0);
    }

    #[test]
    fn test_reset_recenters_both_paddles() {
        let input = touch_router();
        input.set_paddle_position(Side::Top, 60.0);
        input.set_paddle_position(Side::Bottom, 340.0);
        input.reset();
        assert_eq!(input.positions(), PaddlePositions::new(200.0, 200.0));
    }
}
