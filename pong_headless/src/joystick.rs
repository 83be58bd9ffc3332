//! Stand-in for a tilt or joystick accessory.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use pong_core::*;

/// Reads fail every this many samples, like a flaky radio link
const FAILURE_PERIOD: u64 = 50;

/// Frames for one full sweep across the table
const SWEEP_PERIOD: f32 = 240.0;

pub struct SimulatedJoystick {
    side: Side,
    table: Table,
    policy: RemotePolicy,
    reads: u64,
    last_x: f32,
}

impl SimulatedJoystick {
    pub fn new(side: Side, table: Table, policy: RemotePolicy) -> Self {
        Self {
            side,
            table,
            policy,
            reads: 0,
            last_x: table.center().x,
        }
    }

    /// Where the stick points after `reads` samples, sweeping wall to wall
    fn sweep_x(&self) -> f32 {
        let phase = (self.reads as f32 / SWEEP_PERIOD) * std::f32::consts::TAU;
        self.table.center().x + phase.sin() * self.table.width / 2.0
    }
}

impl RemoteSource for SimulatedJoystick {
    fn read(&mut self) -> Result<f32, InputError> {
        self.reads += 1;
        if self.reads % FAILURE_PERIOD == 0 {
            return Err(InputError::ReadFailure {
                side: self.side,
                reason: format!("dropped sample {}", self.reads),
            });
        }

        let x = self.sweep_x();
        let sample = match self.policy {
            RemotePolicy::AbsoluteDeadband { .. } => x,
            RemotePolicy::Incremental => x - self.last_x,
        };
        self.last_x = x;
        Ok(sample)
    }
}

/// Poll `joystick` into `input` until `running` is cleared
pub fn spawn_accessory(
    input: InputRouter,
    mut joystick: SimulatedJoystick,
    running: Arc<AtomicBool>,
    poll: Duration,
) -> JoinHandle<()> {
    std::thread::spawn(move || {
        let side = joystick.side;
        log::info!("accessory attached to {:?} paddle", side);
        while running.load(Ordering::Acquire) {
            input.pump(side, &mut joystick);
            std::thread::sleep(poll);
        }
        log::info!("accessory detached from {:?} paddle", side);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_fiftieth_read_fails() {
        let mut joystick = SimulatedJoystick::new(
            Side::Top,
            Table::default(),
            RemotePolicy::AbsoluteDeadband { threshold: 5.0 },
        );

        let failures = (0..200).filter(|_| joystick.read().is_err()).count();
        assert_eq!(failures, 4);
    }

    #[test]
    fn test_absolute_samples_stay_on_table() {
        let table = Table::default();
        let mut joystick =
            SimulatedJoystick::new(Side::Top, table, RemotePolicy::AbsoluteDeadband { threshold: 5.0 });

        for sample in (0..240).filter_map(|_| joystick.read().ok()) {
            assert!((0.0..=table.width + 0.01).contains(&sample), "sample {sample}");
        }
    }

    #[test]
    fn test_incremental_samples_are_small_deltas() {
        let mut joystick = SimulatedJoystick::new(Side::Top, Table::default(), RemotePolicy::Incremental);

        for sample in (0..100).filter_map(|_| joystick.read().ok()) {
            assert!(sample.abs() < 15.0, "delta {sample}");
        }
    }

    #[test]
    fn test_accessory_thread_moves_paddle_and_stops() {
        let table = Table::default();
        let input = InputRouter::new(
            table,
            RemotePolicy::AbsoluteDeadband { threshold: 5.0 },
            RemoteMode::Single(Side::Top),
        );
        let joystick =
            SimulatedJoystick::new(Side::Top, table, RemotePolicy::AbsoluteDeadband { threshold: 5.0 });
        let running = Arc::new(AtomicBool::new(true));

        let handle = spawn_accessory(input.clone(), joystick, running.clone(), Duration::from_millis(1));
        while input.current_position(Side::Top) == table.center().x {
            std::thread::yield_now();
        }
        running.store(false, Ordering::Release);
        handle.join().unwrap();

        assert_ne!(input.current_position(Side::Top), table.center().x);
        assert_eq!(input.current_position(Side::Bottom), table.center().x);
    }
}
