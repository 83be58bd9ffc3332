//! Headless driver: runs one match with an autopilot on the bottom paddle and
//! a simulated accessory on the top one.
//!
//! Usage: `pong_headless [config.json]`. Set `RUST_LOG=debug` to see contacts.

mod host;
mod joystick;

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use pong_core::*;

use host::{attach_accessory, load_config, Host, HostError};
use joystick::{spawn_accessory, SimulatedJoystick};

const MAX_FRAMES: u64 = 100_000;
const FRAME_DELAY: Duration = Duration::from_millis(1);
const ACCESSORY_POLL: Duration = Duration::from_millis(2);

fn main() {
    env_logger::init();

    let path = std::env::args().nth(1).map(PathBuf::from);
    if let Err(err) = run(path) {
        log::error!("{err}");
        std::process::exit(1);
    }
}

fn run(path: Option<PathBuf>) -> Result<(), HostError> {
    let mut config = load_config(path.as_deref())?;
    let side = attach_accessory(&mut config);

    let mut host = Host::new(config.clone(), MAX_FRAMES, FRAME_DELAY)?;

    let running = Arc::new(AtomicBool::new(true));
    let joystick = SimulatedJoystick::new(side, config.table, config.remote_policy);
    let accessory = spawn_accessory(host.engine.input(), joystick, running.clone(), ACCESSORY_POLL);

    let last = host.run_match();
    running.store(false, Ordering::Release);
    if accessory.join().is_err() {
        log::warn!("accessory thread panicked");
    }

    match last.winner() {
        Some(winner) => log::info!(
            "{:?} wins {}-{} after {} frames",
            winner,
            last.score.get(winner),
            last.score.get(winner.opponent()),
            last.tick
        ),
        None => log::info!("no winner after {} frames", last.tick),
    }

    host.engine.request_home();
    host::report(&host.engine.step(Params::FIXED_DT));
    Ok(())
}
