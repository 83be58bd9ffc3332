//! Simulation core for a two-player paddle-and-ball table.
//!
//! The host drives [`Engine::step`] once per frame and renders the returned
//! [`Snapshot`]. Input arrives through [`InputRouter`] clones from any thread.

pub mod components;
pub mod config;
pub mod engine;
pub mod game_state;
pub mod input;
pub mod params;
pub mod physics;
pub mod resources;
pub mod systems;
pub mod table;

pub use components::*;
pub use config::*;
pub use engine::*;
pub use game_state::*;
pub use input::*;
pub use params::*;
pub use physics::*;
pub use resources::*;
pub use table::*;

use hecs::World;

/// Helper to create a paddle entity at the table center
pub fn create_paddle(world: &mut World, table: &Table, side: Side) -> hecs::Entity {
    world.spawn((Paddle::new(side, table.center().x, table.paddle_y(side)),))
}

/// Helper to create a ball entity
pub fn create_ball(
    world: &mut World,
    id: BallId,
    pos: glam::Vec2,
    vel: glam::Vec2,
    radius: f32,
) -> hecs::Entity {
    world.spawn((Ball::new(id, pos, vel, radius),))
}
