use crate::{Ball, Paddle, PaddlePositions};
use hecs::World;

/// Copy the latest accepted paddle targets into the world
pub fn sync_paddles(world: &mut World, positions: PaddlePositions) {
    for (_entity, paddle) in world.query_mut::<&mut Paddle>() {
        paddle.x = positions.get(paddle.side);
    }
}

/// Move balls based on velocity
pub fn move_balls(world: &mut World, dt: f32) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        ball.pos += ball.vel * dt;
    }
}
