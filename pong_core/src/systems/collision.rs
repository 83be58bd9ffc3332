use crate::{Ball, Event, Events, Paddle, Side, Table};
use hecs::World;

/// Bounce balls off the two vertical walls.
///
/// Only the x velocity flips, so speed is preserved. Wall bounces do not
/// raise a contact event.
pub fn check_wall_collisions(world: &mut World, table: &Table) {
    let (left, right) = table.wall_bounds();

    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        if ball.pos.x - ball.radius <= left && ball.vel.x < 0.0 {
            ball.vel.x = -ball.vel.x;
            // Clamp position to prevent stuck
            ball.pos.x = left + ball.radius;
        } else if ball.pos.x + ball.radius >= right && ball.vel.x > 0.0 {
            ball.vel.x = -ball.vel.x;
            ball.pos.x = right - ball.radius;
        }
    }
}

/// Bounce balls off paddles and record a contact for each hit.
///
/// A ball only bounces while it is on the court side of the paddle and
/// moving toward it; a ball already past the paddle keeps going.
pub fn check_paddle_collisions(world: &mut World, table: &Table, events: &mut Events) {
    // Collect paddle data without holding borrows
    let paddles: Vec<Paddle> = world.query::<&Paddle>().iter().map(|(_e, p)| *p).collect();

    let mut balls: Vec<&mut Ball> = world
        .query_mut::<&mut Ball>()
        .into_iter()
        .map(|(_e, b)| b)
        .collect();
    balls.sort_by_key(|b| b.id);

    for ball in balls {
        for paddle in &paddles {
            let aabb = table.paddle_aabb(paddle.side, paddle.x);
            if !aabb.intersects_circle(ball.pos, ball.radius) {
                continue;
            }

            let should_bounce = match paddle.side {
                Side::Bottom => ball.vel.y < 0.0 && ball.pos.y >= paddle.y,
                Side::Top => ball.vel.y > 0.0 && ball.pos.y <= paddle.y,
            };
            if !should_bounce {
                continue;
            }

            ball.vel.y = -ball.vel.y;

            // Push ball out of paddle
            ball.pos.y = match paddle.side {
                Side::Bottom => aabb.max.y + ball.radius,
                Side::Top => aabb.min.y - ball.radius,
            };

            log::debug!("ball {:?} hit {:?} paddle", ball.id, paddle.side);
            events.push(Event::Contact(ball.id));
            break;
        }
    }
}
