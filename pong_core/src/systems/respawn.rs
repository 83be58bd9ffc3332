use crate::{Ball, GameRng};
use glam::Vec2;
use hecs::World;

/// Send every live ball back to `center` with a fresh random velocity.
///
/// Balls are visited in id order so a seeded rng always hands out the same
/// velocities to the same balls.
pub fn respawn_balls(world: &mut World, center: Vec2, speed: (f32, f32), rng: &mut GameRng) {
    let mut balls: Vec<&mut Ball> = world
        .query_mut::<&mut Ball>()
        .into_iter()
        .map(|(_e, b)| b)
        .collect();
    balls.sort_by_key(|b| b.id);

    for ball in balls {
        ball.respawn(center, speed, rng);
        log::debug!("ball {:?} respawned with velocity {}", ball.id, ball.vel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_ball, BallId};

    #[test]
    fn test_respawn_moves_all_balls_to_center() {
        let mut world = World::new();
        let mut rng = GameRng::new(12345);
        create_ball(&mut world, BallId(1), Vec2::new(200.0, -4.0), Vec2::new(5.0, -6.0), 10.0);
        create_ball(&mut world, BallId(2), Vec2::new(40.0, 500.0), Vec2::new(-7.0, 7.0), 10.0);

        respawn_balls(&mut world, Vec2::new(200.0, 400.0), (5.0, 8.0), &mut rng);

        for (_e, ball) in world.query::<&Ball>().iter() {
            assert_eq!(ball.pos, Vec2::new(200.0, 400.0));
            assert!((5.0..=8.0).contains(&ball.vel.x.abs()));
            assert!((5.0..=8.0).contains(&ball.vel.y.abs()));
        }
    }

    #[test]
    fn test_respawn_is_deterministic_for_a_seed() {
        let velocities = |seed| {
            let mut world = World::new();
            let mut rng = GameRng::new(seed);
            create_ball(&mut world, BallId(2), Vec2::ZERO, Vec2::ZERO, 10.0);
            create_ball(&mut world, BallId(1), Vec2::ZERO, Vec2::ZERO, 10.0);
            respawn_balls(&mut world, Vec2::ZERO, (5.0, 8.0), &mut rng);
            let mut out: Vec<(BallId, Vec2)> =
                world.query::<&Ball>().iter().map(|(_e, b)| (b.id, b.vel)).collect();
            out.sort_by_key(|(id, _)| *id);
            out
        };

        assert_eq!(velocities(3), velocities(3));
    }
}
