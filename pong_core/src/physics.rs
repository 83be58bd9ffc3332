//! Ball and paddle simulation.
//!
//! `PhysicsWorld` owns the entity world. Each step runs the systems in a
//! fixed order: sync paddles, move balls, walls, paddles, goal lines, and
//! finally respawn when something scored.

use glam::Vec2;
use hecs::World;

use crate::systems::*;
use crate::{
    create_ball, create_paddle, Ball, BallId, Config, Event, Events, GameRng, Mode, Paddle,
    PaddlePositions, Side, Table,
};

pub struct PhysicsWorld {
    world: World,
    table: Table,
    ball_radius: f32,
    respawn_speed: (f32, f32),
    rng: GameRng,
    next_ball_id: u32,
}

impl PhysicsWorld {
    /// Build an empty world with both paddles at the table center and no balls
    pub fn new(config: &Config, rng: GameRng) -> Self {
        let mut world = World::new();
        for side in Side::BOTH {
            create_paddle(&mut world, &config.table, side);
        }

        Self {
            world,
            table: config.table,
            ball_radius: config.ball_radius,
            respawn_speed: config.respawn_speed(),
            rng,
            next_ball_id: 1,
        }
    }

    /// Advance every ball by `dt` and resolve collisions.
    ///
    /// Any goal respawns all live balls, not only the one that scored.
    pub fn step(&mut self, dt: f32, paddles: PaddlePositions) -> Vec<Event> {
        let mut events = Events::new();

        sync_paddles(&mut self.world, paddles);
        move_balls(&mut self.world, dt);
        check_wall_collisions(&mut self.world, &self.table);
        check_paddle_collisions(&mut self.world, &self.table, &mut events);

        if check_scoring(&self.world, &self.table, &mut events) {
            self.respawn_all();
        }

        events.into_vec()
    }

    /// Destroy all balls and create `mode.ball_count()` new ones at center
    pub(crate) fn spawn_balls(&mut self, mode: Mode) {
        let stale: Vec<hecs::Entity> = self
            .world
            .query::<&Ball>()
            .iter()
            .map(|(entity, _ball)| entity)
            .collect();
        for entity in stale {
            let _ = self.world.despawn(entity);
        }

        let center = self.table.center();
        for _ in 0..mode.ball_count() {
            let id = BallId(self.next_ball_id);
            self.next_ball_id += 1;
            let vel = self.rng.respawn_velocity(self.respawn_speed.0, self.respawn_speed.1);
            create_ball(&mut self.world, id, center, vel, self.ball_radius);
        }
        log::debug!("spawned {} ball(s) for {:?}", mode.ball_count(), mode);
    }

    pub(crate) fn respawn_all(&mut self) {
        respawn_balls(
            &mut self.world,
            self.table.center(),
            self.respawn_speed,
            &mut self.rng,
        );
    }

    /// Balls sorted by id
    pub fn balls(&self) -> Vec<Ball> {
        let mut balls: Vec<Ball> = self.world.query::<&Ball>().iter().map(|(_e, b)| *b).collect();
        balls.sort_by_key(|b| b.id);
        balls
    }

    pub fn ball_count(&self) -> usize {
        self.world.query::<&Ball>().iter().count()
    }

    pub fn paddle(&self, side: Side) -> Option<Paddle> {
        self.world
            .query::<&Paddle>()
            .iter()
            .map(|(_e, p)| *p)
            .find(|p| p.side == side)
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Place a ball directly, bypassing `step`
    #[cfg(any(test, feature = "test-support"))]
    pub fn set_ball(&mut self, id: BallId, pos: Vec2, vel: Vec2) -> bool {
        for (_e, ball) in self.world.query_mut::<&mut Ball>() {
            if ball.id == id {
                ball.pos = pos;
                ball.vel = vel;
                return true;
            }
        }
        false
    }
}
