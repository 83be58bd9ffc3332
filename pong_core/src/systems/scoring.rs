use crate::{Ball, Event, Events, Side, Table};
use hecs::World;

/// Check if any ball crossed a goal line.
///
/// A ball below y = 0 got past the bottom paddle, so the top player scores;
/// a ball above the table height scores for the bottom player. One goal is
/// recorded per crossing ball. Returns true if anything scored.
pub fn check_scoring(world: &World, table: &Table, events: &mut Events) -> bool {
    let mut crossings: Vec<(crate::BallId, Side)> = world
        .query::<&Ball>()
        .iter()
        .filter_map(|(_e, ball)| {
            if ball.pos.y < 0.0 {
                Some((ball.id, Side::Top))
            } else if ball.pos.y > table.height {
                Some((ball.id, Side::Bottom))
            } else {
                None
            }
        })
        .collect();
    crossings.sort_by_key(|(id, _)| *id);

    for (id, side) in &crossings {
        log::info!("ball {:?} crossed a goal line, {:?} scores", id, side);
        events.push(Event::Goal(*side));
    }

    !crossings.is_empty()
}
