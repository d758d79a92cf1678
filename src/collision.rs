/// Distance-based collision between the player and stars / bombs.

use crate::entities::{GameStatus, OverCause, Session};

/// What a single collision pass changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub collected: u32,
    pub hazards: u32,
}

/// Test the player against every live item and hazard.
///
/// Every hit in the pass is applied; there is no early exit.  A hazard hit
/// ends the session, which is idempotent if several bombs are hit at once.
pub fn check_collisions(session: &mut Session) -> CollisionReport {
    let (px, py) = session.player_world();
    let radius = session.tuning.pickup_radius;
    let mut report = CollisionReport::default();

    for item in session.items.iter_mut().filter(|i| !i.collected) {
        if (item.x - px).hypot(item.y - py) < radius {
            item.collected = true;
            report.collected += 1;
        }
    }
    session.score += report.collected * session.tuning.star_value;

    for hazard in session.hazards.iter_mut().filter(|h| !h.hit) {
        if (hazard.x - px).hypot(hazard.y - py) < radius {
            hazard.hit = true;
            report.hazards += 1;
        }
    }

    if report.hazards > 0 && !session.status.is_over() {
        session.status = GameStatus::Over(OverCause::Hazard);
        tracing::info!(
            distance = session.distance(),
            stars = session.score,
            "Hit a bomb"
        );
    }

    report
}
