/// Game-logic functions: session setup, physics, scrolling and the per-tick
/// driver.
///
/// Every function takes the session it works on by `&mut`; randomness is only
/// needed when (re)building the world and always comes through an injected RNG.

use rand::Rng;

use crate::collision::{check_collisions, CollisionReport};
use crate::config::{Tuning, WorldLayout};
use crate::entities::{Character, DecorationKind, GameStatus, Player, Session, Theme};
use crate::world::{generate_backdrop, generate_hazards, generate_items};

/// Decorations wrap once they are this far outside the viewport.
const WRAP_MARGIN: f64 = 100.0;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build a fresh session for a canvas of `width` x `height` virtual pixels.
pub fn init_session(
    character: Character,
    theme: Theme,
    width: f64,
    height: f64,
    tuning: Tuning,
    layout: &WorldLayout,
    rng: &mut impl Rng,
) -> Session {
    Session {
        player: Player {
            x: tuning.player_x,
            y: height / 2.0,
            vy: 0.0,
            size: tuning.player_size,
            character,
        },
        items: generate_items(layout, height, rng),
        hazards: generate_hazards(layout, height, rng),
        backdrop: generate_backdrop(theme, width, height, rng),
        camera_x: 0.0,
        score: 0,
        status: GameStatus::Playing,
        frame: 0,
        width,
        height,
        tuning,
    }
}

/// Swap the backdrop for a new theme.  Items and hazards are untouched.
pub fn set_theme(session: &mut Session, theme: Theme, rng: &mut impl Rng) {
    session.backdrop = generate_backdrop(theme, session.width, session.height, rng);
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// A tap: overrides vertical velocity.  Ignored unless the game is running.
/// Returns whether the impulse was applied.
pub fn impulse(session: &mut Session) -> bool {
    if session.status != GameStatus::Playing {
        return false;
    }
    session.player.vy = session.tuning.impulse_velocity;
    true
}

// ── Physics ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bounce {
    Top,
    Bottom,
}

/// Integrate gravity and bounce off the top and bottom margins.
pub fn apply_physics(session: &mut Session) -> Option<Bounce> {
    let t = session.tuning;
    let top = t.edge_margin;
    let bottom = session.height - t.edge_margin;
    let player = &mut session.player;

    player.vy += t.gravity;
    player.y += player.vy;

    if player.y < top {
        player.y = top;
        player.vy = player.vy.abs() * t.bounce_damping;
        Some(Bounce::Top)
    } else if player.y > bottom {
        player.y = bottom;
        player.vy = -player.vy.abs() * t.bounce_damping;
        Some(Bounce::Bottom)
    } else {
        None
    }
}

/// Advance the camera by one tick of world speed.
pub fn advance_scroll(session: &mut Session) {
    session.camera_x += session.tuning.world_speed;
}

/// Step every decoration's animation phase and wrap it around the viewport.
pub fn update_decorations(session: &mut Session) {
    let camera_x = session.camera_x;
    let width = session.width;
    let world_speed = session.tuning.world_speed;

    for deco in &mut session.backdrop.decorations {
        let dx = match &mut deco.kind {
            DecorationKind::Cloud { speed } => *speed,
            DecorationKind::Sun { rotation } => {
                *rotation += 0.01;
                0.0
            }
            DecorationKind::Star { twinkle } => {
                *twinkle += 0.1;
                0.0
            }
            DecorationKind::Moon { phase } => {
                *phase += 0.01;
                0.0
            }
            DecorationKind::Fish { speed, direction, swim } => {
                *swim += 0.1;
                *speed * *direction
            }
            DecorationKind::SeaAnimal { speed, direction, bob } => {
                *bob += 0.05;
                *speed * *direction
            }
        };
        deco.x += dx;

        // Wrap in the element's own parallax frame, and only on the side it
        // is drifting towards, so elements still waiting off-screen on the
        // far side are left alone.
        let parallax = deco.kind.parallax();
        let offset = camera_x * parallax;
        let drift = dx - world_speed * parallax;
        let screen_x = deco.x - offset;
        let wrapped = if drift > 0.0 && screen_x > width + WRAP_MARGIN {
            deco.x = offset - WRAP_MARGIN;
            Some(1.0)
        } else if drift < 0.0 && screen_x < -WRAP_MARGIN {
            deco.x = offset + width + WRAP_MARGIN;
            Some(-1.0)
        } else {
            None
        };

        if let Some(heading) = wrapped {
            match &mut deco.kind {
                DecorationKind::Fish { direction, .. }
                | DecorationKind::SeaAnimal { direction, .. } => *direction = heading,
                _ => {}
            }
        }
    }
}

// ── Per-frame tick ────────────────────────────────────────────────────────────

/// What happened during one tick; the loop turns this into audio cues.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickEvents {
    pub bounce: Option<Bounce>,
    pub collisions: CollisionReport,
}

/// Advance the simulation by one frame.  Does nothing unless playing, so a
/// paused or finished session is never mutated.
pub fn tick(session: &mut Session) -> TickEvents {
    if session.status != GameStatus::Playing {
        return TickEvents::default();
    }

    session.frame += 1;
    update_decorations(session);
    let bounce = apply_physics(session);
    advance_scroll(session);
    let collisions = check_collisions(session);

    TickEvents { bounce, collisions }
}
