/// World generation: items, hazards and theme decorations.
///
/// Pure construction.  All randomness comes through the injected RNG so a
/// seeded RNG reproduces the same world.

use std::f64::consts::TAU;

use rand::Rng;

use crate::config::WorldLayout;
use crate::entities::{Backdrop, Decoration, DecorationKind, Hazard, Item, Theme};

/// Stars spaced on a jittered regular grid along x, spread over several
/// canvas heights along y.
pub fn generate_items(layout: &WorldLayout, height: f64, rng: &mut impl Rng) -> Vec<Item> {
    (0..layout.item_count)
        .map(|i| Item {
            x: layout.item_start_x + i as f64 * layout.item_spacing + jitter(rng, layout.item_jitter),
            y: vertical_position(layout, height, rng),
            size: layout.item_size,
            collected: false,
        })
        .collect()
}

/// Bombs use coarser spacing than stars.
pub fn generate_hazards(layout: &WorldLayout, height: f64, rng: &mut impl Rng) -> Vec<Hazard> {
    (0..layout.hazard_count)
        .map(|i| Hazard {
            x: layout.hazard_start_x
                + i as f64 * layout.hazard_spacing
                + jitter(rng, layout.hazard_jitter),
            y: vertical_position(layout, height, rng),
            size: layout.hazard_size,
            hit: false,
        })
        .collect()
}

fn jitter(rng: &mut impl Rng, max: f64) -> f64 {
    if max > 0.0 {
        rng.gen_range(0.0..max)
    } else {
        0.0
    }
}

fn vertical_position(layout: &WorldLayout, height: f64, rng: &mut impl Rng) -> f64 {
    layout.vertical_start + jitter(rng, height * layout.vertical_screens)
}

// ── Backdrops ─────────────────────────────────────────────────────────────────

/// Build the decorative set for `theme`:
/// sky → clouds + sun, space → stars + moon, ocean → fish + sea animals.
pub fn generate_backdrop(theme: Theme, width: f64, height: f64, rng: &mut impl Rng) -> Backdrop {
    let decorations = match theme {
        Theme::Sky => sky(width, height, rng),
        Theme::Space => space(width, height, rng),
        Theme::Ocean => ocean(width, height, rng),
    };
    tracing::debug!(?theme, count = decorations.len(), "Generated backdrop");
    Backdrop { theme, decorations }
}

fn sky(width: f64, height: f64, rng: &mut impl Rng) -> Vec<Decoration> {
    let mut out: Vec<Decoration> = (0..15)
        .map(|_| Decoration {
            x: rng.gen_range(0.0..width * 2.0),
            y: rng.gen_range(0.0..height * 0.6),
            size: rng.gen_range(20.0..50.0),
            kind: DecorationKind::Cloud {
                speed: rng.gen_range(0.5..1.5),
            },
        })
        .collect();
    out.push(Decoration {
        x: width * 0.2,
        y: height * 0.15,
        size: 80.0,
        kind: DecorationKind::Sun { rotation: 0.0 },
    });
    out
}

fn space(width: f64, height: f64, rng: &mut impl Rng) -> Vec<Decoration> {
    let mut out: Vec<Decoration> = (0..100)
        .map(|_| Decoration {
            x: rng.gen_range(0.0..width * 2.0),
            y: rng.gen_range(0.0..height),
            size: rng.gen_range(1.0..4.0),
            kind: DecorationKind::Star {
                twinkle: rng.gen_range(0.0..TAU),
            },
        })
        .collect();
    out.push(Decoration {
        x: width * 0.8,
        y: height * 0.2,
        size: 60.0,
        kind: DecorationKind::Moon { phase: 0.0 },
    });
    out
}

fn ocean(width: f64, height: f64, rng: &mut impl Rng) -> Vec<Decoration> {
    let mut out = Vec::with_capacity(12);
    for _ in 0..8 {
        out.push(Decoration {
            x: rng.gen_range(0.0..width * 2.0),
            y: height * 0.3 + rng.gen_range(0.0..height * 0.4),
            size: rng.gen_range(15.0..35.0),
            kind: DecorationKind::Fish {
                speed: rng.gen_range(1.0..3.0),
                direction: random_direction(rng),
                swim: rng.gen_range(0.0..TAU),
            },
        });
    }
    for _ in 0..4 {
        out.push(Decoration {
            x: rng.gen_range(0.0..width * 2.0),
            y: height * 0.4 + rng.gen_range(0.0..height * 0.3),
            size: rng.gen_range(25.0..55.0),
            kind: DecorationKind::SeaAnimal {
                speed: rng.gen_range(0.5..1.5),
                direction: random_direction(rng),
                bob: rng.gen_range(0.0..TAU),
            },
        });
    }
    out
}

fn random_direction(rng: &mut impl Rng) -> f64 {
    if rng.gen_bool(0.5) {
        1.0
    } else {
        -1.0
    }
}
