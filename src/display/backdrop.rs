/// Theme backdrop: gradient fill and parallax decorations.

use std::f64::consts::FRAC_PI_4;

use crate::entities::{Decoration, DecorationKind, Session};

use super::canvas::Canvas;
use super::palette::{mix, rgb, row_background, Rgb};
use super::Viewport;

const WHITE: Rgb = (255, 255, 255);
const CLOUD: Rgb = (250, 250, 255);
const SUN: Rgb = (255, 214, 0);
const MOON: Rgb = (245, 240, 200);
const FISH: Rgb = (255, 165, 0);
const SEA_ANIMAL: Rgb = (255, 105, 180);

/// Paint every row with the theme gradient.
pub fn draw_gradient(canvas: &mut Canvas, session: &Session) {
    let rows = canvas.rows();
    for row in 0..rows {
        canvas.fill_row(row, rgb(row_background(session.backdrop.theme, row, rows)));
    }
}

pub fn draw_decorations(canvas: &mut Canvas, session: &Session, view: &Viewport) {
    for deco in &session.backdrop.decorations {
        draw_decoration(canvas, session, view, deco);
    }
}

fn draw_decoration(canvas: &mut Canvas, session: &Session, view: &Viewport, deco: &Decoration) {
    let screen_x = deco.screen_x(session.camera_x);
    let width = session.width;
    let visible = |margin: f64| screen_x > -margin && screen_x < width + margin;

    match &deco.kind {
        DecorationKind::Cloud { .. } => {
            if visible(100.0) {
                let art = if deco.size < 30.0 {
                    "(_)"
                } else if deco.size < 40.0 {
                    "(__)"
                } else {
                    "(___)"
                };
                draw_art(canvas, session, view, screen_x, deco.y, &[art], CLOUD, 1.0);
            }
        }
        DecorationKind::Sun { rotation } => {
            if visible(100.0) {
                let frame = ((rotation / FRAC_PI_4).floor() as i64).rem_euclid(2);
                let art: &[&str] = if frame == 0 {
                    &["\\|/", "-O-", "/|\\"]
                } else {
                    &[" | ", "-O-", " | "]
                };
                draw_art(canvas, session, view, screen_x, deco.y, art, SUN, 1.0);
            }
        }
        DecorationKind::Star { twinkle } => {
            if visible(10.0) {
                let brightness = 0.5 + 0.5 * twinkle.sin();
                let glyph = if brightness > 0.8 {
                    "*"
                } else if brightness > 0.4 {
                    "+"
                } else if brightness > 0.15 {
                    "."
                } else {
                    return;
                };
                draw_art(canvas, session, view, screen_x, deco.y, &[glyph], WHITE, brightness);
            }
        }
        DecorationKind::Moon { .. } => {
            if visible(100.0) {
                draw_art(canvas, session, view, screen_x, deco.y, &[" _", "( ", " ‾"], MOON, 1.0);
            }
        }
        DecorationKind::Fish { direction, swim, .. } => {
            if visible(50.0) {
                let art = if *direction >= 0.0 { "><>" } else { "<><" };
                let y = deco.y + swim.sin() * 5.0;
                draw_art(canvas, session, view, screen_x, y, &[art], FISH, 0.3);
            }
        }
        DecorationKind::SeaAnimal { direction, bob, .. } => {
            if visible(50.0) {
                let art = if *direction >= 0.0 { "(°)>" } else { "<(°)" };
                let y = deco.y + bob.sin() * 8.0;
                draw_art(canvas, session, view, screen_x, y, &[art], SEA_ANIMAL, 0.25);
            }
        }
    }
}

/// Draw multi-row art centred on a pixel position, blended toward the row
/// background by `alpha`.
#[allow(clippy::too_many_arguments)]
fn draw_art(
    canvas: &mut Canvas,
    session: &Session,
    view: &Viewport,
    x: f64,
    y: f64,
    art: &[&str],
    color: Rgb,
    alpha: f64,
) {
    let (col, row) = view.to_cell(x, y);
    let top = row - art.len() as i32 / 2;
    for (i, line) in art.iter().enumerate() {
        let r = top + i as i32;
        if r < 0 || r >= canvas.rows() as i32 {
            continue;
        }
        let bg = row_background(session.backdrop.theme, r as u16, canvas.rows());
        let fg = rgb(mix(bg, color, alpha));
        let left = col - line.chars().count() as i32 / 2;
        for (j, ch) in line.chars().enumerate() {
            if ch != ' ' {
                canvas.put(left + j as i32, r, ch, fg);
            }
        }
    }
}
