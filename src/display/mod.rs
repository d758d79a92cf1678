/// Rendering layer.
///
/// Each function receives a mutable canvas and an immutable view of the
/// session.  No game logic is performed; this module only translates state
/// into cells.  `terminal::present` is the one place cells reach the terminal.

pub mod backdrop;
pub mod canvas;
pub mod palette;
pub mod sprites;
pub mod terminal;

use crossterm::style::Color;

use crate::assets::Sprite;
use crate::config::DisplayConfig;
use crate::entities::{Character, Session};
use crate::menu::{BestRun, MenuState};

use canvas::Canvas;
use palette::{C_BOMB, C_HINT, C_HUD, C_OVERLAY_BG, C_STAR};

/// Items and hazards are culled this far outside the viewport.
const CULL_MARGIN: f64 = 50.0;

/// Pixel-to-cell projection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub cell_width: f64,
    pub cell_height: f64,
}

impl Viewport {
    pub fn from_config(config: &DisplayConfig) -> Self {
        Self {
            cell_width: config.cell_width,
            cell_height: config.cell_height,
        }
    }

    pub fn to_cell(&self, x: f64, y: f64) -> (i32, i32) {
        (
            (x / self.cell_width).floor() as i32,
            (y / self.cell_height).floor() as i32,
        )
    }

    /// Canvas size in virtual pixels for a terminal of `cols` x `rows`.
    pub fn pixel_size(&self, cols: u16, rows: u16) -> (f64, f64) {
        (cols as f64 * self.cell_width, rows as f64 * self.cell_height)
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Repaint one complete frame from the session.
pub fn render(canvas: &mut Canvas, session: &Session, view: &Viewport, rocket: Option<&Sprite>) {
    backdrop::draw_gradient(canvas, session);
    backdrop::draw_decorations(canvas, session, view);
    draw_items(canvas, session, view);
    draw_hazards(canvas, session, view);
    draw_player(canvas, session, view, rocket);
    draw_hud(canvas, session);
    draw_controls_hint(canvas);
}

fn on_screen(session: &Session, world_x: f64) -> Option<f64> {
    let screen_x = world_x - session.camera_x;
    (screen_x > -CULL_MARGIN && screen_x < session.width + CULL_MARGIN).then_some(screen_x)
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_items(canvas: &mut Canvas, session: &Session, view: &Viewport) {
    for item in session.items.iter().filter(|i| !i.collected) {
        if let Some(x) = on_screen(session, item.x) {
            let (col, row) = view.to_cell(x, item.y);
            canvas.put(col, row, '★', C_STAR);
        }
    }
}

fn draw_hazards(canvas: &mut Canvas, session: &Session, view: &Viewport) {
    for hazard in session.hazards.iter().filter(|h| !h.hit) {
        if let Some(x) = on_screen(session, hazard.x) {
            let (col, row) = view.to_cell(x, hazard.y);
            canvas.put(col, row, '●', C_BOMB);
        }
    }
}

fn player_color(character: Character) -> Color {
    match character {
        Character::Bird => Color::Magenta,
        Character::Fish => Color::Rgb { r: 255, g: 140, b: 0 },
        Character::Rocket => Color::White,
    }
}

fn draw_player(canvas: &mut Canvas, session: &Session, view: &Viewport, rocket: Option<&Sprite>) {
    let p = &session.player;
    let (col, row) = view.to_cell(p.x, p.y);
    let color = player_color(p.character);

    if let (Character::Rocket, Some(sprite)) = (p.character, rocket) {
        let top = row - sprite.height() as i32 / 2;
        let left = col - sprite.width() as i32 / 2;
        for (i, line) in sprite.rows().iter().enumerate() {
            for (j, ch) in line.chars().enumerate() {
                if ch != ' ' {
                    canvas.put(left + j as i32, top + i as i32, ch, color);
                }
            }
        }
        return;
    }

    // Fallback glyph: always available, also used while the sprite loads.
    let glyph = sprites::player_glyph(p.character, p.vy);
    let left = col - glyph.chars().count() as i32 / 2;
    canvas.put_str(left, row, &glyph, color);
}

// ── HUD ───────────────────────────────────────────────────────────────────────

fn draw_hud(canvas: &mut Canvas, session: &Session) {
    canvas.put_str_on(1, 0, &format!(" {} ", session.score_text()), C_HUD, C_OVERLAY_BG);
}

fn draw_controls_hint(canvas: &mut Canvas) {
    let row = canvas.rows() as i32 - 1;
    canvas.put_str_on(
        1,
        row,
        " SPACE/click: Flap  P: Pause  T: Theme  M: Mute  Q: Quit ",
        C_HINT,
        C_OVERLAY_BG,
    );
}

// ── Overlays ──────────────────────────────────────────────────────────────────

/// Centre a block of lines on the canvas.
fn draw_box(canvas: &mut Canvas, lines: &[(String, Color)]) {
    let cx = canvas.cols() as i32 / 2;
    let start = canvas.rows() as i32 / 2 - lines.len() as i32 / 2;
    for (i, (text, color)) in lines.iter().enumerate() {
        let col = cx - text.chars().count() as i32 / 2;
        canvas.put_str_on(col, start + i as i32, text, *color, C_OVERLAY_BG);
    }
}

pub fn draw_paused(canvas: &mut Canvas) {
    draw_box(
        canvas,
        &[
            ("╔════════════════════╗".to_string(), Color::Cyan),
            ("║       PAUSED       ║".to_string(), Color::Cyan),
            ("╚════════════════════╝".to_string(), Color::Cyan),
            ("P - Resume".to_string(), Color::White),
        ],
    );
}

pub fn draw_confirm_quit(canvas: &mut Canvas) {
    draw_box(
        canvas,
        &[
            ("╔════════════════════╗".to_string(), Color::Yellow),
            ("║  Do you want to    ║".to_string(), Color::Yellow),
            ("║  quit?             ║".to_string(), Color::Yellow),
            ("╚════════════════════╝".to_string(), Color::Yellow),
            ("Y - Quit   N - Keep playing".to_string(), Color::White),
        ],
    );
}

pub fn draw_game_over(canvas: &mut Canvas, session: &Session, best: &BestRun) {
    draw_box(
        canvas,
        &[
            ("╔════════════════════╗".to_string(), Color::Red),
            ("║     GAME  OVER     ║".to_string(), Color::Red),
            ("╚════════════════════╝".to_string(), Color::Red),
            (session.score_text(), Color::Yellow),
            (
                format!("Best: {} | {} stars", best.distance, best.stars),
                Color::DarkGrey,
            ),
            ("R - Menu  Q - Quit".to_string(), Color::White),
        ],
    );
}

// ── Menu ──────────────────────────────────────────────────────────────────────

pub fn draw_menu(canvas: &mut Canvas, menu: &MenuState, muted: bool, volume: f32) {
    let rows = canvas.rows();
    for row in 0..rows {
        let bg = palette::row_background(menu.theme, row, rows);
        canvas.fill_row(row, palette::rgb(palette::mix(bg, (0, 0, 0), 0.6)));
    }

    let characters: String = Character::ALL
        .iter()
        .enumerate()
        .map(|(i, c)| {
            if *c == menu.character {
                format!("[{}:{}] ", i + 1, c.label())
            } else {
                format!(" {}:{}  ", i + 1, c.label())
            }
        })
        .collect();
    let volume_bar: String = (0..10)
        .map(|i| if (i as f32) < (volume * 10.0).round() { '█' } else { '░' })
        .collect();

    let mut lines: Vec<(String, Color)> = vec![
        ("★  STAR  GLIDE  ★".to_string(), Color::Cyan),
        (String::new(), Color::White),
        (characters, Color::White),
        (format!("Theme: < {} >  (T)", menu.theme.label()), Color::White),
        (
            format!(
                "Music: {}  (M)   Volume {} (+/-)",
                if muted { "muted" } else { "on" },
                volume_bar
            ),
            Color::White,
        ),
        (String::new(), Color::White),
    ];
    if menu.best != BestRun::default() {
        lines.push((
            format!(
                "Best: Distance {} | Stars {}",
                menu.best.distance, menu.best.stars
            ),
            Color::Yellow,
        ));
    }
    lines.push(("ENTER - Start   Q - Quit".to_string(), Color::DarkGrey));
    draw_box(canvas, &lines);
}
