use std::f64::consts::FRAC_PI_2;

use star_glide::assets::{Sprite, SpriteLoader};
use star_glide::config::{DisplayConfig, Tuning};
use star_glide::display::canvas::Canvas;
use star_glide::display::palette::{rgb, row_background};
use star_glide::display::*;
use star_glide::entities::*;
use star_glide::menu::{BestRun, MenuState};

const COLS: u16 = 80;
const ROWS: u16 = 24;

fn make_session(character: Character, theme: Theme) -> Session {
    Session {
        player: Player {
            x: 100.0,
            y: 240.0,
            vy: 0.0,
            size: 30.0,
            character,
        },
        items: Vec::new(),
        hazards: Vec::new(),
        backdrop: Backdrop {
            theme,
            decorations: Vec::new(),
        },
        camera_x: 0.0,
        score: 0,
        status: GameStatus::Playing,
        frame: 0,
        width: 800.0,
        height: 480.0,
        tuning: Tuning::default(),
    }
}

fn make_view() -> Viewport {
    Viewport::from_config(&DisplayConfig::default())
}

fn draw(session: &Session, rocket: Option<&Sprite>) -> Canvas {
    let mut canvas = Canvas::new(COLS, ROWS);
    render(&mut canvas, session, &make_view(), rocket);
    canvas
}

fn glyph_at(canvas: &Canvas, col: i32, row: i32) -> char {
    canvas.cell(col, row).map(|c| c.ch).unwrap_or('?')
}

// ── viewport ──────────────────────────────────────────────────────────────────

#[test]
fn viewport_floors_to_cells() {
    let view = make_view();
    assert_eq!(view.to_cell(0.0, 0.0), (0, 0));
    assert_eq!(view.to_cell(19.9, 39.9), (1, 1));
    assert_eq!(view.to_cell(-0.5, 0.0), (-1, 0));
}

// ── backdrop ──────────────────────────────────────────────────────────────────

#[test]
fn gradient_fills_background() {
    let canvas = draw(&make_session(Character::Bird, Theme::Sky), None);
    assert_eq!(canvas.cell(0, 0).unwrap().bg, rgb(row_background(Theme::Sky, 0, ROWS)));
    assert_eq!(
        canvas.cell(40, 23).unwrap().bg,
        rgb(row_background(Theme::Sky, 23, ROWS))
    );
    assert_ne!(
        canvas.cell(40, 5).unwrap().bg,
        rgb(row_background(Theme::Ocean, 5, ROWS))
    );
}

#[test]
fn bright_star_decoration_is_drawn() {
    let mut s = make_session(Character::Rocket, Theme::Space);
    s.backdrop.decorations.push(Decoration {
        x: 300.0,
        y: 100.0,
        size: 2.0,
        kind: DecorationKind::Star { twinkle: FRAC_PI_2 },
    });
    let canvas = draw(&s, None);
    assert_eq!(glyph_at(&canvas, 30, 5), '*');
}

#[test]
fn decorations_scroll_with_parallax() {
    let mut s = make_session(Character::Fish, Theme::Ocean);
    s.camera_x = 1000.0; // fish parallax 0.4: 400 px left
    s.backdrop.decorations.push(Decoration {
        x: 800.0,
        y: 200.0,
        size: 20.0,
        kind: DecorationKind::Fish { speed: 1.0, direction: 1.0, swim: 0.0 },
    });
    let canvas = draw(&s, None);
    assert_eq!(&canvas.row_text(10)[39..42], "><>");
}

// ── entities ──────────────────────────────────────────────────────────────────

#[test]
fn items_and_hazards_drawn_relative_to_camera() {
    let mut s = make_session(Character::Bird, Theme::Sky);
    s.camera_x = 1000.0;
    s.items.push(Item { x: 1300.0, y: 100.0, size: 20.0, collected: false });
    s.hazards.push(Hazard { x: 1500.0, y: 300.0, size: 25.0, hit: false });
    let canvas = draw(&s, None);
    assert_eq!(glyph_at(&canvas, 30, 5), '★');
    assert_eq!(glyph_at(&canvas, 50, 15), '●');
}

#[test]
fn collected_items_are_not_drawn() {
    let mut s = make_session(Character::Bird, Theme::Sky);
    s.items.push(Item { x: 300.0, y: 100.0, size: 20.0, collected: true });
    let canvas = draw(&s, None);
    assert_eq!(glyph_at(&canvas, 30, 5), ' ');
    assert!(canvas.iter_rows().flatten().all(|c| c.ch != '★'));
}

#[test]
fn bird_faces_direction_of_travel() {
    let canvas = draw(&make_session(Character::Bird, Theme::Sky), None);
    assert_eq!(&canvas.row_text(12)[9..12], "-o>");
}

#[test]
fn rising_bird_noses_up() {
    let mut s = make_session(Character::Bird, Theme::Sky);
    s.player.vy = -12.0;
    let canvas = draw(&s, None);
    assert_eq!(&canvas.row_text(12)[9..12], "/o>");
}

#[test]
fn rocket_uses_fallback_until_sprite_ready() {
    let s = make_session(Character::Rocket, Theme::Space);
    let canvas = draw(&s, None);
    assert_eq!(&canvas.row_text(12)[9..12], "=[>");
}

#[test]
fn rocket_sprite_replaces_fallback_once_ready() {
    let sprite = Sprite::parse("  ^\n=[#]>\n  v\n").unwrap();
    let loader = SpriteLoader::ready(sprite);
    let canvas = draw(&make_session(Character::Rocket, Theme::Space), loader.sprite());
    assert_eq!(&canvas.row_text(11)[8..13], "  ^  ");
    assert_eq!(&canvas.row_text(12)[8..13], "=[#]>");
    assert_eq!(&canvas.row_text(13)[8..13], "  v  ");
}

#[test]
fn sprite_is_ignored_for_other_characters() {
    let sprite = Sprite::parse("=[#]>").unwrap();
    let canvas = draw(&make_session(Character::Bird, Theme::Sky), Some(&sprite));
    assert!(!canvas.row_text(12).contains('#'));
}

// ── HUD & overlays ────────────────────────────────────────────────────────────

#[test]
fn hud_shows_distance_and_stars() {
    let mut s = make_session(Character::Bird, Theme::Sky);
    s.camera_x = 125.0;
    s.score = 30;
    let canvas = draw(&s, None);
    assert!(canvas.row_text(0).contains("Distance: 12 | Stars: 30"));
    assert!(canvas.row_text(ROWS - 1).contains("P: Pause"));
}

#[test]
fn pause_overlay_is_centred() {
    let mut canvas = draw(&make_session(Character::Bird, Theme::Sky), None);
    draw_paused(&mut canvas);
    assert!((0..ROWS).any(|r| canvas.row_text(r).contains("PAUSED")));
}

#[test]
fn quit_prompt_asks_for_confirmation() {
    let mut canvas = Canvas::new(COLS, ROWS);
    draw_confirm_quit(&mut canvas);
    assert!((0..ROWS).any(|r| canvas.row_text(r).contains("Do you want to")));
    assert!((0..ROWS).any(|r| canvas.row_text(r).contains("Y - Quit")));
}

#[test]
fn game_over_shows_final_and_best_score() {
    let mut s = make_session(Character::Bird, Theme::Sky);
    s.camera_x = 420.0;
    s.score = 20;
    s.status = GameStatus::Over(OverCause::Hazard);
    let mut canvas = draw(&s, None);
    draw_game_over(&mut canvas, &s, &BestRun { distance: 90, stars: 40 });
    let all: Vec<String> = (0..ROWS).map(|r| canvas.row_text(r)).collect();
    assert!(all.iter().any(|l| l.contains("GAME  OVER")));
    assert!(all.iter().any(|l| l.contains("Distance: 42 | Stars: 20")));
    assert!(all.iter().any(|l| l.contains("Best: 90 | 40 stars")));
}

#[test]
fn menu_highlights_selected_character() {
    let mut menu = MenuState::new(Character::Fish, Theme::Ocean);
    let mut canvas = Canvas::new(COLS, ROWS);
    draw_menu(&mut canvas, &menu, false, 0.3);
    let all: Vec<String> = (0..ROWS).map(|r| canvas.row_text(r)).collect();
    assert!(all.iter().any(|l| l.contains("[2:Fish]")));
    assert!(all.iter().any(|l| l.contains("Theme: < Ocean >")));
    assert!(!all.iter().any(|l| l.contains("Best:")));

    menu.best.record(12, 3);
    draw_menu(&mut canvas, &menu, true, 0.3);
    let all: Vec<String> = (0..ROWS).map(|r| canvas.row_text(r)).collect();
    assert!(all.iter().any(|l| l.contains("Best: Distance 12 | Stars 3")));
    assert!(all.iter().any(|l| l.contains("Music: muted")));
}
