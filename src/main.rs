use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use star_glide::assets::SpriteLoader;
use star_glide::audio::{AudioSink, BellSink};
use star_glide::config::GameConfig;
use star_glide::display::{self, canvas::Canvas, terminal::present};
use star_glide::entities::{Character, GameStatus, Theme};
use star_glide::error::{GameError, Result};
use star_glide::game_loop::{FrameOutcome, GameLoop};
use star_glide::menu::{MenuState, VOLUME_STEP};

const MIN_COLS: u16 = 40;
const MIN_ROWS: u16 = 12;

/// Longest the loop sleeps without a frame due, so input stays responsive.
const IDLE_WAIT: Duration = Duration::from_millis(16);

/// Endless side-scrolling arcade game: tap to fly, collect stars, dodge bombs.
#[derive(Parser, Debug)]
#[command(name = "star_glide")]
#[command(about = "Endless side-scrolling arcade game for the terminal")]
struct Args {
    /// TOML config file (defaults are used when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log file; the terminal itself is taken by the game
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Random seed for a reproducible world
    #[arg(long)]
    seed: Option<u64>,

    /// Starting character: bird, fish or rocket
    #[arg(long, default_value = "bird", value_parser = parse_character)]
    character: Character,

    /// Starting theme: sky, space or ocean
    #[arg(long, default_value = "sky", value_parser = parse_theme)]
    theme: Theme,

    /// Override display.fps from the config
    #[arg(long)]
    fps: Option<u32>,
}

fn parse_character(s: &str) -> std::result::Result<Character, String> {
    Character::ALL
        .into_iter()
        .find(|c| c.label().eq_ignore_ascii_case(s))
        .ok_or_else(|| format!("unknown character {s:?} (bird, fish, rocket)"))
}

fn parse_theme(s: &str) -> std::result::Result<Theme, String> {
    Theme::ALL
        .into_iter()
        .find(|t| t.label().eq_ignore_ascii_case(s))
        .ok_or_else(|| format!("unknown theme {s:?} (sky, space, ocean)"))
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("star_glide=info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();

    let log_path = args
        .log_file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("star_glide.log"));
    init_logging(&log_path)?;

    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(fps) = args.fps {
        config.display.fps = fps;
        config.validate()?;
    }
    tracing::info!(?config, "Star Glide starting");

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Input thread stopped");
                break;
            }
        }
    });

    let result = run(&mut out, &rx, config, &args);

    // Always restore the terminal
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        tracing::error!(error = %e, "Exiting with error");
    }
    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: GameConfig,
    args: &Args,
) -> Result<()> {
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut rocket = SpriteLoader::spawn(PathBuf::from(&config.display.rocket_sprite));
    let bell = BellSink::new(stdout(), &config.audio);
    let mut game = GameLoop::new(config, bell);
    let mut menu = MenuState::new(args.character, args.theme);

    loop {
        match show_menu(out, rx, &mut menu, &mut game)? {
            MenuResult::Quit => break,
            MenuResult::Start => {
                let (cols, rows) = terminal_size()?;
                game.start_session(menu.character, menu.theme, cols, rows, &mut rng, Instant::now())?;
                match play(out, rx, &mut game, &mut rocket, &mut rng, &mut menu)? {
                    PlayResult::Exit => break,
                    PlayResult::Menu => {}
                }
            }
        }
    }
    Ok(())
}

fn terminal_size() -> Result<(u16, u16)> {
    let (cols, rows) = terminal::size()?;
    if cols < MIN_COLS || rows < MIN_ROWS {
        return Err(GameError::TerminalTooSmall {
            cols,
            rows,
            min_cols: MIN_COLS,
            min_rows: MIN_ROWS,
        });
    }
    Ok((cols, rows))
}

fn is_ctrl_c(code: KeyCode, modifiers: KeyModifiers) -> bool {
    code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL)
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start,
    Quit,
}

fn show_menu<W: Write, S: AudioSink>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    menu: &mut MenuState,
    game: &mut GameLoop<S>,
) -> Result<MenuResult> {
    loop {
        let (cols, rows) = terminal_size()?;
        let mut canvas = Canvas::new(cols, rows);
        display::draw_menu(&mut canvas, menu, game.mixer().is_muted(), game.mixer().volume());
        present(out, &canvas)?;

        // Block until the user does something
        let Ok(event) = rx.recv() else {
            return Ok(MenuResult::Quit);
        };
        let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            modifiers,
            ..
        }) = event
        else {
            continue;
        };
        if is_ctrl_c(code, modifiers) {
            return Ok(MenuResult::Quit);
        }
        match code {
            KeyCode::Char(d @ '1'..='3') => menu.select_character(d as usize - '1' as usize),
            KeyCode::Char('c') | KeyCode::Char('C') | KeyCode::Tab => menu.cycle_character(),
            KeyCode::Char('t') | KeyCode::Char('T') => menu.cycle_theme(),
            KeyCode::Char('m') | KeyCode::Char('M') => {
                game.mixer_mut().toggle_mute();
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                let v = game.mixer().volume() + VOLUME_STEP;
                game.mixer_mut().set_volume(v);
            }
            KeyCode::Char('-') => {
                let v = game.mixer().volume() - VOLUME_STEP;
                game.mixer_mut().set_volume(v);
            }
            KeyCode::Enter | KeyCode::Char(' ') => return Ok(MenuResult::Start),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(MenuResult::Quit),
            _ => {}
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

enum PlayResult {
    Menu,
    Exit,
}

fn play<W: Write, S: AudioSink>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    game: &mut GameLoop<S>,
    rocket: &mut SpriteLoader,
    rng: &mut StdRng,
    menu: &mut MenuState,
) -> Result<PlayResult> {
    let (cols, rows) = terminal::size()?;
    let mut canvas = Canvas::new(cols, rows);

    loop {
        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(event) = rx.try_recv() {
            match event {
                Event::Key(KeyEvent {
                    code,
                    kind: KeyEventKind::Press,
                    modifiers,
                    ..
                }) => {
                    if is_ctrl_c(code, modifiers) {
                        return Ok(PlayResult::Exit);
                    }
                    if game.status() == Some(GameStatus::ConfirmQuit) {
                        match code {
                            KeyCode::Char('y') | KeyCode::Char('Y') => {
                                if let Some(score) = game.resolve_quit(true) {
                                    menu.best.record(score.distance, score.stars);
                                }
                                return Ok(PlayResult::Menu);
                            }
                            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                                game.resolve_quit(false);
                            }
                            _ => {}
                        }
                        continue;
                    }
                    match code {
                        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter | KeyCode::Char('w') => {
                            game.impulse();
                        }
                        KeyCode::Char('p') | KeyCode::Char('P') => {
                            if game.toggle_pause() == Some(GameStatus::Paused) {
                                display::draw_paused(&mut canvas);
                                present(out, &canvas)?;
                            }
                        }
                        KeyCode::Char('t') | KeyCode::Char('T') => {
                            menu.cycle_theme();
                            game.set_theme(menu.theme, rng);
                        }
                        KeyCode::Char('m') | KeyCode::Char('M') => {
                            game.mixer_mut().toggle_mute();
                        }
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            if game.request_quit() {
                                display::draw_confirm_quit(&mut canvas);
                                present(out, &canvas)?;
                            }
                        }
                        _ => {}
                    }
                }
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(MouseButton::Left),
                    ..
                }) => {
                    game.impulse();
                }
                _ => {}
            }
        }

        rocket.poll();

        let now = Instant::now();
        if let Some(handle) = game.fire_due(now) {
            match game.on_frame(handle, &mut canvas, rocket.sprite(), now)? {
                FrameOutcome::Rendered(_) => present(out, &canvas)?,
                FrameOutcome::Over(score) => {
                    menu.best.record(score.distance, score.stars);
                    if let Some(session) = game.session() {
                        display::draw_game_over(&mut canvas, session, &menu.best);
                    }
                    present(out, &canvas)?;
                    return wait_after_game_over(rx);
                }
                FrameOutcome::Skipped | FrameOutcome::Stale => {}
            }
        }

        let wait = game
            .time_until_next_frame(Instant::now())
            .unwrap_or(IDLE_WAIT)
            .min(IDLE_WAIT);
        thread::sleep(wait);
    }
}

fn wait_after_game_over(rx: &mpsc::Receiver<Event>) -> Result<PlayResult> {
    loop {
        let Ok(event) = rx.recv() else {
            return Ok(PlayResult::Exit);
        };
        if let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            modifiers,
            ..
        }) = event
        {
            if is_ctrl_c(code, modifiers) {
                return Ok(PlayResult::Exit);
            }
            match code {
                KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => {
                    return Ok(PlayResult::Menu)
                }
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(PlayResult::Exit)
                }
                _ => {}
            }
        }
    }
}
