/// Sprite assets loaded off the game thread.
///
/// Until a sprite is ready (or if it never loads) the renderer draws a
/// built-in glyph instead.  Loading errors are logged, never propagated.

use std::fs;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use crate::error::{GameError, Result};

const MAX_SPRITE_ROWS: usize = 5;
const MAX_SPRITE_COLS: usize = 12;

/// Multi-row ASCII art, anchored at its centre.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    rows: Vec<String>,
}

impl Sprite {
    /// Parse sprite art.  Blank leading/trailing lines are dropped; trailing
    /// whitespace on each row is kept so columns stay aligned.
    pub fn parse(text: &str) -> Result<Sprite> {
        let rows: Vec<String> = text
            .lines()
            .map(|l| l.trim_end_matches('\r').to_string())
            .skip_while(|l| l.trim().is_empty())
            .collect();
        let end = rows
            .iter()
            .rposition(|l| !l.trim().is_empty())
            .map(|i| i + 1)
            .unwrap_or(0);
        let rows = rows[..end].to_vec();

        if rows.is_empty() {
            return Err(GameError::InvalidSprite("sprite is empty".into()));
        }
        if rows.len() > MAX_SPRITE_ROWS {
            return Err(GameError::InvalidSprite(format!(
                "sprite has {} rows (max {})",
                rows.len(),
                MAX_SPRITE_ROWS
            )));
        }
        if let Some(wide) = rows.iter().find(|r| r.chars().count() > MAX_SPRITE_COLS) {
            return Err(GameError::InvalidSprite(format!(
                "row {:?} is wider than {} columns",
                wide, MAX_SPRITE_COLS
            )));
        }
        Ok(Sprite { rows })
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn width(&self) -> usize {
        self.rows.iter().map(|r| r.chars().count()).max().unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SpriteState {
    Loading,
    Ready(Sprite),
    Unavailable,
}

pub struct SpriteLoader {
    rx: Option<mpsc::Receiver<Result<Sprite>>>,
    state: SpriteState,
}

impl SpriteLoader {
    /// Start reading `path` on a background thread.
    pub fn spawn(path: PathBuf) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let result = fs::read_to_string(&path)
                .map_err(GameError::from)
                .and_then(|text| Sprite::parse(&text));
            // Receiver gone means nobody wants the sprite any more.
            let _ = tx.send(result);
        });
        Self {
            rx: Some(rx),
            state: SpriteState::Loading,
        }
    }

    /// A loader that already holds `sprite`.
    pub fn ready(sprite: Sprite) -> Self {
        Self {
            rx: None,
            state: SpriteState::Ready(sprite),
        }
    }

    /// Check for a finished load without blocking.
    pub fn poll(&mut self) -> &SpriteState {
        if let Some(rx) = &self.rx {
            match rx.try_recv() {
                Ok(Ok(sprite)) => {
                    tracing::info!(rows = sprite.height(), "Sprite ready");
                    self.state = SpriteState::Ready(sprite);
                    self.rx = None;
                }
                Ok(Err(e)) => {
                    tracing::warn!(error = %e, "Sprite unavailable, using fallback glyph");
                    self.state = SpriteState::Unavailable;
                    self.rx = None;
                }
                Err(mpsc::TryRecvError::Empty) => {}
                Err(mpsc::TryRecvError::Disconnected) => {
                    self.state = SpriteState::Unavailable;
                    self.rx = None;
                }
            }
        }
        &self.state
    }

    pub fn sprite(&self) -> Option<&Sprite> {
        match &self.state {
            SpriteState::Ready(sprite) => Some(sprite),
            _ => None,
        }
    }
}
