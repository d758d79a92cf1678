/// Session data: player, items, hazards, backdrop and status.  No logic
/// beyond small derived values.

use serde::{Deserialize, Serialize};

use crate::config::Tuning;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Character {
    Bird,
    Fish,
    Rocket,
}

impl Character {
    pub const ALL: [Character; 3] = [Character::Bird, Character::Fish, Character::Rocket];

    pub fn label(self) -> &'static str {
        match self {
            Character::Bird => "Bird",
            Character::Fish => "Fish",
            Character::Rocket => "Rocket",
        }
    }

    pub fn next(self) -> Character {
        match self {
            Character::Bird => Character::Fish,
            Character::Fish => Character::Rocket,
            Character::Rocket => Character::Bird,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Sky,
    Space,
    Ocean,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Sky, Theme::Space, Theme::Ocean];

    pub fn label(self) -> &'static str {
        match self {
            Theme::Sky => "Sky",
            Theme::Space => "Space",
            Theme::Ocean => "Ocean",
        }
    }

    pub fn next(self) -> Theme {
        match self {
            Theme::Sky => Theme::Space,
            Theme::Space => Theme::Ocean,
            Theme::Ocean => Theme::Sky,
        }
    }
}

/// Why a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverCause {
    Hazard,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Paused,
    /// Paused while the quit prompt is shown.
    ConfirmQuit,
    Over(OverCause),
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        matches!(self, GameStatus::Over(_))
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    /// Screen-space column in pixels; never changes during a session.
    pub x: f64,
    pub y: f64,
    /// Vertical velocity in pixels per tick (positive = downward).
    pub vy: f64,
    pub size: f64,
    pub character: Character,
}

// ── Collectibles & hazards ────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Item {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub collected: bool,
}

#[derive(Clone, Debug)]
pub struct Hazard {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub hit: bool,
}

// ── Backdrop ──────────────────────────────────────────────────────────────────

/// Animation state of a decorative element.  Phases are radians.
#[derive(Clone, Debug, PartialEq)]
pub enum DecorationKind {
    Cloud { speed: f64 },
    Sun { rotation: f64 },
    Star { twinkle: f64 },
    Moon { phase: f64 },
    /// `direction` is +1.0 (rightward) or -1.0 (leftward).
    Fish { speed: f64, direction: f64, swim: f64 },
    SeaAnimal { speed: f64, direction: f64, bob: f64 },
}

impl DecorationKind {
    /// Multiplier applied to the camera offset when projecting this kind.
    pub fn parallax(&self) -> f64 {
        match self {
            DecorationKind::Cloud { .. } => 0.3,
            DecorationKind::Sun { .. } => 0.05,
            DecorationKind::Star { .. } => 0.1,
            DecorationKind::Moon { .. } => 0.05,
            DecorationKind::Fish { .. } => 0.4,
            DecorationKind::SeaAnimal { .. } => 0.3,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Decoration {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub kind: DecorationKind,
}

impl Decoration {
    pub fn screen_x(&self, camera_x: f64) -> f64 {
        self.x - camera_x * self.kind.parallax()
    }
}

#[derive(Clone, Debug)]
pub struct Backdrop {
    pub theme: Theme,
    pub decorations: Vec<Decoration>,
}

// ── Session ───────────────────────────────────────────────────────────────────

/// Everything one play-through owns.  Reset wholesale on restart.
#[derive(Clone, Debug)]
pub struct Session {
    pub player: Player,
    pub items: Vec<Item>,
    pub hazards: Vec<Hazard>,
    pub backdrop: Backdrop,
    /// Horizontal scroll distance in pixels; only ever increases.
    pub camera_x: f64,
    /// Stars score.
    pub score: u32,
    pub status: GameStatus,
    pub frame: u64,
    /// Canvas size in virtual pixels.
    pub width: f64,
    pub height: f64,
    pub tuning: Tuning,
}

impl Session {
    /// Distance score shown alongside stars.
    pub fn distance(&self) -> u64 {
        (self.camera_x / 10.0).floor() as u64
    }

    pub fn score_text(&self) -> String {
        format!("Distance: {} | Stars: {}", self.distance(), self.score)
    }

    /// Player position in world space.
    pub fn player_world(&self) -> (f64, f64) {
        (self.player.x + self.camera_x, self.player.y)
    }
}
