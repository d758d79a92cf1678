/// Game configuration, loaded from TOML.
///
/// Every section has defaults equal to the classic tuning, so an empty file
/// (or no file at all) yields a playable game.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

// ── Physics & scoring ─────────────────────────────────────────────────────────

/// Per-tick physics and scoring constants.  Units are virtual pixels and
/// frames; nothing here is scaled by wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub gravity: f64,
    /// Velocity set (not added) by a tap.  Negative is upward.
    pub impulse_velocity: f64,
    /// Fraction of speed kept after bouncing off the top or bottom margin.
    pub bounce_damping: f64,
    /// Distance from the top and bottom edge the player is clamped to.
    pub edge_margin: f64,
    /// Camera advance per tick.
    pub world_speed: f64,
    /// Pickup / hit distance.  Collisions require a strictly smaller distance.
    pub pickup_radius: f64,
    pub star_value: u32,
    pub player_x: f64,
    pub player_size: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.4,
            impulse_velocity: -12.0,
            bounce_damping: 0.7,
            edge_margin: 50.0,
            world_speed: 5.0,
            pickup_radius: 40.0,
            star_value: 10,
            player_x: 100.0,
            player_size: 30.0,
        }
    }
}

// ── World layout ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldLayout {
    pub item_count: usize,
    pub item_start_x: f64,
    pub item_spacing: f64,
    pub item_jitter: f64,
    pub item_size: f64,
    pub hazard_count: usize,
    pub hazard_start_x: f64,
    pub hazard_spacing: f64,
    pub hazard_jitter: f64,
    pub hazard_size: f64,
    /// Lowest y an item or hazard is placed at.
    pub vertical_start: f64,
    /// Items and hazards are spread over this many canvas heights.
    pub vertical_screens: f64,
}

impl Default for WorldLayout {
    fn default() -> Self {
        Self {
            item_count: 800,
            item_start_x: 200.0,
            item_spacing: 40.0,
            item_jitter: 30.0,
            item_size: 20.0,
            hazard_count: 600,
            hazard_start_x: 250.0,
            hazard_spacing: 50.0,
            hazard_jitter: 40.0,
            hazard_size: 25.0,
            vertical_start: 50.0,
            vertical_screens: 4.0,
        }
    }
}

// ── Display ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Frames per second of the frame scheduler.
    pub fps: u32,
    /// Virtual pixels covered by one terminal column.
    pub cell_width: f64,
    /// Virtual pixels covered by one terminal row.
    pub cell_height: f64,
    /// ASCII-art sprite used for the rocket once it has loaded.
    pub rocket_sprite: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            fps: 60,
            cell_width: 10.0,
            cell_height: 20.0,
            rocket_sprite: "assets/rocket.txt".to_string(),
        }
    }
}

// ── Audio ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub muted: bool,
    pub volume: f32,
    /// Ring the terminal bell on these cues: "bounce", "collect", "hit", "jump".
    pub bell_cues: Vec<String>,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            muted: false,
            volume: 0.3,
            bell_cues: vec!["hit".to_string()],
        }
    }
}

// ── Root ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub tuning: Tuning,
    pub world: WorldLayout,
    pub display: DisplayConfig,
    pub audio: AudioConfig,
}

impl GameConfig {
    /// Read and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml(&contents)?;
        tracing::info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.display.fps == 0 {
            return Err(GameError::InvalidConfig("display.fps must be positive".into()));
        }
        if self.display.cell_width <= 0.0 || self.display.cell_height <= 0.0 {
            return Err(GameError::InvalidConfig(
                "display.cell_width and display.cell_height must be positive".into(),
            ));
        }
        if self.tuning.pickup_radius <= 0.0 {
            return Err(GameError::InvalidConfig("tuning.pickup_radius must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.tuning.bounce_damping) {
            return Err(GameError::InvalidConfig(
                "tuning.bounce_damping must be within [0, 1]".into(),
            ));
        }
        if self.tuning.world_speed < 0.0 {
            return Err(GameError::InvalidConfig("tuning.world_speed must not be negative".into()));
        }
        if self.tuning.edge_margin < 0.0 {
            return Err(GameError::InvalidConfig("tuning.edge_margin must not be negative".into()));
        }
        if !(0.0..=1.0).contains(&self.audio.volume) {
            return Err(GameError::InvalidConfig("audio.volume must be within [0, 1]".into()));
        }
        Ok(())
    }
}
