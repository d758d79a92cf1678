use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid sprite: {0}")]
    InvalidSprite(String),

    #[error("A frame is already scheduled")]
    FrameAlreadyScheduled,

    #[error("Terminal too small: {cols}x{rows} (need at least {min_cols}x{min_rows})")]
    TerminalTooSmall {
        cols: u16,
        rows: u16,
        min_cols: u16,
        min_rows: u16,
    },
}

pub type Result<T> = std::result::Result<T, GameError>;
