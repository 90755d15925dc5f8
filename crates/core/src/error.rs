//! Error types for engine construction
//!
//! Per-call operations never fail; only building an engine can.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("color count {0} outside 2..=15")]
    ColorCount(u8),
    #[error("board {width}x{height} is smaller than 2x2")]
    BoardTooSmall { width: u8, height: u8 },
    #[error("bomb cost must be positive")]
    ZeroBombCost,
    #[error("bomb timer must be positive")]
    ZeroBombTimer,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("no playable board after {attempts} attempts")]
    DeadBoard { attempts: u32 },
    #[error("grid is {actual:?}, configuration expects {expected:?}")]
    GridSizeMismatch {
        expected: (u8, u8),
        actual: (u8, u8),
    },
}
