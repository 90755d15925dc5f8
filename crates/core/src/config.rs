//! Engine configuration
//!
//! Fixed at construction. Defaults follow the standard 8x9 five-color board.

use std::env;

use log::warn;

use crate::error::ConfigError;
use crate::types::{
    BOMB_COST, BOMB_TIMER, CELL_SCORE, DEFAULT_COLORS, DEFAULT_HEIGHT, DEFAULT_WIDTH, MAX_COLORS,
    MIN_COLORS, MIN_GRID_SIDE,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub width: u8,
    pub height: u8,
    /// Distinct colors in play (2..=15)
    pub colors: u8,
    /// Score that pays for one bomb drop
    pub bomb_cost: u32,
    /// Points per exploded cell
    pub cell_value: u32,
    /// Initial countdown of a dropped bomb
    pub bomb_timer: u32,
    pub seed: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            colors: DEFAULT_COLORS,
            bomb_cost: BOMB_COST,
            cell_value: CELL_SCORE,
            bomb_timer: BOMB_TIMER,
            seed: 1,
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

impl EngineConfig {
    /// Create from `HEX_TRIAD_*` environment variables.
    /// Missing or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            width: env_or("HEX_TRIAD_WIDTH", defaults.width),
            height: env_or("HEX_TRIAD_HEIGHT", defaults.height),
            colors: env_or("HEX_TRIAD_COLORS", defaults.colors),
            bomb_cost: env_or("HEX_TRIAD_BOMB_COST", defaults.bomb_cost),
            cell_value: env_or("HEX_TRIAD_CELL_VALUE", defaults.cell_value),
            bomb_timer: env_or("HEX_TRIAD_BOMB_TIMER", defaults.bomb_timer),
            seed: env_or("HEX_TRIAD_SEED", defaults.seed),
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_size(mut self, width: u8, height: u8) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_colors(mut self, colors: u8) -> Self {
        self.colors = colors;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let result = if !(MIN_COLORS..=MAX_COLORS).contains(&self.colors) {
            Err(ConfigError::ColorCount(self.colors))
        } else if self.width < MIN_GRID_SIDE || self.height < MIN_GRID_SIDE {
            Err(ConfigError::BoardTooSmall {
                width: self.width,
                height: self.height,
            })
        } else if self.bomb_cost == 0 {
            Err(ConfigError::ZeroBombCost)
        } else if self.bomb_timer == 0 {
            Err(ConfigError::ZeroBombTimer)
        } else {
            Ok(())
        };

        if let Err(err) = &result {
            warn!("rejected engine config: {}", err);
        }
        result
    }
}
