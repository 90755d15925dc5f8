//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are plain data with no behaviour beyond small helpers, so they
//! can travel freely between the rules engine and whatever presentation
//! layer is animating its results.
//!
//! # Coordinates
//!
//! The board is addressed by integer `(x, y)`:
//!
//! - **x**: column, `0..width`, left to right
//! - **y**: row, `0..height`, bottom to top (gravity pulls toward `y = 0`)
//! - Odd columns sit half a cell lower than even columns, which is why most
//!   geometric tables are keyed by column parity.
//!
//! Coordinates are signed so that offset probes may step outside the board;
//! such probes are answered with "nothing there" rather than an error.
//!
//! # Scoring and Hazard Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BOMB_COST` | 1000 | Score that must accrue before each bomb drop |
//! | `CELL_SCORE` | 5 | Points per exploded cell |
//! | `BOMB_TIMER` | 10 | Player actions a freshly dropped bomb survives |
//!
//! # Examples
//!
//! ```
//! use hex_triad_types::{Cell, Color, Coord, MAX_COLORS};
//!
//! let cell = Cell::new(Color(2));
//! assert_eq!(cell.color, Some(Color(2)));
//! assert!(cell.bomb.is_none());
//!
//! let bomb = Cell::with_bomb(Color(0), 10);
//! assert_eq!(bomb.bomb.map(|b| b.moves_left), Some(10));
//!
//! assert_eq!(Coord::new(3, 4).offset(1, -1), Coord::new(4, 3));
//! assert_eq!(Color::palette(MAX_COLORS).count(), 15);
//! ```

use serde::{Deserialize, Serialize};

/// Fewest colors a board may be configured with
pub const MIN_COLORS: u8 = 2;

/// Most colors a board may be configured with
pub const MAX_COLORS: u8 = 15;

/// Smallest width or height that still admits a selection triangle
pub const MIN_GRID_SIDE: u8 = 2;

/// Default board width (8 columns)
pub const DEFAULT_WIDTH: u8 = 8;

/// Default board height (9 rows)
pub const DEFAULT_HEIGHT: u8 = 9;

/// Default number of colors in play
pub const DEFAULT_COLORS: u8 = 5;

/// Score that pays for one bomb drop (1000 points)
pub const BOMB_COST: u32 = 1000;

/// Points awarded per exploded cell (5 points)
pub const CELL_SCORE: u32 = 5;

/// Initial countdown of a dropped bomb, in player actions
pub const BOMB_TIMER: u32 = 10;

/// Number of speculative rotations tried per attempt (120° and 240°)
pub const ROTATION_STEPS: u8 = 2;

/// A board coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Coordinate displaced by `(dx, dy)`
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// True for the half-cell-lowered columns
    pub const fn is_odd_column(self) -> bool {
        self.x.rem_euclid(2) == 1
    }
}

/// A cell color, indexing the configured palette (`0..colors`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u8);

impl Color {
    /// The first `count` colors, in rule-generation order.
    ///
    /// `count` is clamped to [`MAX_COLORS`].
    pub fn palette(count: u8) -> impl Iterator<Item = Color> {
        (0..count.min(MAX_COLORS)).map(Color)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Countdown attached to a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BombState {
    pub moves_left: u32,
}

/// One grid position: its color (`None` = empty) and optional bomb.
///
/// Cells are replaced wholesale on every mutation; nothing hands out a
/// mutable reference into the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Cell {
    pub color: Option<Color>,
    pub bomb: Option<BombState>,
}

impl Cell {
    /// Vacancy left behind by an explosion or a slide
    pub const EMPTY: Cell = Cell {
        color: None,
        bomb: None,
    };

    pub const fn new(color: Color) -> Self {
        Self {
            color: Some(color),
            bomb: None,
        }
    }

    pub const fn with_bomb(color: Color, moves_left: u32) -> Self {
        Self {
            color: Some(color),
            bomb: Some(BombState { moves_left }),
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.color.is_none()
    }

    pub const fn has_bomb(&self) -> bool {
        self.bomb.is_some()
    }
}

/// Shape family of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pattern {
    /// Three mutually adjacent cells forming a small triangle
    Triple,
}

/// One rule match found during a resolution pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplodeElement {
    pub color: Color,
    pub pattern: Pattern,
    pub positions: Vec<Coord>,
}

/// A live bomb and its remaining countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BombElement {
    pub coord: Coord,
    pub moves_left: u32,
}

/// Result of ticking every bomb timer once
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BombOutcome {
    /// A timer reached zero: the session is lost
    pub exploded: bool,
    /// Every bomb on the board after the tick
    pub bombs: Vec<BombElement>,
}

/// Result of a rotation attempt or an automatic resolution probe
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExplodeOutcome {
    pub valid: bool,
    /// Number of 120° turns that produced the match (1 or 2), 0 when invalid
    pub pass_index: u8,
    pub explode_elements: Vec<ExplodeElement>,
    pub bomb_outcome: BombOutcome,
}

impl ExplodeOutcome {
    pub fn invalid() -> Self {
        Self::default()
    }

    /// Total cells cleared across all explode elements
    pub fn exploded_cells(&self) -> usize {
        self.explode_elements.iter().map(|e| e.positions.len()).sum()
    }
}

/// A single cell movement during a fill pass.
///
/// `from == to` marks a freshly generated cell appearing at its generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub cell: Cell,
    pub from: Coord,
    pub to: Coord,
}

impl MoveRecord {
    pub fn is_spawn(&self) -> bool {
        self.from == self.to
    }
}

/// Result of a fill cascade
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FillOutcome {
    /// The player still has at least one productive rotation
    pub moves_left: bool,
    /// One entry per pass that moved anything, in order
    pub cascade_passes: Vec<Vec<MoveRecord>>,
}

impl FillOutcome {
    pub fn spawned_cells(&self) -> impl Iterator<Item = &MoveRecord> {
        self.cascade_passes
            .iter()
            .flatten()
            .filter(|record| record.is_spawn())
    }
}
