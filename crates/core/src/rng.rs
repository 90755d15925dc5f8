//! RNG module - seeded cell generation
//!
//! Every vacancy at the top of a column is filled by that column's
//! [`Generator`], which always holds the *next* cell it will drop. The
//! pending cell is regenerated after each successful spawn, optionally
//! carrying a bomb.
//!
//! Also provides a simple LCG so that a session is fully reproducible from
//! its seed.

use crate::types::{Cell, Color, Coord};

const LCG_MUL: u32 = 1_664_525;
const LCG_INC: u32 = 1_013_904_223;

/// 32-bit linear congruential generator.
///
/// One master instance seeds every column generator and the board painter;
/// each of those then owns its own stream.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// A zero seed is remapped to 1
    pub fn new(seed: u32) -> Self {
        Self { state: seed.max(1) }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(LCG_MUL).wrapping_add(LCG_INC);
        self.state
    }

    /// Uniform-ish value in `0..max`, taken from the high half of the state
    pub fn next_range(&mut self, max: u32) -> u32 {
        (self.next_u32() >> 16) % max
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Per-column cell factory
#[derive(Debug, Clone)]
pub struct Generator {
    /// Where new cells appear; for column generators this is one row above the board
    source: Coord,
    colors: u8,
    bomb_timer: u32,
    pending: Cell,
    rng: SimpleRng,
}

impl Generator {
    /// Create a generator and roll its first pending cell
    pub fn new(source: Coord, colors: u8, bomb_timer: u32, seed: u32) -> Self {
        let mut generator = Self {
            source,
            colors: colors.max(1),
            bomb_timer,
            pending: Cell::EMPTY,
            rng: SimpleRng::new(seed),
        };
        generator.generate(false);
        generator
    }

    pub fn source(&self) -> Coord {
        self.source
    }

    /// The cell that will drop next
    pub fn pending(&self) -> Cell {
        self.pending
    }

    /// Roll a new pending cell, uniformly colored, never empty
    pub fn generate(&mut self, with_bomb: bool) -> Cell {
        let color = Color(self.rng.next_range(self.colors as u32) as u8);
        self.pending = if with_bomb {
            Cell::with_bomb(color, self.bomb_timer)
        } else {
            Cell::new(color)
        };
        self.pending
    }

    /// Roll and return a plain cell (used to paint whole boards)
    pub fn draw(&mut self) -> Cell {
        self.generate(false)
    }
}
