//! Selection module - three-cell triangle selection and rotation
//!
//! Clicking a cell selects a small triangle: the clicked cell plus two
//! neighbours. Which neighbours depends on the column parity, because odd
//! columns sit half a cell lower than even ones. Each parity has five
//! candidate patterns, tried in order; the first whose two offsets both land
//! on the board wins.
//!
//! Each pattern carries a permutation that reorders the three cells into a
//! canonical winding, so that rotating `[0] <- [1] <- [2] <- [0]` always
//! turns the triangle the same way no matter which pattern produced it.

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::types::Coord;

/// Two neighbour offsets plus the canonical ordering of
/// `[clicked, first, second]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SelectionPattern {
    offsets: [(i32, i32); 2],
    order: [usize; 3],
}

const fn pattern(offsets: [(i32, i32); 2], order: [usize; 3]) -> SelectionPattern {
    SelectionPattern { offsets, order }
}

const ODD_PATTERNS: [SelectionPattern; 5] = [
    pattern([(1, 0), (0, 1)], [0, 2, 1]),
    pattern([(0, -1), (1, -1)], [1, 0, 2]),
    pattern([(-1, -1), (0, -1)], [1, 0, 2]),
    pattern([(-1, 0), (-1, -1)], [2, 1, 0]),
    pattern([(-1, 0), (0, 1)], [2, 0, 1]),
];

const EVEN_PATTERNS: [SelectionPattern; 5] = [
    pattern([(0, 1), (1, 1)], [0, 1, 2]),
    pattern([(1, 0), (1, 1)], [0, 2, 1]),
    pattern([(-1, 0), (0, -1)], [1, 0, 2]),
    pattern([(-1, 0), (-1, 1)], [2, 0, 1]),
    pattern([(0, -1), (1, 0)], [1, 0, 2]),
];

/// An ordered triple of coordinates, or fewer when no pattern fit
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    coords: ArrayVec<Coord, 3>,
}

impl Selection {
    pub fn new(coords: [Coord; 3]) -> Self {
        Self {
            coords: ArrayVec::from(coords),
        }
    }

    pub fn coords(&self) -> &[Coord] {
        &self.coords
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Only complete selections can be rotated
    pub fn is_complete(&self) -> bool {
        self.coords.is_full()
    }

    pub fn triple(&self) -> Option<[Coord; 3]> {
        self.coords.as_slice().try_into().ok()
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.coords.contains(&coord)
    }
}

impl From<[Coord; 3]> for Selection {
    fn from(coords: [Coord; 3]) -> Self {
        Self::new(coords)
    }
}

/// Derives triangle selections for a fixed board size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionResolver {
    width: u8,
    height: u8,
}

impl SelectionResolver {
    pub fn new(width: u8, height: u8) -> Self {
        Self { width, height }
    }

    fn in_size(&self, coord: Coord) -> bool {
        coord.x >= 0 && coord.y >= 0 && coord.x < self.width as i32 && coord.y < self.height as i32
    }

    /// Select the triangle for a clicked cell, in canonical order.
    ///
    /// Returns a selection holding only `clicked` when no pattern fits.
    pub fn resolve(&self, clicked: Coord) -> Selection {
        let patterns = if clicked.is_odd_column() {
            &ODD_PATTERNS
        } else {
            &EVEN_PATTERNS
        };

        let found = patterns.iter().find(|p| {
            p.offsets
                .iter()
                .all(|&(dx, dy)| self.in_size(clicked.offset(dx, dy)))
        });

        let Some(p) = found else {
            let mut coords = ArrayVec::new();
            coords.push(clicked);
            return Selection { coords };
        };

        let picked = [
            clicked,
            clicked.offset(p.offsets[0].0, p.offsets[0].1),
            clicked.offset(p.offsets[1].0, p.offsets[1].1),
        ];
        Selection::new(p.order.map(|i| picked[i]))
    }
}

/// Rotate the contents of a triangle one 120° step.
///
/// Clockwise moves `[1] -> [0]`, `[2] -> [1]`, `[0] -> [2]`; counter-clockwise
/// is the inverse.
pub fn rotate_cells(grid: &mut Grid, triple: &[Coord; 3], clockwise: bool) {
    let (first, last) = if clockwise { (0, 2) } else { (2, 0) };
    grid.swap(triple[first], triple[1]);
    grid.swap(triple[1], triple[last]);
}

/// Where the content of each selected cell sits after each of `steps` turns.
///
/// Entry `k` of step `i` is the coordinate holding what started at
/// `triple[k]`, after `i + 1` turns in the given direction.
pub fn rotation_path(triple: [Coord; 3], steps: u8, clockwise: bool) -> Vec<[Coord; 3]> {
    let mut current = triple;
    (0..steps)
        .map(|_| {
            current = if clockwise {
                [current[2], current[0], current[1]]
            } else {
                [current[1], current[2], current[0]]
            };
            current
        })
        .collect()
}
