//! Moves module - gravity
//!
//! A move is an ordered list of offsets. Applying it to a cell slides the
//! cell into the first offset destination that is currently vacant. The
//! default set holds a single straight-down offset.

use crate::grid::Grid;
use crate::types::{Cell, Coord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    priority: i32,
    offsets: Vec<(i32, i32)>,
}

impl Move {
    pub fn new(priority: i32, offsets: Vec<(i32, i32)>) -> Self {
        Self { priority, offsets }
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Slide the cell at `from` into the first vacant offset destination.
    ///
    /// On-board sources move their own cell and leave a vacancy behind.
    /// Off-board sources (generators above a column) move `incoming` instead.
    /// Returns the destination, or `None` when there was nothing to move or
    /// nowhere to go.
    pub fn apply(&self, grid: &mut Grid, from: Coord, incoming: Option<Cell>) -> Option<Coord> {
        let on_board = grid.contains(from);
        let cell = if on_board {
            grid.get(from)?
        } else {
            incoming.unwrap_or(Cell::EMPTY)
        };
        if cell.is_empty() {
            return None;
        }

        let dest = self
            .offsets
            .iter()
            .map(|&(dx, dy)| from.offset(dx, dy))
            .find(|&dest| grid.is_vacant(dest))?;

        grid.set(dest, cell);
        if on_board {
            grid.clear(from);
        }
        Some(dest)
    }
}

/// Ordered collection of moves, tried by ascending priority
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveSet {
    moves: Vec<Move>,
}

impl MoveSet {
    pub fn new(mut moves: Vec<Move>) -> Self {
        moves.sort_by_key(Move::priority);
        Self { moves }
    }

    /// Straight-down gravity
    pub fn gravity() -> Self {
        Self::new(vec![Move::new(0, vec![(0, -1)])])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Move> {
        self.moves.iter()
    }
}

impl Default for MoveSet {
    fn default() -> Self {
        Self::gravity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    #[test]
    fn test_slide_into_vacancy() {
        let mut grid = Grid::from_columns(&[&[0, 1, 2]]);
        grid.clear(Coord::new(0, 0));

        let dest = Move::new(0, vec![(0, -1)]).apply(&mut grid, Coord::new(0, 1), None);

        assert_eq!(dest, Some(Coord::new(0, 0)));
        assert_eq!(grid.color(Coord::new(0, 0)), Some(Color(1)));
        assert!(grid.is_vacant(Coord::new(0, 1)));
    }

    #[test]
    fn test_blocked_move_leaves_grid_unchanged() {
        let mut grid = Grid::from_columns(&[&[0, 1, 2]]);
        let before = grid.clone();

        assert_eq!(
            MoveSet::gravity()
                .iter()
                .find_map(|m| m.apply(&mut grid, Coord::new(0, 2), None)),
            None
        );
        assert_eq!(grid, before);
    }

    #[test]
    fn test_empty_source_does_nothing() {
        let mut grid = Grid::new(1, 2);
        let incoming = Some(Cell::new(Color(3)));
        assert_eq!(
            Move::new(0, vec![(0, -1)]).apply(&mut grid, Coord::new(0, 1), incoming),
            None
        );
        assert_eq!(grid.filled_count(), 0);
    }

    #[test]
    fn test_off_board_source_uses_incoming() {
        let mut grid = Grid::new(1, 2);
        let incoming = Cell::with_bomb(Color(1), 10);

        let dest = Move::new(0, vec![(0, -1)]).apply(&mut grid, Coord::new(0, 2), Some(incoming));

        assert_eq!(dest, Some(Coord::new(0, 1)));
        assert_eq!(grid.get(Coord::new(0, 1)), Some(incoming));
        assert_eq!(grid.filled_count(), 1);
    }

    #[test]
    fn test_offsets_tried_in_order() {
        let mut grid = Grid::from_columns(&[&[0, 0], &[0, 1]]);
        grid.clear(Coord::new(0, 0));
        grid.clear(Coord::new(1, 0));

        let diagonal_first = Move::new(0, vec![(-1, -1), (0, -1)]);
        let dest = diagonal_first.apply(&mut grid, Coord::new(1, 1), None);

        assert_eq!(dest, Some(Coord::new(0, 0)));
        assert!(grid.is_vacant(Coord::new(1, 0)));
    }
}
