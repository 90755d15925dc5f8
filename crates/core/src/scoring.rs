//! Scoring module - score accrual and bomb hazards
//!
//! Every exploded cell is worth a fixed amount. Each time the accrued score
//! passes another multiple of the bomb cost, one bomb becomes due; the fill
//! cascade reserves due bombs optimistically and hands back whatever it
//! could not place. Every accepted player rotation ticks all live bomb
//! timers once, and a timer reaching zero ends the session.

use log::warn;

use crate::grid::Grid;
use crate::types::{BombElement, BombOutcome, BombState, Cell, ExplodeOutcome};

/// Points for an explosion of `cells` cells
pub fn calculate_explosion_score(cells: usize, cell_value: u32) -> u32 {
    (cells as u32).saturating_mul(cell_value)
}

/// Bombs that `score` can pay for beyond the `dropped` already paid for
pub fn calculate_ready_bombs(score: u32, dropped: u32, bomb_cost: u32) -> u32 {
    let unused = score.saturating_sub(dropped.saturating_mul(bomb_cost));
    if unused < bomb_cost {
        return 0;
    }
    unused / bomb_cost
}

/// Running score and bomb budget of one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreTracker {
    score: u32,
    dropped_bombs: u32,
    bomb_cost: u32,
    cell_value: u32,
}

impl ScoreTracker {
    pub fn new(bomb_cost: u32, cell_value: u32) -> Self {
        Self {
            score: 0,
            dropped_bombs: 0,
            bomb_cost,
            cell_value,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Bombs paid for so far, including outstanding reservations
    pub fn dropped_bombs(&self) -> u32 {
        self.dropped_bombs
    }

    /// Credit a valid outcome; invalid outcomes are ignored
    pub fn record(&mut self, outcome: &ExplodeOutcome) {
        if !outcome.valid {
            return;
        }
        let gained = calculate_explosion_score(outcome.exploded_cells(), self.cell_value);
        self.score = self.score.saturating_add(gained);
    }

    /// Reserve and return every bomb the unused score can pay for
    pub fn take_ready_bombs(&mut self) -> u32 {
        let ready = calculate_ready_bombs(self.score, self.dropped_bombs, self.bomb_cost);
        self.dropped_bombs += ready;
        ready
    }

    /// Hand back reserved bombs that could not be placed
    pub fn return_bombs(&mut self, unused: u32) {
        self.dropped_bombs = self.dropped_bombs.saturating_sub(unused);
    }

    /// Tick every bomb timer on the board once.
    ///
    /// The whole board is always scanned: every timer decrements exactly
    /// once even after one has already expired.
    pub fn tick_bombs(&self, grid: &mut Grid) -> BombOutcome {
        let mut outcome = BombOutcome::default();
        let coords: Vec<_> = grid.coords().collect();
        for coord in coords {
            let Some(cell) = grid.get(coord) else {
                continue;
            };
            let Some(bomb) = cell.bomb else {
                continue;
            };

            let moves_left = bomb.moves_left.saturating_sub(1);
            if moves_left == 0 {
                warn!("bomb expired at ({}, {})", coord.x, coord.y);
                outcome.exploded = true;
            }
            grid.set(
                coord,
                Cell {
                    bomb: Some(BombState { moves_left }),
                    ..cell
                },
            );
            outcome.bombs.push(BombElement { coord, moves_left });
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, Coord, ExplodeElement, Pattern};

    fn outcome(valid: bool, cells: usize) -> ExplodeOutcome {
        let positions = (0..cells as i32).map(|y| Coord::new(0, y)).collect();
        ExplodeOutcome {
            valid,
            pass_index: if valid { 1 } else { 0 },
            explode_elements: vec![ExplodeElement {
                color: Color(0),
                pattern: Pattern::Triple,
                positions,
            }],
            bomb_outcome: BombOutcome::default(),
        }
    }

    #[test]
    fn test_explosion_score() {
        assert_eq!(calculate_explosion_score(0, 5), 0);
        assert_eq!(calculate_explosion_score(3, 5), 15);
        assert_eq!(calculate_explosion_score(9, 5), 45);
    }

    #[test]
    fn test_ready_bombs() {
        assert_eq!(calculate_ready_bombs(999, 0, 1000), 0);
        assert_eq!(calculate_ready_bombs(1000, 0, 1000), 1);
        assert_eq!(calculate_ready_bombs(2500, 0, 1000), 2);
        assert_eq!(calculate_ready_bombs(2500, 2, 1000), 0);
        assert_eq!(calculate_ready_bombs(3000, 2, 1000), 1);
    }

    #[test]
    fn test_record_ignores_invalid() {
        let mut tracker = ScoreTracker::new(1000, 5);
        tracker.record(&outcome(false, 3));
        assert_eq!(tracker.score(), 0);

        tracker.record(&outcome(true, 3));
        tracker.record(&outcome(true, 6));
        assert_eq!(tracker.score(), 45);
    }

    #[test]
    fn test_reservation_and_rollback() {
        let mut tracker = ScoreTracker::new(10, 5);
        tracker.record(&outcome(true, 5)); // 25 points

        assert_eq!(tracker.take_ready_bombs(), 2);
        assert_eq!(tracker.dropped_bombs(), 2);
        assert_eq!(tracker.take_ready_bombs(), 0);

        tracker.return_bombs(1);
        assert_eq!(tracker.dropped_bombs(), 1);
        assert_eq!(tracker.take_ready_bombs(), 1);
        assert!(tracker.dropped_bombs() * 10 <= tracker.score());
    }

    #[test]
    fn test_tick_bombs_decrements_all() {
        let mut grid = Grid::from_columns(&[&[0, 1], &[1, 0]]);
        grid.set(Coord::new(0, 1), Cell::with_bomb(Color(1), 1));
        grid.set(Coord::new(1, 1), Cell::with_bomb(Color(0), 5));
        let tracker = ScoreTracker::new(1000, 5);

        let result = tracker.tick_bombs(&mut grid);

        assert!(result.exploded);
        assert_eq!(
            result.bombs,
            vec![
                BombElement {
                    coord: Coord::new(0, 1),
                    moves_left: 0
                },
                BombElement {
                    coord: Coord::new(1, 1),
                    moves_left: 4
                },
            ]
        );
        // Color is preserved, only the timer changes.
        assert_eq!(
            grid.get(Coord::new(1, 1)),
            Some(Cell::with_bomb(Color(0), 4))
        );
    }

    #[test]
    fn test_tick_bombs_without_bombs() {
        let mut grid = Grid::from_columns(&[&[0, 1], &[1, 0]]);
        let before = grid.clone();
        let result = ScoreTracker::new(1000, 5).tick_bombs(&mut grid);
        assert_eq!(result, BombOutcome::default());
        assert_eq!(grid, before);
    }
}
