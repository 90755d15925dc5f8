//! Grid module - owns the hexagonal board cells
//!
//! The grid is a `width x height` array of cells stored flat, column-major
//! (`x * height + y`), so that scanning a column bottom to top walks
//! contiguous memory. Coordinates are `(x, y)` with `y = 0` at the bottom.
//!
//! Cloning a grid yields a fully independent copy; the engine relies on
//! this to evaluate rotations speculatively before committing them.

use crate::types::{BombElement, Cell, Color, Coord};

/// The hexagon board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u8,
    height: u8,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with every cell empty
    pub fn new(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::EMPTY; width as usize * height as usize],
        }
    }

    /// Create a grid by asking `f` for the content of every coordinate
    pub fn from_fn(width: u8, height: u8, mut f: impl FnMut(Coord) -> Cell) -> Self {
        let mut grid = Self::new(width, height);
        for coord in grid.coords() {
            grid.set(coord, f(coord));
        }
        grid
    }

    /// Create a grid from colors given column by column (`columns[x][y]`)
    pub fn from_columns(columns: &[&[u8]]) -> Self {
        let width = columns.len() as u8;
        let height = columns.first().map_or(0, |c| c.len()) as u8;
        Self::from_fn(width, height, |c| {
            columns
                .get(c.x as usize)
                .and_then(|col| col.get(c.y as usize))
                .map_or(Cell::EMPTY, |&color| Cell::new(Color(color)))
        })
    }

    #[inline(always)]
    fn index(&self, coord: Coord) -> Option<usize> {
        if !self.contains(coord) {
            return None;
        }
        Some(coord.x as usize * self.height as usize + coord.y as usize)
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Check if the coordinate lies on the board
    pub fn contains(&self, coord: Coord) -> bool {
        coord.x >= 0 && coord.x < self.width as i32 && coord.y >= 0 && coord.y < self.height as i32
    }

    /// Get the cell at `coord`
    /// Returns None if out of bounds
    pub fn get(&self, coord: Coord) -> Option<Cell> {
        self.index(coord).map(|idx| self.cells[idx])
    }

    /// Color at `coord`; `None` both off-board and for empty cells
    pub fn color(&self, coord: Coord) -> Option<Color> {
        self.get(coord).and_then(|cell| cell.color)
    }

    /// Set the cell at `coord`
    /// Returns false if out of bounds
    pub fn set(&mut self, coord: Coord, cell: Cell) -> bool {
        match self.index(coord) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Empty the cell at `coord`
    pub fn clear(&mut self, coord: Coord) -> bool {
        self.set(coord, Cell::EMPTY)
    }

    /// Check if the coordinate is on the board and empty
    pub fn is_vacant(&self, coord: Coord) -> bool {
        matches!(self.get(coord), Some(cell) if cell.is_empty())
    }

    /// Swap the contents of two on-board cells
    pub fn swap(&mut self, a: Coord, b: Coord) -> bool {
        match (self.index(a), self.index(b)) {
            (Some(ia), Some(ib)) => {
                self.cells.swap(ia, ib);
                true
            }
            _ => false,
        }
    }

    /// Every coordinate in scan order: columns left to right, each bottom to top
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let (width, height) = (self.width as i32, self.height as i32);
        (0..width).flat_map(move |x| (0..height).map(move |y| Coord::new(x, y)))
    }

    /// Number of non-empty cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// Every bomb currently on the board, in scan order
    pub fn bombs(&self) -> Vec<BombElement> {
        self.coords()
            .filter_map(|coord| {
                let bomb = self.get(coord)?.bomb?;
                Some(BombElement {
                    coord,
                    moves_left: bomb.moves_left,
                })
            })
            .collect()
    }

    /// Get a reference to the internal cells (column-major)
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}
