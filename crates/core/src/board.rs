//! Board module - the Block-Stacker playfield
//!
//! A `width x height` grid where each cell is empty or holds the kind of the
//! piece that locked there. Uses a flat row-major vector for cache locality.
//! Coordinates: (x, y) with x growing to the right and y growing downward;
//! row 0 is the top of the well.

use crate::grid::GridWorld;
use crate::types::{Cell, Coord, PieceKind};

/// Result of testing a set of cells against the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Fits,
    OutOfBounds,
    Overlaps,
}

/// Explicit result of a move or rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Applied,
    RejectedBounds,
    RejectedOverlap,
    /// No active piece (the run is not running)
    Inactive,
}

impl MoveOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, MoveOutcome::Applied)
    }
}

impl From<Placement> for MoveOutcome {
    fn from(p: Placement) -> Self {
        match p {
            Placement::Fits => MoveOutcome::Applied,
            Placement::OutOfBounds => MoveOutcome::RejectedBounds,
            Placement::Overlaps => MoveOutcome::RejectedOverlap,
        }
    }
}

/// The locked-cell matrix
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    grid: GridWorld,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(grid: GridWorld) -> Self {
        Self {
            grid,
            cells: vec![None; grid.area()],
        }
    }

    pub fn grid(&self) -> GridWorld {
        self.grid
    }

    pub fn width(&self) -> u16 {
        self.grid.width()
    }

    pub fn height(&self) -> u16 {
        self.grid.height()
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.grid.index(Coord::new(x, y)).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.grid.index(Coord::new(x, y)) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is valid (within bounds and empty)
    pub fn is_valid(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Test absolute cell coordinates. Bounds are checked before overlap, so a
    /// placement that is both out of bounds and overlapping reports bounds.
    pub fn check(&self, cells: &[Coord]) -> Placement {
        if cells.iter().any(|c| !self.grid.in_bounds(*c)) {
            return Placement::OutOfBounds;
        }
        if cells.iter().any(|c| self.is_occupied(c.x, c.y)) {
            return Placement::Overlaps;
        }
        Placement::Fits
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height() as usize {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    pub fn is_row_empty(&self, y: usize) -> bool {
        y < self.height() as usize && self.row(y).iter().all(|cell| cell.is_none())
    }

    /// Cells of row `y` (must be in range)
    pub fn row(&self, y: usize) -> &[Cell] {
        let width = self.width() as usize;
        &self.cells[y * width..(y + 1) * width]
    }

    /// Remove row `y`, shift all rows above down by one and clear the top row.
    /// Returns false if `y` is out of range.
    pub fn clear_row(&mut self, y: usize) -> bool {
        if y >= self.height() as usize {
            return false;
        }

        let width = self.width() as usize;

        // copy_within handles the overlapping ranges
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            let dst_start = row * width;
            self.cells
                .copy_within(src_start..src_start + width, dst_start);
        }

        for cell in &mut self.cells[0..width] {
            *cell = None;
        }

        true
    }

    /// Clear all full rows, scanning bottom to top.
    ///
    /// After a removal the same index is scanned again, since the row above has
    /// shifted into it. Returns the cleared rows' indices as they were before
    /// the clear, bottom first.
    pub fn clear_full_rows(&mut self) -> Vec<usize> {
        let mut cleared = Vec::new();
        let mut y = self.height() as usize;

        while y > 0 {
            let row = y - 1;
            if self.is_row_full(row) {
                self.clear_row(row);
                // Rows above `row` have moved down once per earlier removal.
                cleared.push(row - cleared.len());
            } else {
                y -= 1;
            }
        }

        cleared
    }

    /// Write a piece's cells with its kind.
    /// Returns false (writing nothing) if any cell is out of bounds or occupied.
    pub fn lock_cells(&mut self, cells: &[Coord], kind: PieceKind) -> bool {
        if self.check(cells) != Placement::Fits {
            return false;
        }

        for c in cells {
            self.set(c.x, c.y, Some(kind));
        }

        true
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// Build from text rows, top first: `.` is empty, a piece letter is filled.
    /// Missing rows are padded at the top; short rows are padded on the right.
    pub fn from_rows(grid: GridWorld, rows: &[&str]) -> Self {
        let mut board = Self::new(grid);
        let height = grid.height() as usize;
        let skip = rows.len().saturating_sub(height);
        let top = height - (rows.len() - skip);
        for (i, line) in rows.iter().skip(skip).enumerate() {
            for (x, ch) in line.chars().enumerate() {
                let cell = PieceKind::from_str(&ch.to_string());
                board.set(x as i32, (top + i) as i32, cell);
            }
        }
        board
    }

    /// Render as text rows, top first, using the same alphabet as [`Board::from_rows`]
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.height() as usize)
            .map(|y| {
                self.row(y)
                    .iter()
                    .map(|c| match c {
                        Some(kind) => kind.as_str().chars().next().unwrap_or('#'),
                        None => '.',
                    })
                    .collect()
            })
            .collect()
    }
}
