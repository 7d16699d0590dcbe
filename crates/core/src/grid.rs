//! GridWorld - fixed-size cell grid and coordinate arithmetic
//!
//! Snake uses the grid as a torus (`wrap`), Block-Stacker as a bounded box
//! (`in_bounds`). The grid owns no cell storage of its own; engines keep their
//! entities and use it only for coordinate rules.

use thiserror::Error;

use crate::types::{Coord, Direction, SNAKE_HEIGHT, SNAKE_WIDTH, STACKER_HEIGHT, STACKER_WIDTH};

/// Invalid grid configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    ZeroDimension { width: u16, height: u16 },
    #[error("grid {width}x{height} is smaller than the required {min_width}x{min_height}")]
    TooSmall {
        width: u16,
        height: u16,
        min_width: u16,
        min_height: u16,
    },
}

/// Grid dimensions, fixed for the lifetime of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridWorld {
    width: u16,
    height: u16,
}

/// Default 20x20 Snake grid
pub const SNAKE_GRID: GridWorld = GridWorld {
    width: SNAKE_WIDTH,
    height: SNAKE_HEIGHT,
};

/// Default 10x20 Block-Stacker grid
pub const STACKER_GRID: GridWorld = GridWorld {
    width: STACKER_WIDTH,
    height: STACKER_HEIGHT,
};

impl GridWorld {
    pub fn new(width: u16, height: u16) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::ZeroDimension { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Total number of cells
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Toroidal wrap: each axis taken modulo its dimension.
    /// Negative coordinates wrap to the far edge.
    pub fn wrap(&self, coord: Coord) -> Coord {
        Coord::new(
            coord.x.rem_euclid(self.width as i32),
            coord.y.rem_euclid(self.height as i32),
        )
    }

    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.x >= 0 && coord.y >= 0 && coord.x < self.width as i32 && coord.y < self.height as i32
    }

    /// Wrapped neighbour one step in `direction`
    pub fn step(&self, coord: Coord, direction: Direction) -> Coord {
        self.wrap(coord.offset(direction))
    }

    /// Row-major index of an in-bounds coordinate
    #[inline(always)]
    pub fn index(&self, coord: Coord) -> Option<usize> {
        if !self.in_bounds(coord) {
            return None;
        }
        Some(coord.y as usize * self.width as usize + coord.x as usize)
    }

    /// Inverse of [`GridWorld::index`]
    pub fn coord_at(&self, index: usize) -> Coord {
        let w = self.width as usize;
        Coord::new((index % w) as i32, (index / w) as i32)
    }

    /// All coordinates in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.area()).map(move |i| self.coord_at(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_dimension_rejected() {
        assert_eq!(
            GridWorld::new(0, 5),
            Err(GridError::ZeroDimension { width: 0, height: 5 })
        );
        assert!(GridWorld::new(5, 0).is_err());
        assert!(GridWorld::new(1, 1).is_ok());
    }

    #[test]
    fn test_wrap_every_edge() {
        let grid = SNAKE_GRID;
        assert_eq!(grid.wrap(Coord::new(20, 5)), Coord::new(0, 5));
        assert_eq!(grid.wrap(Coord::new(-1, 5)), Coord::new(19, 5));
        assert_eq!(grid.wrap(Coord::new(5, 20)), Coord::new(5, 0));
        assert_eq!(grid.wrap(Coord::new(5, -1)), Coord::new(5, 19));
        assert_eq!(grid.wrap(Coord::new(7, 8)), Coord::new(7, 8));
    }

    #[test]
    fn test_in_bounds() {
        let grid = STACKER_GRID;
        assert!(grid.in_bounds(Coord::new(0, 0)));
        assert!(grid.in_bounds(Coord::new(9, 19)));
        assert!(!grid.in_bounds(Coord::new(10, 0)));
        assert!(!grid.in_bounds(Coord::new(0, 20)));
        assert!(!grid.in_bounds(Coord::new(-1, 3)));
    }

    #[test]
    fn test_index_roundtrip_and_order() {
        let grid = GridWorld::new(3, 2).unwrap();
        let all: Vec<Coord> = grid.cells().collect();
        assert_eq!(all.len(), 6);
        assert_eq!(all[0], Coord::new(0, 0));
        assert_eq!(all[3], Coord::new(0, 1));
        assert_eq!(grid.index(Coord::new(2, 1)), Some(5));
        assert_eq!(grid.index(Coord::new(3, 0)), None);
    }
}
