//! Pieces module - tetromino shape matrices and rotation
//!
//! Each piece is a small binary matrix. Rotation is pure matrix algebra: a
//! clockwise quarter turn transposes the matrix and reverses each row, so a
//! 1x4 line becomes 4x1 and four turns give back the original bits. The
//! rotation state (0-3) is not stored; it is recovered by comparing the
//! current matrix with the spawn matrix.
//!
//! Wall kicks are a fixed horizontal sequence (0, +1, -1) rather than SRS
//! tables.

use arrayvec::ArrayVec;

use crate::types::PieceKind;

/// Largest matrix side
pub const MAX_SHAPE_DIM: usize = 4;

/// Horizontal offsets tried, in order, when a rotation does not fit in place
pub const KICK_OFFSETS: [i32; 3] = [0, 1, -1];

/// Occupied cell offsets `(col, row)` relative to the matrix origin
pub type ShapeCells = ArrayVec<(i32, i32), { MAX_SHAPE_DIM * MAX_SHAPE_DIM }>;

/// Binary shape matrix, `rows x cols`, at most 4x4.
///
/// Unused bits outside `rows x cols` are always false, so derived equality is
/// bitwise matrix equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    bits: [[bool; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
}

impl Shape {
    /// Build from rows of 0/1. Rows longer than 4 or more than 4 rows are truncated.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let mut bits = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        let n_rows = rows.len().min(MAX_SHAPE_DIM);
        let mut n_cols = 0;
        for (r, row) in rows.iter().take(MAX_SHAPE_DIM).enumerate() {
            n_cols = n_cols.max(row.len().min(MAX_SHAPE_DIM));
            for (c, &v) in row.iter().take(MAX_SHAPE_DIM).enumerate() {
                bits[r][c] = v != 0;
            }
        }
        Self {
            rows: n_rows as u8,
            cols: n_cols as u8,
            bits,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows as usize
    }

    pub fn cols(&self) -> usize {
        self.cols as usize
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.rows() && col < self.cols() && self.bits[row][col]
    }

    /// Quarter turn clockwise: transpose, then reverse each row.
    /// `new[r][c] = old[rows - 1 - c][r]`
    pub fn rotated_cw(&self) -> Self {
        let mut bits = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        let rows = self.rows();
        for (r, row) in bits.iter_mut().enumerate().take(self.cols()) {
            for (c, bit) in row.iter_mut().enumerate().take(rows) {
                *bit = self.bits[rows - 1 - c][r];
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            bits,
        }
    }

    /// Occupied cells as `(col, row)` offsets, row-major
    pub fn cells(&self) -> ShapeCells {
        let mut out = ShapeCells::new();
        for r in 0..self.rows() {
            for c in 0..self.cols() {
                if self.bits[r][c] {
                    out.push((c as i32, r as i32));
                }
            }
        }
        out
    }

    /// Matrix as nested rows, for display and comparisons in tests
    pub fn to_matrix(&self) -> Vec<Vec<bool>> {
        (0..self.rows())
            .map(|r| (0..self.cols()).map(|c| self.bits[r][c]).collect())
            .collect()
    }
}

/// Spawn-orientation matrix for a piece kind
pub fn spawn_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::O => Shape::from_rows(&[&[1, 1], &[1, 1]]),
        PieceKind::I => Shape::from_rows(&[&[1, 1, 1, 1]]),
        PieceKind::T => Shape::from_rows(&[&[0, 1, 0], &[1, 1, 1]]),
        PieceKind::J => Shape::from_rows(&[&[1, 0, 0], &[1, 1, 1]]),
        PieceKind::L => Shape::from_rows(&[&[0, 0, 1], &[1, 1, 1]]),
        PieceKind::S => Shape::from_rows(&[&[0, 1, 1], &[1, 1, 0]]),
        PieceKind::Z => Shape::from_rows(&[&[1, 1, 0], &[0, 1, 1]]),
    }
}

/// Rotation state 0-3 of `shape` relative to the spawn matrix of `kind`.
///
/// Symmetric pieces report the smallest matching state (O is always 0).
/// Returns None if `shape` is not a rotation of `kind`.
pub fn rotation_index(kind: PieceKind, shape: &Shape) -> Option<u8> {
    let mut candidate = spawn_shape(kind);
    for state in 0..4u8 {
        if candidate == *shape {
            return Some(state);
        }
        candidate = candidate.rotated_cw();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_piece_has_four_cells() {
        for kind in PieceKind::ALL {
            assert_eq!(spawn_shape(kind).cells().len(), 4, "{:?}", kind);
        }
    }

    #[test]
    fn test_i_rotates_to_column() {
        let i = spawn_shape(PieceKind::I);
        let turned = i.rotated_cw();
        assert_eq!(turned.rows(), 4);
        assert_eq!(turned.cols(), 1);
        assert_eq!(turned.cells().as_slice(), &[(0, 0), (0, 1), (0, 2), (0, 3)]);
    }

    #[test]
    fn test_t_rotates_clockwise() {
        // .#.      #.
        // ###  ->  ##
        //          #.
        let turned = spawn_shape(PieceKind::T).rotated_cw();
        assert_eq!(
            turned.to_matrix(),
            vec![
                vec![true, false],
                vec![true, true],
                vec![true, false],
            ]
        );
    }

    #[test]
    fn test_rotation_index() {
        let j = spawn_shape(PieceKind::J);
        assert_eq!(rotation_index(PieceKind::J, &j), Some(0));
        assert_eq!(rotation_index(PieceKind::J, &j.rotated_cw()), Some(1));
        assert_eq!(
            rotation_index(PieceKind::J, &j.rotated_cw().rotated_cw().rotated_cw()),
            Some(3)
        );
        assert_eq!(rotation_index(PieceKind::L, &j), None);
        let o = spawn_shape(PieceKind::O);
        assert_eq!(rotation_index(PieceKind::O, &o.rotated_cw()), Some(0));
    }

    #[test]
    fn test_mirrored_pairs_differ() {
        assert_ne!(spawn_shape(PieceKind::J), spawn_shape(PieceKind::L));
        assert_ne!(spawn_shape(PieceKind::S), spawn_shape(PieceKind::Z));
    }
}
