//! Property tests for grid arithmetic and shape rotation.

use proptest::prelude::*;

use arcade_core::grid::GridWorld;
use arcade_core::pieces::{rotation_index, spawn_shape};
use arcade_core::types::{Coord, Direction, PieceKind};

fn kind() -> impl Strategy<Value = PieceKind> {
    (0usize..7).prop_map(|i| PieceKind::ALL[i])
}

proptest! {
    #[test]
    fn wrap_always_lands_in_bounds(
        w in 1u16..64,
        h in 1u16..64,
        x in -1_000i32..1_000,
        y in -1_000i32..1_000,
    ) {
        let grid = GridWorld::new(w, h).unwrap();
        let wrapped = grid.wrap(Coord::new(x, y));
        prop_assert!(grid.in_bounds(wrapped));
        prop_assert_eq!(wrapped.x, x.rem_euclid(w as i32));
        prop_assert_eq!(wrapped.y, y.rem_euclid(h as i32));
    }

    #[test]
    fn step_off_an_edge_enters_the_opposite_edge(
        w in 1u16..32,
        h in 1u16..32,
        dir_idx in 0usize..4,
    ) {
        let grid = GridWorld::new(w, h).unwrap();
        let dir = Direction::ALL[dir_idx];
        let (max_x, max_y) = (w as i32 - 1, h as i32 - 1);
        let (from, to) = match dir {
            Direction::Right => (Coord::new(max_x, 0), Coord::new(0, 0)),
            Direction::Left => (Coord::new(0, 0), Coord::new(max_x, 0)),
            Direction::Down => (Coord::new(0, max_y), Coord::new(0, 0)),
            Direction::Up => (Coord::new(0, 0), Coord::new(0, max_y)),
        };
        prop_assert_eq!(grid.step(from, dir), to);
    }

    #[test]
    fn four_quarter_turns_are_identity(kind in kind(), turns in 0usize..12) {
        let start = spawn_shape(kind);
        let mut shape = start;
        for _ in 0..turns * 4 {
            shape = shape.rotated_cw();
        }
        prop_assert_eq!(shape, start);
    }

    #[test]
    fn rotation_keeps_four_cells(kind in kind(), turns in 0usize..8) {
        let mut shape = spawn_shape(kind);
        for _ in 0..turns {
            shape = shape.rotated_cw();
        }
        prop_assert_eq!(shape.cells().len(), 4);
        prop_assert!(rotation_index(kind, &shape).is_some());
        prop_assert!(shape.rows() * shape.cols() >= 4);
    }
}
