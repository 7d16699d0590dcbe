//! Block-Stacker engine - falling tetrominoes over a bounded board
//!
//! The engine owns the locked-cell board, the active piece and the counters
//! for one run. Moves and rotations mutate the run immediately and return an
//! explicit [`MoveOutcome`]; gravity runs on [`StackerEngine::tick`]. The only
//! terminal condition is a freshly spawned piece that does not fit.
//!
//! Pieces are drawn uniformly from all seven kinds on every spawn. There is no
//! bag, so repeats and droughts happen.

use arrayvec::ArrayVec;

use crate::board::{Board, MoveOutcome, Placement};
use crate::grid::{GridError, GridWorld, STACKER_GRID};
use crate::pieces::{rotation_index, spawn_shape, Shape, KICK_OFFSETS, MAX_SHAPE_DIM};
use crate::rng::{RandomSource, SimpleRng};
use crate::router::{route_stacker, Rejection, Routed, StackerCommand};
use crate::scoring::{
    calculate_drop_score, calculate_level, calculate_line_score, gravity_interval_ms,
};
use crate::types::{Coord, GamePhase, PieceKind, RawCommand, HARD_DROP_BONUS};

/// Smallest board every piece can spawn and rotate on
pub const MIN_STACKER_WIDTH: u16 = 4;
pub const MIN_STACKER_HEIGHT: u16 = 2;

/// Tunables for a Block-Stacker run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackerConfig {
    grid: GridWorld,
    /// Points per cell travelled during a hard drop
    pub hard_drop_bonus: u32,
}

impl Default for StackerConfig {
    fn default() -> Self {
        Self {
            grid: STACKER_GRID,
            hard_drop_bonus: HARD_DROP_BONUS,
        }
    }
}

impl StackerConfig {
    /// Default rules on a custom board size
    pub fn with_size(width: u16, height: u16) -> Result<Self, GridError> {
        let grid = GridWorld::new(width, height)?;
        check_size(grid)?;
        Ok(Self {
            grid,
            ..Self::default()
        })
    }

    pub fn grid(&self) -> GridWorld {
        self.grid
    }
}

fn check_size(grid: GridWorld) -> Result<(), GridError> {
    let (width, height) = (grid.width(), grid.height());
    if width < MIN_STACKER_WIDTH || height < MIN_STACKER_HEIGHT {
        return Err(GridError::TooSmall {
            width,
            height,
            min_width: MIN_STACKER_WIDTH,
            min_height: MIN_STACKER_HEIGHT,
        });
    }
    Ok(())
}

/// Absolute cell positions of a piece
pub type PieceCells = ArrayVec<Coord, { MAX_SHAPE_DIM * MAX_SHAPE_DIM }>;

/// Active falling piece: a shape matrix anchored at its top-left origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub origin: Coord,
}

impl Piece {
    /// Spawn orientation, horizontally centred on row 0
    pub fn spawn(kind: PieceKind, grid: GridWorld) -> Self {
        let shape = spawn_shape(kind);
        let x = (grid.width() as i32 - shape.cols() as i32) / 2;
        Self {
            kind,
            shape,
            origin: Coord::new(x.max(0), 0),
        }
    }

    pub fn cells(&self) -> PieceCells {
        self.shape
            .cells()
            .iter()
            .map(|&(dx, dy)| self.origin.translate(dx, dy))
            .collect()
    }

    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            origin: self.origin.translate(dx, dy),
            ..*self
        }
    }

    /// Same origin, shape turned a quarter clockwise
    pub fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotated_cw(),
            ..*self
        }
    }

    /// Rotation state 0-3 derived from the shape
    pub fn rotation(&self) -> u8 {
        rotation_index(self.kind, &self.shape).unwrap_or(0)
    }
}

/// What the most recent lock did
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LockReport {
    /// Cleared row indices as they were before the clear, bottom first
    pub cleared_rows: Vec<usize>,
    /// Line-clear points awarded (hard drop bonus excluded)
    pub points: u32,
    /// Level the points were multiplied by
    pub level: u32,
    /// The follow-up spawn failed and the run ended
    pub game_over: bool,
}

/// What a gravity tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackerTick {
    /// Not running; nothing changed
    Idle,
    /// Piece moved down one row
    Fell,
    /// Piece could not fall and was locked
    Locked,
}

/// A single Block-Stacker run and its random source
#[derive(Debug, Clone)]
pub struct StackerEngine<R = SimpleRng> {
    config: StackerConfig,
    rng: R,
    phase: GamePhase,
    board: Board,
    active: Option<Piece>,
    score: u32,
    lines_cleared: u32,
    level: u32,
    pieces_locked: u32,
    last_lock: Option<LockReport>,
}

impl StackerEngine<SimpleRng> {
    /// Default 10x20 run with a seeded LCG
    pub fn with_seed(seed: u32) -> Self {
        Self::new(StackerConfig::default(), SimpleRng::new(seed))
    }
}

impl<R: RandomSource> StackerEngine<R> {
    pub fn new(config: StackerConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            phase: GamePhase::Idle,
            board: Board::new(config.grid),
            active: None,
            score: 0,
            lines_cleared: 0,
            level: 1,
            pieces_locked: 0,
            last_lock: None,
        }
    }

    /// Clear the board, reset counters and spawn the first piece
    pub fn start(&mut self) {
        self.reset_with(Board::new(self.config.grid));
    }

    /// Start a run on a pre-filled board (puzzle or garbage setups).
    ///
    /// The board's dimensions replace the configured grid and must be at least
    /// [`MIN_STACKER_WIDTH`] x [`MIN_STACKER_HEIGHT`]; a smaller board is
    /// refused and the engine is left untouched. Full rows are left as they
    /// are until the first lock clears them.
    pub fn start_with_board(&mut self, board: Board) -> Result<(), GridError> {
        check_size(board.grid())?;
        self.reset_with(board);
        Ok(())
    }

    fn reset_with(&mut self, board: Board) {
        self.config.grid = board.grid();
        self.board = board;
        self.active = None;
        self.score = 0;
        self.lines_cleared = 0;
        self.level = 1;
        self.pieces_locked = 0;
        self.last_lock = None;
        self.phase = GamePhase::Running;
        self.spawn_piece();
    }

    /// Route and apply a raw command. Session commands are returned untouched.
    pub fn apply(&mut self, raw: RawCommand) -> Result<Routed<MoveOutcome>, Rejection> {
        match route_stacker(raw, self.phase.is_running())? {
            Routed::Engine(cmd) => Ok(Routed::Engine(self.execute(cmd))),
            Routed::Session(cmd) => Ok(Routed::Session(cmd)),
        }
    }

    /// Apply a routed command
    pub fn execute(&mut self, cmd: StackerCommand) -> MoveOutcome {
        match cmd {
            StackerCommand::MoveLeft => self.move_left(),
            StackerCommand::MoveRight => self.move_right(),
            StackerCommand::SoftDrop => self.soft_drop(),
            StackerCommand::HardDrop => self.hard_drop(),
            StackerCommand::Rotate => self.rotate(),
        }
    }

    pub fn move_left(&mut self) -> MoveOutcome {
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> MoveOutcome {
        self.try_move(1, 0)
    }

    /// One row down. A blocked soft drop does not lock; gravity does that.
    pub fn soft_drop(&mut self) -> MoveOutcome {
        self.try_move(0, 1)
    }

    fn try_move(&mut self, dx: i32, dy: i32) -> MoveOutcome {
        let Some(active) = self.active else {
            return MoveOutcome::Inactive;
        };

        let moved = active.translated(dx, dy);
        let placement = self.board.check(&moved.cells());
        if placement == Placement::Fits {
            self.active = Some(moved);
        }
        placement.into()
    }

    /// Quarter turn clockwise with horizontal wall kicks (0, +1, -1).
    ///
    /// On failure the piece keeps its shape and position. The rejection is
    /// `RejectedOverlap` if any kick hit a locked cell, else `RejectedBounds`.
    pub fn rotate(&mut self) -> MoveOutcome {
        let Some(active) = self.active else {
            return MoveOutcome::Inactive;
        };

        let candidate = active.rotated();
        let mut hit_overlap = false;

        for &dx in KICK_OFFSETS.iter() {
            let kicked = candidate.translated(dx, 0);
            match self.board.check(&kicked.cells()) {
                Placement::Fits => {
                    self.active = Some(kicked);
                    return MoveOutcome::Applied;
                }
                Placement::Overlaps => hit_overlap = true,
                Placement::OutOfBounds => {}
            }
        }

        if hit_overlap {
            MoveOutcome::RejectedOverlap
        } else {
            MoveOutcome::RejectedBounds
        }
    }

    /// Drop to the lowest valid row, award the per-cell bonus, then lock
    pub fn hard_drop(&mut self) -> MoveOutcome {
        let Some(active) = self.active else {
            return MoveOutcome::Inactive;
        };

        let distance = self.drop_distance(&active);
        self.active = Some(active.translated(0, distance as i32));
        self.score += calculate_drop_score(distance, self.config.hard_drop_bonus);

        self.lock_active();
        MoveOutcome::Applied
    }

    /// Gravity step: fall one row, or lock if the piece is resting
    pub fn tick(&mut self) -> StackerTick {
        if !self.phase.is_running() || self.active.is_none() {
            return StackerTick::Idle;
        }

        if self.try_move(0, 1).is_applied() {
            StackerTick::Fell
        } else {
            self.lock_active();
            StackerTick::Locked
        }
    }

    /// Pure form of [`StackerEngine::tick`]: consume the run, return the next one
    pub fn advance(mut self) -> Self {
        self.tick();
        self
    }

    /// Rows the piece can fall before it would be blocked
    fn drop_distance(&self, piece: &Piece) -> u32 {
        let mut distance = 0;
        while self.board.check(&piece.translated(0, distance + 1).cells()) == Placement::Fits {
            distance += 1;
        }
        distance as u32
    }

    /// Write the active piece into the board, clear lines, score, spawn next
    fn lock_active(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        // Placement was validated on every move, so this cannot fail.
        self.board.lock_cells(&active.cells(), active.kind);
        self.pieces_locked += 1;

        let cleared_rows = self.board.clear_full_rows();
        let level = self.level;
        let points = calculate_line_score(cleared_rows.len(), level);

        self.score += points;
        self.lines_cleared += cleared_rows.len() as u32;
        self.level = calculate_level(self.lines_cleared);

        let spawned = self.spawn_piece();

        self.last_lock = Some(LockReport {
            cleared_rows,
            points,
            level,
            game_over: !spawned,
        });
    }

    fn draw_kind(&mut self) -> PieceKind {
        let idx = self.rng.next_below(PieceKind::ALL.len() as u32) as usize;
        PieceKind::ALL[idx]
    }

    /// Spawn a uniformly drawn piece. Returns false (and ends the run) if it does not fit.
    fn spawn_piece(&mut self) -> bool {
        let kind = self.draw_kind();
        let piece = Piece::spawn(kind, self.config.grid);

        if self.board.check(&piece.cells()) != Placement::Fits {
            self.active = None;
            self.phase = GamePhase::GameOver;
            return false;
        }

        self.active = Some(piece);
        true
    }

    /// Where the active piece would land
    pub fn ghost(&self) -> Option<Piece> {
        let active = self.active?;
        Some(active.translated(0, self.drop_distance(&active) as i32))
    }

    /// Row of the ghost piece origin
    pub fn ghost_y(&self) -> Option<i32> {
        self.ghost().map(|p| p.origin.y)
    }

    pub fn gravity_interval_ms(&self) -> u32 {
        gravity_interval_ms(self.level)
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase.is_running()
    }

    pub fn game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn last_lock(&self) -> Option<&LockReport> {
        self.last_lock.as_ref()
    }

    pub fn config(&self) -> &StackerConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRng;

    /// Index into `PieceKind::ALL`
    fn idx(kind: PieceKind) -> u32 {
        PieceKind::ALL.iter().position(|k| *k == kind).unwrap() as u32
    }

    fn scripted(kinds: &[PieceKind]) -> StackerEngine<ScriptedRng> {
        let values = kinds.iter().map(|k| idx(*k)).collect();
        StackerEngine::new(StackerConfig::default(), ScriptedRng::new(values))
    }

    #[test]
    fn test_new_engine_is_idle() {
        let mut engine = StackerEngine::with_seed(12345);
        assert_eq!(engine.phase(), GamePhase::Idle);
        assert!(engine.active().is_none());
        assert_eq!(engine.level(), 1);
        assert_eq!(engine.move_left(), MoveOutcome::Inactive);
        assert_eq!(engine.hard_drop(), MoveOutcome::Inactive);
        assert_eq!(engine.tick(), StackerTick::Idle);
    }

    #[test]
    fn test_spawn_is_centred_on_top_row() {
        let mut engine = scripted(&[PieceKind::T]);
        engine.start();
        let piece = engine.active().unwrap();
        assert_eq!(piece.kind, PieceKind::T);
        assert_eq!(piece.origin, Coord::new(3, 0));

        let mut engine = scripted(&[PieceKind::O]);
        engine.start();
        assert_eq!(engine.active().unwrap().origin, Coord::new(4, 0));
    }

    #[test]
    fn test_move_against_wall_is_rejected_bounds() {
        let mut engine = scripted(&[PieceKind::I]);
        engine.start();
        // I spawns at x=3 and is 4 wide
        for _ in 0..3 {
            assert_eq!(engine.move_left(), MoveOutcome::Applied);
        }
        let before = engine.active();
        assert_eq!(engine.move_left(), MoveOutcome::RejectedBounds);
        assert_eq!(engine.active(), before);
    }

    #[test]
    fn test_move_into_stack_is_rejected_overlap() {
        let mut board = Board::new(STACKER_GRID);
        board.set(2, 0, Some(PieceKind::Z));
        let mut engine = scripted(&[PieceKind::O]);
        engine.start_with_board(board).unwrap();
        // O at x=4..5; slide to x=3..4, then x=2 is blocked
        assert_eq!(engine.move_left(), MoveOutcome::Applied);
        assert_eq!(engine.move_left(), MoveOutcome::RejectedOverlap);
        assert_eq!(engine.active().unwrap().origin.x, 3);
    }

    #[test]
    fn test_rotation_kicks_left_off_right_wall() {
        let mut engine = scripted(&[PieceKind::T]);
        engine.start();
        assert_eq!(engine.rotate(), MoveOutcome::Applied); // 3x2, origin x=3
        while engine.move_right().is_applied() {}
        assert_eq!(engine.active().unwrap().origin.x, 8);

        // 2x3 does not fit at x=8 or x=9; the -1 kick puts it at x=7
        assert_eq!(engine.rotate(), MoveOutcome::Applied);
        let piece = engine.active().unwrap();
        assert_eq!(piece.origin.x, 7);
        assert_eq!(piece.rotation(), 2);
    }

    #[test]
    fn test_rotation_kicks_right_past_obstacle() {
        let mut board = Board::new(STACKER_GRID);
        board.set(1, 0, Some(PieceKind::S));
        let mut engine = scripted(&[PieceKind::J]);
        engine.start_with_board(board).unwrap();

        for _ in 0..3 {
            assert_eq!(engine.rotate(), MoveOutcome::Applied);
        }
        assert_eq!(engine.move_left(), MoveOutcome::Applied);
        assert_eq!(engine.move_left(), MoveOutcome::Applied);
        assert_eq!(engine.active().unwrap().origin, Coord::new(1, 0));

        // Spawn orientation would cover (1, 0); the +1 kick clears it
        assert_eq!(engine.rotate(), MoveOutcome::Applied);
        let piece = engine.active().unwrap();
        assert_eq!(piece.origin, Coord::new(2, 0));
        assert_eq!(piece.rotation(), 0);
    }

    #[test]
    fn test_failed_rotation_keeps_piece() {
        // Vertical I flush against the right wall cannot turn flat
        let mut engine = scripted(&[PieceKind::I]);
        engine.start();
        assert_eq!(engine.rotate(), MoveOutcome::Applied);
        while engine.move_right().is_applied() {}
        let before = engine.active().unwrap();
        assert_eq!(before.origin.x, 9);

        assert_eq!(engine.rotate(), MoveOutcome::RejectedBounds);
        assert_eq!(engine.active(), Some(before));
    }

    #[test]
    fn test_hard_drop_scores_per_cell_and_locks() {
        let mut engine = scripted(&[PieceKind::O, PieceKind::T]);
        engine.start();
        assert_eq!(engine.hard_drop(), MoveOutcome::Applied);

        // O is two rows tall: 18 rows of travel
        assert_eq!(engine.score(), 36);
        assert_eq!(engine.pieces_locked(), 1);
        assert_eq!(engine.board().get(4, 19), Some(Some(PieceKind::O)));
        assert_eq!(engine.active().unwrap().kind, PieceKind::T);
        assert_eq!(engine.last_lock().unwrap().points, 0);
    }

    #[test]
    fn test_gravity_falls_then_locks() {
        let config = StackerConfig::with_size(4, 3).unwrap();
        let mut engine = StackerEngine::new(config, ScriptedRng::new(vec![idx(PieceKind::O)]));
        engine.start();
        assert_eq!(engine.tick(), StackerTick::Fell);
        assert_eq!(engine.tick(), StackerTick::Locked);
        assert_eq!(engine.pieces_locked(), 1);
        // Next O spawns overlapping the first: board is full near the top
        assert!(engine.game_over());
        assert!(engine.last_lock().unwrap().game_over);
        assert_eq!(engine.tick(), StackerTick::Idle);
    }

    #[test]
    fn test_ten_lines_raise_level() {
        let config = StackerConfig::with_size(4, 6).unwrap();
        let mut engine = StackerEngine::new(config, ScriptedRng::new(vec![idx(PieceKind::I)]));
        engine.start();

        for _ in 0..10 {
            assert_eq!(engine.hard_drop(), MoveOutcome::Applied);
        }

        assert_eq!(engine.lines_cleared(), 10);
        assert_eq!(engine.level(), 2);
        // Each drop: 5 rows * 2 bonus + 100 * level 1
        assert_eq!(engine.score(), 10 * 110);
        assert_eq!(engine.gravity_interval_ms(), 900);
        assert!(engine.board().cells().iter().all(|c| c.is_none()));
    }

    #[test]
    fn test_commands_rejected_when_not_running() {
        let mut engine = scripted(&[PieceKind::T]);
        assert_eq!(engine.apply(RawCommand::Left), Err(Rejection::NotRunning));
        engine.start();
        assert_eq!(
            engine.apply(RawCommand::Left),
            Ok(Routed::Engine(MoveOutcome::Applied))
        );
    }

    #[test]
    fn test_draw_is_uniform_not_bag() {
        // Independent uniform draws repeat back to back; a 7-bag almost never
        // does and never repeats more than twice in a row.
        let mut engine = StackerEngine::with_seed(2024);
        let draws: Vec<PieceKind> = (0..500).map(|_| engine.draw_kind()).collect();
        assert!(draws.windows(2).any(|w| w[0] == w[1]));
        for kind in PieceKind::ALL {
            assert!(draws.contains(&kind), "missing {:?}", kind);
        }
    }

    #[test]
    fn test_ghost_matches_hard_drop_landing() {
        let mut engine = scripted(&[PieceKind::L, PieceKind::L]);
        engine.start();
        let ghost = engine.ghost().unwrap();
        assert_eq!(ghost.origin.y, 18);
        assert_eq!(engine.ghost_y(), Some(18));
    }

    #[test]
    fn test_config_rejects_tiny_boards() {
        assert!(matches!(
            StackerConfig::with_size(3, 20),
            Err(GridError::TooSmall { .. })
        ));
        assert!(matches!(
            StackerConfig::with_size(0, 20),
            Err(GridError::ZeroDimension { .. })
        ));
    }

    #[test]
    fn test_narrow_board_is_refused_before_start() {
        let narrow = Board::new(GridWorld::new(3, 20).unwrap());
        let mut engine = scripted(&[PieceKind::I]);

        assert!(matches!(
            engine.start_with_board(narrow),
            Err(GridError::TooSmall { width: 3, .. })
        ));
        assert_eq!(engine.phase(), GamePhase::Idle);
        assert_eq!(engine.config().grid(), STACKER_GRID);

        engine.start();
        assert!(engine.is_running());
    }

    #[test]
    fn test_empty_board_never_ends_on_start() {
        for (w, h) in [(4, 2), (4, 20), (5, 3), (10, 20)] {
            let config = StackerConfig::with_size(w, h).unwrap();
            for kind in PieceKind::ALL {
                let mut engine = StackerEngine::new(config, ScriptedRng::new(vec![idx(kind)]));
                engine.start();
                assert!(engine.is_running(), "{kind:?} on {w}x{h}");
                assert_eq!(engine.active().unwrap().kind, kind);

                let mut engine = StackerEngine::new(config, ScriptedRng::new(vec![idx(kind)]));
                engine.start_with_board(Board::new(config.grid())).unwrap();
                assert!(engine.is_running(), "{kind:?} on {w}x{h}");
            }
        }
    }
}
