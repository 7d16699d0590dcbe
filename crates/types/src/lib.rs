//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used by both arcade engines, the
//! input layer and the score boundary. All types are pure data with no external
//! dependencies, so they can be used from the simulation core, the terminal
//! runner and the score service alike.
//!
//! # Grid Dimensions
//!
//! | Game | Width | Height | Notes |
//! |------|-------|--------|-------|
//! | Snake | 20 | 20 | toroidal, head starts at (5, 5) heading right |
//! | Block-Stacker | 10 | 20 | bounded, pieces spawn centred on row 0 |
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_MS` | 16 | Runner frame interval (~60 FPS) |
//! | `SNAKE_TICK_MS` | 120 | Snake movement interval |
//! | `BASE_GRAVITY_MS` | 1000 | Block-Stacker gravity at level 1 |
//! | `GRAVITY_STEP_MS` | 100 | Gravity speed-up per level |
//! | `GRAVITY_FLOOR_MS` | 100 | Fastest gravity interval |
//!
//! # Examples
//!
//! ```
//! use arcade_types::{Coord, Direction, GameId, PieceKind, RawCommand};
//!
//! let head = Coord::new(5, 5);
//! assert_eq!(head.offset(Direction::Right), Coord::new(6, 5));
//! assert!(Direction::Left.is_opposite(Direction::Right));
//!
//! assert_eq!(GameId::from_str("tetris"), Some(GameId::BlockStacker));
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(RawCommand::from_str("hardDrop"), Some(RawCommand::HardDrop));
//! ```

/// Runner frame interval in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Snake grid width in cells
pub const SNAKE_WIDTH: u16 = 20;

/// Snake grid height in cells
pub const SNAKE_HEIGHT: u16 = 20;

/// Snake movement interval in milliseconds
pub const SNAKE_TICK_MS: u32 = 120;

/// Snake head position on start
pub const SNAKE_ORIGIN: Coord = Coord::new(5, 5);

/// Points awarded per food eaten
pub const FOOD_POINTS: u32 = 10;

/// Block-Stacker board width in cells (10 columns)
pub const STACKER_WIDTH: u16 = 10;

/// Block-Stacker board height in cells (20 rows)
pub const STACKER_HEIGHT: u16 = 20;

/// Gravity interval at level 1 (1000ms = 1 second per row)
pub const BASE_GRAVITY_MS: u32 = 1000;

/// Gravity interval reduction per level
pub const GRAVITY_STEP_MS: u32 = 100;

/// Fastest gravity interval, reached at level 10
pub const GRAVITY_FLOOR_MS: u32 = 100;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Bonus per cell travelled during a hard drop
pub const HARD_DROP_BONUS: u32 = 2;

/// Base line clear scores indexed by lines cleared in one lock (multiplied by level)
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Lowest score the submission service accepts
pub const MIN_SUBMITTED_SCORE: i64 = 5;

/// Highest score the submission service accepts
pub const MAX_SUBMITTED_SCORE: i64 = 50_000;

/// Loyalty points are the score divided by this value (rounded down)
pub const POINTS_PER_SCORE_DIVISOR: i64 = 10;

/// A cell coordinate. `x` grows to the right, `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbouring coordinate one step in `direction` (no wrapping or clamping)
    pub fn offset(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    /// Translate by an arbitrary delta
    pub fn translate(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Snake heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The exact reverse heading
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(&self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Unit step `(dx, dy)` for this heading
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "u" => Some(Direction::Up),
            "down" | "d" => Some(Direction::Down),
            "left" | "l" => Some(Direction::Left),
            "right" | "r" => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Game identifiers accepted by the score service.
///
/// Only Snake and Block-Stacker are simulated here; the other two are scored by
/// the storefront's own mini-games and share the same submission endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GameId {
    Snake,
    BlockStacker,
    MemoryMatch,
    Trivia,
}

impl GameId {
    pub const ALL: [GameId; 4] = [
        GameId::Snake,
        GameId::BlockStacker,
        GameId::MemoryMatch,
        GameId::Trivia,
    ];

    /// Parse the wire identifier (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "snake" => Some(GameId::Snake),
            "tetris" => Some(GameId::BlockStacker),
            "memory" => Some(GameId::MemoryMatch),
            "trivia" => Some(GameId::Trivia),
            _ => None,
        }
    }

    /// Wire identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            GameId::Snake => "snake",
            GameId::BlockStacker => "tetris",
            GameId::MemoryMatch => "memory",
            GameId::Trivia => "trivia",
        }
    }
}

/// Tetromino piece kinds. The kind doubles as the colour tag of locked cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    J,
    L,
    S,
    Z,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::J,
        PieceKind::L,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::S => "s",
            PieceKind::Z => "z",
        }
    }
}

/// Cell on the stacker board (None = empty, Some = locked by that piece kind)
pub type Cell = Option<PieceKind>;

/// Raw commands from any input source, before routing to an engine.
///
/// Directional commands mean a heading to Snake and a move to Block-Stacker
/// (`Down` is a soft drop there, `Up` a rotation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawCommand {
    Up,
    Down,
    Left,
    Right,
    Rotate,
    HardDrop,
    Start,
    Pause,
    Save,
}

impl RawCommand {
    /// Parse command from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" => Some(RawCommand::Up),
            "down" | "softdrop" => Some(RawCommand::Down),
            "left" | "moveleft" => Some(RawCommand::Left),
            "right" | "moveright" => Some(RawCommand::Right),
            "rotate" | "rotatecw" => Some(RawCommand::Rotate),
            "harddrop" | "drop" => Some(RawCommand::HardDrop),
            "start" | "restart" => Some(RawCommand::Start),
            "pause" => Some(RawCommand::Pause),
            "save" => Some(RawCommand::Save),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            RawCommand::Up => "up",
            RawCommand::Down => "down",
            RawCommand::Left => "left",
            RawCommand::Right => "right",
            RawCommand::Rotate => "rotate",
            RawCommand::HardDrop => "hardDrop",
            RawCommand::Start => "start",
            RawCommand::Pause => "pause",
            RawCommand::Save => "save",
        }
    }

    /// The heading this command requests, if it is directional
    pub fn direction(&self) -> Option<Direction> {
        match self {
            RawCommand::Up => Some(Direction::Up),
            RawCommand::Down => Some(Direction::Down),
            RawCommand::Left => Some(Direction::Left),
            RawCommand::Right => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Lifecycle shared by both engines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GamePhase {
    #[default]
    Idle,
    Running,
    GameOver,
}

impl GamePhase {
    pub fn is_running(&self) -> bool {
        matches!(self, GamePhase::Running)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Idle => "idle",
            GamePhase::Running => "running",
            GamePhase::GameOver => "gameOver",
        }
    }
}
