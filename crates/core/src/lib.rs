//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the rules of both grid games and nothing else. It has
//! **zero dependencies** on terminals, threads, or I/O, so:
//!
//! - **Deterministic**: the same seed (or scripted draws) replays the same run
//! - **Testable**: every rule is exercised by unit and property tests
//! - **Portable**: runs headless, in a terminal, or behind any other front end
//!
//! # Module Structure
//!
//! - [`grid`]: bounded 2D coordinate space with wrap and bounds checks
//! - [`rng`]: the [`RandomSource`] abstraction, a seeded LCG and a scripted source
//! - [`clock`]: fixed-interval tick accumulator with pause and catch-up cap
//! - [`router`]: raw command normalization and the Snake reversal guard
//! - [`snake`]: the Snake engine
//! - [`pieces`]: tetromino matrices, rotation and kick offsets
//! - [`board`]: locked-cell matrix, placement checks and line clearing
//! - [`scoring`]: line-clear table, hard drop bonus, level and gravity curves
//! - [`stacker`]: the Block-Stacker engine
//!
//! # Game Rules
//!
//! Snake:
//!
//! - **Wrap-around**: the head leaves one edge and enters the opposite one
//! - **No reversal**: a turn opposite the committed heading is rejected
//! - **Food**: +10 per pellet, respawned uniformly on a free cell
//! - **Self collision**: the only way to lose
//!
//! Block-Stacker:
//!
//! - **Uniform draw**: every spawn picks one of seven kinds independently
//! - **Matrix rotation**: clockwise transpose-and-reverse, kicks at 0, +1, -1
//! - **Scoring**: 0/100/300/500/800 per lock times level, +2 per hard drop cell
//! - **Levels**: one per 10 lines; gravity 1000ms minus 100ms per level, floor 100ms
//! - **Game over**: a new piece that does not fit at spawn
//!
//! # Example
//!
//! ```
//! use arcade_core::{MoveOutcome, StackerEngine};
//!
//! let mut game = StackerEngine::with_seed(12345);
//! game.start();
//!
//! game.move_right();
//! game.rotate();
//! assert_eq!(game.hard_drop(), MoveOutcome::Applied);
//! assert!(game.score() > 0); // Hard drop awards points
//! ```
//!
//! # Timing
//!
//! Engines do not read clocks. A driver feeds elapsed time into a
//! [`TickClock`] and calls `tick` once per whole interval: 120ms for Snake,
//! [`gravity_interval_ms`] of the current level for Block-Stacker.

pub mod board;
pub mod clock;
pub mod grid;
pub mod pieces;
pub mod rng;
pub mod router;
pub mod scoring;
pub mod snake;
pub mod stacker;

pub use arcade_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, MoveOutcome, Placement};
pub use clock::{TickClock, MAX_CATCH_UP_TICKS};
pub use grid::{GridError, GridWorld, SNAKE_GRID, STACKER_GRID};
pub use pieces::{spawn_shape, Shape, KICK_OFFSETS};
pub use rng::{RandomSource, ScriptedRng, SimpleRng};
pub use router::{
    check_turn, route_snake, route_stacker, Rejection, Routed, SessionCommand, StackerCommand,
};
pub use scoring::{calculate_drop_score, calculate_level, calculate_line_score, gravity_interval_ms};
pub use snake::{SnakeConfig, SnakeEngine, SnakeOutcome, SnakeTick};
pub use stacker::{LockReport, Piece, StackerConfig, StackerEngine, StackerTick};
