//! Engine crate - drives one game run in real time
//!
//! Glues the pure engines in `arcade-core` to wall-clock time and to the
//! score boundary in `arcade-scores`. A [`Session`] owns exactly one
//! [`ActiveGame`], a [`TickClock`](crate::core::TickClock) and an optional
//! [`ScoreReporter`](crate::scores::ScoreReporter).
//!
//! ```
//! use arcade_engine::{ActiveGame, Session};
//! use arcade_engine::scores::ScoreService;
//!
//! let mut session: Session<ScoreService> = Session::new(ActiveGame::snake(42), None);
//! session.start();
//! assert_eq!(session.update(120), 1);
//! ```

pub mod session;

pub use arcade_core as core;
pub use arcade_scores as scores;
pub use arcade_types as types;

pub use session::{ActiveGame, Handled, Session};
