//! Rewards arcade (workspace facade crate).
//!
//! Re-exports the member crates under `crates/` as
//! `arcade_rewards::{core,engine,input,scores,types}` and holds the small
//! pieces the `arcade` binary needs: argument parsing and a plain text view.

pub mod cli;
pub mod view;

pub use arcade_core as core;
pub use arcade_engine as engine;
pub use arcade_input as input;
pub use arcade_scores as scores;
pub use arcade_types as types;
