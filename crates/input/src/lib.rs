//! Terminal input (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::RawCommand`]. Routing a
//! raw command to an engine (and rejecting it) is the core crate's job, so
//! this crate holds no game state.

pub mod map;

pub use arcade_types as types;

pub use map::{handle_key_event, should_quit};
