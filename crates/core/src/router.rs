//! InputRouter - normalizes raw commands for the active engine
//!
//! Routing is a pure function of the raw command and the engine's committed
//! state. Nothing here mutates a run; engines call into the router and apply
//! whatever it accepts.

use crate::types::{Direction, RawCommand};

/// Why a command was not accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Snake: the exact opposite of the committed heading
    Reversal,
    /// Snake: not a heading (rotate, hard drop)
    NotDirectional,
    /// Engine is not running
    NotRunning,
}

/// Commands the Block-Stacker engine understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StackerCommand {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    Rotate,
}

/// Commands handled by the session, not by an engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionCommand {
    Start,
    Pause,
    Save,
}

/// Result of routing a raw command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routed<T> {
    Engine(T),
    Session(SessionCommand),
}

fn session_command(raw: RawCommand) -> Option<SessionCommand> {
    match raw {
        RawCommand::Start => Some(SessionCommand::Start),
        RawCommand::Pause => Some(SessionCommand::Pause),
        RawCommand::Save => Some(SessionCommand::Save),
        _ => None,
    }
}

/// Reversal guard. Requesting the committed heading again is accepted and
/// changes nothing.
pub fn check_turn(requested: Direction, committed: Direction) -> Result<Direction, Rejection> {
    if requested.is_opposite(committed) {
        return Err(Rejection::Reversal);
    }
    Ok(requested)
}

/// Route a raw command for a Snake run heading `committed`
pub fn route_snake(
    raw: RawCommand,
    committed: Direction,
    running: bool,
) -> Result<Routed<Direction>, Rejection> {
    if let Some(cmd) = session_command(raw) {
        return Ok(Routed::Session(cmd));
    }
    if !running {
        return Err(Rejection::NotRunning);
    }
    let requested = raw.direction().ok_or(Rejection::NotDirectional)?;
    check_turn(requested, committed).map(Routed::Engine)
}

/// Route a raw command for a Block-Stacker run.
/// Engine commands pass through unfiltered while running.
pub fn route_stacker(raw: RawCommand, running: bool) -> Result<Routed<StackerCommand>, Rejection> {
    let cmd = match raw {
        RawCommand::Left => StackerCommand::MoveLeft,
        RawCommand::Right => StackerCommand::MoveRight,
        RawCommand::Down => StackerCommand::SoftDrop,
        RawCommand::Up | RawCommand::Rotate => StackerCommand::Rotate,
        RawCommand::HardDrop => StackerCommand::HardDrop,
        RawCommand::Start => return Ok(Routed::Session(SessionCommand::Start)),
        RawCommand::Pause => return Ok(Routed::Session(SessionCommand::Pause)),
        RawCommand::Save => return Ok(Routed::Session(SessionCommand::Save)),
    };
    if !running {
        return Err(Rejection::NotRunning);
    }
    Ok(Routed::Engine(cmd))
}
