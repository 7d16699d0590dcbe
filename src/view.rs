//! Plain text view of a session.
//!
//! One character per cell, one line per row, followed by a status block. The
//! runner prints these lines as-is; tests compare them directly.

use crate::core::{SnakeEngine, StackerEngine};
use crate::engine::{ActiveGame, Session};
use crate::scores::ScoreSink;
use crate::types::{Coord, GamePhase};

const EMPTY: char = '.';
const SNAKE_HEAD: char = '@';
const SNAKE_BODY: char = 'o';
const FOOD: char = '*';
const ACTIVE: char = '#';
const GHOST: char = ':';

/// Render the whole screen
pub fn render<S: ScoreSink>(session: &Session<S>) -> Vec<String> {
    let mut lines = match session.game() {
        ActiveGame::Snake(g) => render_snake(g),
        ActiveGame::Stacker(g) => render_stacker(g),
    };
    lines.push(String::new());
    lines.extend(status_lines(session));
    lines
}

pub fn render_snake(game: &SnakeEngine) -> Vec<String> {
    let grid = game.grid();
    let head = game.head();
    (0..grid.height() as i32)
        .map(|y| {
            (0..grid.width() as i32)
                .map(|x| {
                    let c = Coord::new(x, y);
                    if head == Some(c) {
                        SNAKE_HEAD
                    } else if game.is_occupied(c) {
                        SNAKE_BODY
                    } else if game.food() == Some(c) {
                        FOOD
                    } else {
                        EMPTY
                    }
                })
                .collect()
        })
        .collect()
}

pub fn render_stacker(game: &StackerEngine) -> Vec<String> {
    let mut rows: Vec<Vec<char>> = game
        .board()
        .to_rows()
        .into_iter()
        .map(|row| row.chars().collect())
        .collect();

    let mut paint = |cells: &[Coord], ch: char| {
        for c in cells {
            if let Some(row) = rows.get_mut(c.y as usize) {
                if let Some(cell) = row.get_mut(c.x as usize) {
                    *cell = ch;
                }
            }
        }
    };

    if let Some(ghost) = game.ghost() {
        paint(&ghost.cells(), GHOST);
    }
    if let Some(active) = game.active() {
        paint(&active.cells(), ACTIVE);
    }

    rows.into_iter().map(|row| row.into_iter().collect()).collect()
}

fn status_lines<S: ScoreSink>(session: &Session<S>) -> Vec<String> {
    let game = session.game();
    let mut lines = vec![format!("{}  score {}", game.id().as_str(), game.score())];

    if let ActiveGame::Stacker(g) = game {
        lines.push(format!("level {}  lines {}", g.level(), g.lines_cleared()));
    }

    let state = match game.phase() {
        GamePhase::Idle => "press enter to start",
        GamePhase::Running if session.is_paused() => "paused (p to resume)",
        GamePhase::Running => "running (p pause, v save, tab switch, q quit)",
        GamePhase::GameOver => "game over (enter to restart)",
    };
    lines.push(state.to_string());
    lines
}
