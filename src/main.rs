//! Terminal arcade runner (default binary).
//!
//! `arcade [snake|tetris] [seed]`
//!
//! Uses crossterm for input and a plain text view. Scores are reported in the
//! background when a run ends; set `RUST_LOG=info` and redirect stderr to see
//! the submissions.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::{cursor, terminal, QueueableCommand};

use arcade_rewards::cli::RunOptions;
use arcade_rewards::engine::{ActiveGame, Session};
use arcade_rewards::input::{handle_key_event, should_quit};
use arcade_rewards::scores::{LeaderboardQuery, ScoreReporter};
use arcade_rewards::types::{GameId, FRAME_MS};
use arcade_rewards::view;

fn main() -> Result<()> {
    env_logger::init();

    let options = RunOptions::from_args(std::env::args().skip(1))?;
    let seed = options.initial_seed();
    log::info!("[Arcade] {} with seed {}", options.game.as_str(), seed);

    let reporter = ScoreReporter::start_from_env().context("failed to start score reporting")?;
    let mut session = Session::new(new_game(options.game, seed), reporter);

    let mut term = Terminal::new();
    term.enter()?;

    let result = run(&mut term, &mut session, &options);

    // Always try to restore terminal state.
    let _ = term.exit();

    if let Some(reporter) = session.reporter() {
        let board = reporter.leaderboard(&LeaderboardQuery::total(5));
        if !board.is_empty() {
            println!("Top players (reward points):");
            for entry in board {
                println!("{:>3}. {:<16} {}", entry.rank, entry.user, entry.value);
            }
        }
    }
    if let Some(stats) = session.shutdown() {
        log::info!(
            "[Arcade] scores accepted {} rejected {}",
            stats.accepted,
            stats.rejected
        );
    }

    result
}

fn new_game(game: GameId, seed: u32) -> ActiveGame {
    match game {
        GameId::BlockStacker => ActiveGame::stacker(seed),
        _ => ActiveGame::snake(seed),
    }
}

fn run(term: &mut Terminal, session: &mut Session, options: &RunOptions) -> Result<()> {
    let frame = Duration::from_millis(FRAME_MS as u64);
    let mut last_frame = Instant::now();
    let mut switches = 0u32;

    loop {
        term.draw(&view::render(session))?;

        // Input with timeout until next frame.
        let timeout = frame
            .checked_sub(last_frame.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if key.code == KeyCode::Tab {
                        let next = match session.game().id() {
                            GameId::Snake => GameId::BlockStacker,
                            _ => GameId::Snake,
                        };
                        switches = switches.wrapping_add(1);
                        let seed = options.switch_seed(switches);
                        log::info!("[Arcade] {} with seed {}", next.as_str(), seed);
                        session.switch_to(new_game(next, seed));
                    } else if let Some(raw) = handle_key_event(key) {
                        let handled = session.handle(raw);
                        log::debug!("[Arcade] {:?} -> {:?}", raw, handled);
                    }
                }
            }
        }

        let elapsed = last_frame.elapsed();
        if elapsed >= frame {
            last_frame = Instant::now();
            session.update(elapsed.as_millis() as u32);
        }
    }
}

/// Minimal full-redraw terminal writer
struct Terminal {
    stdout: io::Stdout,
    buf: Vec<u8>,
}

impl Terminal {
    fn new() -> Self {
        Self {
            stdout: io::stdout(),
            buf: Vec::with_capacity(4 * 1024),
        }
    }

    fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.flush_buf()
    }

    fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    fn draw(&mut self, lines: &[String]) -> Result<()> {
        self.buf.clear();
        self.buf.queue(terminal::Clear(terminal::ClearType::All))?;
        for (y, line) in lines.iter().enumerate() {
            self.buf.queue(cursor::MoveTo(0, y as u16))?;
            self.buf.extend_from_slice(line.as_bytes());
        }
        self.flush_buf()
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}
