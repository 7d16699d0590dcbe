//! Session driver - one active run, one clock, one reporter
//!
//! The session owns exactly one engine at a time. The runner feeds it
//! elapsed wall-clock time and raw commands; the session releases whole ticks
//! to the engine, stops at terminal states, and hands the final score to the
//! reporter exactly once per run.

use log::{debug, info};

use crate::core::{
    MoveOutcome, Rejection, Routed, SessionCommand, SnakeEngine, SnakeTick, StackerEngine,
    StackerTick, TickClock, MAX_CATCH_UP_TICKS,
};
use crate::scores::{ReportStats, ScoreReporter, ScoreService, ScoreSink};
use crate::types::{Direction, GameId, GamePhase, RawCommand};

/// The run a session is driving
#[derive(Debug, Clone)]
pub enum ActiveGame {
    Snake(SnakeEngine),
    Stacker(StackerEngine),
}

impl ActiveGame {
    pub fn snake(seed: u32) -> Self {
        ActiveGame::Snake(SnakeEngine::with_seed(seed))
    }

    pub fn stacker(seed: u32) -> Self {
        ActiveGame::Stacker(StackerEngine::with_seed(seed))
    }

    pub fn id(&self) -> GameId {
        match self {
            ActiveGame::Snake(_) => GameId::Snake,
            ActiveGame::Stacker(_) => GameId::BlockStacker,
        }
    }

    pub fn phase(&self) -> GamePhase {
        match self {
            ActiveGame::Snake(g) => g.phase(),
            ActiveGame::Stacker(g) => g.phase(),
        }
    }

    pub fn score(&self) -> u32 {
        match self {
            ActiveGame::Snake(g) => g.score(),
            ActiveGame::Stacker(g) => g.score(),
        }
    }

    /// Current tick interval; Block-Stacker gravity depends on level
    pub fn interval_ms(&self) -> u32 {
        match self {
            ActiveGame::Snake(g) => g.tick_interval_ms(),
            ActiveGame::Stacker(g) => g.gravity_interval_ms(),
        }
    }

    fn start(&mut self) {
        match self {
            ActiveGame::Snake(g) => g.start(),
            ActiveGame::Stacker(g) => g.start(),
        }
    }

    /// Run one tick. Returns true if the engine changed state.
    fn tick(&mut self) -> bool {
        match self {
            ActiveGame::Snake(g) => g.tick() != SnakeTick::Idle,
            ActiveGame::Stacker(g) => g.tick() != StackerTick::Idle,
        }
    }
}

/// What a handled command did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// Snake turn latched for the next tick
    Turn(Direction),
    /// Block-Stacker move result
    Move(MoveOutcome),
    Started,
    Paused,
    Resumed,
    /// Save request; `reported` is false when nothing was sent
    Saved { reported: bool },
    Rejected(Rejection),
}

pub struct Session<S: ScoreSink = ScoreService> {
    game: ActiveGame,
    clock: TickClock,
    reporter: Option<ScoreReporter<S>>,
    reported: bool,
}

impl<S: ScoreSink> Session<S> {
    pub fn new(game: ActiveGame, reporter: Option<ScoreReporter<S>>) -> Self {
        Self {
            game,
            clock: TickClock::new(),
            reporter,
            reported: false,
        }
    }

    pub fn game(&self) -> &ActiveGame {
        &self.game
    }

    pub fn clock(&self) -> &TickClock {
        &self.clock
    }

    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    pub fn reporter(&self) -> Option<&ScoreReporter<S>> {
        self.reporter.as_ref()
    }

    /// Replace the active run. The old run is dropped without reporting.
    pub fn switch_to(&mut self, game: ActiveGame) {
        info!("[Session] switching to {}", game.id().as_str());
        self.game = game;
        self.clock.reset();
        self.clock.resume();
        self.reported = false;
    }

    /// Cancel pending ticks and start a fresh run of the current game
    pub fn start(&mut self) {
        self.clock.reset();
        self.clock.resume();
        self.game.start();
        self.reported = false;
        info!("[Session] started {}", self.game.id().as_str());

        // Block-Stacker can end on its very first spawn with a seeded board.
        if self.game.phase() == GamePhase::GameOver {
            self.on_game_over();
        }
    }

    pub fn pause(&mut self) {
        if self.game.phase().is_running() && !self.clock.is_paused() {
            self.clock.pause();
            debug!("[Session] paused");
        }
    }

    pub fn resume(&mut self) {
        if self.clock.is_paused() {
            self.clock.resume();
            debug!("[Session] resumed");
        }
    }

    /// Bank elapsed time and run every tick that is due.
    ///
    /// At most [`MAX_CATCH_UP_TICKS`] ticks run per call; any larger backlog is
    /// discarded. Processing stops at a terminal state. Returns ticks run.
    pub fn update(&mut self, elapsed_ms: u32) -> u32 {
        if !self.game.phase().is_running() {
            return 0;
        }

        self.clock.accumulate(elapsed_ms);

        let mut ran = 0;
        while ran < MAX_CATCH_UP_TICKS {
            let interval = self.game.interval_ms();
            if !self.clock.take_tick(interval) {
                return ran;
            }
            self.game.tick();
            ran += 1;

            if self.game.phase() == GamePhase::GameOver {
                self.clock.reset();
                self.on_game_over();
                return ran;
            }
        }

        self.clock.drop_backlog(self.game.interval_ms());
        ran
    }

    /// Route a raw command to the session or the active engine
    pub fn handle(&mut self, raw: RawCommand) -> Handled {
        let session_cmd = matches!(raw, RawCommand::Start | RawCommand::Pause | RawCommand::Save);
        if self.clock.is_paused() && !session_cmd {
            return Handled::Rejected(Rejection::NotRunning);
        }

        let routed = match &mut self.game {
            ActiveGame::Snake(g) => g.apply(raw).map(|r| match r {
                Routed::Engine(dir) => Routed::Engine(Handled::Turn(dir)),
                Routed::Session(cmd) => Routed::Session(cmd),
            }),
            ActiveGame::Stacker(g) => g.apply(raw).map(|r| match r {
                Routed::Engine(outcome) => Routed::Engine(Handled::Move(outcome)),
                Routed::Session(cmd) => Routed::Session(cmd),
            }),
        };

        let handled = match routed {
            Ok(Routed::Engine(handled)) => handled,
            Ok(Routed::Session(cmd)) => self.handle_session(cmd),
            Err(rejection) => Handled::Rejected(rejection),
        };

        // A hard drop can end the run between ticks.
        if self.game.phase() == GamePhase::GameOver && !self.reported {
            self.clock.reset();
            self.on_game_over();
        }

        handled
    }

    fn handle_session(&mut self, cmd: SessionCommand) -> Handled {
        match cmd {
            SessionCommand::Start => {
                self.start();
                Handled::Started
            }
            SessionCommand::Pause => {
                if self.clock.is_paused() {
                    self.resume();
                    Handled::Resumed
                } else if self.game.phase().is_running() {
                    self.pause();
                    Handled::Paused
                } else {
                    Handled::Rejected(Rejection::NotRunning)
                }
            }
            SessionCommand::Save => self.save(),
        }
    }

    /// Report the current score of a live run on request
    pub fn save(&mut self) -> Handled {
        if !self.game.phase().is_running() {
            return Handled::Saved { reported: false };
        }
        let reported = self.report();
        info!(
            "[Session] saved {} score {}",
            self.game.id().as_str(),
            self.game.score()
        );
        Handled::Saved { reported }
    }

    fn on_game_over(&mut self) {
        if self.reported {
            return;
        }
        self.reported = true;
        info!(
            "[Session] {} over with score {}",
            self.game.id().as_str(),
            self.game.score()
        );
        self.report();
    }

    fn report(&self) -> bool {
        match &self.reporter {
            Some(reporter) => reporter.report(self.game.id(), self.game.score()),
            None => false,
        }
    }

    /// Stop the reporter after it has drained its queue
    pub fn shutdown(self) -> Option<ReportStats> {
        self.reporter.map(ScoreReporter::shutdown)
    }
}
