//! Snake engine - segment list over a toroidal grid
//!
//! One tick moves the head one cell in the committed heading, wrapping at the
//! edges. Eating food grows the snake by one; running into any existing
//! segment ends the run. Turns are latched between ticks and applied
//! atomically at the start of the next one.

use std::collections::VecDeque;

use crate::grid::{GridWorld, SNAKE_GRID};
use crate::rng::{RandomSource, SimpleRng};
use crate::router::{check_turn, route_snake, Rejection, Routed};
use crate::types::{
    Coord, Direction, GamePhase, RawCommand, FOOD_POINTS, SNAKE_ORIGIN, SNAKE_TICK_MS,
};

/// Tunables for a Snake run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnakeConfig {
    pub grid: GridWorld,
    /// Head position on start (wrapped onto the grid)
    pub origin: Coord,
    /// Heading on start
    pub direction: Direction,
    pub tick_ms: u32,
    /// Score per food eaten
    pub food_points: u32,
    /// Cells to grow after start without eating. Zero keeps growth food-only.
    pub initial_growth: u32,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            grid: SNAKE_GRID,
            origin: SNAKE_ORIGIN,
            direction: Direction::Right,
            tick_ms: SNAKE_TICK_MS,
            food_points: FOOD_POINTS,
            initial_growth: 0,
        }
    }
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnakeTick {
    /// Not running; nothing changed
    Idle,
    Moved,
    Ate,
    /// Head hit the body; the run is over
    Died,
    /// Food could not respawn because the snake covers every cell; the run is over
    Filled,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnakeOutcome {
    SelfCollision,
    BoardFilled,
}

/// A single Snake run and its random source
#[derive(Debug, Clone)]
pub struct SnakeEngine<R = SimpleRng> {
    config: SnakeConfig,
    rng: R,
    phase: GamePhase,
    /// Head first, tail last
    segments: VecDeque<Coord>,
    /// Heading used by the most recent tick
    direction: Direction,
    /// Turn latched for the next tick
    pending_turn: Option<Direction>,
    food: Option<Coord>,
    score: u32,
    pending_growth: u32,
    ticks: u64,
    outcome: Option<SnakeOutcome>,
}

impl SnakeEngine<SimpleRng> {
    /// Default 20x20 run with a seeded LCG
    pub fn with_seed(seed: u32) -> Self {
        Self::new(SnakeConfig::default(), SimpleRng::new(seed))
    }
}

impl<R: RandomSource> SnakeEngine<R> {
    pub fn new(config: SnakeConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            phase: GamePhase::Idle,
            segments: VecDeque::new(),
            direction: config.direction,
            pending_turn: None,
            food: None,
            score: 0,
            pending_growth: 0,
            ticks: 0,
            outcome: None,
        }
    }

    /// Resume a persisted run: `segments` head first, already in bounds.
    ///
    /// Coordinates are wrapped onto the grid. If `food` is missing or lands on
    /// the body a fresh one is spawned.
    pub fn restore(
        config: SnakeConfig,
        rng: R,
        segments: Vec<Coord>,
        direction: Direction,
        food: Option<Coord>,
    ) -> Self {
        let mut engine = Self::new(config, rng);
        engine.segments = segments.into_iter().map(|c| config.grid.wrap(c)).collect();
        if engine.segments.is_empty() {
            engine.segments.push_back(config.grid.wrap(config.origin));
        }
        engine.direction = direction;
        engine.phase = GamePhase::Running;
        engine.food = food
            .map(|f| config.grid.wrap(f))
            .filter(|f| !engine.is_occupied(*f));
        if engine.food.is_none() && !engine.respawn_food() {
            engine.finish(SnakeOutcome::BoardFilled);
        }
        engine
    }

    /// Reset to a one-segment snake at the origin and begin running
    pub fn start(&mut self) {
        let grid = self.config.grid;
        self.segments.clear();
        self.segments.push_back(grid.wrap(self.config.origin));
        self.direction = self.config.direction;
        self.pending_turn = None;
        self.score = 0;
        self.pending_growth = self.config.initial_growth;
        self.ticks = 0;
        self.outcome = None;
        self.food = None;
        self.phase = GamePhase::Running;

        if !self.respawn_food() {
            self.finish(SnakeOutcome::BoardFilled);
        }
    }

    /// Latch a heading for the next tick, subject to the reversal guard.
    ///
    /// The guard compares against the heading of the last tick, so two quick
    /// turns cannot fold the head back through the neck.
    pub fn turn(&mut self, requested: Direction) -> Result<Direction, Rejection> {
        if !self.phase.is_running() {
            return Err(Rejection::NotRunning);
        }
        let accepted = check_turn(requested, self.direction)?;
        self.pending_turn = Some(accepted);
        Ok(accepted)
    }

    /// Route a raw command. Engine commands are applied; session commands are
    /// returned for the caller to handle.
    pub fn apply(&mut self, raw: RawCommand) -> Result<Routed<Direction>, Rejection> {
        let routed = route_snake(raw, self.direction, self.phase.is_running())?;
        if let Routed::Engine(dir) = routed {
            self.pending_turn = Some(dir);
        }
        Ok(routed)
    }

    /// Advance one step
    pub fn tick(&mut self) -> SnakeTick {
        if !self.phase.is_running() {
            return SnakeTick::Idle;
        }
        let Some(&head) = self.segments.front() else {
            return SnakeTick::Idle;
        };

        if let Some(dir) = self.pending_turn.take() {
            self.direction = dir;
        }
        self.ticks += 1;

        let next = self.config.grid.step(head, self.direction);

        // Any segment counts, including the tail that would otherwise move away.
        if self.is_occupied(next) {
            self.finish(SnakeOutcome::SelfCollision);
            return SnakeTick::Died;
        }

        self.segments.push_front(next);

        if self.food == Some(next) {
            self.score += self.config.food_points;
            if !self.respawn_food() {
                self.finish(SnakeOutcome::BoardFilled);
                return SnakeTick::Filled;
            }
            return SnakeTick::Ate;
        }

        if self.pending_growth > 0 {
            self.pending_growth -= 1;
        } else {
            self.segments.pop_back();
        }
        SnakeTick::Moved
    }

    /// Pure form of [`SnakeEngine::tick`]: consume the run, return the next one
    pub fn advance(mut self) -> Self {
        self.tick();
        self
    }

    /// Pick food uniformly among free cells. Returns false if none are free.
    fn respawn_food(&mut self) -> bool {
        let free: Vec<Coord> = self
            .config
            .grid
            .cells()
            .filter(|c| !self.is_occupied(*c))
            .collect();
        if free.is_empty() {
            self.food = None;
            return false;
        }
        let pick = self.rng.next_below(free.len() as u32) as usize;
        self.food = Some(free[pick]);
        true
    }

    fn finish(&mut self, outcome: SnakeOutcome) {
        self.phase = GamePhase::GameOver;
        self.outcome = Some(outcome);
        self.pending_turn = None;
    }

    pub fn is_occupied(&self, coord: Coord) -> bool {
        self.segments.contains(&coord)
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

    pub fn outcome(&self) -> Option<SnakeOutcome> {
        self.outcome
    }

    pub fn segments(&self) -> &VecDeque<Coord> {
        &self.segments
    }

    pub fn head(&self) -> Option<Coord> {
        self.segments.front().copied()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Heading of the last tick
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Heading the next tick will use
    pub fn heading(&self) -> Direction {
        self.pending_turn.unwrap_or(self.direction)
    }

    pub fn food(&self) -> Option<Coord> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn tick_interval_ms(&self) -> u32 {
        self.config.tick_ms
    }

    pub fn config(&self) -> &SnakeConfig {
        &self.config
    }

    pub fn grid(&self) -> GridWorld {
        self.config.grid
    }
}
