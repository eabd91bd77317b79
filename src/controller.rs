//! Drives a [`GridModel`] on a timer and reports to the presentation layer.
//!
//! The controller owns the only scheduling handle. Whoever owns the
//! controller runs the loop: wait up to [`ExecutionController::time_until_tick`]
//! for input, then call [`ExecutionController::poll`]. Ticks therefore run
//! one at a time on the caller's thread and `stop` takes effect immediately.

use std::fmt;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::clock::{Clock, SystemClock};
use crate::error::{LifeError, Result};
use crate::grid::{Grid, GridModel};
use crate::stats::Stats;
use crate::ticker::Ticker;

/// Whether generations are being computed on a cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Idle,
    Running,
}

/// Seconds per generation.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Speed(f64);

impl Speed {
    /// Slowest accepted cadence: one generation a day.
    pub const MAX_SECS: f64 = 86_400.0;

    /// # Errors
    ///
    /// Returns [`LifeError::InvalidSpeed`] unless `0 < secs <= MAX_SECS`.
    pub fn from_secs(secs: f64) -> Result<Self> {
        if secs > 0.0 && secs <= Self::MAX_SECS {
            Ok(Speed(secs))
        } else {
            Err(LifeError::InvalidSpeed(secs))
        }
    }

    pub fn as_secs(self) -> f64 {
        self.0
    }

    pub fn as_duration(self) -> Duration {
        Duration::from_secs_f64(self.0)
    }
}

impl Default for Speed {
    fn default() -> Self {
        Speed(1.0)
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}s/gen", self.0)
    }
}

/// What the controller tells the rendering layer.
///
/// Calls arrive synchronously from controller operations; implementations
/// must not call back into the controller from inside them.
pub trait PresentationPort {
    /// A full snapshot of the field to display.
    fn render_grid(&mut self, grid: Grid);

    /// The field changed shape; rebuild the drawing surface.
    fn set_dimensions(&mut self, width: usize, height: usize);

    /// A game ended or restarted; show the start/stop control as idle.
    fn reset_controls_to_idle(&mut self);

    /// A running game reached a stable or extinct field.
    fn game_finished(&mut self, stats: &Stats);
}

/// The session state machine: `Idle` until started, `Running` while a
/// ticker is scheduled.
pub struct ExecutionController<M, P, C = SystemClock> {
    model: M,
    presenter: P,
    clock: C,
    speed: Speed,
    ticker: Option<Ticker>,
    stats: Stats,
    rng: StdRng,
}

impl<M: GridModel, P: PresentationPort> ExecutionController<M, P> {
    /// Creates an idle controller on the system clock.
    pub fn new(model: M, presenter: P, speed: Speed) -> Self {
        Self::with_clock(model, presenter, speed, SystemClock)
    }
}

impl<M: GridModel, P: PresentationPort, C: Clock> ExecutionController<M, P, C> {
    /// Creates an idle controller and pushes the initial field to the
    /// presenter.
    pub fn with_clock(model: M, mut presenter: P, speed: Speed, clock: C) -> Self {
        let (width, height) = model.dimensions();
        presenter.set_dimensions(width, height);
        presenter.render_grid(model.state());

        let mut stats = Stats::new();
        stats.reset(model.population());

        ExecutionController {
            model,
            presenter,
            clock,
            speed,
            ticker: None,
            stats,
            rng: StdRng::from_entropy(),
        }
    }

    /// Makes [`fill_randomly`](Self::fill_randomly) reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Starts computing a generation every `speed` seconds.
    ///
    /// Calling this while already running keeps the current schedule.
    pub fn start(&mut self) {
        if self.ticker.is_some() {
            return;
        }
        self.ticker = Some(Ticker::start(self.clock.now(), self.speed.as_duration()));
        tracing::info!(speed = self.speed.as_secs(), "simulation started");
    }

    /// Cancels the pending tick. Does nothing when idle.
    pub fn stop(&mut self) {
        if self.ticker.take().is_some() {
            tracing::info!(generation = self.stats.generation, "simulation stopped");
        }
    }

    pub fn toggle_activation(&mut self) {
        match self.run_state() {
            RunState::Running => self.stop(),
            RunState::Idle => self.start(),
        }
    }

    /// Stores a new speed. A running session is rescheduled so the next tick
    /// comes one new interval from now.
    pub fn change_speed(&mut self, speed: Speed) {
        self.speed = speed;
        tracing::info!(speed = speed.as_secs(), "speed changed");
        if self.is_running() {
            self.stop();
            self.start();
        }
    }

    pub fn change_size(&mut self, width: usize, height: usize) {
        self.model.set_size(width, height);
        self.stats.current_population = self.model.population() as u64;
        tracing::info!(width, height, "field resized");

        self.presenter.set_dimensions(width, height);
        self.presenter.render_grid(self.model.state());
    }

    /// Clears the field and resets the statistics.
    ///
    /// This does not stop a running session.
    pub fn new_game(&mut self) {
        self.model.clear_field();
        self.stats.reset(0);
        tracing::info!("new game");

        self.presenter.render_grid(self.model.state());
        self.presenter.reset_controls_to_idle();
    }

    /// Seeds the field: every dead cell comes alive with probability one half.
    ///
    /// One draw is taken per cell in row-major order whether or not the cell
    /// is already alive. Live cells are never killed.
    ///
    /// # Errors
    ///
    /// Propagates a failed toggle, which only happens when the model's
    /// snapshot disagrees with its own bounds.
    pub fn fill_randomly(&mut self) -> Result<()> {
        let snapshot = self.model.state();
        let mut seeded = 0usize;
        for (y, row) in snapshot.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let draw: f64 = self.rng.gen();
                if draw > 0.5 && !cell.is_alive() {
                    self.model.toggle_cell_state(x, y)?;
                    seeded += 1;
                }
            }
        }
        self.stats.current_population = self.model.population() as u64;
        tracing::info!(seeded, "field filled randomly");

        self.presenter.render_grid(self.model.state());
        Ok(())
    }

    /// Flips the clicked cell.
    ///
    /// # Errors
    ///
    /// Returns [`LifeError::OutOfBounds`] for a click outside the field.
    pub fn on_cell_click(&mut self, x: usize, y: usize) -> Result<()> {
        self.model.toggle_cell_state(x, y)
    }

    pub fn get_field(&self) -> Grid {
        self.model.state()
    }

    pub fn get_speed(&self) -> Speed {
        self.speed
    }

    pub fn run_state(&self) -> RunState {
        if self.ticker.is_some() {
            RunState::Running
        } else {
            RunState::Idle
        }
    }

    pub fn is_running(&self) -> bool {
        self.run_state() == RunState::Running
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn dimensions(&self) -> (usize, usize) {
        self.model.dimensions()
    }

    /// Read-only access to the model.
    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// How long the caller may wait before the next tick is due, or `None`
    /// while idle.
    pub fn time_until_tick(&self) -> Option<Duration> {
        self.ticker
            .as_ref()
            .map(|ticker| ticker.remaining(self.clock.now()))
    }

    /// Runs the due tick, if any. Returns whether a tick ran.
    pub fn poll(&mut self) -> bool {
        let now = self.clock.now();
        let due = self.ticker.as_mut().is_some_and(|ticker| ticker.fire(now));
        if due {
            self.tick();
        }
        due
    }

    /// Computes one generation while idle. Ignored while running.
    pub fn step(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.tick();
        true
    }

    fn tick(&mut self) {
        if !self.model.next_generation() {
            tracing::info!(
                generation = self.stats.generation,
                population = self.stats.current_population,
                "field reached a fixed point"
            );
            self.stop();
            self.presenter.game_finished(&self.stats);
            self.new_game();
            return;
        }

        self.stats
            .record(self.model.last_transition(), self.model.population());
        tracing::trace!(generation = self.stats.generation, "tick");
        self.presenter.render_grid(self.model.state());
    }
}
