//! Running statistics for one game.

use crate::grid::Transition;

/// Stores statistics about the current game.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Stats {
    /// Generations computed since the game started
    pub generation: u64,
    /// Total number of cells born since the game started
    pub cells_created: u64,
    /// Total number of cells that died since the game started
    pub cells_destroyed: u64,
    /// Current number of living cells
    pub current_population: u64,
}

impl Stats {
    /// Creates a `Stats` instance with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accounts for one computed generation.
    pub fn record(&mut self, transition: Transition, population: usize) {
        self.generation += 1;
        self.cells_created += transition.births;
        self.cells_destroyed += transition.deaths;
        self.current_population = population as u64;
    }

    /// Starts counting a new game whose field holds `population` live cells.
    pub fn reset(&mut self, population: usize) {
        *self = Stats {
            current_population: population as u64,
            ..Stats::default()
        };
    }

    /// Average births per generation.
    pub fn birth_rate(&self) -> f64 {
        self.cells_created as f64 / self.generation.max(1) as f64
    }

    /// Average deaths per generation.
    pub fn death_rate(&self) -> f64 {
        self.cells_destroyed as f64 / self.generation.max(1) as f64
    }
}
