//! # Game of Life session engine
//!
//! A bounded Conway's Game of Life field ([`grid`]) driven on a cancellable
//! cadence by an [`ExecutionController`], which reports every change to a
//! [`PresentationPort`]. The [`tui`] module is the terminal implementation
//! of that port.

pub mod clock;
pub mod config;
pub mod controller;
pub mod error;
pub mod grid;
pub mod logging;
pub mod stats;
pub mod ticker;
pub mod tui;

pub use clock::{Clock, ManualClock, SystemClock};
pub use controller::{ExecutionController, PresentationPort, RunState, Speed};
pub use error::{LifeError, Result};
pub use grid::{Cell, Grid, GridModel, LifeGrid, Transition};
pub use stats::Stats;
