//! Command-line configuration for a session.

use std::path::PathBuf;

use clap::Parser;

use crate::controller::Speed;
use crate::error::{LifeError, Result};

/// Largest accepted width or height.
pub const MAX_SIDE: usize = 1000;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Conway's Game of Life in the terminal", long_about = None)]
pub struct Args {
    /// Number of columns in the field
    #[arg(long, default_value_t = 60)]
    pub width: usize,

    /// Number of rows in the field
    #[arg(long, default_value_t = 30)]
    pub height: usize,

    /// Seconds per generation
    #[arg(short, long, default_value_t = 1.0)]
    pub speed: f64,

    /// Seed for random fills; omitted means a fresh seed every run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Fill the field randomly before the first frame
    #[arg(short, long)]
    pub random: bool,

    /// Write logs to this file (filtered by RUST_LOG)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Validated construction parameters for a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub width: usize,
    pub height: usize,
    pub speed: Speed,
    pub seed: Option<u64>,
    pub random_fill: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            width: 60,
            height: 30,
            speed: Speed::default(),
            seed: None,
            random_fill: false,
        }
    }
}

impl TryFrom<&Args> for SessionConfig {
    type Error = LifeError;

    fn try_from(args: &Args) -> Result<Self> {
        if args.width > MAX_SIDE || args.height > MAX_SIDE {
            return Err(LifeError::InvalidDimensions {
                width: args.width,
                height: args.height,
                limit: MAX_SIDE,
            });
        }

        Ok(SessionConfig {
            width: args.width,
            height: args.height,
            speed: Speed::from_secs(args.speed)?,
            seed: args.seed,
            random_fill: args.random,
        })
    }
}
