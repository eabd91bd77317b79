//! Error types for the Game of Life session engine.
//!
//! Every failure here is a broken precondition on the caller's side; nothing
//! is transient and nothing is retried.

use thiserror::Error;

/// Main error type for grid and controller operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LifeError {
    /// A cell coordinate outside the current field
    #[error("cell ({x}, {y}) is outside the {width}x{height} field")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// Generation interval outside `(0, 86400]` seconds
    #[error("speed must be a positive number of seconds no larger than one day, got {0}")]
    InvalidSpeed(f64),

    /// Field dimensions rejected by the session configuration
    #[error("field size {width}x{height} exceeds the limit of {limit} cells per side")]
    InvalidDimensions {
        width: usize,
        height: usize,
        limit: usize,
    },
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, LifeError>;

impl LifeError {
    /// Creates an out-of-bounds error for a field of the given size.
    #[must_use]
    pub fn out_of_bounds(x: usize, y: usize, (width, height): (usize, usize)) -> Self {
        Self::OutOfBounds {
            x,
            y,
            width,
            height,
        }
    }
}
