//! # Error Types
//!
//! This module defines the error type shared by every operation of the crate.
//! Two families of failure exist: input rejections, reported before a run
//! starts, and internal invariant faults, which abort a run immediately.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use tiered_tour::error::{TourError, Result};
//!
//! fn check_population_size(size: usize) -> Result<()> {
//!     if size < 2 {
//!         return Err(TourError::InvalidInput(format!(
//!             "Population size must be at least 2, got {}",
//!             size
//!         )));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_population_size(1).is_err());
//! assert!(check_population_size(10).is_ok());
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use tiered_tour::error::{TourError, OptionExt};
//!
//! fn shortest(lengths: &[f64]) -> tiered_tour::error::Result<f64> {
//!     lengths
//!         .iter()
//!         .copied()
//!         .min_by(f64::total_cmp)
//!         .ok_or_else_tour(|| TourError::EmptyPopulation)
//! }
//!
//! assert_eq!(shortest(&[3.0, 1.0, 2.0]).unwrap(), 1.0);
//! assert!(shortest(&[]).is_err());
//! ```

use thiserror::Error;

/// Represents errors that can occur while building or evolving tours.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TourError {
    /// The caller handed in data the optimizer cannot work with.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An option value is outside of its accepted range.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An operation that needs individuals received none.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// A produced tour is not a permutation of the point indices.
    ///
    /// This is a programming fault, never a recoverable condition.
    #[error("Internal invariant violated: {0}")]
    InvariantViolation(String),
}

/// A specialized Result type for tour optimization.
pub type Result<T> = std::result::Result<T, TourError>;

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, TourError>` using
    /// a closure to generate the error.
    fn ok_or_else_tour<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> TourError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_tour<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> TourError,
    {
        self.ok_or_else(err_fn)
    }
}
