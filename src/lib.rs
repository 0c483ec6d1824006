//! # tiered-tour
//!
//! A genetic algorithm searching for a short closed tour over geographic
//! points, where every point carries one of three visiting tiers and all
//! tier-1 points must be visited before any tier-2 point, and all tier-2
//! points before any tier-3 point.
//!
//! ## Example
//!
//! ```rust
//! use tiered_tour::evolution::EvolutionOptions;
//! use tiered_tour::geo::Coordinate;
//! use tiered_tour::rng::RandomNumberGenerator;
//!
//! let points = vec![
//!     Coordinate::new(-8.05, -34.88),
//!     Coordinate::new(-8.12, -34.90),
//!     Coordinate::new(-8.03, -34.95),
//!     Coordinate::new(-8.09, -34.97),
//!     Coordinate::new(-8.00, -34.85),
//! ];
//! let priorities = [1, 2, 3, 3, 2];
//! let options = EvolutionOptions::builder()
//!     .population_size(30)
//!     .num_generations(40)
//!     .mutation_rate(0.1)
//!     .build();
//! let mut rng = RandomNumberGenerator::from_seed(42);
//!
//! let result = tiered_tour::run_optimization(&points, &priorities, &options, &mut rng).unwrap();
//!
//! assert_eq!(result.tour[0], 0);
//! assert!(result.fitness > 0.0);
//! ```

pub mod breeding;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod evolution;
pub mod geo;
pub mod population;
pub mod problem;
pub mod rng;
pub mod selection;
pub mod tour;

// Re-export commonly used types for convenience
pub use error::{OptionExt, Result, TourError};
pub use evolution::{EvolutionEngine, EvolutionOptions, EvolutionResult, GenerationReport};
pub use geo::{Coordinate, Priority};
pub use population::Population;
pub use problem::TourProblem;
pub use tour::Tour;

use population::PopulationFactory;
use rng::RandomNumberGenerator;

/// Builds an initial population of `population_size` tier-grouped random tours.
///
/// # Errors
///
/// Returns `InvalidInput` if `points` is empty, if `points` and `priorities`
/// differ in length, if a priority is outside `{1, 2, 3}`, or if
/// `population_size` is less than 2.
pub fn initialize(
    points: &[Coordinate],
    priorities: &[u8],
    population_size: usize,
    rng: &mut RandomNumberGenerator,
) -> Result<Population> {
    let problem = TourProblem::from_levels(points.to_vec(), priorities)?;
    PopulationFactory::create_population(&problem, population_size, rng)
}

/// Runs one optimization and returns the shortest tier-respecting tour found.
///
/// # Errors
///
/// Fails up front with `InvalidInput` or `Configuration` for rejected input
/// or options, and aborts with `InvariantViolation` on an internal fault.
pub fn run_optimization(
    points: &[Coordinate],
    priorities: &[u8],
    options: &EvolutionOptions,
    rng: &mut RandomNumberGenerator,
) -> Result<EvolutionResult> {
    let problem = TourProblem::from_levels(points.to_vec(), priorities)?;
    let mut engine = EvolutionEngine::new(problem, options.clone(), rng)?;
    engine.run(rng)
}
