//! # PopulationFactory
//!
//! Builds the first generation: every tour lists the tier-1 points, then the
//! tier-2 points, then the tier-3 points, each tier in uniformly random order.
//!
//! ## Example
//!
//! ```rust
//! use tiered_tour::geo::Coordinate;
//! use tiered_tour::population::PopulationFactory;
//! use tiered_tour::problem::TourProblem;
//! use tiered_tour::rng::RandomNumberGenerator;
//!
//! let points = (0..5).map(|i| Coordinate::new(i as f64, 0.0)).collect();
//! let problem = TourProblem::from_levels(points, &[3, 1, 2, 1, 3]).unwrap();
//! let mut rng = RandomNumberGenerator::from_seed(1);
//!
//! let population = PopulationFactory::create_population(&problem, 10, &mut rng).unwrap();
//!
//! assert_eq!(population.len(), 10);
//! assert!(population
//!     .iter()
//!     .all(|tour| tour.is_tier_grouped(problem.priorities())));
//! ```

use crate::error::{Result, TourError};
use crate::geo::Priority;
use crate::problem::TourProblem;
use crate::rng::RandomNumberGenerator;
use crate::tour::Tour;

/// A generation of tours.
pub type Population = Vec<Tour>;

/// Creates tier-grouped random tours.
#[derive(Debug, Clone, Copy, Default)]
pub struct PopulationFactory;

impl PopulationFactory {
    /// Creates one tour: each tier shuffled on its own, tiers concatenated in order.
    pub fn create_tour(problem: &TourProblem, rng: &mut RandomNumberGenerator) -> Tour {
        let mut order = Vec::with_capacity(problem.len());
        for priority in Priority::ALL {
            let start = order.len();
            order.extend_from_slice(problem.tier(priority));
            rng.shuffle(&mut order[start..]);
        }
        Tour::new(order)
    }

    /// Creates `size` independent tours.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `size` is less than 2.
    pub fn create_population(
        problem: &TourProblem,
        size: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Population> {
        if size < 2 {
            return Err(TourError::InvalidInput(format!(
                "Population size must be at least 2, got {}",
                size
            )));
        }

        Ok((0..size)
            .map(|_| Self::create_tour(problem, rng))
            .collect())
    }
}
