//! # TourEvaluator
//!
//! Fitness of a tour is its total cyclic length in kilometres; lower is better.

use rayon::prelude::*;

use crate::distance::{CacheType, DistanceOracle};
use crate::geo::Coordinate;
use crate::tour::Tour;

/// Computes tour lengths through a run-long [`DistanceOracle`].
#[derive(Debug, Default)]
pub struct TourEvaluator {
    oracle: DistanceOracle,
}

impl TourEvaluator {
    pub fn new(cache_type: CacheType) -> Self {
        Self {
            oracle: DistanceOracle::new(cache_type),
        }
    }

    pub fn oracle(&self) -> &DistanceOracle {
        &self.oracle
    }

    /// Length of the closed tour visiting `points` in `tour` order, returning
    /// from the last point to the first.
    ///
    /// A tour of fewer than two points has length zero.
    ///
    /// # Panics
    ///
    /// Panics if `tour` holds an index outside of `points`.
    pub fn evaluate(&self, tour: &[usize], points: &[Coordinate]) -> f64 {
        let n = tour.len();
        (0..n)
            .map(|i| {
                self.oracle
                    .distance(&points[tour[i]], &points[tour[(i + 1) % n]])
            })
            .sum()
    }

    /// Evaluates every tour of a generation, in input order.
    ///
    /// Populations of at least `parallel_threshold` tours are evaluated on the
    /// rayon thread pool. The call returns only once every tour is scored.
    pub fn evaluate_population(
        &self,
        population: &[Tour],
        points: &[Coordinate],
        parallel_threshold: usize,
    ) -> Vec<f64> {
        if population.len() >= parallel_threshold {
            population
                .par_iter()
                .map(|tour| self.evaluate(tour, points))
                .collect()
        } else {
            population
                .iter()
                .map(|tour| self.evaluate(tour, points))
                .collect()
        }
    }
}
