//! # Breeding
//!
//! Offspring of a generation are produced one at a time: two parents are
//! picked by tournament, recombined with [`PriorityCrossover`], and the child
//! is passed through [`SwapMutation`].
pub mod crossover;
pub mod mutation;

pub use crossover::PriorityCrossover;
pub use mutation::SwapMutation;

use crate::error::{Result, TourError};
use crate::geo::Priority;
use crate::rng::RandomNumberGenerator;
use crate::selection::TournamentSelection;
use crate::tour::Tour;

/// Produces children from a scored generation.
#[derive(Debug, Clone)]
pub struct PriorityBreeder {
    selection: TournamentSelection,
    crossover: PriorityCrossover,
    mutation: SwapMutation,
}

impl PriorityBreeder {
    pub fn new(selection: TournamentSelection, mutation: SwapMutation) -> Self {
        Self {
            selection,
            crossover: PriorityCrossover,
            mutation,
        }
    }

    /// Breeds a single child of `population`.
    ///
    /// # Errors
    ///
    /// Returns `EmptyPopulation` or `InvalidInput` for a malformed generation,
    /// and `InvariantViolation` if recombination yields a non-permutation.
    pub fn breed_one(
        &self,
        population: &[Tour],
        fitness: &[f64],
        priorities: &[Priority],
        rng: &mut RandomNumberGenerator,
    ) -> Result<Tour> {
        let parent_a = self.selection.select_parent(population, fitness, rng)?;
        let parent_b = self.selection.select_parent(population, fitness, rng)?;

        let mut child = self.crossover.crossover(parent_a, parent_b, rng)?;
        self.mutation.mutate(&mut child, priorities, rng);
        Ok(child)
    }

    /// Breeds `num_offspring` children of `population`.
    pub fn breed(
        &self,
        population: &[Tour],
        fitness: &[f64],
        priorities: &[Priority],
        num_offspring: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Tour>> {
        if population.is_empty() {
            return Err(TourError::EmptyPopulation);
        }

        (0..num_offspring)
            .map(|_| self.breed_one(population, fitness, priorities, rng))
            .collect()
    }
}
