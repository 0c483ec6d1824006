use std::fmt::Debug;

use crate::error::{Result, TourError};
use crate::rng::RandomNumberGenerator;
use crate::tour::Tour;

/// Trait for selection strategies over a generation of tours.
///
/// Strategies pick individuals by fitness, where fitness is tour length and
/// lower is better. They return positions into `population` rather than
/// copies, and never modify the population.
///
/// # Examples
///
/// ```
/// use tiered_tour::rng::RandomNumberGenerator;
/// use tiered_tour::selection::{ElitistSelection, SelectionStrategy};
/// use tiered_tour::tour::Tour;
///
/// let population = vec![
///     Tour::new(vec![0, 1, 2]),
///     Tour::new(vec![1, 0, 2]),
///     Tour::new(vec![2, 1, 0]),
/// ];
/// let fitness = vec![12.0, 9.5, 30.0];
/// let mut rng = RandomNumberGenerator::from_seed(1);
///
/// let selected = ElitistSelection.select(&population, &fitness, 2, &mut rng).unwrap();
/// assert_eq!(selected, vec![1, 0]);
/// ```
pub trait SelectionStrategy: Debug + Send + Sync {
    /// Selects individuals from the population based on their fitness.
    ///
    /// # Arguments
    ///
    /// * `population` - The current generation.
    /// * `fitness` - The tour length of each individual, by position.
    /// * `num_to_select` - The number of individuals to select.
    /// * `rng` - The run's random number generator.
    ///
    /// # Returns
    ///
    /// Positions of the selected individuals in `population`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The population is empty
    /// - The fitness vector length doesn't match the population length
    fn select(
        &self,
        population: &[Tour],
        fitness: &[f64],
        num_to_select: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<usize>>;
}

/// Shared argument checks of the selection strategies.
pub(crate) fn check_population(population: &[Tour], fitness: &[f64]) -> Result<()> {
    if population.is_empty() {
        return Err(TourError::EmptyPopulation);
    }

    if fitness.len() != population.len() {
        return Err(TourError::InvalidInput(format!(
            "Fitness vector length ({}) doesn't match population length ({})",
            fitness.len(),
            population.len()
        )));
    }

    Ok(())
}
