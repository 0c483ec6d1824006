use crate::error::{Result, TourError};
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::{check_population, SelectionStrategy};
use crate::tour::Tour;

/// Tournament size used when none is configured.
pub const DEFAULT_TOURNAMENT_SIZE: usize = 3;

/// A selection strategy that selects individuals through tournament selection.
///
/// Each tournament draws `tournament_size` distinct individuals uniformly at
/// random and keeps the one with the shortest tour; on equal lengths the
/// first one drawn wins. Tournaments are independent of each other, so the
/// same individual may win several of them.
///
/// When the population is smaller than the tournament size, the tournament
/// is capped to the whole population.
///
/// # Examples
///
/// ```
/// use tiered_tour::rng::RandomNumberGenerator;
/// use tiered_tour::selection::TournamentSelection;
/// use tiered_tour::tour::Tour;
///
/// let population = vec![Tour::new(vec![0, 1]), Tour::new(vec![1, 0])];
/// let fitness = vec![4.0, 2.0];
/// let mut rng = RandomNumberGenerator::from_seed(5);
///
/// // A tournament of 3 over 2 individuals sees both of them.
/// let selection = TournamentSelection::default();
/// let winner = selection.select_parent(&population, &fitness, &mut rng).unwrap();
/// assert_eq!(winner, &population[1]);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TournamentSelection {
    tournament_size: usize,
}

impl TournamentSelection {
    /// Creates a new TournamentSelection strategy with the specified tournament size.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if `tournament_size` is 0.
    pub fn new(tournament_size: usize) -> Result<Self> {
        if tournament_size < 1 {
            return Err(TourError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }

        Ok(Self { tournament_size })
    }

    pub fn tournament_size(&self) -> usize {
        self.tournament_size
    }

    /// Runs a single tournament and returns the position of the winner.
    ///
    /// `fitness` must not be empty.
    pub fn run_tournament(&self, fitness: &[f64], rng: &mut RandomNumberGenerator) -> usize {
        let entrants = self.tournament_size.min(fitness.len());
        let participants = rng.sample_distinct(fitness.len(), entrants);

        let mut best_idx = participants[0];
        for &idx in &participants[1..] {
            if fitness[idx] < fitness[best_idx] {
                best_idx = idx;
            }
        }

        best_idx
    }

    /// Runs one tournament and borrows its winner from `population`.
    pub fn select_parent<'a>(
        &self,
        population: &'a [Tour],
        fitness: &[f64],
        rng: &mut RandomNumberGenerator,
    ) -> Result<&'a Tour> {
        check_population(population, fitness)?;
        Ok(&population[self.run_tournament(fitness, rng)])
    }
}

impl Default for TournamentSelection {
    fn default() -> Self {
        Self {
            tournament_size: DEFAULT_TOURNAMENT_SIZE,
        }
    }
}

impl SelectionStrategy for TournamentSelection {
    fn select(
        &self,
        population: &[Tour],
        fitness: &[f64],
        num_to_select: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<usize>> {
        check_population(population, fitness)?;

        Ok((0..num_to_select)
            .map(|_| self.run_tournament(fitness, rng))
            .collect())
    }
}
