use tracing::instrument;

use super::options::{EvolutionOptions, LogLevel};
use crate::{
    breeding::{PriorityBreeder, SwapMutation},
    error::{OptionExt, Result, TourError},
    evaluation::TourEvaluator,
    population::{Population, PopulationFactory},
    problem::TourProblem,
    rng::RandomNumberGenerator,
    selection::{ElitistSelection, SelectionStrategy, TournamentSelection},
    tour::Tour,
};

/// Why a run stopped.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// All `num_generations` generations were run.
    GenerationBudget,
    /// `max_no_improvement` consecutive generations found no shorter tour.
    Stalled,
}

/// The best tour of a run and its length in kilometres.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionResult {
    /// The shortest tour found.
    pub tour: Tour,
    /// Its cyclic length in kilometres.
    pub fitness: f64,
    /// Number of generations run.
    pub generations: usize,
    pub termination: Termination,
}

/// Progress of one completed generation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationReport {
    /// 1-based generation number.
    pub generation: usize,
    /// Shortest length found so far in the run.
    pub best_fitness: f64,
    /// Shortest length within this generation.
    pub generation_best: f64,
    /// Consecutive generations without a strictly shorter tour.
    pub stall: usize,
}

/// Owns the population of one run and evolves it generation by generation.
#[derive(Debug)]
pub struct EvolutionEngine {
    problem: TourProblem,
    options: EvolutionOptions,
    evaluator: TourEvaluator,
    breeder: PriorityBreeder,
    population: Population,
    fitness: Vec<f64>,
    best_tour: Tour,
    best_fitness: f64,
    generation: usize,
    stall: usize,
}

impl EvolutionEngine {
    /// Validates `options` and builds the initial generation.
    ///
    /// The best tour of the initial generation seeds the best-so-far record.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` or `Configuration` if `options` do not validate.
    pub fn new(
        problem: TourProblem,
        options: EvolutionOptions,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Self> {
        options.validate()?;

        let breeder = PriorityBreeder::new(
            TournamentSelection::new(options.get_tournament_size())?,
            SwapMutation::new(options.get_mutation_rate())?,
        );
        let evaluator = TourEvaluator::new(options.get_cache_type());

        let population =
            PopulationFactory::create_population(&problem, options.get_population_size(), rng)?;
        let fitness = evaluator.evaluate_population(
            &population,
            problem.points(),
            options.get_parallel_threshold(),
        );

        let best_idx = shortest(&fitness).ok_or_else_tour(|| TourError::EmptyPopulation)?;
        let best_tour = population[best_idx].clone();
        let best_fitness = fitness[best_idx];

        Ok(Self {
            problem,
            options,
            evaluator,
            breeder,
            population,
            fitness,
            best_tour,
            best_fitness,
            generation: 0,
            stall: 0,
        })
    }

    /// Replaces the population with the next generation.
    ///
    /// The `elitism` shortest tours are carried over unchanged; the rest of the
    /// generation is bred from tournament winners. Afterwards the best-so-far
    /// record and the stall counter are updated.
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolation` if a child is not a permutation.
    pub fn step(&mut self, rng: &mut RandomNumberGenerator) -> Result<GenerationReport> {
        let size = self.options.get_population_size();
        let elites = ElitistSelection.select(
            &self.population,
            &self.fitness,
            self.options.get_elitism(),
            rng,
        )?;

        let mut next: Population = Vec::with_capacity(size);
        next.extend(elites.iter().map(|&idx| self.population[idx].clone()));
        let children = self.breeder.breed(
            &self.population,
            &self.fitness,
            self.problem.priorities(),
            size - next.len(),
            rng,
        )?;
        next.extend(children);

        self.fitness = self.evaluator.evaluate_population(
            &next,
            self.problem.points(),
            self.options.get_parallel_threshold(),
        );
        self.population = next;
        self.generation += 1;

        let best_idx = shortest(&self.fitness).ok_or_else_tour(|| TourError::EmptyPopulation)?;
        let generation_best = self.fitness[best_idx];
        if generation_best < self.best_fitness {
            self.best_tour = self.population[best_idx].clone();
            self.best_fitness = generation_best;
            self.stall = 0;
        } else {
            self.stall += 1;
        }

        let report = GenerationReport {
            generation: self.generation,
            best_fitness: self.best_fitness,
            generation_best,
            stall: self.stall,
        };
        self.log_generation(&report);
        Ok(report)
    }

    /// Returns why the run is over, or `None` while generations remain.
    pub fn termination(&self) -> Option<Termination> {
        let stalled = self
            .options
            .get_max_no_improvement()
            .is_some_and(|max| self.generation > 0 && self.stall >= max);

        if stalled {
            Some(Termination::Stalled)
        } else if self.generation >= self.options.get_num_generations() {
            Some(Termination::GenerationBudget)
        } else {
            None
        }
    }

    /// Lazily runs the remaining generations, yielding one report each.
    ///
    /// The stream ends when the run terminates or after the first error.
    pub fn generations<'a>(&'a mut self, rng: &'a mut RandomNumberGenerator) -> Generations<'a> {
        Generations {
            engine: self,
            rng,
            failed: false,
        }
    }

    /// Runs the remaining generations and returns the best tour found.
    #[instrument(
        level = "info",
        skip_all,
        fields(points = self.problem.len(), population = self.options.get_population_size())
    )]
    pub fn run(&mut self, rng: &mut RandomNumberGenerator) -> Result<EvolutionResult> {
        if self.options.get_log_level() != LogLevel::None {
            tracing::info!(
                initial_best_km = self.best_fitness,
                max_generations = self.options.get_num_generations(),
                "Starting evolution"
            );
        }

        for report in self.generations(rng) {
            report?;
        }

        let result = self.result().ok_or_else_tour(|| {
            TourError::InvariantViolation("Generation stream ended before termination".to_string())
        })?;

        if self.options.get_log_level() != LogLevel::None {
            tracing::info!(
                generations = result.generations,
                best_km = result.fitness,
                termination = ?result.termination,
                "Evolution finished"
            );
        }

        Ok(result)
    }

    /// The best tour of a finished run, or `None` while generations remain.
    pub fn result(&self) -> Option<EvolutionResult> {
        let termination = self.termination()?;
        Some(EvolutionResult {
            tour: self.best_tour.clone(),
            fitness: self.best_fitness,
            generations: self.generation,
            termination,
        })
    }

    pub fn best_tour(&self) -> &Tour {
        &self.best_tour
    }

    pub fn best_fitness(&self) -> f64 {
        self.best_fitness
    }

    pub fn population(&self) -> &[Tour] {
        &self.population
    }

    /// Tour lengths of the current population, by position.
    pub fn fitness(&self) -> &[f64] {
        &self.fitness
    }

    /// Number of completed generations.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn stall_count(&self) -> usize {
        self.stall
    }

    pub fn problem(&self) -> &TourProblem {
        &self.problem
    }

    fn log_generation(&self, report: &GenerationReport) {
        match self.options.get_log_level() {
            LogLevel::Minimal => tracing::info!(
                generation = report.generation,
                best_km = report.best_fitness,
                stall = report.stall,
                "Generation complete"
            ),
            LogLevel::Verbose => {
                tracing::info!(
                    generation = report.generation,
                    best_km = report.best_fitness,
                    stall = report.stall,
                    "Generation complete"
                );
                let worst = self.fitness.iter().copied().fold(f64::MIN, f64::max);
                let mean = self.fitness.iter().sum::<f64>() / self.fitness.len() as f64;
                tracing::debug!(
                    generation = report.generation,
                    shortest_km = report.generation_best,
                    mean_km = mean,
                    longest_km = worst,
                    "Generation fitness spread"
                );
            }
            LogLevel::None => {}
        }
    }
}

/// Position of the first shortest tour.
fn shortest(fitness: &[f64]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (idx, &score) in fitness.iter().enumerate() {
        if best.map_or(true, |b| score < fitness[b]) {
            best = Some(idx);
        }
    }
    best
}

/// Lazy, finite stream of generation reports.
///
/// Created by [`EvolutionEngine::generations`]. Once exhausted, a stream of the
/// same engine stays empty.
pub struct Generations<'a> {
    engine: &'a mut EvolutionEngine,
    rng: &'a mut RandomNumberGenerator,
    failed: bool,
}

impl Iterator for Generations<'_> {
    type Item = Result<GenerationReport>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.engine.termination().is_some() {
            return None;
        }

        let report = self.engine.step(self.rng);
        self.failed = report.is_err();
        Some(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinate;

    fn grid_problem() -> TourProblem {
        let points = (0..12)
            .map(|i| Coordinate::new((i / 4) as f64 * 0.1, (i % 4) as f64 * 0.1))
            .collect();
        TourProblem::from_levels(points, &[1, 2, 3, 1, 2, 3, 1, 2, 3, 1, 2, 3]).unwrap()
    }

    #[test]
    fn test_shortest_prefers_first() {
        assert_eq!(shortest(&[3.0, 1.0, 1.0, 2.0]), Some(1));
        assert_eq!(shortest(&[]), None);
    }

    #[test]
    fn test_step_keeps_population_size_and_elite() {
        let mut rng = RandomNumberGenerator::from_seed(12);
        let options = EvolutionOptions::builder()
            .population_size(16)
            .num_generations(10)
            .mutation_rate(0.2)
            .elitism(2)
            .build();
        let mut engine = EvolutionEngine::new(grid_problem(), options, &mut rng).unwrap();

        let ranked = ElitistSelection::rank(engine.fitness());
        let elite = engine.population()[ranked[0]].clone();

        let report = engine.step(&mut rng).unwrap();
        assert_eq!(report.generation, 1);
        assert_eq!(engine.population().len(), 16);
        assert_eq!(engine.population()[0], elite);
        for tour in engine.population() {
            tour.ensure_permutation(12).unwrap();
            assert!(tour.is_tier_grouped(engine.problem().priorities()));
        }
    }

    #[test]
    fn test_zero_generations() {
        let mut rng = RandomNumberGenerator::from_seed(12);
        let options = EvolutionOptions::new(8, 0, 0.1);
        let mut engine = EvolutionEngine::new(grid_problem(), options, &mut rng).unwrap();

        let initial_best = engine.best_fitness();
        let result = engine.run(&mut rng).unwrap();
        assert_eq!(result.generations, 0);
        assert_eq!(result.fitness, initial_best);
        assert_eq!(result.termination, Termination::GenerationBudget);
    }

    #[test]
    fn test_generation_stream_resumes_and_ends() {
        let mut rng = RandomNumberGenerator::from_seed(5);
        let options = EvolutionOptions::new(8, 4, 0.1);
        let mut engine = EvolutionEngine::new(grid_problem(), options, &mut rng).unwrap();

        let first: Vec<_> = engine.generations(&mut rng).take(3).collect();
        assert_eq!(first.len(), 3);

        assert_eq!(engine.result(), None);

        let rest: Vec<_> = engine
            .generations(&mut rng)
            .map(|report| report.unwrap().generation)
            .collect();
        assert_eq!(rest, vec![4]);
        assert_eq!(engine.generations(&mut rng).count(), 0);

        let result = engine.result().unwrap();
        assert_eq!(result.generations, 4);
        assert_eq!(result.termination, Termination::GenerationBudget);
    }

    #[test]
    fn test_stall_budget_of_zero_runs_one_generation() {
        let mut rng = RandomNumberGenerator::from_seed(5);
        let options = EvolutionOptions::builder()
            .population_size(8)
            .num_generations(10)
            .max_no_improvement(0)
            .build();
        let mut engine = EvolutionEngine::new(grid_problem(), options, &mut rng).unwrap();

        let result = engine.run(&mut rng).unwrap();
        assert_eq!(result.generations, 1);
        assert_eq!(result.termination, Termination::Stalled);
    }

    #[test]
    fn test_improvement_resets_stall() {
        let mut rng = RandomNumberGenerator::from_seed(9);
        let options = EvolutionOptions::builder()
            .population_size(8)
            .num_generations(10)
            .max_no_improvement(5)
            .build();
        let mut engine = EvolutionEngine::new(grid_problem(), options, &mut rng).unwrap();

        engine.best_fitness = f64::INFINITY;
        engine.stall = 4;
        let report = engine.step(&mut rng).unwrap();

        assert_eq!(report.stall, 0);
        assert_eq!(engine.stall_count(), 0);
        assert_eq!(engine.best_fitness(), report.generation_best);
        assert_eq!(engine.termination(), None);

        let report = engine.step(&mut rng).unwrap();
        assert!(report.stall <= 1);
    }

    #[test]
    fn test_invalid_options_rejected_up_front() {
        let mut rng = RandomNumberGenerator::from_seed(5);
        let options = EvolutionOptions::new(1, 10, 0.1);
        let result = EvolutionEngine::new(grid_problem(), options, &mut rng);
        assert!(matches!(result, Err(TourError::InvalidInput(_))));
    }
}
