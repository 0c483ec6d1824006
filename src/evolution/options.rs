//! # EvolutionOptions
//!
//! The `EvolutionOptions` struct represents the configuration of one
//! optimization run: population and generation budgets, operator rates,
//! elitism, the stall budget, and the evaluation and logging settings.
//!
//! ## Example
//!
//! ```rust
//! use tiered_tour::evolution::options::{EvolutionOptions, LogLevel};
//!
//! // Population 50, at most 200 generations, 10% mutation rate
//! let custom_options = EvolutionOptions::new(50, 200, 0.1);
//!
//! // Same, with a stall budget and per-generation logging
//! let options = EvolutionOptions::builder()
//!     .population_size(50)
//!     .num_generations(200)
//!     .mutation_rate(0.1)
//!     .max_no_improvement(20)
//!     .log_level(LogLevel::Minimal)
//!     .build();
//!
//! assert!(options.validate().is_ok());
//! ```
//!
//! ## Fields
//!
//! - `population_size`: Number of tours in every generation, at least 2.
//! - `num_generations`: Upper bound on the number of generations.
//! - `mutation_rate`: Probability of a swap attempt per child, within `[0, 1]`.
//! - `elitism`: Number of shortest tours copied unchanged into the next generation.
//! - `max_no_improvement`: Consecutive generations without a strictly shorter
//!   tour after which the run stops. `None` never stops early.
//! - `tournament_size`: Entrants per parent tournament.
//! - `log_level`: Verbosity of the `tracing` events emitted by the run.
//! - `parallel_threshold`: Minimum population size evaluated in parallel.
//! - `cache_type`: Layout of the distance cache.

use crate::distance::CacheType;
use crate::error::{Result, TourError};
use crate::selection::tournament::DEFAULT_TOURNAMENT_SIZE;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Per-generation progress plus the fitness spread of each generation.
    Verbose,
    /// Run start, per-generation progress and termination.
    Minimal,
    #[default]
    None,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionOptions {
    population_size: usize,
    num_generations: usize,
    mutation_rate: f64,
    elitism: usize,
    max_no_improvement: Option<usize>,
    tournament_size: usize,
    log_level: LogLevel,
    /// Minimum number of tours to evaluate in parallel
    parallel_threshold: usize,
    cache_type: CacheType,
}

impl EvolutionOptions {
    pub fn new(population_size: usize, num_generations: usize, mutation_rate: f64) -> Self {
        Self {
            population_size,
            num_generations,
            mutation_rate,
            ..Self::default()
        }
    }

    /// Checks every option before a run starts.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the population size is below 2, and
    /// `Configuration` for a mutation rate outside `[0, 1]`, an elitism larger
    /// than the population, a tournament size of 0, or a parallel threshold of 0.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(TourError::InvalidInput(format!(
                "Population size must be at least 2, got {}",
                self.population_size
            )));
        }

        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(TourError::Configuration(format!(
                "Mutation rate must be within [0, 1], got {}",
                self.mutation_rate
            )));
        }

        if self.elitism > self.population_size {
            return Err(TourError::Configuration(format!(
                "Elitism ({}) cannot exceed the population size ({})",
                self.elitism, self.population_size
            )));
        }

        if self.tournament_size == 0 {
            return Err(TourError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }

        if self.parallel_threshold == 0 {
            return Err(TourError::Configuration(
                "Parallel threshold must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    pub fn get_num_generations(&self) -> usize {
        self.num_generations
    }

    pub fn get_mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    pub fn get_elitism(&self) -> usize {
        self.elitism
    }

    pub fn get_max_no_improvement(&self) -> Option<usize> {
        self.max_no_improvement
    }

    pub fn get_tournament_size(&self) -> usize {
        self.tournament_size
    }

    pub fn get_log_level(&self) -> LogLevel {
        self.log_level
    }

    /// Returns the minimum number of tours to evaluate in parallel.
    pub fn get_parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    pub fn get_cache_type(&self) -> CacheType {
        self.cache_type
    }

    pub fn set_population_size(&mut self, population_size: usize) {
        self.population_size = population_size;
    }

    pub fn set_num_generations(&mut self, num_generations: usize) {
        self.num_generations = num_generations;
    }

    pub fn set_mutation_rate(&mut self, mutation_rate: f64) {
        self.mutation_rate = mutation_rate;
    }

    pub fn set_elitism(&mut self, elitism: usize) {
        self.elitism = elitism;
    }

    /// Sets the stall budget; `None` disables early stopping.
    pub fn set_max_no_improvement(&mut self, max_no_improvement: Option<usize>) {
        self.max_no_improvement = max_no_improvement;
    }

    pub fn set_tournament_size(&mut self, tournament_size: usize) {
        self.tournament_size = tournament_size;
    }

    pub fn set_log_level(&mut self, log_level: LogLevel) {
        self.log_level = log_level;
    }

    pub fn set_parallel_threshold(&mut self, threshold: usize) {
        self.parallel_threshold = threshold;
    }

    pub fn set_cache_type(&mut self, cache_type: CacheType) {
        self.cache_type = cache_type;
    }

    /// Returns a builder for creating an `EvolutionOptions` instance.
    pub fn builder() -> EvolutionOptionsBuilder {
        EvolutionOptionsBuilder::default()
    }
}

impl Default for EvolutionOptions {
    fn default() -> Self {
        Self {
            population_size: 100,
            num_generations: 100,
            mutation_rate: 0.05,
            elitism: 1,
            max_no_improvement: None,
            tournament_size: DEFAULT_TOURNAMENT_SIZE,
            log_level: LogLevel::None,
            parallel_threshold: 1000,
            cache_type: CacheType::Global,
        }
    }
}

/// Builder for `EvolutionOptions`.
///
/// Unset values fall back to [`EvolutionOptions::default`].
#[derive(Debug, Clone, Default)]
pub struct EvolutionOptionsBuilder {
    population_size: Option<usize>,
    num_generations: Option<usize>,
    mutation_rate: Option<f64>,
    elitism: Option<usize>,
    max_no_improvement: Option<usize>,
    tournament_size: Option<usize>,
    log_level: Option<LogLevel>,
    parallel_threshold: Option<usize>,
    cache_type: Option<CacheType>,
}

impl EvolutionOptionsBuilder {
    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    pub fn num_generations(mut self, value: usize) -> Self {
        self.num_generations = Some(value);
        self
    }

    pub fn mutation_rate(mut self, value: f64) -> Self {
        self.mutation_rate = Some(value);
        self
    }

    pub fn elitism(mut self, value: usize) -> Self {
        self.elitism = Some(value);
        self
    }

    /// Stops the run after `value` consecutive generations without improvement.
    pub fn max_no_improvement(mut self, value: usize) -> Self {
        self.max_no_improvement = Some(value);
        self
    }

    pub fn tournament_size(mut self, value: usize) -> Self {
        self.tournament_size = Some(value);
        self
    }

    pub fn log_level(mut self, value: LogLevel) -> Self {
        self.log_level = Some(value);
        self
    }

    pub fn parallel_threshold(mut self, value: usize) -> Self {
        self.parallel_threshold = Some(value);
        self
    }

    pub fn cache_type(mut self, value: CacheType) -> Self {
        self.cache_type = Some(value);
        self
    }

    /// Builds the `EvolutionOptions` instance.
    pub fn build(self) -> EvolutionOptions {
        let default = EvolutionOptions::default();
        EvolutionOptions {
            population_size: self.population_size.unwrap_or(default.population_size),
            num_generations: self.num_generations.unwrap_or(default.num_generations),
            mutation_rate: self.mutation_rate.unwrap_or(default.mutation_rate),
            elitism: self.elitism.unwrap_or(default.elitism),
            max_no_improvement: self.max_no_improvement.or(default.max_no_improvement),
            tournament_size: self.tournament_size.unwrap_or(default.tournament_size),
            log_level: self.log_level.unwrap_or(default.log_level),
            parallel_threshold: self
                .parallel_threshold
                .unwrap_or(default.parallel_threshold),
            cache_type: self.cache_type.unwrap_or(default.cache_type),
        }
    }
}
