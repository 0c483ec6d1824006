use crate::error::Result;
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::{check_population, SelectionStrategy};
use crate::tour::Tour;

/// A selection strategy that selects the shortest tours.
///
/// Individuals are ranked by ascending tour length; equal lengths keep their
/// population order. This is the elite carry-over of each generation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default)]
pub struct ElitistSelection;

impl ElitistSelection {
    /// Positions of the whole population, shortest tour first.
    pub fn rank(fitness: &[f64]) -> Vec<usize> {
        let mut order: Vec<usize> = (0..fitness.len()).collect();
        order.sort_by(|&a, &b| fitness[a].total_cmp(&fitness[b]));
        order
    }
}

impl SelectionStrategy for ElitistSelection {
    fn select(
        &self,
        population: &[Tour],
        fitness: &[f64],
        num_to_select: usize,
        _rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<usize>> {
        check_population(population, fitness)?;

        let mut ranked = Self::rank(fitness);
        ranked.truncate(num_to_select);
        Ok(ranked)
    }
}
