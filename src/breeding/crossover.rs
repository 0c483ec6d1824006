//! # PriorityCrossover
//!
//! A partially-mapped style recombination: the child keeps one contiguous
//! segment of the first parent in place and receives every other point in the
//! order the second parent visits them.
//!
//! When both parents list the tiers in the same order, so does the child: the
//! free slots inside each tier's span are exactly as many as that tier's points
//! missing from the segment, and the second parent hands those points out tier
//! by tier.

use crate::error::{Result, TourError};
use crate::rng::RandomNumberGenerator;
use crate::tour::Tour;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default)]
pub struct PriorityCrossover;

impl PriorityCrossover {
    /// Produces one child of `parent_a` and `parent_b`.
    ///
    /// Two distinct cut points `p1 < p2` are drawn uniformly; `parent_a[p1..p2]`
    /// is copied into the child verbatim, and the remaining slots are filled
    /// left to right with the genes of `parent_b` not yet in the child.
    ///
    /// Tours of fewer than two points are returned as a copy of `parent_a`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the parents differ in length, and
    /// `InvariantViolation` if the child is not a permutation, which only
    /// happens when a parent is not one.
    pub fn crossover(
        &self,
        parent_a: &Tour,
        parent_b: &Tour,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Tour> {
        let n = parent_a.len();
        if parent_b.len() != n {
            return Err(TourError::InvalidInput(format!(
                "Cannot recombine tours of length {} and {}",
                n,
                parent_b.len()
            )));
        }

        if n < 2 {
            return Ok(parent_a.clone());
        }

        let (p1, p2) = rng.cut_points(n);
        Self::build_child(parent_a, parent_b, p1, p2)
    }

    /// Builds the child for fixed cut points.
    ///
    /// Slots `p1..p2` come from `parent_a`; every slot outside of it must be
    /// filled from `parent_b`. A slot left unset is reported, never patched.
    pub fn build_child(
        parent_a: &[usize],
        parent_b: &[usize],
        p1: usize,
        p2: usize,
    ) -> Result<Tour> {
        let n = parent_a.len();
        let mut child: Vec<Option<usize>> = vec![None; n];
        let mut placed = vec![false; n];

        for pos in p1..p2 {
            let gene = parent_a[pos];
            Self::mark(&mut placed, gene)?;
            child[pos] = Some(gene);
        }

        let mut free_slots = (0..p1).chain(p2..n);
        for &gene in parent_b {
            if gene < n && placed[gene] {
                continue;
            }
            Self::mark(&mut placed, gene)?;
            let slot = free_slots.next().ok_or_else(|| {
                TourError::InvariantViolation(format!(
                    "No free slot left for gene {} of the second parent",
                    gene
                ))
            })?;
            child[slot] = Some(gene);
        }

        let order = child
            .into_iter()
            .enumerate()
            .map(|(pos, gene)| {
                gene.ok_or_else(|| {
                    TourError::InvariantViolation(format!("Child slot {} was left unset", pos))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let child = Tour::new(order);
        child.ensure_permutation(n)?;
        Ok(child)
    }

    fn mark(placed: &mut [bool], gene: usize) -> Result<()> {
        match placed.get_mut(gene) {
            Some(slot) if !*slot => {
                *slot = true;
                Ok(())
            }
            Some(_) => Err(TourError::InvariantViolation(format!(
                "Gene {} appears twice in the first parent's segment",
                gene
            ))),
            None => Err(TourError::InvariantViolation(format!(
                "Gene {} is out of range 0..{}",
                gene,
                placed.len()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Priority::{self, *};

    #[test]
    fn test_segment_kept_and_rest_in_second_parent_order() {
        let a = [0, 1, 2, 3, 4, 5];
        let b = [5, 3, 1, 4, 0, 2];

        let child = PriorityCrossover::build_child(&a, &b, 2, 4).unwrap();

        // Slots 2..4 from `a`, then 5, 1, 4, 0 from `b` into slots 0, 1, 4, 5.
        assert_eq!(child.as_slice(), &[5, 1, 2, 3, 4, 0]);
    }

    #[test]
    fn test_segment_at_edges() {
        let a = [3, 2, 1, 0];
        let b = [0, 1, 2, 3];

        let head = PriorityCrossover::build_child(&a, &b, 0, 3).unwrap();
        assert_eq!(head.as_slice(), &[3, 2, 1, 0]);

        let tail = PriorityCrossover::build_child(&a, &b, 1, 3).unwrap();
        assert_eq!(tail.as_slice(), &[0, 2, 1, 3]);
    }

    #[test]
    fn test_random_children_are_permutations() {
        let a = Tour::new(vec![4, 2, 7, 0, 1, 6, 3, 5]);
        let b = Tour::new(vec![1, 0, 3, 2, 5, 4, 7, 6]);
        let mut rng = RandomNumberGenerator::from_seed(17);

        for _ in 0..200 {
            let child = PriorityCrossover.crossover(&a, &b, &mut rng).unwrap();
            child.ensure_permutation(8).unwrap();
        }
    }

    #[test]
    fn test_children_of_grouped_parents_stay_grouped() {
        let priorities: Vec<Priority> = vec![Tier2, Tier1, Tier3, Tier1, Tier2, Tier3, Tier1];
        let a = Tour::new(vec![1, 3, 6, 0, 4, 2, 5]);
        let b = Tour::new(vec![6, 1, 3, 4, 0, 5, 2]);
        assert!(a.is_tier_grouped(&priorities));
        assert!(b.is_tier_grouped(&priorities));

        let mut rng = RandomNumberGenerator::from_seed(8);
        for _ in 0..200 {
            let child = PriorityCrossover.crossover(&a, &b, &mut rng).unwrap();
            assert!(child.is_tier_grouped(&priorities));
        }
    }

    #[test]
    fn test_tiny_tours() {
        let mut rng = RandomNumberGenerator::from_seed(1);

        let single = Tour::new(vec![0]);
        let child = PriorityCrossover.crossover(&single, &single, &mut rng).unwrap();
        assert_eq!(child, single);

        let a = Tour::new(vec![0, 1]);
        let b = Tour::new(vec![1, 0]);
        let child = PriorityCrossover.crossover(&a, &b, &mut rng).unwrap();
        child.ensure_permutation(2).unwrap();
    }

    #[test]
    fn test_length_mismatch() {
        let mut rng = RandomNumberGenerator::from_seed(1);
        let result = PriorityCrossover.crossover(
            &Tour::new(vec![0, 1, 2]),
            &Tour::new(vec![0, 1]),
            &mut rng,
        );
        assert!(matches!(result, Err(TourError::InvalidInput(_))));
    }

    #[test]
    fn test_broken_parent_is_reported() {
        // The second parent never visits 3, so one slot stays unset.
        let result = PriorityCrossover::build_child(&[0, 1, 2, 3], &[0, 1, 2, 2], 0, 1);
        assert!(matches!(result, Err(TourError::InvariantViolation(_))));

        let result = PriorityCrossover::build_child(&[0, 0, 2], &[0, 1, 2], 0, 2);
        assert!(matches!(result, Err(TourError::InvariantViolation(_))));

        let result = PriorityCrossover::build_child(&[0, 1, 2], &[0, 9, 2], 0, 1);
        assert!(matches!(result, Err(TourError::InvariantViolation(_))));
    }
}
