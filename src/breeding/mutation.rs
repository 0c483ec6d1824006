//! # SwapMutation
//!
//! Exchanges two visits of the same tier. Swaps across tiers are skipped, so a
//! tier-grouped tour stays grouped.

use crate::error::{Result, TourError};
use crate::geo::Priority;
use crate::rng::RandomNumberGenerator;
use crate::tour::Tour;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwapMutation {
    rate: f64,
}

impl SwapMutation {
    /// Creates a mutation applied with probability `rate` per call.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` unless `rate` is within `[0, 1]`.
    pub fn new(rate: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&rate) {
            return Err(TourError::Configuration(format!(
                "Mutation rate must be within [0, 1], got {}",
                rate
            )));
        }

        Ok(Self { rate })
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Mutates `tour` in place.
    ///
    /// With probability `rate`, two distinct positions are drawn and their
    /// points are swapped if both belong to the same tier. Returns whether a
    /// swap happened.
    pub fn mutate(
        &self,
        tour: &mut Tour,
        priorities: &[Priority],
        rng: &mut RandomNumberGenerator,
    ) -> bool {
        if tour.len() < 2 || rng.probability() >= self.rate {
            return false;
        }

        let positions = rng.sample_distinct(tour.len(), 2);
        let (i, j) = (positions[0], positions[1]);
        if priorities[tour[i]] != priorities[tour[j]] {
            return false;
        }

        tour.swap(i, j);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Priority::*;

    #[test]
    fn test_rate_bounds() {
        assert!(SwapMutation::new(0.0).is_ok());
        assert!(SwapMutation::new(1.0).is_ok());
        assert!(matches!(
            SwapMutation::new(1.5),
            Err(TourError::Configuration(_))
        ));
        assert!(SwapMutation::new(-0.1).is_err());
        assert!(SwapMutation::new(f64::NAN).is_err());
    }

    #[test]
    fn test_zero_rate_never_mutates() {
        let mutation = SwapMutation::new(0.0).unwrap();
        let priorities = vec![Tier1; 5];
        let mut tour = Tour::new(vec![0, 1, 2, 3, 4]);
        let mut rng = RandomNumberGenerator::from_seed(4);

        for _ in 0..100 {
            assert!(!mutation.mutate(&mut tour, &priorities, &mut rng));
        }
        assert_eq!(tour.as_slice(), &[0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_single_tier_always_swaps() {
        let mutation = SwapMutation::new(1.0).unwrap();
        let priorities = vec![Tier2; 4];
        let mut rng = RandomNumberGenerator::from_seed(4);

        for _ in 0..50 {
            let mut tour = Tour::new(vec![0, 1, 2, 3]);
            assert!(mutation.mutate(&mut tour, &priorities, &mut rng));
            let moved = (0..4).filter(|&pos| tour[pos] != pos).count();
            assert_eq!(moved, 2);
            tour.ensure_permutation(4).unwrap();
        }
    }

    #[test]
    fn test_never_swaps_across_tiers() {
        let mutation = SwapMutation::new(1.0).unwrap();
        let priorities = vec![Tier1, Tier3, Tier2, Tier1, Tier3, Tier2];
        let mut tour = Tour::new(vec![0, 3, 2, 5, 1, 4]);
        let mut rng = RandomNumberGenerator::from_seed(99);

        let mut swaps = 0;
        for _ in 0..500 {
            let before = tour.clone();
            if mutation.mutate(&mut tour, &priorities, &mut rng) {
                swaps += 1;
            } else {
                assert_eq!(tour, before);
            }
            assert!(tour.is_tier_grouped(&priorities));
            tour.ensure_permutation(6).unwrap();
        }
        assert!(swaps > 0);
    }

    #[test]
    fn test_tiny_tours_unchanged() {
        let mutation = SwapMutation::new(1.0).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(1);

        let mut tour = Tour::new(vec![0]);
        assert!(!mutation.mutate(&mut tour, &[Tier1], &mut rng));
        assert_eq!(tour.as_slice(), &[0]);
    }
}
