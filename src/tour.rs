//! # Tour
//!
//! A tour is the chromosome of the genetic algorithm: a permutation of all
//! point indices, read as a closed cycle where the last point connects back
//! to the first.

use std::ops::Deref;

use crate::error::{Result, TourError};
use crate::geo::Priority;

#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tour(Vec<usize>);

impl Tour {
    pub fn new(order: Vec<usize>) -> Self {
        Self(order)
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }

    /// Swaps the genes at positions `i` and `j`.
    pub(crate) fn swap(&mut self, i: usize, j: usize) {
        self.0.swap(i, j);
    }

    /// Checks that the tour visits every index of `0..n` exactly once.
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolation` naming the first defect found.
    pub fn ensure_permutation(&self, n: usize) -> Result<()> {
        if self.0.len() != n {
            return Err(TourError::InvariantViolation(format!(
                "Tour has {} genes, expected {}",
                self.0.len(),
                n
            )));
        }

        let mut seen = vec![false; n];
        for (pos, &gene) in self.0.iter().enumerate() {
            if gene >= n {
                return Err(TourError::InvariantViolation(format!(
                    "Gene {} at position {} is out of range 0..{}",
                    gene, pos, n
                )));
            }
            if std::mem::replace(&mut seen[gene], true) {
                return Err(TourError::InvariantViolation(format!(
                    "Duplicate gene {} at position {}",
                    gene, pos
                )));
            }
        }

        Ok(())
    }

    /// Returns `true` if no point is visited after a point of a higher tier.
    pub fn is_tier_grouped(&self, priorities: &[Priority]) -> bool {
        self.0
            .windows(2)
            .all(|pair| priorities[pair[0]] <= priorities[pair[1]])
    }
}

impl Deref for Tour {
    type Target = [usize];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<usize>> for Tour {
    fn from(order: Vec<usize>) -> Self {
        Self(order)
    }
}
