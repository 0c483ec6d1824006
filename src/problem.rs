//! # TourProblem
//!
//! The validated input of one optimization run: a fixed sequence of points
//! and the visiting tier of each point, matched by index.
//!
//! ## Example
//!
//! ```rust
//! use tiered_tour::geo::{Coordinate, Priority};
//! use tiered_tour::problem::TourProblem;
//!
//! let points = vec![
//!     Coordinate::new(0.0, 0.0),
//!     Coordinate::new(0.0, 1.0),
//!     Coordinate::new(1.0, 1.0),
//! ];
//! let problem = TourProblem::from_levels(points, &[2, 1, 2]).unwrap();
//!
//! assert_eq!(problem.len(), 3);
//! assert_eq!(problem.tier(Priority::Tier1), &[1]);
//! assert_eq!(problem.tier(Priority::Tier2), &[0, 2]);
//! ```

use crate::error::{Result, TourError};
use crate::geo::{Coordinate, Priority};

#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawTourProblem")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct TourProblem {
    points: Vec<Coordinate>,
    priorities: Vec<Priority>,
    #[cfg_attr(feature = "serde", serde(skip))]
    tiers: [Vec<usize>; 3],
}

impl TourProblem {
    /// Creates a problem from points and their tiers.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `points` is empty or the two sequences
    /// differ in length.
    pub fn new(points: Vec<Coordinate>, priorities: Vec<Priority>) -> Result<Self> {
        if points.is_empty() {
            return Err(TourError::InvalidInput(
                "At least one point is required".to_string(),
            ));
        }

        if points.len() != priorities.len() {
            return Err(TourError::InvalidInput(format!(
                "Got {} points but {} priorities",
                points.len(),
                priorities.len()
            )));
        }

        let mut tiers: [Vec<usize>; 3] = Default::default();
        for (idx, priority) in priorities.iter().enumerate() {
            tiers[priority.rank()].push(idx);
        }

        Ok(Self {
            points,
            priorities,
            tiers,
        })
    }

    /// Creates a problem from numeric tier values.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for any value outside `{1, 2, 3}`, in addition
    /// to the checks of [`TourProblem::new`].
    pub fn from_levels(points: Vec<Coordinate>, levels: &[u8]) -> Result<Self> {
        let priorities = levels
            .iter()
            .map(|&level| Priority::try_from(level))
            .collect::<Result<Vec<_>>>()?;
        Self::new(points, priorities)
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn priorities(&self) -> &[Priority] {
        &self.priorities
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false` for a constructed problem; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Indices of the points in `priority`, ascending.
    pub fn tier(&self, priority: Priority) -> &[usize] {
        &self.tiers[priority.rank()]
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawTourProblem {
    points: Vec<Coordinate>,
    priorities: Vec<Priority>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawTourProblem> for TourProblem {
    type Error = TourError;

    fn try_from(raw: RawTourProblem) -> Result<Self> {
        TourProblem::new(raw.points, raw.priorities)
    }
}
