//! # DistanceOracle
//!
//! Fitness evaluation asks for the same point pairs over and over: every
//! individual of every generation walks `n` edges. The oracle memoizes each
//! great-circle distance the first time it is computed and serves every later
//! lookup from its cache for the rest of the run.
//!
//! ## Example
//!
//! ```rust
//! use tiered_tour::distance::{CacheType, DistanceOracle};
//! use tiered_tour::geo::Coordinate;
//!
//! let oracle = DistanceOracle::new(CacheType::Global);
//! let a = Coordinate::new(0.0, 0.0);
//! let b = Coordinate::new(0.0, 1.0);
//!
//! let there = oracle.distance(&a, &b);
//! let back = oracle.distance(&b, &a);
//!
//! assert_eq!(there, back);
//! assert_eq!(oracle.cache_size(), 1);
//! ```

mod cache;

pub use cache::{CacheType, DistanceCache, PairKey};

use crate::geo::Coordinate;

/// Memoizing great-circle distance lookup, in kilometres.
///
/// The oracle is `Sync` in both cache layouts and can be shared by the
/// parallel evaluation of a generation.
#[derive(Debug)]
pub struct DistanceOracle {
    cache: DistanceCache,
}

impl DistanceOracle {
    pub fn new(cache_type: CacheType) -> Self {
        Self {
            cache: DistanceCache::new(cache_type),
        }
    }

    /// Great-circle distance between `a` and `b` in kilometres.
    pub fn distance(&self, a: &Coordinate, b: &Coordinate) -> f64 {
        self.cache
            .get_or_insert_with(PairKey::new(a, b), || a.haversine_km(b))
    }

    pub fn cache_type(&self) -> CacheType {
        self.cache.cache_type()
    }

    /// Number of memoized pairs visible to the calling thread.
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }

    /// Releases the memoized distances visible to the calling thread.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

impl Default for DistanceOracle {
    fn default() -> Self {
        Self::new(CacheType::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_haversine() {
        let oracle = DistanceOracle::default();
        let a = Coordinate::new(-8.05, -34.9);
        let b = Coordinate::new(-8.11, -35.01);
        assert_eq!(oracle.distance(&a, &b), a.haversine_km(&b));
    }

    #[test]
    fn test_repeated_lookups_hit_cache() {
        for cache_type in [CacheType::Global, CacheType::ThreadLocal] {
            let oracle = DistanceOracle::new(cache_type);
            let a = Coordinate::new(10.0, 10.0);
            let b = Coordinate::new(11.0, 10.0);
            let c = Coordinate::new(11.0, 11.0);

            oracle.distance(&a, &b);
            oracle.distance(&b, &a);
            oracle.distance(&b, &c);
            oracle.distance(&a, &b);
            assert_eq!(oracle.cache_size(), 2);
            assert_eq!(oracle.cache_type(), cache_type);

            oracle.clear_cache();
            assert_eq!(oracle.cache_size(), 0);
        }
    }
}
