//! Memo tables behind [`DistanceOracle`](super::DistanceOracle).

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use thread_local::ThreadLocal;

use crate::geo::Coordinate;

/// Cache key of an unordered coordinate pair.
///
/// Both orientations of a pair map to the same key, so `d(a, b)` and
/// `d(b, a)` share one entry and are bit-identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PairKey((u64, u64), (u64, u64));

impl PairKey {
    pub fn new(a: &Coordinate, b: &Coordinate) -> Self {
        let (ka, kb) = (a.key(), b.key());
        if ka <= kb {
            Self(ka, kb)
        } else {
            Self(kb, ka)
        }
    }
}

/// Selects how distance lookups are memoized.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheType {
    /// One table shared by every thread, guarded by a read-write lock.
    #[default]
    Global,
    /// One table per thread, no synchronization.
    ThreadLocal,
}

/// A distance memo table in one of the [`CacheType`] layouts.
///
/// Entries are never evicted: a run over `n` points stores at most
/// `n * (n + 1) / 2` of them.
#[derive(Debug)]
pub enum DistanceCache {
    Global(RwLock<HashMap<PairKey, f64>>),
    ThreadLocal(ThreadLocal<RefCell<HashMap<PairKey, f64>>>),
}

impl DistanceCache {
    pub fn new(cache_type: CacheType) -> Self {
        match cache_type {
            CacheType::Global => DistanceCache::Global(RwLock::new(HashMap::new())),
            CacheType::ThreadLocal => DistanceCache::ThreadLocal(ThreadLocal::new()),
        }
    }

    pub fn cache_type(&self) -> CacheType {
        match self {
            DistanceCache::Global(_) => CacheType::Global,
            DistanceCache::ThreadLocal(_) => CacheType::ThreadLocal,
        }
    }

    /// Returns the cached distance for `key`, computing and storing it on a miss.
    pub fn get_or_insert_with<F>(&self, key: PairKey, compute: F) -> f64
    where
        F: FnOnce() -> f64,
    {
        match self {
            DistanceCache::Global(table) => {
                // A poisoned table still holds only fully written entries.
                if let Some(distance) = table
                    .read()
                    .unwrap_or_else(PoisonError::into_inner)
                    .get(&key)
                {
                    return *distance;
                }

                let distance = compute();
                table
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .insert(key, distance);
                distance
            }
            DistanceCache::ThreadLocal(tables) => {
                let cell = tables.get_or(|| RefCell::new(HashMap::new()));
                if let Some(distance) = cell.borrow().get(&key) {
                    return *distance;
                }

                let distance = compute();
                cell.borrow_mut().insert(key, distance);
                distance
            }
        }
    }

    /// Number of entries visible to the calling thread.
    pub fn len(&self) -> usize {
        match self {
            DistanceCache::Global(table) => {
                table.read().unwrap_or_else(PoisonError::into_inner).len()
            }
            DistanceCache::ThreadLocal(tables) => {
                tables.get().map_or(0, |cell| cell.borrow().len())
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every entry visible to the calling thread.
    pub fn clear(&self) {
        match self {
            DistanceCache::Global(table) => table
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .clear(),
            DistanceCache::ThreadLocal(tables) => {
                if let Some(cell) = tables.get() {
                    cell.borrow_mut().clear();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_key_is_unordered() {
        let a = Coordinate::new(1.0, 2.0);
        let b = Coordinate::new(3.0, 4.0);
        assert_eq!(PairKey::new(&a, &b), PairKey::new(&b, &a));
        assert_ne!(PairKey::new(&a, &b), PairKey::new(&a, &a));
    }

    #[test]
    fn test_global_cache_computes_once() {
        let cache = DistanceCache::new(CacheType::Global);
        let key = PairKey::new(&Coordinate::new(0.0, 0.0), &Coordinate::new(1.0, 1.0));

        assert_eq!(cache.get_or_insert_with(key, || 5.0), 5.0);
        assert_eq!(cache.get_or_insert_with(key, || panic!("cached")), 5.0);
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.get_or_insert_with(key, || 7.0), 7.0);
    }

    #[test]
    fn test_thread_local_cache_is_per_thread() {
        let cache = DistanceCache::new(CacheType::ThreadLocal);
        let key = PairKey::new(&Coordinate::new(0.0, 0.0), &Coordinate::new(1.0, 1.0));

        assert_eq!(cache.get_or_insert_with(key, || 5.0), 5.0);
        assert_eq!(cache.get_or_insert_with(key, || panic!("cached")), 5.0);
        assert_eq!(cache.len(), 1);

        std::thread::scope(|scope| {
            scope.spawn(|| {
                assert!(cache.is_empty());
                assert_eq!(cache.get_or_insert_with(key, || 5.0), 5.0);
                assert_eq!(cache.len(), 1);
            });
        });

        cache.clear();
        assert!(cache.is_empty());
    }
}
