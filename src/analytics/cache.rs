//! Memoised pivots keyed by input content.

use std::hash::{Hash, Hasher};
use std::sync::{Arc, PoisonError, RwLock};

use chrono::Datelike;
use rustc_hash::{FxHashMap, FxHasher};

use crate::analytics::pivot::{Pivot, PivotKey, pivot};
use crate::models::Observation;

/// Default number of pivots retained
pub const DEFAULT_MAX_ENTRIES: usize = 20;

/// Content fingerprint of a row slice
///
/// Any change to a row's identity, period or value changes the fingerprint.
#[must_use]
pub fn fingerprint(rows: &[Observation]) -> u64 {
    let mut hasher = FxHasher::default();
    rows.len().hash(&mut hasher);
    for row in rows {
        row.area_code.hash(&mut hasher);
        row.area_label.hash(&mut hasher);
        row.region.hash(&mut hasher);
        row.period.num_days_from_ce().hash(&mut hasher);
        row.value.to_bits().hash(&mut hasher);
    }
    hasher.finish()
}

/// Thread-safe pivot cache
///
/// Entries are looked up by the fingerprint of the input slice, so a changed
/// slice always recomputes.
#[derive(Debug)]
pub struct PivotCache {
    entries: RwLock<FxHashMap<(u64, PivotKey), Arc<Pivot>>>,
    max_entries: usize,
}

impl Default for PivotCache {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES)
    }
}

impl PivotCache {
    /// Create a cache holding at most `max_entries` pivots
    #[must_use]
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(FxHashMap::default()),
            max_entries: max_entries.max(1),
        }
    }

    /// Pivot of `rows` by `key`, computed at most once per distinct input
    pub fn get_or_compute(&self, rows: &[Observation], key: PivotKey) -> Arc<Pivot> {
        let cache_key = (fingerprint(rows), key);

        {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(found) = entries.get(&cache_key) {
                return Arc::clone(found);
            }
        }

        let computed = Arc::new(pivot(rows, key));
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries.len() >= self.max_entries {
            // No recency tracking; drop everything and start over
            entries.clear();
        }
        Arc::clone(entries.entry(cache_key).or_insert(computed))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.write().unwrap_or_else(PoisonError::into_inner).clear();
    }
}
