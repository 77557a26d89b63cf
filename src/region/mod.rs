//! Region classification of reference area codes.
//!
//! The lookup is built in two ordered merge steps: the bulk code lists first,
//! then the single-code overrides, which win on conflict. Lookups never fail;
//! unknown codes resolve to [`Region::Unmapped`].

pub mod table;

use std::sync::LazyLock;

use rustc_hash::FxHashMap;

use crate::models::Region;

static DEFAULT_CLASSIFIER: LazyLock<RegionClassifier> = LazyLock::new(RegionClassifier::new);

/// Code to region lookup
#[derive(Debug, Clone)]
pub struct RegionClassifier {
    map: FxHashMap<String, Region>,
    fallback: Region,
}

impl Default for RegionClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionClassifier {
    /// Classifier over the built-in tables
    #[must_use]
    pub fn new() -> Self {
        Self::from_tables(table::REGION_CODES, table::AGGREGATE_OVERRIDES)
    }

    /// Build from bulk code lists and single-code overrides
    ///
    /// Codes are split on whitespace. A code listed under several bulk
    /// regions keeps the last one; overrides replace anything from the bulk step.
    #[must_use]
    pub fn from_tables(bulk: &[(Region, &str)], overrides: &[(&str, Region)]) -> Self {
        let mut map = FxHashMap::default();

        for (region, codes) in bulk {
            map.extend(
                codes
                    .split_whitespace()
                    .map(|code| (code.to_ascii_uppercase(), *region)),
            );
        }

        map.extend(
            overrides
                .iter()
                .map(|(code, region)| (code.trim().to_ascii_uppercase(), *region)),
        );

        Self {
            map,
            fallback: Region::Unmapped,
        }
    }

    /// Shared classifier over the built-in tables
    #[must_use]
    pub fn shared() -> &'static Self {
        &DEFAULT_CLASSIFIER
    }

    /// Region of an area code
    ///
    /// Codes are expected already trimmed and uppercased by cleaning.
    #[must_use]
    pub fn classify(&self, area_code: &str) -> Region {
        self.map.get(area_code).copied().unwrap_or(self.fallback)
    }

    /// Number of mapped codes
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether no code is mapped
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Region of an area code using the built-in tables
#[must_use]
pub fn classify_region(area_code: &str) -> Region {
    RegionClassifier::shared().classify(area_code)
}
