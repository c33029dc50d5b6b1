//! Size Table
//!
//! Immutable catalog of size records keyed by (category, sub-length class).
//! Each list holds exactly 8 records ordered by ascending size; the loader
//! guarantees this before a `SizeTable` can exist.

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::error::ResolverError;
use crate::sizing::{Category, SubLengthClass};

/// Number of sizes per (category, sub-length class) list
pub const SIZES_PER_LIST: usize = 8;

/// Acceptable measurement range in centimeters (min < max)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Inclusive on both ends
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    pub fn midpoint(&self) -> f64 {
        self.min + self.width() / 2.0
    }
}

/// Ranges for a single size within one (category, sub-length class) list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizeRecord {
    /// Size number 1..8
    pub size: u8,

    pub ankle: Range,

    pub calf: Range,

    /// Present on thigh-length lists only
    pub thigh: Option<Range>,

    pub length: Range,

    /// Extended-fit ("G+") thigh range, thigh-length lists only
    pub extension_thigh: Option<Range>,
}

/// Immutable size catalog
///
/// Built through `SizeTable::builtin()` or the loader functions in
/// `catalog::loader`. Passed explicitly to the resolver so test fixtures and
/// production catalogs can coexist.
#[derive(Debug, Clone)]
pub struct SizeTable {
    lists: FxHashMap<(Category, SubLengthClass), Vec<SizeRecord>>,
}

impl SizeTable {
    /// Wrap already-validated lists (see `catalog::loader`)
    pub(crate) fn from_lists(lists: FxHashMap<(Category, SubLengthClass), Vec<SizeRecord>>) -> Self {
        Self { lists }
    }

    /// Look up the record for one size
    pub fn ranges_for(
        &self,
        category: Category,
        sub_class: SubLengthClass,
        size: u8,
    ) -> Result<&SizeRecord, ResolverError> {
        self.records(category, sub_class)
            .and_then(|records| records.iter().find(|r| r.size == size))
            .ok_or_else(|| {
                ResolverError::NotFound(format!(
                    "No size data for {} {} size {}",
                    category, sub_class, size
                ))
            })
    }

    /// All records of one list in ascending size order
    pub fn records(&self, category: Category, sub_class: SubLengthClass) -> Option<&[SizeRecord]> {
        self.lists.get(&(category, sub_class)).map(|v| v.as_slice())
    }

    pub fn contains_list(&self, category: Category, sub_class: SubLengthClass) -> bool {
        self.lists.contains_key(&(category, sub_class))
    }

    /// (category, sub-length class) pairs present, in a stable order
    pub fn list_keys(&self) -> Vec<(Category, SubLengthClass)> {
        let mut keys: Vec<_> = self.lists.keys().copied().collect();
        keys.sort();
        keys
    }

    /// Number of lists in the table
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}
