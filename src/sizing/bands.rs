//! Classification Bands
//!
//! Fixed piecewise tables mapping leg length to a sub-length class and ankle
//! circumference to an initial size. Both are independent of the loaded
//! catalog.

use super::measurements::{Category, SubLengthClass};
use crate::error::ResolverError;

/// Closed leg-length interval (cm) for one sub-length class
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LengthBand {
    pub sub_class: SubLengthClass,
    pub min: f64,
    pub max: f64,
}

static KNEE_BANDS: [LengthBand; 2] = [
    LengthBand { sub_class: SubLengthClass::Petite, min: 20.0, max: 38.0 },
    LengthBand { sub_class: SubLengthClass::Normal, min: 39.0, max: 50.0 },
];

static THIGH_BANDS: [LengthBand; 2] = [
    LengthBand { sub_class: SubLengthClass::Petite, min: 62.0, max: 71.0 },
    LengthBand { sub_class: SubLengthClass::Normal, min: 72.0, max: 95.0 },
];

/// Leg-length bands for a category, petite first
pub fn length_bands(category: Category) -> &'static [LengthBand] {
    match category {
        Category::Knee => &KNEE_BANDS,
        Category::Thigh => &THIGH_BANDS,
    }
}

/// Classify leg length as petite or normal; bounds are inclusive
pub fn determine_sub_length_class(
    leg_length: f64,
    category: Category,
) -> Result<SubLengthClass, ResolverError> {
    length_bands(category)
        .iter()
        .find(|band| leg_length >= band.min && leg_length <= band.max)
        .map(|band| band.sub_class)
        .ok_or_else(|| ResolverError::OutOfRange("Leg length out of range.".to_string()))
}

/// Ankle band for one size: `lower < a <= upper`, except size 1 which
/// includes its lower bound
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnkleBand {
    pub size: u8,
    pub lower: f64,
    pub upper: f64,
}

/// Sizes 7 and 8 overlap on (30, 31]; first match wins, so size 7 takes it.
pub const ANKLE_BANDS: [AnkleBand; 8] = [
    AnkleBand { size: 1, lower: 17.0, upper: 19.0 },
    AnkleBand { size: 2, lower: 19.0, upper: 21.0 },
    AnkleBand { size: 3, lower: 21.0, upper: 23.0 },
    AnkleBand { size: 4, lower: 23.0, upper: 25.0 },
    AnkleBand { size: 5, lower: 25.0, upper: 27.0 },
    AnkleBand { size: 6, lower: 27.0, upper: 29.0 },
    AnkleBand { size: 7, lower: 29.0, upper: 31.0 },
    AnkleBand { size: 8, lower: 30.0, upper: 33.0 },
];

impl AnkleBand {
    fn matches(&self, ankle: f64) -> bool {
        let above_lower = if self.size == 1 {
            ankle >= self.lower
        } else {
            ankle > self.lower
        };
        above_lower && ankle <= self.upper
    }
}

/// Initial size (1..8) from ankle circumference
pub fn determine_initial_size(ankle: f64) -> Result<u8, ResolverError> {
    ANKLE_BANDS
        .iter()
        .find(|band| band.matches(ankle))
        .map(|band| band.size)
        .ok_or_else(|| ResolverError::OutOfRange("Ankle circumference out of range.".to_string()))
}
