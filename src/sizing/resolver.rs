//! Size Resolver
//!
//! Maps measurements onto one catalog size:
//! 1. Leg length picks the sub-length class (petite/normal)
//! 2. Ankle picks the initial size; whole-centimeter ankles also try the
//!    neighbouring sizes, since they tend to sit on a band boundary
//! 3. Each candidate gets a weighted fit score (ankle ×3, calf ×2, length ×1,
//!    thigh ×1 for thigh-length), highest wins, ties go to the smaller size
//! 4. The extension ("G+") flag and confidence are computed for the winner

use serde::Serialize;
use smallvec::SmallVec;

use super::bands::{determine_initial_size, determine_sub_length_class};
use super::comparator::fit_score;
use super::confidence::{calculate_confidence, DimensionDeviation, FitReliability};
use super::measurements::{Category, Measurements, SubLengthClass};
use crate::catalog::{Range, SizeRecord, SizeTable};
use crate::error::ResolverError;

pub const ANKLE_WEIGHT: f64 = 3.0;
pub const CALF_WEIGHT: f64 = 2.0;
pub const LENGTH_WEIGHT: f64 = 1.0;
pub const THIGH_WEIGHT: f64 = 1.0;

const MIN_SIZE: u8 = 1;
const MAX_SIZE: u8 = 8;

/// Weighted score of one evaluated candidate size
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CandidateScore {
    pub size: u8,
    pub weighted_score: f64,
}

/// Best-fit size before confidence is attached
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizeFit {
    pub size: u8,
    pub extension_flag: bool,
    /// Evaluated candidates in ascending size order
    pub candidates: Vec<CandidateScore>,
}

/// Complete outcome of one resolution request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolutionResult {
    pub size: u8,
    pub sub_class: SubLengthClass,
    pub extension_flag: bool,
    pub confidence_score: u8,
    pub confidence_message: String,
    pub deviations: Vec<DimensionDeviation>,
    pub improvements: Vec<String>,
    pub candidates: Vec<CandidateScore>,
}

impl ResolutionResult {
    /// "3" or "3 G+" when the extended-fit cut is needed
    pub fn size_label(&self) -> String {
        if self.extension_flag {
            format!("{} G+", self.size)
        } else {
            self.size.to_string()
        }
    }

    pub fn reliability(&self) -> FitReliability {
        FitReliability::from_score(self.confidence_score)
    }
}

/// Candidate sizes for an ankle measurement
///
/// Whole-centimeter values expand to the neighbours, clamped to 1..8.
pub fn candidate_sizes(ankle: f64) -> Result<SmallVec<[u8; 3]>, ResolverError> {
    let ankle_size = determine_initial_size(ankle)?;
    let mut candidates = SmallVec::new();

    if ankle.fract() == 0.0 {
        if ankle_size > MIN_SIZE {
            candidates.push(ankle_size - 1);
        }
        candidates.push(ankle_size);
        if ankle_size < MAX_SIZE {
            candidates.push(ankle_size + 1);
        }
    } else {
        candidates.push(ankle_size);
    }

    Ok(candidates)
}

/// Weighted fit of all applicable dimensions against one record
pub fn weighted_fit_score(measurements: &Measurements, record: &SizeRecord, category: Category) -> f64 {
    let score_in = |value: f64, range: Range| fit_score(value, range.min, range.max);

    let mut total = score_in(measurements.ankle, record.ankle) * ANKLE_WEIGHT
        + score_in(measurements.calf, record.calf) * CALF_WEIGHT
        + score_in(measurements.leg_length, record.length) * LENGTH_WEIGHT;

    if category == Category::Thigh {
        if let (Some(thigh), Some(range)) = (measurements.thigh, record.thigh) {
            total += score_in(thigh, range) * THIGH_WEIGHT;
        }
    }

    total
}

/// Whether the thigh needs the extended-fit cut for this record
pub fn needs_extension(measurements: &Measurements, record: &SizeRecord, category: Category) -> bool {
    if category != Category::Thigh {
        return false;
    }
    match (measurements.thigh, record.thigh, record.extension_thigh) {
        (Some(thigh), Some(thigh_range), Some(extension)) => {
            thigh > thigh_range.min && extension.contains(thigh)
        }
        _ => false,
    }
}

/// Resolver bound to one injected catalog
#[derive(Debug, Clone, Copy)]
pub struct SizeResolver<'a> {
    table: &'a SizeTable,
}

impl<'a> SizeResolver<'a> {
    pub fn new(table: &'a SizeTable) -> Self {
        Self { table }
    }

    /// Full resolution: sub-length class, best-fit size, extension flag, confidence
    pub fn resolve(
        &self,
        measurements: &Measurements,
        category: Category,
    ) -> Result<ResolutionResult, ResolverError> {
        measurements.validate(category)?;

        let sub_class = determine_sub_length_class(measurements.leg_length, category)?;
        let fit = self.resolve_size(measurements, category, sub_class)?;
        let confidence = calculate_confidence(self.table, measurements, fit.size, sub_class, category);

        tracing::debug!(
            "Resolved {} {} size {} (extension: {}, confidence: {})",
            category,
            sub_class,
            fit.size,
            fit.extension_flag,
            confidence.score
        );

        Ok(ResolutionResult {
            size: fit.size,
            sub_class,
            extension_flag: fit.extension_flag,
            confidence_score: confidence.score,
            confidence_message: confidence.message,
            deviations: confidence.deviations,
            improvements: confidence.improvements,
            candidates: fit.candidates,
        })
    }

    /// Pick the best-fit size among the ankle candidates
    pub fn resolve_size(
        &self,
        measurements: &Measurements,
        category: Category,
        sub_class: SubLengthClass,
    ) -> Result<SizeFit, ResolverError> {
        let candidates = candidate_sizes(measurements.ankle)?;

        let mut best: Option<(&SizeRecord, f64)> = None;
        let mut evaluated = Vec::with_capacity(candidates.len());

        for size in candidates {
            let record = match self.table.ranges_for(category, sub_class, size) {
                Ok(record) => record,
                Err(_) => continue,
            };

            let score = weighted_fit_score(measurements, record, category);
            tracing::debug!("  Candidate size {}: weighted score {:.3}", size, score);
            evaluated.push(CandidateScore { size, weighted_score: score });

            // Strictly greater, so ties keep the smaller size
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((record, score));
            }
        }

        let (record, _) = best.ok_or_else(|| {
            ResolverError::NoFit("No appropriate size found for these measurements.".to_string())
        })?;

        Ok(SizeFit {
            size: record.size,
            extension_flag: needs_extension(measurements, record, category),
            candidates: evaluated,
        })
    }
}
