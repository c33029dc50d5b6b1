//! Fit Confidence
//!
//! Scores how well the measurements sit inside the selected size's ranges and
//! builds improvement guidance. Confidence is supplementary: any failure
//! degrades to a zero score instead of aborting the request.

use serde::Serialize;

use super::comparator::{deviation_ratio, RangeFit};
use super::measurements::{Category, Dimension, Measurements, SubLengthClass};
use crate::catalog::{Range, SizeTable};
use crate::error::ResolverError;

/// Message used when confidence cannot be computed
pub const CONFIDENCE_UNAVAILABLE: &str = "Unable to calculate confidence";

/// (max deviation upper bound, score, message), first match wins.
/// The zero band is matched exactly before these.
const CONFIDENCE_BANDS: [(f64, u8, &str); 4] = [
    (0.1, 90, "Excellent fit — measurements within 10% deviation"),
    (0.2, 75, "Good fit — measurements within 20% deviation"),
    (0.3, 60, "Moderate fit — measurements within 30% deviation"),
    (0.5, 40, "Fair fit — measurements within 50% deviation"),
];

const PERFECT_FIT: (u8, &str) = (100, "Perfect fit — all measurements fall exactly within ranges");
const POOR_FIT: (u8, &str) = (20, "Poor fit — measurements significantly outside ranges");

/// One dimension compared against the selected size
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionDeviation {
    pub dimension: Dimension,
    pub value: f64,
    pub min: f64,
    pub max: f64,
    pub deviation_ratio: f64,
    /// Whole percentage capped at 100, for deviation bars
    pub display_percent: u32,
    pub fit: RangeFit,
}

/// Round to one decimal with ties away from zero, so 55.25 shows as 55.3
fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

impl DimensionDeviation {
    pub fn new(dimension: Dimension, value: f64, range: Range) -> Self {
        let ratio = deviation_ratio(value, range.min, range.max);
        Self {
            dimension,
            value,
            min: range.min,
            max: range.max,
            deviation_ratio: ratio,
            display_percent: (ratio * 100.0).round().min(100.0) as u32,
            fit: RangeFit::classify(value, range.min, range.max),
        }
    }

    /// Guidance line, `None` when the value is inside the range
    pub fn improvement_message(&self) -> Option<String> {
        if self.deviation_ratio <= 0.0 || self.fit == RangeFit::Within {
            return None;
        }
        Some(format!(
            "{} ({:.1}cm) is {} the recommended range ({}-{}cm)",
            self.dimension.display_name(),
            round_to_tenth(self.value),
            self.fit.direction_word(),
            self.min,
            self.max
        ))
    }
}

/// Reliability tier shown alongside the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FitReliability {
    VeryReliable,
    Acceptable,
    VerifyMeasurements,
}

impl FitReliability {
    pub fn from_score(score: u8) -> Self {
        if score >= 75 {
            FitReliability::VeryReliable
        } else if score >= 60 {
            FitReliability::Acceptable
        } else {
            FitReliability::VerifyMeasurements
        }
    }

    pub fn display_text(&self) -> &'static str {
        match self {
            FitReliability::VeryReliable => "Very reliable fit",
            FitReliability::Acceptable => "Acceptable fit - please double-check measurements",
            FitReliability::VerifyMeasurements => {
                "Please verify measurements carefully and consider consulting a specialist"
            }
        }
    }
}

/// Confidence score, message and per-dimension breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfidenceReport {
    /// 0..100
    pub score: u8,
    pub message: String,
    /// Sorted by descending deviation ratio (stable)
    pub deviations: Vec<DimensionDeviation>,
    /// One line per out-of-range dimension, same order as `deviations`
    pub improvements: Vec<String>,
}

impl ConfidenceReport {
    /// Zero-score report used when confidence cannot be computed
    pub fn unavailable() -> Self {
        Self {
            score: 0,
            message: CONFIDENCE_UNAVAILABLE.to_string(),
            deviations: Vec::new(),
            improvements: Vec::new(),
        }
    }

    pub fn reliability(&self) -> FitReliability {
        FitReliability::from_score(self.score)
    }
}

/// Map the largest deviation ratio to (score, message)
pub fn score_for_deviation(max_deviation: f64) -> (u8, &'static str) {
    if max_deviation == 0.0 {
        return PERFECT_FIT;
    }
    CONFIDENCE_BANDS
        .iter()
        .find(|(bound, _, _)| max_deviation <= *bound)
        .map(|(_, score, message)| (*score, *message))
        .unwrap_or(POOR_FIT)
}

/// Confidence of a resolved size; never fails
pub fn calculate_confidence(
    table: &SizeTable,
    measurements: &Measurements,
    size: u8,
    sub_class: SubLengthClass,
    category: Category,
) -> ConfidenceReport {
    match try_calculate_confidence(table, measurements, size, sub_class, category) {
        Ok(report) => report,
        Err(e) => {
            tracing::warn!("Confidence unavailable for {} {} size {}: {}", category, sub_class, size, e);
            ConfidenceReport::unavailable()
        }
    }
}

fn try_calculate_confidence(
    table: &SizeTable,
    measurements: &Measurements,
    size: u8,
    sub_class: SubLengthClass,
    category: Category,
) -> Result<ConfidenceReport, ResolverError> {
    measurements.validate(category)?;
    let record = table.ranges_for(category, sub_class, size)?;

    let mut deviations = vec![
        DimensionDeviation::new(Dimension::Ankle, measurements.ankle, record.ankle),
        DimensionDeviation::new(Dimension::Calf, measurements.calf, record.calf),
    ];

    if category == Category::Thigh {
        let (thigh, range) = measurements.thigh.zip(record.thigh).ok_or_else(|| {
            ResolverError::NotFound(format!("No thigh range for {} size {}", sub_class, size))
        })?;
        deviations.push(DimensionDeviation::new(Dimension::Thigh, thigh, range));
    }

    deviations.push(DimensionDeviation::new(Dimension::Length, measurements.leg_length, record.length));

    // sort_by is stable, so equal ratios keep ankle, calf, thigh, length order
    deviations.sort_by(|a, b| b.deviation_ratio.total_cmp(&a.deviation_ratio));

    let max_deviation = deviations
        .iter()
        .map(|d| d.deviation_ratio)
        .fold(0.0_f64, f64::max);
    let (score, message) = score_for_deviation(max_deviation);

    let improvements = deviations
        .iter()
        .filter_map(DimensionDeviation::improvement_message)
        .collect();

    Ok(ConfidenceReport {
        score,
        message: message.to_string(),
        deviations,
        improvements,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thigh_measurements(ankle: f64, calf: f64, thigh: f64, leg_length: f64) -> Measurements {
        Measurements { ankle, calf, thigh: Some(thigh), leg_length }
    }

    #[test]
    fn test_score_bands() {
        assert_eq!(score_for_deviation(0.0).0, 100);
        assert_eq!(score_for_deviation(0.05).0, 90);
        assert_eq!(score_for_deviation(0.1).0, 90);
        assert_eq!(score_for_deviation(0.15).0, 75);
        assert_eq!(score_for_deviation(0.3).0, 60);
        assert_eq!(score_for_deviation(0.5).0, 40);
        assert_eq!(score_for_deviation(0.51).0, 20);
        assert_eq!(score_for_deviation(7.0).1, "Poor fit — measurements significantly outside ranges");
    }

    #[test]
    fn test_midpoint_measurements_are_perfect() {
        let table = SizeTable::builtin().unwrap();
        // Thigh normal size 3: A 21-23, B 32-39, C 48-55, D 72-95
        let m = thigh_measurements(22.0, 35.5, 51.5, 83.5);
        let report = calculate_confidence(&table, &m, 3, SubLengthClass::Normal, Category::Thigh);

        assert_eq!(report.score, 100);
        assert!(report.message.starts_with("Perfect fit"));
        assert!(report.improvements.is_empty());
        assert_eq!(report.deviations.len(), 4);
        assert_eq!(report.reliability(), FitReliability::VeryReliable);
    }

    #[test]
    fn test_deviations_sorted_and_improvements_follow() {
        let table = SizeTable::builtin().unwrap();
        // Thigh normal size 2: A 19-21, B 29-36, C 44-51, D 72-95
        // calf 37 => 1/7, thigh 55 => 4/7
        let m = thigh_measurements(20.5, 37.0, 55.0, 80.0);
        let report = calculate_confidence(&table, &m, 2, SubLengthClass::Normal, Category::Thigh);

        let order: Vec<Dimension> = report.deviations.iter().map(|d| d.dimension).collect();
        assert_eq!(order, vec![Dimension::Thigh, Dimension::Calf, Dimension::Ankle, Dimension::Length]);
        assert_eq!(report.score, 20);
        assert_eq!(
            report.improvements,
            vec![
                "Thigh (55.0cm) is above the recommended range (44-51cm)".to_string(),
                "Calf (37.0cm) is above the recommended range (29-36cm)".to_string(),
            ]
        );
    }

    #[test]
    fn test_knee_skips_thigh() {
        let table = SizeTable::builtin().unwrap();
        // Knee petite size 1: A 17-19, B 27-32, D 20-38
        let m = Measurements { ankle: 18.0, calf: 26.5, thigh: None, leg_length: 30.0 };
        let report = calculate_confidence(&table, &m, 1, SubLengthClass::Petite, Category::Knee);

        assert_eq!(report.deviations.len(), 3);
        assert!(report.deviations.iter().all(|d| d.dimension != Dimension::Thigh));
        // 0.5 / 5 = 0.1
        assert_eq!(report.score, 90);
        assert_eq!(report.improvements, vec!["Calf (26.5cm) is below the recommended range (27-32cm)"]);
    }

    #[test]
    fn test_failure_degrades_to_zero() {
        let table = SizeTable::builtin().unwrap();
        let m = thigh_measurements(20.0, 30.0, 50.0, 80.0);

        let missing = calculate_confidence(&table, &m, 9, SubLengthClass::Normal, Category::Thigh);
        assert_eq!(missing, ConfidenceReport::unavailable());

        let bad = thigh_measurements(f64::NAN, 30.0, 50.0, 80.0);
        let report = calculate_confidence(&table, &bad, 2, SubLengthClass::Normal, Category::Thigh);
        assert_eq!(report.score, 0);
        assert!(report.deviations.is_empty());
        assert!(report.improvements.is_empty());
    }

    #[test]
    fn test_display_percent_capped() {
        let d = DimensionDeviation::new(Dimension::Calf, 60.0, Range::new(29.0, 36.0));
        assert_eq!(d.display_percent, 100);

        let d = DimensionDeviation::new(Dimension::Calf, 36.7, Range::new(29.0, 36.0));
        assert_eq!(d.display_percent, 10);

        let d = DimensionDeviation::new(Dimension::Calf, 32.0, Range::new(29.0, 36.0));
        assert_eq!(d.display_percent, 0);
    }

    #[test]
    fn test_display_percent_is_serialized() {
        let d = DimensionDeviation::new(Dimension::Thigh, 55.0, Range::new(44.0, 51.0));
        let json = serde_json::to_value(&d).unwrap();
        // 4 / 7 = 0.571...
        assert_eq!(json["display_percent"], 57);
        assert_eq!(json["fit"], serde_json::to_value(RangeFit::Above).unwrap());
    }

    #[test]
    fn test_improvement_rounds_half_up() {
        let table = SizeTable::builtin().unwrap();
        // Thigh normal size 2: B 29-36, C 44-51; thigh 4.25/7, calf 0.75/7
        let m = thigh_measurements(20.5, 36.75, 55.25, 80.0);
        let report = calculate_confidence(&table, &m, 2, SubLengthClass::Normal, Category::Thigh);

        assert_eq!(
            report.improvements,
            vec![
                "Thigh (55.3cm) is above the recommended range (44-51cm)".to_string(),
                "Calf (36.8cm) is above the recommended range (29-36cm)".to_string(),
            ]
        );

        let d = DimensionDeviation::new(Dimension::Ankle, 16.25, Range::new(17.0, 19.0));
        assert_eq!(
            d.improvement_message().unwrap(),
            "Ankle (16.3cm) is below the recommended range (17-19cm)"
        );
    }

    #[test]
    fn test_reliability_tiers() {
        assert_eq!(FitReliability::from_score(90), FitReliability::VeryReliable);
        assert_eq!(FitReliability::from_score(60), FitReliability::Acceptable);
        assert_eq!(FitReliability::from_score(40), FitReliability::VerifyMeasurements);
        assert_eq!(FitReliability::from_score(0), FitReliability::VerifyMeasurements);
    }
}
