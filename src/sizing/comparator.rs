//! Range Comparator
//!
//! Scores a single measurement against a size's [min, max] range. Two
//! measures are used:
//! - `fit_score` ranks candidate sizes (0 outside, 1 on a bound, 2..3 inside)
//! - `deviation_ratio` reports how far outside the range a value is, in range widths

use serde::Serialize;

/// Position of a value relative to a range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeFit {
    /// value < min
    Below,

    /// min <= value <= max
    Within,

    /// value > max
    Above,
}

impl RangeFit {
    pub fn classify(value: f64, min: f64, max: f64) -> Self {
        if value < min {
            RangeFit::Below
        } else if value > max {
            RangeFit::Above
        } else {
            RangeFit::Within
        }
    }

    /// Word used in improvement messages
    pub fn direction_word(&self) -> &'static str {
        match self {
            RangeFit::Below => "below",
            RangeFit::Within => "within",
            RangeFit::Above => "above",
        }
    }
}

/// Fit score in [0, 3] for ranking candidate sizes
///
/// Strictly inside the range scores `2 + (1 - d)` where `d` is the distance
/// from the midpoint normalized by half the width, so the midpoint scores 3.
/// Exactly on a bound scores 1. Outside (or NaN) scores 0.
pub fn fit_score(value: f64, min: f64, max: f64) -> f64 {
    if value > min && value < max {
        let half_width = (max - min) / 2.0;
        let middle = min + half_width;
        let normalized = 1.0 - (value - middle).abs() / half_width;
        return 2.0 + normalized;
    }
    if value == min || value == max {
        return 1.0;
    }
    0.0
}

/// 0 inside [min, max]; otherwise overshoot or undershoot divided by the
/// range width. Unbounded above.
pub fn deviation_ratio(value: f64, min: f64, max: f64) -> f64 {
    let width = (max - min).abs();
    match RangeFit::classify(value, min, max) {
        RangeFit::Below => (min - value) / width,
        RangeFit::Above => (value - max) / width,
        RangeFit::Within => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fit_score_midpoint_is_three() {
        assert_eq!(fit_score(20.0, 19.0, 21.0), 3.0);
        assert_eq!(fit_score(83.5, 72.0, 95.0), 3.0);
    }

    #[test]
    fn test_fit_score_bounds_and_outside() {
        assert_eq!(fit_score(19.0, 19.0, 21.0), 1.0);
        assert_eq!(fit_score(21.0, 19.0, 21.0), 1.0);
        assert_eq!(fit_score(18.0, 19.0, 21.0), 0.0);
        assert_eq!(fit_score(22.0, 19.0, 21.0), 0.0);
        assert_eq!(fit_score(f64::NAN, 19.0, 21.0), 0.0);
    }

    #[test]
    fn test_fit_score_inside_between_two_and_three() {
        // Range 32-39, mid 35.5, half width 3.5; 36 is 0.5 from mid
        let score = fit_score(36.0, 32.0, 39.0);
        assert_relative_eq!(score, 3.0 - 0.5 / 3.5, epsilon = 1e-12);

        let near_edge = fit_score(32.001, 32.0, 39.0);
        assert!(near_edge > 2.0 && near_edge < 2.01);
    }

    #[test]
    fn test_deviation_ratio() {
        assert_eq!(deviation_ratio(20.0, 19.0, 21.0), 0.0);
        assert_eq!(deviation_ratio(19.0, 19.0, 21.0), 0.0);
        assert_eq!(deviation_ratio(21.0, 19.0, 21.0), 0.0);

        // Width 7: 4cm above 51 => 4/7
        assert_relative_eq!(deviation_ratio(55.0, 44.0, 51.0), 4.0 / 7.0);
        // Width 2: 1cm below 19 => 0.5
        assert_relative_eq!(deviation_ratio(18.0, 19.0, 21.0), 0.5);
    }

    #[test]
    fn test_deviation_ratio_monotonic_outside() {
        let mut previous = 0.0;
        for step in 1..20 {
            let ratio = deviation_ratio(21.0 + step as f64 * 0.5, 19.0, 21.0);
            assert!(ratio > previous);
            previous = ratio;
        }
    }

    #[test]
    fn test_classify() {
        assert_eq!(RangeFit::classify(18.0, 19.0, 21.0), RangeFit::Below);
        assert_eq!(RangeFit::classify(19.0, 19.0, 21.0), RangeFit::Within);
        assert_eq!(RangeFit::classify(21.5, 19.0, 21.0), RangeFit::Above);
        assert_eq!(RangeFit::Above.direction_word(), "above");
    }
}
