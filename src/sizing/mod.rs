//! Measurement-to-Size Resolution
//!
//! Maps four body measurements onto one of the eight catalog sizes for a
//! stocking length category, then reports how confidently they fit.
//!
//! ## Architecture
//! - `measurements.rs` - Measurements, product options, dimensions
//! - `bands.rs` - Fixed leg-length and ankle classification tables
//! - `comparator.rs` - Per-dimension fit score and deviation ratio
//! - `resolver.rs` - Candidate sizes, weighted best fit, extension flag
//! - `confidence.rs` - Confidence score, deviation breakdown, guidance text

pub mod measurements;
pub mod bands;
pub mod comparator;
pub mod resolver;
pub mod confidence;

// Re-export public API
pub use measurements::{
    Category, Color, CompressionClass, Dimension, Measurements, Options, SubLengthClass, Toe,
};
pub use bands::{determine_initial_size, determine_sub_length_class};
pub use comparator::{deviation_ratio, fit_score, RangeFit};
pub use resolver::{CandidateScore, ResolutionResult, SizeFit, SizeResolver};
pub use confidence::{calculate_confidence, ConfidenceReport, DimensionDeviation, FitReliability};
