//! SKU Generation
//!
//! End-to-end pipeline: validate request -> resolve size -> encode SKU.
//! Every step is pure over the injected table, so batches run in parallel.

use rayon::prelude::*;
use serde::Serialize;

use super::encoder::SkuEncoder;
use super::request::SkuRequest;
use crate::catalog::SizeTable;
use crate::error::ResolverError;
use crate::sizing::{CandidateScore, DimensionDeviation, FitReliability, SizeResolver, SubLengthClass};

/// Output record handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkuResult {
    pub sku: String,
    pub size: u8,
    /// "3" or "3 G+"
    pub size_label: String,
    pub extension_flag: bool,
    pub sub_length_class: SubLengthClass,
    pub confidence_score: u8,
    pub confidence_message: String,
    pub reliability: FitReliability,
    pub reliability_message: String,
    pub deviations: Vec<DimensionDeviation>,
    pub improvements: Vec<String>,
    pub candidates: Vec<CandidateScore>,
}

/// Validate, resolve and encode one request
pub fn generate_sku(table: &SizeTable, request: &SkuRequest) -> Result<SkuResult, ResolverError> {
    let (options, measurements) = request.validate()?;

    let resolution = SizeResolver::new(table).resolve(&measurements, options.category)?;
    let sku = SkuEncoder::new().encode(&options, &resolution)?;
    let reliability = resolution.reliability();

    tracing::debug!("Generated SKU {} (confidence {})", sku, resolution.confidence_score);

    Ok(SkuResult {
        sku,
        size: resolution.size,
        size_label: resolution.size_label(),
        extension_flag: resolution.extension_flag,
        sub_length_class: resolution.sub_class,
        confidence_score: resolution.confidence_score,
        confidence_message: resolution.confidence_message,
        reliability,
        reliability_message: reliability.display_text().to_string(),
        deviations: resolution.deviations,
        improvements: resolution.improvements,
        candidates: resolution.candidates,
    })
}

/// Resolve independent requests in parallel, results in input order
pub fn generate_batch(
    table: &SizeTable,
    requests: &[SkuRequest],
) -> Vec<Result<SkuResult, ResolverError>> {
    let start = std::time::Instant::now();

    let results: Vec<_> = requests
        .par_iter()
        .map(|request| generate_sku(table, request))
        .collect();

    let failed = results.iter().filter(|r| r.is_err()).count();
    tracing::info!(
        "Batch of {} requests resolved in {:?} ({} failed)",
        requests.len(),
        start.elapsed(),
        failed
    );

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sku::request::ClassInput;

    fn request(category: &str, ankle: f64, calf: f64, thigh: Option<f64>, leg_length: f64) -> SkuRequest {
        SkuRequest {
            category: category.to_string(),
            color: "bronze".to_string(),
            toe: "open".to_string(),
            compression_class: ClassInput::Number(1),
            ankle,
            calf,
            thigh,
            leg_length,
        }
    }

    #[test]
    fn test_generate_thigh_sku() {
        let table = SizeTable::builtin().unwrap();
        let result = generate_sku(&table, &request("thigh", 21.0, 36.0, Some(51.0), 80.0)).unwrap();

        assert_eq!(result.sku, "XA69603");
        assert_eq!(result.size, 3);
        assert_eq!(result.size_label, "3");
        assert_eq!(result.sub_length_class, SubLengthClass::Normal);
        assert_eq!(result.confidence_score, 100);
        assert_eq!(result.reliability, FitReliability::VeryReliable);
    }

    #[test]
    fn test_validation_precedes_resolution() {
        let table = SizeTable::builtin().unwrap();
        // Ankle is out of range too, but the bad color is reported first
        let mut req = request("thigh", 10.0, 36.0, Some(51.0), 80.0);
        req.color = "green".to_string();
        assert!(matches!(generate_sku(&table, &req), Err(ResolverError::Validation(_))));
    }

    #[test]
    fn test_batch_keeps_order() {
        let table = SizeTable::builtin().unwrap();
        let requests = vec![
            request("knee", 18.5, 30.0, None, 30.0),
            request("knee", 16.9, 30.0, None, 30.0),
            request("thigh", 28.5, 44.0, Some(64.0), 66.0),
        ];

        let results = generate_batch(&table, &requests);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().sku, "XA47601");
        assert!(matches!(results[1], Err(ResolverError::OutOfRange(_))));
        assert_eq!(results[2].as_ref().unwrap().sku, "XA59606");
    }
}
