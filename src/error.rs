//! Error Types
//!
//! `ResolverError` covers everything that can abort a size/SKU request.
//! `TableError` covers catalog loading, which happens once before any request.

use thiserror::Error;

/// Failure while resolving a size or building a SKU
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolverError {
    /// Malformed request: option outside its domain, non-finite or missing measurement
    #[error("{0}")]
    Validation(String),

    /// Measurement outside every defined classification band
    #[error("{0}")]
    OutOfRange(String),

    /// No table entry for the requested category / sub-length class / size
    #[error("{0}")]
    NotFound(String),

    /// None of the candidate sizes exist in the table
    #[error("{0}")]
    NoFit(String),
}

impl ResolverError {
    /// Short machine-readable kind, used in API error bodies and logs
    pub fn kind(&self) -> &'static str {
        match self {
            ResolverError::Validation(_) => "validation",
            ResolverError::OutOfRange(_) => "out_of_range",
            ResolverError::NotFound(_) => "not_found",
            ResolverError::NoFit(_) => "no_fit",
        }
    }
}

/// Failure while loading or validating a size catalog
#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to read size table {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse size table JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid size table: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ResolverError>;
