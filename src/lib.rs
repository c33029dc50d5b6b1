//! Compression Stocking Sizer
//!
//! Determines a garment size and product code (SKU) for compression stockings
//! from four body measurements and four product options.
//!
//! - `catalog/`: Size lookup table, JSON loading and validation
//! - `sizing/`: Sub-length classification, best-fit size resolution, confidence
//! - `sku/`: Request validation, SKU encoding, batch generation
//! - `api_server`: Axum JSON API (feature `api`)
//!
//! The catalog is injected everywhere; nothing holds global state, so
//! resolution is safe to run from any number of threads.

pub mod error;
pub mod catalog;
pub mod sizing;
pub mod sku;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use error::{ResolverError, TableError};
pub use catalog::{Range, SizeRecord, SizeTable};
pub use sizing::{
    Category, Color, CompressionClass, ConfidenceReport, Dimension, Measurements, Options,
    ResolutionResult, SizeResolver, SubLengthClass, Toe,
};
pub use sku::{generate_batch, generate_sku, ClassInput, SkuEncoder, SkuRequest, SkuResult};

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
