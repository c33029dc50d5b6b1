//! SKU Generation
//!
//! ## Architecture
//! - `request.rs` - Textual request + validation into typed options
//! - `encoder.rs` - Fixed-width SKU encoding
//! - `generator.rs` - Single and parallel batch generation

pub mod request;
pub mod encoder;
pub mod generator;

// Re-export public API
pub use request::{ClassInput, SkuRequest};
pub use encoder::{SkuEncoder, SKU_LENGTH};
pub use generator::{generate_batch, generate_sku, SkuResult};
