//! Size Catalog
//!
//! The lookup table the resolver scores measurements against.
//!
//! ## Architecture
//! - `size_table.rs` - `Range`, `SizeRecord` and the immutable `SizeTable`
//! - `loader.rs` - JSON parsing, load-time validation, embedded default catalog

pub mod size_table;
pub mod loader;

// Re-export public API
pub use size_table::{Range, SizeRecord, SizeTable, SIZES_PER_LIST};
