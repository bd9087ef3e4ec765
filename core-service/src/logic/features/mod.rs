//! Features Module - Request Validation
//!
//! Turns an untyped request payload into a validated `FeatureVector`.
//! The canonical attribute order lives in `layout.rs`.

pub mod layout;
pub mod vector;

#[cfg(test)]
mod tests;

// Re-export common types
pub use layout::{feature_index, feature_name, LayoutInfo, FEATURE_COUNT, FEATURE_LAYOUT};
pub use vector::{FeatureVector, ValidationError};
