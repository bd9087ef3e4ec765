//! Logic Module - Business Logic & Engines
//!
//! - `features/` - payload validation into the 13-attribute vector
//! - `model/` - scaler, classifier, label decoder (pre-trained artifacts)
//! - `advisory/` - clinical advisory via the text-generation service, with fallback
//! - `pipeline/` - per-request orchestration

pub mod config;

pub mod features;
pub mod model;
pub mod advisory;
pub mod pipeline;
