//! Advisory Module - Clinical explanation for a prediction
//!
//! - `prompts` - prompt construction
//! - `client` - external text-generation capability (Gemini)
//! - `parser` - SCORE / REVIEW / TIPS extraction
//! - `fallback` - deterministic substitute
//! - `generator` - ties the above together behind a timeout

pub mod types;
pub mod prompts;
pub mod client;
pub mod parser;
pub mod fallback;
pub mod generator;

pub use types::{AdvisoryResult, AdvisoryServiceError, AdvisorySource};
pub use client::{GeminiClient, TextGenerator};
pub use parser::{parse_advisory, ParseError, ParsedAdvisory};
pub use fallback::fallback_advisory;
pub use generator::AdvisoryGenerator;
