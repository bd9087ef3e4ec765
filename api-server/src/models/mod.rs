//! Response models

pub mod prediction;
pub mod model_info;

pub use prediction::*;
pub use model_info::*;
