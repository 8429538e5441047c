//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod engine;
pub mod transcription;

pub use engine::*;
pub use transcription::*;
