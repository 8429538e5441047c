//! Command Handlers 实现
//!
//! 每个功能一个 Handler，各自持有一把 [`FeatureGate`](crate::application::gate::FeatureGate)

mod analyze_handlers;
mod dictation_handlers;
mod narrate_handlers;
mod project_handlers;
mod visualize_handlers;

pub use analyze_handlers::*;
pub use dictation_handlers::*;
pub use narrate_handlers::*;
pub use project_handlers::*;
pub use visualize_handlers::*;
