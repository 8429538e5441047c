//! 应用层 - 命令
//!
//! 每个命令对应页面上的一个功能按钮

mod analyze_commands;
mod dictation_commands;
mod narrate_commands;
mod project_commands;
mod visualize_commands;

pub mod handlers;

pub use analyze_commands::*;
pub use dictation_commands::*;
pub use narrate_commands::*;
pub use project_commands::*;
pub use visualize_commands::*;
