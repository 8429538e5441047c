//! Generation Context - 生成内容上下文
//!
//! 职责:
//! - 提示词校验
//! - 引用来源过滤与编号

mod value_objects;

pub use value_objects::{collect_sources, Prompt, SourceLink};
