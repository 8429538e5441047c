//! Project Commands - 虚构项目生成

/// 按关键词生成虚构项目命令
#[derive(Debug, Clone)]
pub struct GenerateProject {
    pub keyword: String,
}
