//! Analyze Commands - 概念解析

/// 解析技术概念命令
#[derive(Debug, Clone)]
pub struct AnalyzeConcept {
    pub query: String,
}
