//! Narrate Commands - 朗读解析结果

/// 朗读文本命令
#[derive(Debug, Clone)]
pub struct NarrateSummary {
    /// 要朗读的文本（通常是上一次解析的结果）
    pub text: String,
}
