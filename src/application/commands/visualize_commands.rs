//! Visualize Commands - 概念可视化

/// 生成概念图命令
#[derive(Debug, Clone)]
pub struct VisualizeConcept {
    pub prompt: String,
}
