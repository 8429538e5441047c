//! Generation Context - Value Objects

use serde::{Deserialize, Serialize};

/// 用户提示词
///
/// 不变量: 去除首尾空白后非空
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt(String);

impl Prompt {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, &'static str> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err("提示词不能为空");
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Prompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 引用来源（带序号的网页链接）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceLink {
    /// 从 1 开始的序号
    pub index: usize,
    pub uri: String,
    pub title: String,
}

impl SourceLink {
    /// 展示文本，例如 `[Source 1] Example`
    pub fn label(&self) -> String {
        format!("[Source {}] {}", self.index, self.title)
    }
}

/// 过滤引用来源
///
/// 只保留同时具备 uri 和 title（且非空）的条目，序号按保留后的顺序编号
pub fn collect_sources<I>(attributions: I) -> Vec<SourceLink>
where
    I: IntoIterator<Item = (Option<String>, Option<String>)>,
{
    attributions
        .into_iter()
        .filter_map(|(uri, title)| match (uri, title) {
            (Some(uri), Some(title)) if !uri.is_empty() && !title.is_empty() => Some((uri, title)),
            _ => None,
        })
        .enumerate()
        .map(|(i, (uri, title))| SourceLink {
            index: i + 1,
            uri,
            title,
        })
        .collect()
}
