//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// Gemini 服务配置
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// 重试配置
    #[serde(default)]
    pub retry: RetryConfig,

    /// 功能配置
    #[serde(default)]
    pub features: FeaturesConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 请求体最大大小（字节），语音输入上传的录音受此限制
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,

    /// 静态文件服务配置
    #[serde(default)]
    pub static_files: StaticFilesConfig,
}

/// 静态文件服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct StaticFilesConfig {
    /// 是否启用静态文件服务
    #[serde(default = "default_static_enabled")]
    pub enabled: bool,

    /// 静态文件目录
    #[serde(default = "default_static_dir")]
    pub dir: PathBuf,

    /// URL 路径前缀（如 "/" 表示根路径托管）
    #[serde(default = "default_static_path")]
    pub path: String,
}

fn default_static_enabled() -> bool {
    false
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("web")
}

fn default_static_path() -> String {
    "/".to_string()
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            enabled: default_static_enabled(),
            dir: default_static_dir(),
            path: default_static_path(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5060
}

fn default_max_body_size() -> usize {
    10 * 1024 * 1024 // 10 MB
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_size: default_max_body_size(),
            static_files: StaticFilesConfig::default(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Gemini 服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    /// API key，未配置时回退到 `GEMINI_API_KEY` 环境变量
    #[serde(default)]
    pub api_key: Option<String>,

    /// API 根路径
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// 文本生成模型
    #[serde(default = "default_text_model")]
    pub text_model: String,

    /// 语音合成模型
    #[serde(default = "default_tts_model")]
    pub tts_model: String,

    /// 图像生成模型
    #[serde(default = "default_image_model")]
    pub image_model: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_text_model() -> String {
    "gemini-2.5-flash-preview-05-20".to_string()
}

fn default_tts_model() -> String {
    "gemini-2.5-flash-preview-tts".to_string()
}

fn default_image_model() -> String {
    "imagen-3.0-generate-002".to_string()
}

fn default_timeout() -> u64 {
    60
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            text_model: default_text_model(),
            tts_model: default_tts_model(),
            image_model: default_image_model(),
            timeout_secs: default_timeout(),
        }
    }
}

impl GeminiConfig {
    /// 是否配置了非空的 API key
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }

    /// 脱敏后的 API key，用于日志
    pub fn masked_api_key(&self) -> String {
        match self.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => {
                let tail: String = key
                    .chars()
                    .rev()
                    .take(4)
                    .collect::<Vec<_>>()
                    .into_iter()
                    .rev()
                    .collect();
                if key.chars().count() > 8 {
                    format!("****{}", tail)
                } else {
                    "****".to_string()
                }
            }
            _ => "<not set>".to_string(),
        }
    }
}

/// 重试配置
#[derive(Debug, Clone, Deserialize)]
pub struct RetryConfig {
    /// 首次请求之后的最大重试次数
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// 第一次重试前的等待时间（毫秒），之后逐次翻倍
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
}

fn default_max_retries() -> u32 {
    5
}

fn default_initial_delay_ms() -> u64 {
    1000
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay_ms(),
        }
    }
}

/// 功能配置
#[derive(Debug, Clone, Deserialize)]
pub struct FeaturesConfig {
    /// 概念解析的系统指令，未设置时使用内置指令
    #[serde(default)]
    pub analyst_instruction: Option<String>,

    /// 虚构项目的系统指令，未设置时使用内置指令
    #[serde(default)]
    pub project_instruction: Option<String>,

    /// 朗读音色
    #[serde(default = "default_voice_name")]
    pub voice_name: String,

    /// 每次生成的图片数量
    #[serde(default = "default_image_sample_count")]
    pub image_sample_count: u32,
}

fn default_voice_name() -> String {
    "Fenrir".to_string()
}

fn default_image_sample_count() -> u32 {
    1
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            analyst_instruction: None,
            project_instruction: None,
            voice_name: default_voice_name(),
            image_sample_count: default_image_sample_count(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
