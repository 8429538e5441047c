//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 未在配置中设置 API key 时读取的环境变量
pub const API_KEY_FALLBACK_ENV: &str = "GEMINI_API_KEY";

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `RESONANCE_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `RESONANCE_SERVER__PORT=8080`
/// - `RESONANCE_GEMINI__API_KEY=...`（或直接设置 `GEMINI_API_KEY`）
/// - `RESONANCE_RETRY__MAX_RETRIES=3`
/// - `RESONANCE_FEATURES__VOICE_NAME=Kore`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 首先设置默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5060)?
        .set_default("server.max_body_size", 10 * 1024 * 1024)?
        .set_default("gemini.base_url", "https://generativelanguage.googleapis.com/v1beta")?
        .set_default("gemini.text_model", "gemini-2.5-flash-preview-05-20")?
        .set_default("gemini.tts_model", "gemini-2.5-flash-preview-tts")?
        .set_default("gemini.image_model", "imagen-3.0-generate-002")?
        .set_default("gemini.timeout_secs", 60)?
        .set_default("retry.max_retries", 5)?
        .set_default("retry.initial_delay_ms", 1000)?
        .set_default("features.voice_name", "Fenrir")?
        .set_default("features.image_sample_count", 1)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 添加配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 添加环境变量（最高优先级）
    // 例如: RESONANCE_GEMINI__TEXT_MODEL=gemini-2.5-pro
    builder = builder.add_source(
        Environment::with_prefix("RESONANCE")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    // 4. 构建配置
    let config = builder.build()?;

    // 5. 反序列化为 AppConfig
    let mut app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    // 6. API key 回退
    if !app_config.gemini.has_api_key() {
        app_config.gemini.api_key = std::env::var(API_KEY_FALLBACK_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty());
    }

    // 7. 验证配置
    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
///
/// 缺少 API key 不算错误：服务照常启动，各功能在调用时返回凭证缺失
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.gemini.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Gemini base URL cannot be empty".to_string(),
        ));
    }

    for (name, model) in [
        ("text_model", &config.gemini.text_model),
        ("tts_model", &config.gemini.tts_model),
        ("image_model", &config.gemini.image_model),
    ] {
        if model.trim().is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "Gemini {} cannot be empty",
                name
            )));
        }
    }

    if config.retry.initial_delay_ms == 0 {
        return Err(ConfigError::ValidationError(
            "Retry initial delay must be greater than 0".to_string(),
        ));
    }

    if config.features.image_sample_count == 0 {
        return Err(ConfigError::ValidationError(
            "Image sample count must be at least 1".to_string(),
        ));
    }

    if config.features.voice_name.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Voice name cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("Max Body Size: {} bytes", config.server.max_body_size);
    if config.server.static_files.enabled {
        tracing::info!(
            "Static Files: {:?} at {}",
            config.server.static_files.dir,
            config.server.static_files.path
        );
    }
    tracing::info!("Gemini Base URL: {}", config.gemini.base_url);
    tracing::info!("Gemini API Key: {}", config.gemini.masked_api_key());
    tracing::info!(
        "Models: text={}, tts={}, image={}",
        config.gemini.text_model,
        config.gemini.tts_model,
        config.gemini.image_model
    );
    tracing::info!("Request Timeout: {}s", config.gemini.timeout_secs);
    tracing::info!(
        "Retry: {} retries, initial delay {}ms",
        config.retry.max_retries,
        config.retry.initial_delay_ms
    );
    tracing::info!("Voice: {}", config.features.voice_name);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
