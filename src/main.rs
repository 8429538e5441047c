//! Resonance - 生成式 AI 提示词服务
//!
//! - Domain: generation/, audio/
//! - Application: commands, gate, ports
//! - Infrastructure: http, adapters

use std::sync::Arc;
use std::time::Duration;

use resonance::config::{load_config, print_config, AppConfig};
use resonance::infrastructure::adapters::{
    GeminiClient, GeminiClientConfig, GeminiTranscriber, RetryPolicy,
};
use resonance::infrastructure::http::{AppState, HttpServer, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    tracing::info!("Resonance - generative prompt service");
    print_config(&config);

    if !config.gemini.has_api_key() {
        tracing::warn!("No API key configured, every feature will report the key as missing");
    }

    // 创建 Gemini 客户端
    let engine_config = GeminiClientConfig {
        api_key: config.gemini.api_key.clone(),
        base_url: config.gemini.base_url.clone(),
        text_model: config.gemini.text_model.clone(),
        tts_model: config.gemini.tts_model.clone(),
        image_model: config.gemini.image_model.clone(),
        timeout_secs: config.gemini.timeout_secs,
        retry: RetryPolicy::new(
            config.retry.max_retries,
            Duration::from_millis(config.retry.initial_delay_ms),
        ),
    };
    let engine = Arc::new(GeminiClient::new(engine_config)?);
    let transcriber = Arc::new(GeminiTranscriber::new(engine.clone()));

    let state = AppState::new(engine, transcriber, &config.features);

    // 创建 HTTP 服务器
    let mut server_config = ServerConfig::new(&config.server.host, config.server.port)
        .with_max_body_size(config.server.max_body_size);
    if config.server.static_files.enabled {
        server_config = server_config.with_static_files(
            config.server.static_files.dir.clone(),
            config.server.static_files.path.clone(),
        );
    }

    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

/// 初始化日志，`RUST_LOG` 优先于 `log.level`
fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},resonance={},tower_http=debug",
        config.log.level, config.log.level
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
