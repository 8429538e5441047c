//! Gemini Client Contract Tests
//!
//! 用 wiremock 模拟远端服务，校验：
//! - 三个端点的请求体格式与 `key` 查询参数
//! - 响应信封解析
//! - 传输失败重试、非 2xx 状态不重试

use std::sync::Arc;
use std::time::{Duration, Instant};

use resonance::application::commands::handlers::DEFAULT_ANALYST_INSTRUCTION;
use resonance::application::{
    AnalyzeConcept, AnalyzeConceptHandler, EngineError, GenerativeEnginePort, ImageRequest,
    SpeechRequest, TextGenerationRequest,
};
use resonance::infrastructure::adapters::{GeminiClient, GeminiClientConfig, RetryPolicy};
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEXT_PATH: &str = "/v1beta/models/gemini-2.5-flash-preview-05-20:generateContent";
const TTS_PATH: &str = "/v1beta/models/gemini-2.5-flash-preview-tts:generateContent";
const IMAGE_PATH: &str = "/v1beta/models/imagen-3.0-generate-002:predict";

fn client_for(server: &MockServer, retry: RetryPolicy) -> GeminiClient {
    let config = GeminiClientConfig::new("test-key")
        .with_base_url(format!("{}/v1beta", server.uri()))
        .with_retry(retry);
    GeminiClient::new(config).unwrap()
}

fn fast_retry(max_retries: u32) -> RetryPolicy {
    RetryPolicy::new(max_retries, Duration::from_millis(10))
}

// ────────────────────────────────────────────────────────────────────────────
// Request format
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_text_request_format() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .and(query_param("key", "test-key"))
        .and(body_json(json!({
            "contents": [{"parts": [{"text": "Define FinOps"}]}],
            "tools": [{"google_search": {}}],
            "systemInstruction": {"parts": [{"text": "Be brief."}]}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [{"text": "FinOps is cloud financial management."}]}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, RetryPolicy::none());
    let request = TextGenerationRequest::new("Define FinOps")
        .with_system_instruction("Be brief.")
        .with_web_search();

    let response = client.generate_text(request).await.unwrap();

    assert_eq!(
        response.first_text(),
        Some("FinOps is cloud financial management.")
    );
}

#[tokio::test]
async fn test_speech_request_format() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TTS_PATH))
        .and(query_param("key", "test-key"))
        .and(body_partial_json(json!({
            "contents": [{"parts": [{"text": "Hello there"}]}],
            "generationConfig": {
                "responseModalities": ["AUDIO"],
                "speechConfig": {"voiceConfig": {"prebuiltVoiceConfig": {"voiceName": "Fenrir"}}}
            },
            "model": "gemini-2.5-flash-preview-tts"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [{"inlineData": {
                "mimeType": "audio/L16;codec=pcm;rate=24000",
                "data": "AAABAA=="
            }}]}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, RetryPolicy::none());
    let response = client
        .synthesize_speech(SpeechRequest {
            text: "Hello there".to_string(),
            voice_name: "Fenrir".to_string(),
        })
        .await
        .unwrap();

    let inline = response.first_inline_data().unwrap();
    assert_eq!(
        inline.mime_type.as_deref(),
        Some("audio/L16;codec=pcm;rate=24000")
    );
    assert_eq!(inline.data.as_deref(), Some("AAABAA=="));
}

#[tokio::test]
async fn test_image_request_format() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(IMAGE_PATH))
        .and(query_param("key", "test-key"))
        .and(body_json(json!({
            "instances": {"prompt": "a data lake at dawn"},
            "parameters": {"sampleCount": 1}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "predictions": [{"bytesBase64Encoded": "iVBORw0KGgo=", "mimeType": "image/png"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, RetryPolicy::none());
    let response = client
        .generate_image(ImageRequest {
            prompt: "a data lake at dawn".to_string(),
            sample_count: 1,
        })
        .await
        .unwrap();

    assert_eq!(response.first_image(), Some("iVBORw0KGgo="));
}

// ────────────────────────────────────────────────────────────────────────────
// Error handling
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_error_status_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(IMAGE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend exploded"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, fast_retry(3));
    let err = client
        .generate_image(ImageRequest {
            prompt: "a data lake".to_string(),
            sample_count: 1,
        })
        .await
        .unwrap_err();

    match err {
        EngineError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "backend exploded");
        }
        other => panic!("Expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_json_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server, RetryPolicy::none());
    let err = client
        .generate_text(TextGenerationRequest::new("hello"))
        .await
        .unwrap_err();

    assert!(matches!(err, EngineError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_timeout_is_retried_until_success() {
    let server = MockServer::start().await;

    // 前两次响应超过客户端超时
    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(3))
                .set_body_json(json!({"candidates": []})),
        )
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [{"text": "third time lucky"}]}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = GeminiClientConfig::new("test-key")
        .with_base_url(format!("{}/v1beta", server.uri()))
        .with_timeout(1)
        .with_retry(fast_retry(5));
    let client = GeminiClient::new(config).unwrap();

    let response = client
        .generate_text(TextGenerationRequest::new("hello"))
        .await
        .unwrap();

    assert_eq!(response.first_text(), Some("third time lucky"));
}

#[tokio::test]
async fn test_connection_refused_exhausts_retries() {
    // 绑定后立即释放端口，保证连接被拒绝
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = GeminiClientConfig::new("test-key")
        .with_base_url(format!("http://{}/v1beta", addr))
        .with_retry(RetryPolicy::new(2, Duration::from_millis(50)));
    let client = GeminiClient::new(config).unwrap();

    let started = Instant::now();
    let err = client
        .generate_text(TextGenerationRequest::new("hello"))
        .await
        .unwrap_err();

    assert!(matches!(err, EngineError::Transport(_)), "got {:?}", err);
    // 两次等待：50ms + 100ms
    assert!(started.elapsed() >= Duration::from_millis(150));
}

#[tokio::test]
async fn test_missing_key_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = GeminiClientConfig::default().with_base_url(format!("{}/v1beta", server.uri()));
    let client = GeminiClient::new(config).unwrap();

    assert!(!client.has_credential());
    let err = client
        .generate_text(TextGenerationRequest::new("hello"))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::MissingCredential));
}

// ────────────────────────────────────────────────────────────────────────────
// Handler over the real client
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_analysis_through_client() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .and(body_partial_json(json!({
            "contents": [{"parts": [{"text": "service mesh"}]}],
            "tools": [{"google_search": {}}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {"parts": [{"text": "A service mesh manages service-to-service traffic."}]},
                "groundingMetadata": {"groundingAttributions": [
                    {"web": {"uri": "https://istio.example", "title": "Istio"}},
                    {"web": {"title": "no uri"}},
                    {"web": {"uri": "https://linkerd.example", "title": "Linkerd"}}
                ]}
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let engine: Arc<dyn GenerativeEnginePort> = Arc::new(client_for(&server, RetryPolicy::none()));
    let handler = AnalyzeConceptHandler::new(engine, DEFAULT_ANALYST_INSTRUCTION);

    let analysis = handler
        .handle(AnalyzeConcept {
            query: "service mesh".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(
        analysis.text,
        "A service mesh manages service-to-service traffic."
    );
    let labels: Vec<String> = analysis.sources.iter().map(|s| s.label()).collect();
    assert_eq!(labels, vec!["[Source 1] Istio", "[Source 2] Linkerd"]);
}
