//! Router 级别测试：通过 oneshot 调用完整的路由与中间件

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::util::ServiceExt;

use super::{AppState, HttpServer, ServerConfig};
use crate::domain::audio::{build_wav, WavHeader};
use crate::infrastructure::adapters::{FakeFailure, FakeGenerativeEngine, GeminiTranscriber};

fn app_with(engine: FakeGenerativeEngine) -> (Router, Arc<FakeGenerativeEngine>) {
    let engine = Arc::new(engine);
    let transcriber = Arc::new(GeminiTranscriber::new(engine.clone()));
    let state = AppState::with_defaults(engine.clone(), transcriber);
    let router = HttpServer::new(ServerConfig::default(), state).router();
    (router, engine)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn text_reply(value: Value) -> FakeGenerativeEngine {
    FakeGenerativeEngine::new().with_text_reply(Ok(serde_json::from_value(value).unwrap()))
}

#[tokio::test]
async fn test_ping_reports_credential() {
    let (app, _) = app_with(FakeGenerativeEngine::new().without_credential());

    let response = app
        .oneshot(Request::builder().uri("/api/ping").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["credential"], false);
}

#[tokio::test]
async fn test_analyze_returns_text_and_sources() {
    let (app, _) = app_with(text_reply(json!({
        "candidates": [{
            "content": {"parts": [{"text": "Zero trust means never trust, always verify."}]},
            "groundingMetadata": {"groundingAttributions": [
                {"web": {"uri": "https://nist.example/zt", "title": "NIST SP 800-207"}},
                {"web": {"uri": "https://no-title.example"}}
            ]}
        }]
    })));

    let response = app
        .oneshot(post_json("/api/analyze", json!({"query": "zero trust"})))
        .await
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(body["errno"], 0);
    assert_eq!(
        body["data"]["text"],
        "Zero trust means never trust, always verify."
    );
    assert_eq!(body["data"]["sources"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["sources"][0]["label"], "[Source 1] NIST SP 800-207");
    assert_eq!(body["data"]["sources"][0]["uri"], "https://nist.example/zt");
}

#[tokio::test]
async fn test_analyze_empty_query() {
    let (app, engine) = app_with(FakeGenerativeEngine::new());

    let response = app
        .oneshot(post_json("/api/analyze", json!({"query": "   "})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["errno"], 400);
    assert_eq!(
        body["error"],
        "Input field is empty. Please enter a technical concept to analyze."
    );
    assert!(body["data"].is_null());
    assert_eq!(engine.calls(), 0);
}

#[tokio::test]
async fn test_speech_returns_wav() {
    use base64::Engine;

    let samples: Vec<i16> = vec![0, 1000, -1000, 32767, -32768, 0];
    let pcm: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
    let engine = FakeGenerativeEngine::new().with_speech_reply(Ok(serde_json::from_value(json!({
        "candidates": [{"content": {"parts": [{"inlineData": {
            "mimeType": "audio/L16;codec=pcm;rate=24000",
            "data": base64::engine::general_purpose::STANDARD.encode(&pcm)
        }}]}}]
    }))
    .unwrap()));
    let (app, _) = app_with(engine);

    let response = app
        .oneshot(post_json("/api/speech", json!({"text": "Hello"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "audio/wav");
    assert_eq!(response.headers()["X-Sample-Rate"], "24000");

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(bytes.len(), 44 + 2 * samples.len());
    let header = WavHeader::parse(&bytes).unwrap();
    assert_eq!(header.sample_rate, 24000);
    assert_eq!(header.block_align, 2);
    assert_eq!(&bytes[44..], pcm.as_slice());
}

#[tokio::test]
async fn test_speech_without_text() {
    let (app, _) = app_with(FakeGenerativeEngine::new());

    let response = app
        .oneshot(post_json("/api/speech", json!({"text": ""})))
        .await
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(body["errno"], 400);
    assert_eq!(body["error"], "Please generate a summary first to hear it.");
}

#[tokio::test]
async fn test_image_data_url() {
    let engine = FakeGenerativeEngine::new().with_image_reply(Ok(serde_json::from_value(json!({
        "predictions": [{"bytesBase64Encoded": "iVBORw0KGgo=", "mimeType": "image/png"}]
    }))
    .unwrap()));
    let (app, _) = app_with(engine);

    let response = app
        .oneshot(post_json("/api/image", json!({"prompt": "serverless city"})))
        .await
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(body["errno"], 0);
    assert_eq!(body["data"]["base64"], "iVBORw0KGgo=");
    assert_eq!(body["data"]["data_url"], "data:image/png;base64,iVBORw0KGgo=");
}

#[tokio::test]
async fn test_image_without_credential() {
    let (app, engine) = app_with(FakeGenerativeEngine::new().without_credential());

    let response = app
        .oneshot(post_json("/api/image", json!({"prompt": "serverless city"})))
        .await
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(body["errno"], 503);
    assert_eq!(engine.calls(), 0);
}

#[tokio::test]
async fn test_project_status_failure() {
    let (app, _) = app_with(
        FakeGenerativeEngine::new().with_text_reply(Err(FakeFailure::Status(500))),
    );

    let response = app
        .oneshot(post_json("/api/project", json!({"keyword": "blockchain"})))
        .await
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(body["errno"], 502);
    assert_eq!(
        body["error"],
        "Fictional project generation failed. Please check your network."
    );
}

#[tokio::test]
async fn test_project_html() {
    let (app, _) = app_with(text_reply(json!({
        "candidates": [{"content": {"parts": [{"text": "<p>**Challenge:** gravity</p>"}]}}]
    })));

    let response = app
        .oneshot(post_json("/api/project", json!({"keyword": "blockchain"})))
        .await
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(body["errno"], 0);
    assert_eq!(body["data"]["html"], "<p>**Challenge:** gravity</p>");
}

#[tokio::test]
async fn test_dictation_transcript() {
    let (app, engine) = app_with(text_reply(json!({
        "candidates": [{"content": {"parts": [{"text": "Define FinOps"}]}}]
    })));

    let request = Request::builder()
        .method("POST")
        .uri("/api/dictation")
        .header(header::CONTENT_TYPE, "audio/wav")
        .body(Body::from(build_wav(&[0i16; 320], 16000)))
        .unwrap();

    let body = json_body(app.oneshot(request).await.unwrap()).await;

    assert_eq!(body["errno"], 0);
    assert_eq!(body["data"]["transcript"], "Define FinOps");
    let requests = engine.text_requests();
    assert_eq!(
        requests[0].attachment.as_ref().unwrap().mime_type,
        "audio/wav"
    );
}

#[tokio::test]
async fn test_dictation_requires_audio_content_type() {
    let (app, engine) = app_with(FakeGenerativeEngine::new());

    let request = Request::builder()
        .method("POST")
        .uri("/api/dictation")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("hello"))
        .unwrap();

    let body = json_body(app.oneshot(request).await.unwrap()).await;

    assert_eq!(body["errno"], 400);
    assert_eq!(engine.calls(), 0);
}

#[tokio::test]
async fn test_dictation_no_speech() {
    let (app, _) = app_with(FakeGenerativeEngine::new());

    let request = Request::builder()
        .method("POST")
        .uri("/api/dictation")
        .header(header::CONTENT_TYPE, "audio/webm;codecs=opus")
        .body(Body::from(vec![0x1a, 0x45, 0xdf, 0xa3]))
        .unwrap();

    let body = json_body(app.oneshot(request).await.unwrap()).await;

    assert_eq!(body["errno"], 502);
    assert_eq!(body["error"], "Speech recognition failed: no-speech");
}

#[tokio::test(start_paused = true)]
async fn test_same_feature_is_busy_while_in_flight() {
    let engine = FakeGenerativeEngine::new()
        .with_delay(Duration::from_secs(5))
        .with_image_reply(Ok(serde_json::from_value(json!({
            "predictions": [{"bytesBase64Encoded": "AAAA"}]
        }))
        .unwrap()));
    let (app, engine) = app_with(engine);

    let first = app
        .clone()
        .oneshot(post_json("/api/image", json!({"prompt": "first"})));
    let second = app
        .clone()
        .oneshot(post_json("/api/image", json!({"prompt": "second"})));
    let other_feature = app
        .clone()
        .oneshot(post_json("/api/analyze", json!({"query": "unaffected"})));

    let (first, second, other_feature) = tokio::join!(first, second, other_feature);

    let first = json_body(first.unwrap()).await;
    let second = json_body(second.unwrap()).await;
    let other_feature = json_body(other_feature.unwrap()).await;

    assert_eq!(first["errno"], 0);
    assert_eq!(second["errno"], 409);
    assert_eq!(
        second["error"],
        "This request is already in progress. Please wait."
    );
    // 其他功能不受影响（这里因空信封而失败，但不是 busy）
    assert_eq!(other_feature["errno"], 502);
    assert_eq!(engine.image_requests().len(), 1);

    // 完成后闸门重新打开
    let again = app
        .oneshot(post_json("/api/image", json!({"prompt": "again"})))
        .await
        .unwrap();
    assert_eq!(json_body(again).await["errno"], 0);
}
