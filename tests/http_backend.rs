//! 用进程内的 axum 服务测试真实的 HTTP 客户端

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

use outline_curator::{Config, CurationSession, ErrorKind, LearningType, SegmentCoord, UploadBundle, VideoType};

/// 服务端记录的请求
#[derive(Default)]
struct Captured {
    upload_content_type: Mutex<String>,
    upload_body: Mutex<Vec<u8>>,
    finalize_body: Mutex<Value>,
}

type Shared = Arc<Captured>;

async fn generate_ok(State(cap): State<Shared>, headers: HeaderMap, body: Bytes) -> Json<Value> {
    *cap.upload_content_type.lock().unwrap() = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    *cap.upload_body.lock().unwrap() = body.to_vec();

    Json(json!({
        "modules": [{
            "module_title": "Data Literacy",
            "blocks": [{
                "block_title": "Week 1",
                "segments": [
                    {"segment_title": "Why data", "learning_type": "Video", "video_type": "Talking head", "includes": ["Why data"]},
                    {"segment_title": "Reading list", "learning_type": "Reading", "includes": ["Reading list"]}
                ]
            }]
        }]
    }))
}

async fn generate_error() -> Json<Value> {
    Json(json!({"error": "bad file"}))
}

async fn generate_garbage() -> impl IntoResponse {
    (StatusCode::OK, "<html>gateway</html>")
}

async fn finalize_ok(State(cap): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    *cap.finalize_body.lock().unwrap() = body;
    Json(json!({
        "message": "Final Excel outline created!",
        "download_url": "/download-final-excel"
    }))
}

async fn download() -> impl IntoResponse {
    (StatusCode::OK, b"PK-fake-xlsx".to_vec())
}

async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn config(base_url: String) -> Config {
    Config {
        service_base_url: base_url,
        request_timeout_secs: 10,
        ..Config::default()
    }
}

fn materials(dir: &tempfile::TempDir) -> UploadBundle {
    let plan = dir.path().join("plan.docx");
    let deck_a = dir.path().join("deck-a.pptx");
    let deck_b = dir.path().join("deck-b.pptx");
    let homework = dir.path().join("homework.txt");
    for p in [&plan, &deck_a, &deck_b, &homework] {
        std::fs::write(p, b"content").unwrap();
    }
    UploadBundle::new(plan)
        .with_slides(vec![deck_a, deck_b])
        .with_assignments(vec![homework])
}

#[tokio::test]
async fn test_full_round_over_http() {
    let captured: Shared = Arc::default();
    let router = Router::new()
        .route("/generate-outline", post(generate_ok))
        .route("/finalize-outline", post(finalize_ok))
        .route("/download-final-excel", get(download))
        .with_state(captured.clone());
    let base = spawn(router).await;

    let dir = tempfile::tempdir().unwrap();
    let mut session = CurationSession::from_config(&config(base.clone())).unwrap();

    let outcome = session.submit_upload(&materials(&dir)).await.unwrap();
    assert_eq!(outcome.modules, 1);
    assert_eq!(outcome.segments, 2);

    // multipart 字段
    assert!(captured
        .upload_content_type
        .lock()
        .unwrap()
        .starts_with("multipart/form-data"));
    let body = String::from_utf8_lossy(&captured.upload_body.lock().unwrap()).to_string();
    assert!(body.contains("name=\"plan\"; filename=\"plan.docx\""));
    assert_eq!(body.matches("name=\"slides\"").count(), 2);
    assert_eq!(body.matches("name=\"assignments\"").count(), 1);

    session.toggle(SegmentCoord::new(0, 0, 0)).unwrap();
    session.toggle(SegmentCoord::new(0, 0, 1)).unwrap();
    session
        .set_video_type(SegmentCoord::new(0, 0, 0), VideoType::LightBoard)
        .unwrap();
    session
        .set_learning_type(SegmentCoord::new(0, 0, 1), LearningType::Quiz)
        .unwrap();

    let finalized = session.submit_final().await.unwrap();
    assert_eq!(finalized.message, "Final Excel outline created!");
    assert_eq!(finalized.download_link, format!("{}/download-final-excel", base));

    let sent = captured.finalize_body.lock().unwrap().clone();
    assert_eq!(
        sent,
        json!([{
            "module_title": "Data Literacy",
            "blocks": [{
                "block_title": "Week 1",
                "segments": [
                    {"segment_title": "Why data", "learning_type": "Video", "video_type": "Light Board", "includes": ["Why data"]},
                    {"segment_title": "Reading list", "learning_type": "Quiz", "video_type": "", "includes": ["Reading list"]}
                ]
            }]
        }])
    );

    let saved = session.download_final(dir.path()).await.unwrap();
    assert_eq!(std::fs::read(saved).unwrap(), b"PK-fake-xlsx");
}

#[tokio::test]
async fn test_backend_error_field_over_http() {
    let router = Router::new().route("/generate-outline", post(generate_error));
    let base = spawn(router).await;

    let dir = tempfile::tempdir().unwrap();
    let mut session = CurationSession::from_config(&config(base)).unwrap();

    let err = session.submit_upload(&materials(&dir)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BackendReported);
    assert_eq!(session.last_notice(), Some("Error: bad file"));
    assert!(session.outline().is_empty());
    assert!(!session.is_busy());
}

#[tokio::test]
async fn test_non_json_reply_is_transport_error() {
    let router = Router::new().route("/generate-outline", post(generate_garbage));
    let base = spawn(router).await;

    let dir = tempfile::tempdir().unwrap();
    let mut session = CurationSession::from_config(&config(base)).unwrap();

    let err = session.submit_upload(&materials(&dir)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(session.last_notice(), Some("Upload failed"));
}

#[tokio::test]
async fn test_unreachable_service_is_transport_error() {
    // 先占一个端口再释放，保证没有服务在监听
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let dir = tempfile::tempdir().unwrap();
    let mut session = CurationSession::from_config(&config(format!("http://{}", addr))).unwrap();

    let err = session.submit_upload(&materials(&dir)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(!session.is_busy());
}
