use super::*;
use axum::Json;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

async fn send(request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Value) {
    let app = router(&AppConfig::default()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, body)
}

fn post_json(body: impl Into<Body>) -> Request<Body> {
    Request::post("/pipelines/parse")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

// ============================================================================
// Routes
// ============================================================================

#[tokio::test]
async fn test_root_health_check() {
    let (status, _, body) = send(Request::get("/").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "Ping": "Pong" }));
}

#[tokio::test]
async fn test_get_parse_explains_usage() {
    let request = Request::get("/pipelines/parse").body(Body::empty()).unwrap();
    let (status, _, body) = send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "message": "Use POST method to submit pipeline data" })
    );
}

#[tokio::test]
async fn test_post_parse_summarizes_pipeline() {
    let payload = json!({
        "nodes": [
            { "id": "a", "type": "customInput", "position": { "x": 0, "y": 0 }, "data": {} },
            { "id": "b", "type": "llm", "position": { "x": 200, "y": 0 }, "data": {} }
        ],
        "edges": [
            { "id": "e1", "source": "a", "target": "b" },
            { "id": "e2", "source": "a", "target": "ghost", "sourceHandle": null }
        ]
    });

    let (status, _, body) = send(post_json(payload.to_string())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "num_nodes": 2, "num_edges": 2, "is_dag": true })
    );
}

#[tokio::test]
async fn test_post_parse_detects_self_loop() {
    let payload = json!({
        "nodes": [{ "id": "a", "type": "text", "position": { "x": 0, "y": 0 }, "data": {} }],
        "edges": [{ "id": "e1", "source": "a", "target": "a" }]
    });

    let (status, _, body) = send(post_json(payload.to_string())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_dag"], json!(false));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let request = Request::get("/pipelines").body(Body::empty()).unwrap();
    let (status, _, body) = send(request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "detail": "Not Found" }));
}

// ============================================================================
// Rejections
// ============================================================================

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let (status, _, body) = send(post_json(r#"{"nodes": ["#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().is_some());
}

#[tokio::test]
async fn test_schema_mismatch_is_unprocessable() {
    let (status, _, body) = send(post_json(r#"{"nodes": []}"#)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().contains("edges"));
}

#[tokio::test]
async fn test_missing_content_type_is_read_as_json() {
    let request = Request::post("/pipelines/parse")
        .body(Body::from(r#"{"nodes": [], "edges": []}"#))
        .unwrap();
    let (status, _, body) = send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "num_nodes": 0, "num_edges": 0, "is_dag": true })
    );
}

#[tokio::test]
async fn test_non_json_content_type_is_unsupported() {
    let request = Request::post("/pipelines/parse")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(r#"{"nodes": [], "edges": []}"#))
        .unwrap();
    let (status, _, body) = send(request).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(body["detail"].as_str().unwrap().contains("application/json"));
}

#[tokio::test]
async fn test_json_content_type_with_parameters_is_accepted() {
    let request = Request::post("/pipelines/parse")
        .header(header::CONTENT_TYPE, "application/json; charset=utf-8")
        .body(Body::from(r#"{"nodes": [], "edges": []}"#))
        .unwrap();
    let (status, _, _) = send(request).await;
    assert_eq!(status, StatusCode::OK);
}

#[test]
fn test_json_media_type_matching() {
    assert!(routes::is_json_media_type("application/json"));
    assert!(routes::is_json_media_type("Application/JSON; charset=utf-8"));
    assert!(routes::is_json_media_type("application/vnd.pipeline+json"));
    assert!(!routes::is_json_media_type("text/plain"));
    assert!(!routes::is_json_media_type("application/xml"));
    assert!(!routes::is_json_media_type(""));
}

#[tokio::test]
async fn test_pipeline_larger_than_two_mebibytes_is_accepted() {
    let count = 12_000;
    let nodes: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "id": format!("text-{}", i),
                "type": "text",
                "position": { "x": i * 250, "y": 100 },
                "data": { "id": format!("text-{}", i), "nodeType": "text", "text": "{{input}} ".repeat(16) }
            })
        })
        .collect();
    let edges: Vec<Value> = (1..count)
        .map(|i| {
            json!({
                "id": format!("reactflow__edge-text-{}-text-{}", i - 1, i),
                "source": format!("text-{}", i - 1),
                "target": format!("text-{}", i),
                "sourceHandle": format!("text-{}-output", i - 1),
                "targetHandle": format!("text-{}-input", i)
            })
        })
        .collect();

    let payload = json!({ "nodes": nodes, "edges": edges }).to_string();
    assert!(payload.len() > 2 * 1024 * 1024);

    let (status, _, body) = send(post_json(payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "num_nodes": count, "num_edges": count - 1, "is_dag": true })
    );
}

#[test]
fn test_any_panic_payload_becomes_internal_server_error() {
    let response = handle_panic(Box::new("adjacency exploded"));
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let owned = handle_panic(Box::new(String::from("owned message")));
    assert_eq!(owned.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let opaque = handle_panic(Box::new(42_u32));
    assert_eq!(opaque.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

async fn explode() -> Json<Value> {
    panic!("adjacency exploded")
}

#[tokio::test]
async fn test_handler_panic_is_caught_by_middleware() {
    let routes = Router::new().route("/pipelines/explode", axum::routing::post(explode));
    let app = with_middleware(routes, &AppConfig::default()).unwrap();

    let request = Request::post("/pipelines/explode")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:3000"
    );
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS],
        "true"
    );

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(
        body,
        json!({ "detail": "Error processing pipeline: adjacency exploded" })
    );
}

// ============================================================================
// CORS
// ============================================================================

#[tokio::test]
async fn test_preflight_from_allowed_origin() {
    let request = Request::options("/pipelines/parse")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();

    let (status, headers, _) = send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:3000"
    );
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "POST");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "content-type");
}

#[tokio::test]
async fn test_disallowed_origin_gets_no_cors_headers() {
    let request = Request::get("/")
        .header(header::ORIGIN, "http://evil.example")
        .body(Body::empty())
        .unwrap();

    let (status, headers, _) = send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!headers.contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}

#[tokio::test]
async fn test_wildcard_origin_mirrors_caller() {
    let config = AppConfig {
        allowed_origins: vec!["*".to_string()],
        ..AppConfig::default()
    };
    let app = router(&config).unwrap();

    let request = Request::get("/")
        .header(header::ORIGIN, "https://anywhere.example")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://anywhere.example"
    );
}

#[test]
fn test_router_rejects_invalid_origin() {
    let config = AppConfig {
        allowed_origins: vec!["http://bad\norigin".to_string()],
        ..AppConfig::default()
    };
    assert!(matches!(
        router(&config),
        Err(ServerError::Config {
            source: ConfigError::InvalidOrigin { .. }
        })
    ));
}

// ============================================================================
// Lifecycle
// ============================================================================

#[tokio::test]
async fn test_serve_stops_on_shutdown_signal() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let app = router(&AppConfig::default()).unwrap();
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();

    let server = tokio::spawn(serve_with_shutdown(listener, app, async move {
        let _ = rx.await;
    }));

    tx.send(()).unwrap();
    server.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_serve_reports_bind_failure() {
    let occupied = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = occupied.local_addr().unwrap().port();

    let config = AppConfig {
        host: "127.0.0.1".to_string(),
        port,
        ..AppConfig::default()
    };

    let err = serve(&config).await.unwrap_err();
    assert!(matches!(err, ServerError::BindFailed { .. }));
}
