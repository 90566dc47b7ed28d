use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use kpaths::web::models::{KPathsResponse, SessionInfo, ShortestPathResponse};
use kpaths::web::server::{build_app, ServerConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app(max_sessions: usize, max_k: usize) -> Router {
    build_app(&ServerConfig {
        max_sessions,
        max_k,
        ..ServerConfig::default()
    })
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn diamond_upload() -> Value {
    json!({
        "vertex_count": 4,
        "edges": [
            {"source": 0, "target": 1, "weight": 1.0},
            {"source": 0, "target": 2, "weight": 4.0},
            {"source": 1, "target": 2, "weight": 1.0},
            {"source": 1, "target": 3, "weight": 5.0},
            {"source": 2, "target": 3, "weight": 1.0}
        ]
    })
}

async fn create_session(app: &Router) -> SessionInfo {
    let (status, body) = send(app, post_json("/api/graphs", diamond_upload())).await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let app = app(10, 10);
    let request = Request::builder().uri("/api/health").body(Body::empty()).unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_upload_then_shortest_path() {
    let app = app(10, 10);
    let session = create_session(&app).await;
    assert_eq!(session.vertex_count, 4);
    assert_eq!(session.edge_count, 5);

    let uri = format!("/api/paths/shortest/{}", session.id);
    let (status, body) = send(&app, post_json(&uri, json!({"source": 0, "target": 3}))).await;
    assert_eq!(status, StatusCode::OK);

    let response: ShortestPathResponse = serde_json::from_slice(&body).unwrap();
    assert!(response.found);
    let path = response.path.unwrap();
    assert_eq!(path.vertices, vec![0, 1, 2, 3]);
    assert_eq!(path.weight, 3.0);
    assert_eq!(path.hops, 3);
}

#[tokio::test]
async fn test_k_shortest_paths_is_capped() {
    let app = app(10, 2);
    let session = create_session(&app).await;

    let uri = format!("/api/paths/k-shortest/{}", session.id);
    let (status, body) = send(&app, post_json(&uri, json!({"source": 0, "target": 3, "k": 5}))).await;
    assert_eq!(status, StatusCode::OK);

    let response: KPathsResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(response.requested_k, 5);
    assert_eq!(response.effective_k, 2);
    let weights: Vec<_> = response.paths.iter().map(|p| p.weight).collect();
    assert_eq!(weights, vec![3.0, 5.0]);
}

#[tokio::test]
async fn test_import_text_graph() {
    let app = app(10, 10);
    let request = Request::builder()
        .method("POST")
        .uri("/api/import")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("3\n0 1 2\n1 2 2\n0 2 5\n-1\n"))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    let session: SessionInfo = serde_json::from_slice(&body).unwrap();

    let uri = format!("/api/paths/k-shortest/{}", session.id);
    let (_, body) = send(&app, post_json(&uri, json!({"source": 0, "target": 2}))).await;
    let response: KPathsResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(response.effective_k, 5);
    assert_eq!(response.paths.len(), 2);
    assert_eq!(response.paths[1].vertices, vec![0, 2]);
}

#[tokio::test]
async fn test_bad_requests() {
    let app = app(10, 10);

    let (status, body) = send(&app, post_json("/api/import", json!("not a graph"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"], "invalid_graph");

    let session = create_session(&app).await;
    let uri = format!("/api/paths/shortest/{}", session.id);
    let (status, body) = send(&app, post_json(&uri, json!({"source": 0, "target": 99}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"], "invalid_vertex");

    let uri = format!("/api/paths/shortest/{}", uuid::Uuid::new_v4());
    let (status, _) = send(&app, post_json(&uri, json!({"source": 0, "target": 1}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_session_lifecycle_and_limit() {
    let app = app(1, 10);
    let session = create_session(&app).await;

    let (status, _) = send(&app, post_json("/api/graphs", diamond_upload())).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let request = Request::builder().uri("/api/sessions").body(Body::empty()).unwrap();
    let (_, body) = send(&app, request).await;
    let sessions: Vec<SessionInfo> = serde_json::from_slice(&body).unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].id, session.id);

    let uri = format!("/api/sessions/{}", session.id);
    let request = Request::builder().method("DELETE").uri(&uri).body(Body::empty()).unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let request = Request::builder().uri(&uri).body(Body::empty()).unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    create_session(&app).await;
}
