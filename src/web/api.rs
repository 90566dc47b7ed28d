use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use ordered_float::OrderedFloat;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;
use uuid::Uuid;

use crate::algorithm::yen::{self, KShortestPaths};
use crate::graph::{parse_graph, DirectedGraph};
use crate::web::models::*;
use crate::Error;

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Limits applied to every request
#[derive(Debug, Clone, Copy)]
pub struct ApiLimits {
    pub max_sessions: usize,
    pub max_k: usize,
}

impl Default for ApiLimits {
    fn default() -> Self {
        Self {
            max_sessions: 1000,
            max_k: 100,
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<Mutex<HashMap<Uuid, Session>>>,
    pub limits: ApiLimits,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_limits(ApiLimits::default())
    }

    pub fn with_limits(limits: ApiLimits) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            limits,
        }
    }

    fn sessions(&self) -> MutexGuard<'_, HashMap<Uuid, Session>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Independent copy of a session graph, so queries never share mutable state
    fn graph(&self, session_id: Uuid) -> Result<DirectedGraph<OrderedFloat<f64>>, ApiError> {
        self.sessions()
            .get(&session_id)
            .map(|session| session.graph.clone())
            .ok_or_else(session_not_found)
    }
}

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/api/graphs", post(create_graph))
        .route("/api/import", post(import_graph))
        .route("/api/graphs/:session_id", get(get_graph))
        .route("/api/paths/shortest/:session_id", post(shortest_path))
        .route("/api/paths/k-shortest/:session_id", post(k_shortest_paths))
        .route("/api/sessions", get(list_sessions))
        .route(
            "/api/sessions/:session_id",
            get(get_session).delete(delete_session),
        )
        .route("/api/health", get(health_check))
}

/// Create a session from a JSON edge list
pub async fn create_graph(
    State(state): State<AppState>,
    Json(request): Json<GraphUploadRequest>,
) -> Result<Json<SessionInfo>, ApiError> {
    let edges = request
        .edges
        .iter()
        .map(|edge| (edge.source, edge.target, OrderedFloat(edge.weight)));
    let graph = DirectedGraph::from_edges(request.vertex_count, edges).map_err(library_error)?;
    store_session(&state, graph)
}

/// Create a session from a text body in the edge-list ingestion format
pub async fn import_graph(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<SessionInfo>, ApiError> {
    let graph = parse_graph::<OrderedFloat<f64>>(&body).map_err(library_error)?;
    store_session(&state, graph)
}

/// Get graph data for a session
pub async fn get_graph(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<WebGraph>, ApiError> {
    let sessions = state.sessions();
    match sessions.get(&session_id) {
        Some(session) => Ok(Json(WebGraph::from(&session.graph))),
        None => Err(session_not_found()),
    }
}

/// Single shortest path between two vertices of a session graph
pub async fn shortest_path(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<PathRequest>,
) -> Result<Json<ShortestPathResponse>, ApiError> {
    let graph = state.graph(session_id)?;

    let start_time = Instant::now();
    let path = yen::shortest_path(&graph, request.source, request.target).map_err(library_error)?;
    let execution_time = start_time.elapsed();

    Ok(Json(ShortestPathResponse {
        execution_id: Uuid::new_v4(),
        source: request.source,
        target: request.target,
        found: path.is_some(),
        path: path.as_ref().map(PathView::from),
        execution_time_ms: execution_time.as_secs_f64() * 1000.0,
    }))
}

/// Ranked loopless paths between two vertices of a session graph
pub async fn k_shortest_paths(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<KPathsRequest>,
) -> Result<Json<KPathsResponse>, ApiError> {
    let graph = state.graph(session_id)?;
    let effective_k = request.k.min(state.limits.max_k);

    let start_time = Instant::now();
    let search = KShortestPaths::new(&graph, request.source, request.target).map_err(library_error)?;
    let paths: Vec<PathView> = search.take(effective_k).map(|path| PathView::from(&path)).collect();
    let execution_time = start_time.elapsed();

    log::debug!(
        "session {}: {} of {} requested paths from {} to {}",
        session_id,
        paths.len(),
        request.k,
        request.source,
        request.target
    );

    Ok(Json(KPathsResponse {
        execution_id: Uuid::new_v4(),
        source: request.source,
        target: request.target,
        requested_k: request.k,
        effective_k,
        paths,
        execution_time_ms: execution_time.as_secs_f64() * 1000.0,
    }))
}

/// List all active sessions
pub async fn list_sessions(State(state): State<AppState>) -> Json<Vec<SessionInfo>> {
    let sessions = state.sessions();
    let mut infos: Vec<SessionInfo> = sessions.values().map(Session::info).collect();
    infos.sort_by_key(|info| info.created_at);
    Json(infos)
}

/// Get session information
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionInfo>, ApiError> {
    let sessions = state.sessions();
    match sessions.get(&session_id) {
        Some(session) => Ok(Json(session.info())),
        None => Err(session_not_found()),
    }
}

/// Drop a session and its graph
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    match state.sessions().remove(&session_id) {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(session_not_found()),
    }
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

// Helper functions

fn store_session(
    state: &AppState,
    graph: DirectedGraph<OrderedFloat<f64>>,
) -> Result<Json<SessionInfo>, ApiError> {
    let mut sessions = state.sessions();
    if sessions.len() >= state.limits.max_sessions {
        return Err(api_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "session_limit",
            format!("At most {} sessions may be open", state.limits.max_sessions),
        ));
    }

    let session = Session::new(graph);
    let info = session.info();
    sessions.insert(session.id, session);
    log::info!(
        "created session {} ({} vertices, {} edges)",
        info.id,
        info.vertex_count,
        info.edge_count
    );
    Ok(Json(info))
}

fn api_error(status: StatusCode, error: &str, message: String) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
            message,
            details: None,
        }),
    )
}

fn session_not_found() -> ApiError {
    api_error(
        StatusCode::NOT_FOUND,
        "session_not_found",
        "Session not found".to_string(),
    )
}

fn library_error(err: Error) -> ApiError {
    let (status, kind) = match &err {
        Error::InvalidVertex(_) => (StatusCode::BAD_REQUEST, "invalid_vertex"),
        Error::InvalidWeight(_) | Error::Format(_) => (StatusCode::BAD_REQUEST, "invalid_graph"),
        Error::BrokenPath { .. } | Error::Io(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "algorithm_execution_failed")
        }
    };
    api_error(status, kind, err.to_string())
}
