use crate::graph::GraphBuilder;
use crate::GraphError;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

const SNAPSHOT_MISSING_MESSAGE: &str = "Graph data not found. Please run a build first.";

/// Shared state of the HTTP handlers
pub struct AppState {
    builder: GraphBuilder,
    static_dir: PathBuf,
    // Held for the duration of a rebuild so two requests never write the
    // snapshot at the same time
    rebuild_lock: Mutex<()>,
}

impl AppState {
    pub fn new(builder: GraphBuilder, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            builder,
            static_dir: static_dir.into(),
            rebuild_lock: Mutex::new(()),
        }
    }
}

/// Builds the application router
///
/// Static files are resolved inside `static_dir` only; requests that would
/// leave it get a 404. Every response carries permissive CORS headers.
pub fn router(state: Arc<AppState>) -> Router {
    let static_dir = state.static_dir.clone();

    Router::new()
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .nest_service("/static", ServeDir::new(static_dir))
        .route("/api/graph-data", get(graph_data))
        .route("/api/rebuild-graph", post(rebuild_graph))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn graph_data(State(state): State<Arc<AppState>>) -> Response {
    match state.builder.store().load_raw().await {
        Ok(bytes) => ([(header::CONTENT_TYPE, "application/json")], bytes).into_response(),
        Err(GraphError::SnapshotMissing { .. }) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": SNAPSHOT_MISSING_MESSAGE })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to read snapshot: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

async fn rebuild_graph(State(state): State<Arc<AppState>>) -> Response {
    let _guard = state.rebuild_lock.lock().await;
    tracing::info!("Rebuild requested");

    match state.builder.build().await {
        Ok(snapshot) => Json(json!({
            "success": true,
            "nodes": snapshot.node_count(),
            "edges": snapshot.edge_count(),
        }))
        .into_response(),
        Err(e) => {
            tracing::error!("Rebuild failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}
