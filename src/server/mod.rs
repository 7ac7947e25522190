//! HTTP serving layer
//!
//! This module exposes the snapshot to the browser visualization:
//! - `GET /` and `GET /static/...` serve files from the static directory
//! - `GET /api/graph-data` returns the persisted snapshot verbatim
//! - `POST /api/rebuild-graph` runs a full build synchronously

mod routes;

pub use routes::{router, AppState};

use crate::config::Config;
use crate::graph::GraphBuilder;
use crate::GraphError;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Serves the router on an already bound listener until Ctrl-C
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> Result<(), GraphError> {
    let app = router(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Binds the configured address and serves until Ctrl-C
///
/// With `build_if_missing`, a build runs before the listener is bound when
/// no snapshot exists yet. A failure of that first build aborts startup.
///
/// # Example
///
/// ```no_run
/// use topic_graph::config::Config;
/// use topic_graph::server::run_server;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// run_server(&Config::default(), true).await?;
/// # Ok(())
/// # }
/// ```
pub async fn run_server(config: &Config, build_if_missing: bool) -> Result<(), GraphError> {
    let builder = GraphBuilder::from_config(config)?;

    if build_if_missing {
        ensure_snapshot(&builder).await?;
    }

    let state = Arc::new(AppState::new(builder, &config.output.static_dir));

    let address = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(address.as_str()).await?;
    tracing::info!("Knowledge graph visualization running at http://{}", address);

    serve(listener, state).await
}

/// Builds the graph once if no snapshot has been written yet
///
/// Returns whether a build ran. An existing snapshot is left untouched and
/// the API is not contacted.
pub async fn ensure_snapshot(builder: &GraphBuilder) -> Result<bool, GraphError> {
    if builder.store().exists().await {
        tracing::debug!("Using existing graph data at {}", builder.store().path().display());
        return Ok(false);
    }

    tracing::info!(
        "Graph data not found at {}. Building graph before serving...",
        builder.store().path().display()
    );
    builder.build().await?;
    tracing::info!("Graph data built successfully");
    Ok(true)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down server");
}
