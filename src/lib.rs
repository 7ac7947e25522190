//! Topic-Graph: a link graph builder for encyclopedia topics
//!
//! This crate fetches the outbound links of a fixed set of seed topics from the
//! MediaWiki query API, reduces them into a deduplicated node set plus an edge
//! list, persists the result as a JSON snapshot, and serves it over HTTP.

pub mod config;
pub mod crawler;
pub mod graph;
pub mod output;
pub mod server;
pub mod storage;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Topic-Graph operations
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Snapshot not found at {}", .path.display())]
    SnapshotMissing { path: PathBuf },

    #[error("Snapshot encoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Topic-Graph operations
pub type Result<T> = std::result::Result<T, GraphError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{FetchResults, FetchStatus, LinkFetcher, TopicLinks};
pub use graph::{GraphBuilder, GraphEdge, GraphNode, GraphSnapshot};
pub use storage::SnapshotStore;
