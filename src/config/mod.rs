//! Configuration module for Topic-Graph
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional; omitted values fall back to the defaults in
//! [`types`], so an empty file describes the stock six-seed Wikipedia build.
//!
//! # Example
//!
//! ```no_run
//! use topic_graph::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("topic-graph.toml")).unwrap();
//! println!("Seeds: {:?}", config.graph.seeds);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    ApiConfig, Config, GraphConfig, OutputConfig, ServerConfig, UserAgentConfig, DEFAULT_SEEDS,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
