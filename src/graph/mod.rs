//! Graph module: snapshot types and the builder that produces them
//!
//! The builder drives the link fetcher over the seed list and folds the
//! results into a [`GraphSnapshot`]. Node and edge order follow seed order
//! and fetched link order exactly.

mod builder;
mod types;

pub use builder::{assemble, GraphBuilder};
pub use types::{GraphEdge, GraphNode, GraphSnapshot};
