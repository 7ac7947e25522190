//! Statistics generation from a graph snapshot
//!
//! This module provides functionality for extracting and displaying
//! summary statistics from a persisted snapshot.

use crate::graph::GraphSnapshot;
use indexmap::IndexMap;

/// Graph statistics summary
#[derive(Debug, Clone, PartialEq)]
pub struct GraphStatistics {
    /// Total number of nodes
    pub total_nodes: usize,

    /// Number of seed nodes
    pub primary_nodes: usize,

    /// Total number of edges, duplicates included
    pub total_edges: usize,

    /// Number of distinct (source, target) pairs
    pub unique_edges: usize,

    /// Outgoing edge count per source, in first-seen order
    pub out_degree: IndexMap<String, usize>,
}

impl GraphStatistics {
    /// Computes statistics for a snapshot
    pub fn from_snapshot(snapshot: &GraphSnapshot) -> Self {
        let mut out_degree: IndexMap<String, usize> = IndexMap::new();
        for node in snapshot.nodes.iter().filter(|n| n.is_primary) {
            out_degree.insert(node.id.clone(), 0);
        }

        let mut pairs = std::collections::HashSet::new();
        for edge in &snapshot.links {
            *out_degree.entry(edge.source.clone()).or_insert(0) += 1;
            pairs.insert((edge.source.as_str(), edge.target.as_str()));
        }

        Self {
            total_nodes: snapshot.node_count(),
            primary_nodes: snapshot.primary_count(),
            total_edges: snapshot.edge_count(),
            unique_edges: pairs.len(),
            out_degree,
        }
    }

    /// Number of edges that repeat an earlier (source, target) pair
    pub fn duplicate_edges(&self) -> usize {
        self.total_edges - self.unique_edges
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &GraphStatistics) {
    println!("=== Graph Statistics ===\n");

    println!("Overview:");
    println!("  Total nodes: {}", stats.total_nodes);
    println!("  Primary nodes: {}", stats.primary_nodes);
    println!(
        "  Secondary nodes: {}",
        stats.total_nodes - stats.primary_nodes
    );
    println!("  Total edges: {}", stats.total_edges);
    println!("  Duplicate edges: {}", stats.duplicate_edges());
    println!();

    println!("Links per seed:");
    for (source, count) in &stats.out_degree {
        println!("  {}: {}", source, count);
    }
}
