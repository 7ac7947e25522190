use serde::{Deserialize, Serialize};

/// A topic in the graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    /// Topic title, unique within a snapshot
    pub id: String,

    /// Display label, always equal to `id`
    pub label: String,

    /// Whether the topic is one of the seeds
    pub is_primary: bool,

    /// Rendering size hint
    pub size: u32,
}

impl GraphNode {
    /// Size of seed nodes
    pub const PRIMARY_SIZE: u32 = 30;

    /// Size of nodes that only appear as link targets
    pub const SECONDARY_SIZE: u32 = 10;

    pub fn primary(topic: &str) -> Self {
        Self {
            id: topic.to_string(),
            label: topic.to_string(),
            is_primary: true,
            size: Self::PRIMARY_SIZE,
        }
    }

    pub fn secondary(topic: &str) -> Self {
        Self {
            id: topic.to_string(),
            label: topic.to_string(),
            is_primary: false,
            size: Self::SECONDARY_SIZE,
        }
    }
}

/// A directed link from a seed topic to one of its link targets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
}

impl GraphEdge {
    pub fn new(source: &str, target: &str) -> Self {
        Self {
            source: source.to_string(),
            target: target.to_string(),
        }
    }
}

/// The persisted graph document
///
/// Serializes as `{"nodes": [...], "links": [...]}`, the shape the browser
/// visualization consumes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    /// Nodes in insertion order
    pub nodes: Vec<GraphNode>,

    /// Edges in insertion order, duplicates preserved
    pub links: Vec<GraphEdge>,
}

impl GraphSnapshot {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.links.len()
    }

    /// Returns the number of seed nodes
    pub fn primary_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_primary).count()
    }

    /// Encodes the snapshot as two-space indented JSON
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
