//! Graph builder - fetch orchestration and reduction into a snapshot

use crate::config::Config;
use crate::crawler::{FetchResults, LinkFetcher};
use crate::graph::types::{GraphEdge, GraphNode, GraphSnapshot};
use crate::output::{BuildReport, TopicReport};
use crate::storage::SnapshotStore;
use crate::GraphError;
use chrono::Utc;
use indexmap::IndexMap;

/// Reduces fetch results into a graph snapshot
///
/// 1. One primary node per seed, in seed order
/// 2. For every source in `results` (in key order) and every link target in
///    fetched order: add a secondary node if the target is not yet a node,
///    then append an edge
///
/// Seeds are inserted first and never overwritten, so a seed that is also a
/// link target stays primary. Edges are neither deduplicated nor filtered
/// for self-loops.
pub fn assemble<S: AsRef<str>>(seeds: &[S], results: &FetchResults) -> GraphSnapshot {
    let mut nodes: IndexMap<String, GraphNode> = IndexMap::new();
    let mut links = Vec::new();

    for seed in seeds {
        let seed = seed.as_ref();
        nodes
            .entry(seed.to_string())
            .or_insert_with(|| GraphNode::primary(seed));
    }

    for (source, topic_links) in results {
        for target in &topic_links.links {
            if !nodes.contains_key(target) {
                nodes.insert(target.clone(), GraphNode::secondary(target));
            }
            links.push(GraphEdge::new(source, target));
        }
    }

    GraphSnapshot {
        nodes: nodes.into_values().collect(),
        links,
    }
}

/// Builds the topic graph from a fixed seed list
pub struct GraphBuilder {
    fetcher: LinkFetcher,
    seeds: Vec<String>,
    store: SnapshotStore,
}

impl GraphBuilder {
    /// Creates a builder from its collaborators
    ///
    /// # Arguments
    ///
    /// * `fetcher` - The link fetcher used for every seed
    /// * `seeds` - Ordered seed topics
    /// * `store` - Where the snapshot is persisted
    pub fn new(fetcher: LinkFetcher, seeds: Vec<String>, store: SnapshotStore) -> Self {
        Self {
            fetcher,
            seeds,
            store,
        }
    }

    /// Creates a builder from the full configuration
    pub fn from_config(config: &Config) -> Result<Self, GraphError> {
        let fetcher = LinkFetcher::from_config(config)?;
        let store = SnapshotStore::new(&config.output.snapshot_path);
        Ok(Self::new(fetcher, config.graph.seeds.clone(), store))
    }

    pub fn seeds(&self) -> &[String] {
        &self.seeds
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Runs a full rebuild and returns the new snapshot
    ///
    /// Fetch failures of individual topics never fail the build; only
    /// persisting the snapshot can.
    pub async fn build(&self) -> Result<GraphSnapshot, GraphError> {
        let (snapshot, _report) = self.build_with_report().await?;
        Ok(snapshot)
    }

    /// Runs a full rebuild and also returns a per-topic report
    ///
    /// # Build Flow
    ///
    /// 1. Fetch links for all seeds, sequentially and in order
    /// 2. Assemble nodes and edges
    /// 3. Overwrite the persisted snapshot
    /// 4. Log node and edge counts
    pub async fn build_with_report(&self) -> Result<(GraphSnapshot, BuildReport), GraphError> {
        let started_at = Utc::now();
        tracing::info!("Starting to fetch link data for {} seeds", self.seeds.len());

        let results = self.fetcher.fetch_many(&self.seeds).await;
        let snapshot = assemble(&self.seeds, &results);

        self.store.save(&snapshot).await?;

        tracing::info!(
            "Graph data saved to {}. Total nodes: {}, Total edges: {}",
            self.store.path().display(),
            snapshot.node_count(),
            snapshot.edge_count()
        );

        let report = BuildReport {
            started_at,
            finished_at: Utc::now(),
            snapshot_path: self.store.path().to_path_buf(),
            nodes: snapshot.node_count(),
            edges: snapshot.edge_count(),
            topics: results
                .iter()
                .map(|(topic, links)| TopicReport {
                    topic: topic.clone(),
                    links: links.links.len(),
                    status: links.status.clone(),
                })
                .collect(),
        };

        Ok((snapshot, report))
    }
}
