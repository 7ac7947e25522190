//! Build report
//!
//! A [`BuildReport`] records what each seed contributed to a build, so a
//! truncated or missing topic is visible after the fact even though the
//! build itself succeeded.

use crate::crawler::FetchStatus;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

/// Outcome of one seed's fetch within a build
#[derive(Debug, Clone, Serialize)]
pub struct TopicReport {
    pub topic: String,
    pub links: usize,
    #[serde(serialize_with = "serialize_status")]
    pub status: FetchStatus,
}

/// Summary of a completed build
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub snapshot_path: PathBuf,
    pub nodes: usize,
    pub edges: usize,
    pub topics: Vec<TopicReport>,
}

impl BuildReport {
    /// Wall-clock duration of the build in seconds
    pub fn duration_seconds(&self) -> f64 {
        (self.finished_at - self.started_at).num_milliseconds() as f64 / 1000.0
    }

    /// Topics whose pagination was cut short by a failure
    pub fn truncated_topics(&self) -> Vec<&str> {
        self.topics
            .iter()
            .filter(|t| matches!(t.status, FetchStatus::Truncated { .. }))
            .map(|t| t.topic.as_str())
            .collect()
    }

    /// Topics the API reported as missing
    pub fn missing_topics(&self) -> Vec<&str> {
        self.topics
            .iter()
            .filter(|t| t.status == FetchStatus::Missing)
            .map(|t| t.topic.as_str())
            .collect()
    }
}

fn status_label(status: &FetchStatus) -> String {
    match status {
        FetchStatus::Complete => "complete".to_string(),
        FetchStatus::Missing => "missing".to_string(),
        FetchStatus::Capped => "capped".to_string(),
        FetchStatus::Truncated { pages, reason } => {
            format!("truncated after {} pages: {}", pages, reason)
        }
    }
}

fn serialize_status<S: serde::Serializer>(
    status: &FetchStatus,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&status_label(status))
}

/// Prints a build report to stdout
pub fn print_build_report(report: &BuildReport) {
    println!("=== Build Report ===\n");

    println!("Snapshot: {}", report.snapshot_path.display());
    println!("Started:  {}", report.started_at.to_rfc3339());
    println!("Duration: {:.1}s", report.duration_seconds());
    println!();

    println!("Topics:");
    for topic in &report.topics {
        println!(
            "  {}: {} links ({})",
            topic.topic,
            topic.links,
            status_label(&topic.status)
        );
    }
    println!();

    let truncated = report.truncated_topics();
    if !truncated.is_empty() {
        println!("Truncated topics ({}): {}", truncated.len(), truncated.join(", "));
    }

    let missing = report.missing_topics();
    if !missing.is_empty() {
        println!("Missing topics ({}): {}", missing.len(), missing.join(", "));
    }

    println!(
        "Total nodes: {}, Total edges: {}",
        report.nodes, report.edges
    );
}
