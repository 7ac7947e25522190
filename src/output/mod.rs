//! Output module for build reports and snapshot statistics
//!
//! This module handles:
//! - Summarizing a finished build per topic
//! - Computing statistics from a persisted snapshot
//! - Printing both to the console

mod report;
pub mod stats;

pub use report::{print_build_report, BuildReport, TopicReport};
pub use stats::{print_statistics, GraphStatistics};
