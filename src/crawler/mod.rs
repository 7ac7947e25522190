//! Crawler module for retrieving topic links
//!
//! This module contains the link retrieval logic, including:
//! - HTTP fetching of paginated `prop=links` queries
//! - Query API response decoding
//! - Fixed-delay request pacing
//!
//! Everything runs sequentially: one topic at a time, one page at a time.

mod fetcher;
mod parser;
mod scheduler;

pub use fetcher::{build_http_client, FetchResults, FetchStatus, LinkFetcher, TopicLinks};
pub use parser::{parse_response, ApiPage, LinkBatch, ParseError, MISSING_PAGE_ID};
pub use scheduler::Pacer;
