//! Query API response parser
//!
//! This module decodes one `action=query&prop=links` response body into:
//! - the link titles of that page of results
//! - the continuation token, if more pages remain
//! - the not-found sentinel (page id `-1`)

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

/// Page id the API uses for titles that do not exist
pub const MISSING_PAGE_ID: &str = "-1";

/// One page of link results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkBatch {
    /// Link targets in API order, duplicates preserved
    pub titles: Vec<String>,

    /// Token for the next request, `None` on the last page
    pub continuation: Option<String>,
}

/// Decoded meaning of a single API response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiPage {
    /// The requested title does not exist
    Missing,

    /// A page of links
    Batch(LinkBatch),
}

/// Reasons a response body could not be decoded
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("response has an empty query.pages object")]
    NoPages,

    /// The links decoded but the continuation block did not; the
    /// links are still usable
    #[error("continue block carries no plcontinue token")]
    BrokenContinuation { titles: Vec<String> },
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    query: QueryBody,
    #[serde(rename = "continue")]
    continuation: Option<ContinueBlock>,
}

#[derive(Debug, Deserialize)]
struct QueryBody {
    // Document order, so "first page" means the first key as sent
    pages: IndexMap<String, PageEntry>,
}

#[derive(Debug, Deserialize)]
struct PageEntry {
    #[serde(default)]
    links: Vec<LinkEntry>,
}

#[derive(Debug, Deserialize)]
struct LinkEntry {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ContinueBlock {
    plcontinue: Option<String>,
}

/// Parses a query API response body
///
/// Only the first entry of `query.pages` is considered, since requests are
/// always made for a single title. A page without a `links` field yields an
/// empty batch.
///
/// # Example
///
/// ```
/// use topic_graph::crawler::{parse_response, ApiPage};
///
/// let body = r#"{"query":{"pages":{"42":{"links":[{"ns":0,"title":"Physics"}]}}}}"#;
/// match parse_response(body).unwrap() {
///     ApiPage::Batch(batch) => assert_eq!(batch.titles, vec!["Physics"]),
///     ApiPage::Missing => unreachable!(),
/// }
/// ```
pub fn parse_response(body: &str) -> Result<ApiPage, ParseError> {
    let response: QueryResponse = serde_json::from_str(body)?;

    let (page_id, page) = response
        .query
        .pages
        .into_iter()
        .next()
        .ok_or(ParseError::NoPages)?;

    if page_id == MISSING_PAGE_ID {
        return Ok(ApiPage::Missing);
    }

    let titles: Vec<String> = page.links.into_iter().map(|link| link.title).collect();

    let continuation = match response.continuation {
        None => None,
        Some(ContinueBlock {
            plcontinue: Some(token),
        }) => Some(token),
        Some(ContinueBlock { plcontinue: None }) => {
            return Err(ParseError::BrokenContinuation { titles });
        }
    };

    Ok(ApiPage::Batch(LinkBatch {
        titles,
        continuation,
    }))
}
