//! Page-link fetcher
//!
//! This module handles all requests to the query API, including:
//! - Building the HTTP client with a descriptive user agent
//! - Following `plcontinue` pagination for one topic
//! - Pacing requests between pages and between topics
//! - Absorbing per-topic failures into a [`FetchStatus`]

use crate::config::{ApiConfig, Config, UserAgentConfig};
use crate::crawler::parser::{parse_response, ApiPage, ParseError};
use crate::crawler::scheduler::Pacer;
use crate::GraphError;
use indexmap::IndexMap;
use reqwest::Client;
use thiserror::Error;

/// How the fetch of one topic ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    /// Every page was retrieved
    Complete,

    /// The API reported the title as missing
    Missing,

    /// Paging stopped at the configured per-topic link cap
    Capped,

    /// A request or decode failed; links gathered before it are kept
    Truncated {
        /// Pages that contributed links before the failure
        pages: u32,
        /// Error description
        reason: String,
    },
}

/// Links discovered for one topic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicLinks {
    /// Link targets in fetched order, duplicates preserved
    pub links: Vec<String>,

    /// Completion status of the fetch
    pub status: FetchStatus,
}

impl TopicLinks {
    fn missing() -> Self {
        Self {
            links: Vec::new(),
            status: FetchStatus::Missing,
        }
    }

    /// Returns true when the links are the full, uncapped set
    pub fn is_complete(&self) -> bool {
        self.status == FetchStatus::Complete
    }

    /// Returns true when a failure cut pagination short
    pub fn is_truncated(&self) -> bool {
        matches!(self.status, FetchStatus::Truncated { .. })
    }
}

/// Topic -> links, in the order the topics were requested
pub type FetchResults = IndexMap<String, TopicLinks>;

/// Failure of a single page request
#[derive(Debug, Error)]
enum PageError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use topic_graph::config::UserAgentConfig;
/// use topic_graph::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Retrieves outbound links for topics from the query API
#[derive(Debug, Clone)]
pub struct LinkFetcher {
    client: Client,
    api_url: String,
    page_limit: String,
    link_cap: Option<usize>,
    pacer: Pacer,
}

impl LinkFetcher {
    /// Creates a fetcher for the endpoint and pacing in `config`
    pub fn new(client: Client, config: &ApiConfig) -> Self {
        Self {
            client,
            api_url: config.url.clone(),
            page_limit: config.page_limit.clone(),
            link_cap: config.max_links_per_topic,
            pacer: Pacer::from_config(config),
        }
    }

    /// Creates a fetcher and its HTTP client from the full configuration
    pub fn from_config(config: &Config) -> Result<Self, GraphError> {
        let client = build_http_client(&config.user_agent)?;
        Ok(Self::new(client, &config.api))
    }

    /// Replaces the pacer
    pub fn with_pacer(mut self, pacer: Pacer) -> Self {
        self.pacer = pacer;
        self
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Fetches every outbound link of `topic`, following pagination
    ///
    /// # Request Flow
    ///
    /// 1. Request the first page with `pllimit` set to the configured limit
    /// 2. While the response carries `continue.plcontinue`, pause and request
    ///    the next page with that token
    /// 3. Stop when no continuation is returned
    ///
    /// # Failure Handling
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | Page id `-1` | Empty list, `Missing`, no retry |
    /// | Network error / non-2xx | Links so far, `Truncated` |
    /// | Undecodable body | Links so far, `Truncated` |
    /// | `continue` without token | Links incl. this page, `Truncated` |
    /// | Link cap reached | First `cap` links, `Capped` |
    ///
    /// Failures are never retried and never returned as errors.
    pub async fn fetch_links(&self, topic: &str) -> TopicLinks {
        let mut links = Vec::new();
        let mut continuation: Option<String> = None;
        let mut pages: u32 = 0;

        loop {
            let batch = match self.fetch_page(topic, continuation.as_deref()).await {
                Ok(ApiPage::Missing) => {
                    tracing::warn!("Page not found: {}", topic);
                    return TopicLinks::missing();
                }
                Ok(ApiPage::Batch(batch)) => batch,
                Err(PageError::Parse(ParseError::BrokenContinuation { titles })) => {
                    pages += 1;
                    links.extend(titles);
                    if let Some(cap) = self.link_cap {
                        links.truncate(cap);
                    }
                    let reason = ParseError::BrokenContinuation { titles: Vec::new() }.to_string();
                    return self.truncated(topic, links, pages, reason);
                }
                Err(e) => {
                    return self.truncated(topic, links, pages, e.to_string());
                }
            };

            pages += 1;
            tracing::info!(
                "Fetched batch {} for {}: {} links",
                pages,
                topic,
                batch.titles.len()
            );
            links.extend(batch.titles);

            if let Some(cap) = self.link_cap {
                if links.len() > cap || (links.len() == cap && batch.continuation.is_some()) {
                    links.truncate(cap);
                    tracing::info!("Link cap of {} reached for {}", cap, topic);
                    return TopicLinks {
                        links,
                        status: FetchStatus::Capped,
                    };
                }
            }

            match batch.continuation {
                Some(token) => {
                    continuation = Some(token);
                    self.pacer.between_pages().await;
                }
                None => break,
            }
        }

        tracing::info!("Total links for {}: {}", topic, links.len());
        TopicLinks {
            links,
            status: FetchStatus::Complete,
        }
    }

    /// Fetches links for each topic in order, one topic at a time
    ///
    /// The result always holds one entry per distinct input topic, in input
    /// order, whatever happened to that topic's fetch. A repeated topic is
    /// fetched again and its newer result replaces the older one in place.
    pub async fn fetch_many<S: AsRef<str>>(&self, topics: &[S]) -> FetchResults {
        let mut results = FetchResults::with_capacity(topics.len());

        for topic in topics {
            let topic = topic.as_ref();
            tracing::info!("Fetching links from: {}", topic);
            let links = self.fetch_links(topic).await;
            results.insert(topic.to_string(), links);
            self.pacer.between_topics().await;
        }

        results
    }

    /// Issues one request and decodes the body
    async fn fetch_page(&self, topic: &str, continuation: Option<&str>) -> Result<ApiPage, PageError> {
        let mut params: Vec<(&str, &str)> = vec![
            ("action", "query"),
            ("format", "json"),
            ("titles", topic),
            ("prop", "links"),
            ("pllimit", self.page_limit.as_str()),
            ("origin", "*"),
        ];
        if let Some(token) = continuation {
            params.push(("plcontinue", token));
        }

        let body = self
            .client
            .get(&self.api_url)
            .query(&params)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(parse_response(&body)?)
    }

    fn truncated(&self, topic: &str, links: Vec<String>, pages: u32, reason: String) -> TopicLinks {
        tracing::warn!(
            "Error fetching links for {} after {} pages ({} links kept): {}",
            topic,
            pages,
            links.len(),
            reason
        );
        TopicLinks {
            links,
            status: FetchStatus::Truncated { pages, reason },
        }
    }
}
