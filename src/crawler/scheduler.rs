//! Request pacing for the link fetcher
//!
//! All requests are issued strictly one after another. The pacer only
//! decides how long to sleep between them:
//! - a short delay between the pages of one topic
//! - a longer courtesy delay between topics

use crate::config::ApiConfig;
use std::time::Duration;

/// Fixed-delay pacer shared by every request of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacer {
    /// Delay before requesting the next page of the same topic
    page_delay: Duration,

    /// Delay after a topic has been fully fetched
    topic_delay: Duration,
}

impl Pacer {
    /// Creates a pacer with explicit delays
    pub fn new(page_delay: Duration, topic_delay: Duration) -> Self {
        Self {
            page_delay,
            topic_delay,
        }
    }

    /// Creates a pacer from the `[api]` configuration section
    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(
            Duration::from_millis(config.page_delay_ms),
            Duration::from_millis(config.topic_delay_ms),
        )
    }

    /// A pacer that never sleeps
    pub fn immediate() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    pub fn page_delay(&self) -> Duration {
        self.page_delay
    }

    pub fn topic_delay(&self) -> Duration {
        self.topic_delay
    }

    /// Waits before following a continuation token
    pub async fn between_pages(&self) {
        pause(self.page_delay).await;
    }

    /// Waits after finishing one topic
    pub async fn between_topics(&self) {
        pause(self.topic_delay).await;
    }
}

async fn pause(delay: Duration) {
    if delay.is_zero() {
        return;
    }
    tracing::trace!("Pausing {:?} before next request", delay);
    tokio::time::sleep(delay).await;
}
