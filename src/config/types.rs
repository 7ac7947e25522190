use serde::Deserialize;

/// Seed topics used when the configuration does not name any
pub const DEFAULT_SEEDS: [&str; 6] = [
    "Science",
    "Natural science",
    "Formal science",
    "Mathematics",
    "Physics",
    "Artificial intelligence",
];

/// Main configuration structure for Topic-Graph
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub graph: GraphConfig,
}

/// Remote API and pacing configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Endpoint of the MediaWiki query API
    #[serde(default = "default_api_url")]
    pub url: String,

    /// Page size hint sent as `pllimit` ("max" or a number)
    #[serde(rename = "page-limit", default = "default_page_limit")]
    pub page_limit: String,

    /// Delay between paginated requests for one topic (milliseconds)
    #[serde(rename = "page-delay-ms", default = "default_page_delay_ms")]
    pub page_delay_ms: u64,

    /// Delay between consecutive topics (milliseconds)
    #[serde(rename = "topic-delay-ms", default = "default_topic_delay_ms")]
    pub topic_delay_ms: u64,

    /// Stop paging once a topic has this many links
    #[serde(rename = "max-links-per-topic", default)]
    pub max_links_per_topic: Option<usize>,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the client
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the client
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the client
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for client-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the persisted graph snapshot
    #[serde(rename = "snapshot-path", default = "default_snapshot_path")]
    pub snapshot_path: String,

    /// Directory holding index.html and the visualization assets
    #[serde(rename = "static-dir", default = "default_static_dir")]
    pub static_dir: String,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

/// Graph seed configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GraphConfig {
    /// Ordered list of primary topics
    #[serde(default = "default_seeds")]
    pub seeds: Vec<String>,
}

fn default_api_url() -> String {
    "https://en.wikipedia.org/w/api.php".to_string()
}

fn default_page_limit() -> String {
    "max".to_string()
}

fn default_page_delay_ms() -> u64 {
    100
}

fn default_topic_delay_ms() -> u64 {
    500
}

fn default_snapshot_path() -> String {
    "graph-data.json".to_string()
}

fn default_static_dir() -> String {
    "static".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_seeds() -> Vec<String> {
    DEFAULT_SEEDS.iter().map(|s| s.to_string()).collect()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: default_api_url(),
            page_limit: default_page_limit(),
            page_delay_ms: default_page_delay_ms(),
            topic_delay_ms: default_topic_delay_ms(),
            max_links_per_topic: None,
        }
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "TopicGraph".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://example.org/topic-graph".to_string(),
            contact_email: "admin@example.org".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
            static_dir: default_static_dir(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            seeds: default_seeds(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the user agent as `Name/Version (+ContactURL; ContactEmail)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}
