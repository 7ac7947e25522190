//! Topic-Graph main entry point
//!
//! This is the command-line interface for building and serving the topic
//! link graph.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use topic_graph::config::{load_config_with_hash, validate, Config};
use topic_graph::graph::GraphBuilder;
use topic_graph::output::{print_build_report, print_statistics, GraphStatistics};
use topic_graph::server::run_server;
use topic_graph::storage::SnapshotStore;
use tracing_subscriber::EnvFilter;

/// Topic-Graph: a link graph of encyclopedia topics
///
/// Fetches the outbound links of a fixed list of seed topics, assembles
/// them into a node/edge graph and serves it to a browser visualization.
#[derive(Parser, Debug)]
#[command(name = "topic-graph")]
#[command(version)]
#[command(about = "Builds and serves a topic link graph", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch link data for all seeds and overwrite the snapshot
    Build,

    /// Serve the visualization and the graph API
    Serve {
        /// Build once before serving if no snapshot exists yet
        #[arg(long)]
        build_if_missing: bool,

        /// Override the configured port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Show statistics of the persisted snapshot and exit
    Stats,

    /// Validate the configuration and show what would be fetched
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = load(cli.config.as_deref())?;

    match cli.command {
        Command::Build => handle_build(&config).await?,
        Command::Serve {
            build_if_missing,
            port,
        } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            run_server(&config, build_if_missing)
                .await
                .context("server failed")?;
        }
        Command::Stats => handle_stats(&config).await?,
        Command::Check => handle_check(&config),
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("topic_graph=info,warn"),
            1 => EnvFilter::new("topic_graph=debug,tower_http=debug,info"),
            2 => EnvFilter::new("topic_graph=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration file, or validated defaults when none is given
fn load(path: Option<&std::path::Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            Ok(config)
        }
        None => {
            tracing::debug!("No configuration file given, using defaults");
            let config = Config::default();
            validate(&config)?;
            Ok(config)
        }
    }
}

/// Handles the build command: full rebuild and report
async fn handle_build(config: &Config) -> anyhow::Result<()> {
    tracing::info!(
        "Building graph for {} seeds from {}",
        config.graph.seeds.len(),
        config.api.url
    );

    let builder = GraphBuilder::from_config(config)?;
    let (_snapshot, report) = builder
        .build_with_report()
        .await
        .context("graph build failed")?;

    print_build_report(&report);
    Ok(())
}

/// Handles the stats command: statistics from the persisted snapshot
async fn handle_stats(config: &Config) -> anyhow::Result<()> {
    let store = SnapshotStore::new(&config.output.snapshot_path);
    println!("Snapshot: {}\n", store.path().display());

    let snapshot = store.load().await?;
    print_statistics(&GraphStatistics::from_snapshot(&snapshot));
    Ok(())
}

/// Handles the check command: shows the effective configuration
fn handle_check(config: &Config) {
    println!("=== Topic-Graph Configuration ===\n");

    println!("API:");
    println!("  Endpoint: {}", config.api.url);
    println!("  Page limit: {}", config.api.page_limit);
    println!("  Delay between pages: {}ms", config.api.page_delay_ms);
    println!("  Delay between topics: {}ms", config.api.topic_delay_ms);
    match config.api.max_links_per_topic {
        Some(cap) => println!("  Max links per topic: {}", cap),
        None => println!("  Max links per topic: unlimited"),
    }

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!("  Snapshot: {}", config.output.snapshot_path);
    println!("  Static files: {}", config.output.static_dir);

    println!("\nServer:");
    println!("  http://{}:{}", config.server.host, config.server.port);

    println!("\nSeeds ({}):", config.graph.seeds.len());
    for seed in &config.graph.seeds {
        println!("  - {}", seed);
    }

    println!("\n✓ Configuration is valid");
}
