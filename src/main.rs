//! Topic-Trawl main entry point
//!
//! This is the command-line interface for the Topic-Trawl forum harvester.

use clap::{Parser, Subcommand};
use std::future::Future;
use std::path::{Path, PathBuf};
use topic_trawl::config::{load_config_with_hash, validate, Config};
use topic_trawl::output::{
    load_statistics, print_statistics, render_heads, render_references, render_topics,
    OutputFormat,
};
use topic_trawl::storage::{open_storage, TopicStore};
use topic_trawl::{ClientProfile, Crawler, TrawlError};
use tracing_subscriber::EnvFilter;

/// Topic-Trawl: a forum topic harvester
///
/// Topic-Trawl walks a paginated forum listing, fetches each topic page and
/// extracts titles, authors, view counts and nested comment threads.
#[derive(Parser, Debug)]
#[command(name = "topic-trawl")]
#[command(version)]
#[command(about = "A forum topic harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(short, long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    /// Override the configured client profile
    #[arg(long, value_enum, global = true)]
    profile: Option<ClientProfile>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print topic URLs from the listing
    References {
        /// Number of references to collect
        count: usize,

        /// Restrict the listing to one configured subforum
        #[arg(long)]
        subforum: Option<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Fetch topics, cache them and print them
    Topics {
        /// Number of topics to fetch
        count: usize,

        /// Restrict the listing to one configured subforum
        #[arg(long)]
        subforum: Option<String>,

        /// Do not store the fetched topics in the cache
        #[arg(long)]
        no_cache: bool,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Print topic summaries without bodies or comments
    Heads {
        /// Number of topics to summarise
        count: usize,

        /// Restrict the listing to one configured subforum
        #[arg(long)]
        subforum: Option<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Fetch and print a single topic
    Topic {
        /// Topic URL, absolute or relative to the site base URL
        url: String,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Print the most recently cached topics
    Recent {
        /// Number of topics to print
        count: usize,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Delete all cached topics
    ClearCache,

    /// Show cache statistics
    Stats,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match load_configuration(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if let Err(e) = run(cli.command, cli.profile, &config).await {
        tracing::error!("{}", e);
        return Err(e.into());
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("topic_trawl=info,warn"),
            1 => EnvFilter::new("topic_trawl=debug,info"),
            2 => EnvFilter::new("topic_trawl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // Logs go to stderr so stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration file, or validated defaults when none is given
fn load_configuration(path: Option<&Path>) -> Result<Config, TrawlError> {
    match path {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)?;
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

async fn run(
    command: Command,
    profile: Option<ClientProfile>,
    config: &Config,
) -> Result<(), TrawlError> {
    match command {
        Command::References {
            count,
            subforum,
            format,
        } => {
            let crawler = build_crawler(config, profile)?;
            let prefix = crawler.listing_prefix(subforum.as_deref())?;
            let references =
                until_interrupted(crawler.get_topic_reference_list(&prefix, count)).await?;
            println!("{}", render_references(&references, format)?);
        }
        Command::Topics {
            count,
            subforum,
            no_cache,
            format,
        } => {
            handle_topics(config, profile, subforum.as_deref(), count, no_cache, format).await?;
        }
        Command::Heads {
            count,
            subforum,
            format,
        } => {
            let crawler = build_crawler(config, profile)?;
            let heads =
                until_interrupted(crawler.get_topic_heads(subforum.as_deref(), count)).await?;
            println!("{}", render_heads(&heads, format)?);
        }
        Command::Topic { url, format } => {
            let crawler = build_crawler(config, profile)?;
            let topic = until_interrupted(crawler.get_topic(&url)).await?;
            println!("{}", render_topics(std::slice::from_ref(&topic), format)?);
        }
        Command::Recent { count, format } => {
            let storage = open_storage(Path::new(&config.storage.database_path))?;
            let topics = storage.load_recent(count)?;
            println!("{}", render_topics(&topics, format)?);
        }
        Command::ClearCache => {
            let mut storage = open_storage(Path::new(&config.storage.database_path))?;
            let deleted = storage.clear()?;
            println!("✓ Deleted {} cached topics", deleted);
        }
        Command::Stats => {
            println!("Database: {}\n", config.storage.database_path);
            let storage = open_storage(Path::new(&config.storage.database_path))?;
            let stats = load_statistics(&storage)?;
            print_statistics(&stats);
        }
    }

    Ok(())
}

/// Handles the main harvest: crawl, cache, print
async fn handle_topics(
    config: &Config,
    profile: Option<ClientProfile>,
    subforum: Option<&str>,
    count: usize,
    no_cache: bool,
    format: OutputFormat,
) -> Result<(), TrawlError> {
    let crawler = build_crawler(config, profile)?;
    tracing::info!(
        "Harvesting {} topics from {} ({} profile, {} workers)",
        count,
        crawler.listing_prefix(subforum)?,
        crawler.profile(),
        config.crawler.topic_workers
    );

    let topics = until_interrupted(crawler.get_subforum_topic_list(subforum, count)).await?;

    if no_cache {
        tracing::debug!("Skipping cache");
    } else {
        let mut storage = open_storage(Path::new(&config.storage.database_path))?;
        let stored = storage.store(&topics)?;
        tracing::info!(
            "Cached {} topics in {}",
            stored,
            config.storage.database_path
        );
    }

    println!("{}", render_topics(&topics, format)?);
    Ok(())
}

fn build_crawler(
    config: &Config,
    profile: Option<ClientProfile>,
) -> Result<Crawler<topic_trawl::HttpPageSource>, TrawlError> {
    let crawler = Crawler::from_config(config)?;
    Ok(match profile {
        Some(profile) => crawler.with_profile(profile),
        None => crawler,
    })
}

/// Runs a crawl future, dropping it (and its in-flight fetches) on Ctrl-C
async fn until_interrupted<T>(
    crawl: impl Future<Output = Result<T, TrawlError>>,
) -> Result<T, TrawlError> {
    tokio::select! {
        result = crawl => result,
        signal = tokio::signal::ctrl_c() => {
            signal?;
            tracing::warn!("Interrupted, abandoning in-flight requests");
            Err(TrawlError::Task("interrupted".to_string()))
        }
    }
}
