//! Configuration module for Topic-Trawl
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional, so an empty file (or no file) yields a working
//! setup aimed at dou.ua.
//!
//! # Example
//!
//! ```no_run
//! use topic_trawl::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("topic-trawl.toml")).unwrap();
//! println!("Crawling {}", config.site.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{ClientConfig, Config, CrawlerConfig, SiteConfig, StorageConfig};
pub use validation::{validate, MAX_TOPIC_WORKERS};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
