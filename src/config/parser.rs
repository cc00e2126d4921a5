use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Reads, parses and validates a configuration file
///
/// Missing sections fall back to their defaults, so an empty file is valid.
///
/// # Errors
///
/// * `Io` - the file cannot be read
/// * `Parse` - the content is not valid TOML for this layout
/// * `Validation` / `InvalidUrl` - a setting is out of range
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use topic_trawl::config::load_config;
///
/// let config = load_config(Path::new("topic-trawl.toml")).unwrap();
/// println!("Topic workers: {}", config.crawler.topic_workers);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    parse_config(&std::fs::read_to_string(path)?)
}

/// Parses and validates configuration text
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// SHA-256 of the configuration file, hex encoded
///
/// Logged at start-up so runs can be matched to the settings they used.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    Ok(content_hash(&std::fs::read_to_string(path)?))
}

/// Loads a configuration together with the hash of the exact text parsed
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    Ok((config, content_hash(&content)))
}

fn content_hash(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}
