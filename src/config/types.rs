use crate::crawler::ClientProfile;
use serde::Deserialize;

/// Main configuration structure for Topic-Trawl
///
/// Every section is optional; missing keys fall back to the defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub client: ClientConfig,
    pub crawler: CrawlerConfig,
    pub storage: StorageConfig,
}

/// Source forum layout
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SiteConfig {
    /// Base URL of the forum site; relative topic links resolve against it
    pub base_url: String,

    /// Subforums that may be crawled individually
    pub subforums: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://dou.ua".to_string(),
            subforums: vec![
                "dou".to_string(),
                "career".to_string(),
                "lenta".to_string(),
                "flame".to_string(),
                "it-news".to_string(),
            ],
        }
    }
}

/// HTTP client identity and timeouts
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ClientConfig {
    pub desktop_user_agent: String,
    pub mobile_user_agent: String,
    pub accept_language: String,

    /// Whole-request timeout in seconds
    pub timeout_secs: u64,

    pub connect_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            desktop_user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
                                 (KHTML, like Gecko) Chrome/120.0 Safari/537.36"
                .to_string(),
            mobile_user_agent: "Mozilla/5.0 (Linux; Android 13; Pixel 7) AppleWebKit/537.36 \
                                (KHTML, like Gecko) Chrome/120.0 Mobile Safari/537.36"
                .to_string(),
            accept_language: "uk,en;q=0.8".to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// Crawl behaviour
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Client identity used for listing and topic pages
    pub profile: ClientProfile,

    /// Optional cap on listing pages fetched by one reference crawl
    ///
    /// Unset by default: a crawl already ends once enough references are
    /// collected or the listing runs dry.
    pub max_listing_pages: Option<u32>,

    /// Consecutive empty listing pages that end a reference crawl
    pub max_consecutive_empty_pages: u32,

    /// Concurrent topic fetches
    pub topic_workers: usize,

    /// Pause after every page fetch (milliseconds)
    pub request_delay_ms: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            profile: ClientProfile::Mobile,
            max_listing_pages: None,
            max_consecutive_empty_pages: 2,
            topic_workers: 4,
            request_delay_ms: 0,
        }
    }
}

/// Cache location
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct StorageConfig {
    /// Path to the SQLite database file
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: "./topic-trawl.db".to_string(),
        }
    }
}
