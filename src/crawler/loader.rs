//! Page loader
//!
//! This module owns all network I/O:
//! - Building the shared HTTP client with timeouts and compression
//! - Choosing the client identity (desktop or mobile) per request
//! - Classifying transport, status and content failures
//! - Parsing the response body into a [`Document`]
//!
//! There are no retries at this layer.

use crate::config::ClientConfig;
use crate::dom::Document;
use crate::TrawlError;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, USER_AGENT};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

const ACCEPT_MARKUP: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Client identity presented to the source site
///
/// The forum serves different markup to desktop and mobile browsers, and the
/// extractor layout targets one of them, so this choice matters.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ClientProfile {
    Desktop,
    #[default]
    Mobile,
}

impl fmt::Display for ClientProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Desktop => write!(f, "desktop"),
            Self::Mobile => write!(f, "mobile"),
        }
    }
}

/// Source of raw page markup
///
/// Implemented over HTTP by [`HttpPageSource`]; tests and alternative
/// transports can provide their own.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Performs one GET for `url` as `profile` and returns the body
    async fn fetch_markup(&self, url: &str, profile: ClientProfile) -> Result<String, TrawlError>;
}

/// Builds an HTTP client with proper configuration
///
/// The User-Agent is not baked in: it is set per request from the profile.
pub fn build_http_client(config: &ClientConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// HTTP page source backed by a shared `reqwest` client
pub struct HttpPageSource {
    client: Client,
    desktop_user_agent: String,
    mobile_user_agent: String,
    accept_language: String,
}

impl HttpPageSource {
    /// Creates a page source from the client configuration
    pub fn new(config: &ClientConfig) -> Result<Self, TrawlError> {
        let client = build_http_client(config)?;

        Ok(Self {
            client,
            desktop_user_agent: config.desktop_user_agent.clone(),
            mobile_user_agent: config.mobile_user_agent.clone(),
            accept_language: config.accept_language.clone(),
        })
    }

    /// The User-Agent header sent for a profile
    pub fn user_agent(&self, profile: ClientProfile) -> &str {
        match profile {
            ClientProfile::Desktop => &self.desktop_user_agent,
            ClientProfile::Mobile => &self.mobile_user_agent,
        }
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch_markup(&self, url: &str, profile: ClientProfile) -> Result<String, TrawlError> {
        tracing::debug!("GET {} as {}", url, profile);

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, self.user_agent(profile))
            .header(ACCEPT, ACCEPT_MARKUP)
            .header(ACCEPT_LANGUAGE, self.accept_language.as_str())
            .send()
            .await
            .map_err(|source| TrawlError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TrawlError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        if let Some(content_type) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            if !is_markup_content_type(content_type) {
                return Err(TrawlError::Parse {
                    url: url.to_string(),
                    message: format!("unexpected Content-Type '{}'", content_type),
                });
            }
        }

        response.text().await.map_err(|source| TrawlError::Http {
            url: url.to_string(),
            source,
        })
    }
}

/// Fetches a page and parses it into a navigable tree
///
/// # Errors
///
/// * `Http` / `HttpStatus` - transport failure or non-success status
/// * `Parse` - the body is empty or not markup
pub async fn load<S>(source: &S, url: &str, profile: ClientProfile) -> Result<Document, TrawlError>
where
    S: PageSource + ?Sized,
{
    let markup = source.fetch_markup(url, profile).await?;

    if markup.trim().is_empty() {
        return Err(TrawlError::Parse {
            url: url.to_string(),
            message: "empty response body".to_string(),
        });
    }

    Ok(Document::parse(url, &markup))
}

fn is_markup_content_type(content_type: &str) -> bool {
    let content_type = content_type.to_ascii_lowercase();
    content_type.contains("html") || content_type.contains("xml")
}
