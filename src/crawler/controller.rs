//! Crawl controller - listing pagination and topic fetch orchestration
//!
//! This module sequences every request the harvester makes:
//! - Paginating a topic listing until enough references are collected
//! - Fetching topic pages through a bounded worker pool
//! - Resolving relative topic links against the site base URL
//! - Mapping subforum names onto listing URLs
//!
//! A single failed fetch or extraction aborts the enclosing call; no partial
//! result is returned after an error.

use crate::config::{Config, CrawlerConfig, SiteConfig};
use crate::crawler::loader::{load, ClientProfile, HttpPageSource, PageSource};
use crate::extract::{extract_topic, extract_topic_references};
use crate::model::{Topic, TopicHead};
use crate::TrawlError;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use url::Url;

/// Orchestrates listing crawls and topic fetches against one forum site
pub struct Crawler<S> {
    source: Arc<S>,
    site: SiteConfig,
    settings: CrawlerConfig,
    base_url: Url,
}

impl Crawler<HttpPageSource> {
    /// Creates an HTTP-backed crawler from the full configuration
    pub fn from_config(config: &Config) -> Result<Self, TrawlError> {
        let source = HttpPageSource::new(&config.client)?;
        Self::new(source, config.site.clone(), config.crawler.clone())
    }
}

impl<S> Crawler<S>
where
    S: PageSource + 'static,
{
    /// Creates a crawler over an arbitrary page source
    ///
    /// # Errors
    ///
    /// * `UrlParse` - the site base URL is not a valid absolute URL
    pub fn new(source: S, site: SiteConfig, settings: CrawlerConfig) -> Result<Self, TrawlError> {
        let base_url = Url::parse(&site.base_url)?;
        Ok(Self {
            source: Arc::new(source),
            site,
            settings,
            base_url,
        })
    }

    /// Overrides the client identity used for every request
    pub fn with_profile(mut self, profile: ClientProfile) -> Self {
        self.settings.profile = profile;
        self
    }

    /// The client identity used for every request
    pub fn profile(&self) -> ClientProfile {
        self.settings.profile
    }

    /// Builds the listing URL prefix for the whole forum or one subforum
    ///
    /// Page numbers are appended directly to the returned prefix.
    ///
    /// # Errors
    ///
    /// * `UnknownSubforum` - the subforum is not in the configured list
    pub fn listing_prefix(&self, subforum: Option<&str>) -> Result<String, TrawlError> {
        let base = self.site.base_url.trim_end_matches('/');
        match subforum {
            None => Ok(format!("{}/forums/page/", base)),
            Some(name) if self.site.subforums.iter().any(|s| s == name) => {
                Ok(format!("{}/forums/{}/page/", base, name))
            }
            Some(name) => Err(TrawlError::UnknownSubforum(name.to_string())),
        }
    }

    /// Resolves a harvested topic link to an absolute URL
    pub fn resolve_reference(&self, reference: &str) -> Result<String, TrawlError> {
        Ok(self.base_url.join(reference)?.to_string())
    }

    /// Collects exactly `desired` topic references by paginating `prefix1`, `prefix2`, ...
    ///
    /// References keep listing order and are truncated to `desired`. The crawl
    /// stops short only when the configured number of consecutive listing pages
    /// comes back empty, or when the optional listing page cap is reached; both cases are
    /// logged as warnings and return what was collected.
    ///
    /// # Errors
    ///
    /// Any fetch, parse or extraction failure on a listing page aborts the call.
    pub async fn collect_topic_references(
        &self,
        prefix: &str,
        desired: usize,
    ) -> Result<Vec<String>, TrawlError> {
        let mut references = Vec::with_capacity(desired);
        let mut page_number: u32 = 0;
        let mut consecutive_empty: u32 = 0;

        while references.len() < desired {
            if self
                .settings
                .max_listing_pages
                .is_some_and(|cap| page_number >= cap)
            {
                tracing::warn!(
                    "Stopping at crawler.max-listing-pages ({}) with {} of {} references",
                    page_number,
                    references.len(),
                    desired
                );
                break;
            }

            page_number += 1;
            tracing::info!("Topics list page {}...", page_number);

            let url = format!("{}{}", prefix, page_number);
            let page_references = self.fetch_listing(&url).await?;

            if page_references.is_empty() {
                consecutive_empty += 1;
                tracing::debug!("Listing page {} is empty", page_number);
                if consecutive_empty >= self.settings.max_consecutive_empty_pages {
                    tracing::warn!(
                        "Listing exhausted at page {} with {} of {} references",
                        page_number,
                        references.len(),
                        desired
                    );
                    break;
                }
                continue;
            }

            consecutive_empty = 0;
            references.extend(page_references);
        }

        references.truncate(desired);
        tracing::info!("Collected {} topic references", references.len());
        Ok(references)
    }

    /// Fetches and extracts every referenced topic, preserving input order
    ///
    /// Up to `topic-workers` pages are in flight at once. Each result lands in
    /// the slot of its input index. The first failure aborts the remaining tasks.
    pub async fn collect_topics(&self, references: &[String]) -> Result<Vec<Topic>, TrawlError> {
        let urls = references
            .iter()
            .map(|reference| self.resolve_reference(reference))
            .collect::<Result<Vec<_>, _>>()?;

        let total = urls.len();
        let start_time = Instant::now();
        let semaphore = Arc::new(Semaphore::new(self.settings.topic_workers.max(1)));
        let mut tasks = JoinSet::new();

        for (index, url) in urls.into_iter().enumerate() {
            let source = Arc::clone(&self.source);
            let semaphore = Arc::clone(&semaphore);
            let profile = self.settings.profile;
            let delay = self.request_delay();

            tasks.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|e| TrawlError::Task(e.to_string()))?;

                tracing::info!("Topic {} out of {}...", index + 1, total);
                let topic = fetch_topic(source.as_ref(), &url, profile).await?;
                pause(delay).await;

                Ok::<_, TrawlError>((index, topic))
            });
        }

        let mut slots: Vec<Option<Topic>> = (0..total).map(|_| None).collect();

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok((index, topic))) => slots[index] = Some(topic),
                Ok(Err(e)) => {
                    tracing::error!("Topic batch aborted: {}", e);
                    tasks.abort_all();
                    return Err(e);
                }
                Err(join_error) => {
                    tasks.abort_all();
                    return Err(TrawlError::Task(join_error.to_string()));
                }
            }
        }

        let topics = slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.ok_or_else(|| TrawlError::Task(format!("topic {} produced no result", index)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!("Fetched {} topics in {:?}", topics.len(), start_time.elapsed());
        Ok(topics)
    }

    // ===== Caller-facing operations =====

    /// Collects `count` topic references from a listing prefix
    pub async fn get_topic_reference_list(
        &self,
        prefix: &str,
        count: usize,
    ) -> Result<Vec<String>, TrawlError> {
        self.collect_topic_references(prefix, count).await
    }

    /// Fetches the `count` most recent topics across the whole forum
    pub async fn get_topic_list(&self, count: usize) -> Result<Vec<Topic>, TrawlError> {
        self.get_subforum_topic_list(None, count).await
    }

    /// Fetches the `count` most recent topics of a subforum (or the whole forum)
    pub async fn get_subforum_topic_list(
        &self,
        subforum: Option<&str>,
        count: usize,
    ) -> Result<Vec<Topic>, TrawlError> {
        let prefix = self.listing_prefix(subforum)?;
        let references = self.collect_topic_references(&prefix, count).await?;
        self.collect_topics(&references).await
    }

    /// Fetches the given topic references
    pub async fn get_topic_list_from(&self, references: &[String]) -> Result<Vec<Topic>, TrawlError> {
        self.collect_topics(references).await
    }

    /// Fetches a single topic
    pub async fn get_topic(&self, reference: &str) -> Result<Topic, TrawlError> {
        let url = self.resolve_reference(reference)?;
        fetch_topic(self.source.as_ref(), &url, self.settings.profile).await
    }

    /// Fetches topic summaries (no body or comments) for a subforum or the whole forum
    pub async fn get_topic_heads(
        &self,
        subforum: Option<&str>,
        count: usize,
    ) -> Result<Vec<TopicHead>, TrawlError> {
        let topics = self.get_subforum_topic_list(subforum, count).await?;
        Ok(topics.iter().map(TopicHead::from).collect())
    }

    async fn fetch_listing(&self, url: &str) -> Result<Vec<String>, TrawlError> {
        let references = {
            let page = load(self.source.as_ref(), url, self.settings.profile).await?;
            extract_topic_references(&page)?
        };
        pause(self.request_delay()).await;
        Ok(references)
    }

    fn request_delay(&self) -> Duration {
        Duration::from_millis(self.settings.request_delay_ms)
    }
}

/// Loads one topic page and extracts it
///
/// The parsed tree is dropped before this future completes, so it never
/// outlives a single task.
async fn fetch_topic<S>(source: &S, url: &str, profile: ClientProfile) -> Result<Topic, TrawlError>
where
    S: PageSource + ?Sized,
{
    let page = load(source, url, profile).await?;
    Ok(extract_topic(&page, url)?)
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
