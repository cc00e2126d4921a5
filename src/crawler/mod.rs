//! Crawler module for forum page fetching and orchestration
//!
//! This module contains the fetch side of the harvester, including:
//! - The page loader (HTTP GET with a selectable client identity, then parse)
//! - The crawl controller (listing pagination and the topic worker pool)

mod controller;
mod loader;

pub use controller::Crawler;
pub use loader::{build_http_client, load, ClientProfile, HttpPageSource, PageSource};
