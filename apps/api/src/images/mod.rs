//! Turns a post's image description into a displayable URL.
//!
//! Lookups go to a `PhotoSearch` backend (Pexels in production). Any failure for a
//! given post falls back to a deterministic placeholder keyed by the post's index,
//! so a resolved URL is never empty and one bad lookup never sinks the calendar.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use thiserror::Error;
use tracing::{debug, info, warn};

pub mod pexels;

const PLACEHOLDER_BASE_URL: &str = "https://picsum.photos/600/400";

#[derive(Debug, Error)]
pub enum PhotoSearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// Query-by-text photo lookup. Returns the large-variant URL of the top hit, if any.
#[async_trait]
pub trait PhotoSearch: Send + Sync {
    async fn first_large_url(&self, query: &str) -> Result<Option<String>, PhotoSearchError>;
}

/// Deterministic fallback image for the post at `index`.
pub fn placeholder_url(index: usize) -> String {
    format!("{PLACEHOLDER_BASE_URL}?random={index}")
}

#[derive(Clone, Default)]
pub struct ImageResolver {
    search: Option<Arc<dyn PhotoSearch>>,
}

impl ImageResolver {
    /// `None` disables photo search; every post then gets its placeholder.
    pub fn new(search: Option<Arc<dyn PhotoSearch>>) -> Self {
        Self { search }
    }

    pub async fn resolve(&self, index: usize, description: &str) -> String {
        let Some(search) = &self.search else {
            return placeholder_url(index);
        };
        if description.trim().is_empty() {
            debug!("Post {index}: empty image description, using placeholder");
            return placeholder_url(index);
        }

        match search.first_large_url(description).await {
            Ok(Some(url)) if !url.trim().is_empty() => url,
            Ok(_) => {
                debug!("Post {index}: no photo results for {description:?}, using placeholder");
                placeholder_url(index)
            }
            Err(e) => {
                warn!("Post {index}: photo search failed ({e}), using placeholder");
                placeholder_url(index)
            }
        }
    }

    /// Resolves every description concurrently. Output order matches input order.
    pub async fn resolve_all(&self, descriptions: &[String]) -> Vec<String> {
        let urls = join_all(
            descriptions
                .iter()
                .enumerate()
                .map(|(index, description)| self.resolve(index, description)),
        )
        .await;

        let placeholders = urls
            .iter()
            .enumerate()
            .filter(|(i, url)| *url == &placeholder_url(*i))
            .count();
        info!(
            "Resolved {} images ({} placeholders)",
            urls.len(),
            placeholders
        );
        urls
    }
}
