use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{PhotoSearch, PhotoSearchError};

const PEXELS_SEARCH_URL: &str = "https://api.pexels.com/v1/search";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    photos: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    src: PhotoSources,
}

#[derive(Debug, Deserialize)]
struct PhotoSources {
    large: Option<String>,
}

impl SearchResponse {
    fn first_large(self) -> Option<String> {
        self.photos.into_iter().next().and_then(|p| p.src.large)
    }
}

/// Pexels photo search. One result is requested per query.
#[derive(Clone)]
pub struct PexelsClient {
    client: Client,
    api_key: String,
}

impl PexelsClient {
    pub fn new(api_key: String) -> Result<Self, PhotoSearchError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            api_key,
        })
    }
}

#[async_trait]
impl PhotoSearch for PexelsClient {
    async fn first_large_url(&self, query: &str) -> Result<Option<String>, PhotoSearchError> {
        let response = self
            .client
            .get(PEXELS_SEARCH_URL)
            .header("Authorization", &self.api_key)
            .query(&[("query", query), ("per_page", "1")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(PhotoSearchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: SearchResponse = response.json().await?;
        Ok(body.first_large())
    }
}
