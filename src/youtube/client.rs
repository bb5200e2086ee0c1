//! HTTP client for the YouTube Data API v3.

use super::types::{ApiErrorBody, ApiVideo, CommentThread, ListResponse, SearchItem};
use super::YoutubeApi;
use crate::config::YoutubeSettings;
use crate::error::{Result, SeoError};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument};

/// The API accepts at most 50 ids per `videos` call and 50 results per search page.
const MAX_PAGE_SIZE: u32 = 50;

/// `reqwest`-backed Data API client.
pub struct YoutubeClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl YoutubeClient {
    /// Create a client for the given API key and base URL.
    pub fn new(api_key: &str, base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SeoError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Build a client from settings, or `None` when no API key is configured.
    pub fn from_settings(settings: &YoutubeSettings) -> Result<Option<Self>> {
        match settings.api_key() {
            Some(key) => Ok(Some(Self::new(
                key,
                &settings.api_base_url,
                Duration::from_secs(settings.timeout_secs),
            )?)),
            None => Ok(None),
        }
    }

    async fn get<T: DeserializeOwned>(&self, resource: &str, query: &[(&str, String)]) -> Result<T> {
        let url = format!("{}/{}", self.base_url, resource);
        debug!("GET {} {:?}", url, query);

        let response = self
            .http
            .get(&url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status.as_u16(), &body));
        }

        Ok(response.json::<T>().await?)
    }
}

/// Translate a non-2xx response into a typed error, keeping the API's reason code.
fn api_error(status: u16, body: &str) -> SeoError {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => SeoError::YoutubeApi {
            status,
            reason: parsed.error.errors.into_iter().find_map(|e| e.reason),
            message: parsed.error.message,
        },
        Err(_) => SeoError::YoutubeApi {
            status,
            reason: None,
            message: if body.trim().is_empty() {
                format!("HTTP {}", status)
            } else {
                body.chars().take(300).collect()
            },
        },
    }
}

#[async_trait]
impl YoutubeApi for YoutubeClient {
    #[instrument(skip(self), fields(count = ids.len()))]
    async fn videos(&self, ids: &[String], parts: &[&str]) -> Result<Vec<ApiVideo>> {
        let mut videos = Vec::with_capacity(ids.len());

        for chunk in ids.chunks(MAX_PAGE_SIZE as usize) {
            let response: ListResponse<ApiVideo> = self
                .get(
                    "videos",
                    &[("part", parts.join(",")), ("id", chunk.join(","))],
                )
                .await?;
            videos.extend(response.items);
        }

        Ok(videos)
    }

    #[instrument(skip(self))]
    async fn comment_threads(
        &self,
        video_id: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<ListResponse<CommentThread>> {
        let mut query = vec![
            ("part", "snippet".to_string()),
            ("videoId", video_id.to_string()),
            ("maxResults", page_size.clamp(1, 100).to_string()),
            ("textFormat", "plainText".to_string()),
        ];
        if let Some(token) = page_token {
            query.push(("pageToken", token.to_string()));
        }

        self.get("commentThreads", &query).await
    }

    #[instrument(skip(self))]
    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<SearchItem>> {
        let response: ListResponse<SearchItem> = self
            .get(
                "search",
                &[
                    ("part", "snippet".to_string()),
                    ("q", query.to_string()),
                    ("type", "video".to_string()),
                    ("order", "viewCount".to_string()),
                    ("maxResults", max_results.clamp(1, MAX_PAGE_SIZE).to_string()),
                ],
            )
            .await?;

        Ok(response.items)
    }
}
