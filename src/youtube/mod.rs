//! YouTube access: Data API client, watch-page scraping and URL parsing.

mod client;
#[cfg(test)]
pub mod fake;
mod scrape;
pub mod types;
mod urls;

pub use client::YoutubeClient;
pub use scrape::{PageScraper, ScrapedPage};
pub use urls::extract_video_id;

use crate::error::Result;
use async_trait::async_trait;
use types::{ApiVideo, CommentThread, ListResponse, SearchItem};

/// The subset of the YouTube Data API v3 used by tubeseo.
#[async_trait]
pub trait YoutubeApi: Send + Sync {
    /// `videos.list` for the given ids and parts (e.g. `snippet`, `statistics`).
    async fn videos(&self, ids: &[String], parts: &[&str]) -> Result<Vec<ApiVideo>>;

    /// One page of `commentThreads.list` for a video.
    async fn comment_threads(
        &self,
        video_id: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<ListResponse<CommentThread>>;

    /// `search.list` for videos ordered by view count.
    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<SearchItem>>;
}
