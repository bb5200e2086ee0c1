//! In-memory `YoutubeApi` for unit tests.

use super::types::{ApiVideo, CommentThread, ListResponse, SearchItem};
use super::YoutubeApi;
use crate::error::{Result, SeoError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
pub struct FakeYoutube {
    videos: Vec<ApiVideo>,
    comment_pages: Vec<Vec<CommentThread>>,
    searches: HashMap<String, Vec<SearchItem>>,
    failure: Option<(u16, String)>,
    comments_failure: bool,
    calls: Mutex<Vec<String>>,
}

impl FakeYoutube {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_video(mut self, video: serde_json::Value) -> Self {
        self.videos
            .push(serde_json::from_value(video).expect("invalid video fixture"));
        self
    }

    pub fn with_comment_page(mut self, threads: serde_json::Value) -> Self {
        self.comment_pages
            .push(serde_json::from_value(threads).expect("invalid comment fixture"));
        self
    }

    pub fn with_search(mut self, query: &str, items: serde_json::Value) -> Self {
        self.searches.insert(
            query.to_string(),
            serde_json::from_value(items).expect("invalid search fixture"),
        );
        self
    }

    /// Every call fails with this status and reason.
    pub fn failing(mut self, status: u16, reason: &str) -> Self {
        self.failure = Some((status, reason.to_string()));
        self
    }

    /// Comment listing fails, as when comments are disabled.
    pub fn without_comments(mut self) -> Self {
        self.comments_failure = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        match &self.failure {
            Some((status, reason)) => Err(SeoError::YoutubeApi {
                status: *status,
                reason: Some(reason.clone()),
                message: "fake failure".to_string(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl YoutubeApi for FakeYoutube {
    async fn videos(&self, ids: &[String], parts: &[&str]) -> Result<Vec<ApiVideo>> {
        self.record(format!("videos:{}:{}", parts.join(","), ids.join(",")))?;
        Ok(self
            .videos
            .iter()
            .filter(|v| ids.contains(&v.id))
            .cloned()
            .collect())
    }

    async fn comment_threads(
        &self,
        video_id: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<ListResponse<CommentThread>> {
        self.record(format!(
            "comments:{}:{}:{}",
            video_id,
            page_size,
            page_token.unwrap_or("-")
        ))?;
        if self.comments_failure {
            return Err(SeoError::YoutubeApi {
                status: 403,
                reason: Some("commentsDisabled".to_string()),
                message: "comments disabled".to_string(),
            });
        }

        let page = page_token
            .and_then(|t| t.strip_prefix("page-"))
            .and_then(|n| n.parse::<usize>().ok())
            .unwrap_or(0);
        let items = self.comment_pages.get(page).cloned().unwrap_or_default();
        let next_page_token =
            (page + 1 < self.comment_pages.len()).then(|| format!("page-{}", page + 1));

        Ok(ListResponse {
            items,
            next_page_token,
        })
    }

    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<SearchItem>> {
        self.record(format!("search:{}:{}", query, max_results))?;
        let mut items = self.searches.get(query).cloned().unwrap_or_default();
        items.truncate(max_results as usize);
        Ok(items)
    }
}
