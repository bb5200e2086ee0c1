//! Video data extraction.
//!
//! Normalizes Data API responses (or, without an API key, the public watch
//! page) into a [`VideoData`] record with tags, comments and engagement
//! metrics.

use crate::error::{Result, SeoError};
use crate::youtube::{extract_video_id, PageScraper, YoutubeApi};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, LazyLock};
use tracing::{info, instrument, warn};

static ISO_DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^P(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?)?$").expect("Invalid regex")
});

/// Where a video record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// YouTube Data API v3.
    Api,
    /// Public watch page.
    Scrape,
}

/// A normalized video record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoData {
    pub id: String,
    pub title: String,
    pub description: String,
    pub channel_title: String,
    pub published_at: String,
    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
    /// ISO-8601 duration as reported by the API (e.g. `PT4M13S`).
    pub duration: Option<String>,
    pub duration_seconds: Option<u64>,
    pub tags: Vec<String>,
    pub comments: Vec<Comment>,
    pub engagement_metrics: EngagementMetrics,
    pub source: DataSource,
}

/// A top-level comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub author: String,
    pub text: String,
    pub like_count: u64,
    pub published_at: String,
}

/// Engagement ratios relative to views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EngagementMetrics {
    pub engagement_rate: f64,
    pub like_ratio: f64,
    pub comment_ratio: f64,
}

impl EngagementMetrics {
    /// Compute ratios from raw counts; all zero when there are no views.
    pub fn from_counts(views: u64, likes: u64, comments: u64) -> Self {
        if views == 0 {
            return Self::default();
        }
        let views = views as f64;
        Self {
            engagement_rate: (likes + comments) as f64 / views,
            like_ratio: likes as f64 / views,
            comment_ratio: comments as f64 / views,
        }
    }
}

/// Parse an ISO-8601 duration such as `PT1H2M3S` into seconds.
pub fn parse_duration(iso: &str) -> Option<u64> {
    let caps = ISO_DURATION.captures(iso.trim())?;
    let part = |i: usize| -> u64 {
        caps.get(i)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0)
    };
    Some(part(1) * 86_400 + part(2) * 3600 + part(3) * 60 + part(4))
}

/// Fetches video data for a URL.
pub struct YoutubeExtractor {
    api: Option<Arc<dyn YoutubeApi>>,
    scraper: PageScraper,
    max_comments: usize,
}

impl YoutubeExtractor {
    /// Create an extractor. Without an API client, data is scraped and comments are unavailable.
    pub fn new(api: Option<Arc<dyn YoutubeApi>>, scraper: PageScraper, max_comments: usize) -> Self {
        Self {
            api,
            scraper,
            max_comments,
        }
    }

    /// Extract video data from a YouTube URL or bare video id.
    #[instrument(skip(self))]
    pub async fn extract_video_data(&self, url: &str) -> Result<VideoData> {
        let video_id = extract_video_id(url)
            .ok_or_else(|| SeoError::InvalidInput("Invalid YouTube URL".to_string()))?;

        match &self.api {
            Some(api) => self.fetch_from_api(api.as_ref(), &video_id).await,
            None => {
                info!("No YouTube API key configured, scraping watch page for {}", video_id);
                self.fetch_from_page(&video_id).await
            }
        }
    }

    async fn fetch_from_api(&self, api: &dyn YoutubeApi, video_id: &str) -> Result<VideoData> {
        info!("Fetching video {} from the Data API", video_id);
        let videos = api
            .videos(
                &[video_id.to_string()],
                &["snippet", "statistics", "contentDetails"],
            )
            .await?;

        let video = videos
            .into_iter()
            .next()
            .ok_or_else(|| SeoError::VideoNotFound(video_id.to_string()))?;

        let (Some(snippet), Some(stats), Some(details)) =
            (video.snippet, video.statistics, video.content_details)
        else {
            return Err(SeoError::YoutubeApi {
                status: 200,
                reason: None,
                message: format!(
                    "response for {} is missing snippet, statistics or contentDetails",
                    video_id
                ),
            });
        };

        let view_count = stats.view_count.unwrap_or(0);
        let like_count = stats.like_count.unwrap_or(0);
        let comment_count = stats.comment_count.unwrap_or(0);
        let comments = self.fetch_comments(api, video_id).await;

        Ok(VideoData {
            id: video_id.to_string(),
            title: snippet.title,
            description: snippet.description,
            channel_title: snippet.channel_title,
            published_at: snippet.published_at,
            view_count,
            like_count,
            comment_count,
            duration_seconds: details.duration.as_deref().and_then(parse_duration),
            duration: details.duration,
            tags: snippet.tags,
            comments,
            engagement_metrics: EngagementMetrics::from_counts(view_count, like_count, comment_count),
            source: DataSource::Api,
        })
    }

    /// Page through top-level comments up to the configured limit.
    ///
    /// Failures (disabled comments, quota) are logged and yield what was collected so far.
    async fn fetch_comments(&self, api: &dyn YoutubeApi, video_id: &str) -> Vec<Comment> {
        let mut comments = Vec::new();
        if self.max_comments == 0 {
            return comments;
        }

        let page_size = self.max_comments.min(100) as u32;
        let mut page_token: Option<String> = None;

        loop {
            let page = match api
                .comment_threads(video_id, page_size, page_token.as_deref())
                .await
            {
                Ok(page) => page,
                Err(e) => {
                    warn!("Comment extraction for {} failed: {}", video_id, e);
                    break;
                }
            };

            for thread in &page.items {
                let Some(snippet) = thread.top_level() else {
                    continue;
                };
                comments.push(Comment {
                    author: snippet.author_display_name.clone(),
                    text: snippet.text_display.clone(),
                    like_count: snippet.like_count,
                    published_at: snippet.published_at.clone(),
                });
                if comments.len() >= self.max_comments {
                    return comments;
                }
            }

            match page.next_page_token {
                Some(token) if !page.items.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        comments
    }

    async fn fetch_from_page(&self, video_id: &str) -> Result<VideoData> {
        let page = self.scraper.fetch(video_id).await?;

        Ok(VideoData {
            id: video_id.to_string(),
            title: page.title,
            description: page.description,
            channel_title: page.channel_title,
            published_at: page.published_at,
            view_count: page.view_count,
            like_count: 0,
            comment_count: page.comment_count,
            duration: None,
            duration_seconds: None,
            tags: page.tags,
            comments: Vec::new(),
            engagement_metrics: EngagementMetrics::from_counts(page.view_count, 0, page.comment_count),
            source: DataSource::Scrape,
        })
    }
}
