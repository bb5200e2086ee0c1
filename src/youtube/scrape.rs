//! Watch-page scraping, used when no Data API key is configured.

use crate::error::{Result, SeoError};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, instrument};

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<(?:meta|link)\s[^>]*>").expect("Invalid regex"));
static ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)([a-zA-Z_:.-]+)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("Invalid regex")
});

/// Metadata readable from a public watch page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrapedPage {
    pub title: String,
    pub description: String,
    pub channel_title: String,
    pub published_at: String,
    pub view_count: u64,
    pub comment_count: u64,
    pub tags: Vec<String>,
}

impl ScrapedPage {
    /// Parse the `<meta>`/`<link>` tags of a watch page.
    ///
    /// Likes are not exposed in the page source.
    pub fn parse(html: &str) -> Self {
        let mut first: HashMap<String, String> = HashMap::new();
        let mut tags = Vec::new();

        for tag in TAG.find_iter(html) {
            let attrs = attributes(tag.as_str());
            let Some(content) = attrs.get("content") else {
                continue;
            };
            let key = attrs
                .get("property")
                .or_else(|| attrs.get("itemprop"))
                .or_else(|| attrs.get("name"));
            let Some(key) = key else {
                continue;
            };
            let key = if tag.as_str()[1..].to_ascii_lowercase().starts_with("link") {
                format!("link:{}", key)
            } else {
                key.clone()
            };

            if key == "og:video:tag" {
                tags.push(decode_entities(content));
            } else {
                first
                    .entry(key)
                    .or_insert_with(|| decode_entities(content));
            }
        }

        let get = |key: &str| first.get(key).cloned().unwrap_or_default();
        let count = |key: &str| {
            first
                .get(key)
                .and_then(|v| v.replace([',', '.', ' '], "").parse().ok())
                .unwrap_or(0)
        };

        Self {
            title: get("og:title"),
            description: get("og:description"),
            channel_title: get("link:name"),
            published_at: get("datePublished"),
            view_count: count("interactionCount"),
            comment_count: count("commentCount"),
            tags,
        }
    }
}

fn attributes(tag: &str) -> HashMap<String, String> {
    ATTR.captures_iter(tag)
        .map(|caps| {
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .map(|m| m.as_str())
                .unwrap_or_default();
            (caps[1].to_lowercase(), value.to_string())
        })
        .collect()
}

fn decode_entities(value: &str) -> String {
    value
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Fetches and parses watch pages.
pub struct PageScraper {
    http: reqwest::Client,
    watch_url: String,
}

impl PageScraper {
    pub fn new(watch_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (compatible; tubeseo)")
            .build()
            .map_err(|e| SeoError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            watch_url: watch_url.to_string(),
        })
    }

    /// Fetch the watch page for a video and parse it.
    #[instrument(skip(self))]
    pub async fn fetch(&self, video_id: &str) -> Result<ScrapedPage> {
        debug!("Scraping watch page for {}", video_id);
        let response = self
            .http
            .get(&self.watch_url)
            .query(&[("v", video_id)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SeoError::Scrape(format!(
                "watch page for {} returned HTTP {}",
                video_id, status
            )));
        }

        let html = response.text().await?;
        Ok(ScrapedPage::parse(&html))
    }
}
