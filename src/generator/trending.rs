//! Trending titles, tags and hashtags from top search results.

use crate::error::Result;
use crate::youtube::YoutubeApi;
use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

use super::templates::{compact, dedup_take};

static HASHTAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#\w+").expect("Invalid regex"));

/// Signals mined from the most viewed videos for a keyword. Empty when unavailable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trending {
    pub titles: Vec<String>,
    pub tags: Vec<String>,
    pub hashtags: Vec<String>,
}

impl Trending {
    /// Fetch trending data; each part degrades to empty on failure.
    pub async fn fetch(api: &dyn YoutubeApi, keyword: &str, results: u32) -> Self {
        let (videos, hashtags) = futures::join!(
            top_videos(api, keyword, results),
            hashtags(api, keyword, results)
        );

        let (titles, tags) = videos.unwrap_or_else(|e| {
            warn!("Trending videos for '{}' unavailable: {}", keyword, e);
            (Vec::new(), Vec::new())
        });
        let hashtags = hashtags.unwrap_or_else(|e| {
            warn!("Trending hashtags for '{}' unavailable: {}", keyword, e);
            Vec::new()
        });

        Self {
            titles,
            tags,
            hashtags,
        }
    }
}

/// Titles of the top results and the de-duplicated tags of those videos.
async fn top_videos(api: &dyn YoutubeApi, keyword: &str, results: u32) -> Result<(Vec<String>, Vec<String>)> {
    let items = api.search(keyword, results).await?;
    let titles: Vec<String> = items
        .iter()
        .filter_map(|item| item.snippet.as_ref().map(|s| s.title.clone()))
        .filter(|t| !t.is_empty())
        .collect();
    let ids: Vec<String> = items.iter().filter_map(|i| i.id.video_id.clone()).collect();
    if ids.is_empty() {
        return Ok((titles, Vec::new()));
    }

    let tags = match api.videos(&ids, &["snippet"]).await {
        Ok(videos) => dedup_take(
            videos
                .into_iter()
                .filter_map(|v| v.snippet)
                .flat_map(|s| s.tags),
            usize::MAX,
        ),
        Err(e) => {
            warn!("Trending tags for '{}' unavailable: {}", keyword, e);
            Vec::new()
        }
    };

    Ok((titles, tags))
}

/// Hashtags used in the descriptions of the top `#keyword` results.
async fn hashtags(api: &dyn YoutubeApi, keyword: &str, results: u32) -> Result<Vec<String>> {
    let items = api.search(&format!("#{}", compact(keyword)), results).await?;
    let found = items
        .iter()
        .filter_map(|item| item.snippet.as_ref())
        .flat_map(|s| HASHTAG.find_iter(&s.description).map(|m| m.as_str().to_string()));
    Ok(dedup_take(found, usize::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::youtube::fake::FakeYoutube;
    use serde_json::json;

    #[tokio::test]
    async fn test_fetch_trending() {
        let api = FakeYoutube::new()
            .with_search(
                "rust async",
                json!([
                    { "id": { "videoId": "aaaaaaaaaaa" }, "snippet": { "title": "Async Rust in 100 Seconds" } },
                    { "id": { "videoId": "bbbbbbbbbbb" }, "snippet": { "title": "Tokio Deep Dive" } }
                ]),
            )
            .with_search(
                "#rustasync",
                json!([
                    { "id": { "videoId": "ccccccccccc" }, "snippet": { "description": "Learn #rust and #tokio #rust" } }
                ]),
            )
            .with_video(json!({ "id": "aaaaaaaaaaa", "snippet": { "tags": ["rust", "async"] } }))
            .with_video(json!({ "id": "bbbbbbbbbbb", "snippet": { "tags": ["tokio", "rust"] } }));

        let trending = Trending::fetch(&api, "rust async", 5).await;

        assert_eq!(trending.titles, vec!["Async Rust in 100 Seconds", "Tokio Deep Dive"]);
        assert_eq!(trending.tags, vec!["rust", "async", "tokio"]);
        assert_eq!(trending.hashtags, vec!["#rust", "#tokio"]);
    }

    #[tokio::test]
    async fn test_failures_yield_empty() {
        let api = FakeYoutube::new().failing(403, "quotaExceeded");
        assert_eq!(Trending::fetch(&api, "rust", 5).await, Trending::default());
    }
}
