//! YouTube Data API v3 payloads.
//!
//! Only the fields the extractor, researcher and generator read are modelled.
//! Everything is optional or defaulted because the API omits parts that were
//! not requested.

use serde::{Deserialize, Deserializer};

/// A paged list response (`videos`, `search`, `commentThreads`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// A `videos` resource.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiVideo {
    #[serde(default)]
    pub id: String,
    pub snippet: Option<VideoSnippet>,
    pub statistics: Option<VideoStatistics>,
    pub content_details: Option<ContentDetails>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoSnippet {
    pub title: String,
    pub description: String,
    pub channel_id: String,
    pub channel_title: String,
    pub published_at: String,
    pub tags: Vec<String>,
}

/// Counts arrive as decimal strings; likes may be hidden and absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoStatistics {
    #[serde(deserialize_with = "lenient_count")]
    pub view_count: Option<u64>,
    #[serde(deserialize_with = "lenient_count")]
    pub like_count: Option<u64>,
    #[serde(deserialize_with = "lenient_count")]
    pub comment_count: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentDetails {
    pub duration: Option<String>,
}

/// A `commentThreads` resource.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThread {
    pub snippet: Option<CommentThreadSnippet>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadSnippet {
    pub top_level_comment: Option<TopLevelComment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopLevelComment {
    pub snippet: Option<CommentSnippet>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CommentSnippet {
    pub author_display_name: String,
    pub text_display: String,
    pub like_count: u64,
    pub published_at: String,
}

impl CommentThread {
    /// The top-level comment snippet, if the thread carries one.
    pub fn top_level(&self) -> Option<&CommentSnippet> {
        self.snippet
            .as_ref()?
            .top_level_comment
            .as_ref()?
            .snippet
            .as_ref()
    }
}

/// A `search` result.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchItem {
    pub id: SearchId,
    pub snippet: Option<SearchSnippet>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchId {
    pub video_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchSnippet {
    pub title: String,
    pub description: String,
    pub channel_id: String,
    pub channel_title: String,
}

/// Error envelope returned with non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub errors: Vec<ApiErrorItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorItem {
    pub reason: Option<String>,
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => s.parse().ok(),
        Some(serde_json::Value::Number(n)) => n.as_u64(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_payload() {
        let payload = serde_json::json!({
            "items": [{
                "id": "dQw4w9WgXcQ",
                "snippet": {
                    "title": "Rust in 100 Seconds",
                    "description": "Learn Rust",
                    "channelId": "UC123",
                    "channelTitle": "Fireship",
                    "publishedAt": "2021-09-20T15:00:00Z",
                    "tags": ["rust", "programming"]
                },
                "statistics": { "viewCount": "1500", "commentCount": 12 },
                "contentDetails": { "duration": "PT2M25S" }
            }]
        });

        let response: ListResponse<ApiVideo> = serde_json::from_value(payload).unwrap();
        let video = &response.items[0];
        let stats = video.statistics.as_ref().unwrap();
        assert_eq!(stats.view_count, Some(1500));
        assert_eq!(stats.like_count, None);
        assert_eq!(stats.comment_count, Some(12));
        assert_eq!(video.snippet.as_ref().unwrap().tags.len(), 2);
        assert!(response.next_page_token.is_none());
    }

    #[test]
    fn test_comment_thread_without_snippet() {
        let thread: CommentThread = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(thread.top_level().is_none());
    }
}
