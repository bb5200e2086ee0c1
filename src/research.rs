//! Keyword research: YouTube competition, web result volume and suggestions.

use crate::config::{ResearchSettings, YoutubeSettings};
use crate::error::{Result, SeoError};
use crate::youtube::YoutubeApi;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

static RESULT_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<div[^>]*\bclass="(?:[^"]*\s)?g(?:\s[^"]*)?""#).expect("Invalid regex"));
static RELATED_SEARCH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<div[^>]*\bclass="[^"]*\bBNeawe\b[^"]*"[^>]*>(.*?)</div>"#).expect("Invalid regex")
});
static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("Invalid regex"));

const MAX_RELATED_SEARCHES: usize = 5;
const MAX_TOP_CHANNELS: usize = 5;

/// Complete research result for one keyword.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordAnalysis {
    pub keyword: String,
    pub youtube_metrics: YoutubeMetrics,
    pub web_metrics: WebMetrics,
    pub competition_metrics: CompetitionMetrics,
    pub suggestions: Vec<KeywordSuggestion>,
}

/// Aggregates over the most viewed videos for the keyword.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YoutubeMetrics {
    pub total_videos: u64,
    pub avg_views: u64,
    pub avg_likes: u64,
    pub avg_comments: u64,
    /// `(channel_id, video_count)`, most frequent first.
    pub top_channels: Vec<(String, usize)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebMetrics {
    pub total_results: u64,
    pub related_searches: Vec<String>,
    pub search_volume: String,
}

impl WebMetrics {
    fn empty(search_volume: &str) -> Self {
        Self {
            total_results: 0,
            related_searches: Vec::new(),
            search_volume: search_volume.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitionMetrics {
    pub youtube_competition: String,
    pub web_competition: String,
    pub overall_competition: String,
    pub youtube_score: f64,
    pub web_score: f64,
    pub overall_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    RelatedSearch,
    LongTail,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordSuggestion {
    pub keyword: String,
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    pub competition: String,
}

/// Qualitative level for a 0-100 competition score.
pub fn competition_level(score: f64) -> &'static str {
    if score >= 80.0 {
        "Very High"
    } else if score >= 60.0 {
        "High"
    } else if score >= 40.0 {
        "Medium"
    } else if score >= 20.0 {
        "Low"
    } else {
        "Very Low"
    }
}

/// Search volume estimate from a result count.
pub fn estimate_search_volume(result_count: u64) -> &'static str {
    match result_count {
        n if n > 1_000_000 => "Very High",
        n if n > 100_000 => "High",
        n if n > 10_000 => "Medium",
        n if n > 1_000 => "Low",
        _ => "Very Low",
    }
}

/// Combine YouTube and web metrics into competition scores.
pub fn competition_metrics(youtube: &YoutubeMetrics, web: &WebMetrics) -> CompetitionMetrics {
    let youtube_score = if youtube.total_videos > 0 {
        (youtube.avg_views as f64 * youtube.total_videos as f64 / 1_000_000.0).min(100.0)
    } else {
        0.0
    };
    let web_score = (web.total_results as f64 / 100.0).min(100.0);
    let overall_score = (youtube_score + web_score) / 2.0;

    CompetitionMetrics {
        youtube_competition: competition_level(youtube_score).to_string(),
        web_competition: competition_level(web_score).to_string(),
        overall_competition: competition_level(overall_score).to_string(),
        youtube_score,
        web_score,
        overall_score,
    }
}

/// Related searches followed by the long-tail variants of the keyword.
pub fn keyword_suggestions(keyword: &str, web: &WebMetrics) -> Vec<KeywordSuggestion> {
    let long_tail = [
        format!("how to {keyword}"),
        format!("best {keyword}"),
        format!("{keyword} tutorial"),
        format!("{keyword} guide"),
        format!("learn {keyword}"),
        format!("{keyword} tips"),
        format!("{keyword} tricks"),
        format!("{keyword} for beginners"),
        format!("advanced {keyword}"),
        format!("{keyword} examples"),
    ];

    web.related_searches
        .iter()
        .map(|s| (s.clone(), SuggestionKind::RelatedSearch))
        .chain(long_tail.into_iter().map(|s| (s, SuggestionKind::LongTail)))
        .map(|(keyword, kind)| KeywordSuggestion {
            keyword,
            kind,
            competition: "Unknown".to_string(),
        })
        .collect()
}

/// Parse a web search results page.
fn parse_search_page(html: &str) -> WebMetrics {
    let total_results = RESULT_BLOCK.find_iter(html).count() as u64;
    let related_searches = RELATED_SEARCH
        .captures_iter(html)
        .map(|caps| HTML_TAG.replace_all(&caps[1], "").trim().to_string())
        .filter(|s| !s.is_empty())
        .take(MAX_RELATED_SEARCHES)
        .collect();

    WebMetrics {
        total_results,
        related_searches,
        search_volume: estimate_search_volume(total_results).to_string(),
    }
}

/// Researches keywords against YouTube and a web search page.
pub struct KeywordResearcher {
    api: Option<Arc<dyn YoutubeApi>>,
    http: reqwest::Client,
    research: ResearchSettings,
    search_results: u32,
}

impl KeywordResearcher {
    pub fn new(
        api: Option<Arc<dyn YoutubeApi>>,
        youtube: &YoutubeSettings,
        research: ResearchSettings,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(youtube.timeout_secs))
            .user_agent("Mozilla/5.0 (compatible; tubeseo)")
            .build()
            .map_err(|e| SeoError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api,
            http,
            research,
            search_results: youtube.research_results,
        })
    }

    /// Research a keyword. Upstream failures degrade to zeroed metrics.
    #[instrument(skip(self))]
    pub async fn analyze_keyword(&self, keyword: &str) -> Result<KeywordAnalysis> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(SeoError::InvalidInput(
                "A keyword is required for keyword research".to_string(),
            ));
        }
        info!("Researching keyword");
        let (youtube_metrics, web_metrics) =
            futures::join!(self.youtube_metrics(keyword), self.web_metrics(keyword));

        let competition_metrics = competition_metrics(&youtube_metrics, &web_metrics);
        let suggestions = keyword_suggestions(keyword, &web_metrics);

        Ok(KeywordAnalysis {
            keyword: keyword.to_string(),
            youtube_metrics,
            web_metrics,
            competition_metrics,
            suggestions,
        })
    }

    async fn youtube_metrics(&self, keyword: &str) -> YoutubeMetrics {
        let Some(api) = &self.api else {
            return YoutubeMetrics::default();
        };
        match self.fetch_youtube_metrics(api.as_ref(), keyword).await {
            Ok(metrics) => metrics,
            Err(e) => {
                warn!("YouTube metrics for '{}' unavailable: {}", keyword, e);
                YoutubeMetrics::default()
            }
        }
    }

    async fn fetch_youtube_metrics(&self, api: &dyn YoutubeApi, keyword: &str) -> Result<YoutubeMetrics> {
        let results = api.search(keyword, self.search_results).await?;
        if results.is_empty() {
            return Ok(YoutubeMetrics::default());
        }

        let channel_of: HashMap<&str, &str> = results
            .iter()
            .filter_map(|item| {
                let id = item.id.video_id.as_deref()?;
                let channel = item.snippet.as_ref().map(|s| s.channel_id.as_str())?;
                Some((id, channel))
            })
            .collect();
        let ids: Vec<String> = results
            .iter()
            .filter_map(|item| item.id.video_id.clone())
            .collect();

        let videos = api.videos(&ids, &["statistics"]).await?;

        let mut views = Vec::new();
        let mut likes = Vec::new();
        let mut comments = Vec::new();
        let mut channels: HashMap<&str, usize> = HashMap::new();
        for video in &videos {
            let Some(stats) = &video.statistics else {
                continue;
            };
            views.push(stats.view_count.unwrap_or(0));
            likes.push(stats.like_count.unwrap_or(0));
            comments.push(stats.comment_count.unwrap_or(0));

            if let Some(channel) = channel_of.get(video.id.as_str()).filter(|c| !c.is_empty()) {
                *channels.entry(*channel).or_default() += 1;
            }
        }

        let mut top_channels: Vec<(String, usize)> = channels
            .into_iter()
            .map(|(c, n)| (c.to_string(), n))
            .collect();
        top_channels.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        top_channels.truncate(MAX_TOP_CHANNELS);

        Ok(YoutubeMetrics {
            total_videos: results.len() as u64,
            avg_views: mean(&views),
            avg_likes: mean(&likes),
            avg_comments: mean(&comments),
            top_channels,
        })
    }

    async fn web_metrics(&self, keyword: &str) -> WebMetrics {
        if !self.research.web_search_enabled {
            return WebMetrics::empty("Very Low");
        }

        debug!("Querying web search for '{}'", keyword);
        let response = self
            .http
            .get(&self.research.web_search_url)
            .query(&[("q", keyword)])
            .send()
            .await;

        let response = match response {
            Ok(r) => r,
            Err(e) => {
                warn!("Web search request failed: {}", e);
                return WebMetrics::empty("Very Low");
            }
        };

        if response.status() != reqwest::StatusCode::OK {
            debug!("Web search returned HTTP {}", response.status());
            return WebMetrics::empty("Low");
        }

        match response.text().await {
            Ok(html) => parse_search_page(&html),
            Err(e) => {
                warn!("Web search body unreadable: {}", e);
                WebMetrics::empty("Very Low")
            }
        }
    }
}

/// Integer mean, 0 for an empty slice.
fn mean(values: &[u64]) -> u64 {
    if values.is_empty() {
        return 0;
    }
    values.iter().sum::<u64>() / values.len() as u64
}
