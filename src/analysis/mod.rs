//! Content analysis: sentiment, keyword usage and topic clusters.
//!
//! Everything here is pure computation over the video's title, description
//! and comments; no network access.

mod cluster;
pub mod sentiment;
pub mod text;
mod tfidf;

pub use sentiment::{polarity_scores, SentimentScores};
pub use text::{ContentStructure, KeywordPosition};
pub use tfidf::{cosine_similarity, TfidfMatrix, TfidfVectorizer};

use crate::config::AnalysisSettings;
use crate::extractor::VideoData;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Full content analysis of a video for a target keyword.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentAnalysis {
    pub sentiment_analysis: SentimentAnalysis,
    pub trend_analysis: TrendAnalysis,
    pub content_clusters: ContentClusters,
    pub keyword_analysis: KeywordUsage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentAnalysis {
    /// Scores of the title and description together.
    pub content_sentiment: SentimentScores,
    /// Mean scores over all comments.
    pub comment_sentiment: SentimentScores,
    pub sentiment_distribution: SentimentDistribution,
}

/// Comment counts per polarity bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendAnalysis {
    pub key_phrases: Vec<String>,
    pub keyword_density: f64,
    pub content_structure: ContentStructure,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentClusters {
    /// Cluster label per analysed text (title, description, then comments; blanks skipped).
    pub clusters: Vec<usize>,
    pub cluster_keywords: Vec<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordUsage {
    pub keyword_metrics: KeywordMetrics,
    /// `(term, similarity)` pairs, most similar first.
    pub related_keywords: Vec<(String, f64)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordMetrics {
    pub frequency: usize,
    pub density: f64,
    pub position: KeywordPosition,
}

/// Runs every analysis over a video's text.
#[derive(Debug, Clone)]
pub struct ContentAnalyzer {
    settings: AnalysisSettings,
}

impl ContentAnalyzer {
    pub fn new(settings: AnalysisSettings) -> Self {
        Self { settings }
    }

    /// Analyze a video for a keyword. Without a video, all text is empty.
    #[instrument(skip(self, video), fields(video = video.map(|v| v.id.as_str())))]
    pub fn analyze_content(&self, video: Option<&VideoData>, keyword: &str) -> ContentAnalysis {
        let title = video.map(|v| v.title.as_str()).unwrap_or_default();
        let description = video.map(|v| v.description.as_str()).unwrap_or_default();
        let comments: Vec<&str> = video
            .map(|v| v.comments.iter().map(|c| c.text.as_str()).collect())
            .unwrap_or_default();

        ContentAnalysis {
            sentiment_analysis: self.analyze_sentiment(title, description, &comments),
            trend_analysis: self.analyze_trends(title, description, keyword),
            content_clusters: self.cluster_content(title, description, &comments),
            keyword_analysis: self.analyze_keywords(title, description, keyword),
        }
    }

    fn analyze_sentiment(&self, title: &str, description: &str, comments: &[&str]) -> SentimentAnalysis {
        let content_sentiment = polarity_scores(&format!("{} {}", title, description));
        let scores: Vec<SentimentScores> = comments.iter().map(|c| polarity_scores(c)).collect();

        let threshold = self.settings.sentiment_threshold;
        let mut distribution = SentimentDistribution::default();
        for s in &scores {
            if s.compound > threshold {
                distribution.positive += 1;
            } else if s.compound < -threshold {
                distribution.negative += 1;
            } else {
                distribution.neutral += 1;
            }
        }

        SentimentAnalysis {
            content_sentiment,
            comment_sentiment: SentimentScores::mean(&scores),
            sentiment_distribution: distribution,
        }
    }

    fn analyze_trends(&self, title: &str, description: &str, keyword: &str) -> TrendAnalysis {
        let text = format!("{} {}", title, description);
        TrendAnalysis {
            key_phrases: text::key_phrases(&text),
            keyword_density: text::keyword_density(&text, keyword),
            content_structure: ContentStructure::of(title, description),
        }
    }

    fn cluster_content(&self, title: &str, description: &str, comments: &[&str]) -> ContentClusters {
        let texts: Vec<&str> = [title, description]
            .into_iter()
            .chain(comments.iter().copied())
            .filter(|t| !t.trim().is_empty())
            .collect();

        if texts.is_empty() {
            return ContentClusters::default();
        }

        let matrix = match TfidfVectorizer::new(self.settings.max_features).fit_transform(&texts) {
            Ok(matrix) => matrix,
            Err(e) => {
                warn!("Clustering skipped: {}", e);
                return ContentClusters {
                    error: Some(e.to_string()),
                    ..Default::default()
                };
            }
        };

        let k = self.settings.max_clusters.min(texts.len());
        let clusters = cluster::kmeans(&matrix.rows, k);
        let cluster_keywords = cluster::cluster_keywords(
            &matrix.rows,
            &clusters,
            &matrix.vocabulary,
            self.settings.cluster_keywords,
        );
        debug!("Clustered {} texts into {} groups", texts.len(), cluster_keywords.len());

        ContentClusters {
            clusters,
            cluster_keywords,
            error: None,
        }
    }

    fn analyze_keywords(&self, title: &str, description: &str, keyword: &str) -> KeywordUsage {
        let text = format!("{} {}", title, description);
        let target = keyword.trim().to_lowercase();
        let frequency = text::words(&text).iter().filter(|w| **w == target).count();

        KeywordUsage {
            keyword_metrics: KeywordMetrics {
                frequency,
                density: text::keyword_density(&text, keyword),
                position: KeywordPosition::of(title, description, keyword),
            },
            related_keywords: self.related_keywords(&text, &target),
        }
    }

    /// Terms whose occurrence across sentences best tracks the target keyword.
    fn related_keywords(&self, text: &str, target: &str) -> Vec<(String, f64)> {
        let sentences = text::sentences(text);
        if sentences.is_empty() || target.is_empty() {
            return Vec::new();
        }

        let Ok(matrix) = TfidfVectorizer::new(self.settings.max_features).fit_transform(&sentences)
        else {
            return Vec::new();
        };
        let Some(target_idx) = matrix.index_of(target) else {
            return Vec::new();
        };

        let target_column = matrix.column(target_idx);
        let mut related: Vec<(String, f64)> = (0..matrix.vocabulary.len())
            .filter(|&i| i != target_idx)
            .map(|i| {
                (
                    matrix.vocabulary[i].clone(),
                    cosine_similarity(&target_column, &matrix.column(i)),
                )
            })
            .filter(|(_, score)| *score > 0.0)
            .collect();

        related.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        related.truncate(self.settings.related_keywords);
        related
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::{Comment, DataSource, EngagementMetrics};

    fn video(comments: &[&str]) -> VideoData {
        VideoData {
            id: "dQw4w9WgXcQ".to_string(),
            title: "Rust Tutorial for Beginners".to_string(),
            description: "Learn Rust step by step. Rust ownership explained clearly. \
                          Cargo basics and crates."
                .to_string(),
            channel_title: "Rusty".to_string(),
            published_at: String::new(),
            view_count: 100,
            like_count: 10,
            comment_count: comments.len() as u64,
            duration: None,
            duration_seconds: None,
            tags: vec![],
            comments: comments
                .iter()
                .map(|t| Comment {
                    author: "viewer".to_string(),
                    text: t.to_string(),
                    like_count: 0,
                    published_at: String::new(),
                })
                .collect(),
            engagement_metrics: EngagementMetrics::default(),
            source: DataSource::Api,
        }
    }

    fn analyzer() -> ContentAnalyzer {
        ContentAnalyzer::new(AnalysisSettings::default())
    }

    #[test]
    fn test_sentiment_distribution() {
        let v = video(&["This is great, thanks!", "Terrible audio", "first"]);
        let result = analyzer().analyze_content(Some(&v), "rust");

        let dist = result.sentiment_analysis.sentiment_distribution;
        assert_eq!(dist, SentimentDistribution { positive: 1, neutral: 1, negative: 1 });
        assert!(result.sentiment_analysis.content_sentiment.compound >= 0.0);
    }

    #[test]
    fn test_everyday_comments_are_classified() {
        let v = video(&[
            "This video is garbage and the audio sucks",
            "Hilarious and insightful, subscribed!",
        ]);
        let result = analyzer().analyze_content(Some(&v), "rust");

        let dist = result.sentiment_analysis.sentiment_distribution;
        assert_eq!(dist, SentimentDistribution { positive: 1, neutral: 0, negative: 1 });
    }

    #[test]
    fn test_no_comments_means_zero_comment_sentiment() {
        let result = analyzer().analyze_content(Some(&video(&[])), "rust");
        assert_eq!(result.sentiment_analysis.comment_sentiment, SentimentScores::default());
        assert_eq!(
            result.sentiment_analysis.sentiment_distribution,
            SentimentDistribution::default()
        );
    }

    #[test]
    fn test_keyword_metrics() {
        let result = analyzer().analyze_content(Some(&video(&[])), "Rust");
        let metrics = &result.keyword_analysis.keyword_metrics;
        assert_eq!(metrics.frequency, 3);
        assert!(metrics.density > 0.0);
        assert_eq!(metrics.position.title_position, Some(0));
        assert_eq!(metrics.position.description_position, Some(6));
    }

    #[test]
    fn test_related_keywords_follow_target() {
        let result = analyzer().analyze_content(Some(&video(&[])), "rust");
        let related = &result.keyword_analysis.related_keywords;
        assert!(!related.is_empty());
        assert!(related.len() <= 5);
        assert!(related.iter().all(|(term, _)| term != "rust"));
        // "cargo" never shares a sentence with "rust".
        assert!(related.iter().all(|(term, _)| term != "cargo"));
        assert!(related.windows(2).all(|w| w[0].1 >= w[1].1));
    }

    #[test]
    fn test_unknown_keyword_has_no_related_terms() {
        let result = analyzer().analyze_content(Some(&video(&[])), "python");
        assert!(result.keyword_analysis.related_keywords.is_empty());
        assert_eq!(result.keyword_analysis.keyword_metrics.frequency, 0);
    }

    #[test]
    fn test_clusters_cover_every_text() {
        let v = video(&["Great rust tutorial", "Cargo explained well", "   "]);
        let result = analyzer().analyze_content(Some(&v), "rust");
        let clusters = &result.content_clusters;
        assert_eq!(clusters.clusters.len(), 4);
        assert!(clusters.clusters.iter().all(|&c| c < 4));
        assert!(clusters.error.is_none());
        assert!(clusters.cluster_keywords.iter().all(|k| k.len() <= 5));
    }

    #[test]
    fn test_without_video() {
        let result = analyzer().analyze_content(None, "rust");
        assert!(result.content_clusters.clusters.is_empty());
        assert!(result.content_clusters.cluster_keywords.is_empty());
        assert!(result.trend_analysis.key_phrases.is_empty());
        assert_eq!(result.trend_analysis.keyword_density, 0.0);
    }

    #[test]
    fn test_stopword_only_texts_report_error() {
        let mut v = video(&[]);
        v.title = "The".to_string();
        v.description = "and of".to_string();
        let result = analyzer().analyze_content(Some(&v), "rust");
        assert!(result.content_clusters.error.is_some());
        assert!(result.content_clusters.clusters.is_empty());
    }
}
