//! SEO content generation.
//!
//! Titles and descriptions come from a language model when one is configured
//! and requested, otherwise from templates. Tags and hashtags combine keyword
//! variants with what is trending for the keyword on YouTube.

mod llm;
mod score;
mod templates;
mod trending;

pub use llm::{parse_titles, OpenAiGenerator, TextGenerator};
pub use score::{optimization_tips, SeoScore};
pub use trending::Trending;

use crate::config::{OpenAiSettings, Prompts};
use crate::error::{Result, SeoError};
use crate::extractor::VideoData;
use crate::youtube::YoutubeApi;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

const TITLE_COUNT: usize = 5;

/// Generated SEO content with its score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeoSuggestions {
    pub titles: Vec<String>,
    pub description: String,
    pub tags: Vec<String>,
    pub hashtags: Vec<String>,
    pub seo_score: SeoScore,
    pub optimization_tips: Vec<String>,
}

/// Generates titles, descriptions, tags and hashtags for a keyword.
pub struct SeoGenerator {
    api: Option<Arc<dyn YoutubeApi>>,
    llm: Option<Arc<dyn TextGenerator>>,
    prompts: Prompts,
    title_max_tokens: u32,
    description_max_tokens: u32,
    trending_results: u32,
}

impl SeoGenerator {
    pub fn new(
        api: Option<Arc<dyn YoutubeApi>>,
        llm: Option<Arc<dyn TextGenerator>>,
        trending_results: u32,
    ) -> Self {
        let defaults = OpenAiSettings::default();
        Self {
            api,
            llm,
            prompts: Prompts::default(),
            title_max_tokens: defaults.title_max_tokens,
            description_max_tokens: defaults.description_max_tokens,
            trending_results,
        }
    }

    /// Set custom prompts (with user-defined variables).
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Set completion token limits for titles and descriptions.
    pub fn with_token_limits(mut self, titles: u32, description: u32) -> Self {
        self.title_max_tokens = titles;
        self.description_max_tokens = description;
        self
    }

    /// Generate SEO content for a keyword, optionally informed by an existing video.
    #[instrument(skip(self, video))]
    pub async fn generate_seo_content(
        &self,
        keyword: &str,
        video: Option<&VideoData>,
        use_gpt: bool,
    ) -> Result<SeoSuggestions> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(SeoError::InvalidInput(
                "A keyword is required to generate SEO content".to_string(),
            ));
        }

        let llm = if use_gpt {
            if self.llm.is_none() {
                warn!("Language model requested but no OpenAI API key is configured; using templates");
            }
            self.llm.as_deref()
        } else {
            None
        };
        info!("Generating SEO content (llm: {})", llm.is_some());

        let trending = match &self.api {
            Some(api) => Trending::fetch(api.as_ref(), keyword, self.trending_results).await,
            None => Trending::default(),
        };

        let context = video_context(video);
        let (titles, description) = futures::join!(
            self.titles(llm, keyword, &context, &trending),
            self.description(llm, keyword, &context)
        );

        let video_tags = video.map(|v| v.tags.as_slice()).unwrap_or_default();
        let tags = templates::tags(keyword, &trending.tags, video_tags);
        let hashtags = templates::hashtags(keyword, &trending.hashtags);

        let first_title = titles.first().map(String::as_str).unwrap_or_default();
        let seo_score = SeoScore::calculate(first_title, &description, &tags, &hashtags);
        let optimization_tips = optimization_tips(first_title, &description, &tags, &hashtags);
        debug!("SEO score {}/{}", seo_score.total_score, seo_score.max_score);

        Ok(SeoSuggestions {
            titles,
            description,
            tags,
            hashtags,
            seo_score,
            optimization_tips,
        })
    }

    async fn titles(
        &self,
        llm: Option<&dyn TextGenerator>,
        keyword: &str,
        context: &str,
        trending: &Trending,
    ) -> Vec<String> {
        if let Some(llm) = llm {
            let user = self.render(&self.prompts.titles.user, keyword, context);
            match llm
                .complete(&self.prompts.titles.system, &user, self.title_max_tokens)
                .await
            {
                Ok(reply) => {
                    let titles = parse_titles(&reply, TITLE_COUNT);
                    if !titles.is_empty() {
                        return titles;
                    }
                    warn!("Language model returned no titles; using templates");
                }
                Err(e) => warn!("Title generation failed, using templates: {}", e),
            }
        }

        templates::titles(keyword, trending.titles.first().map(String::as_str))
    }

    async fn description(&self, llm: Option<&dyn TextGenerator>, keyword: &str, context: &str) -> String {
        if let Some(llm) = llm {
            let user = self.render(&self.prompts.description.user, keyword, context);
            match llm
                .complete(&self.prompts.description.system, &user, self.description_max_tokens)
                .await
            {
                Ok(reply) if !reply.trim().is_empty() => return reply.trim().to_string(),
                Ok(_) => warn!("Language model returned an empty description; using template"),
                Err(e) => warn!("Description generation failed, using template: {}", e),
            }
        }

        templates::description(keyword)
    }

    fn render(&self, template: &str, keyword: &str, context: &str) -> String {
        let mut vars = HashMap::new();
        vars.insert("keyword".to_string(), keyword.to_string());
        vars.insert("video_context".to_string(), context.to_string());
        self.prompts.render_with_custom(template, &vars)
    }
}

/// Short description of the source video for prompts.
fn video_context(video: Option<&VideoData>) -> String {
    let Some(video) = video else {
        return String::new();
    };

    let mut context = format!("Existing video title: {}", video.title);
    if !video.channel_title.is_empty() {
        context.push_str(&format!("\nChannel: {}", video.channel_title));
    }
    if !video.tags.is_empty() {
        context.push_str(&format!("\nCurrent tags: {}", video.tags.join(", ")));
    }
    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::youtube::fake::FakeYoutube;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// Replies with canned text and records prompts.
    struct ScriptedLlm {
        reply: Option<String>,
        prompts: Mutex<Vec<(String, u32)>>,
    }

    impl ScriptedLlm {
        fn replying(reply: &str) -> Self {
            Self {
                reply: Some(reply.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                reply: None,
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedLlm {
        async fn complete(&self, _system: &str, user: &str, max_tokens: u32) -> Result<String> {
            self.prompts.lock().unwrap().push((user.to_string(), max_tokens));
            self.reply
                .clone()
                .ok_or_else(|| SeoError::Llm("boom".to_string()))
        }
    }

    #[tokio::test]
    async fn test_template_generation_contains_keyword() {
        let generator = SeoGenerator::new(None, None, 5);
        let seo = generator
            .generate_seo_content("rust async", None, false)
            .await
            .unwrap();

        assert_eq!(seo.titles.len(), 4);
        assert!(seo.titles.iter().all(|t| t.contains("rust async")));
        assert!(seo.description.contains("rust async"));
        assert_eq!(seo.tags[0], "rust async");
        assert_eq!(seo.tags.len(), 8);
        assert_eq!(seo.hashtags.len(), 5);
        // First title is 34 chars: 15 + description 30 + tags 16 + hashtags 10.
        assert_eq!(seo.seo_score.total_score, 71);
        assert_eq!(seo.optimization_tips, vec!["Add more tags (aim for 10-15 tags)"]);
    }

    #[tokio::test]
    async fn test_trending_and_video_tags_are_merged() {
        let api = FakeYoutube::new()
            .with_search(
                "rust",
                json!([{ "id": { "videoId": "aaaaaaaaaaa" }, "snippet": { "title": "Rust in 100 Seconds" } }]),
            )
            .with_video(json!({ "id": "aaaaaaaaaaa", "snippet": { "tags": ["systems programming"] } }));
        let video: VideoData = serde_json::from_value(json!({
            "id": "bbbbbbbbbbb", "title": "My Rust video", "description": "", "channel_title": "",
            "published_at": "", "view_count": 0, "like_count": 0, "comment_count": 0,
            "duration": null, "duration_seconds": null, "tags": ["ferris"], "comments": [],
            "engagement_metrics": { "engagement_rate": 0.0, "like_ratio": 0.0, "comment_ratio": 0.0 },
            "source": "api"
        }))
        .unwrap();

        let generator = SeoGenerator::new(Some(Arc::new(api)), None, 5);
        let seo = generator
            .generate_seo_content("rust", Some(&video), false)
            .await
            .unwrap();

        assert_eq!(seo.titles.len(), 5);
        assert_eq!(seo.titles[3], "Rust in 100 Seconds");
        assert!(seo.tags.contains(&"systems programming".to_string()));
        assert_eq!(seo.tags.last().map(String::as_str), Some("ferris"));
    }

    #[tokio::test]
    async fn test_llm_generation() {
        let llm = Arc::new(ScriptedLlm::replying("1. Rust Async Explained\n2. \"Tokio Tips\""));
        let generator = SeoGenerator::new(None, Some(llm.clone()), 5).with_token_limits(100, 400);
        let seo = generator
            .generate_seo_content("rust async", None, true)
            .await
            .unwrap();

        assert_eq!(seo.titles, vec!["Rust Async Explained", "Tokio Tips"]);
        assert_eq!(seo.description, "1. Rust Async Explained\n2. \"Tokio Tips\"");

        let prompts = llm.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 2);
        assert!(prompts.iter().all(|(p, _)| p.contains("rust async")));
        let mut limits: Vec<u32> = prompts.iter().map(|(_, t)| *t).collect();
        limits.sort();
        assert_eq!(limits, vec![100, 400]);
    }

    #[tokio::test]
    async fn test_llm_failure_falls_back_to_templates() {
        let generator = SeoGenerator::new(None, Some(Arc::new(ScriptedLlm::failing())), 5);
        let seo = generator
            .generate_seo_content("rust", None, true)
            .await
            .unwrap();
        assert_eq!(seo.titles[0], "How to rust - Complete Guide");
        assert!(seo.description.starts_with("In this video"));
    }

    #[tokio::test]
    async fn test_llm_not_used_unless_requested() {
        let llm = Arc::new(ScriptedLlm::replying("Title"));
        let generator = SeoGenerator::new(None, Some(llm.clone()), 5);
        generator.generate_seo_content("rust", None, false).await.unwrap();
        assert!(llm.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_keyword_is_rejected() {
        let generator = SeoGenerator::new(None, None, 5);
        let err = generator.generate_seo_content("  ", None, false).await.unwrap_err();
        assert!(matches!(err, SeoError::InvalidInput(_)));
    }
}
