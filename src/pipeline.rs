//! Request pipeline for tubeseo.
//!
//! Validates a request, extracts the video (when a URL is given), then runs
//! keyword research, SEO generation and content analysis side by side and
//! assembles the report.

use crate::analysis::{ContentAnalysis, ContentAnalyzer};
use crate::config::{Prompts, Settings};
use crate::error::{Result, SeoError};
use crate::extractor::{VideoData, YoutubeExtractor};
use crate::generator::{OpenAiGenerator, SeoGenerator, SeoSuggestions, TextGenerator};
use crate::research::{KeywordAnalysis, KeywordResearcher};
use crate::results::ResultStore;
use crate::youtube::{PageScraper, YoutubeApi, YoutubeClient};
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, instrument};
use uuid::Uuid;

/// What to analyze.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// YouTube video URL.
    #[serde(default)]
    pub url: Option<String>,
    /// Target keyword; defaults to the video title.
    #[serde(default)]
    pub keyword: Option<String>,
    /// Generate titles and description with the language model.
    #[serde(default)]
    pub use_gpt: bool,
}

/// A report section: its payload, or the error that stopped it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SectionResult<T> {
    Ready(T),
    Failed { error: String },
}

impl<T> SectionResult<T> {
    fn capture(stage: &str, result: Result<T>) -> Self {
        match result {
            Ok(value) => SectionResult::Ready(value),
            Err(e) => {
                error!("{} failed: {}", stage, e);
                SectionResult::Failed {
                    error: format!("{} failed: {}", stage, e),
                }
            }
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            SectionResult::Ready(value) => Some(value),
            SectionResult::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SectionResult::Ready(_) => None,
            SectionResult::Failed { error } => Some(error),
        }
    }
}

/// The complete result of one analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub id: Uuid,
    pub video_data: Option<VideoData>,
    pub seo_suggestions: SectionResult<SeoSuggestions>,
    pub keyword_analysis: SectionResult<KeywordAnalysis>,
    pub sentiment_analysis: SectionResult<ContentAnalysis>,
    /// Local time, `%Y%m%d_%H%M%S`.
    pub timestamp: String,
    pub generated_at: DateTime<Utc>,
}

/// A report and where it was saved.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub report: AnalysisReport,
    pub saved_to: Option<PathBuf>,
}

/// Runs analyses end to end.
pub struct Pipeline {
    extractor: YoutubeExtractor,
    researcher: KeywordResearcher,
    generator: SeoGenerator,
    analyzer: ContentAnalyzer,
    store: Option<ResultStore>,
}

impl Pipeline {
    /// Build every component from settings.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let api: Option<Arc<dyn YoutubeApi>> = match YoutubeClient::from_settings(&settings.youtube)? {
            Some(client) => Some(Arc::new(client)),
            None => {
                info!("No YouTube API key configured; using page scraping and skipping API research");
                None
            }
        };
        let llm: Option<Arc<dyn TextGenerator>> = OpenAiGenerator::from_settings(&settings.openai)?
            .map(|g| Arc::new(g) as Arc<dyn TextGenerator>);

        let scraper = PageScraper::new(
            &settings.youtube.watch_url,
            Duration::from_secs(settings.youtube.timeout_secs),
        )?;
        let extractor = YoutubeExtractor::new(api.clone(), scraper, settings.youtube.max_comments);
        let researcher =
            KeywordResearcher::new(api.clone(), &settings.youtube, settings.research.clone())?;
        let generator = SeoGenerator::new(api, llm, settings.youtube.trending_results)
            .with_prompts(prompts)
            .with_token_limits(
                settings.openai.title_max_tokens,
                settings.openai.description_max_tokens,
            );
        let analyzer = ContentAnalyzer::new(settings.analysis.clone());
        let store = settings
            .general
            .save_results
            .then(|| ResultStore::new(settings.results_dir()));

        Ok(Self::with_components(extractor, researcher, generator, analyzer, store))
    }

    /// Create a pipeline with custom components.
    pub fn with_components(
        extractor: YoutubeExtractor,
        researcher: KeywordResearcher,
        generator: SeoGenerator,
        analyzer: ContentAnalyzer,
        store: Option<ResultStore>,
    ) -> Self {
        Self {
            extractor,
            researcher,
            generator,
            analyzer,
            store,
        }
    }

    /// Disable or replace report persistence.
    pub fn with_store(mut self, store: Option<ResultStore>) -> Self {
        self.store = store;
        self
    }

    pub fn store(&self) -> Option<&ResultStore> {
        self.store.as_ref()
    }

    /// Run an analysis.
    ///
    /// Invalid requests and extraction failures are errors; failures of the
    /// later stages are recorded in their report sections.
    #[instrument(skip(self, request), fields(url = ?request.url, keyword = ?request.keyword))]
    pub async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisOutcome> {
        let url = non_blank(request.url.as_deref());
        let keyword = non_blank(request.keyword.as_deref());

        if url.is_none() && keyword.is_none() {
            return Err(SeoError::InvalidInput(
                "Please provide either a YouTube URL or a keyword for analysis".to_string(),
            ));
        }
        if let Some(url) = url {
            validate_url(url)?;
        }

        let video = match url {
            Some(url) => {
                info!("Extracting video data from {}", url);
                Some(self.extractor.extract_video_data(url).await?)
            }
            None => None,
        };

        let keyword = keyword
            .map(str::to_string)
            .or_else(|| video.as_ref().map(|v| v.title.clone()))
            .unwrap_or_default();
        info!("Analyzing keyword '{}'", keyword);

        // Content analysis is CPU-bound; keep it off the async workers.
        let content_task = {
            let analyzer = self.analyzer.clone();
            let video = video.clone();
            let keyword = keyword.clone();
            tokio::task::spawn_blocking(move || analyzer.analyze_content(video.as_ref(), &keyword))
        };

        let (keyword_analysis, seo_suggestions, content_analysis) = futures::join!(
            self.researcher.analyze_keyword(&keyword),
            self.generator
                .generate_seo_content(&keyword, video.as_ref(), request.use_gpt),
            async { content_task.await.map_err(SeoError::from) }
        );

        let report = AnalysisReport {
            id: Uuid::new_v4(),
            video_data: video,
            seo_suggestions: SectionResult::capture("SEO generation", seo_suggestions),
            keyword_analysis: SectionResult::capture("Keyword research", keyword_analysis),
            sentiment_analysis: SectionResult::capture("Content analysis", content_analysis),
            timestamp: Local::now().format("%Y%m%d_%H%M%S").to_string(),
            generated_at: Utc::now(),
        };

        let Some(store) = self.store.clone() else {
            return Ok(AnalysisOutcome { report, saved_to: None });
        };
        let (report, saved_to) = tokio::task::spawn_blocking(move || {
            let path = store.save(&report)?;
            Ok::<_, SeoError>((report, path))
        })
        .await??;

        Ok(AnalysisOutcome {
            report,
            saved_to: Some(saved_to),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// The URL must be absolute http(s).
fn validate_url(value: &str) -> Result<()> {
    let parsed = url::Url::parse(value)
        .map_err(|e| SeoError::InvalidInput(format!("Invalid URL '{}': {}", value, e)))?;
    match parsed.scheme() {
        "http" | "https" if parsed.host_str().is_some() => Ok(()),
        _ => Err(SeoError::InvalidInput(format!(
            "Invalid URL '{}': expected an http(s) URL",
            value
        ))),
    }
}
