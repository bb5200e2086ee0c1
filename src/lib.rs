//! tubeseo - YouTube SEO assistant
//!
//! Analyzes a YouTube video and/or a target keyword and produces SEO
//! suggestions, keyword research and a content analysis.
//!
//! # Overview
//!
//! An analysis:
//! - extracts video metadata and comments (YouTube Data API, or the watch page without a key)
//! - researches the keyword's competition on YouTube and the web
//! - generates titles, a description, tags and hashtags (templates, or an OpenAI model)
//! - scores sentiment, keyword usage and topic clusters of the video's text
//!
//! # Architecture
//!
//! - `config` - Configuration management
//! - `youtube` - Data API client, watch-page scraper, URL parsing
//! - `extractor` - Normalized video data
//! - `analysis` - Sentiment, TF-IDF, clustering and keyword usage
//! - `research` - Keyword competition and volume estimates
//! - `generator` - SEO content generation and scoring
//! - `pipeline` - Request coordination and report assembly
//! - `results` - Stored reports
//! - `server` - HTTP API
//!
//! # Example
//!
//! ```rust,no_run
//! use tubeseo::config::Settings;
//! use tubeseo::pipeline::{AnalysisRequest, Pipeline};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let pipeline = Pipeline::from_settings(&settings)?;
//!
//!     let outcome = pipeline
//!         .analyze(AnalysisRequest {
//!             url: Some("https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string()),
//!             keyword: None,
//!             use_gpt: false,
//!         })
//!         .await?;
//!     println!("{}", serde_json::to_string_pretty(&outcome.report)?);
//!
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod generator;
pub mod openai;
pub mod pipeline;
pub mod research;
pub mod results;
pub mod server;
pub mod youtube;

pub use error::{Result, SeoError};
