//! Pre-flight checks before an analysis.
//!
//! Missing API keys never stop an analysis, but they change what it can do.
//! These checks turn that into advisories up front.

use crate::config::Settings;

/// Something the user should know before the analysis runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advisory {
    /// No YouTube key: videos are scraped and keyword research has no YouTube metrics.
    NoYoutubeKey,
    /// `--use-gpt` was requested without an OpenAI key.
    NoOpenAiKey,
}

impl Advisory {
    pub fn message(&self) -> &'static str {
        match self {
            Advisory::NoYoutubeKey => {
                "YOUTUBE_API_KEY not set: video data will be scraped from the watch page and keyword research will lack YouTube metrics."
            }
            Advisory::NoOpenAiKey => {
                "OPENAI_API_KEY not set: titles and description will use templates instead of the language model."
            }
        }
    }
}

/// Advisories for an analysis with the given settings.
pub fn check(settings: &Settings, use_gpt: bool) -> Vec<Advisory> {
    let mut advisories = Vec::new();
    if settings.youtube.api_key().is_none() {
        advisories.push(Advisory::NoYoutubeKey);
    }
    if use_gpt && settings.openai.api_key().is_none() {
        advisories.push(Advisory::NoOpenAiKey);
    }
    advisories
}
