//! Configuration settings for tubeseo.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub youtube: YoutubeSettings,
    pub openai: OpenAiSettings,
    pub research: ResearchSettings,
    pub analysis: AnalysisSettings,
    pub server: ServerSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory where analysis reports are written.
    pub results_dir: String,
    /// Persist every report to the results directory.
    pub save_results: bool,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            results_dir: "results".to_string(),
            save_results: true,
        }
    }
}

/// YouTube Data API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YoutubeSettings {
    /// YouTube Data API key. Without it, video data is scraped from the watch page.
    pub api_key: Option<String>,
    /// Base URL of the Data API.
    pub api_base_url: String,
    /// Watch page URL used by the scraping fallback.
    pub watch_url: String,
    /// Maximum number of comments to fetch per video.
    pub max_comments: usize,
    /// Search results used for keyword research.
    pub research_results: u32,
    /// Search results used for trending titles, tags and hashtags.
    pub trending_results: u32,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for YoutubeSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: "https://www.googleapis.com/youtube/v3".to_string(),
            watch_url: "https://www.youtube.com/watch".to_string(),
            max_comments: 100,
            research_results: 50,
            trending_results: 5,
            timeout_secs: 30,
        }
    }
}

impl YoutubeSettings {
    /// The API key, if one is configured and non-empty.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }
}

/// OpenAI settings for LLM-backed generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiSettings {
    /// OpenAI API key. Generation falls back to templates without it.
    pub api_key: Option<String>,
    /// Chat model used for titles and descriptions.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Completion token limit for title generation.
    pub title_max_tokens: u32,
    /// Completion token limit for description generation.
    pub description_max_tokens: u32,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gpt-3.5-turbo".to_string(),
            temperature: 0.7,
            title_max_tokens: 150,
            description_max_tokens: 500,
            timeout_secs: 120,
        }
    }
}

impl OpenAiSettings {
    /// The API key, if one is configured and non-empty.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }
}

/// Keyword research settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResearchSettings {
    /// Query a web search page for result counts and related searches.
    pub web_search_enabled: bool,
    /// Web search endpoint; the keyword is sent as `q`.
    pub web_search_url: String,
}

impl Default for ResearchSettings {
    fn default() -> Self {
        Self {
            web_search_enabled: true,
            web_search_url: "https://www.google.com/search".to_string(),
        }
    }
}

/// Content analysis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Upper bound on the number of k-means clusters.
    pub max_clusters: usize,
    /// Vocabulary size of the TF-IDF vectorizer.
    pub max_features: usize,
    /// Keywords reported per cluster.
    pub cluster_keywords: usize,
    /// Related keywords reported for the target keyword.
    pub related_keywords: usize,
    /// Compound score above which a comment counts as positive (and below its negation, negative).
    pub sentiment_threshold: f64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            max_clusters: 5,
            max_features: 1000,
            cluster_keywords: 5,
            related_keywords: 5,
            sentiment_threshold: 0.2,
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    ///
    /// `YOUTUBE_API_KEY` and `OPENAI_API_KEY` from the environment take
    /// precedence over keys in the file.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        let mut settings = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Settings::default()
        };

        settings.apply_env(|key| std::env::var(key).ok());
        Ok(settings)
    }

    /// Override API keys from an environment lookup.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("YOUTUBE_API_KEY").filter(|k| !k.is_empty()) {
            self.youtube.api_key = Some(key);
        }
        if let Some(key) = lookup("OPENAI_API_KEY").filter(|k| !k.is_empty()) {
            self.openai.api_key = Some(key);
        }
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::SeoError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tubeseo")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded results directory path.
    pub fn results_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.results_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [youtube]
            max_comments = 20

            [server]
            port = 9000
            "#,
        )
        .unwrap();

        assert_eq!(settings.youtube.max_comments, 20);
        assert_eq!(settings.youtube.research_results, 50);
        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.openai.model, "gpt-3.5-turbo");
        assert!(settings.general.save_results);
    }

    #[test]
    fn test_legacy_general_keys_are_ignored() {
        let settings: Settings = toml::from_str(
            r#"
            [general]
            results_dir = "reports"
            log_level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(settings.general.results_dir, "reports");
        let written = toml::to_string_pretty(&settings).unwrap();
        assert!(!written.contains("log_level"));
    }

    #[test]
    fn test_env_overrides_keys() {
        let mut settings = Settings::default();
        settings.youtube.api_key = Some("from-file".to_string());

        settings.apply_env(|key| match key {
            "YOUTUBE_API_KEY" => Some("yt-env".to_string()),
            "OPENAI_API_KEY" => Some(String::new()),
            _ => None,
        });

        assert_eq!(settings.youtube.api_key(), Some("yt-env"));
        assert_eq!(settings.openai.api_key(), None);
    }

    #[test]
    fn test_blank_api_key_is_ignored() {
        let mut settings = Settings::default();
        settings.youtube.api_key = Some("   ".to_string());
        assert_eq!(settings.youtube.api_key(), None);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut settings = Settings::default();
        settings.general.results_dir = "/tmp/seo-results".to_string();
        settings.save_to(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let loaded: Settings = toml::from_str(&content).unwrap();
        assert_eq!(loaded.general.results_dir, "/tmp/seo-results");
    }
}
