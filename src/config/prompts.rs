//! Prompt templates for LLM-backed generation.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub titles: TitlePrompts,
    pub description: DescriptionPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: std::collections::HashMap<String, String>,
}

/// Prompts for title generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TitlePrompts {
    pub system: String,
    pub user: String,
}

impl Default for TitlePrompts {
    fn default() -> Self {
        Self {
            system: "You are a YouTube SEO expert. Generate 5 engaging and SEO-optimized titles for a video about the given keyword. Reply with one title per line and nothing else.".to_string(),
            user: r#"Generate 5 YouTube titles for a video about: {{keyword}}
{{video_context}}"#
                .to_string(),
        }
    }
}

/// Prompts for description generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DescriptionPrompts {
    pub system: String,
    pub user: String,
}

impl Default for DescriptionPrompts {
    fn default() -> Self {
        Self {
            system: "You are a YouTube SEO expert. Generate an engaging and SEO-optimized description for a video about the given keyword.".to_string(),
            user: r#"Generate a YouTube description for a video about: {{keyword}}
{{video_context}}"#
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&std::collections::HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let titles_path = custom_path.join("titles.toml");
            if titles_path.exists() {
                let content = std::fs::read_to_string(&titles_path)?;
                prompts.titles = toml::from_str(&content)?;
            }

            let description_path = custom_path.join("description.toml");
            if description_path.exists() {
                let content = std::fs::read_to_string(&description_path)?;
                prompts.description = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &std::collections::HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(
        &self,
        template: &str,
        vars: &std::collections::HashMap<String, String>,
    ) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged).trim_end().to_string()
    }
}
