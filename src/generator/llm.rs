//! Language-model text generation.

use crate::config::OpenAiSettings;
use crate::error::{Result, SeoError};
use crate::openai::create_client;
use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_openai::Client;
use async_trait::async_trait;
use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, instrument};

static LIST_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\d+[.)]|[-*•])\s*").expect("Invalid regex"));

/// A chat-style text generator.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Complete a system + user prompt pair.
    async fn complete(&self, system: &str, user: &str, max_tokens: u32) -> Result<String>;
}

/// OpenAI chat completions.
pub struct OpenAiGenerator {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: f32,
}

impl OpenAiGenerator {
    pub fn new(api_key: &str, settings: &OpenAiSettings) -> Result<Self> {
        Ok(Self {
            client: create_client(api_key, Duration::from_secs(settings.timeout_secs))?,
            model: settings.model.clone(),
            temperature: settings.temperature,
        })
    }

    /// Build a generator when an API key is configured.
    pub fn from_settings(settings: &OpenAiSettings) -> Result<Option<Self>> {
        settings
            .api_key()
            .map(|key| Self::new(key, settings))
            .transpose()
    }
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    #[instrument(skip(self, system, user))]
    async fn complete(&self, system: &str, user: &str, max_tokens: u32) -> Result<String> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(system)
                .build()
                .map_err(|e| SeoError::Llm(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(user)
                .build()
                .map_err(|e| SeoError::Llm(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(self.temperature)
            .max_completion_tokens(max_tokens)
            .build()
            .map_err(|e| SeoError::Llm(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| SeoError::Llm(format!("Failed to generate response: {}", e)))?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .ok_or_else(|| SeoError::Llm("Empty response from LLM".to_string()))?;

        debug!("Generated {} characters", content.len());
        Ok(content)
    }
}

/// Split a model reply into clean title lines.
///
/// Numbering, bullets and surrounding quotes are removed; blank lines dropped.
pub fn parse_titles(reply: &str, limit: usize) -> Vec<String> {
    reply
        .lines()
        .map(|line| {
            let line = LIST_MARKER.replace(line.trim(), "");
            line.trim()
                .trim_matches(|c| c == '"' || c == '\'' || c == '“' || c == '”')
                .trim()
                .to_string()
        })
        .filter(|line| !line.is_empty())
        .take(limit)
        .collect()
}
