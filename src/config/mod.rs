//! Configuration module for tubeseo.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{DescriptionPrompts, Prompts, TitlePrompts};
pub use settings::{
    AnalysisSettings, GeneralSettings, OpenAiSettings, PromptSettings, ResearchSettings,
    ServerSettings, Settings, YoutubeSettings,
};
