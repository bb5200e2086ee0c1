//! CLI module for tubeseo.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// tubeseo - YouTube SEO assistant
///
/// Analyzes a YouTube video and/or a target keyword and suggests titles,
/// descriptions, tags and hashtags.
#[derive(Parser, Debug)]
#[command(name = "tubeseo")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a video and/or keyword and print SEO suggestions
    Analyze {
        /// YouTube video URL
        #[arg(short, long)]
        url: Option<String>,

        /// Target keyword (defaults to the video title)
        #[arg(short, long)]
        keyword: Option<String>,

        /// Generate titles and description with the OpenAI model
        #[arg(long)]
        use_gpt: bool,

        /// Do not write the report to the results directory
        #[arg(long)]
        no_save: bool,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start the HTTP API server
    Serve {
        /// Host to bind to (defaults to the configured host)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (defaults to the configured port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// List stored analysis reports
    History {
        /// Maximum number of reports to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Check configuration and API access
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::parse_from([
            "tubeseo",
            "-vv",
            "analyze",
            "--url",
            "https://youtu.be/dQw4w9WgXcQ",
            "--keyword",
            "rust",
            "--use-gpt",
            "--json",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Analyze {
                url,
                keyword,
                use_gpt,
                no_save,
                json,
            } => {
                assert_eq!(url.as_deref(), Some("https://youtu.be/dQw4w9WgXcQ"));
                assert_eq!(keyword.as_deref(), Some("rust"));
                assert!(use_gpt && json && !no_save);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_serve_defaults() {
        let cli = Cli::parse_from(["tubeseo", "-c", "/tmp/c.toml", "serve"]);
        assert_eq!(cli.config.as_deref(), Some("/tmp/c.toml"));
        assert!(matches!(cli.command, Commands::Serve { host: None, port: None }));
    }
}
