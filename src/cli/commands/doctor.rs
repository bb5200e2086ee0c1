//! Doctor command - verify configuration and API access.

use super::config::mask;
use crate::cli::Output;
use crate::config::Settings;
use crate::youtube::{YoutubeApi, YoutubeClient};
use console::style;
use std::path::{Path, PathBuf};

/// Video looked up to validate the YouTube API key; a `videos.list` call costs one quota unit.
const CHECK_VIDEO_ID: &str = "dQw4w9WgXcQ";

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub async fn run_doctor(config_path: Option<PathBuf>, settings: &Settings) -> anyhow::Result<()> {
    Output::header("tubeseo Doctor");
    println!();
    println!("Checking configuration and API access...\n");

    let mut checks = Vec::new();

    println!("{}", style("API Keys").bold());
    let youtube = check_youtube_api(settings).await;
    youtube.print();
    checks.push(youtube);
    let openai = check_openai_key(settings);
    openai.print();
    checks.push(openai);

    println!();

    println!("{}", style("Results").bold());
    let results = check_results_dir(&settings.results_dir(), settings.general.save_results);
    results.print();
    checks.push(results);

    println!();

    println!("{}", style("Configuration").bold());
    let config_path = config_path.unwrap_or_else(Settings::default_config_path);
    let config = check_config_file(&config_path);
    config.print();
    checks.push(config);

    println!();

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before using tubeseo.",
            errors
        ));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! tubeseo is ready to use.");
    }

    Ok(())
}

/// Check the YouTube key with a single `videos.list` call.
async fn check_youtube_api(settings: &Settings) -> CheckResult {
    const NAME: &str = "YOUTUBE_API_KEY";
    let client = match YoutubeClient::from_settings(&settings.youtube) {
        Ok(Some(client)) => client,
        Ok(None) => {
            return CheckResult::warning(
                NAME,
                "not set (watch-page scraping only)",
                "Set with: export YOUTUBE_API_KEY='AIza...'",
            )
        }
        Err(e) => return CheckResult::error(NAME, &e.to_string(), "Check [youtube] in the config file"),
    };

    let masked = settings.youtube.api_key().map(mask).unwrap_or_default();
    match client.videos(&[CHECK_VIDEO_ID.to_string()], &["id"]).await {
        Ok(_) => CheckResult::ok(NAME, &format!("valid ({})", masked)),
        Err(e) if e.is_quota_exceeded() => CheckResult::warning(
            NAME,
            &format!("quota exhausted ({})", masked),
            "Quota resets daily; requests fall back to defaults until then",
        ),
        Err(e) => CheckResult::error(
            NAME,
            &format!("rejected: {}", e),
            "Check the key and that the YouTube Data API v3 is enabled for it",
        ),
    }
}

fn check_openai_key(settings: &Settings) -> CheckResult {
    const NAME: &str = "OPENAI_API_KEY";
    match settings.openai.api_key() {
        Some(key) if key.starts_with("sk-") => {
            CheckResult::ok(NAME, &format!("configured ({}, model {})", mask(key), settings.openai.model))
        }
        Some(_) => CheckResult::warning(
            NAME,
            "set but format looks unusual",
            "Expected format: sk-... (OpenAI API key)",
        ),
        None => CheckResult::warning(
            NAME,
            "not set (--use-gpt falls back to templates)",
            "Set with: export OPENAI_API_KEY='sk-...'",
        ),
    }
}

fn check_results_dir(dir: &Path, save_results: bool) -> CheckResult {
    const NAME: &str = "Results directory";
    if !save_results {
        return CheckResult::ok(NAME, "saving disabled");
    }
    if !dir.exists() {
        return CheckResult::warning(
            NAME,
            &format!("{} (will be created)", dir.display()),
            "Directory will be created on first analysis",
        );
    }

    let marker = dir.join(".tubeseo-write-test");
    match std::fs::write(&marker, b"") {
        Ok(()) => {
            let _ = std::fs::remove_file(&marker);
            CheckResult::ok(NAME, &dir.display().to_string())
        }
        Err(e) => CheckResult::error(
            NAME,
            &format!("{} is not writable: {}", dir.display(), e),
            "Fix permissions or set [general] results_dir",
        ),
    }
}

fn check_config_file(path: &Path) -> CheckResult {
    if !path.exists() {
        return CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: tubeseo config edit",
        );
    }
    match Settings::load_from(Some(&path.to_path_buf())) {
        Ok(_) => CheckResult::ok("Config file", &path.display().to_string()),
        Err(e) => CheckResult::error("Config file", &e.to_string(), "Fix the file or remove it to use defaults"),
    }
}
