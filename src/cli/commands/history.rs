//! History command implementation.

use crate::cli::output::format_size;
use crate::cli::Output;
use crate::config::Settings;
use crate::results::ResultStore;
use anyhow::Result;
use console::style;

/// List stored reports, newest first.
pub fn run_history(limit: usize, settings: &Settings) -> Result<()> {
    let store = ResultStore::new(settings.results_dir());
    let entries = store.list()?;

    if entries.is_empty() {
        Output::info(&format!(
            "No reports in {} yet. Use 'tubeseo analyze' to create one.",
            store.dir().display()
        ));
        return Ok(());
    }

    Output::header(&format!("Stored Reports ({})", entries.len()));
    println!();

    for entry in entries.iter().take(limit) {
        let summary = store
            .load(&entry.name)
            .ok()
            .and_then(|report| summarize(&report))
            .unwrap_or_default();
        println!(
            "  {} {} ({}) {}",
            style("*").cyan(),
            style(&entry.name).bold(),
            style(format_size(entry.size_bytes)).dim(),
            summary
        );
    }

    if entries.len() > limit {
        println!();
        Output::info(&format!("{} older report(s) not shown.", entries.len() - limit));
    }
    println!();
    Output::kv("Directory", &store.dir().display().to_string());

    Ok(())
}

/// "video title / keyword" line for a stored report.
fn summarize(report: &serde_json::Value) -> Option<String> {
    let keyword = report["keyword_analysis"]["keyword"].as_str();
    let title = report["video_data"]["title"].as_str();
    match (title, keyword) {
        (Some(title), Some(keyword)) if title != keyword => {
            Some(format!("{} [{}]", title, keyword))
        }
        (Some(title), _) => Some(title.to_string()),
        (None, Some(keyword)) => Some(format!("[{}]", keyword)),
        (None, None) => None,
    }
}
