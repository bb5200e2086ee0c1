//! Analyze command implementation.

use crate::cli::output::{format_duration, preview};
use crate::cli::{preflight, Output};
use crate::config::Settings;
use crate::pipeline::{AnalysisReport, AnalysisRequest, Pipeline};
use anyhow::Result;

/// Run an analysis and print the report.
pub async fn run_analyze(
    url: Option<String>,
    keyword: Option<String>,
    use_gpt: bool,
    no_save: bool,
    json: bool,
    settings: Settings,
) -> Result<()> {
    if !json {
        for advisory in preflight::check(&settings, use_gpt) {
            Output::warning(advisory.message());
        }
    }

    let mut pipeline = Pipeline::from_settings(&settings)?;
    if no_save {
        pipeline = pipeline.with_store(None);
    }

    let request = AnalysisRequest {
        url,
        keyword,
        use_gpt,
    };

    let spinner = (!json).then(|| Output::spinner("Analyzing..."));
    let result = pipeline.analyze(request).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => {
            Output::error(&format!("Analysis failed: {}", e));
            return Err(e.into());
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome.report)?);
        return Ok(());
    }

    print_report(&outcome.report);

    if let Some(path) = &outcome.saved_to {
        println!();
        Output::success(&format!("Report saved to {}", path.display()));
    }

    Ok(())
}

fn print_report(report: &AnalysisReport) {
    if let Some(video) = &report.video_data {
        Output::header("Video");
        Output::kv("Title", &video.title);
        Output::kv("Channel", &video.channel_title);
        if let Some(seconds) = video.duration_seconds {
            Output::kv("Duration", &format_duration(seconds));
        }
        Output::kv(
            "Views / likes / comments",
            &format!("{} / {} / {}", video.view_count, video.like_count, video.comment_count),
        );
        Output::kv(
            "Engagement rate",
            &format!("{:.2}%", video.engagement_metrics.engagement_rate * 100.0),
        );
        Output::kv("Comments analyzed", &video.comments.len().to_string());
    }

    Output::header("SEO Suggestions");
    match (report.seo_suggestions.ready(), report.seo_suggestions.error()) {
        (Some(seo), _) => {
            println!();
            println!("Titles:");
            for (i, title) in seo.titles.iter().enumerate() {
                Output::numbered(i + 1, title);
            }
            println!();
            println!("Description:");
            for line in seo.description.lines() {
                println!("  {}", line);
            }
            println!();
            Output::kv("Tags", &seo.tags.join(", "));
            Output::kv("Hashtags", &seo.hashtags.join(" "));
            println!();
            Output::score("SEO score", seo.seo_score.total_score, seo.seo_score.max_score);
            for tip in &seo.optimization_tips {
                Output::list_item(tip);
            }
        }
        (None, error) => Output::warning(error.unwrap_or("unavailable")),
    }

    Output::header("Keyword Research");
    match (report.keyword_analysis.ready(), report.keyword_analysis.error()) {
        (Some(research), _) => {
            Output::kv("Keyword", &research.keyword);
            Output::kv(
                "Competition",
                &format!(
                    "{} (YouTube {}, web {})",
                    research.competition_metrics.overall_competition,
                    research.competition_metrics.youtube_competition,
                    research.competition_metrics.web_competition
                ),
            );
            Output::kv("Search volume", &research.web_metrics.search_volume);
            Output::kv(
                "Avg views of top videos",
                &research.youtube_metrics.avg_views.to_string(),
            );
            if !research.suggestions.is_empty() {
                println!();
                println!("Related keywords:");
                for suggestion in &research.suggestions {
                    Output::list_item(&format!(
                        "{} ({} competition)",
                        suggestion.keyword, suggestion.competition
                    ));
                }
            }
        }
        (None, error) => Output::warning(error.unwrap_or("unavailable")),
    }

    Output::header("Content Analysis");
    match (report.sentiment_analysis.ready(), report.sentiment_analysis.error()) {
        (Some(analysis), _) => {
            let sentiment = &analysis.sentiment_analysis;
            Output::kv(
                "Content sentiment",
                &format!("{:.3}", sentiment.content_sentiment.compound),
            );
            Output::kv(
                "Comment sentiment",
                &format!("{:.3}", sentiment.comment_sentiment.compound),
            );
            let dist = &sentiment.sentiment_distribution;
            Output::kv(
                "Comments +/=/-",
                &format!("{} / {} / {}", dist.positive, dist.neutral, dist.negative),
            );
            Output::kv(
                "Keyword density",
                &format!("{:.2}%", analysis.trend_analysis.keyword_density * 100.0),
            );
            if !analysis.trend_analysis.key_phrases.is_empty() {
                Output::kv(
                    "Key phrases",
                    &preview(&analysis.trend_analysis.key_phrases.join(", "), 120),
                );
            }
            for (i, keywords) in analysis.content_clusters.cluster_keywords.iter().enumerate() {
                Output::kv(&format!("Cluster {}", i + 1), &keywords.join(", "));
            }
        }
        (None, error) => Output::warning(error.unwrap_or("unavailable")),
    }
}
