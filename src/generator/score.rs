//! SEO scoring and optimization tips.

use serde::{Deserialize, Serialize};

const MIN_TITLE_CHARS: usize = 30;
const MAX_TITLE_CHARS: usize = 60;
const MIN_DESCRIPTION_CHARS: usize = 200;

/// Score breakdown out of 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoScore {
    pub total_score: u32,
    pub max_score: u32,
    pub title_score: u32,
    pub description_score: u32,
    pub tags_score: u32,
    pub hashtags_score: u32,
}

impl SeoScore {
    pub fn calculate(title: &str, description: &str, tags: &[String], hashtags: &[String]) -> Self {
        let title_len = title.chars().count();
        let mut title_score = 0;
        if (MIN_TITLE_CHARS..=MAX_TITLE_CHARS).contains(&title_len) {
            title_score += 15;
        }
        if title.contains('#') {
            title_score += 5;
        }
        if title.contains('?') {
            title_score += 5;
        }
        if title.chars().any(|c| c.is_ascii_digit()) {
            title_score += 5;
        }

        let mut description_score = 0;
        if description.chars().count() >= MIN_DESCRIPTION_CHARS {
            description_score += 10;
        }
        for marker in ["⏰", "🔍", "📚", "Subscribe"] {
            if description.contains(marker) {
                description_score += 5;
            }
        }

        let tags_score = (tags.len() as u32 * 2).min(20);
        let hashtags_score = (hashtags.len() as u32 * 2).min(20);

        Self {
            total_score: title_score + description_score + tags_score + hashtags_score,
            max_score: 100,
            title_score,
            description_score,
            tags_score,
            hashtags_score,
        }
    }
}

/// Actionable advice for content that misses a scoring rule.
pub fn optimization_tips(
    title: &str,
    description: &str,
    tags: &[String],
    hashtags: &[String],
) -> Vec<String> {
    let mut tips = Vec::new();

    let title_len = title.chars().count();
    if title_len < MIN_TITLE_CHARS {
        tips.push("Consider making the title longer (30-60 characters)");
    } else if title_len > MAX_TITLE_CHARS {
        tips.push("Consider making the title shorter (30-60 characters)");
    }

    if description.chars().count() < MIN_DESCRIPTION_CHARS {
        tips.push("Add more content to the description (minimum 200 characters)");
    }
    if !description.contains('⏰') {
        tips.push("Add timestamps to the description");
    }
    if !description.contains("Subscribe") {
        tips.push("Add a call-to-action to subscribe");
    }

    if tags.len() < 10 {
        tips.push("Add more tags (aim for 10-15 tags)");
    }
    if hashtags.len() < 5 {
        tips.push("Add more hashtags (aim for 5-10 hashtags)");
    }

    tips.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::templates;

    fn strings(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("item{i}")).collect()
    }

    #[test]
    fn test_template_content_scores() {
        let title = "10 Best rust Tips and Tricks"; // 28 chars
        let description = templates::description("rust");
        let score = SeoScore::calculate(title, &description, &strings(12), &strings(5));

        assert_eq!(score.title_score, 5);
        assert_eq!(score.description_score, 30);
        assert_eq!(score.tags_score, 20);
        assert_eq!(score.hashtags_score, 10);
        assert_eq!(score.total_score, 65);
        assert_eq!(score.max_score, 100);
    }

    #[test]
    fn test_title_rules() {
        let score = SeoScore::calculate("Is this the best #rust video of 2024?", "", &[], &[]);
        assert_eq!(score.title_score, 30);
        assert_eq!(score.total_score, 30);
    }

    #[test]
    fn test_tips_for_thin_content() {
        let tips = optimization_tips("Short", "Tiny description", &strings(3), &strings(1));
        assert_eq!(
            tips,
            vec![
                "Consider making the title longer (30-60 characters)",
                "Add more content to the description (minimum 200 characters)",
                "Add timestamps to the description",
                "Add a call-to-action to subscribe",
                "Add more tags (aim for 10-15 tags)",
                "Add more hashtags (aim for 5-10 hashtags)",
            ]
        );
    }

    #[test]
    fn test_no_tips_for_complete_content() {
        let title = "How to rust async - Complete Guide";
        let tips = optimization_tips(title, &templates::description("rust async"), &strings(10), &strings(5));
        assert!(tips.is_empty());

        let long = "x".repeat(61);
        let tips = optimization_tips(&long, &templates::description("rust"), &strings(10), &strings(5));
        assert_eq!(tips, vec!["Consider making the title shorter (30-60 characters)"]);
    }
}
