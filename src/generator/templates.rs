//! Template-based titles, descriptions, tags and hashtags.

use std::collections::HashSet;

pub const MAX_TAGS: usize = 15;
pub const MAX_HASHTAGS: usize = 10;
const TRENDING_TAGS: usize = 10;
const VIDEO_TAGS: usize = 5;
const TRENDING_HASHTAGS: usize = 5;

/// The keyword with spaces removed, as used in tags and hashtags.
pub fn compact(keyword: &str) -> String {
    keyword.replace(' ', "")
}

pub fn titles(keyword: &str, top_trending: Option<&str>) -> Vec<String> {
    let mut titles = vec![
        format!("How to {keyword} - Complete Guide"),
        format!("10 Best {keyword} Tips and Tricks"),
        format!("The Ultimate {keyword} Guide"),
    ];
    if let Some(trending) = top_trending {
        titles.push(trending.to_string());
    }
    titles.push(format!("{keyword} - Everything You Need to Know"));
    titles
}

pub fn description(keyword: &str) -> String {
    format!(
        "In this video, we'll explore everything about {keyword}.

🔍 What you'll learn:
• Key concepts and fundamentals
• Best practices and tips
• Common mistakes to avoid
• Advanced techniques

📚 Resources:
• Links to related content
• Tools and software mentioned
• Additional learning materials

⏰ Timestamps:
00:00 - Introduction
02:00 - Main content
05:00 - Tips and tricks
08:00 - Conclusion

#YouTubeSEO #{compact} #ContentCreation

Subscribe for more content about {keyword} and related topics!",
        compact = compact(keyword),
    )
}

pub fn tags(keyword: &str, trending: &[String], video_tags: &[String]) -> Vec<String> {
    let base = [
        keyword.to_string(),
        compact(keyword),
        format!("how to {keyword}"),
        format!("{keyword} tutorial"),
        format!("{keyword} guide"),
        format!("learn {keyword}"),
        format!("{keyword} tips"),
        format!("{keyword} tricks"),
    ];

    let candidates = base
        .into_iter()
        .chain(trending.iter().take(TRENDING_TAGS).cloned())
        .chain(video_tags.iter().take(VIDEO_TAGS).cloned());
    dedup_take(candidates, MAX_TAGS)
}

pub fn hashtags(keyword: &str, trending: &[String]) -> Vec<String> {
    let k = compact(keyword);
    let base = [
        format!("#{k}"),
        format!("#{k}Tutorial"),
        format!("#{k}Tips"),
        format!("#{k}Guide"),
        format!("#Learn{k}"),
    ];

    let candidates = base
        .into_iter()
        .chain(trending.iter().take(TRENDING_HASHTAGS).cloned());
    dedup_take(candidates, MAX_HASHTAGS)
}

/// Order-preserving de-duplication, truncated to `limit`.
pub fn dedup_take<I: IntoIterator<Item = String>>(items: I, limit: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_titles_with_and_without_trending() {
        let plain = titles("rust async", None);
        assert_eq!(plain.len(), 4);
        assert_eq!(plain[0], "How to rust async - Complete Guide");
        assert_eq!(plain[3], "rust async - Everything You Need to Know");

        let trending = titles("rust async", Some("Async Rust in 100 Seconds"));
        assert_eq!(trending.len(), 5);
        assert_eq!(trending[3], "Async Rust in 100 Seconds");
    }

    #[test]
    fn test_description_sections() {
        let d = description("rust async");
        assert!(d.starts_with("In this video, we'll explore everything about rust async."));
        assert!(d.contains("#YouTubeSEO #rustasync #ContentCreation"));
        assert!(d.ends_with("Subscribe for more content about rust async and related topics!"));
        for marker in ["🔍", "📚", "⏰"] {
            assert!(d.contains(marker));
        }
    }

    #[test]
    fn test_tags_are_deduplicated_and_capped() {
        let trending: Vec<String> = (0..12).map(|i| format!("trend{i}")).collect();
        let video = vec!["rust".to_string(), "video tag".to_string()];
        let tags = tags("rust", &trending, &video);

        assert_eq!(tags.len(), MAX_TAGS);
        assert_eq!(tags[0], "rust");
        // "rust" and its compact form collapse into one tag.
        assert_eq!(tags[1], "how to rust");
        assert_eq!(tags.iter().filter(|t| *t == "rust").count(), 1);
    }

    #[test]
    fn test_hashtags() {
        let h = hashtags("rust async", &["#rust".to_string(), "#rustasync".to_string()]);
        assert_eq!(
            h,
            vec![
                "#rustasync",
                "#rustasyncTutorial",
                "#rustasyncTips",
                "#rustasyncGuide",
                "#Learnrustasync",
                "#rust"
            ]
        );
    }
}
