//! Tokenization and surface-level text metrics.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("Invalid regex"));
static TERM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("Invalid regex"));
static PHRASE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w'-]+|[^\w\s]").expect("Invalid regex"));
static EMOJI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x{1F300}-\x{1F9FF}]").expect("Invalid regex"));
static HASHTAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#\w+").expect("Invalid regex"));
static LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://\S+").expect("Invalid regex"));
static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?\n]+").expect("Invalid regex"));

const MAX_PHRASE_WORDS: usize = 3;
const MAX_KEY_PHRASES: usize = 10;

/// English stopwords removed before vectorization and phrase extraction.
pub const STOPWORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst", "amount",
    "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway", "anywhere", "are",
    "around", "as", "at", "back", "be", "became", "because", "become", "becomes", "becoming",
    "been", "before", "beforehand", "behind", "being", "below", "beside", "besides", "between",
    "beyond", "both", "bottom", "but", "by", "call", "can", "cannot", "could", "did", "do",
    "does", "doing", "done", "down", "due", "during", "each", "eg", "either", "else",
    "elsewhere", "enough", "etc", "even", "ever", "every", "everyone", "everything",
    "everywhere", "except", "few", "first", "for", "former", "formerly", "from", "front", "full",
    "further", "get", "give", "go", "had", "has", "hasnt", "have", "he", "hence", "her", "here",
    "hereafter", "hereby", "herein", "hereupon", "hers", "herself", "him", "himself", "his",
    "how", "however", "i", "ie", "if", "in", "indeed", "into", "is", "it", "its", "itself",
    "just", "keep", "last", "latter", "latterly", "least", "less", "made", "many", "may", "me",
    "meanwhile", "might", "mine", "more", "moreover", "most", "mostly", "move", "much", "must",
    "my", "myself", "name", "namely", "neither", "never", "nevertheless", "next", "no", "nobody",
    "none", "noone", "nor", "not", "nothing", "now", "nowhere", "of", "off", "often", "on",
    "once", "one", "only", "onto", "or", "other", "others", "otherwise", "our", "ours",
    "ourselves", "out", "over", "own", "part", "per", "perhaps", "please", "put", "rather", "re",
    "really", "same", "see", "seem", "seemed", "seeming", "seems", "several", "she", "should",
    "show", "side", "since", "so", "some", "somehow", "someone", "something", "sometime",
    "sometimes", "somewhere", "still", "such", "take", "than", "that", "the", "their", "them",
    "themselves", "then", "thence", "there", "thereafter", "thereby", "therefore", "therein",
    "thereupon", "these", "they", "this", "those", "though", "through", "throughout", "thru",
    "thus", "to", "together", "too", "top", "toward", "towards", "under", "until", "up", "upon",
    "us", "very", "via", "was", "we", "well", "were", "what", "whatever", "when", "whence",
    "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon", "wherever",
    "whether", "which", "while", "whither", "who", "whoever", "whole", "whom", "whose", "why",
    "will", "with", "within", "without", "would", "yet", "you", "your", "yours", "yourself",
    "yourselves", "ll", "ve", "don", "didn", "doesn", "isn", "wasn", "won", "can't",
];

static STOPWORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOPWORDS.iter().copied().collect());

/// Whether a lower-cased token is an English stopword.
pub fn is_stopword(token: &str) -> bool {
    STOPWORD_SET.contains(token)
}

/// Lower-cased `\w+` tokens.
pub fn words(text: &str) -> Vec<String> {
    WORD.find_iter(&text.to_lowercase())
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Lower-cased vectorizer terms: tokens of two or more word characters, stopwords removed.
pub fn terms(text: &str) -> Vec<String> {
    TERM.find_iter(&text.to_lowercase())
        .map(|m| m.as_str())
        .filter(|t| !is_stopword(t))
        .map(str::to_string)
        .collect()
}

/// Split text into sentences on terminal punctuation and line breaks.
pub fn sentences(text: &str) -> Vec<&str> {
    SENTENCE_BREAK
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Occurrences of the keyword as a whole word divided by the number of words.
pub fn keyword_density(text: &str, keyword: &str) -> f64 {
    let keyword = keyword.trim().to_lowercase();
    let total = WORD.find_iter(text).count();
    if total == 0 || keyword.is_empty() {
        return 0.0;
    }

    let pattern = format!(r"\b{}\b", regex::escape(&keyword));
    let occurrences = Regex::new(&pattern)
        .map(|re| re.find_iter(&text.to_lowercase()).count())
        .unwrap_or(0);

    occurrences as f64 / total as f64
}

/// Candidate key phrases: runs of up to three content words between stopwords or punctuation.
///
/// Phrases are returned in order of first occurrence, without duplicates.
pub fn key_phrases(text: &str) -> Vec<String> {
    let mut phrases: Vec<String> = Vec::new();
    let mut seen = HashSet::new();
    let mut current: Vec<&str> = Vec::new();

    let mut flush = |current: &mut Vec<&str>, phrases: &mut Vec<String>| {
        if !current.is_empty() {
            let phrase = current.join(" ");
            if seen.insert(phrase.to_lowercase()) {
                phrases.push(phrase);
            }
            current.clear();
        }
    };

    for token in PHRASE_TOKEN.find_iter(text).map(|m| m.as_str()) {
        let is_word = token.chars().any(char::is_alphanumeric);
        let lower = token.to_lowercase();
        if !is_word || is_stopword(&lower) || token.chars().all(|c| c.is_ascii_digit()) {
            flush(&mut current, &mut phrases);
            continue;
        }

        current.push(token);
        if current.len() == MAX_PHRASE_WORDS {
            flush(&mut current, &mut phrases);
        }
    }
    flush(&mut current, &mut phrases);

    phrases.truncate(MAX_KEY_PHRASES);
    phrases
}

/// Structural features of a title and description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentStructure {
    pub title_length: usize,
    pub description_length: usize,
    pub has_emojis: bool,
    pub has_hashtags: bool,
    pub has_links: bool,
}

impl ContentStructure {
    pub fn of(title: &str, description: &str) -> Self {
        let combined = format!("{}{}", title, description);
        Self {
            title_length: title.chars().count(),
            description_length: description.chars().count(),
            has_emojis: EMOJI.is_match(&combined),
            has_hashtags: HASHTAG.is_match(&combined),
            has_links: LINK.is_match(description),
        }
    }
}

/// Where the keyword first appears, as character offsets (case-insensitive).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordPosition {
    pub in_title: bool,
    pub title_position: Option<usize>,
    pub in_description: bool,
    pub description_position: Option<usize>,
}

impl KeywordPosition {
    pub fn of(title: &str, description: &str, keyword: &str) -> Self {
        let title_position = char_offset(title, keyword);
        let description_position = char_offset(description, keyword);
        Self {
            in_title: title_position.is_some(),
            title_position,
            in_description: description_position.is_some(),
            description_position,
        }
    }
}

fn char_offset(haystack: &str, needle: &str) -> Option<usize> {
    let haystack = haystack.to_lowercase();
    let needle = needle.to_lowercase();
    let byte = haystack.find(&needle)?;
    Some(haystack[..byte].chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_density() {
        let text = "Rust is fast. Learn rust today, rusty folks!";
        // 8 words, "rust" matches twice (not "rusty")
        assert!((keyword_density(text, "Rust") - 0.25).abs() < 1e-9);
        assert_eq!(keyword_density("", "rust"), 0.0);
        assert_eq!(keyword_density("some words", ""), 0.0);
    }

    #[test]
    fn test_multi_word_keyword_density() {
        let text = "Machine learning basics: machine learning for all";
        // 7 words, phrase appears twice
        assert!((keyword_density(text, "machine learning") - 2.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_terms_drop_stopwords_and_short_tokens() {
        assert_eq!(
            terms("The Rust book is a great guide, I think"),
            vec!["rust", "book", "great", "guide", "think"]
        );
    }

    #[test]
    fn test_key_phrases() {
        let phrases = key_phrases("Learn Rust programming with the official book and async runtime tips");
        assert_eq!(
            phrases,
            vec!["Learn Rust programming", "official book", "async runtime tips"]
        );
    }

    #[test]
    fn test_key_phrases_are_capped() {
        let text = (0..30)
            .map(|i| format!("word{} and", i))
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(key_phrases(&text).len(), MAX_KEY_PHRASES);
    }

    #[test]
    fn test_content_structure() {
        let s = ContentStructure::of("Rust 🦀 Guide", "Docs at https://doc.rust-lang.org #rustlang");
        assert_eq!(s.title_length, 12);
        assert!(s.has_emojis);
        assert!(s.has_hashtags);
        assert!(s.has_links);

        let plain = ContentStructure::of("Plain", "No links here");
        assert!(!plain.has_emojis && !plain.has_hashtags && !plain.has_links);
    }

    #[test]
    fn test_keyword_position_is_char_based() {
        let pos = KeywordPosition::of("Café Rust Tutorial", "nothing", "rust");
        assert_eq!(pos.title_position, Some(5));
        assert!(pos.in_title);
        assert!(!pos.in_description);
        assert_eq!(pos.description_position, None);
    }

    #[test]
    fn test_sentences() {
        assert_eq!(
            sentences("First one. Second!\nThird?  "),
            vec!["First one", "Second", "Third"]
        );
    }
}
