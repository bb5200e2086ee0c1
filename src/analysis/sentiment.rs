//! Lexicon and rule-based sentiment scoring.
//!
//! Scores come from the VADER model: every word carries a valence from the
//! full VADER lexicon, adjusted by intensifiers, negations, capitalization
//! and punctuation, then normalized into a compound score in [-1, 1].

use serde::{Deserialize, Serialize};
use vader_sentiment::SentimentIntensityAnalyzer;

/// Polarity proportions and compound score of a text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentScores {
    pub neg: f64,
    pub neu: f64,
    pub pos: f64,
    pub compound: f64,
}

impl SentimentScores {
    /// Component-wise mean; all zero for an empty slice.
    pub fn mean(scores: &[SentimentScores]) -> Self {
        if scores.is_empty() {
            return Self::default();
        }
        let n = scores.len() as f64;
        let sum = scores.iter().fold(Self::default(), |acc, s| Self {
            neg: acc.neg + s.neg,
            neu: acc.neu + s.neu,
            pos: acc.pos + s.pos,
            compound: acc.compound + s.compound,
        });
        Self {
            neg: sum.neg / n,
            neu: sum.neu / n,
            pos: sum.pos / n,
            compound: sum.compound / n,
        }
    }
}

/// Score a text. Blank text scores all zero.
pub fn polarity_scores(text: &str) -> SentimentScores {
    if text.trim().is_empty() {
        return SentimentScores::default();
    }

    let analyzer = SentimentIntensityAnalyzer::new();
    let scores = analyzer.polarity_scores(text);
    let get = |key: &str| scores.get(key).copied().unwrap_or(0.0);

    SentimentScores {
        neg: round_to(get("neg"), 3),
        neu: round_to(get("neu"), 3),
        pos: round_to(get("pos"), 3),
        compound: round_to(get("compound"), 4),
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_sentence() {
        let s = polarity_scores("This video is great");
        // 3.1 / sqrt(3.1^2 + 15)
        assert!((s.compound - 0.6249).abs() < 1e-4);
        assert!((s.pos - 0.577).abs() < 1e-3);
        assert!((s.neu - 0.423).abs() < 1e-3);
        assert_eq!(s.neg, 0.0);
    }

    #[test]
    fn test_negation_flips_polarity() {
        let s = polarity_scores("This video is not great");
        assert!(s.compound < 0.0);
        assert!(s.neg > 0.0);
    }

    #[test]
    fn test_booster_and_caps_intensify() {
        let plain = polarity_scores("the tutorial was good").compound;
        let boosted = polarity_scores("the tutorial was very good").compound;
        let shouted = polarity_scores("the tutorial was GOOD").compound;
        assert!(boosted > plain);
        assert!(shouted > plain);
    }

    #[test]
    fn test_exclamations_amplify() {
        let calm = polarity_scores("great video").compound;
        let excited = polarity_scores("great video!!!").compound;
        assert!(excited > calm);
    }

    #[test]
    fn test_but_shifts_weight() {
        let s = polarity_scores("the intro was bad but the tutorial was great");
        assert!(s.compound > 0.0);
    }

    #[test]
    fn test_neutral_and_empty_text() {
        let s = polarity_scores("the video covers the keyword");
        assert_eq!(s.compound, 0.0);
        assert_eq!(s.neu, 1.0);
        assert_eq!(polarity_scores("   "), SentimentScores::default());
    }

    #[test]
    fn test_realistic_comments() {
        let negative = [
            "This video is garbage and the audio sucks",
            "I hate this, worst explanation ever",
        ];
        for comment in negative {
            let s = polarity_scores(comment);
            assert!(s.compound < 0.0, "{comment}: {s:?}");
        }

        let positive = [
            "Hilarious and insightful, subscribed!",
            "Best tutorial on the topic, thank you so much",
        ];
        for comment in positive {
            let s = polarity_scores(comment);
            assert!(s.compound > 0.0, "{comment}: {s:?}");
        }
    }

    #[test]
    fn test_mean_of_empty_is_zero() {
        assert_eq!(SentimentScores::mean(&[]), SentimentScores::default());
        let avg = SentimentScores::mean(&[
            SentimentScores { neg: 0.0, neu: 0.5, pos: 0.5, compound: 0.6 },
            SentimentScores { neg: 0.5, neu: 0.5, pos: 0.0, compound: -0.2 },
        ]);
        assert!((avg.compound - 0.2).abs() < 1e-9);
        assert!((avg.neg - 0.25).abs() < 1e-9);
    }
}
