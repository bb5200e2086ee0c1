//! TF-IDF vectorization over unigrams and bigrams.

use super::text;
use crate::error::{Result, SeoError};
use std::collections::HashMap;

/// Dense document-term matrix with L2-normalized rows.
#[derive(Debug, Clone)]
pub struct TfidfMatrix {
    /// Terms in column order (alphabetical).
    pub vocabulary: Vec<String>,
    /// One row per input document.
    pub rows: Vec<Vec<f64>>,
}

impl TfidfMatrix {
    /// Column index of a term.
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.vocabulary.binary_search_by(|t| t.as_str().cmp(term)).ok()
    }

    /// Values of one term across all documents.
    pub fn column(&self, index: usize) -> Vec<f64> {
        self.rows.iter().map(|row| row[index]).collect()
    }
}

/// Vectorizer configuration.
#[derive(Debug, Clone, Copy)]
pub struct TfidfVectorizer {
    max_features: usize,
}

impl TfidfVectorizer {
    pub fn new(max_features: usize) -> Self {
        Self { max_features }
    }

    /// Learn the vocabulary of `documents` and return their TF-IDF rows.
    ///
    /// Fails when no document contains a usable term.
    pub fn fit_transform<S: AsRef<str>>(&self, documents: &[S]) -> Result<TfidfMatrix> {
        let counts: Vec<HashMap<String, usize>> = documents
            .iter()
            .map(|doc| count_ngrams(doc.as_ref()))
            .collect();

        let mut corpus_freq: HashMap<&str, usize> = HashMap::new();
        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for doc in &counts {
            for (term, &n) in doc {
                *corpus_freq.entry(term.as_str()).or_default() += n;
                *doc_freq.entry(term.as_str()).or_default() += 1;
            }
        }

        if corpus_freq.is_empty() {
            return Err(SeoError::Analysis(
                "empty vocabulary; perhaps the documents only contain stop words".to_string(),
            ));
        }

        let mut ranked: Vec<(&str, usize)> = corpus_freq.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(self.max_features.max(1));

        let mut vocabulary: Vec<String> = ranked.into_iter().map(|(t, _)| t.to_string()).collect();
        vocabulary.sort();

        let n_docs = documents.len() as f64;
        let idf: Vec<f64> = vocabulary
            .iter()
            .map(|term| {
                let df = doc_freq.get(term.as_str()).copied().unwrap_or(0) as f64;
                ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let rows = counts
            .iter()
            .map(|doc| {
                let mut row: Vec<f64> = vocabulary
                    .iter()
                    .zip(&idf)
                    .map(|(term, idf)| doc.get(term).copied().unwrap_or(0) as f64 * idf)
                    .collect();
                let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
                if norm > 0.0 {
                    row.iter_mut().for_each(|v| *v /= norm);
                }
                row
            })
            .collect();

        Ok(TfidfMatrix { vocabulary, rows })
    }
}

/// Unigram and bigram counts of a document after stopword removal.
fn count_ngrams(document: &str) -> HashMap<String, usize> {
    let tokens = text::terms(document);
    let mut counts = HashMap::new();
    for token in &tokens {
        *counts.entry(token.clone()).or_default() += 1;
    }
    for pair in tokens.windows(2) {
        *counts.entry(format!("{} {}", pair[0], pair[1])).or_default() += 1;
    }
    counts
}

/// Cosine similarity of two equally sized vectors; 0 when either is all zeros.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}
