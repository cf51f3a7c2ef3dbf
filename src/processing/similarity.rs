//! TF-IDF cosine similarity between the matched skills and the required skills.
//!
//! Both inputs become one pseudo-document each and the vectorizer is fitted
//! on exactly those two documents. Because the matched skills are a subset
//! of the job skills, the score behaves like a rarity-weighted coverage ratio.

use crate::config::DEFAULT_QUALIFICATION_THRESHOLD;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// Runs of two or more word characters; single letters are not terms.
static TERM: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").unwrap());

/// Term-frequency / inverse-document-frequency vectorizer.
///
/// Lowercases input, uses raw counts for tf, the smoothed idf
/// `ln((1 + n) / (1 + df)) + 1`, and L2-normalizes every row.
#[derive(Debug, Default, Clone)]
pub struct TfidfVectorizer;

#[derive(Debug, Clone, PartialEq)]
pub struct TfidfMatrix {
    pub vocabulary: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

impl TfidfVectorizer {
    pub fn new() -> Self {
        Self
    }

    pub fn tokenize(&self, document: &str) -> Vec<String> {
        let lowered = document.to_lowercase();
        TERM.find_iter(&lowered).map(|m| m.as_str().to_string()).collect()
    }

    pub fn fit_transform(&self, documents: &[&str]) -> TfidfMatrix {
        let counts: Vec<BTreeMap<String, usize>> = documents
            .iter()
            .map(|doc| {
                let mut tf = BTreeMap::new();
                for term in self.tokenize(doc) {
                    *tf.entry(term).or_insert(0) += 1;
                }
                tf
            })
            .collect();

        let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
        for tf in &counts {
            for term in tf.keys() {
                *document_frequency.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        let n = documents.len() as f64;
        let vocabulary: Vec<String> = document_frequency.keys().map(|t| t.to_string()).collect();
        let idf: Vec<f64> = document_frequency
            .values()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let rows = counts
            .iter()
            .map(|tf| {
                let mut row: Vec<f64> = vocabulary
                    .iter()
                    .zip(&idf)
                    .map(|(term, weight)| tf.get(term).copied().unwrap_or(0) as f64 * weight)
                    .collect();
                l2_normalize(&mut row);
                row
            })
            .collect();

        TfidfMatrix { vocabulary, rows }
    }
}

fn l2_normalize(row: &mut [f64]) {
    let norm = row.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > 0.0 {
        row.iter_mut().for_each(|x| *x /= norm);
    }
}

/// Cosine of the angle between two vectors; 0 when either is all zeros.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityVerdict {
    pub similarity_score: f64,
    pub qualified: bool,
}

#[derive(Debug, Clone)]
pub struct SimilarityScorer {
    vectorizer: TfidfVectorizer,
    threshold: f64,
}

impl Default for SimilarityScorer {
    fn default() -> Self {
        Self::new(DEFAULT_QUALIFICATION_THRESHOLD)
    }
}

impl SimilarityScorer {
    pub fn new(threshold: f64) -> Self {
        Self {
            vectorizer: TfidfVectorizer,
            threshold,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Closed comparison: a score equal to the threshold qualifies.
    pub fn is_qualified(&self, similarity_score: f64) -> bool {
        similarity_score >= self.threshold
    }

    pub fn similarity(&self, matched_skills: &[String], job_skills: &[String]) -> f64 {
        let matched_document = matched_skills.join(" ");
        let job_document = job_skills.join(" ");

        let matrix = self
            .vectorizer
            .fit_transform(&[matched_document.as_str(), job_document.as_str()]);

        let score = cosine_similarity(&matrix.rows[0], &matrix.rows[1]).clamp(0.0, 1.0);
        debug!(
            "TF-IDF similarity over {} terms: {:.4}",
            matrix.vocabulary.len(),
            score
        );
        score
    }

    pub fn score(&self, matched_skills: &[String], job_skills: &[String]) -> SimilarityVerdict {
        let similarity_score = self.similarity(matched_skills, job_skills);
        SimilarityVerdict {
            similarity_score,
            qualified: self.is_qualified(similarity_score),
        }
    }
}
