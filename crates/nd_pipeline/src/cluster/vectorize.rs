//! TF-IDF vectorization over a small per-request corpus.

use std::collections::{BTreeMap, HashMap, HashSet};

use lazy_static::lazy_static;
use ndarray::Array2;
use regex::Regex;

lazy_static! {
    static ref TOKEN_RE: Regex = Regex::new(r"[a-z0-9]+").unwrap();
}

/// Lowercased word tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    TOKEN_RE
        .find_iter(&text.to_lowercase())
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Build a TF-IDF matrix (documents x vocabulary).
///
/// Vocabulary order is alphabetical, IDF is smoothed
/// (`ln(n / (1 + df)) + 1`) and rows are L2-normalized, so identical
/// input always yields an identical matrix.
pub fn vectorize(texts: &[&str]) -> Array2<f64> {
    let tokenized: Vec<Vec<String>> = texts.iter().map(|t| tokenize(t)).collect();
    let n_docs = tokenized.len();

    // Document frequencies; BTreeMap gives the alphabetical vocabulary.
    let mut doc_freq: BTreeMap<String, usize> = BTreeMap::new();
    for doc in &tokenized {
        let unique: HashSet<&String> = doc.iter().collect();
        for term in unique {
            *doc_freq.entry(term.clone()).or_insert(0) += 1;
        }
    }

    let vocabulary: HashMap<&str, usize> = doc_freq
        .keys()
        .enumerate()
        .map(|(idx, term)| (term.as_str(), idx))
        .collect();
    let idf: Vec<f64> = doc_freq
        .values()
        .map(|&df| (n_docs as f64 / (1.0 + df as f64)).ln() + 1.0)
        .collect();

    let mut matrix = Array2::zeros((n_docs, vocabulary.len()));
    for (doc_idx, doc) in tokenized.iter().enumerate() {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for term in doc {
            *counts.entry(term.as_str()).or_insert(0) += 1;
        }
        for (term, count) in counts {
            if let Some(&term_idx) = vocabulary.get(term) {
                matrix[[doc_idx, term_idx]] = count as f64 * idf[term_idx];
            }
        }
    }

    // L2-normalize each row; all-zero rows stay zero.
    for mut row in matrix.rows_mut() {
        let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            row.mapv_inplace(|v| v / norm);
        }
    }

    matrix
}
