use crate::error::{LensError, Result};
use regex::Regex;
use std::collections::HashMap;

/// Tokens are runs of two or more word characters
const TOKEN_PATTERN: &str = r"\b\w\w+\b";

/// Sparse vector as `(term index, weight)` pairs sorted by term index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    /// Dot product by merging the two sorted term lists
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;

        while i < self.entries.len() && j < other.entries.len() {
            let (ta, wa) = self.entries[i];
            let (tb, wb) = other.entries[j];
            match ta.cmp(&tb) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += wa * wb;
                    i += 1;
                    j += 1;
                }
            }
        }

        sum
    }

    fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, w) in &mut self.entries {
                *w /= norm;
            }
        }
    }
}

/// TF-IDF vectors for one corpus
///
/// Every vector is L2-normalized, so the cosine similarity of two documents is
/// the dot product of their vectors.
#[derive(Debug, Clone)]
pub struct TfidfModel {
    vectors: Vec<SparseVector>,
    vocabulary: HashMap<String, usize>,
}

impl TfidfModel {
    pub fn vectors(&self) -> &[SparseVector] {
        &self.vectors
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// Cosine similarity between documents `i` and `j`
    ///
    /// A document is always fully similar to itself, even when it has no terms.
    pub fn cosine(&self, i: usize, j: usize) -> f64 {
        if i == j {
            return 1.0;
        }
        self.vectors[i].dot(&self.vectors[j])
    }
}

/// Term-frequency / inverse-document-frequency vectorizer
///
/// Documents are lower-cased before tokenizing. Inverse document frequency is
/// smoothed as `ln((1 + n) / (1 + df)) + 1` so that terms present in every
/// document still carry weight.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    token: Regex,
}

impl TfidfVectorizer {
    pub fn new() -> Result<Self> {
        let token = Regex::new(TOKEN_PATTERN).map_err(|e| LensError::pattern(TOKEN_PATTERN, e))?;
        Ok(Self { token })
    }

    pub fn tokenize(&self, document: &str) -> Vec<String> {
        let lowered = document.to_lowercase();
        self.token
            .find_iter(&lowered)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Build the vocabulary from `documents` and vectorize each of them
    pub fn fit_transform<S: AsRef<str>>(&self, documents: &[S]) -> TfidfModel {
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut term_counts: Vec<HashMap<usize, u32>> = Vec::with_capacity(documents.len());

        for document in documents {
            let mut counts: HashMap<usize, u32> = HashMap::new();
            for token in self.tokenize(document.as_ref()) {
                let next_index = vocabulary.len();
                let index = *vocabulary.entry(token).or_insert(next_index);
                *counts.entry(index).or_insert(0) += 1;
            }
            term_counts.push(counts);
        }

        let mut document_frequency = vec![0u32; vocabulary.len()];
        for counts in &term_counts {
            for &term in counts.keys() {
                document_frequency[term] += 1;
            }
        }

        let n = documents.len() as f64;
        let idf: Vec<f64> = document_frequency
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + f64::from(df))).ln() + 1.0)
            .collect();

        let vectors = term_counts
            .into_iter()
            .map(|counts| {
                let mut entries: Vec<(usize, f64)> = counts
                    .into_iter()
                    .map(|(term, tf)| (term, f64::from(tf) * idf[term]))
                    .collect();
                entries.sort_by_key(|&(term, _)| term);
                let mut vector = SparseVector { entries };
                vector.normalize();
                vector
            })
            .collect();

        TfidfModel {
            vectors,
            vocabulary,
        }
    }
}
