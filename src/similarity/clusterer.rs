use super::graph::{connected_components, Similarity};
use super::tfidf::TfidfVectorizer;
use crate::error::Result;
use crate::segmenter::ErrorEntry;
use serde::{Deserialize, Serialize};

/// Error entries judged to be the same underlying error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorGroup {
    /// Core message of the component's lowest-index entry
    pub representative_message: String,
    /// Members in discovery order
    pub members: Vec<ErrorEntry>,
    pub count: usize,
}

impl ErrorGroup {
    fn new(members: Vec<ErrorEntry>) -> Option<Self> {
        let representative_message = members.first()?.core_message.clone();
        Some(Self {
            representative_message,
            count: members.len(),
            members,
        })
    }

    /// Full text of every member, in discovery order
    pub fn details(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|m| m.full_text.as_str())
    }
}

/// Groups error entries by TF-IDF cosine similarity
#[derive(Debug, Clone)]
pub struct SimilarityClusterer {
    vectorizer: TfidfVectorizer,
    threshold: f64,
}

impl SimilarityClusterer {
    pub fn new(threshold: f64) -> Result<Self> {
        Ok(Self {
            vectorizer: TfidfVectorizer::new()?,
            threshold,
        })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Partition `entries` into groups
    ///
    /// The core messages of `entries` form the corpus. No entries yields no
    /// groups; a corpus without a single token cannot be vectorized, so every
    /// entry becomes its own group.
    pub fn cluster(&self, entries: Vec<ErrorEntry>) -> Vec<ErrorGroup> {
        if entries.is_empty() {
            return Vec::new();
        }

        let messages: Vec<&str> = entries.iter().map(|e| e.core_message.as_str()).collect();
        let model = self.vectorizer.fit_transform(&messages);

        let components = if model.vocabulary_size() == 0 {
            tracing::warn!(
                entries = entries.len(),
                "error messages have no terms, skipping similarity grouping"
            );
            (0..entries.len()).map(|i| vec![i]).collect()
        } else {
            connected_components(&model, self.threshold)
        };

        tracing::debug!(
            entries = model.len(),
            vocabulary = model.vocabulary_size(),
            groups = components.len(),
            threshold = self.threshold,
            "clustered error entries"
        );

        let mut slots: Vec<Option<ErrorEntry>> = entries.into_iter().map(Some).collect();
        components
            .into_iter()
            .filter_map(|component| {
                let members = component
                    .into_iter()
                    .filter_map(|idx| slots[idx].take())
                    .collect();
                ErrorGroup::new(members)
            })
            .collect()
    }
}
