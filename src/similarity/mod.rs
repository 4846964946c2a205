// Similarity-Based Error Clustering
//
// Error lines that differ only in timestamps, identifiers or counts should land
// in one group without a fixed error taxonomy. Each core message becomes a
// TF-IDF vector over the corpus of all core messages; two messages are linked
// when their cosine similarity reaches the configured threshold, and every
// connected component of that graph is one error group.
//
// The graph stays implicit: similarity is computed on demand from sparse
// vectors, and traversal keeps a visited array sized to the entry count.

mod clusterer;
mod graph;
mod tfidf;

pub use clusterer::{ErrorGroup, SimilarityClusterer};
pub use graph::{connected_components, Similarity, SimilarityMatrix};
pub use tfidf::{SparseVector, TfidfModel, TfidfVectorizer};
