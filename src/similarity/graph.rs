use super::tfidf::TfidfModel;

/// Pairwise similarity over an indexed set of items
///
/// The similarity graph is never materialized: an edge between `i` and `j`
/// exists iff `similarity(i, j) >= threshold`.
pub trait Similarity {
    fn len(&self) -> usize;

    fn similarity(&self, i: usize, j: usize) -> f64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Similarity for TfidfModel {
    fn len(&self) -> usize {
        self.vectors().len()
    }

    fn similarity(&self, i: usize, j: usize) -> f64 {
        self.cosine(i, j)
    }
}

/// Dense, precomputed similarity matrix
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    size: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// Build an `size x size` matrix from a pairwise function
    pub fn from_fn(size: usize, f: impl Fn(usize, usize) -> f64) -> Self {
        let mut values = Vec::with_capacity(size * size);
        for i in 0..size {
            for j in 0..size {
                values.push(f(i, j));
            }
        }
        Self { size, values }
    }

    /// Materialize every pair of `source`
    pub fn from_similarity<S: Similarity + ?Sized>(source: &S) -> Self {
        Self::from_fn(source.len(), |i, j| source.similarity(i, j))
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.size..(i + 1) * self.size]
    }
}

impl Similarity for SimilarityMatrix {
    fn len(&self) -> usize {
        self.size
    }

    fn similarity(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.size + j]
    }
}

/// Connected components of the thresholded similarity graph
///
/// Seeds are taken in ascending index order, so the first member of every
/// component is its lowest index. Traversal is depth-first with an explicit
/// stack; members appear in the order they are popped and marked visited.
pub fn connected_components<S: Similarity + ?Sized>(source: &S, threshold: f64) -> Vec<Vec<usize>> {
    let n = source.len();
    let mut visited = vec![false; n];
    let mut components = Vec::new();

    for seed in 0..n {
        if visited[seed] {
            continue;
        }

        let mut component = Vec::new();
        let mut stack = vec![seed];

        while let Some(idx) = stack.pop() {
            if visited[idx] {
                continue;
            }
            visited[idx] = true;
            component.push(idx);

            for j in 0..n {
                if !visited[j] && source.similarity(idx, j) >= threshold {
                    stack.push(j);
                }
            }
        }

        components.push(component);
    }

    components
}
