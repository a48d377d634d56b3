use super::chunk::Chunk;

/// In-memory nearest-neighbor index over chunk embeddings.
///
/// Built once at startup and read-only afterwards; lookups rank every entry
/// by cosine similarity, which is exact and plenty at this scale.
pub struct VectorIndex {
    entries: Vec<IndexEntry>,
}

struct IndexEntry {
    chunk: Chunk,
    embedding: Vec<f32>,
}

impl VectorIndex {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn insert(&mut self, chunk: Chunk, embedding: Vec<f32>) {
        self.entries.push(IndexEntry { chunk, embedding });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `k` chunks most similar to the query vector, best first
    pub fn search(&self, query: &[f32], k: usize) -> Vec<&Chunk> {
        let mut scored: Vec<(f32, &Chunk)> = self
            .entries
            .iter()
            .map(|entry| (cosine_similarity(query, &entry.embedding), &entry.chunk))
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.into_iter().take(k).map(|(_, chunk)| chunk).collect()
    }
}

/// Cosine similarity between two vectors
///
/// Mismatched dimensions and zero-magnitude vectors score 0.0 rather than
/// poisoning the ranking with NaN.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let magnitude_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let magnitude_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }

    dot_product / (magnitude_a * magnitude_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(text: &str) -> Chunk {
        Chunk {
            text: text.to_string(),
            source: "test.txt".to_string(),
        }
    }

    #[test]
    fn identical_vectors_have_similarity_one() {
        let similarity = cosine_similarity(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]);
        assert!((similarity - 1.0).abs() < 1e-6);
    }

    #[test]
    fn orthogonal_vectors_have_similarity_zero() {
        let similarity = cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]);
        assert!(similarity.abs() < 1e-6);
    }

    #[test]
    fn degenerate_vectors_score_zero() {
        assert_eq!(cosine_similarity(&[1.0, 2.0], &[1.0, 2.0, 3.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
    }

    #[test]
    fn search_returns_nearest_first() {
        let mut index = VectorIndex::new();
        index.insert(chunk("east"), vec![1.0, 0.0]);
        index.insert(chunk("north"), vec![0.0, 1.0]);
        index.insert(chunk("northeast"), vec![1.0, 1.0]);

        let results = index.search(&[0.9, 0.1], 2);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].text, "east");
        assert_eq!(results[1].text, "northeast");
    }

    #[test]
    fn search_caps_at_index_size() {
        let mut index = VectorIndex::new();
        index.insert(chunk("only"), vec![1.0]);

        assert_eq!(index.search(&[1.0], 5).len(), 1);
    }

    #[test]
    fn empty_index_returns_nothing() {
        let index = VectorIndex::new();
        assert!(index.search(&[1.0, 2.0], 3).is_empty());
        assert!(index.is_empty());
    }
}
