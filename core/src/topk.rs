use crate::matrix::FrequencyMatrix;
use crate::scoring::WeightedMatrix;
use crate::{DocId, RankedResult, Relevance};

/// Similarity of an empty slot; below any real score.
const SENTINEL: f64 = -0.1;

/// Cosine similarity against an implicit all-ones query vector of
/// `term_count` dimensions. A zero numerator scores zero without dividing.
pub fn cosine(weights: &[f64], term_count: usize) -> f64 {
    let sum: f64 = weights.iter().sum();
    if sum == 0.0 {
        return 0.0;
    }
    let norm = weights.iter().map(|w| w * w).sum::<f64>().sqrt();
    sum / (norm * (term_count as f64).sqrt())
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    similarity: f64,
    doc_id: Option<DocId>,
}

/// Fixed-size ranked list with linear insertion. A candidate only enters when
/// it beats the last slot, and never passes an equal score already ranked.
#[derive(Debug)]
pub struct TopKSelector {
    slots: Vec<Slot>,
}

impl TopKSelector {
    pub fn new(k: usize) -> Self {
        Self { slots: vec![Slot { similarity: SENTINEL, doc_id: None }; k] }
    }

    /// Returns whether the candidate was placed.
    pub fn offer(&mut self, doc_id: DocId, similarity: f64) -> bool {
        let Some(last) = self.slots.last() else { return false };
        if !(similarity > last.similarity) {
            return false;
        }
        let mut j = self.slots.len() - 1;
        while j > 0 && self.slots[j - 1].similarity < similarity {
            self.slots[j] = self.slots[j - 1];
            j -= 1;
        }
        self.slots[j] = Slot { similarity, doc_id: Some(doc_id) };
        true
    }

    /// Occupied slots in rank order; sentinels are dropped.
    pub fn finalists(&self) -> Vec<(DocId, f64)> {
        self.slots.iter().filter_map(|s| s.doc_id.map(|id| (id, s.similarity))).collect()
    }
}

/// Ranks every weighted document and returns at most `k` results. Documents
/// are offered in ascending id order, so on equal similarity the lower id wins.
pub fn select(weighted: &WeightedMatrix, matrix: &FrequencyMatrix, k: usize) -> Vec<RankedResult> {
    let term_count = matrix.term_count();
    // No more slots than candidates can ever fill.
    let mut selector = TopKSelector::new(k.min(weighted.rows.len()));
    for (&doc_id, weights) in &weighted.rows {
        selector.offer(doc_id, cosine(weights, term_count));
    }

    let finalists = selector.finalists();
    tracing::debug!(k, ?finalists, "selected top-k");
    finalists
        .into_iter()
        .filter_map(|(doc_id, similarity)| {
            let document = matrix.document(doc_id)?.clone();
            Some(RankedResult {
                similarity,
                doc_id,
                document,
                relevance: Relevance::Unjudged,
                relative_terms: matrix.relative_terms(doc_id),
            })
        })
        .collect()
}
