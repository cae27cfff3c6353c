//! TF-IDF weighting over the matched-document set.
//!
//! IDF is taken over the documents that matched the query, not the whole
//! collection: `idf[p] = log10(N / df[p])` with `N` the matched count. A term
//! present in every matched document therefore gets weight zero.

use crate::matrix::FrequencyMatrix;
use crate::DocId;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct WeightedMatrix {
    pub idf: Vec<f64>,
    pub rows: BTreeMap<DocId, Vec<f64>>,
}

/// Number of matched documents with a nonzero frequency at each term position.
pub fn document_frequencies(matrix: &FrequencyMatrix) -> Vec<usize> {
    (0..matrix.term_count())
        .map(|pos| matrix.rows.values().filter(|row| row[pos] != 0).count())
        .collect()
}

pub fn inverse_document_frequencies(matrix: &FrequencyMatrix) -> Vec<f64> {
    let n = matrix.len() as f64;
    document_frequencies(matrix)
        .into_iter()
        .map(|df| if df == 0 { 0.0 } else { (n / df as f64).log10() })
        .collect()
}

/// `(raw frequency * idf) / word count` per position; zero frequencies stay zero.
pub fn weigh(matrix: &FrequencyMatrix) -> WeightedMatrix {
    let idf = inverse_document_frequencies(matrix);
    let rows: BTreeMap<DocId, Vec<f64>> = matrix
        .rows
        .iter()
        .map(|(&doc_id, freqs)| {
            let word_count = matrix.document(doc_id).map_or(0, |d| d.word_count);
            let weights: Vec<f64> = freqs
                .iter()
                .zip(&idf)
                .map(|(&freq, &term_idf)| {
                    if freq == 0 || word_count == 0 { 0.0 } else { freq as f64 * term_idf / word_count as f64 }
                })
                .collect();
            (doc_id, weights)
        })
        .collect();
    tracing::debug!(?idf, "weighted frequency matrix");
    WeightedMatrix { idf, rows }
}
