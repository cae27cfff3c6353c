use crate::store::{DocumentStore, PostingsStore};
use crate::{DocId, DocumentRecord, Error, FrequencyVector, Result};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Raw term frequencies for every document matched by at least one query term.
#[derive(Debug, Default)]
pub struct FrequencyMatrix {
    pub terms: Vec<String>,
    /// Keyed by document id so iteration order is deterministic.
    pub rows: BTreeMap<DocId, FrequencyVector>,
    /// Loaded records in the order their documents were first encountered.
    pub documents: Vec<Arc<DocumentRecord>>,
    positions: HashMap<DocId, usize>,
}

impl FrequencyMatrix {
    pub fn new(terms: Vec<String>, rows: BTreeMap<DocId, FrequencyVector>, documents: Vec<Arc<DocumentRecord>>) -> Self {
        let positions = documents.iter().enumerate().map(|(i, d)| (d.doc_id, i)).collect();
        Self { terms, rows, documents, positions }
    }

    pub fn is_empty(&self) -> bool { self.rows.is_empty() }
    /// Size of the matched set, the `N` used for IDF.
    pub fn len(&self) -> usize { self.rows.len() }
    pub fn term_count(&self) -> usize { self.terms.len() }

    pub fn document(&self, doc_id: DocId) -> Option<&Arc<DocumentRecord>> {
        self.positions.get(&doc_id).map(|&i| &self.documents[i])
    }

    /// Query terms whose raw frequency in `doc_id` is nonzero, by position.
    pub fn relative_terms(&self, doc_id: DocId) -> Vec<String> {
        let Some(row) = self.rows.get(&doc_id) else { return Vec::new() };
        row.iter()
            .zip(&self.terms)
            .filter(|(freq, _)| **freq != 0)
            .map(|(_, term)| term.clone())
            .collect()
    }
}

pub struct FrequencyMatrixBuilder<'a, P: ?Sized, D: ?Sized> {
    postings: &'a P,
    documents: &'a D,
}

impl<'a, P, D> FrequencyMatrixBuilder<'a, P, D>
where
    P: PostingsStore + ?Sized,
    D: DocumentStore + ?Sized,
{
    pub fn new(postings: &'a P, documents: &'a D) -> Self { Self { postings, documents } }

    /// Merges the postings of every term into per-document vectors. Duplicate
    /// terms keep separate positions, and each document is loaded once, when
    /// its vector is created.
    pub fn build(&self, terms: &[String]) -> Result<FrequencyMatrix> {
        let width = terms.len();
        let mut rows: BTreeMap<DocId, FrequencyVector> = BTreeMap::new();
        let mut documents = Vec::new();

        for (pos, term) in terms.iter().enumerate() {
            for posting in self.postings.lookup(term)? {
                let row = match rows.entry(posting.doc_id) {
                    Entry::Occupied(e) => e.into_mut(),
                    Entry::Vacant(e) => {
                        documents.push(Arc::new(self.load(posting.doc_id)?));
                        e.insert(vec![0; width])
                    }
                };
                row[pos] = posting.frequency;
            }
        }

        tracing::debug!(terms = width, matched = rows.len(), "built frequency matrix");
        Ok(FrequencyMatrix::new(terms.to_vec(), rows, documents))
    }

    fn load(&self, doc_id: DocId) -> Result<DocumentRecord> {
        self.documents.load(doc_id).inspect_err(|e| {
            if matches!(e, Error::NotFound(_)) {
                tracing::warn!(doc_id, "posting references a document with no record");
            }
        })
    }
}
