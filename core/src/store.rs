//! Read-only repository interfaces over the pre-built index.
//!
//! A request only ever reads through these traits, so any number of requests
//! may run against the same store at once. Rebuilding the backing data while
//! queries are in flight is the caller's problem.

use crate::{DocId, DocumentRecord, Error, Posting, Result};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

pub trait PostingsStore {
    /// Postings for `term`, matched case-sensitively. An unseen term yields an empty list.
    fn lookup(&self, term: &str) -> Result<Vec<Posting>>;
}

pub trait DocumentStore {
    /// Fails with [`Error::NotFound`] when `doc_id` has no backing record.
    fn load(&self, doc_id: DocId) -> Result<DocumentRecord>;
}

impl<T: PostingsStore + ?Sized> PostingsStore for &T {
    fn lookup(&self, term: &str) -> Result<Vec<Posting>> { (**self).lookup(term) }
}

impl<T: PostingsStore + ?Sized> PostingsStore for Arc<T> {
    fn lookup(&self, term: &str) -> Result<Vec<Posting>> { (**self).lookup(term) }
}

impl<T: DocumentStore + ?Sized> DocumentStore for &T {
    fn load(&self, doc_id: DocId) -> Result<DocumentRecord> { (**self).load(doc_id) }
}

impl<T: DocumentStore + ?Sized> DocumentStore for Arc<T> {
    fn load(&self, doc_id: DocId) -> Result<DocumentRecord> { (**self).load(doc_id) }
}

/// In-memory substitute for the on-disk store.
#[derive(Default)]
pub struct MemoryStore {
    postings: RwLock<HashMap<String, Vec<Posting>>>,
    documents: RwLock<HashMap<DocId, DocumentRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }

    /// Appends a posting to `term`'s list, keeping the order of insertion.
    pub fn insert_posting(&self, term: &str, doc_id: DocId, frequency: u32) {
        self.postings
            .write()
            .entry(term.to_string())
            .or_default()
            .push(Posting { doc_id, frequency });
    }

    pub fn insert_document(&self, record: DocumentRecord) {
        self.documents.write().insert(record.doc_id, record);
    }

    pub fn num_documents(&self) -> usize { self.documents.read().len() }
}

impl PostingsStore for MemoryStore {
    fn lookup(&self, term: &str) -> Result<Vec<Posting>> {
        Ok(self.postings.read().get(term).cloned().unwrap_or_default())
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self, doc_id: DocId) -> Result<DocumentRecord> {
        self.documents.read().get(&doc_id).cloned().ok_or(Error::NotFound(doc_id))
    }
}
