//! Filesystem store over the layout the crawler writes:
//! `words/<term>` holds one `"<doc_id> <frequency>"` line per posting, and
//! `documents/<doc_id>` holds word count, url and title lines followed by one
//! body term per line.

use crate::store::{DocumentStore, PostingsStore};
use crate::{DocId, DocumentRecord, Error, Posting, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct StorePaths {
    pub root: PathBuf,
}

impl StorePaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    pub fn words_dir(&self) -> PathBuf { self.root.join("words") }
    pub fn documents_dir(&self) -> PathBuf { self.root.join("documents") }

    /// `None` when the term cannot name a single file inside `words/`.
    fn postings(&self, term: &str) -> Option<PathBuf> {
        let unsafe_name = term.is_empty()
            || term == "."
            || term == ".."
            || term.contains(['/', '\\', '\0']);
        if unsafe_name { None } else { Some(self.words_dir().join(term)) }
    }
    fn document(&self, doc_id: DocId) -> PathBuf { self.documents_dir().join(doc_id.to_string()) }
}

pub fn load_postings_for_term(paths: &StorePaths, term: &str) -> Result<Vec<Posting>> {
    let Some(file) = paths.postings(term) else { return Ok(Vec::new()) };
    match fs::read_to_string(&file) {
        Ok(text) => parse_postings(&file, &text),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

pub fn load_document(paths: &StorePaths, doc_id: DocId) -> Result<DocumentRecord> {
    let file = paths.document(doc_id);
    match fs::read_to_string(&file) {
        Ok(text) => parse_document(&file, doc_id, &text),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(Error::NotFound(doc_id)),
        Err(e) => Err(e.into()),
    }
}

pub fn parse_postings(path: &Path, text: &str) -> Result<Vec<Posting>> {
    let mut postings = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() { continue; }
        let malformed = |reason: &str| Error::Malformed { path: path.to_path_buf(), line: idx + 1, reason: reason.to_string() };
        let mut fields = line.split_whitespace();
        let (Some(id), Some(freq), None) = (fields.next(), fields.next(), fields.next()) else {
            return Err(malformed("expected \"<doc_id> <frequency>\""));
        };
        let doc_id = id.parse::<DocId>().map_err(|_| malformed("document id is not an integer"))?;
        let frequency = freq.parse::<u32>().map_err(|_| malformed("frequency is not an integer"))?;
        postings.push(Posting { doc_id, frequency });
    }
    Ok(postings)
}

pub fn parse_document(path: &Path, doc_id: DocId, text: &str) -> Result<DocumentRecord> {
    let malformed = |line: usize, reason: &str| Error::Malformed { path: path.to_path_buf(), line, reason: reason.to_string() };
    let mut lines = text.lines();
    let word_count = lines
        .next()
        .ok_or_else(|| malformed(1, "missing word count"))?
        .trim()
        .parse::<u32>()
        .map_err(|_| malformed(1, "word count is not an integer"))?;
    // Titles may legitimately be blank, so header lines are taken as-is.
    let url = lines.next().ok_or_else(|| malformed(2, "missing url"))?.to_string();
    let title = lines.next().ok_or_else(|| malformed(3, "missing title"))?.to_string();
    let body_terms = lines.filter(|l| !l.trim().is_empty()).map(str::to_string).collect();
    Ok(DocumentRecord { doc_id, word_count, url, title, body_terms })
}

/// Both stores backed by one data directory.
#[derive(Debug, Clone)]
pub struct FsStore {
    paths: StorePaths,
}

impl FsStore {
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        let paths = StorePaths::new(root);
        for dir in [paths.words_dir(), paths.documents_dir()] {
            if !dir.is_dir() {
                return Err(Error::Io(std::io::Error::new(ErrorKind::NotFound, format!("{} is not a directory", dir.display()))));
            }
        }
        tracing::debug!(root = %paths.root.display(), "opened store");
        Ok(Self { paths })
    }

    pub fn paths(&self) -> &StorePaths { &self.paths }
}

impl PostingsStore for FsStore {
    fn lookup(&self, term: &str) -> Result<Vec<Posting>> { load_postings_for_term(&self.paths, term) }
}

impl DocumentStore for FsStore {
    fn load(&self, doc_id: DocId) -> Result<DocumentRecord> { load_document(&self.paths, doc_id) }
}
