//! Error taxonomy shared by the stores and the engine.

use crate::DocId;
use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures surfaced by a search or feedback request.
///
/// An empty match set is not an error (it yields an empty ranked list), and
/// numeric degeneracies such as zero-norm vectors are resolved internally.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Rejected before any store access.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// A posting references a document with no backing record.
    #[error("document {0} not found")]
    NotFound(DocId),
    #[error("malformed record in {}:{line}: {reason}", path.display())]
    Malformed { path: PathBuf, line: usize, reason: String },
    /// Engine config file is not valid JSON for [`crate::EngineConfig`].
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
