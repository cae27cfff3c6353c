//! Query-time ranking and relevance feedback over a pre-built term index.
//!
//! `search` merges the postings of each query term into per-document
//! frequency vectors, weighs them by TF-IDF over the matched set and keeps the
//! top `k` by cosine similarity. `feedback` reweights terms from judged
//! documents and returns an expanded query.

pub mod config;
pub mod engine;
pub mod error;
pub mod feedback;
pub mod index;
pub mod matrix;
pub mod persist;
pub mod scoring;
pub mod store;
pub mod tokenizer;
pub mod topk;

pub use config::EngineConfig;
pub use engine::{Judgments, Refinement, SearchEngine};
pub use error::{Error, Result};
pub use feedback::FeedbackParams;
pub use index::*;
pub use persist::FsStore;
pub use store::{DocumentStore, MemoryStore, PostingsStore};
