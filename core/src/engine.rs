use crate::config::EngineConfig;
use crate::feedback::RelevanceFeedback;
use crate::matrix::FrequencyMatrixBuilder;
use crate::store::{DocumentStore, PostingsStore};
use crate::{scoring, topk, DocId, Error, RankedResult, Relevance, Result};
use serde::Serialize;
use std::collections::BTreeSet;

/// Relevant and non-relevant document ids collected from a judged result list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Judgments {
    pub relevant: BTreeSet<DocId>,
    pub non_relevant: BTreeSet<DocId>,
}

impl Judgments {
    pub fn from_results(results: &[RankedResult]) -> Self {
        let mut judgments = Self::default();
        for r in results {
            match r.relevance {
                Relevance::Relevant => { judgments.relevant.insert(r.doc_id); }
                Relevance::NonRelevant => { judgments.non_relevant.insert(r.doc_id); }
                Relevance::Unjudged => {}
            }
        }
        judgments
    }
}

#[derive(Debug, Serialize)]
pub struct Refinement {
    pub expanded_query: String,
    pub results: Vec<RankedResult>,
}

/// Query-time entry points over read-only postings and document stores.
/// Nothing here writes, so one engine can serve concurrent requests.
pub struct SearchEngine<P, D> {
    postings: P,
    documents: D,
    config: EngineConfig,
}

impl<P: PostingsStore, D: DocumentStore> SearchEngine<P, D> {
    pub fn new(postings: P, documents: D, config: EngineConfig) -> Self {
        Self { postings, documents, config }
    }

    pub fn config(&self) -> &EngineConfig { &self.config }

    /// Top `k` documents for the ordered `terms` (`None` uses the configured
    /// default). An empty list means no term matched any posting.
    pub fn search(&self, terms: &[String], k: Option<usize>) -> Result<Vec<RankedResult>> {
        let k = k.unwrap_or(self.config.default_k);
        if terms.is_empty() {
            return Err(Error::InvalidArgument("query has no terms"));
        }
        if k == 0 {
            return Err(Error::InvalidArgument("k must be positive"));
        }

        let matrix = FrequencyMatrixBuilder::new(&self.postings, &self.documents).build(terms)?;
        if matrix.is_empty() {
            tracing::info!(?terms, k, hits = 0, "search");
            return Ok(Vec::new());
        }
        let weighted = scoring::weigh(&matrix);
        let results = topk::select(&weighted, &matrix, k);
        tracing::info!(?terms, k, matched = matrix.len(), hits = results.len(), "search");
        Ok(results)
    }

    /// Expanded query string from Rocchio reweighting of the judged documents.
    pub fn feedback(&self, query: &str, relevant: &BTreeSet<DocId>, non_relevant: &BTreeSet<DocId>) -> Result<String> {
        let expanded = RelevanceFeedback::new(&self.documents, self.config.feedback).expand(query, relevant, non_relevant)?;
        tracing::info!(query, relevant = relevant.len(), non_relevant = non_relevant.len(), %expanded, "feedback");
        Ok(expanded)
    }

    /// Feedback followed by a search on the expanded query. Falls back to the
    /// original terms when nothing survives the threshold.
    pub fn refine(&self, query: &str, judgments: &Judgments, k: Option<usize>) -> Result<Refinement> {
        let expanded_query = self.feedback(query, &judgments.relevant, &judgments.non_relevant)?;
        let source = if expanded_query.is_empty() { query } else { expanded_query.as_str() };
        let terms: Vec<String> = source.split_whitespace().map(str::to_string).collect();
        let results = self.search(&terms, k)?;
        Ok(Refinement { expanded_query, results })
    }
}
