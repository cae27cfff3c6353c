//! Rocchio-style query expansion from relevance judgments.
//!
//! Every original query term starts at weight 1.0. Each judged-relevant
//! document adds `alpha / |R|` to each of its body terms and each
//! judged-non-relevant document adds `beta / |NR|`. The expanded query is the
//! highest weighted terms above `threshold`, at most `query terms + extra_terms`.

use crate::store::DocumentStore;
use crate::{DocId, Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackParams {
    pub alpha: f64,
    pub beta: f64,
    pub threshold: f64,
    pub extra_terms: usize,
}

impl Default for FeedbackParams {
    fn default() -> Self {
        Self { alpha: 0.75, beta: -0.25, threshold: 0.5, extra_terms: 3 }
    }
}

/// Term weights in first-insertion order.
#[derive(Debug, Default, Clone)]
pub struct TermWeights {
    entries: Vec<(String, f64)>,
    slots: HashMap<String, usize>,
}

impl TermWeights {
    /// Seeds every distinct query term with 1.0.
    pub fn seeded<S: AsRef<str>>(query_terms: &[S]) -> Self {
        let mut table = Self::default();
        for term in query_terms {
            let term = term.as_ref();
            if !table.slots.contains_key(term) {
                table.slots.insert(term.to_string(), table.entries.len());
                table.entries.push((term.to_string(), 1.0));
            }
        }
        table
    }

    /// Absent terms count as 0 before the delta is applied.
    pub fn add(&mut self, term: &str, delta: f64) {
        match self.slots.get(term) {
            Some(&i) => self.entries[i].1 += delta,
            None => {
                self.slots.insert(term.to_string(), self.entries.len());
                self.entries.push((term.to_string(), delta));
            }
        }
    }

    pub fn get(&self, term: &str) -> Option<f64> { self.slots.get(term).map(|&i| self.entries[i].1) }
    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Entries by descending weight; equal weights keep insertion order.
    pub fn ranked(&self) -> Vec<(&str, f64)> {
        let mut ranked: Vec<(&str, f64)> = self.entries.iter().map(|(t, w)| (t.as_str(), *w)).collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }
}

/// Up to `query_len + extra_terms` ranked terms whose weight exceeds the
/// threshold, space separated. The window is clamped to the table size.
pub fn expanded_query(weights: &TermWeights, query_len: usize, params: &FeedbackParams) -> String {
    let window = query_len.saturating_add(params.extra_terms);
    weights
        .ranked()
        .into_iter()
        .take(window)
        .take_while(|(_, w)| *w > params.threshold)
        .map(|(t, _)| t)
        .collect::<Vec<_>>()
        .join(" ")
}

pub struct RelevanceFeedback<'a, D: ?Sized> {
    documents: &'a D,
    params: FeedbackParams,
}

impl<'a, D: DocumentStore + ?Sized> RelevanceFeedback<'a, D> {
    pub fn new(documents: &'a D, params: FeedbackParams) -> Self { Self { documents, params } }

    pub fn weigh(&self, query_terms: &[&str], relevant: &BTreeSet<DocId>, non_relevant: &BTreeSet<DocId>) -> Result<TermWeights> {
        let mut table = TermWeights::seeded(query_terms);
        self.accumulate(&mut table, relevant, self.params.alpha)?;
        self.accumulate(&mut table, non_relevant, self.params.beta)?;
        Ok(table)
    }

    /// Each distinct body term of a document is counted once.
    fn accumulate(&self, table: &mut TermWeights, judged: &BTreeSet<DocId>, constant: f64) -> Result<()> {
        if judged.is_empty() {
            return Ok(());
        }
        let delta = constant / judged.len() as f64;
        for &doc_id in judged {
            let record = self.documents.load(doc_id)?;
            let mut seen = HashSet::new();
            for term in &record.body_terms {
                if seen.insert(term.as_str()) {
                    table.add(term, delta);
                }
            }
        }
        Ok(())
    }

    pub fn expand(&self, query: &str, relevant: &BTreeSet<DocId>, non_relevant: &BTreeSet<DocId>) -> Result<String> {
        let terms: Vec<&str> = query.split_whitespace().collect();
        if terms.is_empty() {
            return Err(Error::InvalidArgument("feedback query is empty"));
        }
        let table = self.weigh(&terms, relevant, non_relevant)?;
        let expanded = expanded_query(&table, terms.len(), &self.params);
        tracing::debug!(candidates = table.len(), %expanded, "ranked feedback terms");
        Ok(expanded)
    }
}
