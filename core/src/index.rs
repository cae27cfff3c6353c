use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub type DocId = u32;

/// Raw frequencies indexed by query-term position; one slot per query term.
pub type FrequencyVector = Vec<u32>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub doc_id: DocId,
    pub frequency: u32, // raw occurrence count of the term in the document
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub doc_id: DocId,
    /// Number of words on the page, used as the length normalizer.
    pub word_count: u32,
    pub url: String,
    pub title: String,
    pub body_terms: Vec<String>,
}

/// A caller's judgment of one result, exchanged with the front end as 1 / -1 / 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Relevance {
    Relevant,
    NonRelevant,
    #[default]
    Unjudged,
}

impl From<Relevance> for i8 {
    fn from(r: Relevance) -> i8 {
        match r {
            Relevance::Relevant => 1,
            Relevance::NonRelevant => -1,
            Relevance::Unjudged => 0,
        }
    }
}

impl TryFrom<i8> for Relevance {
    type Error = String;
    fn try_from(v: i8) -> Result<Self, Self::Error> {
        match v {
            1 => Ok(Relevance::Relevant),
            -1 => Ok(Relevance::NonRelevant),
            0 => Ok(Relevance::Unjudged),
            other => Err(format!("relevance must be 1, -1 or 0, got {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedResult {
    pub similarity: f64,
    pub doc_id: DocId,
    pub document: Arc<DocumentRecord>,
    pub relevance: Relevance,
    /// Query terms with a nonzero raw frequency in this document, in query order.
    pub relative_terms: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relevance_uses_front_end_integers() {
        assert_eq!(serde_json::to_string(&Relevance::NonRelevant).unwrap(), "-1");
        let r: Relevance = serde_json::from_str("1").unwrap();
        assert_eq!(r, Relevance::Relevant);
        assert!(serde_json::from_str::<Relevance>("2").is_err());
    }
}
