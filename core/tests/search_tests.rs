use searchcore::{DocId, DocumentRecord, EngineConfig, Judgments, MemoryStore, PostingsStore, Relevance, SearchEngine};
use std::collections::BTreeSet;

fn doc(doc_id: DocId, word_count: u32, body: &[&str]) -> DocumentRecord {
    DocumentRecord {
        doc_id,
        word_count,
        url: format!("https://example.com/{doc_id}"),
        title: format!("Doc {doc_id}"),
        body_terms: body.iter().map(|s| s.to_string()).collect(),
    }
}

fn terms(q: &str) -> Vec<String> { q.split_whitespace().map(str::to_string).collect() }

/// Five pages about pets with varying term mixes.
fn pets() -> MemoryStore {
    let store = MemoryStore::new();
    for (term, doc_id, freq) in [
        ("cat", 1, 4), ("cat", 2, 1), ("cat", 5, 2),
        ("dog", 2, 3), ("dog", 3, 5),
        ("bird", 4, 2), ("bird", 5, 1),
    ] {
        store.insert_posting(term, doc_id, freq);
    }
    store.insert_document(doc(1, 20, &["cat", "food"]));
    store.insert_document(doc(2, 10, &["cat", "dog", "park"]));
    store.insert_document(doc(3, 50, &["dog", "leash"]));
    store.insert_document(doc(4, 8, &["bird", "seed"]));
    store.insert_document(doc(5, 30, &["cat", "bird"]));
    store
}

#[test]
fn worked_scenario_all_weights_zero() {
    let store = MemoryStore::new();
    store.insert_posting("cat", 1, 3);
    store.insert_posting("dog", 1, 2);
    store.insert_document(doc(1, 10, &["cat", "dog"]));
    let engine = SearchEngine::new(&store, &store, EngineConfig::default());

    let results = engine.search(&terms("cat dog"), Some(1)).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].doc_id, 1);
    assert_eq!(results[0].similarity, 0.0);
    assert_eq!(results[0].relative_terms, vec!["cat", "dog"]);
    assert_eq!(results[0].relevance, Relevance::Unjudged);
}

#[test]
fn term_in_every_matched_document_collapses_to_zero() {
    let store = MemoryStore::new();
    store.insert_posting("cat", 1, 3);
    store.insert_posting("cat", 2, 1);
    store.insert_document(doc(1, 10, &["cat"]));
    store.insert_document(doc(2, 10, &["cat"]));
    let engine = SearchEngine::new(&store, &store, EngineConfig::default());

    let results = engine.search(&terms("cat"), None).unwrap();
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.similarity == 0.0));
    // equal scores rank the lower id first
    assert_eq!(results[0].doc_id, 1);
    assert_eq!(results[1].doc_id, 2);
}

#[test]
fn results_are_bounded_sorted_and_in_range() {
    let store = pets();
    let engine = SearchEngine::new(&store, &store, EngineConfig::default());
    for k in 1..=6 {
        let results = engine.search(&terms("cat dog bird"), Some(k)).unwrap();
        assert!(results.len() <= k);
        assert_eq!(results.len(), k.min(5));
        for pair in results.windows(2) {
            assert!(pair[0].similarity >= pair[1].similarity);
        }
        for r in &results {
            assert!(r.similarity >= 0.0 && r.similarity <= 1.0 + 1e-9);
        }
    }

    // more than five matches: the configured default of 5 caps the list
    store.insert_posting("cat", 6, 1);
    store.insert_document(doc(6, 12, &["cat"]));
    let results = engine.search(&terms("cat dog bird"), None).unwrap();
    assert_eq!(results.len(), 5);
    for pair in results.windows(2) {
        assert!(pair[0].similarity >= pair[1].similarity);
    }
}

#[test]
fn huge_k_returns_every_match() {
    let store = MemoryStore::new();
    store.insert_posting("cat", 1, 3);
    store.insert_document(doc(1, 10, &["cat"]));
    let engine = SearchEngine::new(&store, &store, EngineConfig::default());

    let results = engine.search(&terms("cat"), Some(usize::MAX)).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].doc_id, 1);

    let results = sorted_pet_hits(usize::MAX);
    assert_eq!(results, vec![1, 2, 3, 5]);
}

fn sorted_pet_hits(k: usize) -> Vec<DocId> {
    let store = pets();
    let engine = SearchEngine::new(&store, &store, EngineConfig::default());
    let mut ids: Vec<DocId> = engine.search(&terms("cat dog"), Some(k)).unwrap().iter().map(|r| r.doc_id).collect();
    ids.sort();
    ids
}

#[test]
fn single_term_documents_rank_above_mixed_ones() {
    let store = pets();
    let engine = SearchEngine::new(&store, &store, EngineConfig::default());
    let results = engine.search(&terms("cat dog"), Some(5)).unwrap();
    // docs 1, 3 and 5 each match one term: cosine = 1/sqrt(2)
    // doc 2 matches both with unequal weights and scores higher
    assert_eq!(results.len(), 4);
    assert_eq!(results[0].doc_id, 2);
    assert!(results[0].similarity > results[1].similarity);
    assert_eq!(results[0].relative_terms, vec!["cat", "dog"]);
    let rest: BTreeSet<DocId> = results[1..].iter().map(|r| r.doc_id).collect();
    assert_eq!(rest, BTreeSet::from([1, 3, 5]));
    for r in &results[1..] {
        assert!((r.similarity - 1.0 / 2f64.sqrt()).abs() < 1e-12);
        assert_eq!(r.relative_terms.len(), 1);
    }
}

#[test]
fn relative_terms_have_nonzero_frequency() {
    let store = pets();
    let engine = SearchEngine::new(&store, &store, EngineConfig::default());
    let query = terms("bird cat zebra");
    for r in engine.search(&query, Some(5)).unwrap() {
        for t in &r.relative_terms {
            let postings = store.lookup(t).unwrap();
            assert!(postings.iter().any(|p| p.doc_id == r.doc_id && p.frequency > 0));
        }
        assert!(!r.relative_terms.contains(&"zebra".to_string()));
    }
}

#[test]
fn search_is_idempotent() {
    let store = pets();
    let engine = SearchEngine::new(&store, &store, EngineConfig::default());
    let a = engine.search(&terms("cat bird"), Some(3)).unwrap();
    let b = engine.search(&terms("cat bird"), Some(3)).unwrap();
    let key = |rs: &[searchcore::RankedResult]| rs.iter().map(|r| (r.doc_id, r.similarity)).collect::<Vec<_>>();
    assert_eq!(key(&a), key(&b));
}

#[test]
fn unmatched_terms_yield_empty_results() {
    let store = pets();
    let engine = SearchEngine::new(&store, &store, EngineConfig::default());
    assert!(engine.search(&terms("zebra giraffe"), Some(5)).unwrap().is_empty());
}

#[test]
fn dangling_posting_fails_the_request() {
    let store = pets();
    store.insert_posting("ghost", 99, 1);
    let engine = SearchEngine::new(&store, &store, EngineConfig::default());
    assert!(matches!(engine.search(&terms("ghost"), Some(5)), Err(searchcore::Error::NotFound(99))));
}

#[test]
fn feedback_scenario() {
    let store = MemoryStore::new();
    store.insert_document(doc(1, 3, &["cat", "dog", "dog"]));
    store.insert_document(doc(2, 2, &["cat", "bird"]));
    let engine = SearchEngine::new(&store, &store, EngineConfig::default());
    let expanded = engine.feedback("cat", &BTreeSet::from([1]), &BTreeSet::from([2])).unwrap();
    assert_eq!(expanded, "cat dog");
}

#[test]
fn feedback_without_judgments_returns_query() {
    let store = MemoryStore::new();
    let engine = SearchEngine::new(&store, &store, EngineConfig::default());
    assert_eq!(engine.feedback("cat dog", &BTreeSet::new(), &BTreeSet::new()).unwrap(), "cat dog");
}

#[test]
fn refine_searches_the_expanded_query() {
    let store = pets();
    let engine = SearchEngine::new(&store, &store, EngineConfig::default());
    let mut results = engine.search(&terms("dog"), Some(5)).unwrap();
    for r in results.iter_mut() {
        r.relevance = if r.doc_id == 2 { Relevance::Relevant } else { Relevance::NonRelevant };
    }
    let judgments = Judgments::from_results(&results);
    assert_eq!(judgments.relevant, BTreeSet::from([2]));
    assert_eq!(judgments.non_relevant, BTreeSet::from([3]));

    // dog: 1 + 0.75 - 0.25 = 1.5; cat, park: 0.75; leash: -0.25
    let refined = engine.refine("dog", &judgments, Some(5)).unwrap();
    assert_eq!(refined.expanded_query, "dog cat park");
    assert!(refined.results.iter().any(|r| r.doc_id == 1));
    assert!(refined.results.iter().all(|r| !r.relative_terms.contains(&"park".to_string())));
}
