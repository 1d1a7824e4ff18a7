use crate::persist::IndexStore;
use crate::tokenizer::tokenize;
use crate::{Config, Index, SearchResult, StoreError};
use std::collections::{HashMap, HashSet};

/// What a query produced.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The query contained no usable terms.
    EmptyQuery,
    /// No document holds any of the query terms.
    NoResults,
    /// Documents ordered by descending score, truncated to the result limit.
    Ranked { results: Vec<SearchResult>, total_hits: usize },
}

/// Ranks documents of a loaded index against free-text queries.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    index: Index,
    limit: usize,
}

impl SearchEngine {
    pub fn new(index: Index, limit: usize) -> Self {
        Self { index, limit }
    }

    /// Load the index through `store` once for the lifetime of the engine.
    pub fn open(store: &IndexStore, config: &Config) -> Result<Self, StoreError> {
        let index = store.load()?;
        Ok(Self::new(index, config.max_results))
    }

    pub fn index(&self) -> &Index { &self.index }

    pub fn search(&self, query: &str) -> SearchOutcome {
        search(&self.index, query, self.limit)
    }
}

/// Score every document in `index` against `query` and keep the best `limit`.
///
/// Each (document, matching term) pair is one contribution carrying that
/// term's frequency. A document's score is the sum of its frequencies divided
/// by the number of contributions across the whole index.
pub fn search(index: &Index, query: &str, limit: usize) -> SearchOutcome {
    let q_terms: HashSet<String> = tokenize(query).into_iter().collect();
    if q_terms.is_empty() {
        return SearchOutcome::EmptyQuery;
    }

    // Encounter order of documents, for tie-breaking.
    let mut order: Vec<&str> = Vec::new();
    let mut freq_sums: HashMap<&str, u64> = HashMap::new();
    let mut contributions: u64 = 0;
    for doc in &index.documents {
        for tf in doc.terms.iter().filter(|tf| q_terms.contains(&tf.term)) {
            let sum = freq_sums.entry(doc.path.as_str()).or_insert_with(|| {
                order.push(doc.path.as_str());
                0
            });
            *sum += u64::from(tf.freq);
            contributions += 1;
        }
    }
    if contributions == 0 {
        return SearchOutcome::NoResults;
    }

    let total = contributions as f64;
    let mut scored: Vec<SearchResult> = order
        .into_iter()
        .map(|path| SearchResult { path: path.to_string(), score: freq_sums[path] as f64 / total })
        .collect();
    // stable: equal scores keep encounter order
    scored.sort_by(|a, b| {
        b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal)
    });
    let total_hits = scored.len();
    scored.truncate(limit);

    tracing::debug!(query, terms = q_terms.len(), contributions, total_hits, "scored query");
    SearchOutcome::Ranked { results: scored, total_hits }
}
