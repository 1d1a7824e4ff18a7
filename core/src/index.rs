use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A normalized token as produced by [`crate::tokenizer::tokenize`].
pub type Term = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermFrequency {
    pub term: Term,
    pub freq: u32,
}

impl TermFrequency {
    pub fn new(term: impl Into<Term>, freq: u32) -> Self {
        Self { term: term.into(), freq }
    }
}

/// All term counts for one indexed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentTermProfile {
    /// Absolute path of the source file.
    #[serde(rename = "file")]
    pub path: String,
    #[serde(rename = "termFreq")]
    pub terms: Vec<TermFrequency>,
}

impl DocumentTermProfile {
    pub fn new(path: impl Into<String>, terms: Vec<TermFrequency>) -> Self {
        Self { path: path.into(), terms }
    }
}

/// Ordered collection of document profiles; the unit of persistence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Index {
    pub documents: Vec<DocumentTermProfile>,
}

impl Index {
    pub fn new() -> Self { Self::default() }

    pub fn from_documents(documents: Vec<DocumentTermProfile>) -> Self {
        Self { documents }
    }

    pub fn len(&self) -> usize { self.documents.len() }

    pub fn is_empty(&self) -> bool { self.documents.is_empty() }

    /// Checks the structural invariants: unique paths, unique terms per
    /// profile, and no zero frequencies. Returns a description of the first
    /// violation found.
    pub fn validate(&self) -> Result<(), String> {
        let mut paths = HashSet::with_capacity(self.documents.len());
        for doc in &self.documents {
            if !paths.insert(doc.path.as_str()) {
                return Err(format!("duplicate document path {:?}", doc.path));
            }
            let mut terms = HashSet::with_capacity(doc.terms.len());
            for tf in &doc.terms {
                if !terms.insert(tf.term.as_str()) {
                    return Err(format!("duplicate term {:?} in {:?}", tf.term, doc.path));
                }
                if tf.freq == 0 {
                    return Err(format!("zero frequency for term {:?} in {:?}", tf.term, doc.path));
                }
            }
        }
        Ok(())
    }
}

/// One ranked hit for a query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub path: String,
    pub score: f64,
}
