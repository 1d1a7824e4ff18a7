use std::path::PathBuf;

pub const DEFAULT_INDEX_FILE: &str = "index.json";
pub const DEFAULT_DOCS_ROOT: &str = "./docs";
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Locations and limits shared by the indexer, the store and the search engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory walked by the indexer.
    pub docs_root: PathBuf,
    /// JSON file the index is written to and loaded from.
    pub index_file: PathBuf,
    /// Upper bound on the number of ranked results per query.
    pub max_results: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            docs_root: PathBuf::from(DEFAULT_DOCS_ROOT),
            index_file: PathBuf::from(DEFAULT_INDEX_FILE),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

impl Config {
    pub fn with_docs_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.docs_root = root.into();
        self
    }

    pub fn with_index_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.index_file = file.into();
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }
}
