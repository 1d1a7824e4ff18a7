pub mod extract;

use krawl_core::tokenizer::tokenize;
use krawl_core::{Config, DocumentTermProfile, Index, IndexStore, StoreError, TermFrequency};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum IndexingError {
    #[error("document root {} does not exist", path.display())]
    RootNotFound { path: PathBuf },

    #[error("document root {} is not a directory", path.display())]
    NotADirectory { path: PathBuf },

    #[error("cannot resolve the current directory")]
    CurrentDir(#[source] std::io::Error),

    #[error("failed while walking the document root")]
    Walk(#[from] walkdir::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Content could not be read for a supported format. Never escapes the walk.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("cannot read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexReport {
    /// Regular files visited, whether or not they produced terms.
    pub files_processed: usize,
    /// Files that ended up with a profile in the index.
    pub documents_indexed: usize,
}

/// Builds an index from a document root and hands it to the store.
pub struct Indexer {
    root: PathBuf,
    store: IndexStore,
}

impl Indexer {
    pub fn new(config: &Config) -> Self {
        Self { root: config.docs_root.clone(), store: IndexStore::new(config) }
    }

    /// Walk, build and save. A walk failure returns before anything is
    /// written, leaving any previous index file untouched.
    pub fn run(&self) -> Result<IndexReport, IndexingError> {
        let (index, report) = build_index(&self.root)?;
        self.store.save(&index)?;
        Ok(report)
    }
}

/// Walk `root` recursively and profile every regular file in it.
pub fn build_index(root: &Path) -> Result<(Index, IndexReport), IndexingError> {
    let root = absolute_root(root)?;
    if !root.exists() {
        return Err(IndexingError::RootNotFound { path: root });
    }
    if !root.is_dir() {
        return Err(IndexingError::NotADirectory { path: root });
    }
    tracing::info!(root = %root.display(), "indexing documents");

    let mut report = IndexReport::default();
    let mut documents = Vec::new();
    // Paths are stored lossily, so distinct non-UTF-8 paths can collide.
    let mut stored_paths: HashSet<String> = HashSet::new();
    for entry in WalkDir::new(&root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        report.files_processed += 1;
        if entry.path().to_str().is_none() {
            tracing::warn!(
                path = %entry.path().display(),
                "path is not valid UTF-8, storing it lossily"
            );
        }
        let Some(profile) = profile_file(entry.path()) else { continue };
        if !stored_paths.insert(profile.path.clone()) {
            tracing::warn!(
                path = %entry.path().display(),
                stored = %profile.path,
                "path collides with an already indexed file once made UTF-8, skipping"
            );
            continue;
        }
        documents.push(profile);
    }
    report.documents_indexed = documents.len();

    tracing::info!(
        files = report.files_processed,
        documents = report.documents_indexed,
        "ingested documents"
    );
    Ok((Index::from_documents(documents), report))
}

/// Extract, tokenize and count one file. `None` when it yields no terms.
pub fn profile_file(path: &Path) -> Option<DocumentTermProfile> {
    tracing::debug!(path = %path.display(), "processing file");
    let tokens = tokenize(&extract::extract_file(path));
    if tokens.is_empty() {
        return None;
    }
    Some(DocumentTermProfile::new(path.to_string_lossy(), count_terms(tokens)))
}

/// Occurrence counts per distinct term, ordered by term.
pub fn count_terms<I>(tokens: I) -> Vec<TermFrequency>
where
    I: IntoIterator<Item = String>,
{
    let mut counts: BTreeMap<String, u32> = BTreeMap::new();
    for token in tokens {
        *counts.entry(token).or_insert(0) += 1;
    }
    counts.into_iter().map(|(term, freq)| TermFrequency { term, freq }).collect()
}

fn absolute_root(root: &Path) -> Result<PathBuf, IndexingError> {
    if root.is_absolute() {
        return Ok(root.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(IndexingError::CurrentDir)?;
    Ok(cwd.join(root))
}
