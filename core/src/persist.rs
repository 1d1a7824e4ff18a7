use crate::{Config, DocumentTermProfile, Index, StoreError};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs::{self, create_dir_all, File};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

/// On-disk layout: `{"tf": [...], "idf": [...]}`. `idf` has always been an
/// exact copy of `tf`; it is still written so existing readers keep working.
#[derive(Serialize)]
struct IndexFileRef<'a> {
    tf: &'a [DocumentTermProfile],
    idf: &'a [DocumentTermProfile],
}

#[derive(Deserialize)]
struct IndexFile {
    tf: Vec<DocumentTermProfile>,
    #[serde(default)]
    #[allow(dead_code)]
    idf: Vec<DocumentTermProfile>,
}

/// Whole-file JSON persistence for an [`Index`].
#[derive(Debug, Clone)]
pub struct IndexStore {
    path: PathBuf,
}

impl IndexStore {
    pub fn new(config: &Config) -> Self {
        Self::at(&config.index_file)
    }

    pub fn at<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path { &self.path }

    fn tmp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn io_err(&self, source: std::io::Error) -> StoreError {
        StoreError::Io { path: self.path.clone(), source }
    }

    /// Write the index, replacing any existing file. The JSON goes to a
    /// sibling temp file first and is renamed into place.
    pub fn save(&self, index: &Index) -> Result<(), StoreError> {
        let body = IndexFileRef { tf: &index.documents, idf: &index.documents };
        let bytes = serde_json::to_vec(&body).map_err(StoreError::Encode)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            create_dir_all(parent).map_err(|e| self.io_err(e))?;
        }
        let tmp = self.tmp_path();
        let written = File::create(&tmp)
            .and_then(|mut f| {
                f.write_all(&bytes)?;
                f.sync_all()
            })
            .and_then(|_| fs::rename(&tmp, &self.path));
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp);
            return Err(self.io_err(e));
        }

        tracing::info!(
            path = %self.path.display(),
            documents = index.len(),
            bytes = bytes.len(),
            "saved index"
        );
        Ok(())
    }

    pub fn load(&self) -> Result<Index, StoreError> {
        let mut f = File::open(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => StoreError::NotFound { path: self.path.clone() },
            _ => self.io_err(e),
        })?;
        let mut buf = String::new();
        f.read_to_string(&mut buf).map_err(|e| self.io_err(e))?;

        let file: IndexFile = serde_json::from_str(&buf)
            .map_err(|source| StoreError::Schema { path: self.path.clone(), source })?;
        let index = Index::from_documents(file.tf);
        index
            .validate()
            .map_err(|reason| StoreError::Invalid { path: self.path.clone(), reason })?;

        tracing::info!(path = %self.path.display(), documents = index.len(), "loaded index");
        Ok(index)
    }
}
