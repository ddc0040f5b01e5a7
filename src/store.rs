//! Result Store: the per-page memo that makes extraction resumable.
//!
//! A page is "done" as soon as its entry exists, whatever the content.
//! Empty content is a valid terminal state. Entries are never re-validated
//! against the current prompt or model.
//!
//! [`FsResultStore`] maps keys to `page_NNN.txt` files; [`MemoryResultStore`]
//! keeps them in a map so orchestration can be tested without a filesystem.

use crate::config::{page_file_stem, SynthConfig};
use crate::error::SynthError;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::debug;

/// Identifies one page's Result File.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageKey {
    /// Document stem; the store decides whether it namespaces by it.
    pub stem: String,
    /// 1-indexed page number.
    pub page_number: usize,
}

impl PageKey {
    pub fn new(stem: impl Into<String>, page_number: usize) -> Self {
        Self {
            stem: stem.into(),
            page_number,
        }
    }
}

/// Keyed storage for per-page results.
pub trait ResultStore {
    /// Whether a result is recorded for `key`.
    fn contains(&self, key: &PageKey) -> bool;

    /// Record `text` for `key`, replacing any previous entry.
    fn write(&mut self, key: &PageKey, text: &str) -> Result<(), SynthError>;
}

/// Filesystem-backed store laid out according to [`SynthConfig::layout`].
#[derive(Debug, Clone)]
pub struct FsResultStore {
    config: SynthConfig,
}

impl FsResultStore {
    pub fn new(config: &SynthConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Path of the Result File for `key`.
    pub fn path_for(&self, key: &PageKey) -> PathBuf {
        self.config
            .result_dir(&key.stem)
            .join(format!("{}.txt", page_file_stem(key.page_number)))
    }
}

impl ResultStore for FsResultStore {
    fn contains(&self, key: &PageKey) -> bool {
        self.path_for(key).exists()
    }

    fn write(&mut self, key: &PageKey, text: &str) -> Result<(), SynthError> {
        let path = self.path_for(key);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| SynthError::WriteFailed {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(&path, text).map_err(|source| SynthError::WriteFailed {
            path: path.clone(),
            source,
        })?;
        debug!("Wrote {} ({} bytes)", path.display(), text.len());
        Ok(())
    }
}

/// In-memory store, ordered by key.
#[derive(Debug, Clone, Default)]
pub struct MemoryResultStore {
    entries: BTreeMap<PageKey, String>,
}

impl MemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&PageKey, &str)> {
        self.entries.iter().map(|(k, v)| (k, v.as_str()))
    }
}

impl ResultStore for MemoryResultStore {
    fn contains(&self, key: &PageKey) -> bool {
        self.entries.contains_key(key)
    }

    fn write(&mut self, key: &PageKey, text: &str) -> Result<(), SynthError> {
        self.entries.insert(key.clone(), text.to_string());
        Ok(())
    }
}
