//! Input discovery: find the PDFs to process.
//!
//! Every precondition here is checked before any page is opened, so a
//! misconfigured run fails without creating a single output file.

use crate::config::OutputLayout;
use crate::error::SynthError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One input PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputDocument {
    pub path: PathBuf,
    /// File name, e.g. `w9.pdf`.
    pub name: String,
    /// File stem, e.g. `w9`. Namespaces per-document outputs.
    pub stem: String,
}

impl InputDocument {
    fn from_path(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, name, stem }
    }
}

/// List `*.pdf` regular files in `dir`, sorted by file name.
///
/// # Errors
/// - [`SynthError::InputDirMissing`] when `dir` does not exist
/// - [`SynthError::NoInputPdfs`] when it holds no PDFs
pub fn discover_pdfs(dir: &Path) -> Result<Vec<InputDocument>, SynthError> {
    if !dir.exists() {
        return Err(SynthError::InputDirMissing {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|source| SynthError::ReadFailed {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| SynthError::ReadFailed {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "pdf") {
            paths.push(path);
        }
    }

    if paths.is_empty() {
        return Err(SynthError::NoInputPdfs {
            dir: dir.to_path_buf(),
        });
    }

    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    debug!("Found {} PDF(s) in {}", paths.len(), dir.display());
    Ok(paths.into_iter().map(InputDocument::from_path).collect())
}

/// Discover inputs and apply the layout's multiplicity rule.
///
/// The flat layout is the single-document variant: two or more PDFs are a
/// conflict, reported with every file name.
pub fn resolve_inputs(dir: &Path, layout: OutputLayout) -> Result<Vec<InputDocument>, SynthError> {
    let docs = discover_pdfs(dir)?;
    if docs.len() > 1 && !layout.allows_multiple_inputs() {
        return Err(SynthError::MultiplePdfs {
            dir: dir.to_path_buf(),
            names: docs.into_iter().map(|d| d.name).collect(),
        });
    }
    Ok(docs)
}
