//! Run reports returned by [`crate::extract`] and [`crate::consolidate`].
//!
//! On disk, an empty Result File means either "the page has no fields" or
//! "the model returned nothing". The reports keep those apart with a tagged
//! [`PageOutcome`], and they serialise to JSON for the CLI's `--json` mode.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What the extractor did with one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageOutcome {
    /// A Result File already existed; nothing was rendered or generated.
    Resumed,
    /// The page has no widgets; an empty Result File was written.
    NoFields,
    /// The model was called; `chars` is the length of the written text.
    Generated { chars: usize },
}

impl PageOutcome {
    pub fn called_model(&self) -> bool {
        matches!(self, PageOutcome::Generated { .. })
    }
}

/// Outcome for a single page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRecord {
    /// 1-indexed page number.
    pub page_num: usize,
    pub outcome: PageOutcome,
    /// Screenshot written for this page, if it was rendered.
    pub screenshot: Option<PathBuf>,
}

/// Per-document extraction summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentReport {
    /// Input file name, e.g. `w9.pdf`.
    pub name: String,
    /// File stem used to namespace outputs.
    pub stem: String,
    pub total_pages: usize,
    pub pages: Vec<PageRecord>,
}

impl DocumentReport {
    fn count(&self, f: impl Fn(&PageOutcome) -> bool) -> usize {
        self.pages.iter().filter(|p| f(&p.outcome)).count()
    }

    pub fn generated(&self) -> usize {
        self.count(PageOutcome::called_model)
    }

    pub fn no_fields(&self) -> usize {
        self.count(|o| *o == PageOutcome::NoFields)
    }

    pub fn resumed(&self) -> usize {
        self.count(|o| *o == PageOutcome::Resumed)
    }

    /// Pages where the model was called but returned no text.
    pub fn empty_responses(&self) -> usize {
        self.count(|o| *o == PageOutcome::Generated { chars: 0 })
    }
}

/// Result of one extraction run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub documents: Vec<DocumentReport>,
    pub total_duration_ms: u64,
}

impl ExtractionReport {
    /// Total model calls made during the run.
    pub fn model_calls(&self) -> usize {
        self.documents.iter().map(DocumentReport::generated).sum()
    }

    pub fn total_pages(&self) -> usize {
        self.documents.iter().map(|d| d.total_pages).sum()
    }
}

/// Result of consolidating one document's Result Files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsolidationReport {
    /// Stem of the source PDF.
    pub stem: String,
    /// Path of the saved synthetic PDF.
    pub output_path: PathBuf,
    /// Text files consumed (and deleted), in page order.
    pub text_files: Vec<PathBuf>,
    /// Pages left in the saved PDF.
    pub pages_written: usize,
    /// Pages removed because their text was empty after layout.
    pub pages_dropped: usize,
    /// Lines that did not fit their page's text box.
    pub clipped_lines: usize,
}
