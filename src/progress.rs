//! Progress-callback trait for per-page extraction events.
//!
//! Inject an [`Arc<dyn ExtractionProgressCallback>`] via
//! [`crate::config::SynthConfigBuilder::progress_callback`] to receive events
//! as the extractor walks each document. The CLI uses this to drive an
//! `indicatif` progress bar; tests use it to count model calls per outcome.
//!
//! # Example
//!
//! ```rust
//! use edgequake_formsynth::{ExtractionProgressCallback, SynthConfig};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     generated: AtomicUsize,
//! }
//!
//! impl ExtractionProgressCallback for CountingCallback {
//!     fn on_page_generated(&self, _doc: &str, _page: usize, _total: usize, _chars: usize) {
//!         self.generated.fetch_add(1, Ordering::SeqCst);
//!     }
//! }
//!
//! let counter = Arc::new(CountingCallback { generated: AtomicUsize::new(0) });
//! let config = SynthConfig::builder()
//!     .progress_callback(counter as Arc<dyn ExtractionProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use crate::output::ExtractionReport;
use std::sync::Arc;

/// Called by the extractor as it processes each page.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. Page numbers are 1-indexed.
pub trait ExtractionProgressCallback: Send + Sync {
    /// Called once after input discovery, before any document is opened.
    fn on_extraction_start(&self, total_documents: usize) {
        let _ = total_documents;
    }

    /// Called when a document has been opened and its page count is known.
    fn on_document_start(&self, document: &str, total_pages: usize) {
        let _ = (document, total_pages);
    }

    /// The page already had a Result File and was skipped.
    fn on_page_resumed(&self, document: &str, page_num: usize, total_pages: usize) {
        let _ = (document, page_num, total_pages);
    }

    /// The page has no widgets; an empty Result File was written.
    fn on_page_no_fields(&self, document: &str, page_num: usize, total_pages: usize) {
        let _ = (document, page_num, total_pages);
    }

    /// The model is about to be called for this page.
    fn on_page_start(&self, document: &str, page_num: usize, total_pages: usize) {
        let _ = (document, page_num, total_pages);
    }

    /// The model returned and its text was written.
    ///
    /// `chars` is the character count of the written text; 0 means the model
    /// returned no output.
    fn on_page_generated(&self, document: &str, page_num: usize, total_pages: usize, chars: usize) {
        let _ = (document, page_num, total_pages, chars);
    }

    /// Called once per document after its last page.
    fn on_document_complete(&self, document: &str, generated: usize, total_pages: usize) {
        let _ = (document, generated, total_pages);
    }

    /// Called once after every document finished. Not called when the run
    /// aborts with an error.
    fn on_extraction_complete(&self, report: &ExtractionReport) {
        let _ = report;
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ExtractionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::SynthConfig`].
pub type ProgressCallback = Arc<dyn ExtractionProgressCallback>;
