//! Seams between the pipeline and the PDF engine.
//!
//! The extractor needs three things from a document: its page count, a
//! widget count per page, and a PNG rendering of a page. The consolidator
//! needs a fresh document it can append text pages to, read back, prune
//! and save. [`crate::engine::PdfiumBackend`] implements both on top of
//! pdfium; tests implement them in memory.

use crate::error::SynthError;
use crate::pipeline::layout::PageLayout;
use std::path::Path;

/// A read-only input PDF. Page indices are 0-based.
pub trait FormDocument {
    fn page_count(&self) -> usize;

    /// Number of form widgets on the page.
    fn widget_count(&self, page_index: usize) -> Result<usize, SynthError>;

    /// True iff the page has at least one form widget.
    fn has_fields(&self, page_index: usize) -> Result<bool, SynthError> {
        Ok(self.widget_count(page_index)? > 0)
    }

    /// Rasterise the page at `dpi` and write it to `target` as PNG,
    /// creating parent directories and overwriting any existing file.
    fn render_page(&self, page_index: usize, target: &Path, dpi: u32) -> Result<(), SynthError>;
}

/// A new PDF built one text page at a time. Page indices are 0-based.
pub trait TextPdfWriter {
    /// Append a page carrying `layout`.
    fn append_page(&mut self, layout: &PageLayout) -> Result<(), SynthError>;

    fn page_count(&self) -> usize;

    /// Plain text extracted back from the page.
    fn page_text(&self, page_index: usize) -> Result<String, SynthError>;

    fn delete_page(&mut self, page_index: usize) -> Result<(), SynthError>;

    fn save(&mut self, path: &Path) -> Result<(), SynthError>;
}

/// Opens input documents and creates output documents.
pub trait PdfBackend {
    fn open_form<'a>(&'a self, path: &Path) -> Result<Box<dyn FormDocument + 'a>, SynthError>;

    fn new_text_pdf<'a>(&'a self) -> Result<Box<dyn TextPdfWriter + 'a>, SynthError>;
}
