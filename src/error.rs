//! Error types for the edgequake-formsynth library.
//!
//! Every failure is fatal to the current run. Pages whose Result Files were
//! written before the failure stay on disk, so re-running the same command
//! resumes from the first missing page instead of starting over.
//!
//! Content problems (an empty or malformed model response) are deliberately
//! absent from this enum: they are written through verbatim and never stop
//! the pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the edgequake-formsynth library.
#[derive(Debug, Error)]
pub enum SynthError {
    // ── Configuration errors ──────────────────────────────────────────────
    /// The input directory does not exist.
    #[error("Missing input directory: '{path}'")]
    InputDirMissing { path: PathBuf },

    /// The input directory exists but holds no `.pdf` files.
    #[error("No .pdf files found in: '{dir}'")]
    NoInputPdfs { dir: PathBuf },

    /// More than one PDF where exactly one is required.
    #[error("Multiple PDFs found in '{dir}': {}", names.join(", "))]
    MultiplePdfs { dir: PathBuf, names: Vec<String> },

    /// The output directory does not exist (consolidation only).
    #[error("Missing output directory: '{path}'")]
    OutputDirMissing { path: PathBuf },

    /// No per-page text files to consolidate.
    #[error("No .txt files found in: '{dir}'\nRun `formsynth extract` first.")]
    NoResultFiles { dir: PathBuf },

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── PDF errors ────────────────────────────────────────────────────────
    /// pdfium could not open the document.
    #[error("PDF '{path}' could not be opened: {detail}")]
    CorruptPdf { path: PathBuf, detail: String },

    /// A page could not be loaded or inspected.
    #[error("Could not access page {page}: {detail}")]
    PageAccessFailed { page: usize, detail: String },

    /// pdfium-render returned an error while rasterising a page.
    #[error("Rasterisation failed for page {page}: {detail}")]
    RasterisationFailed { page: usize, detail: String },

    /// The rendered PNG could not be written.
    #[error("Failed to write screenshot '{path}': {detail}")]
    ImageWriteFailed { path: PathBuf, detail: String },

    /// Building or saving the consolidated PDF failed.
    #[error("Failed to build synthetic PDF: {detail}")]
    PdfWriteFailed { detail: String },

    // ── LLM errors ────────────────────────────────────────────────────────
    /// The configured provider is not initialised (missing API key etc.).
    #[error("LLM provider '{provider}' is not configured.\n{hint}")]
    ProviderNotConfigured { provider: String, hint: String },

    /// The LLM API returned an error.
    #[error("LLM API error on page {page}: {message}")]
    LlmApiError { page: usize, message: String },

    /// The LLM call exceeded the configured timeout.
    #[error("LLM call timed out after {secs}s on page {page}")]
    ApiTimeout { page: usize, secs: u64 },

    // ── I/O errors ────────────────────────────────────────────────────────
    #[error("Failed to read '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write '{path}': {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to remove '{path}': {source}")]
    RemoveFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Pdfium binding errors ─────────────────────────────────────────────
    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
You can:\n\
  • Set PDFIUM_LIB_PATH=/path/to/libpdfium to use an existing copy.\n\
  • Place libpdfium next to the working directory.\n\
  • Install pdfium system-wide.\n"
    )]
    PdfiumBindingFailed(String),
}

impl SynthError {
    /// True for the precondition failures detected before any work starts.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            SynthError::InputDirMissing { .. }
                | SynthError::NoInputPdfs { .. }
                | SynthError::MultiplePdfs { .. }
                | SynthError::OutputDirMissing { .. }
                | SynthError::NoResultFiles { .. }
                | SynthError::InvalidConfig(_)
        )
    }
}
