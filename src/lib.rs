//! # edgequake-formsynth
//!
//! Generate synthetic test data for PDF forms using Vision Language Models.
//!
//! Each page that carries fillable form fields is rendered to a PNG and shown
//! to a vision model, which answers with `Field Name: Value` lines of
//! fictional but realistic values. The per-page answers are then gathered
//! into a new PDF, one page of text per form page.
//!
//! ## Pipeline Overview
//!
//! ```text
//! put_your_pdf_here/*.pdf
//!  │
//!  ├─ extract      per page: skip if done ─▶ no widgets? empty file
//!  │                                     └─▶ render PNG ─▶ VLM ─▶ page_NNN.txt
//!  │
//!  └─ consolidate  page_NNN.txt (numeric order) ─▶ text pages ─▶ drop blank pages
//!                  ─▶ <stem>_synthetic_test_data.pdf, text files removed
//! ```
//!
//! Extraction is resumable: a page whose `page_NNN.txt` exists is never
//! processed again, so an interrupted run continues where it stopped.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use edgequake_formsynth::{consolidate, extract, SynthConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Provider auto-detected from OPENAI_API_KEY / ANTHROPIC_API_KEY / …
//!     let config = SynthConfig::builder().base_dir(".").build()?;
//!     let report = extract(&config).await?;
//!     eprintln!("{} model calls", report.model_calls());
//!     for doc in consolidate(&config)? {
//!         println!("{}", doc.output_path.display());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `formsynth` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod backend;
pub mod config;
pub mod consolidate;
pub mod engine;
pub mod error;
pub mod extract;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod prompts;
pub mod store;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use backend::{FormDocument, PdfBackend, TextPdfWriter};
pub use config::{OutputLayout, SynthConfig, SynthConfigBuilder};
pub use consolidate::{consolidate, consolidate_with};
pub use engine::PdfiumBackend;
pub use error::SynthError;
pub use extract::{extract, extract_with};
pub use output::{ConsolidationReport, DocumentReport, ExtractionReport, PageOutcome, PageRecord};
pub use pipeline::llm::{FieldGenerator, VisionGenerator};
pub use progress::{ExtractionProgressCallback, NoopProgressCallback, ProgressCallback};
pub use store::{FsResultStore, MemoryResultStore, PageKey, ResultStore};
