//! Extraction: decide, render, generate, persist, one page at a time.
//!
//! ```text
//! for each PDF (sorted by name)
//!   for each page
//!     Result File exists?  ── yes ──▶ skip (resume)
//!     │ no
//!     has widgets?         ── no ───▶ write empty Result File
//!     │ yes
//!     render PNG ──▶ model call ──▶ write returned text
//! ```
//!
//! Only the Result File decides whether a page is done. A page whose
//! Result File exists is never re-rendered or re-generated, even if the
//! prompt or model changed since it was written. Any failure aborts the
//! run; pages finished before it keep their Result Files, so the next run
//! resumes at the first missing one.

use crate::backend::PdfBackend;
use crate::config::SynthConfig;
use crate::engine::PdfiumBackend;
use crate::error::SynthError;
use crate::output::{DocumentReport, ExtractionReport, PageOutcome, PageRecord};
use crate::pipeline::input::{self, InputDocument};
use crate::pipeline::llm::{FieldGenerator, VisionGenerator};
use crate::store::{FsResultStore, PageKey, ResultStore};
use std::time::Instant;
use tracing::{debug, info};

/// Run extraction over `config.input_dir` with pdfium, the configured LLM
/// provider, and Result Files on disk.
///
/// Input preconditions are checked before pdfium is bound or a provider is
/// resolved, so a misconfigured directory fails fast and creates nothing.
///
/// The open document is held across each model call and pdfium documents
/// are not `Send`, so the returned future is not `Send` either. Await it on
/// the current task (`#[tokio::main]`, `block_on`, or a `LocalSet`) rather
/// than passing it to `tokio::spawn`.
pub async fn extract(config: &SynthConfig) -> Result<ExtractionReport, SynthError> {
    let inputs = input::resolve_inputs(&config.input_dir, config.layout)?;
    let backend = PdfiumBackend::bind()?;
    let generator = VisionGenerator::from_config(config)?;
    let mut store = FsResultStore::new(config);
    extract_documents(config, &inputs, &backend, &generator, &mut store).await
}

/// Run extraction with caller-supplied collaborators.
///
/// Like [`extract`], the returned future is not `Send`.
pub async fn extract_with<B, G, S>(
    config: &SynthConfig,
    backend: &B,
    generator: &G,
    store: &mut S,
) -> Result<ExtractionReport, SynthError>
where
    B: PdfBackend + ?Sized,
    G: FieldGenerator + ?Sized,
    S: ResultStore + ?Sized,
{
    let inputs = input::resolve_inputs(&config.input_dir, config.layout)?;
    extract_documents(config, &inputs, backend, generator, store).await
}

async fn extract_documents<B, G, S>(
    config: &SynthConfig,
    inputs: &[InputDocument],
    backend: &B,
    generator: &G,
    store: &mut S,
) -> Result<ExtractionReport, SynthError>
where
    B: PdfBackend + ?Sized,
    G: FieldGenerator + ?Sized,
    S: ResultStore + ?Sized,
{
    let start = Instant::now();
    if let Some(ref cb) = config.progress_callback {
        cb.on_extraction_start(inputs.len());
    }

    let mut documents = Vec::with_capacity(inputs.len());
    for doc in inputs {
        documents.push(extract_document(config, doc, backend, generator, store).await?);
    }

    let report = ExtractionReport {
        documents,
        total_duration_ms: start.elapsed().as_millis() as u64,
    };
    info!(
        "Extraction complete: {} document(s), {} page(s), {} model call(s), {}ms",
        report.documents.len(),
        report.total_pages(),
        report.model_calls(),
        report.total_duration_ms
    );
    if let Some(ref cb) = config.progress_callback {
        cb.on_extraction_complete(&report);
    }
    Ok(report)
}

async fn extract_document<B, G, S>(
    config: &SynthConfig,
    doc: &InputDocument,
    backend: &B,
    generator: &G,
    store: &mut S,
) -> Result<DocumentReport, SynthError>
where
    B: PdfBackend + ?Sized,
    G: FieldGenerator + ?Sized,
    S: ResultStore + ?Sized,
{
    info!("Processing: {}", doc.name);
    let form = backend.open_form(&doc.path)?;
    let total_pages = form.page_count();
    let cb = config.progress_callback.as_ref();
    if let Some(cb) = cb {
        cb.on_document_start(&doc.name, total_pages);
    }

    let mut pages = Vec::with_capacity(total_pages);
    for page_index in 0..total_pages {
        let page_num = page_index + 1;
        let key = PageKey::new(doc.stem.as_str(), page_num);

        if store.contains(&key) {
            debug!("{} page {}: Result File present, skipping", doc.name, page_num);
            if let Some(cb) = cb {
                cb.on_page_resumed(&doc.name, page_num, total_pages);
            }
            pages.push(PageRecord {
                page_num,
                outcome: PageOutcome::Resumed,
                screenshot: None,
            });
            continue;
        }

        if !form.has_fields(page_index)? {
            debug!("{} page {}: no form fields", doc.name, page_num);
            store.write(&key, "")?;
            if let Some(cb) = cb {
                cb.on_page_no_fields(&doc.name, page_num, total_pages);
            }
            pages.push(PageRecord {
                page_num,
                outcome: PageOutcome::NoFields,
                screenshot: None,
            });
            continue;
        }

        let screenshot = config.screenshot_path(&doc.stem, page_num);
        form.render_page(page_index, &screenshot, config.dpi)?;
        let png = std::fs::read(&screenshot).map_err(|source| SynthError::ReadFailed {
            path: screenshot.clone(),
            source,
        })?;

        if let Some(cb) = cb {
            cb.on_page_start(&doc.name, page_num, total_pages);
        }
        let text = generator.generate(page_num, &png, &config.prompt).await?;
        store.write(&key, &text)?;

        let chars = text.chars().count();
        debug!("{} page {}: generated {} chars", doc.name, page_num, chars);
        if let Some(cb) = cb {
            cb.on_page_generated(&doc.name, page_num, total_pages, chars);
        }
        pages.push(PageRecord {
            page_num,
            outcome: PageOutcome::Generated { chars },
            screenshot: Some(screenshot),
        });
    }

    let report = DocumentReport {
        name: doc.name.clone(),
        stem: doc.stem.clone(),
        total_pages,
        pages,
    };
    if let Some(cb) = cb {
        cb.on_document_complete(&doc.name, report.generated(), total_pages);
    }
    Ok(report)
}
