//! Consolidation: fold per-page Result Files into one synthetic PDF.
//!
//! ## Steps
//!
//! 1. Check every precondition (inputs, output directory, text files)
//!    before touching anything.
//! 2. Order `*.txt` files by the first run of digits in the file stem, so
//!    `page_2` precedes `page_10`. Files without digits go last; ties break
//!    by file name.
//! 3. Append one text page per file.
//! 4. Read every page back and delete those whose text is blank. The check
//!    runs after layout, because layout can turn non-empty input (a lone tab,
//!    stray CRs) into a page without glyphs.
//! 5. Save `<stem>_synthetic_test_data.pdf`, then delete the text files.
//!
//! Deleting the text files is the last step: if saving fails, they are
//! still on disk and the command can be re-run.

use crate::backend::{PdfBackend, TextPdfWriter};
use crate::config::SynthConfig;
use crate::engine::PdfiumBackend;
use crate::error::SynthError;
use crate::output::ConsolidationReport;
use crate::pipeline::input;
use crate::pipeline::layout::{layout_page, TextBox, FONT_SIZE};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Work for one document, fully validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsolidationPlan {
    pub stem: String,
    /// Text files in page order.
    pub text_files: Vec<PathBuf>,
    pub output_path: PathBuf,
}

/// Consolidate with pdfium. Preconditions are checked before pdfium is bound.
pub fn consolidate(config: &SynthConfig) -> Result<Vec<ConsolidationReport>, SynthError> {
    let plans = plan_consolidation(config)?;
    let backend = PdfiumBackend::bind()?;
    run_plans(&plans, &backend)
}

/// Consolidate with a caller-supplied backend.
pub fn consolidate_with<B: PdfBackend + ?Sized>(
    config: &SynthConfig,
    backend: &B,
) -> Result<Vec<ConsolidationReport>, SynthError> {
    let plans = plan_consolidation(config)?;
    run_plans(&plans, backend)
}

/// Validate preconditions and list the work for every document.
///
/// The flat layout requires exactly one input PDF and reads text files from
/// the output directory itself; the per-document layout reads each
/// document's subdirectory.
pub fn plan_consolidation(config: &SynthConfig) -> Result<Vec<ConsolidationPlan>, SynthError> {
    let docs = input::resolve_inputs(&config.input_dir, config.layout)?;

    if !config.output_dir.is_dir() {
        return Err(SynthError::OutputDirMissing {
            path: config.output_dir.clone(),
        });
    }

    docs.into_iter()
        .map(|doc| {
            let dir = config.result_dir(&doc.stem);
            let text_files = collect_text_files(&dir)?;
            if text_files.is_empty() {
                return Err(SynthError::NoResultFiles { dir });
            }
            Ok(ConsolidationPlan {
                output_path: config.synthetic_pdf_path(&doc.stem),
                stem: doc.stem,
                text_files,
            })
        })
        .collect()
}

fn run_plans<B: PdfBackend + ?Sized>(
    plans: &[ConsolidationPlan],
    backend: &B,
) -> Result<Vec<ConsolidationReport>, SynthError> {
    plans
        .iter()
        .map(|plan| consolidate_document(plan, backend))
        .collect()
}

fn consolidate_document<B: PdfBackend + ?Sized>(
    plan: &ConsolidationPlan,
    backend: &B,
) -> Result<ConsolidationReport, SynthError> {
    info!(
        "Consolidating {} text file(s) for {}",
        plan.text_files.len(),
        plan.stem
    );
    let mut pdf = backend.new_text_pdf()?;
    let text_box = TextBox::standard();
    let mut clipped_lines = 0;

    for path in &plan.text_files {
        let text = std::fs::read_to_string(path).map_err(|source| SynthError::ReadFailed {
            path: path.clone(),
            source,
        })?;
        let layout = layout_page(&text, &text_box, FONT_SIZE);
        if layout.clipped > 0 {
            warn!(
                "{}: {} line(s) do not fit on the page and were dropped",
                path.display(),
                layout.clipped
            );
            clipped_lines += layout.clipped;
        }
        pdf.append_page(&layout)?;
    }

    let pages_dropped = remove_empty_pages(pdf.as_mut())?;
    let pages_written = pdf.page_count();

    if let Some(parent) = plan.output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| SynthError::WriteFailed {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    pdf.save(&plan.output_path)?;
    drop(pdf);

    for path in &plan.text_files {
        std::fs::remove_file(path).map_err(|source| SynthError::RemoveFailed {
            path: path.clone(),
            source,
        })?;
    }

    info!(
        "Wrote {} ({} page(s), {} empty page(s) dropped)",
        plan.output_path.display(),
        pages_written,
        pages_dropped
    );

    Ok(ConsolidationReport {
        stem: plan.stem.clone(),
        output_path: plan.output_path.clone(),
        text_files: plan.text_files.clone(),
        pages_written,
        pages_dropped,
        clipped_lines,
    })
}

/// Delete every page whose extracted text is blank. Returns how many.
pub fn remove_empty_pages<W: TextPdfWriter + ?Sized>(pdf: &mut W) -> Result<usize, SynthError> {
    let mut empty = Vec::new();
    for index in 0..pdf.page_count() {
        if pdf.page_text(index)?.trim().is_empty() {
            empty.push(index);
        }
    }
    for &index in empty.iter().rev() {
        debug!("Removing empty page {}", index + 1);
        pdf.delete_page(index)?;
    }
    Ok(empty.len())
}

/// `*.txt` regular files directly inside `dir`, in page order.
///
/// A missing directory yields an empty list.
pub fn collect_text_files(dir: &Path) -> Result<Vec<PathBuf>, SynthError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let entries = std::fs::read_dir(dir).map_err(|source| SynthError::ReadFailed {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| SynthError::ReadFailed {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "txt") {
            files.push(path);
        }
    }
    files.sort_by_cached_key(|p| page_sort_key(p));
    Ok(files)
}

static RE_FIRST_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

/// Orders Result Files by the first integer in their stem.
///
/// The integer is compared by value without parsing, so runs of any length
/// order correctly. Stems without digits rank after every numbered file;
/// ties break by file name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct PageSortKey {
    unnumbered: bool,
    /// Digit count once leading zeros are stripped.
    magnitude: usize,
    digits: String,
    name: String,
}

pub fn page_sort_key(path: &Path) -> PageSortKey {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    match RE_FIRST_DIGITS.find(&stem) {
        Some(m) => {
            let digits = m.as_str().trim_start_matches('0').to_string();
            PageSortKey {
                unnumbered: false,
                magnitude: digits.len(),
                digits,
                name,
            }
        }
        None => PageSortKey {
            unnumbered: true,
            magnitude: 0,
            digits: String::new(),
            name,
        },
    }
}
