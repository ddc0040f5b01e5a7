//! Integration tests for extraction and consolidation.
//!
//! The PDF engine and the vision model are replaced by in-memory fakes, so
//! these tests need neither libpdfium nor an API key. Everything else (the
//! directory layout, Result Files, screenshots, the synthetic PDF path) runs
//! against a real temporary directory.

use async_trait::async_trait;
use edgequake_formsynth::pipeline::layout::PageLayout;
use edgequake_formsynth::{
    consolidate_with, extract_with, ExtractionProgressCallback, ExtractionReport, FieldGenerator,
    FormDocument, FsResultStore, MemoryResultStore, OutputLayout, PageKey, PageOutcome,
    PdfBackend, ResultStore, SynthConfig, SynthError, TextPdfWriter,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

// ── Fakes ────────────────────────────────────────────────────────────────────

const FAKE_PNG: &[u8] = b"\x89PNG\r\n\x1a\nfake";

/// Saved PDFs: output path → page texts after empty-page removal.
type SavedPdfs = Arc<Mutex<HashMap<PathBuf, Vec<String>>>>;

/// Backend whose documents are described by widget counts per page,
/// keyed by input file name.
#[derive(Default)]
struct FakeBackend {
    forms: HashMap<String, Vec<usize>>,
    saved: SavedPdfs,
}

impl FakeBackend {
    fn with_form(mut self, name: &str, widgets: &[usize]) -> Self {
        self.forms.insert(name.to_string(), widgets.to_vec());
        self
    }

    fn saved_pages(&self, path: &Path) -> Option<Vec<String>> {
        self.saved.lock().unwrap().get(path).cloned()
    }
}

struct FakeForm {
    widgets: Vec<usize>,
}

impl FormDocument for FakeForm {
    fn page_count(&self) -> usize {
        self.widgets.len()
    }

    fn widget_count(&self, page_index: usize) -> Result<usize, SynthError> {
        self.widgets
            .get(page_index)
            .copied()
            .ok_or_else(|| SynthError::PageAccessFailed {
                page: page_index + 1,
                detail: "out of range".into(),
            })
    }

    fn render_page(&self, _page_index: usize, target: &Path, _dpi: u32) -> Result<(), SynthError> {
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(target, FAKE_PNG).unwrap();
        Ok(())
    }
}

struct FakeTextPdf {
    pages: Vec<String>,
    saved: SavedPdfs,
}

impl TextPdfWriter for FakeTextPdf {
    fn append_page(&mut self, layout: &PageLayout) -> Result<(), SynthError> {
        self.pages.push(layout.text());
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, page_index: usize) -> Result<String, SynthError> {
        Ok(self.pages[page_index].clone())
    }

    fn delete_page(&mut self, page_index: usize) -> Result<(), SynthError> {
        self.pages.remove(page_index);
        Ok(())
    }

    fn save(&mut self, path: &Path) -> Result<(), SynthError> {
        std::fs::write(path, b"%PDF-1.7 fake").unwrap();
        self.saved
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), self.pages.clone());
        Ok(())
    }
}

impl PdfBackend for FakeBackend {
    fn open_form<'a>(&'a self, path: &Path) -> Result<Box<dyn FormDocument + 'a>, SynthError> {
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        let widgets = self
            .forms
            .get(&name)
            .cloned()
            .ok_or_else(|| SynthError::CorruptPdf {
                path: path.to_path_buf(),
                detail: "unknown fake form".into(),
            })?;
        Ok(Box::new(FakeForm { widgets }))
    }

    fn new_text_pdf<'a>(&'a self) -> Result<Box<dyn TextPdfWriter + 'a>, SynthError> {
        Ok(Box::new(FakeTextPdf {
            pages: Vec::new(),
            saved: Arc::clone(&self.saved),
        }))
    }
}

/// Generator that counts calls and answers with a canned text per page.
struct FakeGenerator {
    calls: AtomicUsize,
    pages_seen: Mutex<Vec<usize>>,
    answers: HashMap<usize, String>,
}

impl FakeGenerator {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            pages_seen: Mutex::new(Vec::new()),
            answers: HashMap::new(),
        }
    }

    fn answer(mut self, page_num: usize, text: &str) -> Self {
        self.answers.insert(page_num, text.to_string());
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FieldGenerator for FakeGenerator {
    async fn generate(&self, page_num: usize, png: &[u8], _prompt: &str) -> Result<String, SynthError> {
        assert_eq!(png, FAKE_PNG, "generator must receive the rendered screenshot");
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.pages_seen.lock().unwrap().push(page_num);
        Ok(self
            .answers
            .get(&page_num)
            .cloned()
            .unwrap_or_else(|| format!("Page Marker: {page_num}\nName: Jane Doe")))
    }
}

/// Generator that fails on one page.
struct FailingGenerator {
    fail_on: usize,
}

#[async_trait]
impl FieldGenerator for FailingGenerator {
    async fn generate(&self, page_num: usize, _png: &[u8], _prompt: &str) -> Result<String, SynthError> {
        if page_num == self.fail_on {
            return Err(SynthError::LlmApiError {
                page: page_num,
                message: "rate limited".into(),
            });
        }
        Ok(format!("Field: value {page_num}"))
    }
}

/// Records every progress event as a short string, in order.
#[derive(Default)]
struct RecordingCallback {
    events: Mutex<Vec<String>>,
}

impl RecordingCallback {
    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }

    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl ExtractionProgressCallback for RecordingCallback {
    fn on_extraction_start(&self, total_documents: usize) {
        self.push(format!("start {total_documents}"));
    }

    fn on_document_start(&self, document: &str, total_pages: usize) {
        self.push(format!("document {document} {total_pages}"));
    }

    fn on_page_resumed(&self, _document: &str, page_num: usize, _total: usize) {
        self.push(format!("resumed {page_num}"));
    }

    fn on_page_no_fields(&self, _document: &str, page_num: usize, _total: usize) {
        self.push(format!("no_fields {page_num}"));
    }

    fn on_page_start(&self, _document: &str, page_num: usize, _total: usize) {
        self.push(format!("calling {page_num}"));
    }

    fn on_page_generated(&self, _document: &str, page_num: usize, _total: usize, chars: usize) {
        self.push(format!("generated {page_num} {chars}"));
    }

    fn on_document_complete(&self, document: &str, generated: usize, total_pages: usize) {
        self.push(format!("done {document} {generated}/{total_pages}"));
    }

    fn on_extraction_complete(&self, report: &ExtractionReport) {
        self.push(format!("complete {}", report.model_calls()));
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn workspace(pdfs: &[&str]) -> TempDir {
    init_tracing();
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("put_your_pdf_here");
    std::fs::create_dir_all(&input).unwrap();
    for name in pdfs {
        std::fs::write(input.join(name), b"%PDF-1.7 fake").unwrap();
    }
    tmp
}

fn config(base: &Path, layout: OutputLayout) -> SynthConfig {
    SynthConfig::builder()
        .base_dir(base)
        .layout(layout)
        .build()
        .unwrap()
}

fn read_dir_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

// ── Extraction ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn three_page_form_end_to_end() {
    let tmp = workspace(&["form.pdf"]);
    let cfg = config(tmp.path(), OutputLayout::Flat);
    let backend = FakeBackend::default().with_form("form.pdf", &[3, 0, 5]);
    let generator = FakeGenerator::new()
        .answer(1, "First Name: Alice\nLast Name: Smith")
        .answer(3, "Signature Date: 2024-03-01");
    let mut store = FsResultStore::new(&cfg);

    let report = extract_with(&cfg, &backend, &generator, &mut store)
        .await
        .unwrap();

    assert_eq!(generator.calls(), 2);
    assert_eq!(*generator.pages_seen.lock().unwrap(), vec![1, 3]);
    let doc = &report.documents[0];
    assert_eq!(doc.total_pages, 3);
    assert_eq!(doc.generated(), 2);
    assert_eq!(doc.no_fields(), 1);
    assert_eq!(doc.pages[1].outcome, PageOutcome::NoFields);

    let out = tmp.path().join("output_pdf");
    assert_eq!(
        read_dir_names(&out),
        ["page_001.txt", "page_002.txt", "page_003.txt"]
    );
    assert_eq!(
        std::fs::read_to_string(out.join("page_001.txt")).unwrap(),
        "First Name: Alice\nLast Name: Smith"
    );
    assert_eq!(std::fs::read_to_string(out.join("page_002.txt")).unwrap(), "");

    let shots = tmp.path().join("screenshots");
    assert_eq!(read_dir_names(&shots), ["page_001.png", "page_003.png"]);

    let reports = consolidate_with(&cfg, &backend).unwrap();
    assert_eq!(reports.len(), 1);
    let pdf_path = out.join("form_synthetic_test_data.pdf");
    assert_eq!(reports[0].output_path, pdf_path);
    assert_eq!(reports[0].pages_written, 2);
    assert_eq!(reports[0].pages_dropped, 1);

    let pages = backend.saved_pages(&pdf_path).unwrap();
    assert_eq!(pages.len(), 2);
    assert!(pages[0].contains("First Name: Alice"));
    assert!(pages[1].contains("Signature Date: 2024-03-01"));

    // Only the synthetic PDF is left in the output directory.
    assert_eq!(read_dir_names(&out), ["form_synthetic_test_data.pdf"]);
}

#[tokio::test]
async fn second_run_makes_no_model_calls() {
    let tmp = workspace(&["form.pdf"]);
    let cfg = config(tmp.path(), OutputLayout::Flat);
    let backend = FakeBackend::default().with_form("form.pdf", &[1, 2, 0, 4]);
    let mut store = FsResultStore::new(&cfg);

    let first = FakeGenerator::new();
    extract_with(&cfg, &backend, &first, &mut store).await.unwrap();
    assert_eq!(first.calls(), 3);

    let out = tmp.path().join("output_pdf");
    let before: Vec<(String, Vec<u8>)> = read_dir_names(&out)
        .into_iter()
        .map(|n| {
            let bytes = std::fs::read(out.join(&n)).unwrap();
            (n, bytes)
        })
        .collect();

    let second = FakeGenerator::new().answer(1, "something else entirely");
    let report = extract_with(&cfg, &backend, &second, &mut store)
        .await
        .unwrap();

    assert_eq!(second.calls(), 0);
    assert_eq!(report.model_calls(), 0);
    assert_eq!(report.documents[0].resumed(), 4);
    for (name, bytes) in before {
        assert_eq!(std::fs::read(out.join(&name)).unwrap(), bytes, "{name} changed");
    }
}

#[tokio::test]
async fn page_without_widgets_is_never_sent_to_the_model() {
    let tmp = workspace(&["form.pdf"]);
    let cfg = config(tmp.path(), OutputLayout::Flat);
    let backend = FakeBackend::default().with_form("form.pdf", &[0, 0]);
    let generator = FakeGenerator::new();
    let mut store = FsResultStore::new(&cfg);

    extract_with(&cfg, &backend, &generator, &mut store)
        .await
        .unwrap();

    assert_eq!(generator.calls(), 0);
    let out = tmp.path().join("output_pdf");
    for name in ["page_001.txt", "page_002.txt"] {
        assert_eq!(std::fs::read(out.join(name)).unwrap(), b"");
    }
    assert!(!tmp.path().join("screenshots").exists());
}

#[tokio::test]
async fn interrupted_run_resumes_at_first_missing_page() {
    let tmp = workspace(&["form.pdf"]);
    let cfg = config(tmp.path(), OutputLayout::Flat);
    let backend = FakeBackend::default().with_form("form.pdf", &[1, 1, 1]);
    let mut store = FsResultStore::new(&cfg);

    let err = extract_with(&cfg, &backend, &FailingGenerator { fail_on: 2 }, &mut store)
        .await
        .unwrap_err();
    assert!(matches!(err, SynthError::LlmApiError { page: 2, .. }));

    let out = tmp.path().join("output_pdf");
    assert_eq!(read_dir_names(&out), ["page_001.txt"]);
    assert_eq!(
        std::fs::read_to_string(out.join("page_001.txt")).unwrap(),
        "Field: value 1"
    );

    let generator = FakeGenerator::new();
    let report = extract_with(&cfg, &backend, &generator, &mut store)
        .await
        .unwrap();
    assert_eq!(*generator.pages_seen.lock().unwrap(), vec![2, 3]);
    assert_eq!(report.documents[0].resumed(), 1);
    assert_eq!(
        std::fs::read_to_string(out.join("page_001.txt")).unwrap(),
        "Field: value 1"
    );
}

#[tokio::test]
async fn empty_model_response_is_a_finished_page() {
    let tmp = workspace(&["form.pdf"]);
    let cfg = config(tmp.path(), OutputLayout::Flat);
    let backend = FakeBackend::default().with_form("form.pdf", &[2]);
    let mut store = FsResultStore::new(&cfg);

    let generator = FakeGenerator::new().answer(1, "");
    let report = extract_with(&cfg, &backend, &generator, &mut store)
        .await
        .unwrap();
    assert_eq!(report.documents[0].empty_responses(), 1);
    assert_eq!(
        report.documents[0].pages[0].outcome,
        PageOutcome::Generated { chars: 0 }
    );

    let again = FakeGenerator::new();
    extract_with(&cfg, &backend, &again, &mut store)
        .await
        .unwrap();
    assert_eq!(again.calls(), 0);
}

#[tokio::test]
async fn flat_layout_rejects_two_pdfs_before_writing_anything() {
    let tmp = workspace(&["b.pdf", "a.pdf"]);
    let cfg = config(tmp.path(), OutputLayout::Flat);
    let backend = FakeBackend::default()
        .with_form("a.pdf", &[1])
        .with_form("b.pdf", &[1]);
    let generator = FakeGenerator::new();
    let mut store = FsResultStore::new(&cfg);

    let err = extract_with(&cfg, &backend, &generator, &mut store)
        .await
        .unwrap_err();

    match &err {
        SynthError::MultiplePdfs { names, .. } => {
            assert_eq!(names, &["a.pdf".to_string(), "b.pdf".to_string()]);
        }
        other => panic!("expected MultiplePdfs, got {other:?}"),
    }
    let msg = err.to_string();
    assert!(msg.contains("a.pdf") && msg.contains("b.pdf"), "{msg}");
    assert_eq!(generator.calls(), 0);
    assert!(!tmp.path().join("output_pdf").exists());
    assert!(!tmp.path().join("screenshots").exists());
}

#[tokio::test]
async fn per_document_layout_namespaces_outputs_by_stem() {
    let tmp = workspace(&["w9.pdf", "lease.pdf"]);
    let cfg = config(tmp.path(), OutputLayout::PerDocument);
    let backend = FakeBackend::default()
        .with_form("w9.pdf", &[2, 0])
        .with_form("lease.pdf", &[1]);
    let generator = FakeGenerator::new();
    let mut store = FsResultStore::new(&cfg);

    let report = extract_with(&cfg, &backend, &generator, &mut store)
        .await
        .unwrap();
    let names: Vec<_> = report.documents.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["lease.pdf", "w9.pdf"]);

    let out = tmp.path().join("output_pdf");
    assert_eq!(read_dir_names(&out.join("w9")), ["page_001.txt", "page_002.txt"]);
    assert_eq!(read_dir_names(&out.join("lease")), ["page_001.txt"]);
    assert!(tmp.path().join("screenshots/w9/page_001.png").is_file());
    assert!(!tmp.path().join("screenshots/w9/page_002.png").exists());

    let reports = consolidate_with(&cfg, &backend).unwrap();
    assert_eq!(reports.len(), 2);
    assert!(out.join("w9_synthetic_test_data.pdf").is_file());
    assert!(out.join("lease_synthetic_test_data.pdf").is_file());
    assert!(read_dir_names(&out.join("w9")).is_empty());
}

#[tokio::test]
async fn memory_store_resumes_without_result_files() {
    let tmp = workspace(&["form.pdf"]);
    let cfg = config(tmp.path(), OutputLayout::Flat);
    let backend = FakeBackend::default().with_form("form.pdf", &[2, 0, 1]);
    let generator = FakeGenerator::new().answer(3, "Zip: 12345");

    let mut store = MemoryResultStore::new();
    store
        .write(&PageKey::new("form", 1), "Name: done earlier")
        .unwrap();

    let report = extract_with(&cfg, &backend, &generator, &mut store)
        .await
        .unwrap();

    assert_eq!(*generator.pages_seen.lock().unwrap(), vec![3]);
    let outcomes: Vec<_> = report.documents[0]
        .pages
        .iter()
        .map(|p| p.outcome.clone())
        .collect();
    assert_eq!(
        outcomes,
        [
            PageOutcome::Resumed,
            PageOutcome::NoFields,
            PageOutcome::Generated { chars: 10 },
        ]
    );

    let entries: Vec<_> = store
        .entries()
        .map(|(k, v)| (k.page_number, v.to_string()))
        .collect();
    assert_eq!(
        entries,
        [
            (1, "Name: done earlier".to_string()),
            (2, String::new()),
            (3, "Zip: 12345".to_string()),
        ]
    );
    assert!(!tmp.path().join("output_pdf").exists());
}

#[tokio::test]
async fn progress_events_follow_page_decisions() {
    let tmp = workspace(&["form.pdf"]);
    let recorder = Arc::new(RecordingCallback::default());
    let cfg = SynthConfig::builder()
        .base_dir(tmp.path())
        .layout(OutputLayout::Flat)
        .progress_callback(recorder.clone())
        .build()
        .unwrap();
    let backend = FakeBackend::default().with_form("form.pdf", &[1, 0, 4]);
    let generator = FakeGenerator::new().answer(3, "Zip: 12345");

    let mut store = MemoryResultStore::new();
    store.write(&PageKey::new("form", 1), "").unwrap();

    extract_with(&cfg, &backend, &generator, &mut store)
        .await
        .unwrap();

    assert_eq!(
        recorder.events(),
        [
            "start 1",
            "document form.pdf 3",
            "resumed 1",
            "no_fields 2",
            "calling 3",
            "generated 3 10",
            "done form.pdf 1/3",
            "complete 1",
        ]
    );
}

#[tokio::test]
async fn aborted_run_does_not_report_completion() {
    let tmp = workspace(&["form.pdf"]);
    let recorder = Arc::new(RecordingCallback::default());
    let cfg = SynthConfig::builder()
        .base_dir(tmp.path())
        .layout(OutputLayout::Flat)
        .progress_callback(recorder.clone())
        .build()
        .unwrap();
    let backend = FakeBackend::default().with_form("form.pdf", &[1]);
    let mut store = MemoryResultStore::new();

    extract_with(&cfg, &backend, &FailingGenerator { fail_on: 1 }, &mut store)
        .await
        .unwrap_err();

    let events = recorder.events();
    assert_eq!(events.last().map(String::as_str), Some("calling 1"));
    assert!(store.is_empty());
}

#[tokio::test]
async fn missing_input_dir_is_reported() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = config(tmp.path(), OutputLayout::Flat);
    let mut store = FsResultStore::new(&cfg);

    let err = extract_with(&cfg, &FakeBackend::default(), &FakeGenerator::new(), &mut store)
        .await
        .unwrap_err();
    assert!(matches!(err, SynthError::InputDirMissing { .. }));
    assert!(err.is_configuration());
}

#[tokio::test]
async fn empty_input_dir_is_reported() {
    let tmp = workspace(&[]);
    let cfg = config(tmp.path(), OutputLayout::Flat);
    let mut store = FsResultStore::new(&cfg);

    let err = extract_with(&cfg, &FakeBackend::default(), &FakeGenerator::new(), &mut store)
        .await
        .unwrap_err();
    assert!(matches!(err, SynthError::NoInputPdfs { .. }));
}

// ── Consolidation ────────────────────────────────────────────────────────────

fn seed_results(tmp: &TempDir, files: &[(&str, &str)]) -> PathBuf {
    let out = tmp.path().join("output_pdf");
    std::fs::create_dir_all(&out).unwrap();
    for (name, text) in files {
        std::fs::write(out.join(name), text).unwrap();
    }
    out
}

#[test]
fn pages_follow_numeric_order() {
    let tmp = workspace(&["form.pdf"]);
    let out = seed_results(
        &tmp,
        &[
            ("page_002.txt", "B: two"),
            ("page_010.txt", "C: ten"),
            ("page_001.txt", "A: one"),
        ],
    );
    let cfg = config(tmp.path(), OutputLayout::Flat);
    let backend = FakeBackend::default();

    let reports = consolidate_with(&cfg, &backend).unwrap();
    let order: Vec<_> = reports[0]
        .text_files
        .iter()
        .map(|p| p.file_name().unwrap().to_str().unwrap())
        .collect();
    assert_eq!(order, ["page_001.txt", "page_002.txt", "page_010.txt"]);

    let pages = backend
        .saved_pages(&out.join("form_synthetic_test_data.pdf"))
        .unwrap();
    assert_eq!(pages, ["A: one", "B: two", "C: ten"]);
}

#[test]
fn whitespace_only_pages_are_dropped() {
    let tmp = workspace(&["form.pdf"]);
    let out = seed_results(
        &tmp,
        &[
            ("page_001.txt", "   \n\t"),
            ("page_002.txt", "Name: Jane Doe"),
            ("page_003.txt", ""),
        ],
    );
    let cfg = config(tmp.path(), OutputLayout::Flat);
    let backend = FakeBackend::default();

    let reports = consolidate_with(&cfg, &backend).unwrap();
    assert_eq!(reports[0].pages_written, 1);
    assert_eq!(reports[0].pages_dropped, 2);

    let pages = backend
        .saved_pages(&out.join("form_synthetic_test_data.pdf"))
        .unwrap();
    assert_eq!(pages, ["Name: Jane Doe"]);
    assert_eq!(read_dir_names(&out), ["form_synthetic_test_data.pdf"]);
}

#[test]
fn all_blank_results_still_produce_a_pdf() {
    let tmp = workspace(&["form.pdf"]);
    let out = seed_results(&tmp, &[("page_001.txt", ""), ("page_002.txt", " ")]);
    let cfg = config(tmp.path(), OutputLayout::Flat);
    let backend = FakeBackend::default();

    let reports = consolidate_with(&cfg, &backend).unwrap();
    assert_eq!(reports[0].pages_written, 0);
    let pdf = out.join("form_synthetic_test_data.pdf");
    assert!(pdf.is_file());
    assert!(backend.saved_pages(&pdf).unwrap().is_empty());
}

#[test]
fn long_result_is_clipped_to_one_page() {
    let tmp = workspace(&["form.pdf"]);
    let text: String = (1..=200).map(|i| format!("Field {i}: value\n")).collect();
    seed_results(&tmp, &[("page_001.txt", &text)]);
    let cfg = config(tmp.path(), OutputLayout::Flat);

    let reports = consolidate_with(&cfg, &FakeBackend::default()).unwrap();
    assert_eq!(reports[0].pages_written, 1);
    assert!(reports[0].clipped_lines > 0);
}

#[test]
fn missing_output_dir_is_reported() {
    let tmp = workspace(&["form.pdf"]);
    let cfg = config(tmp.path(), OutputLayout::Flat);

    let err = consolidate_with(&cfg, &FakeBackend::default()).unwrap_err();
    assert!(matches!(err, SynthError::OutputDirMissing { .. }));
}

#[test]
fn output_dir_without_text_files_is_reported() {
    let tmp = workspace(&["form.pdf"]);
    seed_results(&tmp, &[("notes.md", "not a result")]);
    let cfg = config(tmp.path(), OutputLayout::Flat);
    let backend = FakeBackend::default();

    let err = consolidate_with(&cfg, &backend).unwrap_err();
    assert!(matches!(err, SynthError::NoResultFiles { .. }));
    assert!(backend.saved.lock().unwrap().is_empty());
}

#[test]
fn consolidation_checks_inputs_first() {
    let tmp = workspace(&["a.pdf", "b.pdf"]);
    seed_results(&tmp, &[("page_001.txt", "X: y")]);
    let cfg = config(tmp.path(), OutputLayout::Flat);

    let err = consolidate_with(&cfg, &FakeBackend::default()).unwrap_err();
    assert!(matches!(err, SynthError::MultiplePdfs { .. }));
    assert!(tmp.path().join("output_pdf/page_001.txt").is_file());
}
