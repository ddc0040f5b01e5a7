//! CLI binary for edgequake-formsynth.
//!
//! A thin shim over the library crate that maps CLI flags to `SynthConfig`
//! and prints results.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use edgequake_formsynth::{
    consolidate, extract, ConsolidationReport, ExtractionProgressCallback, ExtractionReport,
    OutputLayout, PdfBackend, PdfiumBackend, ProgressCallback, SynthConfig,
};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

const TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"];

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: one bar per document, one log line per page
/// that reached the model.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(TICKS),
        );
        bar.set_prefix("Preparing");
        bar.set_message("Scanning inputs…");
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }
}

impl ExtractionProgressCallback for CliProgressCallback {
    fn on_document_start(&self, document: &str, total_pages: usize) {
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} pages  \
             ⏱ {elapsed_precise}  {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(TICKS);

        self.bar.set_style(style);
        self.bar.set_length(total_pages as u64);
        self.bar.set_position(0);
        self.bar.set_prefix(document.to_string());
        self.bar.set_message("");
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Processing: {document} ({total_pages} pages)"))
        ));
    }

    fn on_page_resumed(&self, _document: &str, _page_num: usize, _total: usize) {
        self.bar.inc(1);
    }

    fn on_page_no_fields(&self, _document: &str, _page_num: usize, _total: usize) {
        self.bar.inc(1);
    }

    fn on_page_start(&self, _document: &str, page_num: usize, _total: usize) {
        self.bar.set_message(format!("page {page_num} → model"));
    }

    fn on_page_generated(&self, _document: &str, page_num: usize, total: usize, chars: usize) {
        self.bar.println(format!(
            "  {} Page {:>3}/{:<3}  {}",
            green("✓"),
            page_num,
            total,
            dim(&format!("{chars:>5} chars")),
        ));
        self.bar.inc(1);
    }

    fn on_document_complete(&self, document: &str, generated: usize, total_pages: usize) {
        self.bar.println(format!(
            "{} {}  {}",
            green("✔"),
            document,
            dim(&format!("{generated} generated / {total_pages} pages")),
        ));
    }

    fn on_extraction_complete(&self, _report: &ExtractionReport) {
        self.bar.finish_and_clear();
    }
}

// Clears the bar when extraction aborts with an error.
impl Drop for CliProgressCallback {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Generate per-page field values for every PDF in ./put_your_pdf_here
  formsynth extract

  # Build <stem>_synthetic_test_data.pdf from the generated text
  formsynth consolidate

  # Both steps
  formsynth run

  # Single-document layout (flat output_pdf/page_NNN.txt)
  formsynth --layout flat run

  # Count form widgets per page (no API key needed)
  formsynth inspect form.pdf

ENVIRONMENT VARIABLES:
  OPENAI_API_KEY          OpenAI API key
  ANTHROPIC_API_KEY       Anthropic API key
  EDGEQUAKE_LLM_PROVIDER  Override provider (openai, anthropic, gemini, ollama)
  EDGEQUAKE_MODEL         Override model ID (with EDGEQUAKE_LLM_PROVIDER)
  PDFIUM_LIB_PATH         Path to libpdfium
  FORMSYNTH_BASE_DIR      Directory holding put_your_pdf_here/, output_pdf/, screenshots/

Re-running `extract` resumes: pages with an existing page_NNN.txt are skipped.
"#;

/// Generate synthetic field values for PDF forms using Vision LLMs.
#[derive(Parser, Debug)]
#[command(
    name = "formsynth",
    version,
    about = "Generate synthetic test data for PDF forms using Vision LLMs",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    dirs: DirArgs,

    /// Per-document subdirectories, or a flat layout for a single PDF.
    #[arg(long, global = true, env = "FORMSYNTH_LAYOUT", value_enum, default_value = "per-document")]
    layout: LayoutArg,

    /// Output structured JSON reports instead of human-readable lines.
    #[arg(long, global = true, env = "FORMSYNTH_JSON")]
    json: bool,

    /// Disable progress bar.
    #[arg(long, global = true, env = "FORMSYNTH_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true, env = "FORMSYNTH_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true, env = "FORMSYNTH_QUIET")]
    quiet: bool,
}

#[derive(Args, Debug)]
struct DirArgs {
    /// Root for put_your_pdf_here/, output_pdf/ and screenshots/.
    #[arg(long, global = true, env = "FORMSYNTH_BASE_DIR", default_value = ".")]
    base_dir: PathBuf,

    /// Override the input directory.
    #[arg(long, global = true, env = "FORMSYNTH_INPUT_DIR")]
    input_dir: Option<PathBuf>,

    /// Override the output directory.
    #[arg(long, global = true, env = "FORMSYNTH_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Override the screenshot directory.
    #[arg(long, global = true, env = "FORMSYNTH_SCREENSHOT_DIR")]
    screenshot_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render form pages and generate per-page field values.
    Extract(ExtractArgs),
    /// Assemble generated text into <stem>_synthetic_test_data.pdf.
    Consolidate,
    /// Extract, then consolidate.
    Run(ExtractArgs),
    /// Print the form widget count of every page of a PDF.
    Inspect {
        /// PDF file to inspect.
        pdf: PathBuf,
    },
}

#[derive(Args, Debug)]
struct ExtractArgs {
    /// LLM provider: openai, anthropic, gemini, ollama, azure.
    #[arg(long, env = "FORMSYNTH_PROVIDER")]
    provider: Option<String>,

    /// Screenshot DPI (72–400).
    #[arg(long, env = "FORMSYNTH_DPI", default_value_t = 150,
          value_parser = clap::value_parser!(u32).range(72..=400))]
    dpi: u32,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum LayoutArg {
    Flat,
    PerDocument,
}

impl From<LayoutArg> for OutputLayout {
    fn from(v: LayoutArg) -> Self {
        match v {
            LayoutArg::Flat => OutputLayout::Flat,
            LayoutArg::PerDocument => OutputLayout::PerDocument,
        }
    }
}

#[derive(Serialize)]
struct RunReport<'a> {
    extraction: &'a ExtractionReport,
    consolidation: &'a [ConsolidationReport],
}

#[derive(Serialize)]
struct PageFields {
    page_num: usize,
    widgets: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The progress bar replaces INFO logs while extracting.
    let uses_bar = matches!(cli.command, Command::Extract(_) | Command::Run(_));
    let show_progress = uses_bar && !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    match &cli.command {
        Command::Extract(args) => {
            let config = build_config(&cli, Some(args), show_progress)?;
            let report = extract(&config).await.context("Extraction failed")?;
            print_extraction(&cli, &report)?;
        }
        Command::Consolidate => {
            let config = build_config(&cli, None, false)?;
            let reports = consolidate(&config).context("Consolidation failed")?;
            print_consolidation(&cli, &reports)?;
        }
        Command::Run(args) => {
            let config = build_config(&cli, Some(args), show_progress)?;
            let extraction = extract(&config).await.context("Extraction failed")?;
            let consolidation = consolidate(&config).context("Consolidation failed")?;
            if cli.json {
                let run = RunReport {
                    extraction: &extraction,
                    consolidation: &consolidation,
                };
                println!(
                    "{}",
                    serde_json::to_string_pretty(&run).context("Failed to serialise report")?
                );
            } else {
                print_extraction(&cli, &extraction)?;
                print_consolidation(&cli, &consolidation)?;
            }
        }
        Command::Inspect { pdf } => inspect(&cli, pdf)?,
    }

    Ok(())
}

/// Map CLI args to `SynthConfig`.
fn build_config(cli: &Cli, extract: Option<&ExtractArgs>, progress: bool) -> Result<SynthConfig> {
    let mut builder = SynthConfig::builder()
        .base_dir(&cli.dirs.base_dir)
        .layout(cli.layout.into());

    if let Some(ref dir) = cli.dirs.input_dir {
        builder = builder.input_dir(dir);
    }
    if let Some(ref dir) = cli.dirs.output_dir {
        builder = builder.output_dir(dir);
    }
    if let Some(ref dir) = cli.dirs.screenshot_dir {
        builder = builder.screenshot_dir(dir);
    }
    if let Some(args) = extract {
        builder = builder.dpi(args.dpi);
        if let Some(ref provider) = args.provider {
            builder = builder.provider_name(provider);
        }
    }
    if progress {
        builder = builder.progress_callback(CliProgressCallback::new() as ProgressCallback);
    }

    builder.build().context("Invalid configuration")
}

fn print_extraction(cli: &Cli, report: &ExtractionReport) -> Result<()> {
    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(report).context("Failed to serialise report")?
        );
        return Ok(());
    }
    if cli.quiet {
        return Ok(());
    }
    for doc in &report.documents {
        eprintln!(
            "{}  {}  {} generated, {} without fields, {} resumed{}",
            green("✔"),
            bold(&doc.name),
            doc.generated(),
            doc.no_fields(),
            doc.resumed(),
            match doc.empty_responses() {
                0 => String::new(),
                n => format!(", {} empty response(s)", cyan(&n.to_string())),
            }
        );
    }
    eprintln!(
        "   {} model call(s), {}ms total",
        dim(&report.model_calls().to_string()),
        report.total_duration_ms
    );
    Ok(())
}

fn print_consolidation(cli: &Cli, reports: &[ConsolidationReport]) -> Result<()> {
    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(reports).context("Failed to serialise report")?
        );
        return Ok(());
    }
    if cli.quiet {
        return Ok(());
    }
    for r in reports {
        eprintln!(
            "{}  {} pages  →  {}",
            green("✔"),
            r.pages_written,
            bold(&r.output_path.display().to_string()),
        );
        if r.pages_dropped > 0 || r.clipped_lines > 0 {
            eprintln!(
                "   {}",
                dim(&format!(
                    "{} empty page(s) dropped, {} line(s) clipped",
                    r.pages_dropped, r.clipped_lines
                ))
            );
        }
    }
    Ok(())
}

fn inspect(cli: &Cli, pdf: &Path) -> Result<()> {
    let backend = PdfiumBackend::bind().context("Failed to load PDFium")?;
    let form = backend
        .open_form(pdf)
        .with_context(|| format!("Failed to open {}", pdf.display()))?;

    let mut pages = Vec::with_capacity(form.page_count());
    for index in 0..form.page_count() {
        pages.push(PageFields {
            page_num: index + 1,
            widgets: form.widget_count(index)?,
        });
    }

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&pages).context("Failed to serialise pages")?
        );
        return Ok(());
    }

    println!("File:   {}", pdf.display());
    println!("Pages:  {}", pages.len());
    for p in &pages {
        let marker = if p.widgets > 0 { green("●") } else { dim("○") };
        println!("  {} page {:>3}  {} widget(s)", marker, p.page_num, p.widgets);
    }
    Ok(())
}
