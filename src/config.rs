//! Configuration types for form-data synthesis.
//!
//! All pipeline behaviour is controlled through [`SynthConfig`], built via
//! its [`SynthConfigBuilder`]. The extractor and the consolidator read the
//! same config, so the directory layout they agree on lives in one place.

use crate::error::SynthError;
use crate::progress::ProgressCallback;
use crate::prompts::FIELD_VALUES_PROMPT;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Default model identifier for field-value generation.
pub const DEFAULT_MODEL: &str = "gpt-5.2";

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Default rasterisation resolution for page screenshots.
pub const DEFAULT_DPI: u32 = 150;

/// Suffix appended to the source PDF stem for the consolidated output.
pub const SYNTHETIC_PDF_SUFFIX: &str = "_synthetic_test_data";

/// Configuration for extraction and consolidation.
///
/// # Example
/// ```rust
/// use edgequake_formsynth::{OutputLayout, SynthConfig};
///
/// let config = SynthConfig::builder()
///     .base_dir("/tmp/forms")
///     .layout(OutputLayout::Flat)
///     .build()
///     .unwrap();
/// assert!(config.output_dir.ends_with("output_pdf"));
/// ```
#[derive(Clone)]
pub struct SynthConfig {
    /// Directory scanned for `*.pdf` inputs. Default: `put_your_pdf_here`.
    pub input_dir: PathBuf,

    /// Directory receiving per-page Result Files and the synthetic PDF.
    /// Default: `output_pdf`.
    pub output_dir: PathBuf,

    /// Directory receiving page screenshots. Default: `screenshots`.
    pub screenshot_dir: PathBuf,

    /// How per-page files are namespaced. Default: [`OutputLayout::PerDocument`].
    pub layout: OutputLayout,

    /// Rendering DPI for screenshots. Range: 72–400. Default: 150.
    pub dpi: u32,

    /// LLM model identifier. Default: [`DEFAULT_MODEL`].
    pub model: String,

    /// LLM provider name (e.g. "openai", "anthropic").
    /// If None, the provider is detected from the environment.
    pub provider_name: Option<String>,

    /// Sampling temperature. Default: 0.2.
    pub temperature: f32,

    /// Optional cap on generated tokens per page. Default: provider default.
    pub max_tokens: Option<usize>,

    /// Instruction text sent with each screenshot.
    pub prompt: String,

    /// Per-call timeout in seconds. Default: None (wait indefinitely).
    ///
    /// The model call is attempted exactly once either way.
    pub api_timeout_secs: Option<u64>,

    /// Receives per-document and per-page extraction events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("put_your_pdf_here"),
            output_dir: PathBuf::from("output_pdf"),
            screenshot_dir: PathBuf::from("screenshots"),
            layout: OutputLayout::default(),
            dpi: DEFAULT_DPI,
            model: DEFAULT_MODEL.to_string(),
            provider_name: None,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: None,
            prompt: FIELD_VALUES_PROMPT.to_string(),
            api_timeout_secs: None,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for SynthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SynthConfig")
            .field("input_dir", &self.input_dir)
            .field("output_dir", &self.output_dir)
            .field("screenshot_dir", &self.screenshot_dir)
            .field("layout", &self.layout)
            .field("dpi", &self.dpi)
            .field("model", &self.model)
            .field("provider_name", &self.provider_name)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("api_timeout_secs", &self.api_timeout_secs)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn ExtractionProgressCallback>"),
            )
            .finish()
    }
}

impl SynthConfig {
    /// Create a new builder for `SynthConfig`.
    pub fn builder() -> SynthConfigBuilder {
        SynthConfigBuilder {
            config: Self::default(),
        }
    }

    /// Directory holding the Result Files of the document with `stem`.
    pub fn result_dir(&self, stem: &str) -> PathBuf {
        self.layout.scoped(&self.output_dir, stem)
    }

    /// Screenshot path for a 1-based page number.
    pub fn screenshot_path(&self, stem: &str, page_number: usize) -> PathBuf {
        self.layout
            .scoped(&self.screenshot_dir, stem)
            .join(format!("{}.png", page_file_stem(page_number)))
    }

    /// Final consolidated PDF path for the document with `stem`.
    pub fn synthetic_pdf_path(&self, stem: &str) -> PathBuf {
        self.output_dir
            .join(format!("{stem}{SYNTHETIC_PDF_SUFFIX}.pdf"))
    }
}

/// `page_NNN` with a three-digit zero-padded page number.
pub fn page_file_stem(page_number: usize) -> String {
    format!("page_{page_number:03}")
}

/// Builder for [`SynthConfig`].
#[derive(Debug)]
pub struct SynthConfigBuilder {
    config: SynthConfig,
}

impl SynthConfigBuilder {
    /// Re-root the three working directories under `base`, keeping their
    /// default names.
    pub fn base_dir(mut self, base: impl AsRef<Path>) -> Self {
        let base = base.as_ref();
        self.config.input_dir = base.join("put_your_pdf_here");
        self.config.output_dir = base.join("output_pdf");
        self.config.screenshot_dir = base.join("screenshots");
        self
    }

    pub fn input_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.input_dir = dir.into();
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    pub fn screenshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.screenshot_dir = dir.into();
        self
    }

    pub fn layout(mut self, layout: OutputLayout) -> Self {
        self.config.layout = layout;
        self
    }

    pub fn dpi(mut self, dpi: u32) -> Self {
        self.config.dpi = dpi.clamp(72, 400);
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn provider_name(mut self, name: impl Into<String>) -> Self {
        self.config.provider_name = Some(name.into());
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.config.temperature = t.clamp(0.0, 2.0);
        self
    }

    pub fn max_tokens(mut self, n: usize) -> Self {
        self.config.max_tokens = Some(n);
        self
    }

    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.prompt = prompt.into();
        self
    }

    pub fn api_timeout_secs(mut self, secs: u64) -> Self {
        self.config.api_timeout_secs = Some(secs);
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<SynthConfig, SynthError> {
        let c = &self.config;
        if c.dpi < 72 || c.dpi > 400 {
            return Err(SynthError::InvalidConfig(format!(
                "DPI must be 72–400, got {}",
                c.dpi
            )));
        }
        if c.model.trim().is_empty() {
            return Err(SynthError::InvalidConfig("Model must not be empty".into()));
        }
        if c.prompt.trim().is_empty() {
            return Err(SynthError::InvalidConfig("Prompt must not be empty".into()));
        }
        if c.api_timeout_secs == Some(0) {
            return Err(SynthError::InvalidConfig(
                "API timeout must be ≥ 1 second".into(),
            ));
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// How per-page artefacts are laid out on disk.
///
/// | Layout | Result File | Inputs |
/// |--------|-------------|--------|
/// | `Flat` | `output_pdf/page_NNN.txt` | exactly one PDF |
/// | `PerDocument` | `output_pdf/<stem>/page_NNN.txt` | any number of PDFs |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputLayout {
    /// Single-document variant: a second PDF in the input directory is a
    /// configuration error.
    Flat,
    /// Multi-document variant: each PDF gets its own subdirectory. (default)
    #[default]
    PerDocument,
}

impl OutputLayout {
    /// Join `stem` onto `root` when the layout namespaces per document.
    pub fn scoped(&self, root: &Path, stem: &str) -> PathBuf {
        match self {
            OutputLayout::Flat => root.to_path_buf(),
            OutputLayout::PerDocument => root.join(stem),
        }
    }

    /// Whether the input directory may hold more than one PDF.
    pub fn allows_multiple_inputs(&self) -> bool {
        matches!(self, OutputLayout::PerDocument)
    }
}
