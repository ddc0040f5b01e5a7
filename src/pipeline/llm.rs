//! Vision model interaction: one screenshot in, field-value text out.
//!
//! Each page gets exactly one call. There is no retry: a failed call aborts
//! the run, and because finished pages already have Result Files, running
//! the command again picks up where it stopped.
//!
//! [`FieldGenerator`] is the seam the orchestrator depends on. The production
//! implementation, [`VisionGenerator`], drives an `edgequake-llm` provider;
//! tests substitute a counting fake.

use crate::config::SynthConfig;
use crate::error::SynthError;
use crate::pipeline::encode::encode_png;
use async_trait::async_trait;
use edgequake_llm::{ChatMessage, CompletionOptions, LLMProvider, ProviderFactory};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Produces field-value text for one rendered page.
#[async_trait]
pub trait FieldGenerator: Send + Sync {
    /// Generate text for the PNG screenshot of page `page_num` (1-indexed).
    ///
    /// Returns an empty string when the service produced no output.
    async fn generate(&self, page_num: usize, png: &[u8], prompt: &str)
        -> Result<String, SynthError>;
}

/// [`FieldGenerator`] backed by a vision-capable LLM provider.
pub struct VisionGenerator {
    provider: Arc<dyn LLMProvider>,
    options: CompletionOptions,
    timeout: Option<Duration>,
}

impl VisionGenerator {
    /// Wrap an already-constructed provider.
    pub fn new(provider: Arc<dyn LLMProvider>, config: &SynthConfig) -> Self {
        Self {
            provider,
            options: build_options(config),
            timeout: config.api_timeout_secs.map(Duration::from_secs),
        }
    }

    /// Resolve a provider from the config and environment.
    pub fn from_config(config: &SynthConfig) -> Result<Self, SynthError> {
        let provider = resolve_provider(config)?;
        Ok(Self::new(provider, config))
    }
}

#[async_trait]
impl FieldGenerator for VisionGenerator {
    async fn generate(
        &self,
        page_num: usize,
        png: &[u8],
        prompt: &str,
    ) -> Result<String, SynthError> {
        let start = Instant::now();
        let messages = vec![ChatMessage::user_with_images(prompt, vec![encode_png(png)])];

        let call = self.provider.chat(&messages, Some(&self.options));
        let result = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| SynthError::ApiTimeout {
                    page: page_num,
                    secs: limit.as_secs(),
                })?,
            None => call.await,
        };

        let response = result.map_err(|e| SynthError::LlmApiError {
            page: page_num,
            message: e.to_string(),
        })?;

        debug!(
            "Page {}: {} input tokens, {} output tokens, {:?}",
            page_num,
            response.prompt_tokens,
            response.completion_tokens,
            start.elapsed()
        );
        Ok(response.content)
    }
}

/// Build `CompletionOptions` from the config.
fn build_options(config: &SynthConfig) -> CompletionOptions {
    CompletionOptions {
        temperature: Some(config.temperature),
        max_tokens: config.max_tokens,
        ..Default::default()
    }
}

fn create_vision_provider(
    provider_name: &str,
    model: &str,
) -> Result<Arc<dyn LLMProvider>, SynthError> {
    ProviderFactory::create_llm_provider(provider_name, model).map_err(|e| {
        SynthError::ProviderNotConfigured {
            provider: provider_name.to_string(),
            hint: format!("{e}"),
        }
    })
}

/// Resolve the LLM provider, from most-specific to least-specific:
///
/// 1. `config.provider_name` with `config.model`
/// 2. `EDGEQUAKE_LLM_PROVIDER` + `EDGEQUAKE_MODEL`, when both are set
/// 3. OpenAI with `config.model`, when `OPENAI_API_KEY` is set
/// 4. `ProviderFactory::from_env` auto-detection
fn resolve_provider(config: &SynthConfig) -> Result<Arc<dyn LLMProvider>, SynthError> {
    if let Some(ref name) = config.provider_name {
        return create_vision_provider(name, &config.model);
    }

    if let (Ok(prov), Ok(model)) = (
        std::env::var("EDGEQUAKE_LLM_PROVIDER"),
        std::env::var("EDGEQUAKE_MODEL"),
    ) {
        if !prov.is_empty() && !model.is_empty() {
            return create_vision_provider(&prov, &model);
        }
    }

    if let Ok(openai_key) = std::env::var("OPENAI_API_KEY") {
        if !openai_key.is_empty() {
            return create_vision_provider("openai", &config.model);
        }
    }

    let (llm_provider, _embedding) =
        ProviderFactory::from_env().map_err(|e| SynthError::ProviderNotConfigured {
            provider: "auto".to_string(),
            hint: format!(
                "No LLM provider could be auto-detected from environment.\n\
                Set OPENAI_API_KEY, ANTHROPIC_API_KEY, or configure a provider.\n\
                Error: {}",
                e
            ),
        })?;

    Ok(llm_provider)
}
