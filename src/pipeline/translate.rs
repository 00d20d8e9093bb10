//! Translation service: the seam the normalizer calls, and its LLM backend.
//!
//! A translation is a single request: system prompt plus the whole document
//! text as the user turn. There is no retry; a failed call is reported to the
//! normalizer, which keeps the original text and moves on.

use crate::config::{AnalysisConfig, DEFAULT_MODEL};
use crate::error::{SkillScanError, TranslationError};
use crate::prompts::{translation_prompt, DEFAULT_TRANSLATION_PROMPT};
use async_trait::async_trait;
use edgequake_llm::{ChatMessage, CompletionOptions, LLMProvider, ProviderFactory};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;
use whatlang::Lang;

/// Translates text between two languages.
///
/// Carried by the normalizer as `Option<Arc<dyn Translator>>`; `None` means
/// the service never came up and translation is skipped for the session.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, source: Lang, target: Lang) -> Result<String, TranslationError>;
}

/// [`Translator`] backed by an `edgequake_llm` chat provider.
pub struct LlmTranslator {
    provider: Arc<dyn LLMProvider>,
    system_prompt: String,
    options: CompletionOptions,
}

impl LlmTranslator {
    pub fn new(provider: Arc<dyn LLMProvider>, config: &AnalysisConfig) -> Self {
        Self {
            provider,
            system_prompt: config
                .system_prompt
                .clone()
                .unwrap_or_else(|| DEFAULT_TRANSLATION_PROMPT.to_string()),
            options: build_options(config),
        }
    }
}

#[async_trait]
impl Translator for LlmTranslator {
    async fn translate(&self, text: &str, source: Lang, target: Lang) -> Result<String, TranslationError> {
        let start = Instant::now();
        let messages = vec![
            ChatMessage::system(translation_prompt(&self.system_prompt, source, target)),
            ChatMessage::user(text),
        ];

        let response = self
            .provider
            .chat(&messages, Some(&self.options))
            .await
            .map_err(|e| TranslationError::Service(e.to_string()))?;

        debug!(
            "Translated {} → {}: {} input tokens, {} output tokens, {:?}",
            source.code(),
            target.code(),
            response.prompt_tokens,
            response.completion_tokens,
            start.elapsed()
        );

        let translated = clean_translation(&response.content);
        if translated.is_empty() {
            return Err(TranslationError::EmptyResponse);
        }
        Ok(translated)
    }
}

/// Build `CompletionOptions` from the analysis config.
fn build_options(config: &AnalysisConfig) -> CompletionOptions {
    CompletionOptions {
        temperature: Some(config.temperature),
        max_tokens: Some(config.max_tokens),
        ..Default::default()
    }
}

static RE_OUTER_FENCES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^```[a-zA-Z]*\n(.*)\n```\s*$").unwrap());

static RE_PREAMBLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:here is the )?translation(?: into [a-z]+)?:\s*").unwrap());

/// Strip the wrappers models add despite the prompt: outer code fences and a
/// leading "Translation:" line.
pub fn clean_translation(raw: &str) -> String {
    let trimmed = raw.trim();
    let unfenced = match RE_OUTER_FENCES.captures(trimmed) {
        Some(caps) => caps[1].to_string(),
        None => trimmed.to_string(),
    };
    RE_PREAMBLE.replace(unfenced.trim(), "").trim().to_string()
}

/// Instantiate a named provider with the given model.
fn create_provider(provider_name: &str, model: &str) -> Result<Arc<dyn LLMProvider>, SkillScanError> {
    ProviderFactory::create_llm_provider(provider_name, model).map_err(|e| {
        SkillScanError::ProviderNotConfigured {
            provider: provider_name.to_string(),
            hint: format!("{e}"),
        }
    })
}

/// Resolve the translation provider, from most-specific to least-specific.
///
/// 1. **Pre-built provider** (`config.provider`): used as-is.
/// 2. **Named provider + model** (`config.provider_name`): the factory reads
///    the matching API key from the environment.
/// 3. **Environment pair** (`EDGEQUAKE_LLM_PROVIDER` + `EDGEQUAKE_MODEL`).
/// 4. **`OPENAI_API_KEY`** present → OpenAI with the configured model.
/// 5. **Full auto-detection** (`ProviderFactory::from_env`).
pub fn resolve_provider(config: &AnalysisConfig) -> Result<Arc<dyn LLMProvider>, SkillScanError> {
    if let Some(ref provider) = config.provider {
        return Ok(Arc::clone(provider));
    }

    let model = config.model.as_deref().unwrap_or(DEFAULT_MODEL);

    if let Some(ref name) = config.provider_name {
        return create_provider(name, model);
    }

    if let (Ok(prov), Ok(env_model)) = (
        std::env::var("EDGEQUAKE_LLM_PROVIDER"),
        std::env::var("EDGEQUAKE_MODEL"),
    ) {
        if !prov.is_empty() && !env_model.is_empty() {
            return create_provider(&prov, &env_model);
        }
    }

    if let Ok(openai_key) = std::env::var("OPENAI_API_KEY") {
        if !openai_key.is_empty() {
            return create_provider("openai", model);
        }
    }

    let (llm_provider, _embedding) =
        ProviderFactory::from_env().map_err(|e| SkillScanError::ProviderNotConfigured {
            provider: "auto".to_string(),
            hint: format!(
                "No LLM provider could be auto-detected from environment.\n\
                Set OPENAI_API_KEY, ANTHROPIC_API_KEY, or pass --no-translate.\n\
                Error: {}",
                e
            ),
        })?;

    Ok(llm_provider)
}
