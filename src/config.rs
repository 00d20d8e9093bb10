//! Configuration types for resume skill analysis.
//!
//! All analysis behaviour is controlled through [`AnalysisConfig`], built via
//! its [`AnalysisConfigBuilder`]. The skill list is not part of the config:
//! it is user input for one run and travels as a [`crate::SkillSet`].

use crate::error::SkillScanError;
use crate::progress::ProgressCallback;
use edgequake_llm::LLMProvider;
use std::fmt;
use std::sync::Arc;
use whatlang::Lang;

/// Model used when a provider is named without a model.
pub const DEFAULT_MODEL: &str = "gpt-4.1-nano";

/// Configuration for a resume analysis session.
///
/// Built via [`AnalysisConfig::builder()`] or using
/// [`AnalysisConfig::default()`].
///
/// # Example
/// ```rust
/// use resume_skill_scan::AnalysisConfig;
/// use whatlang::Lang;
///
/// let config = AnalysisConfig::builder()
///     .target_language(Lang::Eng)
///     .model("gpt-4.1-mini")
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct AnalysisConfig {
    /// Language every document is normalised to before counting. Default: English.
    pub target_language: Lang,

    /// Translate documents that are not in the target language. Default: true.
    ///
    /// When false no provider is resolved and every document is analysed in
    /// the language it was written in.
    pub translate: bool,

    /// LLM model identifier used for translation. If None, uses [`DEFAULT_MODEL`].
    pub model: Option<String>,

    /// LLM provider name (e.g. "openai", "anthropic", "ollama").
    /// If None along with `provider`, the provider is detected from the environment.
    pub provider_name: Option<String>,

    /// Pre-constructed LLM provider. Takes precedence over `provider_name`.
    pub provider: Option<Arc<dyn LLMProvider>>,

    /// Sampling temperature for translation. Default: 0.1.
    pub temperature: f32,

    /// Maximum tokens the LLM may generate per document. Default: 4096.
    ///
    /// Resumes rarely exceed two pages; a translation longer than this is
    /// truncated by the provider.
    pub max_tokens: usize,

    /// Custom translation system prompt. If None, uses the built-in default.
    pub system_prompt: Option<String>,

    /// PDF user password, tried on every document.
    pub password: Option<String>,

    /// Download timeout for URL inputs in seconds. Default: 120.
    pub download_timeout_secs: u64,

    /// Receives per-document events and warnings. Default: None.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            target_language: Lang::Eng,
            translate: true,
            model: None,
            provider_name: None,
            provider: None,
            temperature: 0.1,
            max_tokens: 4096,
            system_prompt: None,
            password: None,
            download_timeout_secs: 120,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for AnalysisConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisConfig")
            .field("target_language", &self.target_language.code())
            .field("translate", &self.translate)
            .field("model", &self.model)
            .field("provider_name", &self.provider_name)
            .field("provider", &self.provider.as_ref().map(|_| "<dyn LLMProvider>"))
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("download_timeout_secs", &self.download_timeout_secs)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn AnalysisProgressCallback>"),
            )
            .finish()
    }
}

impl AnalysisConfig {
    /// Create a new builder for `AnalysisConfig`.
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`AnalysisConfig`].
pub struct AnalysisConfigBuilder {
    config: AnalysisConfig,
}

impl fmt::Debug for AnalysisConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.config.fmt(f)
    }
}

impl AnalysisConfigBuilder {
    pub fn target_language(mut self, lang: Lang) -> Self {
        self.config.target_language = lang;
        self
    }

    pub fn translate(mut self, v: bool) -> Self {
        self.config.translate = v;
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = Some(model.into());
        self
    }

    pub fn provider_name(mut self, name: impl Into<String>) -> Self {
        self.config.provider_name = Some(name.into());
        self
    }

    pub fn provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        self.config.provider = Some(provider);
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.config.temperature = t.clamp(0.0, 2.0);
        self
    }

    pub fn max_tokens(mut self, n: usize) -> Self {
        self.config.max_tokens = n;
        self
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = Some(prompt.into());
        self
    }

    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    pub fn download_timeout_secs(mut self, secs: u64) -> Self {
        self.config.download_timeout_secs = secs;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<AnalysisConfig, SkillScanError> {
        let c = &self.config;
        if c.max_tokens == 0 {
            return Err(SkillScanError::InvalidConfig(
                "max_tokens must be ≥ 1".into(),
            ));
        }
        if c.download_timeout_secs == 0 {
            return Err(SkillScanError::InvalidConfig(
                "download timeout must be ≥ 1s".into(),
            ));
        }
        if c.system_prompt.as_deref().is_some_and(|p| p.trim().is_empty()) {
            return Err(SkillScanError::InvalidConfig(
                "system prompt override is empty".into(),
            ));
        }
        Ok(self.config)
    }
}

/// Parse an ISO 639-3 language code (`eng`, `fra`, `deu`, …).
pub fn parse_language(code: &str) -> Result<Lang, SkillScanError> {
    let code = code.trim().to_lowercase();
    Lang::from_code(code.as_str()).ok_or_else(|| {
        SkillScanError::InvalidConfig(format!(
            "unknown language code '{code}' (expected ISO 639-3, e.g. eng, fra, deu)"
        ))
    })
}
