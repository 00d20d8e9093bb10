//! Language normalisation: detect the dominant language and translate it
//! into the target language.
//!
//! Detection is statistical (`whatlang`) and can be wrong on very short or
//! mixed-language text; no confidence threshold is applied. Text whose
//! language cannot be detected at all is treated as already normalised.

use crate::error::TranslationError;
use crate::pipeline::translate::Translator;
use std::sync::Arc;
use tracing::{debug, info, warn};
use whatlang::Lang;

/// Tag used when no language could be detected.
pub const UNDETERMINED: &str = "und";

/// Text ready for cleaning, tagged with the language it was detected in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    pub text: String,
    /// ISO 639-3 code of the detected language, or [`UNDETERMINED`].
    pub language: String,
    /// True when `text` is the translation output.
    pub translated: bool,
    /// Set when a translation was attempted and failed; `text` is then the original.
    pub translation_error: Option<TranslationError>,
}

/// Detect the dominant language of `text`.
pub fn detect_language(text: &str) -> Option<Lang> {
    let info = whatlang::detect(text)?;
    debug!(
        "Detected {} (confidence {:.2}, reliable: {})",
        info.lang().code(),
        info.confidence(),
        info.is_reliable()
    );
    Some(info.lang())
}

/// Brings every document into the target language.
pub struct LanguageNormalizer {
    target: Lang,
    translator: Option<Arc<dyn Translator>>,
}

impl LanguageNormalizer {
    /// `translator` is `None` when the service is disabled or failed to start.
    pub fn new(target: Lang, translator: Option<Arc<dyn Translator>>) -> Self {
        Self { target, translator }
    }

    pub fn target(&self) -> Lang {
        self.target
    }

    pub fn can_translate(&self) -> bool {
        self.translator.is_some()
    }

    /// Normalise `text`. Never fails: a translation error keeps the original
    /// text and is reported through [`NormalizedText::translation_error`].
    pub async fn normalize(&self, text: String) -> NormalizedText {
        let Some(lang) = detect_language(&text) else {
            debug!("Language undetermined; leaving text as is");
            return untouched(text, UNDETERMINED.to_string());
        };

        let language = lang.code().to_string();
        if lang == self.target {
            return untouched(text, language);
        }

        let Some(translator) = self.translator.as_ref() else {
            return untouched(text, language);
        };

        info!("Translating {} chars from {} to {}", text.len(), language, self.target.code());
        match translator.translate(&text, lang, self.target).await {
            Ok(translated) => NormalizedText {
                text: translated,
                language,
                translated: true,
                translation_error: None,
            },
            Err(e) => {
                warn!("Translation from {} failed, keeping original text: {}", language, e);
                NormalizedText {
                    text,
                    language,
                    translated: false,
                    translation_error: Some(e),
                }
            }
        }
    }
}

fn untouched(text: String, language: String) -> NormalizedText {
    NormalizedText {
        text,
        language,
        translated: false,
        translation_error: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const ENGLISH: &str = "I am an experienced software engineer with a strong background \
        in building data pipelines, analytics dashboards and machine learning systems.";
    const FRENCH: &str = "Je suis une ingénieure logicielle expérimentée avec une solide \
        expérience dans la création de tableaux de bord et la gestion de projets.";

    struct FixedTranslator {
        output: &'static str,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Translator for FixedTranslator {
        async fn translate(&self, _text: &str, _s: Lang, _t: Lang) -> Result<String, TranslationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.output.to_string())
        }
    }

    struct FailingTranslator;

    #[async_trait]
    impl Translator for FailingTranslator {
        async fn translate(&self, _text: &str, _s: Lang, _t: Lang) -> Result<String, TranslationError> {
            Err(TranslationError::Service("model overloaded".into()))
        }
    }

    #[test]
    fn detects_english_and_french() {
        assert_eq!(detect_language(ENGLISH), Some(Lang::Eng));
        assert_eq!(detect_language(FRENCH), Some(Lang::Fra));
    }

    #[tokio::test]
    async fn target_language_is_left_unchanged() {
        let translator = Arc::new(FixedTranslator {
            output: "unused",
            calls: AtomicUsize::new(0),
        });
        let normalizer = LanguageNormalizer::new(Lang::Eng, Some(translator.clone()));

        let out = normalizer.normalize(ENGLISH.to_string()).await;
        assert_eq!(out.text, ENGLISH);
        assert_eq!(out.language, "eng");
        assert!(!out.translated);
        assert_eq!(translator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn other_language_is_translated() {
        let translator = Arc::new(FixedTranslator {
            output: "I am an experienced software engineer.",
            calls: AtomicUsize::new(0),
        });
        let normalizer = LanguageNormalizer::new(Lang::Eng, Some(translator.clone()));

        let out = normalizer.normalize(FRENCH.to_string()).await;
        assert_eq!(out.text, "I am an experienced software engineer.");
        assert_eq!(out.language, "fra");
        assert!(out.translated);
        assert!(out.translation_error.is_none());
        assert_eq!(translator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_translation_keeps_original_text() {
        let normalizer = LanguageNormalizer::new(Lang::Eng, Some(Arc::new(FailingTranslator)));

        let out = normalizer.normalize(FRENCH.to_string()).await;
        assert_eq!(out.text, FRENCH);
        assert_eq!(out.language, "fra");
        assert!(!out.translated);
        assert!(matches!(out.translation_error, Some(TranslationError::Service(_))));
    }

    #[tokio::test]
    async fn missing_translator_skips_translation() {
        let normalizer = LanguageNormalizer::new(Lang::Eng, None);
        assert!(!normalizer.can_translate());

        let out = normalizer.normalize(FRENCH.to_string()).await;
        assert_eq!(out.text, FRENCH);
        assert_eq!(out.language, "fra");
        assert!(out.translation_error.is_none());
    }

    #[tokio::test]
    async fn empty_text_is_undetermined() {
        let normalizer = LanguageNormalizer::new(Lang::Eng, Some(Arc::new(FailingTranslator)));
        let out = normalizer.normalize(String::new()).await;
        assert_eq!(out.language, UNDETERMINED);
        assert!(out.text.is_empty());
        assert!(out.translation_error.is_none());
    }
}
