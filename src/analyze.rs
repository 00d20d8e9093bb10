//! Batch orchestration: run every document through
//! extract → normalize → clean → count.
//!
//! Documents are processed one at a time, in upload order. Each document's
//! [`SkillCounts`] is written once, after its pipeline finishes, and never
//! touched again. A document that cannot be read is recorded as a
//! [`DocumentFailure`] and the batch moves on to the next one.

use crate::config::AnalysisConfig;
use crate::error::{ExtractionError, SkillScanError};
use crate::output::{BatchOutcome, DocumentFailure, DocumentSkills, Warning};
use crate::pipeline::clean::clean_text;
use crate::pipeline::count::{count_skills, SkillCounts, SkillSet};
use crate::pipeline::extract::{PdfiumExtractor, TextExtractor};
use crate::pipeline::input::{self, Document};
use crate::pipeline::normalize::LanguageNormalizer;
use crate::pipeline::translate::{resolve_provider, LlmTranslator, Translator};
use crate::progress::ProgressCallback;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// A resolved document, or the reason it could not be loaded.
type Resolved = (String, Result<Document, ExtractionError>);

/// One analysis session: the extractor and the (optional) translation
/// service, constructed once and reused for every batch.
pub struct Analyzer {
    extractor: Arc<dyn TextExtractor>,
    normalizer: LanguageNormalizer,
    progress: Option<ProgressCallback>,
    download_timeout_secs: u64,
    startup_warnings: Vec<Warning>,
}

impl Analyzer {
    /// Build a session from `config`, using pdfium for extraction and the
    /// configured LLM provider for translation.
    ///
    /// A provider that cannot be initialised does not fail the session: it
    /// runs without translation and every batch carries a
    /// [`Warning::TranslatorUnavailable`].
    pub fn new(config: &AnalysisConfig) -> Self {
        let extractor: Arc<dyn TextExtractor> =
            Arc::new(PdfiumExtractor::new(config.password.clone()));

        let mut startup_warnings = Vec::new();
        let translator: Option<Arc<dyn Translator>> = if !config.translate {
            debug!("Translation disabled by configuration");
            None
        } else {
            match resolve_provider(config) {
                Ok(provider) => Some(Arc::new(LlmTranslator::new(provider, config)) as Arc<dyn Translator>),
                Err(e) => {
                    warn!("Translation service unavailable: {}", e);
                    startup_warnings.push(Warning::TranslatorUnavailable {
                        reason: e.to_string(),
                    });
                    None
                }
            }
        };

        let mut analyzer = Self::with_components(config, extractor, translator);
        analyzer.startup_warnings = startup_warnings;
        analyzer
    }

    /// Build a session from explicit components.
    pub fn with_components(
        config: &AnalysisConfig,
        extractor: Arc<dyn TextExtractor>,
        translator: Option<Arc<dyn Translator>>,
    ) -> Self {
        Self {
            extractor,
            normalizer: LanguageNormalizer::new(config.target_language, translator),
            progress: config.progress_callback.clone(),
            download_timeout_secs: config.download_timeout_secs,
            startup_warnings: Vec::new(),
        }
    }

    /// Warnings raised while the session was constructed.
    pub fn startup_warnings(&self) -> &[Warning] {
        &self.startup_warnings
    }

    /// Analyse in-memory uploads.
    pub async fn analyze_documents(&self, documents: Vec<Document>, skills: &SkillSet) -> BatchOutcome {
        let resolved = documents
            .into_iter()
            .map(|doc| (doc.name.clone(), Ok(doc)))
            .collect();
        self.run(resolved, skills).await
    }

    /// Analyse local paths and/or URLs. Inputs that cannot be loaded become
    /// failures of their own document only.
    pub async fn analyze_inputs<S: AsRef<str>>(&self, inputs: &[S], skills: &SkillSet) -> BatchOutcome {
        let mut resolved: Vec<Resolved> = Vec::with_capacity(inputs.len());
        for raw in inputs {
            let raw = raw.as_ref();
            let doc = input::resolve_document(raw, self.download_timeout_secs).await;
            resolved.push((input::display_name(raw), doc));
        }
        self.run(resolved, skills).await
    }

    async fn run(&self, resolved: Vec<Resolved>, skills: &SkillSet) -> BatchOutcome {
        let start = Instant::now();
        let total = resolved.len();
        info!("Analysing {} documents for {} skills", total, skills.len());

        let mut outcome = BatchOutcome::default();
        for warning in &self.startup_warnings {
            self.record_warning(&mut outcome, warning.clone());
        }

        if let Some(ref cb) = self.progress {
            cb.on_batch_start(total);
        }

        for (i, (name, doc)) in resolved.into_iter().enumerate() {
            let index = i + 1;
            if let Some(ref cb) = self.progress {
                cb.on_document_start(index, total, &name);
            }

            let result = match doc {
                Ok(doc) => self.process_document(&doc, skills, &mut outcome).await,
                Err(e) => Err(e),
            };

            match result {
                Ok(skills_doc) => {
                    if let Some(ref cb) = self.progress {
                        cb.on_document_complete(index, total, &name, skills_doc.counts.matched());
                    }
                    outcome.documents.push(skills_doc);
                }
                Err(error) => {
                    warn!("Skipping {}: {}", name, error);
                    if let Some(ref cb) = self.progress {
                        cb.on_document_error(index, total, &name, &error.to_string());
                    }
                    outcome.failures.push(DocumentFailure { name, error });
                }
            }
        }

        if let Some(ref cb) = self.progress {
            cb.on_batch_complete(total, outcome.documents.len());
        }

        info!(
            "Analysis complete: {}/{} documents, {} warnings, {}ms",
            outcome.documents.len(),
            total,
            outcome.warnings.len(),
            start.elapsed().as_millis()
        );
        outcome
    }

    async fn process_document(
        &self,
        doc: &Document,
        skills: &SkillSet,
        outcome: &mut BatchOutcome,
    ) -> Result<DocumentSkills, ExtractionError> {
        let text = self.extractor.extract(doc).await?;

        let normalized = self.normalizer.normalize(text).await;
        if let Some(ref e) = normalized.translation_error {
            self.record_warning(
                outcome,
                Warning::TranslationFailed {
                    document: doc.name.clone(),
                    language: normalized.language.clone(),
                    detail: e.to_string(),
                },
            );
        }

        let cleaned = clean_text(&normalized.text);
        let counts: SkillCounts = count_skills(&cleaned, skills);
        debug!("{}: {:?}", doc.name, counts);

        Ok(DocumentSkills {
            name: doc.name.clone(),
            language: normalized.language,
            translated: normalized.translated,
            counts,
        })
    }

    fn record_warning(&self, outcome: &mut BatchOutcome, warning: Warning) {
        if let Some(ref cb) = self.progress {
            cb.on_warning(&warning);
        }
        outcome.warnings.push(warning);
    }
}

/// Analyse local PDF paths and/or URLs with a fresh session.
///
/// # Example
/// ```rust,no_run
/// use resume_skill_scan::{analyze, AnalysisConfig, SkillSet};
///
/// # #[tokio::main]
/// # async fn main() {
/// let skills = SkillSet::parse("Python, SQL, Tableau");
/// let outcome = analyze(&["alice.pdf", "bob.pdf"], &skills, &AnalysisConfig::default()).await;
/// for doc in &outcome.documents {
///     println!("{}: {:?}", doc.name, doc.counts);
/// }
/// # }
/// ```
pub async fn analyze<S: AsRef<str>>(inputs: &[S], skills: &SkillSet, config: &AnalysisConfig) -> BatchOutcome {
    Analyzer::new(config).analyze_inputs(inputs, skills).await
}

/// Synchronous wrapper around [`analyze`].
///
/// Creates a temporary tokio runtime internally.
pub fn analyze_sync<S: AsRef<str>>(
    inputs: &[S],
    skills: &SkillSet,
    config: &AnalysisConfig,
) -> Result<BatchOutcome, SkillScanError> {
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| SkillScanError::Internal(format!("Failed to create tokio runtime: {}", e)))?;
    Ok(runtime.block_on(analyze(inputs, skills, config)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TranslationError;
    use async_trait::async_trait;
    use whatlang::Lang;

    /// Treats the payload as UTF-8 text; payloads starting with `!` fail.
    struct Utf8Extractor;

    #[async_trait]
    impl TextExtractor for Utf8Extractor {
        async fn extract(&self, document: &Document) -> Result<String, ExtractionError> {
            if document.bytes.starts_with(b"!") {
                return Err(ExtractionError::CorruptPdf {
                    name: document.name.clone(),
                    detail: "broken xref".into(),
                });
            }
            Ok(String::from_utf8_lossy(&document.bytes).into_owned())
        }
    }

    struct DownTranslator;

    #[async_trait]
    impl Translator for DownTranslator {
        async fn translate(&self, _t: &str, _s: Lang, _g: Lang) -> Result<String, TranslationError> {
            Err(TranslationError::Service("503".into()))
        }
    }

    fn analyzer(translator: Option<Arc<dyn Translator>>) -> Analyzer {
        Analyzer::with_components(&AnalysisConfig::default(), Arc::new(Utf8Extractor), translator)
    }

    #[tokio::test]
    async fn counts_each_document() {
        let skills = SkillSet::parse("python, sql, java");
        let docs = vec![Document::from_bytes("a.pdf", b"Python Python SQL".to_vec())];

        let outcome = analyzer(None).analyze_documents(docs, &skills).await;
        assert_eq!(outcome.documents.len(), 1);
        let counts = &outcome.documents[0].counts;
        assert_eq!(counts.get("python"), 2);
        assert_eq!(counts.get("sql"), 1);
        assert_eq!(counts.get("java"), 0);
        assert!(outcome.failures.is_empty());
    }

    #[tokio::test]
    async fn failed_extraction_does_not_abort_batch() {
        let skills = SkillSet::parse("python");
        let docs = vec![
            Document::from_bytes("bad.pdf", b"!garbage".to_vec()),
            Document::from_bytes("good.pdf", b"python".to_vec()),
        ];

        let outcome = analyzer(None).analyze_documents(docs, &skills).await;
        assert_eq!(outcome.documents.len(), 1);
        assert_eq!(outcome.documents[0].name, "good.pdf");
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].name, "bad.pdf");
        assert_eq!(outcome.attempted(), 2);
    }

    #[tokio::test]
    async fn translation_failure_becomes_warning() {
        let skills = SkillSet::parse("tableaux");
        let french = "Je suis une analyste de données expérimentée, spécialisée dans la \
            création de tableaux de bord et la gestion de projets.";
        let docs = vec![
            Document::from_bytes("fr.pdf", french.as_bytes().to_vec()),
            Document::from_bytes(
                "en.pdf",
                b"I am a data analyst who builds dashboards and reports for the finance team \
                  and the marketing department."
                    .to_vec(),
            ),
        ];

        let outcome = analyzer(Some(Arc::new(DownTranslator)))
            .analyze_documents(docs, &skills)
            .await;
        assert_eq!(outcome.documents.len(), 2);
        assert_eq!(outcome.documents[0].language, "fra");
        assert!(!outcome.documents[0].translated);
        assert_eq!(outcome.documents[0].counts.get("tableaux"), 1);
        assert!(matches!(
            &outcome.warnings[..],
            [Warning::TranslationFailed { document, language, .. }]
                if document == "fr.pdf" && language == "fra"
        ));
    }

    #[tokio::test]
    async fn empty_batch_is_empty() {
        let outcome = analyzer(None)
            .analyze_documents(Vec::new(), &SkillSet::parse("python"))
            .await;
        assert!(outcome.documents.is_empty());
        assert!(outcome.failures.is_empty());
    }

    #[tokio::test]
    async fn unreadable_path_is_a_failure() {
        let outcome = analyzer(None)
            .analyze_inputs(&["/no/such/resume.pdf"], &SkillSet::parse("python"))
            .await;
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].name, "resume.pdf");
        assert!(matches!(outcome.failures[0].error, ExtractionError::FileNotFound { .. }));
    }

    #[test]
    fn disabled_translation_has_no_startup_warning() {
        let config = AnalysisConfig::builder().translate(false).build().unwrap();
        assert!(Analyzer::new(&config).startup_warnings().is_empty());
    }
}
