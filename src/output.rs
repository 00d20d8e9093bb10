//! Result types produced by one analysis pass.

use crate::error::ExtractionError;
use crate::pipeline::count::SkillCounts;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Skill counts for one successfully processed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSkills {
    /// Display name (original file name).
    pub name: String,
    /// ISO 639-3 code of the detected language, `und` when undetectable.
    pub language: String,
    /// True when the counted text is a translation.
    pub translated: bool,
    /// Count per skill label, ordered by label.
    pub counts: SkillCounts,
}

/// A document that could not be read and is absent from the results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentFailure {
    pub name: String,
    pub error: ExtractionError,
}

/// A non-fatal problem surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum Warning {
    /// The translation service could not be started; no document is translated.
    #[error("translation disabled for this session: {reason}")]
    TranslatorUnavailable { reason: String },

    /// One document kept its original text because translation failed.
    #[error("'{document}' ({language}) analysed untranslated: {detail}")]
    TranslationFailed {
        document: String,
        language: String,
        detail: String,
    },
}

/// Everything one pass over the uploaded documents produced.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// Successfully counted documents, in upload order.
    pub documents: Vec<DocumentSkills>,
    /// Documents excluded because they could not be read.
    pub failures: Vec<DocumentFailure>,
    /// Warnings in the order they were raised.
    pub warnings: Vec<Warning>,
}

impl BatchOutcome {
    /// Number of documents attempted.
    pub fn attempted(&self) -> usize {
        self.documents.len() + self.failures.len()
    }
}
