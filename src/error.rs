//! Error types for the resume-skill-scan library.
//!
//! Three error types reflect three failure scopes:
//!
//! * [`SkillScanError`]: **Fatal** for the call that returns it: bad
//!   configuration, a report or chart that cannot be written, a runtime that
//!   cannot be created.
//!
//! * [`ExtractionError`]: **Per document**: the upload could not be read or
//!   decoded. The document is dropped from the results and the failure is
//!   recorded in [`crate::output::BatchOutcome::failures`]; the rest of the
//!   batch keeps going.
//!
//! * [`TranslationError`]: **Per translation call**. Never propagated: the
//!   normalizer keeps the untranslated text and the failure becomes a
//!   [`crate::output::Warning`].

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors returned by the resume-skill-scan library.
#[derive(Debug, Error)]
pub enum SkillScanError {
    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Translation service ───────────────────────────────────────────────
    /// The configured translation provider could not be initialised.
    ///
    /// Returned by provider resolution only; the analyzer downgrades it to a
    /// [`crate::output::Warning::TranslatorUnavailable`] and runs without
    /// translation.
    #[error("Translation provider '{provider}' is not configured.\n{hint}")]
    ProviderNotConfigured { provider: String, hint: String },

    // ── Output errors ─────────────────────────────────────────────────────
    /// The report document could not be serialised.
    #[error("Failed to build report document: {0}")]
    ReportBuildFailed(String),

    /// Could not create or write the report document.
    #[error("Failed to write report '{path}': {detail}")]
    ReportWriteFailed { path: PathBuf, detail: String },

    /// Could not render the comparison chart.
    #[error("Failed to render chart '{path}': {detail}")]
    ChartRenderFailed { path: PathBuf, detail: String },

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A document could not be turned into text.
///
/// Stored in [`crate::output::DocumentFailure`]; the batch continues.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum ExtractionError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'")]
    PermissionDenied { path: PathBuf },

    /// The path exists but could not be read as a file (a directory, an I/O fault).
    #[error("Failed to read '{path}': {detail}")]
    ReadFailed { path: PathBuf, detail: String },

    /// HTTP URL was syntactically valid but download failed.
    #[error("Failed to download '{url}': {reason}")]
    DownloadFailed { url: String, reason: String },

    /// Download exceeded the configured timeout.
    #[error("Download timed out after {secs}s for '{url}'")]
    DownloadTimeout { url: String, secs: u64 },

    /// The payload was read, but it is not a PDF.
    #[error("'{name}' is not a valid PDF (first bytes: {magic:?})")]
    NotAPdf { name: String, magic: Vec<u8> },

    // ── PDF errors ────────────────────────────────────────────────────────
    /// PDF header/trailer/xref is corrupt and cannot be parsed.
    #[error("PDF '{name}' is corrupt: {detail}")]
    CorruptPdf { name: String, detail: String },

    /// PDF requires a password but none was provided.
    #[error("PDF '{name}' is encrypted and requires a password")]
    PasswordRequired { name: String },

    /// A password was provided but it is wrong.
    #[error("Wrong password for PDF '{name}'")]
    WrongPassword { name: String },

    /// pdfium could not read the text layer of one page.
    #[error("Text extraction failed for '{name}' page {page}: {detail}")]
    PageTextFailed {
        name: String,
        page: usize,
        detail: String,
    },

    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\
Set PDFIUM_LIB_PATH=/path/to/libpdfium or place the library in the working directory."
    )]
    PdfiumBindingFailed(String),

    /// The blocking extraction task died.
    #[error("Extraction task failed: {0}")]
    TaskFailed(String),
}

/// A single translation request failed.
#[derive(Debug, Clone, PartialEq, Eq, Error, serde::Serialize, serde::Deserialize)]
pub enum TranslationError {
    /// The provider returned an error (unavailable, input too long, …).
    #[error("translation service error: {0}")]
    Service(String),

    /// The provider answered with no usable text.
    #[error("translation service returned an empty response")]
    EmptyResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_a_pdf_display() {
        let e = ExtractionError::NotAPdf {
            name: "cv.txt".into(),
            magic: b"Hell".to_vec(),
        };
        let msg = e.to_string();
        assert!(msg.contains("cv.txt"), "got: {msg}");
        assert!(msg.contains("not a valid PDF"), "got: {msg}");
    }

    #[test]
    fn page_text_failed_display() {
        let e = ExtractionError::PageTextFailed {
            name: "a.pdf".into(),
            page: 3,
            detail: "bad stream".into(),
        };
        assert!(e.to_string().contains("page 3"));
        assert!(e.to_string().contains("bad stream"));
    }

    #[test]
    fn read_failed_display_keeps_io_detail() {
        let e = ExtractionError::ReadFailed {
            path: PathBuf::from("/srv/resumes"),
            detail: "Is a directory (os error 21)".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("/srv/resumes"), "got: {msg}");
        assert!(msg.contains("Is a directory"), "got: {msg}");
        assert!(!msg.contains("not found"), "got: {msg}");
    }

    #[test]
    fn provider_not_configured_display() {
        let e = SkillScanError::ProviderNotConfigured {
            provider: "auto".into(),
            hint: "Set OPENAI_API_KEY".into(),
        };
        assert!(e.to_string().contains("auto"));
        assert!(e.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn extraction_error_serializes() {
        let e = ExtractionError::PasswordRequired {
            name: "locked.pdf".into(),
        };
        let json = serde_json::to_string(&e).expect("serialize");
        assert!(json.contains("PasswordRequired"));
        assert!(json.contains("locked.pdf"));
    }
}
