//! Text extraction: concatenate the text layer of every PDF page via pdfium.
//!
//! ## Why spawn_blocking?
//!
//! `pdfium-render` wraps the pdfium C++ library, which uses thread-local
//! state internally and is not safe to call from async contexts. The decode
//! runs on Tokio's blocking pool so the runtime threads never stall.
//!
//! Pages are visited in stored order and their text is appended with no
//! separator; whatever line layout pdfium yields inside a page is kept as is.

use crate::error::ExtractionError;
use crate::pipeline::input::Document;
use async_trait::async_trait;
use pdfium_render::prelude::*;
use tracing::{debug, info};

/// Turns a document into plain text.
///
/// Carried by the analyzer as `Arc<dyn TextExtractor>`, so tests and
/// alternative decoders can stand in for pdfium.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, document: &Document) -> Result<String, ExtractionError>;
}

/// Production extractor backed by pdfium.
#[derive(Debug, Clone, Default)]
pub struct PdfiumExtractor {
    password: Option<String>,
}

impl PdfiumExtractor {
    pub fn new(password: Option<String>) -> Self {
        Self { password }
    }
}

#[async_trait]
impl TextExtractor for PdfiumExtractor {
    async fn extract(&self, document: &Document) -> Result<String, ExtractionError> {
        check_pdf_magic(document)?;

        let name = document.name.clone();
        let bytes = document.bytes.clone();
        let password = self.password.clone();

        let text = tokio::task::spawn_blocking(move || {
            extract_text_blocking(&name, &bytes, password.as_deref())
        })
        .await
        .map_err(|e| ExtractionError::TaskFailed(format!("extraction task panicked: {e}")))??;

        info!("Extracted {} chars from {}", text.len(), document.name);
        Ok(text)
    }
}

/// Reject payloads that do not start with the `%PDF` signature.
pub fn check_pdf_magic(document: &Document) -> Result<(), ExtractionError> {
    if document.bytes.starts_with(b"%PDF") {
        return Ok(());
    }
    Err(ExtractionError::NotAPdf {
        name: document.name.clone(),
        magic: document.bytes.iter().take(4).copied().collect(),
    })
}

/// Bind to a pdfium library: `PDFIUM_LIB_PATH`, then the working directory,
/// then the system library search path.
pub fn bind_pdfium() -> Result<Pdfium, ExtractionError> {
    let bindings = match std::env::var("PDFIUM_LIB_PATH") {
        Ok(path) if !path.is_empty() => Pdfium::bind_to_library(&path),
        _ => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library()),
    }
    .map_err(|e| ExtractionError::PdfiumBindingFailed(format!("{e:?}")))?;

    Ok(Pdfium::new(bindings))
}

fn extract_text_blocking(
    name: &str,
    bytes: &[u8],
    password: Option<&str>,
) -> Result<String, ExtractionError> {
    let pdfium = bind_pdfium()?;

    let document = pdfium
        .load_pdf_from_byte_slice(bytes, password)
        .map_err(|e| classify_load_error(name, password.is_some(), format!("{e:?}")))?;

    let pages = document.pages();
    debug!("{}: {} pages", name, pages.len());

    let mut text = String::new();
    for (idx, page) in pages.iter().enumerate() {
        let page_text = page.text().map_err(|e| ExtractionError::PageTextFailed {
            name: name.to_string(),
            page: idx + 1,
            detail: format!("{e:?}"),
        })?;
        text.push_str(&page_text.all());
    }

    Ok(text)
}

fn classify_load_error(name: &str, had_password: bool, detail: String) -> ExtractionError {
    if detail.contains("Password") || detail.contains("password") {
        if had_password {
            ExtractionError::WrongPassword {
                name: name.to_string(),
            }
        } else {
            ExtractionError::PasswordRequired {
                name: name.to_string(),
            }
        }
    } else {
        ExtractionError::CorruptPdf {
            name: name.to_string(),
            detail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magic_accepts_pdf_header() {
        let doc = Document::from_bytes("a.pdf", b"%PDF-1.4\n...".to_vec());
        assert!(check_pdf_magic(&doc).is_ok());
    }

    #[test]
    fn magic_rejects_other_payloads() {
        let doc = Document::from_bytes("a.docx", b"PK\x03\x04rest".to_vec());
        match check_pdf_magic(&doc) {
            Err(ExtractionError::NotAPdf { name, magic }) => {
                assert_eq!(name, "a.docx");
                assert_eq!(magic, b"PK\x03\x04".to_vec());
            }
            other => panic!("expected NotAPdf, got {other:?}"),
        }
    }

    #[test]
    fn magic_rejects_empty_payload() {
        let doc = Document::from_bytes("empty.pdf", Vec::new());
        assert!(matches!(
            check_pdf_magic(&doc),
            Err(ExtractionError::NotAPdf { .. })
        ));
    }

    #[tokio::test]
    async fn pdfium_extractor_rejects_non_pdf_before_binding() {
        let doc = Document::from_bytes("notes.txt", b"plain text".to_vec());
        let err = PdfiumExtractor::default().extract(&doc).await.unwrap_err();
        assert!(matches!(err, ExtractionError::NotAPdf { .. }));
    }

    #[test]
    fn load_errors_are_classified() {
        assert!(matches!(
            classify_load_error("x.pdf", false, "PdfiumLibraryInternalError(PasswordError)".into()),
            ExtractionError::PasswordRequired { .. }
        ));
        assert!(matches!(
            classify_load_error("x.pdf", true, "PdfiumLibraryInternalError(PasswordError)".into()),
            ExtractionError::WrongPassword { .. }
        ));
        assert!(matches!(
            classify_load_error("x.pdf", false, "PdfiumLibraryInternalError(FormatError)".into()),
            ExtractionError::CorruptPdf { .. }
        ));
    }
}
