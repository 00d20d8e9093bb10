//! Input resolution: load a user-supplied path or URL into memory.
//!
//! Documents are small (resumes) and read exactly once, so they are held as
//! an in-memory blob plus a display name for the rest of the pass. pdfium
//! decodes straight from the byte slice; no temporary file is needed.

use crate::error::ExtractionError;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// An uploaded document: opaque bytes plus the name it was uploaded under.
#[derive(Clone)]
pub struct Document {
    /// Display name (the original file name).
    pub name: String,
    /// Raw payload, shared cheaply with the blocking extraction task.
    pub bytes: Arc<[u8]>,
}

impl Document {
    /// Wrap an in-memory upload.
    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("name", &self.name)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// Check if the input string looks like a URL.
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Display name for an input: the last path or URL segment.
pub fn display_name(input: &str) -> String {
    if is_url(input) {
        if let Ok(parsed) = reqwest::Url::parse(input) {
            if let Some(mut segments) = parsed.path_segments() {
                if let Some(last) = segments.next_back() {
                    if !last.is_empty() {
                        return last.to_string();
                    }
                }
            }
        }
        return "downloaded.pdf".to_string();
    }

    Path::new(input)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.to_string())
}

/// Resolve a path or URL into a [`Document`].
pub async fn resolve_document(input: &str, timeout_secs: u64) -> Result<Document, ExtractionError> {
    if is_url(input) {
        download_url(input, timeout_secs).await
    } else {
        read_local(input).await
    }
}

async fn read_local(path_str: &str) -> Result<Document, ExtractionError> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(ExtractionError::FileNotFound { path });
    }
    if path.is_dir() {
        return Err(ExtractionError::ReadFailed {
            path,
            detail: "path is a directory".to_string(),
        });
    }

    let bytes = tokio::fs::read(&path).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ExtractionError::FileNotFound { path: path.clone() },
        std::io::ErrorKind::PermissionDenied => ExtractionError::PermissionDenied { path: path.clone() },
        _ => ExtractionError::ReadFailed {
            path: path.clone(),
            detail: e.to_string(),
        },
    })?;

    debug!("Read {} bytes from {}", bytes.len(), path.display());
    Ok(Document::from_bytes(display_name(path_str), bytes))
}

async fn download_url(url: &str, timeout_secs: u64) -> Result<Document, ExtractionError> {
    info!("Downloading PDF from: {}", url);

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| ExtractionError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            ExtractionError::DownloadTimeout {
                url: url.to_string(),
                secs: timeout_secs,
            }
        } else {
            ExtractionError::DownloadFailed {
                url: url.to_string(),
                reason: e.to_string(),
            }
        }
    })?;

    if !response.status().is_success() {
        return Err(ExtractionError::DownloadFailed {
            url: url.to_string(),
            reason: format!("HTTP {}", response.status()),
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| ExtractionError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    info!("Downloaded {} bytes from {}", bytes.len(), url);
    Ok(Document::from_bytes(display_name(url), bytes.to_vec()))
}
