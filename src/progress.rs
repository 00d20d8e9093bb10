//! Progress-callback trait for per-document analysis events.
//!
//! Inject an [`Arc<dyn AnalysisProgressCallback>`] via
//! [`crate::config::AnalysisConfigBuilder::progress_callback`] to receive
//! events as the batch moves through its documents. This is also the channel
//! through which non-fatal problems (translation fallbacks, unreadable
//! uploads) reach the user as they happen; the same information is collected
//! in [`crate::output::BatchOutcome`] for callers that prefer to inspect it
//! afterwards.
//!
//! # Example
//!
//! ```rust
//! use resume_skill_scan::{AnalysisConfig, AnalysisProgressCallback};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     done: AtomicUsize,
//! }
//!
//! impl AnalysisProgressCallback for CountingCallback {
//!     fn on_document_complete(&self, index: usize, total: usize, name: &str, _matched: usize) {
//!         self.done.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("{index}/{total} {name}");
//!     }
//! }
//!
//! let config = AnalysisConfig::builder()
//!     .progress_callback(Arc::new(CountingCallback { done: AtomicUsize::new(0) }))
//!     .build()
//!     .unwrap();
//! ```

use crate::output::Warning;
use std::sync::Arc;

/// Called by the analyzer as it processes each document.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. Documents are processed one at a time, but the trait
/// is `Send + Sync` so a callback can be shared with other tasks.
pub trait AnalysisProgressCallback: Send + Sync {
    /// Called once before the first document is read.
    fn on_batch_start(&self, total_documents: usize) {
        let _ = total_documents;
    }

    /// Called before a document is extracted.
    ///
    /// # Arguments
    /// * `index`: 1-indexed position in the batch
    /// * `total`: number of documents in the batch
    /// * `name` : display name of the document
    fn on_document_start(&self, index: usize, total: usize, name: &str) {
        let _ = (index, total, name);
    }

    /// Called when a document has been counted.
    ///
    /// `matched_skills` is the number of skills with a non-zero count.
    fn on_document_complete(&self, index: usize, total: usize, name: &str, matched_skills: usize) {
        let _ = (index, total, name, matched_skills);
    }

    /// Called when a document could not be read and is left out of the results.
    fn on_document_error(&self, index: usize, total: usize, name: &str, error: &str) {
        let _ = (index, total, name, error);
    }

    /// Called for every non-fatal warning, in the order it is recorded.
    fn on_warning(&self, warning: &Warning) {
        let _ = warning;
    }

    /// Called once after every document has been attempted.
    fn on_batch_complete(&self, total_documents: usize, success_count: usize) {
        let _ = (total_documents, success_count);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl AnalysisProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::AnalysisConfig`].
pub type ProgressCallback = Arc<dyn AnalysisProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct TrackingCallback {
        starts: AtomicUsize,
        completes: AtomicUsize,
        errors: AtomicUsize,
        warnings: AtomicUsize,
        batch_total: AtomicUsize,
        batch_success: AtomicUsize,
    }

    impl AnalysisProgressCallback for TrackingCallback {
        fn on_batch_start(&self, total_documents: usize) {
            self.batch_total.store(total_documents, Ordering::SeqCst);
        }

        fn on_document_start(&self, _index: usize, _total: usize, _name: &str) {
            self.starts.fetch_add(1, Ordering::SeqCst);
        }

        fn on_document_complete(&self, _i: usize, _t: usize, _name: &str, _matched: usize) {
            self.completes.fetch_add(1, Ordering::SeqCst);
        }

        fn on_document_error(&self, _i: usize, _t: usize, _name: &str, _error: &str) {
            self.errors.fetch_add(1, Ordering::SeqCst);
        }

        fn on_warning(&self, _warning: &Warning) {
            self.warnings.fetch_add(1, Ordering::SeqCst);
        }

        fn on_batch_complete(&self, _total: usize, success_count: usize) {
            self.batch_success.store(success_count, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_batch_start(2);
        cb.on_document_start(1, 2, "a.pdf");
        cb.on_document_complete(1, 2, "a.pdf", 3);
        cb.on_document_error(2, 2, "b.pdf", "corrupt");
        cb.on_warning(&Warning::TranslatorUnavailable {
            reason: "no key".into(),
        });
        cb.on_batch_complete(2, 1);
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback::default();

        tracker.on_batch_start(3);
        tracker.on_document_start(1, 3, "a.pdf");
        tracker.on_document_complete(1, 3, "a.pdf", 2);
        tracker.on_document_start(2, 3, "b.pdf");
        tracker.on_warning(&Warning::TranslationFailed {
            document: "b.pdf".into(),
            language: "fra".into(),
            detail: "timeout".into(),
        });
        tracker.on_document_complete(2, 3, "b.pdf", 0);
        tracker.on_document_start(3, 3, "c.pdf");
        tracker.on_document_error(3, 3, "c.pdf", "not a PDF");
        tracker.on_batch_complete(3, 2);

        assert_eq!(tracker.batch_total.load(Ordering::SeqCst), 3);
        assert_eq!(tracker.starts.load(Ordering::SeqCst), 3);
        assert_eq!(tracker.completes.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.errors.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.warnings.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.batch_success.load(Ordering::SeqCst), 2);
    }
}
