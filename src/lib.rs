//! # resume-skill-scan
//!
//! Count skill keywords across a batch of PDF resumes, translating
//! non-English resumes first, and compare the results.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Input      local file or URL → named in-memory document
//!  ├─ 2. Extract    page text via pdfium, pages in stored order
//!  ├─ 3. Normalize  detect language (whatlang); translate via LLM if needed
//!  ├─ 4. Clean      spaces → line breaks, collapse, trim
//!  ├─ 5. Count      case-insensitive substring count per skill
//!  └─ 6. Report     filtered comparison table, SVG chart, .docx report
//! ```
//!
//! Documents are processed one at a time. A document that cannot be read is
//! left out and reported; a translation that fails falls back to the original
//! text with a warning. Neither stops the batch.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use resume_skill_scan::{analyze, build_outputs, AnalysisConfig, SkillSet};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let skills = SkillSet::parse("Python, SQL, Tableau");
//!     let outcome = analyze(&["alice.pdf", "bob.pdf"], &skills, &AnalysisConfig::default()).await;
//!
//!     let (table, report) = build_outputs(&outcome.documents, &skills);
//!     print!("{}", table.render_text());
//!     report.write_docx(Path::new("skills_comparison_report.docx"))?;
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `skillscan` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod analyze;
pub mod chart;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod prompts;
pub mod report;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use analyze::{analyze, analyze_sync, Analyzer};
pub use chart::render_chart;
pub use config::{parse_language, AnalysisConfig, AnalysisConfigBuilder};
pub use error::{ExtractionError, SkillScanError, TranslationError};
pub use output::{BatchOutcome, DocumentFailure, DocumentSkills, Warning};
pub use pipeline::clean::clean_text;
pub use pipeline::count::{count_skills, SkillCounts, SkillSet, DEFAULT_SKILLS};
pub use pipeline::extract::{PdfiumExtractor, TextExtractor};
pub use pipeline::input::Document;
pub use pipeline::normalize::{LanguageNormalizer, NormalizedText};
pub use pipeline::translate::{LlmTranslator, Translator};
pub use progress::{AnalysisProgressCallback, NoopProgressCallback, ProgressCallback};
pub use report::{
    build_outputs, qualifies, row_labels, ComparisonTable, Report, ReportEntry, TableRow, REPORT_FILE_NAME,
    REPORT_MIME_TYPE,
};
