//! Report building: the filtered comparison table and the Word report.
//!
//! A document *qualifies* when at least one of the **required** skills has a
//! non-zero count. Only qualifying documents reach the table and the report,
//! but once a document qualifies every one of its counts is shown.
//!
//! Rows are keyed by document name. When several uploads share a file name
//! (`a/cv.pdf`, `b/cv.pdf`) the later ones are labelled `cv.pdf (2)`,
//! `cv.pdf (3)`, … in upload order, in both the table and the report.

use crate::error::SkillScanError;
use crate::output::DocumentSkills;
use crate::pipeline::count::{SkillCounts, SkillSet};
use docx_rs::{Docx, Paragraph, Run};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::io::{Cursor, Write};
use std::path::Path;
use tracing::info;

/// Default file name of the generated report.
pub const REPORT_FILE_NAME: &str = "skills_comparison_report.docx";

/// MIME type of the generated report.
pub const REPORT_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Title at the top of the report.
pub const REPORT_TITLE: &str = "Skills Comparison Report";

/// True if any required skill has a non-zero count in `counts`.
pub fn qualifies(counts: &SkillCounts, required: &SkillSet) -> bool {
    counts.matches_any(required)
}

/// Unique display labels for `documents`, in the same order.
pub fn row_labels(documents: &[DocumentSkills]) -> Vec<String> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut taken: BTreeSet<String> = documents.iter().map(|d| d.name.clone()).collect();
    documents
        .iter()
        .map(|d| {
            let n = seen.entry(d.name.as_str()).or_insert(0);
            if *n == 0 {
                *n = 1;
                return d.name.clone();
            }
            loop {
                *n += 1;
                let label = format!("{} ({})", d.name, n);
                if taken.insert(label.clone()) {
                    return label;
                }
            }
        })
        .collect()
}

/// One table row: a document and its count for every column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub document: String,
    pub counts: Vec<usize>,
}

/// Qualifying documents × skill labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonTable {
    /// Every skill label seen in any document of the run, sorted.
    pub columns: Vec<String>,
    /// One row per qualifying document, in upload order.
    pub rows: Vec<TableRow>,
}

impl ComparisonTable {
    /// Build the table from the analysed documents.
    pub fn build(documents: &[DocumentSkills], required: &SkillSet) -> Self {
        let columns: Vec<String> = documents
            .iter()
            .flat_map(|d| d.counts.labels())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect();

        let rows = documents
            .iter()
            .zip(row_labels(documents))
            .filter(|(d, _)| qualifies(&d.counts, required))
            .map(|(d, document)| TableRow {
                document,
                counts: columns.iter().map(|c| d.counts.get(c)).collect(),
            })
            .collect();

        Self { columns, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Largest cell value, 0 for an empty table.
    pub fn max_count(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|r| r.counts.iter().copied())
            .max()
            .unwrap_or(0)
    }

    /// Fixed-width text rendering for terminals.
    pub fn render_text(&self) -> String {
        if self.is_empty() {
            return "No resumes match the required skills.\n".to_string();
        }

        let first_width = self
            .rows
            .iter()
            .map(|r| r.document.chars().count())
            .chain(std::iter::once("Resume".len()))
            .max()
            .unwrap_or(0);
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, c)| {
                self.rows
                    .iter()
                    .map(|r| r.counts[i].to_string().len())
                    .chain(std::iter::once(c.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = format!("{:<first_width$}", "Resume");
        for (c, w) in self.columns.iter().zip(widths.iter().copied()) {
            out.push_str(&format!("  {c:>w$}"));
        }
        out.push('\n');

        for row in &self.rows {
            out.push_str(&format!("{:<first_width$}", row.document));
            for (n, w) in row.counts.iter().zip(widths.iter().copied()) {
                out.push_str(&format!("  {n:>w$}"));
            }
            out.push('\n');
        }
        out
    }
}

/// One report section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub document: String,
    pub counts: SkillCounts,
}

/// The qualifying documents and their counts, in upload order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub entries: Vec<ReportEntry>,
}

impl Report {
    pub fn build(documents: &[DocumentSkills], required: &SkillSet) -> Self {
        let entries = documents
            .iter()
            .zip(row_labels(documents))
            .filter(|(d, _)| qualifies(&d.counts, required))
            .map(|(d, document)| ReportEntry {
                document,
                counts: d.counts.clone(),
            })
            .collect();
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The report body as paragraphs, title first. Empty strings are the
    /// blank separator paragraphs.
    pub fn paragraphs(&self) -> Vec<String> {
        let mut lines = vec![REPORT_TITLE.to_string()];
        for entry in &self.entries {
            lines.push(format!("Resume: {}", entry.document));
            lines.push("Skills:".to_string());
            for (skill, count) in entry.counts.iter() {
                lines.push(format!("{skill}: {count}"));
            }
            lines.push(String::new());
        }
        lines
    }

    /// Serialise the report as a `.docx` document.
    pub fn to_docx_bytes(&self) -> Result<Vec<u8>, SkillScanError> {
        let mut paragraphs = self.paragraphs().into_iter();
        let title = paragraphs.next().unwrap_or_default();

        let mut docx = Docx::new().add_paragraph(
            Paragraph::new().add_run(Run::new().add_text(title).size(56).bold()),
        );
        for line in paragraphs {
            let paragraph = if line.is_empty() {
                Paragraph::new()
            } else {
                Paragraph::new().add_run(Run::new().add_text(line))
            };
            docx = docx.add_paragraph(paragraph);
        }

        let mut buf = Cursor::new(Vec::new());
        docx.build()
            .pack(&mut buf)
            .map_err(|e| SkillScanError::ReportBuildFailed(e.to_string()))?;
        Ok(buf.into_inner())
    }

    /// Write the `.docx` report to `path` atomically (temp file + rename).
    pub fn write_docx(&self, path: &Path) -> Result<(), SkillScanError> {
        let fail = |detail: String| SkillScanError::ReportWriteFailed {
            path: path.to_path_buf(),
            detail,
        };

        let bytes = self.to_docx_bytes()?;

        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(|e| fail(e.to_string()))?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| fail(e.to_string()))?;
        tmp.write_all(&bytes).map_err(|e| fail(e.to_string()))?;
        tmp.persist(path).map_err(|e| fail(e.error.to_string()))?;

        info!(
            "Report with {} resumes written to {}",
            self.entries.len(),
            path.display()
        );
        Ok(())
    }
}

/// Build the table and the report in one call.
pub fn build_outputs(documents: &[DocumentSkills], required: &SkillSet) -> (ComparisonTable, Report) {
    (
        ComparisonTable::build(documents, required),
        Report::build(documents, required),
    )
}
