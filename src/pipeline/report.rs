//! What an import run hands back to its caller.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Category of a per-line problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// No date on the line and no record in progress to attach it to.
    ClassificationAmbiguous,
    /// A record-start line could not be split into a record.
    RecordMalformed,
    /// A record's date token could not be converted to a date.
    DateUnresolvable,
    /// The persistence gateway rejected an entry.
    PersistenceFailure,
}

impl DiagnosticKind {
    /// Returns `true` if this kind costs a record, i.e. counts as failed.
    pub fn counts_as_failure(self) -> bool {
        matches!(
            self,
            DiagnosticKind::DateUnresolvable | DiagnosticKind::PersistenceFailure
        )
    }
}

/// A line-numbered note about something that could not be imported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportDiagnostic {
    /// 1-based line number in the original document.
    pub line_number: usize,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl ImportDiagnostic {
    pub fn new(line_number: usize, kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            line_number,
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ImportDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line_number, self.message)
    }
}

/// Outcome of a full import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResult {
    pub imported_count: usize,
    pub failed_count: usize,
    /// Records that reached date resolution.
    pub total_records: usize,
    pub diagnostics: Vec<ImportDiagnostic>,
}

impl ImportResult {
    /// Returns `true` if every record was imported and no line was dropped.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Keeps at most `max` diagnostics, with the real count alongside.
    pub fn summary(&self, max: usize) -> ImportSummary {
        ImportSummary {
            imported_count: self.imported_count,
            failed_count: self.failed_count,
            total_records: self.total_records,
            diagnostic_count: self.diagnostics.len(),
            diagnostics: self.diagnostics.iter().take(max).cloned().collect(),
        }
    }
}

/// An [`ImportResult`] with its diagnostic list truncated for transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub imported_count: usize,
    pub failed_count: usize,
    pub total_records: usize,
    /// Number of diagnostics before truncation.
    pub diagnostic_count: usize,
    pub diagnostics: Vec<ImportDiagnostic>,
}

impl ImportSummary {
    /// Diagnostics left out of [`Self::diagnostics`].
    pub fn omitted(&self) -> usize {
        self.diagnostic_count.saturating_sub(self.diagnostics.len())
    }
}

/// One record as shown in a preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewRecord {
    /// Resolved date, `None` when the token did not parse.
    pub date: Option<NaiveDate>,
    pub date_token: String,
    /// Score as found in the export.
    pub score: i64,
    /// Score after rescaling to 0-10.
    pub mood: u8,
    /// Comment, truncated.
    pub comment: String,
    pub line_number: usize,
}

/// What an import would do, computed without persisting anything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportPreview {
    /// Non-blank data lines, header excluded.
    pub total_lines: usize,
    /// Records found by parsing.
    pub records_found: usize,
    pub sample: Vec<PreviewRecord>,
    pub diagnostics: Vec<ImportDiagnostic>,
}

/// Truncates `text` to at most `max_chars` characters.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
