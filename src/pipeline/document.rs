//! Lines to candidate records.
//!
//! A record starts on a line whose leading field looks like a date. Every
//! following line that does not is a continuation and goes into the
//! record's comment.

use serde::{Deserialize, Serialize};

use crate::parsing::{CandidateRecord, LineClassifier, RecordParser};

use super::report::{DiagnosticKind, ImportDiagnostic};

/// A non-blank input line with its 1-based position in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawLine<'a> {
    pub number: usize,
    pub text: &'a str,
}

/// Result of grouping a document into records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedDocument {
    /// Finalized records, in document order.
    pub candidates: Vec<CandidateRecord>,
    /// Lines that could not become or join a record.
    pub diagnostics: Vec<ImportDiagnostic>,
    /// Non-blank lines considered, header excluded.
    pub data_lines: usize,
}

/// Splits `text` into non-blank lines, dropping the header if asked.
///
/// Carriage returns and a leading byte-order mark are removed first. Line
/// numbers still count the blank lines that were dropped.
pub fn raw_lines(text: &str, skip_header_line: bool) -> Vec<RawLine<'_>> {
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
    let mut lines: Vec<RawLine<'_>> = text
        .split('\n')
        .enumerate()
        .map(|(idx, line)| RawLine {
            number: idx + 1,
            text: line.strip_suffix('\r').unwrap_or(line),
        })
        .filter(|line| !line.text.trim().is_empty())
        .collect();

    if skip_header_line && !lines.is_empty() {
        lines.remove(0);
    }
    lines
}

/// Walks the lines once, building records and diagnostics.
pub fn group_records(
    lines: &[RawLine<'_>],
    classifier: &LineClassifier,
    parser: &RecordParser,
    delimiter: char,
) -> ParsedDocument {
    let mut doc = ParsedDocument {
        data_lines: lines.len(),
        ..ParsedDocument::default()
    };
    let mut current: Option<CandidateRecord> = None;

    for line in lines {
        // Stray carriage returns inside a line are dropped as well.
        let text = line.text.replace('\r', "");

        if classifier.is_record_start(&text, delimiter) {
            if let Some(done) = current.take() {
                doc.candidates.push(done);
            }
            match parser.parse(&text, line.number, delimiter) {
                Ok(record) => {
                    tracing::debug!(
                        line = line.number,
                        token = %record.date_token,
                        repaired = record.repaired,
                        "record start"
                    );
                    current = Some(record);
                }
                Err(err) => {
                    tracing::debug!(line = line.number, error = %err, "malformed record");
                    doc.diagnostics.push(ImportDiagnostic::new(
                        line.number,
                        DiagnosticKind::RecordMalformed,
                        format!("could not parse record: {err}"),
                    ));
                }
            }
        } else if let Some(record) = current.as_mut() {
            record.append_continuation(&text);
        } else {
            doc.diagnostics.push(ImportDiagnostic::new(
                line.number,
                DiagnosticKind::ClassificationAmbiguous,
                "no date detected and no prior entry",
            ));
        }
    }

    if let Some(done) = current {
        doc.candidates.push(done);
    }
    doc
}
