//! Candidate records to normalized entries.

use chrono::{NaiveDate, NaiveTime};

use crate::entry::{MAX_MOOD, NormalizedEntry};
use crate::parsing::{CandidateRecord, DateParser};

use super::report::{DiagnosticKind, ImportDiagnostic};

/// Maps a raw score onto the 0-10 mood scale.
///
/// Scores above 10 are read as percentages: divided by ten and rounded
/// half away from zero, so 85 becomes 9 and 84 becomes 8. Negative scores
/// become 0 and the result never exceeds 10.
///
/// ```rust
/// use moodimport::pipeline::normalize_score;
///
/// assert_eq!(normalize_score(7), 7);
/// assert_eq!(normalize_score(85), 9);
/// assert_eq!(normalize_score(-3), 0);
/// ```
pub fn normalize_score(score: i64) -> u8 {
    let scaled = if score > 10 {
        (score as f64 / 10.0).round() as i64
    } else {
        score
    };
    scaled.clamp(0, i64::from(MAX_MOOD)) as u8
}

/// Splits a raw emotions field into tags on `,` and `;`.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split([',', ';'])
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// A normalized entry together with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedEntry {
    pub entry: NormalizedEntry,
    pub date_token: String,
    pub line_number: usize,
}

/// Result of resolving every candidate of a document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedBatch {
    pub entries: Vec<ResolvedEntry>,
    /// One `DateUnresolvable` diagnostic per dropped candidate.
    pub diagnostics: Vec<ImportDiagnostic>,
    /// Number of candidates that went in.
    pub total_records: usize,
}

/// Builds the entry for a candidate whose date resolved to `date`.
pub fn to_entry(user_id: i64, date: NaiveDate, record: &CandidateRecord) -> NormalizedEntry {
    let timestamp = date.and_time(NaiveTime::MIN).and_utc();
    NormalizedEntry::new(user_id, normalize_score(record.score), timestamp)
        .with_note(record.comment.trim())
        .with_tags(split_tags(&record.emotions_raw))
        .with_sleep_hours(record.sleep_hours)
        .with_medication(record.medication_dose)
        .with_emotions(record.emotions_raw.clone())
}

/// Resolves the date of every candidate and builds its entry.
pub fn resolve_all(
    candidates: &[CandidateRecord],
    dates: &DateParser,
    user_id: i64,
) -> ResolvedBatch {
    let mut batch = ResolvedBatch {
        total_records: candidates.len(),
        ..ResolvedBatch::default()
    };

    for record in candidates {
        match dates.parse(&record.date_token) {
            Ok(date) => {
                tracing::debug!(line = record.start_line, %date, "resolved entry");
                batch.entries.push(ResolvedEntry {
                    entry: to_entry(user_id, date, record),
                    date_token: record.date_token.clone(),
                    line_number: record.start_line,
                });
            }
            Err(err) => {
                tracing::debug!(line = record.start_line, token = %record.date_token, "unresolvable date");
                batch.diagnostics.push(ImportDiagnostic::new(
                    record.start_line,
                    DiagnosticKind::DateUnresolvable,
                    err.to_string(),
                ));
            }
        }
    }
    batch
}
