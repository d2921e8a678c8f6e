//! Record-start line parsing.
//!
//! A record line is split into positional fields:
//!
//! | # | Field | Default when missing or unparsable |
//! |---|-------|-------------------------------------|
//! | 0 | date token | (kept as text, resolved later) |
//! | 1 | score | `5` |
//! | 2 | sleep hours | `0` |
//! | 3 | medication dose | `0` |
//! | 4 | emotions | empty |
//! | 5 | comment | empty |
//!
//! Double quotes toggle an "inside quotes" state in which the delimiter is
//! literal text. The quote characters themselves are dropped. Delimiters
//! after the fifth one belong to the comment.
//!
//! Lines with fewer than two fields go through repair mode (when enabled):
//! the line is scanned for an embedded date and a score, and whatever text
//! remains becomes the comment.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::dates::DateParser;

/// Score used when the score field is missing or unparsable.
pub const DEFAULT_SCORE: i64 = 5;

/// Positional fields in a record line. Delimiters past the last one are text.
pub const FIELD_COUNT: usize = 6;

/// Why a record-start line could not be turned into a candidate record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedRecord {
    /// The line has fewer than two fields and repair mode is off.
    #[error("expected at least 2 fields, found {found}")]
    TooFewFields { found: usize },

    /// Repair mode found no date-like text anywhere in the line.
    #[error("no date found in line")]
    NoEmbeddedDate,
}

/// A mood entry under construction.
///
/// Created from a record-start line; only `comment` changes afterwards,
/// as continuation lines are folded in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    /// Date text, not yet resolved.
    pub date_token: String,

    /// Raw score as written in the export.
    pub score: i64,

    /// Hours of sleep.
    pub sleep_hours: f64,

    /// Medication dose.
    pub medication_dose: f64,

    /// Emotion list as written (`"calme, joyeux"`), possibly empty.
    pub emotions_raw: String,

    /// Free-text comment; may span several physical lines.
    pub comment: String,

    /// 1-based line number of the record-start line.
    pub start_line: usize,

    /// `true` if the record was recovered by repair mode.
    #[serde(default)]
    pub repaired: bool,
}

impl CandidateRecord {
    /// Creates a record with every field at its default.
    pub fn new(date_token: impl Into<String>, start_line: usize) -> Self {
        Self {
            date_token: date_token.into(),
            score: DEFAULT_SCORE,
            sleep_hours: 0.0,
            medication_dose: 0.0,
            emotions_raw: String::new(),
            comment: String::new(),
            start_line,
            repaired: false,
        }
    }

    /// Folds a continuation line into the comment, separated by a newline.
    pub fn append_continuation(&mut self, line: &str) {
        let text: String = line.trim().chars().filter(|&c| c != '"').collect();
        if self.comment.is_empty() {
            self.comment = text;
        } else {
            self.comment.push('\n');
            self.comment.push_str(&text);
        }
    }
}

/// Splits a line on `delimiter`, honouring double quotes.
///
/// Quote characters are removed and every field is trimmed.
///
/// ```rust
/// use moodimport::parsing::split_fields;
///
/// let fields = split_fields(r#"2024-01-15,7,"Bonjour, ça va""#, ',');
/// assert_eq!(fields, vec!["2024-01-15", "7", "Bonjour, ça va"]);
/// ```
pub fn split_fields(line: &str, delimiter: char) -> Vec<String> {
    splitn_fields(line, delimiter, usize::MAX)
}

/// Like [`split_fields`], but returns at most `limit` fields. The last field
/// holds the rest of the line with its delimiters and spacing intact.
///
/// ```rust
/// use moodimport::parsing::splitn_fields;
///
/// let fields = splitn_fields("a,b,Bonjour, ça va", ',', 3);
/// assert_eq!(fields, vec!["a", "b", "Bonjour, ça va"]);
/// ```
pub fn splitn_fields(line: &str, delimiter: char, limit: usize) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        if c == '"' {
            in_quotes = !in_quotes;
        } else if c == delimiter && !in_quotes && fields.len() + 1 < limit {
            fields.push(current.trim().to_string());
            current.clear();
        } else {
            current.push(c);
        }
    }
    fields.push(current.trim().to_string());

    fields
}

static LEADING_INT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?[0-9]+").expect("leading integer pattern is valid"));

static LEADING_FLOAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:[.,][0-9]*)?|[.,][0-9]+)").expect("leading float pattern is valid")
});

// Repair-mode score patterns, tried in this order.
static SCORE_OUT_OF_TEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(-?[0-9]{1,3})\s*/\s*10\b").expect("score out of ten pattern is valid")
});
static SCORE_LABELLED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:score|humeur|mood)\s*[:=]\s*(-?[0-9]{1,3})\b")
        .expect("labelled score pattern is valid")
});
static SCORE_BARE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\s)(-?[0-9]{1,3})(?:\s|$)").expect("bare score pattern is valid")
});

/// Parses the integer prefix of a field (`"8/10"` → 8, `"7.5"` → 7).
pub fn parse_leading_int(field: &str) -> Option<i64> {
    LEADING_INT
        .find(field.trim())
        .and_then(|m| m.as_str().parse().ok())
}

/// Parses the decimal prefix of a field, accepting `,` as decimal separator
/// (`"7h30"` → 7.0, `"7,5"` → 7.5).
pub fn parse_leading_float(field: &str) -> Option<f64> {
    LEADING_FLOAT
        .find(field.trim())
        .and_then(|m| m.as_str().replace(',', ".").parse().ok())
}

/// Turns record-start lines into [`CandidateRecord`]s.
#[derive(Debug, Clone)]
pub struct RecordParser {
    dates: DateParser,
    repair_mode: bool,
}

impl RecordParser {
    /// Creates a parser. `repair_mode` enables heuristic recovery of lines
    /// that have fewer than two fields.
    pub fn new(dates: DateParser, repair_mode: bool) -> Self {
        Self { dates, repair_mode }
    }

    /// Returns whether repair mode is enabled.
    pub fn repair_mode(&self) -> bool {
        self.repair_mode
    }

    /// Parses one record-start line.
    pub fn parse(
        &self,
        line: &str,
        line_number: usize,
        delimiter: char,
    ) -> Result<CandidateRecord, MalformedRecord> {
        let fields = splitn_fields(line, delimiter, FIELD_COUNT);

        if fields.len() < 2 {
            if !self.repair_mode {
                return Err(MalformedRecord::TooFewFields {
                    found: fields.len(),
                });
            }
            return self.repair(line, line_number);
        }

        let field = |i: usize| fields.get(i).map_or("", String::as_str);

        let mut record = CandidateRecord::new(field(0), line_number);
        record.score = parse_leading_int(field(1)).unwrap_or(DEFAULT_SCORE);
        record.sleep_hours = parse_leading_float(field(2)).unwrap_or(0.0);
        record.medication_dose = parse_leading_float(field(3)).unwrap_or(0.0);
        record.emotions_raw = field(4).to_string();
        record.comment = field(5).to_string();

        Ok(record)
    }

    /// Recovers a record from a line without usable field structure.
    fn repair(&self, line: &str, line_number: usize) -> Result<CandidateRecord, MalformedRecord> {
        let text: String = line.chars().filter(|&c| c != '"').collect();
        let date = self
            .dates
            .find_in(&text)
            .ok_or(MalformedRecord::NoEmbeddedDate)?;

        let mut rest = String::with_capacity(text.len());
        rest.push_str(&text[..date.start]);
        rest.push(' ');
        rest.push_str(&text[date.end..]);

        let (score, rest) = extract_score(&rest);

        let mut record = CandidateRecord::new(date.token, line_number);
        record.score = score.unwrap_or(DEFAULT_SCORE);
        record.comment = tidy_comment(&rest);
        record.repaired = true;

        tracing::debug!(
            line = line_number,
            token = date.token,
            score = record.score,
            "recovered malformed record"
        );

        Ok(record)
    }
}

impl Default for RecordParser {
    fn default() -> Self {
        Self::new(DateParser::new(), true)
    }
}

/// Finds a score in free text and returns it with the text minus the score.
fn extract_score(text: &str) -> (Option<i64>, String) {
    for pattern in [&*SCORE_OUT_OF_TEN, &*SCORE_LABELLED, &*SCORE_BARE] {
        let Some(caps) = pattern.captures(text) else {
            continue;
        };
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let Some(score) = caps.get(1).and_then(|m| m.as_str().parse().ok()) else {
            continue;
        };

        let mut rest = String::with_capacity(text.len());
        rest.push_str(&text[..whole.start()]);
        rest.push(' ');
        rest.push_str(&text[whole.end()..]);
        return (Some(score), rest);
    }

    (None, text.to_string())
}

/// Collapses whitespace and strips separator debris left by extraction.
fn tidy_comment(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .trim_matches(|c: char| c.is_whitespace() || matches!(c, '-' | '–' | ',' | ';' | ':' | '|'))
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_plain() {
        assert_eq!(split_fields("a,b,c", ','), vec!["a", "b", "c"]);
        assert_eq!(split_fields(" a ; b ;", ';'), vec!["a", "b", ""]);
        assert_eq!(split_fields("", ','), vec![""]);
    }

    #[test]
    fn test_split_quoted_delimiter() {
        let fields = split_fields(r#"2024-01-15,7,8.5,0,calme,"Bonjour, ça va""#, ',');
        assert_eq!(fields.len(), 6);
        assert_eq!(fields[5], "Bonjour, ça va");
    }

    #[test]
    fn test_split_unbalanced_quote_keeps_rest() {
        let fields = split_fields(r#"2024-01-15,"unterminated, still one"#, ',');
        assert_eq!(fields, vec!["2024-01-15", "unterminated, still one"]);
    }

    #[test]
    fn test_leading_numbers() {
        assert_eq!(parse_leading_int("7"), Some(7));
        assert_eq!(parse_leading_int("8/10"), Some(8));
        assert_eq!(parse_leading_int("7.5"), Some(7));
        assert_eq!(parse_leading_int("-3"), Some(-3));
        assert_eq!(parse_leading_int("bien"), None);
        assert_eq!(parse_leading_int(""), None);

        assert_eq!(parse_leading_float("8.5"), Some(8.5));
        assert_eq!(parse_leading_float("7,5"), Some(7.5));
        assert_eq!(parse_leading_float("7h30"), Some(7.0));
        assert_eq!(parse_leading_float(".5"), Some(0.5));
        assert_eq!(parse_leading_float("n/a"), None);
    }

    #[test]
    fn test_parse_full_record() {
        let parser = RecordParser::default();
        let record = parser
            .parse("2024-01-15,7,8.5,0.5,calme,Bonne journée", 2, ',')
            .unwrap();

        assert_eq!(record.date_token, "2024-01-15");
        assert_eq!(record.score, 7);
        assert_eq!(record.sleep_hours, 8.5);
        assert_eq!(record.medication_dose, 0.5);
        assert_eq!(record.emotions_raw, "calme");
        assert_eq!(record.comment, "Bonne journée");
        assert_eq!(record.start_line, 2);
        assert!(!record.repaired);
    }

    #[test]
    fn test_parse_defaults() {
        let parser = RecordParser::default();
        let record = parser.parse("2024-01-16,,,,,", 3, ',').unwrap();
        assert_eq!(record.score, DEFAULT_SCORE);
        assert_eq!(record.sleep_hours, 0.0);
        assert_eq!(record.medication_dose, 0.0);
        assert!(record.emotions_raw.is_empty());
        assert!(record.comment.is_empty());

        let record = parser.parse("2024-01-16,bof", 3, ',').unwrap();
        assert_eq!(record.score, DEFAULT_SCORE);
    }

    #[test]
    fn test_parse_quoted_comment() {
        let parser = RecordParser::default();
        let record = parser
            .parse(r#"2024-01-15,7,8.5,0,calme,"Bonjour, ça va""#, 2, ',')
            .unwrap();
        assert_eq!(record.comment, "Bonjour, ça va");
    }

    #[test]
    fn test_parse_quoted_emotions() {
        let parser = RecordParser::default();
        let record = parser
            .parse(r#"2024-01-15;6;7;0;"calme; fatigué";ok"#, 2, ';')
            .unwrap();
        assert_eq!(record.emotions_raw, "calme; fatigué");
        assert_eq!(record.comment, "ok");
    }

    #[test]
    fn test_extra_fields_fold_into_comment() {
        let parser = RecordParser::default();
        let record = parser
            .parse("2024-01-15,7,8,0,calme,Bonjour, ça va, merci", 2, ',')
            .unwrap();
        assert_eq!(record.comment, "Bonjour, ça va, merci");

        let record = parser
            .parse(r#"2024-01-15;7;8;0;calme; dit "oui";  puis  "non" ; "#, 2, ';')
            .unwrap();
        assert_eq!(record.comment, "dit oui;  puis  non ;");
    }

    #[test]
    fn test_splitn_keeps_rest_of_line() {
        assert_eq!(
            splitn_fields("a;b;c; d ;e", ';', 3),
            vec!["a", "b", "c; d ;e"]
        );
        assert_eq!(splitn_fields("a,b", ',', 6), vec!["a", "b"]);
        assert_eq!(splitn_fields("a,b,c", ',', 1), vec!["a,b,c"]);
    }

    #[test]
    fn test_non_ascii_score_uses_default() {
        let parser = RecordParser::default();
        let record = parser.parse("2024-01-15,٧,８", 2, ',').unwrap();
        assert_eq!(record.score, DEFAULT_SCORE);
        assert_eq!(record.sleep_hours, 0.0);
    }

    #[test]
    fn test_too_few_fields_without_repair() {
        let parser = RecordParser::new(DateParser::new(), false);
        assert_eq!(
            parser.parse("2024-01-15", 4, ','),
            Err(MalformedRecord::TooFewFields { found: 1 })
        );
    }

    #[test]
    fn test_repair_phrase_with_score() {
        let parser = RecordParser::default();
        let record = parser
            .parse("vendredi 27 juin 2025 - humeur 7/10 - bonne journée", 5, ',')
            .unwrap();
        assert_eq!(record.date_token, "vendredi 27 juin 2025");
        assert_eq!(record.score, 7);
        assert_eq!(record.comment, "humeur - bonne journée");
        assert_eq!(record.start_line, 5);
        assert!(record.repaired);
    }

    #[test]
    fn test_repair_labelled_and_bare_scores() {
        let parser = RecordParser::default();

        let record = parser.parse("2024-03-05 score: 4 migraine", 1, ';').unwrap();
        assert_eq!(record.date_token, "2024-03-05");
        assert_eq!(record.score, 4);
        assert_eq!(record.comment, "migraine");

        let record = parser.parse("05/03/2024 8 super", 1, ';').unwrap();
        assert_eq!(record.date_token, "05/03/2024");
        assert_eq!(record.score, 8);
        assert_eq!(record.comment, "super");
    }

    #[test]
    fn test_repair_without_score_uses_default() {
        let parser = RecordParser::default();
        let record = parser.parse("2024-03-05 rien de spécial", 1, ';').unwrap();
        assert_eq!(record.score, DEFAULT_SCORE);
        assert_eq!(record.comment, "rien de spécial");
    }

    #[test]
    fn test_repair_without_date_fails() {
        let parser = RecordParser::default();
        assert_eq!(
            parser.parse("Samedi soir plutôt calme", 9, ';'),
            Err(MalformedRecord::NoEmbeddedDate)
        );
    }

    #[test]
    fn test_append_continuation() {
        let mut record = CandidateRecord::new("2024-01-15", 2);
        record.comment = "Bonne journée".into();
        record.append_continuation("suite du commentaire");
        record.append_continuation("  \"fin\"  ");
        assert_eq!(record.comment, "Bonne journée\nsuite du commentaire\nfin");

        let mut empty = CandidateRecord::new("2024-01-16", 5);
        empty.append_continuation("seule ligne");
        assert_eq!(empty.comment, "seule ligne");
    }
}
