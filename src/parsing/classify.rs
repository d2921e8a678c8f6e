//! Record-start detection.
//!
//! A line starts a new mood entry when its leading field looks like a date.
//! Anything else is treated as the continuation of the previous entry's
//! comment, the same way multi-line chat messages are folded back together.
//!
//! This is a cheap shape check. A line can be classified as a record start
//! and still fail later, when the record is parsed or its date resolved.

use super::dates::DateParser;

/// French weekday names accepted as a record-start prefix on their own.
pub const WEEKDAY_NAMES: &[&str] = &[
    "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi", "dimanche",
];

/// Decides whether a raw line begins a new record.
#[derive(Debug, Clone)]
pub struct LineClassifier {
    dates: DateParser,
    weekdays: Vec<String>,
}

impl LineClassifier {
    /// Creates a classifier that recognises the given date dialects and the
    /// French weekday names.
    pub fn new(dates: DateParser) -> Self {
        Self {
            dates,
            weekdays: WEEKDAY_NAMES.iter().map(|w| (*w).to_string()).collect(),
        }
    }

    /// Replaces the weekday literals (matched case-insensitively).
    #[must_use]
    pub fn with_weekdays<'a>(mut self, weekdays: impl IntoIterator<Item = &'a str>) -> Self {
        self.weekdays = weekdays.into_iter().map(str::to_lowercase).collect();
        self
    }

    /// Returns `true` if `line` begins a new record.
    ///
    /// Looks at the text before the first `delimiter` (or the whole line),
    /// trimmed and with one pair of surrounding quotes removed.
    pub fn is_record_start(&self, line: &str, delimiter: char) -> bool {
        let prefix = leading_field(line, delimiter);
        if prefix.is_empty() {
            return false;
        }

        self.dates.is_date_like(prefix) || self.starts_with_weekday(prefix)
    }

    fn starts_with_weekday(&self, prefix: &str) -> bool {
        let lower = prefix.to_lowercase();
        self.weekdays.iter().any(|day| lower.starts_with(day.as_str()))
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new(DateParser::new())
    }
}

/// Returns the trimmed text before the first delimiter, without surrounding quotes.
fn leading_field(line: &str, delimiter: char) -> &str {
    let head = line.split(delimiter).next().unwrap_or(line).trim();
    head.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .map_or(head, str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dated_lines_start_records() {
        let classifier = LineClassifier::default();
        assert!(classifier.is_record_start("2024-01-15,7,8.5,0,calme,Bonne journée", ','));
        assert!(classifier.is_record_start("15/01/2024,7", ','));
        assert!(classifier.is_record_start("vendredi 27 juin 2025,6", ','));
        assert!(classifier.is_record_start("  2024-01-15 ;7", ';'));
    }

    #[test]
    fn test_continuation_lines() {
        let classifier = LineClassifier::default();
        assert!(!classifier.is_record_start("suite du commentaire", ','));
        assert!(!classifier.is_record_start("not a date, random text", ','));
        assert!(!classifier.is_record_start("7,8.5,0", ','));
        assert!(!classifier.is_record_start("", ','));
    }

    #[test]
    fn test_weekday_prefix_without_full_date() {
        let classifier = LineClassifier::default();
        assert!(classifier.is_record_start("Samedi soir, 6/10", ','));
        assert!(classifier.is_record_start("MARDI", ','));
        assert!(classifier.is_record_start("vendredi 27 juin 2025 humeur 7/10 bonne journée", ','));
    }

    #[test]
    fn test_only_leading_field_is_considered() {
        let classifier = LineClassifier::default();
        assert!(!classifier.is_record_start("je repense au 2024-01-15,7", ','));
        // With a different delimiter the whole line is the leading field
        assert!(!classifier.is_record_start("2024-01-15,7,8", ';'));
        assert!(classifier.is_record_start("2024-01-15;7;8", ';'));
    }

    #[test]
    fn test_quoted_leading_field() {
        let classifier = LineClassifier::default();
        assert!(classifier.is_record_start("\"2024-01-15\",7", ','));
        assert!(classifier.is_record_start("\" 15/01/2024 \",7", ','));
    }

    #[test]
    fn test_custom_weekdays() {
        let classifier = LineClassifier::default().with_weekdays(["Monday", "Friday"]);
        assert!(classifier.is_record_start("friday night,5", ','));
        assert!(!classifier.is_record_start("vendredi,5", ','));
        assert!(classifier.is_record_start("2024-01-15,5", ','));
    }
}
