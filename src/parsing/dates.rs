//! Date token recognition across the dialects found in mood journal exports.
//!
//! Exports are edited by hand and come from several tools, so one file can
//! mix day-first slashes, ISO dates and spelled-out French dates:
//!
//! - `DayFirstSlash`: `27/06/2025`, `3/7/2025`
//! - `Iso`: `2025-06-27`, `2025-6-7`
//! - `Phrase`: `vendredi 27 juin 2025` (any leading word is accepted)
//!
//! Dialects are tried in that fixed order and the first one whose pattern
//! matches the whole token decides the outcome. A dialect that matches but
//! cannot convert the token (unknown month, 31 February) reports a failure
//! instead of handing the token to the next dialect.
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use moodimport::parsing::DateParser;
//!
//! let parser = DateParser::new();
//! assert_eq!(
//!     parser.parse("vendredi 27 juin 2025").unwrap(),
//!     NaiveDate::from_ymd_opt(2025, 6, 27).unwrap()
//! );
//! assert!(parser.parse("vendredi 27 juni 2025").is_err());
//! ```

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::{Captures, Match, Regex};
use thiserror::Error;

/// Why a date token could not be turned into a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateParseError {
    /// No dialect pattern matches the token.
    #[error("unrecognised date '{token}'")]
    NoMatchingDialect { token: String },

    /// The phrase dialect matched but the month word is not in the vocabulary.
    #[error("unknown month '{month}' in date '{token}'")]
    UnknownMonth { token: String, month: String },

    /// The token is well-formed but names a day that does not exist.
    #[error("'{token}' is not a valid calendar date")]
    InvalidCalendarDate { token: String },
}

impl DateParseError {
    /// Returns the offending token.
    pub fn token(&self) -> &str {
        match self {
            DateParseError::NoMatchingDialect { token }
            | DateParseError::UnknownMonth { token, .. }
            | DateParseError::InvalidCalendarDate { token } => token,
        }
    }
}

/// The supported date grammars, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateDialect {
    /// Day-first with slashes: D/M/YYYY or DD/MM/YYYY
    DayFirstSlash,
    /// ISO-like with hyphens: YYYY-M-D or YYYY-MM-DD
    Iso,
    /// Spelled-out phrase: `<word> D <month> YYYY`
    Phrase,
}

impl DateDialect {
    /// Returns the anchored pattern a whole token must match.
    pub fn pattern(self) -> &'static str {
        match self {
            DateDialect::DayFirstSlash => r"^([0-9]{1,2})/([0-9]{1,2})/([0-9]{4})$",
            DateDialect::Iso => r"^([0-9]{4})-([0-9]{1,2})-([0-9]{1,2})$",
            DateDialect::Phrase => r"^(\S+)\s+([0-9]{1,2})\s+(\p{L}+)\s+([0-9]{4})$",
        }
    }

    /// Returns the unanchored pattern used to find a date inside free text.
    pub fn search_pattern(self) -> &'static str {
        match self {
            DateDialect::DayFirstSlash => r"\b([0-9]{1,2})/([0-9]{1,2})/([0-9]{4})\b",
            DateDialect::Iso => r"\b([0-9]{4})-([0-9]{1,2})-([0-9]{1,2})\b",
            DateDialect::Phrase => r"(\p{L}+)\s+([0-9]{1,2})\s+(\p{L}+)\s+([0-9]{4})\b",
        }
    }

    /// Returns all dialects in priority order.
    pub fn all() -> &'static [DateDialect] {
        &[DateDialect::DayFirstSlash, DateDialect::Iso, DateDialect::Phrase]
    }

    fn compiled(self) -> &'static CompiledDialect {
        match self {
            DateDialect::DayFirstSlash => &DAY_FIRST_SLASH,
            DateDialect::Iso => &ISO,
            DateDialect::Phrase => &PHRASE,
        }
    }
}

impl std::fmt::Display for DateDialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateDialect::DayFirstSlash => write!(f, "DD/MM/YYYY"),
            DateDialect::Iso => write!(f, "YYYY-MM-DD"),
            DateDialect::Phrase => write!(f, "<jour> D <mois> YYYY"),
        }
    }
}

/// A dialect with its regexes compiled once.
struct CompiledDialect {
    dialect: DateDialect,
    exact: Regex,
    search: Regex,
}

impl CompiledDialect {
    fn new(dialect: DateDialect) -> Self {
        Self {
            dialect,
            exact: Regex::new(dialect.pattern()).expect("date dialect pattern is valid"),
            search: Regex::new(dialect.search_pattern())
                .expect("date dialect search pattern is valid"),
        }
    }

    fn matches(&self, token: &str) -> bool {
        self.exact.is_match(token)
    }

    fn convert(&self, token: &str, months: &MonthVocabulary) -> Result<NaiveDate, DateParseError> {
        let caps = self
            .exact
            .captures(token)
            .ok_or_else(|| DateParseError::NoMatchingDialect {
                token: token.to_string(),
            })?;

        let invalid = || DateParseError::InvalidCalendarDate {
            token: token.to_string(),
        };
        let digits = |group: usize| number(&caps, group).ok_or_else(invalid);

        let (year, month, day) = match self.dialect {
            DateDialect::DayFirstSlash => (digits(3)?, digits(2)?, digits(1)?),
            DateDialect::Iso => (digits(1)?, digits(2)?, digits(3)?),
            DateDialect::Phrase => {
                let word = caps.get(3).map_or("", |m| m.as_str());
                let month = months
                    .lookup(word)
                    .ok_or_else(|| DateParseError::UnknownMonth {
                        token: token.to_string(),
                        month: word.to_string(),
                    })?;
                (digits(4)?, month, digits(2)?)
            }
        };

        let year = i32::try_from(year).map_err(|_| invalid())?;
        NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
    }
}

/// Reads an ASCII-digit capture group. `None` if the group is absent or not a number.
fn number(caps: &Captures<'_>, group: usize) -> Option<u32> {
    caps.get(group).and_then(|m| m.as_str().parse().ok())
}

static DAY_FIRST_SLASH: LazyLock<CompiledDialect> =
    LazyLock::new(|| CompiledDialect::new(DateDialect::DayFirstSlash));
static ISO: LazyLock<CompiledDialect> = LazyLock::new(|| CompiledDialect::new(DateDialect::Iso));
static PHRASE: LazyLock<CompiledDialect> =
    LazyLock::new(|| CompiledDialect::new(DateDialect::Phrase));

/// French month names, with the unaccented spellings people type on
/// keyboards without dead keys.
const FRENCH_MONTHS: &[(&str, u32)] = &[
    ("janvier", 1),
    ("février", 2),
    ("fevrier", 2),
    ("mars", 3),
    ("avril", 4),
    ("mai", 5),
    ("juin", 6),
    ("juillet", 7),
    ("août", 8),
    ("aout", 8),
    ("septembre", 9),
    ("octobre", 10),
    ("novembre", 11),
    ("décembre", 12),
    ("decembre", 12),
];

/// Month-name lookup table for the phrase dialect.
///
/// Lookups are case-insensitive. The table is immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthVocabulary {
    names: Vec<(String, u32)>,
}

impl MonthVocabulary {
    /// French month names (the vocabulary of the exports this tool targets).
    pub fn french() -> Self {
        Self {
            names: FRENCH_MONTHS
                .iter()
                .map(|(name, month)| ((*name).to_string(), *month))
                .collect(),
        }
    }

    /// Builds a vocabulary from `(name, month number)` pairs.
    ///
    /// Names are stored lowercased; month numbers outside `1..=12` are dropped.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, u32)>) -> Self {
        Self {
            names: pairs
                .into_iter()
                .filter(|(_, month)| (1..=12).contains(month))
                .map(|(name, month)| (name.to_lowercase(), month))
                .collect(),
        }
    }

    /// Returns the month number for `name`, ignoring case.
    pub fn lookup(&self, name: &str) -> Option<u32> {
        let lower = name.to_lowercase();
        self.names
            .iter()
            .find(|(candidate, _)| *candidate == lower)
            .map(|(_, month)| *month)
    }
}

impl Default for MonthVocabulary {
    fn default() -> Self {
        Self::french()
    }
}

/// A date-like substring located inside a larger piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbeddedDate<'t> {
    /// Dialect whose search pattern found the substring.
    pub dialect: DateDialect,
    /// Byte range of the substring in the scanned text.
    pub start: usize,
    pub end: usize,
    /// The substring itself.
    pub token: &'t str,
}

impl<'t> EmbeddedDate<'t> {
    fn from_match(dialect: DateDialect, m: Match<'t>) -> Self {
        Self {
            dialect,
            start: m.start(),
            end: m.end(),
            token: m.as_str(),
        }
    }
}

/// Converts date tokens into calendar dates using the ordered dialect list.
///
/// Parsing is pure: the same token always yields the same result.
#[derive(Debug, Clone, Default)]
pub struct DateParser {
    months: MonthVocabulary,
}

impl DateParser {
    /// Creates a parser with the French month vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with a custom month vocabulary.
    pub fn with_months(months: MonthVocabulary) -> Self {
        Self { months }
    }

    /// Returns the month vocabulary in use.
    pub fn months(&self) -> &MonthVocabulary {
        &self.months
    }

    /// Returns the first dialect whose pattern matches the whole (trimmed) token.
    pub fn dialect_for(&self, token: &str) -> Option<DateDialect> {
        let token = token.trim();
        DateDialect::all()
            .iter()
            .copied()
            .find(|d| d.compiled().matches(token))
    }

    /// Returns `true` if any dialect pattern matches the token.
    ///
    /// This only checks the shape; `parse` may still reject the token.
    pub fn is_date_like(&self, token: &str) -> bool {
        self.dialect_for(token).is_some()
    }

    /// Parses a date token.
    ///
    /// # Errors
    ///
    /// Returns [`DateParseError`] carrying the offending token when no dialect
    /// matches or when the first matching dialect rejects it.
    pub fn parse(&self, token: &str) -> Result<NaiveDate, DateParseError> {
        let trimmed = token.trim();
        match self.dialect_for(trimmed) {
            Some(dialect) => dialect.compiled().convert(trimmed, &self.months),
            None => Err(DateParseError::NoMatchingDialect {
                token: trimmed.to_string(),
            }),
        }
    }

    /// Finds a date-like substring inside free text.
    ///
    /// The leftmost hit across all dialects wins. Dialect priority only
    /// breaks ties between hits starting at the same offset.
    pub fn find_in<'t>(&self, text: &'t str) -> Option<EmbeddedDate<'t>> {
        DateDialect::all()
            .iter()
            .filter_map(|&dialect| {
                dialect
                    .compiled()
                    .search
                    .find(text)
                    .map(|m| EmbeddedDate::from_match(dialect, m))
            })
            .min_by_key(|found| found.start)
    }
}
