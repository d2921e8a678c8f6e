//! Text-to-structure building blocks shared by the import pipeline.
//!
//! - [`dates`] - [`DateParser`] and the ordered [`DateDialect`] list
//! - [`classify`] - [`LineClassifier`], record-start vs. continuation lines
//! - [`record`] - [`RecordParser`], quote-aware field splitting and repair mode
//!
//! None of these components perform I/O or hold mutable state.

pub mod classify;
pub mod dates;
pub mod record;

pub use classify::{LineClassifier, WEEKDAY_NAMES};
pub use dates::{DateDialect, DateParseError, DateParser, EmbeddedDate, MonthVocabulary};
pub use record::{
    CandidateRecord, DEFAULT_SCORE, MalformedRecord, RecordParser, parse_leading_float,
    parse_leading_int, split_fields, splitn_fields,
};
