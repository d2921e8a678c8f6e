//! Normalized mood entry, the row handed to persistence.
//!
//! Every record that survives parsing and date resolution becomes one
//! [`NormalizedEntry`], whatever dialect or layout it came from.
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use moodimport::NormalizedEntry;
//!
//! let ts = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
//! let entry = NormalizedEntry::new(1, 7, ts)
//!     .with_note("Bonne journée")
//!     .with_tags(["calme", "reposé"]);
//!
//! assert_eq!(entry.mood(), 7);
//! assert_eq!(entry.note(), Some("Bonne journée"));
//! assert_eq!(entry.tags(), ["calme", "reposé"]);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Highest mood value stored.
pub const MAX_MOOD: u8 = 10;

/// A mood entry ready for insertion.
///
/// # Fields
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `user_id` | `i64` | Owner, from `PersistenceGateway::ensure_user` |
/// | `mood` | `u8` | Mood on a 0-10 scale |
/// | `note` | `Option<String>` | Comment, possibly multi-line |
/// | `tags` | `Vec<String>` | Emotion tags |
/// | `sleep_hours` | `Option<f64>` | Hours slept |
/// | `medication` | `Option<f64>` | Medication dose |
/// | `emotions` | `Option<String>` | Emotions as originally written |
/// | `timestamp` | `DateTime<Utc>` | Day of the entry, at midnight UTC |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedEntry {
    /// Owner of the entry.
    pub user_id: i64,

    /// Mood, always within `0..=10`.
    pub mood: u8,

    /// Free-text comment.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub note: Option<String>,

    /// Emotion tags split out of the raw emotions field.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Hours slept the night before.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub sleep_hours: Option<f64>,

    /// Medication dose taken that day.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub medication: Option<f64>,

    /// Emotions field verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub emotions: Option<String>,

    /// Day of the entry.
    pub timestamp: DateTime<Utc>,
}

impl NormalizedEntry {
    /// Creates an entry with only the required fields. `mood` is capped at [`MAX_MOOD`].
    pub fn new(user_id: i64, mood: u8, timestamp: DateTime<Utc>) -> Self {
        Self {
            user_id,
            mood: mood.min(MAX_MOOD),
            note: None,
            tags: Vec::new(),
            sleep_hours: None,
            medication: None,
            emotions: None,
            timestamp,
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Sets the note. Whitespace-only notes are stored as `None`.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        let note = note.into();
        self.note = if note.trim().is_empty() { None } else { Some(note) };
        self
    }

    /// Sets the tags.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the hours slept.
    #[must_use]
    pub fn with_sleep_hours(mut self, hours: f64) -> Self {
        self.sleep_hours = Some(hours);
        self
    }

    /// Sets the medication dose.
    #[must_use]
    pub fn with_medication(mut self, dose: f64) -> Self {
        self.medication = Some(dose);
        self
    }

    /// Sets the raw emotions text. Empty text is stored as `None`.
    #[must_use]
    pub fn with_emotions(mut self, emotions: impl Into<String>) -> Self {
        let emotions = emotions.into();
        self.emotions = if emotions.trim().is_empty() {
            None
        } else {
            Some(emotions)
        };
        self
    }

    // =========================================================================
    // Accessor methods
    // =========================================================================

    /// Returns the mood.
    pub fn mood(&self) -> u8 {
        self.mood
    }

    /// Returns the note, if any.
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// Returns the emotion tags.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns the entry timestamp.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
