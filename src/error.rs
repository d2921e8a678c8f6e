//! Unified error types for moodimport.
//!
//! Only caller-level problems are errors: unreadable input, bad
//! configuration, a persistence backend that refuses to hand out a user.
//! Problems with individual lines or records never surface here; they are
//! collected as [`ImportDiagnostic`](crate::pipeline::ImportDiagnostic)s and
//! the import carries on.

use std::io;
#[cfg(feature = "toml-config")]
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for moodimport operations.
///
/// # Example
///
/// ```rust
/// use moodimport::error::Result;
/// use moodimport::NormalizedEntry;
///
/// fn my_function() -> Result<Vec<NormalizedEntry>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, MoodImportError>;

/// The error type for all moodimport operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MoodImportError {
    /// An I/O error occurred (reading the export, writing output).
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A configuration value is out of range.
    #[error("Invalid configuration for '{field}': {message}")]
    InvalidConfig {
        /// The offending field
        field: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// A configuration file could not be parsed.
    #[cfg(feature = "toml-config")]
    #[error("Failed to parse config{}: {source}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    ConfigParse {
        /// The underlying TOML error
        #[source]
        source: toml::de::Error,
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// The persistence backend failed outside of a per-entry insert.
    #[error("Persistence error: {0}")]
    Gateway(#[from] GatewayError),

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The export is not valid UTF-8.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },
}

/// Errors reported by a [`PersistenceGateway`](crate::gateway::PersistenceGateway).
///
/// Insert failures are caught per call and turned into diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The backend refused the row (constraint violation, bad value).
    #[error("rejected: {0}")]
    Rejected(String),

    /// A referenced row does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The backend could not be reached or timed out.
    #[error("unavailable: {0}")]
    Unavailable(String),
}

impl From<std::string::FromUtf8Error> for MoodImportError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        MoodImportError::Utf8 {
            context: "export content".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl MoodImportError {
    /// Creates an invalid configuration error.
    pub fn invalid_config(field: &'static str, message: impl Into<String>) -> Self {
        MoodImportError::InvalidConfig {
            field,
            message: message.into(),
        }
    }

    /// Creates a config parse error.
    #[cfg(feature = "toml-config")]
    pub fn config_parse(source: toml::de::Error, path: Option<PathBuf>) -> Self {
        MoodImportError::ConfigParse { source, path }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, MoodImportError::Io(_))
    }

    /// Returns `true` if this is a configuration error.
    pub fn is_config(&self) -> bool {
        match self {
            MoodImportError::InvalidConfig { .. } => true,
            #[cfg(feature = "toml-config")]
            MoodImportError::ConfigParse { .. } => true,
            _ => false,
        }
    }

    /// Returns `true` if this is a persistence error.
    pub fn is_gateway(&self) -> bool {
        matches!(self, MoodImportError::Gateway(_))
    }
}

// ============================================================================
// Tests
// ============================================================================
