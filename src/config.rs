//! Import configuration.
//!
//! [`ImportConfig`] holds every knob of the import pipeline. It can be built
//! in code with the `with_*` methods, or loaded from a TOML file (feature
//! `toml-config`), where missing keys fall back to their defaults.
//!
//! # Example
//!
//! ```rust
//! use moodimport::config::ImportConfig;
//!
//! let config = ImportConfig::new()
//!     .with_delimiter(';')
//!     .with_skip_header_line(false)
//!     .with_repair_mode(true);
//!
//! assert_eq!(config.delimiter, ';');
//! assert!(config.validate().is_ok());
//! ```
//!
//! ```toml
//! delimiter = ";"
//! skip_header_line = true
//! repair_mode = false
//! max_reported_diagnostics = 20
//! ```

#[cfg(feature = "toml-config")]
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MoodImportError, Result};

/// Email of the single local user entries are imported for.
pub const DEFAULT_USER_EMAIL: &str = "default@moodtracker.local";

/// Configuration for one import run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Field delimiter (default: `,`)
    pub delimiter: char,

    /// Drop the first non-blank line as a header (default: true)
    pub skip_header_line: bool,

    /// Recover records from lines with fewer than two fields (default: true)
    pub repair_mode: bool,

    /// Parse and resolve only, never touch persistence (default: false)
    pub preview_only: bool,

    /// Number of records shown in a preview (default: 5)
    pub preview_limit: usize,

    /// Comment length in characters in a preview (default: 100)
    pub preview_comment_chars: usize,

    /// Diagnostics kept when summarizing for transport (default: 10)
    pub max_reported_diagnostics: usize,

    /// Owner of the imported entries
    pub user_email: String,

    /// Log level for the command-line tool (e.g. `"info"`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            skip_header_line: true,
            repair_mode: true,
            preview_only: false,
            preview_limit: 5,
            preview_comment_chars: 100,
            max_reported_diagnostics: 10,
            user_email: DEFAULT_USER_EMAIL.to_string(),
            log_level: None,
        }
    }
}

impl ImportConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a preview configuration: nothing is persisted.
    pub fn preview() -> Self {
        Self {
            preview_only: true,
            ..Self::default()
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether the first non-blank line is a header.
    #[must_use]
    pub fn with_skip_header_line(mut self, skip: bool) -> Self {
        self.skip_header_line = skip;
        self
    }

    /// Enables or disables repair mode.
    #[must_use]
    pub fn with_repair_mode(mut self, enabled: bool) -> Self {
        self.repair_mode = enabled;
        self
    }

    /// Enables or disables preview-only mode.
    #[must_use]
    pub fn with_preview_only(mut self, enabled: bool) -> Self {
        self.preview_only = enabled;
        self
    }

    /// Sets how many records a preview shows.
    #[must_use]
    pub fn with_preview_limit(mut self, limit: usize) -> Self {
        self.preview_limit = limit;
        self
    }

    /// Sets how many diagnostics a summary keeps.
    #[must_use]
    pub fn with_max_reported_diagnostics(mut self, max: usize) -> Self {
        self.max_reported_diagnostics = max;
        self
    }

    /// Sets the email of the user entries are imported for.
    #[must_use]
    pub fn with_user_email(mut self, email: impl Into<String>) -> Self {
        self.user_email = email.into();
        self
    }

    /// Checks that the configuration can drive an import.
    ///
    /// # Errors
    ///
    /// Returns [`MoodImportError::InvalidConfig`] if the delimiter is a
    /// quote or a line break, or if the user email is blank.
    pub fn validate(&self) -> Result<()> {
        if matches!(self.delimiter, '"' | '\n' | '\r') {
            return Err(MoodImportError::invalid_config(
                "delimiter",
                format!("{:?} cannot be used as a field delimiter", self.delimiter),
            ));
        }
        if self.user_email.trim().is_empty() {
            return Err(MoodImportError::invalid_config(
                "user_email",
                "must not be empty",
            ));
        }
        Ok(())
    }

    /// Parses a configuration from TOML text.
    #[cfg(feature = "toml-config")]
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| MoodImportError::config_parse(e, None))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration file.
    #[cfg(feature = "toml-config")]
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| MoodImportError::config_parse(e, Some(path.to_path_buf())))?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded import config");
        Ok(config)
    }
}
