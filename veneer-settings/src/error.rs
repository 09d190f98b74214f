//! Error types for the settings subsystem.
//!
//! These errors stay internal to the persistence pipeline: the manager
//! absorbs them into the owning group's
//! [GroupState](crate::state::GroupState) rather than propagating them to
//! UI interaction handlers.

use thiserror::Error;

/// Errors that can occur while persisting or restoring settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// A group's backing data could not be read or parsed.
    #[error("Failed to read settings group '{group}': {details}")]
    Read {
        /// The group that failed to load.
        group: String,
        /// Details about the failure.
        details: String,
    },

    /// A group's backing data could not be written.
    #[error("Failed to write settings group '{group}': {details}")]
    Write {
        /// The group that failed to flush.
        group: String,
        /// Details about the failure.
        details: String,
    },

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

impl SettingsError {
    /// Create a group read error.
    pub fn read(group: impl Into<String>, details: impl ToString) -> Self {
        Self::Read {
            group: group.into(),
            details: details.to_string(),
        }
    }

    /// Create a group write error.
    pub fn write(group: impl Into<String>, details: impl ToString) -> Self {
        Self::Write {
            group: group.into(),
            details: details.to_string(),
        }
    }
}
