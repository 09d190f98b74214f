//! # Group Read States
//!
//! Every settings group tracks how its backing data was obtained. The
//! state machine is:
//!
//! ```text
//! None ──▶ Created          (no backing data on disk, new group)
//! None/Created ──▶ Ok       (successful read or flush)
//! any ──▶ Restored          (recovered from backup after a bad primary)
//! any ──▶ Failed            (primary and backup both unreadable)
//! ```
//!
//! `Ok`, `Restored` and `Failed` are terminal for a load cycle; a failed
//! group may be retried explicitly via
//! [SettingsStore::reload](crate::store::SettingsStore::reload).

/// How a settings group's backing data was obtained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadState {
    /// The group has not been touched yet.
    #[default]
    None,
    /// The group was initialized fresh with no backing data on disk.
    Created,
    /// The group's primary data was read successfully.
    Ok,
    /// The primary read failed; data was recovered from the group backup.
    Restored,
    /// Neither the primary nor the backup could be read; defaults are in
    /// use and are not persisted.
    Failed,
}

impl ReadState {
    /// Whether this state ends a load cycle.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ReadState::Ok | ReadState::Restored | ReadState::Failed)
    }
}

/// The load outcome of one settings group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupState {
    /// How the group's data was obtained.
    pub read_state: ReadState,
    /// The last read or write error observed for the group, if any.
    pub last_error: Option<String>,
}

impl GroupState {
    /// Create a group state with a read state and no recorded error.
    pub fn new(read_state: ReadState) -> Self {
        Self {
            read_state,
            last_error: None,
        }
    }

    /// Create a group state carrying an error message.
    pub fn with_error(read_state: ReadState, error: impl ToString) -> Self {
        Self {
            read_state,
            last_error: Some(error.to_string()),
        }
    }
}
