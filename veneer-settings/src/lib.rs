#![warn(missing_docs)]

//! # Veneer Settings System
//!
//! Component settings persistence for the veneer look-and-feel core.
//!
//! ## Overview
//!
//! Two layers make up the subsystem:
//!
//! - **[SettingsStore](store::SettingsStore)**: a grouped key-value store
//!   backed by one TOML file per group, with lazy loading, dirty
//!   tracking, write-through flushing and a last-known-good backup per
//!   group
//! - **[SettingsManager](processor::SettingsManager)**: the processor
//!   framework that binds live widgets to (group, key) addresses and
//!   saves/restores their state through per-component-type
//!   [SettingsProcessor](processor::SettingsProcessor)s
//!
//! Every group carries a [ReadState](state::ReadState) describing how its
//! data was obtained: freshly created, read cleanly, restored from the
//! backup after a corrupt primary, or failed entirely. Groups are
//! independent units of atomicity: one group's failure never blocks
//! another's load.
//!
//! ## Failure policy
//!
//! Persistence never throws at UI code. Write failures are logged and the
//! group stays dirty for a retry on the next flush; read failures fall
//! back to the group backup and, failing that, to supplied defaults with
//! the group marked [failed](state::ReadState::Failed).

/// Contains the [error::SettingsError] type.
pub mod error;
/// Contains the [processor::SettingsManager] and processor trait.
pub mod processor;
/// Contains the [state::ReadState] group state machine.
pub mod state;
/// Contains the [store::SettingsStore] persistence layer.
pub mod store;
