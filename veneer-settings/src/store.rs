//! # Settings Store
//!
//! The grouped key-value persistence layer underneath the settings
//! processor framework.
//!
//! Each group is backed by one TOML file, `<dir>/<group>.toml`, with a
//! last-known-good backup at `<dir>/<group>.toml.bak`. A group's backing
//! data is loaded lazily on first access and cached; writes go to the
//! in-memory cache and mark the group dirty until [SettingsStore::flush]
//! persists it. On a successful flush the previous good primary is
//! rotated into the backup slot, so a later corrupt primary can always be
//! recovered to the most recent good state.
//!
//! Groups are independent units of atomicity: each one sits behind its
//! own mutex, so an I/O-bound flush of one group never blocks access to
//! another.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};

use crate::error::{SettingsError, SettingsResult};
use crate::state::{GroupState, ReadState};

/// A persisted settings value.
///
/// TOML's value model is the store's value model; processors convert
/// to and from widget-native state.
pub type Value = toml::Value;

struct GroupEntry {
    values: toml::Table,
    state: GroupState,
    dirty: bool,
}

/// Grouped, lazily-loaded, file-backed key-value store.
pub struct SettingsStore {
    dir: PathBuf,
    groups: RwLock<HashMap<String, Arc<Mutex<GroupEntry>>>>,
}

impl SettingsStore {
    /// Create a store rooted at a directory.
    ///
    /// The directory is created on the first flush, not here.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            groups: RwLock::new(HashMap::new()),
        }
    }

    /// The directory backing this store.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Get a value from a group.
    pub fn get(&self, group: &str, key: &str) -> Option<Value> {
        let entry = self.entry(group);
        let entry = entry.lock().ok()?;
        entry.values.get(key).cloned()
    }

    /// Set a value in a group and mark the group dirty.
    pub fn set(&self, group: &str, key: &str, value: Value) {
        let entry = self.entry(group);
        if let Ok(mut entry) = entry.lock() {
            entry.values.insert(key.to_string(), value);
            entry.dirty = true;
        };
    }

    /// Remove a value from a group. Returns the removed value, if any.
    pub fn remove(&self, group: &str, key: &str) -> Option<Value> {
        let entry = self.entry(group);
        let mut entry = entry.lock().ok()?;
        let removed = entry.values.remove(key);
        if removed.is_some() {
            entry.dirty = true;
        }
        removed
    }

    /// The load outcome of a group.
    ///
    /// Accessing the state of a never-touched group loads it.
    pub fn group_state(&self, group: &str) -> GroupState {
        let entry = self.entry(group);
        entry
            .lock()
            .map(|e| e.state.clone())
            .unwrap_or_default()
    }

    /// Whether a group has unflushed changes.
    pub fn is_dirty(&self, group: &str) -> bool {
        let entry = self.entry(group);
        entry.lock().map(|e| e.dirty).unwrap_or(false)
    }

    /// Persist a group's data to its backing file.
    ///
    /// A no-op for clean groups. On success the previous good primary is
    /// rotated into the group backup; on failure the group stays dirty
    /// (retried on the next flush) and the error is recorded in the group
    /// state as well as returned.
    pub fn flush(&self, group: &str) -> SettingsResult<()> {
        let entry = self.entry(group);
        let mut entry = entry
            .lock()
            .map_err(|_| SettingsError::write(group, "group lock poisoned"))?;
        if !entry.dirty {
            return Ok(());
        }

        let result = self.write_group(group, &entry);
        match result {
            Ok(()) => {
                entry.dirty = false;
                entry.state = GroupState::new(ReadState::Ok);
                Ok(())
            },
            Err(e) => {
                log::warn!("flush of settings group '{}' failed: {}", group, e);
                entry.state.last_error = Some(e.to_string());
                Err(e)
            },
        }
    }

    /// Flush every dirty group, absorbing per-group failures.
    pub fn flush_all(&self) {
        let names: Vec<String> = match self.groups.read() {
            Ok(groups) => groups.keys().cloned().collect(),
            Err(_) => return,
        };
        for group in names {
            if let Err(e) = self.flush(&group) {
                log::warn!("flush_all: group '{}' not persisted: {}", group, e);
            }
        }
    }

    /// Drop a group's cache so the next access re-reads it from disk.
    ///
    /// This is the explicit retry path for groups in the
    /// [Failed](ReadState::Failed) state. Unflushed changes to the group
    /// are discarded.
    pub fn reload(&self, group: &str) {
        if let Ok(mut groups) = self.groups.write() {
            groups.remove(group);
        }
    }

    fn group_path(&self, group: &str) -> PathBuf {
        self.dir.join(format!("{group}.toml"))
    }

    fn backup_path(&self, group: &str) -> PathBuf {
        self.dir.join(format!("{group}.toml.bak"))
    }

    /// Get the cached entry for a group, loading it on first access.
    fn entry(&self, group: &str) -> Arc<Mutex<GroupEntry>> {
        if let Ok(groups) = self.groups.read() {
            if let Some(entry) = groups.get(group) {
                return entry.clone();
            }
        }
        let mut groups = match self.groups.write() {
            Ok(groups) => groups,
            Err(poisoned) => poisoned.into_inner(),
        };
        groups
            .entry(group.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(self.load_group(group))))
            .clone()
    }

    /// Read a group's backing data from disk.
    ///
    /// Missing file: a fresh group ([Created](ReadState::Created)).
    /// Unreadable or unparsable primary: recover from the backup
    /// ([Restored](ReadState::Restored)) or give up
    /// ([Failed](ReadState::Failed)).
    fn load_group(&self, group: &str) -> GroupEntry {
        let path = self.group_path(group);
        if !path.exists() {
            log::debug!("settings group '{}' has no backing data yet", group);
            return GroupEntry {
                values: toml::Table::new(),
                state: GroupState::new(ReadState::Created),
                dirty: false,
            };
        }

        let primary_error = match read_table(&path) {
            Ok(values) => {
                return GroupEntry {
                    values,
                    state: GroupState::new(ReadState::Ok),
                    dirty: false,
                };
            },
            Err(e) => e,
        };
        log::warn!(
            "settings group '{}' unreadable ({}), trying backup",
            group,
            primary_error
        );

        let backup = self.backup_path(group);
        if backup.exists() {
            match read_table(&backup) {
                Ok(values) => {
                    log::info!("settings group '{}' restored from backup", group);
                    return GroupEntry {
                        values,
                        state: GroupState::with_error(ReadState::Restored, &primary_error),
                        // Dirty so the next flush repairs the primary.
                        dirty: true,
                    };
                },
                Err(e) => {
                    log::warn!("backup of settings group '{}' also unreadable: {}", group, e);
                },
            }
        }

        GroupEntry {
            values: toml::Table::new(),
            state: GroupState::with_error(ReadState::Failed, &primary_error),
            dirty: false,
        }
    }

    /// Serialize and write a group's values, rotating the previous good
    /// primary into the backup slot first.
    fn write_group(&self, group: &str, entry: &GroupEntry) -> SettingsResult<()> {
        let content = toml::to_string_pretty(&entry.values)
            .map_err(|e| SettingsError::write(group, e))?;
        fs::create_dir_all(&self.dir)?;

        let path = self.group_path(group);
        // Only a primary that was read cleanly is a valid backup; a
        // corrupt primary must not overwrite the good backup.
        if path.exists() && entry.state.read_state == ReadState::Ok {
            if let Err(e) = fs::rename(&path, self.backup_path(group)) {
                log::warn!("backup rotation for group '{}' failed: {}", group, e);
            }
        }
        fs::write(&path, content).map_err(|e| SettingsError::write(group, e))?;
        Ok(())
    }
}

fn read_table(path: &Path) -> Result<toml::Table, String> {
    let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
    toml::from_str(&content).map_err(|e| e.to_string())
}
