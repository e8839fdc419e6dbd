//! Durable key/value storage for [`PersistedPreferences`].
//!
//! Every operation is total: a store that cannot be read yields defaults and a
//! write that cannot be persisted is logged and dropped.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, warn};
use valentine_core::PersistedPreferences;
use valentine_core::prefs::{ACCEPTED_KEY, PARTNER_NAME_KEY, SENDER_NAME_KEY, STORAGE_KEYS};

const APP_DIR: &str = "valentine-hub";
const STATE_FILE: &str = "preferences.toml";

/// Storage abstraction so navigation logic can run against an in-memory fake.
pub trait PreferenceStore {
    /// Read the record. Missing or unreadable keys take their defaults.
    fn get(&self) -> PersistedPreferences;

    /// Record that the proposal was accepted.
    fn set_accepted(&self);

    /// Write whichever names are provided, leaving the others untouched.
    fn set_names(&self, partner: Option<&str>, sender: Option<&str>);

    /// Remove every key in one step.
    fn reset(&self);
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for &T {
    fn get(&self) -> PersistedPreferences {
        (**self).get()
    }

    fn set_accepted(&self) {
        (**self).set_accepted();
    }

    fn set_names(&self, partner: Option<&str>, sender: Option<&str>) {
        (**self).set_names(partner, sender);
    }

    fn reset(&self) {
        (**self).reset();
    }
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for Rc<T> {
    fn get(&self) -> PersistedPreferences {
        (**self).get()
    }

    fn set_accepted(&self) {
        (**self).set_accepted();
    }

    fn set_names(&self, partner: Option<&str>, sender: Option<&str>) {
        (**self).set_names(partner, sender);
    }

    fn reset(&self) {
        (**self).reset();
    }
}

fn apply_names(entries: &mut BTreeMap<String, String>, partner: Option<&str>, sender: Option<&str>) {
    if let Some(partner) = partner {
        entries.insert(PARTNER_NAME_KEY.to_owned(), partner.to_owned());
    }
    if let Some(sender) = sender {
        entries.insert(SENDER_NAME_KEY.to_owned(), sender.to_owned());
    }
}

/// Process-local store, used by tests and `--ephemeral` sessions.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryPreferenceStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with raw key/value pairs.
    #[must_use]
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(key, value)| (key.to_owned(), value.to_owned()))
            .collect();
        Self {
            entries: RefCell::new(entries),
        }
    }

    /// Raw value of a storage key.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self) -> PersistedPreferences {
        let entries = self.entries.borrow();
        PersistedPreferences::from_lookup(|key| entries.get(key).cloned())
    }

    fn set_accepted(&self) {
        self.entries
            .borrow_mut()
            .insert(ACCEPTED_KEY.to_owned(), "true".to_owned());
    }

    fn set_names(&self, partner: Option<&str>, sender: Option<&str>) {
        apply_names(&mut self.entries.borrow_mut(), partner, sender);
    }

    fn reset(&self) {
        let mut entries = self.entries.borrow_mut();
        for key in STORAGE_KEYS {
            entries.remove(key);
        }
    }
}

/// Failures of the file-backed store. Never surfaced through the trait.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading, writing, or removing the state file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },

    /// The state file is not a flat table of strings.
    #[error("corrupt state file {path}: {source}")]
    Parse {
        /// State file.
        path: PathBuf,
        /// Parser failure.
        source: toml::de::Error,
    },

    /// The record could not be rendered as TOML.
    #[error("failed to serialize preferences: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The temporary file could not replace the state file.
    #[error("failed to replace {path}: {source}")]
    Persist {
        /// State file.
        path: PathBuf,
        /// Underlying error.
        source: tempfile::PersistError,
    },
}

/// Store backed by a small TOML document. Each write replaces the whole file
/// through a rename, so readers see either the old or the new record.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    /// Store at an explicit path.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the default state file path.
    ///
    /// On Linux: `~/.local/share/valentine-hub/preferences.toml`
    /// On macOS: `~/Library/Application Support/valentine-hub/preferences.toml`
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join(APP_DIR).join(STATE_FILE))
    }

    /// Location of the state file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw value of a storage key, bypassing the default-on-error policy.
    ///
    /// # Errors
    /// Returns an error when the file exists but cannot be read or parsed.
    pub fn raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_entries()?.remove(key))
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        toml::from_str(&contents).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let dir = self
            .path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir).map_err(|source| StoreError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let rendered = toml::to_string(entries)?;
        let io_err = |source| StoreError::Io {
            path: dir.to_path_buf(),
            source,
        };
        let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
        tmp.write_all(rendered.as_bytes()).map_err(io_err)?;
        tmp.flush().map_err(io_err)?;
        tmp.persist(&self.path).map_err(|source| StoreError::Persist {
            path: self.path.clone(),
            source,
        })?;
        Ok(())
    }

    /// Read-modify-write. A corrupt document is replaced rather than patched.
    fn update(&self, change: impl FnOnce(&mut BTreeMap<String, String>)) {
        let mut entries = self.read_entries().unwrap_or_else(|err| {
            warn!("discarding unreadable preferences: {err}");
            BTreeMap::new()
        });
        change(&mut entries);
        match self.write_entries(&entries) {
            Ok(()) => debug!(path = %self.path.display(), "preferences saved"),
            Err(err) => warn!("preferences not saved: {err}"),
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self) -> PersistedPreferences {
        match self.read_entries() {
            Ok(entries) => PersistedPreferences::from_lookup(|key| entries.get(key).cloned()),
            Err(err) => {
                warn!("falling back to default preferences: {err}");
                PersistedPreferences::default()
            }
        }
    }

    fn set_accepted(&self) {
        self.update(|entries| {
            entries.insert(ACCEPTED_KEY.to_owned(), "true".to_owned());
        });
    }

    fn set_names(&self, partner: Option<&str>, sender: Option<&str>) {
        self.update(|entries| apply_names(entries, partner, sender));
    }

    fn reset(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "preferences cleared"),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => warn!("preferences not cleared: {err}"),
        }
    }
}
