// File: src/persistence.rs
use crate::core::types::LanguageMode;
use crate::error::PersistenceError;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::warn;

/// Key under which the last used language is stored.
pub const LANGUAGE_KEY: &str = "language";

/// A host-provided string key/value store.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;

    /// Unknown stored values are treated as absent.
    fn load_language(&self) -> Result<Option<LanguageMode>, PersistenceError> {
        Ok(self.get(LANGUAGE_KEY)?.and_then(|code| match code.parse() {
            Ok(mode) => Some(mode),
            Err(e) => {
                warn!("ignoring stored language: {}", e);
                None
            }
        }))
    }

    fn save_language(&mut self, mode: LanguageMode) -> Result<(), PersistenceError> {
        self.set(LANGUAGE_KEY, mode.code())
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryPreferenceStore {
    values: BTreeMap<String, String>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences kept as a flat JSON object, rewritten atomically on every set.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FilePreferenceStore {
    /// Opens the store; a missing file is an empty store.
    pub fn open(path: &Path) -> Result<Self, PersistenceError> {
        let values = match File::open(path) {
            Ok(file) => serde_json::from_reader(BufReader::new(file))?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path: path.to_path_buf(), values })
    }

    fn save_to_disk(&self) -> Result<(), PersistenceError> {
        let parent_dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent_dir)?;

        let temp_file = NamedTempFile::new_in(parent_dir)?;
        {
            let mut writer = BufWriter::new(&temp_file);
            serde_json::to_writer_pretty(&mut writer, &self.values)?;
            writer.flush()?;
        }
        temp_file.persist(&self.path)?;
        Ok(())
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.values.insert(key.to_string(), value.to_string());
        self.save_to_disk()
    }
}
