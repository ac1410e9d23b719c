use crate::error::ClustreeError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Preference key persisted by "remember this choice": skip segmentation on
/// future sessions.
pub const ALWAYS_SHOW_ALL_CLUSTERS: &str = "always-all-clusters";

/// Boolean key-value store boundary. Unset keys read as false.
pub trait PreferenceStore {
    fn flag(&self, key: &str) -> bool;
    fn set_flag(&mut self, key: &str, value: bool) -> Result<(), ClustreeError>;
}

#[derive(Debug, Default)]
pub struct MemoryPrefs {
    flags: HashMap<String, bool>,
}

impl MemoryPrefs {
    pub fn new() -> Self {
        MemoryPrefs {
            flags: HashMap::new(),
        }
    }
}

impl PreferenceStore for MemoryPrefs {
    fn flag(&self, key: &str) -> bool {
        self.flags.get(key).copied().unwrap_or(false)
    }

    fn set_flag(&mut self, key: &str, value: bool) -> Result<(), ClustreeError> {
        self.flags.insert(key.to_string(), value);
        Ok(())
    }
}

/// File-backed store; the whole map is rewritten on every set.
pub struct FilePrefs {
    path: PathBuf,
    flags: HashMap<String, bool>,
}

impl FilePrefs {
    /// A missing file is an empty store, not an error.
    pub fn open(path: &Path) -> Result<Self, ClustreeError> {
        let flags = if path.exists() {
            let data = std::fs::read(path)?;
            let (flags, _): (HashMap<String, bool>, usize) =
                bincode::decode_from_slice(&data, bincode::config::standard())?;
            flags
        } else {
            HashMap::new()
        };
        Ok(FilePrefs {
            path: path.to_path_buf(),
            flags,
        })
    }

    fn save(&self) -> Result<(), ClustreeError> {
        let bytes = bincode::encode_to_vec(&self.flags, bincode::config::standard())?;
        std::fs::write(&self.path, bytes)?;
        Ok(())
    }
}

impl PreferenceStore for FilePrefs {
    fn flag(&self, key: &str) -> bool {
        self.flags.get(key).copied().unwrap_or(false)
    }

    fn set_flag(&mut self, key: &str, value: bool) -> Result<(), ClustreeError> {
        self.flags.insert(key.to_string(), value);
        self.save()
    }
}
