//! A single-file storage backend

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{Storage, StorageError};

/// A [`Storage`] backend that persists its whole key-value map into a single JSON file.
///
/// Every `set`/`remove` rewrites the file, which matches the "whole collection per write"
/// granularity of the stores. There is no schema versioning: a file that cannot be parsed is
/// treated as empty (with a logged warning), the same way an absent key is treated as an empty
/// collection.
#[derive(Debug, PartialEq)]
pub struct FileStorage {
    backing_file: PathBuf,
    data: FileData,
}

#[derive(Default, Debug, PartialEq, Serialize, Deserialize)]
struct FileData {
    entries: HashMap<String, String>,
}

impl FileStorage {
    /// Initialize a storage with the content of a valid backing file if it exists.
    /// Returns an error otherwise.
    pub fn from_file(path: &Path) -> Result<Self, StorageError> {
        let file = std::fs::File::open(path).map_err(|source| StorageError::BackingFile {
            path: path.to_path_buf(),
            source,
        })?;
        let data = match serde_json::from_reader(file) {
            Ok(data) => data,
            Err(err) => {
                log::warn!("Unparseable storage file {:?} ({}), starting empty", path, err);
                FileData::default()
            }
        };

        Ok(Self {
            backing_file: PathBuf::from(path),
            data,
        })
    }

    /// Initialize an empty storage that will save into `path`
    pub fn new(path: &Path) -> Self {
        Self {
            backing_file: PathBuf::from(path),
            data: FileData::default(),
        }
    }

    /// Store the current contents to the backing file
    fn save_to_file(&self) -> Result<(), StorageError> {
        let path = &self.backing_file;
        let file = std::fs::File::create(path).map_err(|source| StorageError::BackingFile {
            path: path.clone(),
            source,
        })?;
        serde_json::to_writer(file, &self.data)?;
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get(&mut self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.data.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.data
            .entries
            .insert(key.to_string(), value.to_string());
        self.save_to_file()
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.data.entries.remove(key);
        self.save_to_file()
    }
}
