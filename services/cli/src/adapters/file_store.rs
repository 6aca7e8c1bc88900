//! services/cli/src/adapters/file_store.rs
//!
//! This module contains the local storage adapter, the concrete implementation of
//! the `KeyValueStore` port from the `core` crate. Each key is a JSON file in the
//! configured data directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use cinematcher_core::ports::{KeyValueStore, PortError, PortResult};
use tracing::debug;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A key-value adapter over one file per key.
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a new `FileStore`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PortResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(PortError::Store(format!("invalid key '{}'", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

fn store_error(path: &Path, e: std::io::Error) -> PortError {
    PortError::Store(format!("{}: {}", path.display(), e))
}

//=========================================================================================
// `KeyValueStore` Trait Implementation
//=========================================================================================

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> PortResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(store_error(&path, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> PortResult<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).map_err(|e| store_error(&self.dir, e))?;

        // Write beside the target, then rename over it.
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, value).map_err(|e| store_error(&staging, e))?;
        fs::rename(&staging, &path).map_err(|e| store_error(&path, e))?;
        debug!(key, path = %path.display(), "Saved");
        Ok(())
    }

    fn remove(&self, key: &str) -> PortResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(store_error(&path, e)),
        }
    }
}
