//! Filesystem-backed progress storage.

use std::fs;
use std::io;
use std::path::PathBuf;

use earthguard_progress::ProgressStore;

/// Errors from the file-backed store.
#[derive(Debug, thiserror::Error)]
pub enum FileStoreError {
    #[error("storage I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Progress store keeping the snapshot in a single JSON file.
///
/// The engine addresses storage by key, but a CLI profile is one file, so
/// the key collapses onto the configured path.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ProgressStore for FileStore {
    type Error = FileStoreError;

    fn get(&self, _key: &str) -> Result<Option<String>, Self::Error> {
        match fs::read_to_string(&self.path) {
            Ok(blob) => Ok(Some(blob)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, _key: &str, blob: &str) -> Result<(), Self::Error> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, blob)?;
        Ok(())
    }
}

/// Default progress file under the platform data directory.
#[must_use]
pub fn default_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("earthguard").join("progress.json"))
}
