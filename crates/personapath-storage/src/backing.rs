use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::StorageError;

/// Whole-value blob storage addressed by key.
pub trait Backing: Send {
    /// Read a blob. `Ok(None)` when nothing has been written under `key`.
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Replace the blob under `key`.
    fn write(&mut self, key: &str, bytes: &[u8]) -> Result<(), StorageError>;
}

/// One `<key>.json` file per key inside a data directory.
#[derive(Debug, Clone)]
pub struct FileBacking {
    dir: PathBuf,
}

impl FileBacking {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Backing for FileBacking {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.path_for(key);
        match std::fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(path, e)),
        }
    }

    fn write(&mut self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| StorageError::io(&self.dir, e))?;

        let path = self.path_for(key);
        let tmp_path = self.dir.join(format!("{key}.json.tmp"));

        // Write to a temp file then rename for atomicity
        std::fs::write(&tmp_path, bytes).map_err(|e| StorageError::io(&tmp_path, e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))
                .map_err(|e| StorageError::io(&tmp_path, e))?;
        }

        std::fs::rename(&tmp_path, &path).map_err(|e| StorageError::io(&path, e))?;
        Ok(())
    }
}

/// In-process backing, for tests and ephemeral runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryBacking {
    blobs: HashMap<String, Vec<u8>>,
}

impl MemoryBacking {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a blob, e.g. with deliberately corrupt content.
    pub fn with_blob(mut self, key: &str, bytes: impl Into<Vec<u8>>) -> Self {
        self.blobs.insert(key.to_string(), bytes.into());
        self
    }
}

impl Backing for MemoryBacking {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.blobs.get(key).cloned())
    }

    fn write(&mut self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        self.blobs.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}
