//! Directory-backed document store.
//!
//! Each document is one regular file directly inside the configured root.
//! The root is opened as a `cap_std` directory handle, so no operation can
//! reach outside it even if a name slipped past validation.

use std::io;
use std::path::Path;

use cap_std::{ambient_authority, fs::Dir};
use tracing::debug;

use crate::domain::DocumentName;
use crate::domain::ports::{DocumentStore, DocumentStoreError};

/// [`DocumentStore`] over a capability-scoped directory.
#[derive(Debug)]
pub struct CapStdDocumentStore {
    root: Dir,
}

impl CapStdDocumentStore {
    /// Open `root`, creating it and any missing parents first.
    ///
    /// # Examples
    /// ```
    /// use cms::domain::ports::DocumentStore;
    /// use cms::outbound::CapStdDocumentStore;
    ///
    /// let dir = tempfile::tempdir()?;
    /// let store = CapStdDocumentStore::open(dir.path().join("data"))?;
    /// assert!(store.list()?.is_empty());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn open(root: impl AsRef<Path>) -> io::Result<Self> {
        let root = root.as_ref();
        Dir::create_ambient_dir_all(root, ambient_authority())?;
        let root = Dir::open_ambient_dir(root, ambient_authority())?;
        Ok(Self { root })
    }

    fn is_regular_file(&self, name: &DocumentName) -> Result<bool, DocumentStoreError> {
        match self.root.symlink_metadata(name.as_str()) {
            Ok(metadata) => Ok(metadata.is_file()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(map_io(name, err)),
        }
    }

    fn require_regular_file(&self, name: &DocumentName) -> Result<(), DocumentStoreError> {
        if self.is_regular_file(name)? {
            Ok(())
        } else {
            Err(DocumentStoreError::not_found(name.as_str()))
        }
    }
}

fn map_io(name: &DocumentName, err: io::Error) -> DocumentStoreError {
    if err.kind() == io::ErrorKind::NotFound {
        DocumentStoreError::not_found(name.as_str())
    } else {
        DocumentStoreError::io(format!("{name}: {err}"))
    }
}

impl DocumentStore for CapStdDocumentStore {
    fn list(&self) -> Result<Vec<DocumentName>, DocumentStoreError> {
        let entries = self
            .root
            .entries()
            .map_err(|err| DocumentStoreError::io(err.to_string()))?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| DocumentStoreError::io(err.to_string()))?;
            let is_file = entry
                .file_type()
                .map_err(|err| DocumentStoreError::io(err.to_string()))?
                .is_file();
            if !is_file {
                continue;
            }
            let file_name = entry.file_name();
            let Some(raw) = file_name.to_str() else {
                debug!(name = ?file_name, "skipping non-UTF-8 file name");
                continue;
            };
            match DocumentName::new(raw) {
                Ok(name) => names.push(name),
                Err(err) => debug!(name = raw, error = %err, "skipping unusable file name"),
            }
        }
        names.sort();
        Ok(names)
    }

    fn exists(&self, name: &DocumentName) -> Result<bool, DocumentStoreError> {
        self.is_regular_file(name)
    }

    fn read(&self, name: &DocumentName) -> Result<Vec<u8>, DocumentStoreError> {
        self.require_regular_file(name)?;
        self.root.read(name.as_str()).map_err(|err| map_io(name, err))
    }

    fn write(&self, name: &DocumentName, content: &[u8]) -> Result<(), DocumentStoreError> {
        self.root
            .write(name.as_str(), content)
            .map_err(|err| map_io(name, err))
    }

    fn delete(&self, name: &DocumentName) -> Result<(), DocumentStoreError> {
        self.require_regular_file(name)?;
        self.root
            .remove_file(name.as_str())
            .map_err(|err| map_io(name, err))
    }
}
