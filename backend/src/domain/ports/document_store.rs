//! Driven port for document persistence.
//!
//! The store knows nothing about sessions or policy: it lists, reads, writes
//! and deletes documents by name. Adapters must treat only regular files as
//! documents and must never resolve a name outside their root.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use crate::domain::DocumentName;

use super::define_port_error;

define_port_error! {
    /// Errors raised by document store adapters.
    pub enum DocumentStoreError {
        /// No regular file with this name exists.
        NotFound { name: String } => "{name} does not exist",
        /// Underlying read, write, list or delete failure.
        Io { message: String } => "document store i/o failed: {message}",
    }
}

/// Port for the file-backed document collection.
///
/// Every call goes straight to the backing store; implementations must not
/// cache content across calls. Concurrent writes to one name race and the
/// last write wins.
#[cfg_attr(test, mockall::automock)]
pub trait DocumentStore: Send + Sync {
    /// Names of every document, in backend enumeration order.
    fn list(&self) -> Result<Vec<DocumentName>, DocumentStoreError>;

    /// Whether a regular file with this name exists.
    fn exists(&self, name: &DocumentName) -> Result<bool, DocumentStoreError>;

    /// Full content of a document.
    fn read(&self, name: &DocumentName) -> Result<Vec<u8>, DocumentStoreError>;

    /// Create or fully overwrite a document.
    fn write(&self, name: &DocumentName, content: &[u8]) -> Result<(), DocumentStoreError>;

    /// Remove a document permanently.
    fn delete(&self, name: &DocumentName) -> Result<(), DocumentStoreError>;
}

/// In-memory store used by tests and examples.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: Mutex<BTreeMap<DocumentName, Vec<u8>>>,
}

impl InMemoryDocumentStore {
    /// Seed a store with documents.
    ///
    /// # Examples
    /// ```
    /// use cms::domain::DocumentName;
    /// use cms::domain::ports::{DocumentStore, InMemoryDocumentStore};
    ///
    /// let name = DocumentName::new("about.txt").expect("valid name");
    /// let store = InMemoryDocumentStore::with_documents([(name.clone(), b"hi".to_vec())]);
    /// assert_eq!(store.read(&name).expect("read"), b"hi");
    /// ```
    pub fn with_documents(documents: impl IntoIterator<Item = (DocumentName, Vec<u8>)>) -> Self {
        Self {
            documents: Mutex::new(documents.into_iter().collect()),
        }
    }

    fn with_map<T>(&self, f: impl FnOnce(&mut BTreeMap<DocumentName, Vec<u8>>) -> T) -> T {
        let mut guard = self.documents.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn list(&self) -> Result<Vec<DocumentName>, DocumentStoreError> {
        Ok(self.with_map(|docs| docs.keys().cloned().collect()))
    }

    fn exists(&self, name: &DocumentName) -> Result<bool, DocumentStoreError> {
        Ok(self.with_map(|docs| docs.contains_key(name)))
    }

    fn read(&self, name: &DocumentName) -> Result<Vec<u8>, DocumentStoreError> {
        self.with_map(|docs| docs.get(name).cloned())
            .ok_or_else(|| DocumentStoreError::not_found(name.as_str()))
    }

    fn write(&self, name: &DocumentName, content: &[u8]) -> Result<(), DocumentStoreError> {
        self.with_map(|docs| docs.insert(name.clone(), content.to_vec()));
        Ok(())
    }

    fn delete(&self, name: &DocumentName) -> Result<(), DocumentStoreError> {
        self.with_map(|docs| docs.remove(name))
            .map(|_| ())
            .ok_or_else(|| DocumentStoreError::not_found(name.as_str()))
    }
}
