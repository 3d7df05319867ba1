//! YAML user registry stored as a document.
//!
//! The registry is itself a restricted document, so it is read through the
//! same [`DocumentStore`] as everything else. Its format is a flat mapping:
//!
//! ```yaml
//! admin: $argon2id$v=19$m=19456,t=2,p=1$...
//! ```

use std::sync::Arc;

use serde_yaml::Value;
use tracing::debug;

use crate::domain::ports::{
    DocumentStore, DocumentStoreError, UserRegistryError, UserRegistrySource,
};
use crate::domain::{DocumentName, UserRegistry};

/// Loads `username: hash` pairs from a YAML document on every call.
#[derive(Clone)]
pub struct YamlUserRegistry {
    store: Arc<dyn DocumentStore>,
    document: DocumentName,
}

impl YamlUserRegistry {
    /// Read the registry from `document` in `store`.
    pub fn new(store: Arc<dyn DocumentStore>, document: DocumentName) -> Self {
        Self { store, document }
    }
}

impl UserRegistrySource for YamlUserRegistry {
    fn load(&self) -> Result<UserRegistry, UserRegistryError> {
        let bytes = match self.store.read(&self.document) {
            Ok(bytes) => bytes,
            Err(DocumentStoreError::NotFound { .. }) => {
                debug!(document = %self.document, "user registry absent; no users");
                return Ok(UserRegistry::default());
            }
            Err(err) => return Err(UserRegistryError::unavailable(err.to_string())),
        };
        parse_registry(&bytes)
    }
}

fn parse_registry(bytes: &[u8]) -> Result<UserRegistry, UserRegistryError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(UserRegistry::default());
    }
    let value: Value =
        serde_yaml::from_slice(bytes).map_err(|err| UserRegistryError::malformed(err.to_string()))?;
    let mapping = match value {
        Value::Null => return Ok(UserRegistry::default()),
        Value::Mapping(mapping) => mapping,
        _ => return Err(UserRegistryError::malformed("expected a mapping of users")),
    };
    Ok(mapping
        .into_iter()
        .filter_map(|(user, hash)| match (user, hash) {
            (Value::String(user), Value::String(hash)) => Some((user, hash)),
            (user, _) => {
                debug!(user = ?user, "skipping registry entry without a string hash");
                None
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{InMemoryDocumentStore, MockDocumentStore};
    use rstest::rstest;

    fn users_yml() -> DocumentName {
        DocumentName::new("users.yml").expect("valid name")
    }

    fn registry_with(content: &str) -> YamlUserRegistry {
        let store =
            InMemoryDocumentStore::with_documents([(users_yml(), content.as_bytes().to_vec())]);
        YamlUserRegistry::new(Arc::new(store), users_yml())
    }

    #[rstest]
    fn parses_string_pairs() {
        let registry = registry_with("admin: $argon2id$abc\neditor: $argon2id$def\n")
            .load()
            .expect("load");
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.hash_for("admin"), Some("$argon2id$abc"));
    }

    #[rstest]
    fn skips_non_string_hashes() {
        let registry = registry_with("admin: 42\nguest: ~\neditor: hash\n")
            .load()
            .expect("load");
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.hash_for("admin"), None);
        assert_eq!(registry.hash_for("editor"), Some("hash"));
    }

    #[rstest]
    #[case("")]
    #[case("~\n")]
    fn empty_documents_yield_empty_registry(#[case] content: &str) {
        assert!(registry_with(content).load().expect("load").is_empty());
    }

    #[rstest]
    #[case("admin: [unclosed")]
    #[case("- admin\n- editor\n")]
    fn malformed_documents_are_reported(#[case] content: &str) {
        let err = registry_with(content).load().expect_err("malformed");
        assert!(matches!(err, UserRegistryError::Malformed { .. }));
    }

    #[rstest]
    fn missing_document_yields_empty_registry() {
        let source = YamlUserRegistry::new(Arc::new(InMemoryDocumentStore::default()), users_yml());
        assert!(source.load().expect("load").is_empty());
    }

    #[rstest]
    fn store_failures_are_unavailable() {
        let mut store = MockDocumentStore::new();
        store
            .expect_read()
            .times(1)
            .return_once(|_| Err(DocumentStoreError::io("permission denied")));
        let source = YamlUserRegistry::new(Arc::new(store), users_yml());
        let err = source.load().expect_err("unavailable");
        assert!(matches!(err, UserRegistryError::Unavailable { .. }));
    }
}
