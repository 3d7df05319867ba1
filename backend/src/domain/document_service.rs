//! Document service: the orchestrator behind every user-facing operation.
//!
//! Each operation asks the [`AccessPolicy`] first, then talks to the store
//! and renderer. Denials and missing documents come back as [`Outcome`]
//! values; only store failures the user cannot act on become [`Error`].

use std::sync::Arc;

use tracing::{error, info};

use super::auth::LoginCredentials;
use super::content::{RenderedDocument, render};
use super::document::DocumentName;
use super::error::Error;
use super::policy::{AccessPolicy, AccessRequest, Decision, Denial, Operation};
use super::ports::{DocumentStore, DocumentStoreError, UserRegistrySource};
use super::session::Session;

/// Tagged result of a service operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The operation completed.
    Ok(T),
    /// The policy refused the operation.
    Denied {
        /// Why.
        reason: Denial,
        /// Human-readable reason for a one-shot message.
        message: String,
    },
    /// The named document does not exist.
    NotFound {
        /// Human-readable message for a one-shot message.
        message: String,
    },
}

impl<T> Outcome<T> {
    fn denied(reason: Denial, name: &str) -> Self {
        Self::Denied {
            reason,
            message: reason.message(name),
        }
    }

    fn not_found(name: &str) -> Self {
        Self::NotFound {
            message: format!("{name} does not exist."),
        }
    }

    /// Denial reason, if the operation was refused.
    pub fn denial(&self) -> Option<Denial> {
        match self {
            Self::Denied { reason, .. } => Some(*reason),
            Self::Ok(_) | Self::NotFound { .. } => None,
        }
    }

    /// Whether the outcome is [`Outcome::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// User-facing message for a failed outcome.
    pub fn failure_message(&self) -> Option<&str> {
        match self {
            Self::Denied { message, .. } | Self::NotFound { message } => Some(message),
            Self::Ok(_) => None,
        }
    }

    /// Success payload, discarding any failure.
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Ok(value) => Some(value),
            Self::Denied { .. } | Self::NotFound { .. } => None,
        }
    }
}

/// Result alias for service operations.
pub type ServiceResult<T> = Result<Outcome<T>, Error>;

/// Confirmation of a completed change, for a one-shot success message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    /// Document the change applied to, when there is one.
    pub name: Option<DocumentName>,
    /// Message shown to the user.
    pub message: String,
}

impl Confirmation {
    fn for_document(name: DocumentName, verb: &str) -> Self {
        let message = format!("{name} was {verb}.");
        Self {
            name: Some(name),
            message,
        }
    }

    fn message(message: &str) -> Self {
        Self {
            name: None,
            message: message.to_owned(),
        }
    }
}

/// Raw content loaded for the edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditableDocument {
    /// Document name.
    pub name: DocumentName,
    /// Stored bytes, unrendered.
    pub content: Vec<u8>,
}

/// Orchestrates policy, store and renderer.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use cms::domain::ports::{InMemoryDocumentStore, StaticUserRegistry};
/// use cms::domain::{AccessPolicy, DocumentService, Outcome, RestrictedNames, Session};
///
/// let service = DocumentService::new(
///     Arc::new(InMemoryDocumentStore::default()),
///     Arc::new(StaticUserRegistry::default()),
///     AccessPolicy::new(RestrictedNames::new(["users.yml"])),
/// );
/// let outcome = service.view(&Session::default(), "missing.txt").expect("store reachable");
/// assert!(outcome.is_not_found());
/// ```
#[derive(Clone)]
pub struct DocumentService {
    store: Arc<dyn DocumentStore>,
    registry: Arc<dyn UserRegistrySource>,
    policy: AccessPolicy,
}

impl DocumentService {
    /// Assemble a service from its collaborators.
    pub fn new(
        store: Arc<dyn DocumentStore>,
        registry: Arc<dyn UserRegistrySource>,
        policy: AccessPolicy,
    ) -> Self {
        Self {
            store,
            registry,
            policy,
        }
    }

    /// Names of every stored document. Listing is open to everyone.
    pub fn list(&self) -> Result<Vec<DocumentName>, Error> {
        self.store.list().map_err(|err| store_failure("list", "", &err))
    }

    /// Render a document for display.
    pub fn view(&self, session: &Session, name: &str) -> ServiceResult<RenderedDocument> {
        let document = match self.authorize(Operation::View, name, session)? {
            Ok(document) => document,
            Err(outcome) => return Ok(outcome),
        };
        match self.store.read(&document) {
            Ok(bytes) => Ok(Outcome::Ok(render(document.kind(), bytes))),
            Err(DocumentStoreError::NotFound { .. }) => Ok(Outcome::not_found(name)),
            Err(err) => Err(store_failure("view", name, &err)),
        }
    }

    /// Load raw content for editing.
    pub fn load_for_edit(&self, session: &Session, name: &str) -> ServiceResult<EditableDocument> {
        let document = match self.authorize(Operation::Edit, name, session)? {
            Ok(document) => document,
            Err(outcome) => return Ok(outcome),
        };
        match self.store.read(&document) {
            Ok(content) => Ok(Outcome::Ok(EditableDocument {
                name: document,
                content,
            })),
            Err(DocumentStoreError::NotFound { .. }) => Ok(Outcome::not_found(name)),
            Err(err) => Err(store_failure("edit", name, &err)),
        }
    }

    /// Create a document. Surrounding whitespace in `name` is ignored.
    pub fn create(
        &self,
        session: &Session,
        name: &str,
        content: &[u8],
    ) -> ServiceResult<Confirmation> {
        let name = name.trim();
        let document = match self.authorize(Operation::Create, name, session)? {
            Ok(document) => document,
            Err(outcome) => return Ok(outcome),
        };
        self.store
            .write(&document, content)
            .map_err(|err| store_failure("create", name, &err))?;
        info!(name = %document, user = session.username(), "document created");
        Ok(Outcome::Ok(Confirmation::for_document(document, "created")))
    }

    /// Replace a document's content wholesale.
    pub fn update(
        &self,
        session: &Session,
        name: &str,
        content: &[u8],
    ) -> ServiceResult<Confirmation> {
        let document = match self.authorize(Operation::Update, name, session)? {
            Ok(document) => document,
            Err(outcome) => return Ok(outcome),
        };
        self.store
            .write(&document, content)
            .map_err(|err| store_failure("update", name, &err))?;
        info!(name = %document, user = session.username(), "document updated");
        Ok(Outcome::Ok(Confirmation::for_document(document, "updated")))
    }

    /// Remove a document permanently.
    pub fn delete(&self, session: &Session, name: &str) -> ServiceResult<Confirmation> {
        let document = match self.authorize(Operation::Delete, name, session)? {
            Ok(document) => document,
            Err(outcome) => return Ok(outcome),
        };
        match self.store.delete(&document) {
            Ok(()) => {
                info!(name = %document, user = session.username(), "document deleted");
                Ok(Outcome::Ok(Confirmation::for_document(document, "deleted")))
            }
            Err(DocumentStoreError::NotFound { .. }) => Ok(Outcome::not_found(name)),
            Err(err) => Err(store_failure("delete", name, &err)),
        }
    }

    /// Authenticate against the registry and mark the session signed in.
    ///
    /// Any failure, including an unreadable registry, leaves the session
    /// untouched and yields [`Denial::InvalidCredentials`].
    pub fn sign_in(
        &self,
        session: &mut Session,
        username: &str,
        password: &str,
    ) -> ServiceResult<Confirmation> {
        let denied = || Outcome::denied(Denial::InvalidCredentials, username);
        let Ok(credentials) = LoginCredentials::try_from_parts(username, password) else {
            info!(reason = "malformed_credentials", "sign-in refused");
            return Ok(denied());
        };
        let registry = match self.registry.load() {
            Ok(registry) => registry,
            Err(err) => {
                error!(error = %err, "user registry could not be loaded");
                return Ok(denied());
            }
        };
        if !registry.authenticate(&credentials) {
            info!(user = credentials.username(), "sign-in refused");
            return Ok(denied());
        }
        session.sign_in(credentials.username());
        info!(user = credentials.username(), "signed in");
        Ok(Outcome::Ok(Confirmation::message("Welcome!")))
    }

    /// Forget the signed-in user. Always succeeds.
    pub fn sign_out(&self, session: &mut Session) -> Confirmation {
        if let Some(user) = session.username() {
            info!(user, "signed out");
        }
        session.sign_out();
        Confirmation::message("You have been signed out.")
    }

    fn authorize<T>(
        &self,
        operation: Operation,
        name: &str,
        session: &Session,
    ) -> Result<Result<DocumentName, Outcome<T>>, Error> {
        let request = AccessRequest {
            operation,
            name,
            session,
        };
        let decision = self
            .policy
            .authorize(&request, self.store.as_ref())
            .map_err(|err| store_failure(operation.as_str(), name, &err))?;
        Ok(match decision {
            Decision::Allow(document) => Ok(document),
            Decision::Deny(reason) => {
                info!(
                    operation = operation.as_str(),
                    name,
                    reason = reason.code(),
                    user = session.username(),
                    "operation denied"
                );
                Err(Outcome::denied(reason, name))
            }
            Decision::NotFound => Err(Outcome::not_found(name)),
        })
    }
}

fn store_failure(operation: &str, name: &str, err: &DocumentStoreError) -> Error {
    error!(operation, name, error = %err, "document store failure");
    Error::internal(format!("document store failure during {operation}"))
}

#[cfg(test)]
#[path = "document_service_tests.rs"]
mod tests;
