//! Authorisation rules for document operations.
//!
//! Checks run in a fixed order: authentication, then restricted names, then
//! name validity, then existence. A caller who is not the admin therefore
//! learns only "requires admin" for a restricted name, whether or not the
//! document exists.

use std::collections::BTreeSet;

use tracing::debug;

use super::document::{DocumentName, DocumentNameError};
use super::ports::{DocumentStore, DocumentStoreError};
use super::session::Session;

/// Logical operation being authorised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Read a rendered document.
    View,
    /// Load raw content into the edit form.
    Edit,
    /// Create a new document.
    Create,
    /// Replace a document's content.
    Update,
    /// Remove a document.
    Delete,
}

impl Operation {
    /// Stable lowercase label for logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Edit => "edit",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    fn requires_sign_in(self) -> bool {
        !matches!(self, Self::View)
    }

    fn requires_existing(self) -> bool {
        matches!(self, Self::View | Self::Edit)
    }
}

/// Reason an operation was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// The operation needs a signed-in caller.
    MustSignIn,
    /// The document is restricted and the caller is not the admin.
    RequiresAdmin,
    /// Username or password did not match the registry.
    InvalidCredentials,
    /// A create request carried an empty name.
    NameRequired,
    /// A create request's name lacks an extension with a letter in it.
    ExtensionRequired,
    /// The name would resolve outside the storage directory.
    InvalidName,
}

impl Denial {
    /// Stable snake_case code for logs and tests.
    pub fn code(self) -> &'static str {
        match self {
            Self::MustSignIn => "must_sign_in",
            Self::RequiresAdmin => "requires_admin",
            Self::InvalidCredentials => "invalid_credentials",
            Self::NameRequired => "name_required",
            Self::ExtensionRequired => "extension_required",
            Self::InvalidName => "invalid_name",
        }
    }

    /// Human-readable reason shown to the user.
    pub fn message(self, name: &str) -> String {
        match self {
            Self::MustSignIn => "You must be signed in to do that.".to_owned(),
            Self::RequiresAdmin => "You must be an admin to do that.".to_owned(),
            Self::InvalidCredentials => "Invalid credentials".to_owned(),
            Self::NameRequired => "A name is required.".to_owned(),
            Self::ExtensionRequired => "An extension is required.".to_owned(),
            Self::InvalidName => format!("{name} is not a valid document name."),
        }
    }
}

/// Result of an authorisation check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Proceed with the validated name.
    Allow(DocumentName),
    /// Refuse with a reason.
    Deny(Denial),
    /// The document does not exist.
    NotFound,
}

/// Fixed set of names that only the admin may view, edit, update, delete or
/// create.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestrictedNames(BTreeSet<String>);

impl RestrictedNames {
    /// Build the set from names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    /// Whether `name` is restricted.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }
}

/// A single authorisation question.
#[derive(Debug, Clone, Copy)]
pub struct AccessRequest<'a> {
    /// What the caller wants to do.
    pub operation: Operation,
    /// Raw name as received; trimmed by the caller for create.
    pub name: &'a str,
    /// Caller's session.
    pub session: &'a Session,
}

/// The authorisation core.
///
/// # Examples
/// ```
/// use cms::domain::ports::InMemoryDocumentStore;
/// use cms::domain::{
///     AccessPolicy, AccessRequest, Decision, Denial, Operation, RestrictedNames, Session,
/// };
///
/// let policy = AccessPolicy::new(RestrictedNames::new(["users.yml"]));
/// let store = InMemoryDocumentStore::default();
/// let request = AccessRequest {
///     operation: Operation::View,
///     name: "users.yml",
///     session: &Session::default(),
/// };
/// let decision = policy.authorize(&request, &store).expect("store reachable");
/// assert_eq!(decision, Decision::Deny(Denial::RequiresAdmin));
/// ```
#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    restricted: RestrictedNames,
}

impl AccessPolicy {
    /// Create a policy protecting the given names.
    pub fn new(restricted: RestrictedNames) -> Self {
        Self { restricted }
    }

    /// Decide whether `request` may proceed.
    ///
    /// Only the existence check touches the store, and only for view and
    /// edit; its failure is the sole error this returns.
    pub fn authorize(
        &self,
        request: &AccessRequest<'_>,
        store: &dyn DocumentStore,
    ) -> Result<Decision, DocumentStoreError> {
        let AccessRequest {
            operation,
            name,
            session,
        } = *request;

        if operation.requires_sign_in() && !session.is_signed_in() {
            return Ok(Decision::Deny(Denial::MustSignIn));
        }

        if operation == Operation::Create {
            return Ok(self.authorize_create(name, session));
        }

        if self.restricted.contains(name) && !session.is_admin() {
            return Ok(Decision::Deny(Denial::RequiresAdmin));
        }

        let document = match DocumentName::new(name) {
            Ok(document) => document,
            // Empty or over-long names can never be present in the store.
            Err(DocumentNameError::Empty | DocumentNameError::TooLong)
                if operation.requires_existing() =>
            {
                return Ok(Decision::NotFound);
            }
            Err(_) => return Ok(Decision::Deny(Denial::InvalidName)),
        };

        if operation.requires_existing() && !store.exists(&document)? {
            debug!(operation = operation.as_str(), name, "document not found");
            return Ok(Decision::NotFound);
        }

        Ok(Decision::Allow(document))
    }

    fn authorize_create(&self, name: &str, session: &Session) -> Decision {
        if name.is_empty() {
            return Decision::Deny(Denial::NameRequired);
        }
        let document = match DocumentName::new(name) {
            Ok(document) => document,
            Err(DocumentNameError::Empty) => return Decision::Deny(Denial::NameRequired),
            Err(DocumentNameError::UnsafePath | DocumentNameError::TooLong) => {
                return Decision::Deny(Denial::InvalidName);
            }
        };
        if !document.has_valid_extension() {
            return Decision::Deny(Denial::ExtensionRequired);
        }
        if self.restricted.contains(name) && !session.is_admin() {
            return Decision::Deny(Denial::RequiresAdmin);
        }
        Decision::Allow(document)
    }
}
