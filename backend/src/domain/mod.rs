//! Domain core of the content service.
//!
//! Purpose: hold the rules about which documents exist, how they render and
//! who may change them. Nothing in here knows about HTTP, cookies or the
//! filesystem; those arrive through [`ports`].
//!
//! Public surface:
//! - [`DocumentName`] / [`DocumentKind`]: validated names and their kind.
//! - [`render`]: Markdown or plaintext rendering with a content-type tag.
//! - [`Session`]: identity plus the one-shot message queue.
//! - [`AccessPolicy`]: the ordered authorisation checks.
//! - [`DocumentService`]: the operations the inbound adapter calls.

pub mod auth;
pub mod content;
pub mod document;
pub mod document_service;
pub mod error;
pub mod policy;
pub mod ports;
pub mod session;
pub mod trace_id;

pub use self::auth::{
    LoginCredentials, LoginValidationError, PasswordHashingError, UserRegistry, hash_password,
    verify_password,
};
pub use self::content::{ContentType, RenderedDocument, render};
pub use self::document::{DocumentKind, DocumentName, DocumentNameError, MAX_NAME_LEN};
pub use self::document_service::{
    Confirmation, DocumentService, EditableDocument, Outcome, ServiceResult,
};
pub use self::error::{Error, ErrorCode};
pub use self::policy::{AccessPolicy, AccessRequest, Decision, Denial, Operation, RestrictedNames};
pub use self::session::{ADMIN_USERNAME, FlashKind, FlashMessage, FlashQueue, Identity, Session};
pub use self::trace_id::TraceId;
