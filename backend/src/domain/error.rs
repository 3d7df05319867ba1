//! Domain-level hard-failure type.
//!
//! Policy denials and missing documents are expected outcomes and travel as
//! [`crate::domain::Outcome`] values. [`Error`] is reserved for failures the
//! user cannot fix, such as the store's disk going away. It is transport
//! agnostic; inbound adapters map it to a response.

use super::trace_id::TraceId;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// The request body could not be decoded.
    InvalidRequest,
    /// An unexpected error occurred inside the domain or an adapter.
    InternalError,
}

/// Hard-failure payload.
///
/// Captures the active [`TraceId`] at construction so logs and responses
/// correlate without threading ids through every call.
///
/// # Examples
/// ```
/// use cms::domain::{Error, ErrorCode};
///
/// let err = Error::internal("disk unavailable");
/// assert_eq!(err.code(), ErrorCode::InternalError);
/// assert_eq!(err.message(), "disk unavailable");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    message: String,
    trace_id: Option<String>,
}

impl Error {
    /// Create a new error in the current trace scope.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Correlation id captured at construction, if any.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Replace the correlation id.
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}
