//! HTTP adapter mapping for hard failures.
//!
//! Denials and missing documents never reach this module; handlers turn
//! them into redirects with a one-shot message. What remains are failures
//! the user cannot fix, rendered as a small HTML page that carries the
//! trace id so operators can find the matching log line.

use actix_web::error::BlockingError;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError, http::StatusCode, web};
use tracing::error;

use crate::domain::{Error, ErrorCode, TraceId};
use crate::inbound::http::pages;
use crate::middleware::trace::TRACE_ID_HEADER;

/// Convenient result alias for HTTP handlers.
pub type HttpResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        let mut redacted = Error::internal("Internal server error");
        if let Some(id) = error.trace_id() {
            redacted = redacted.with_trace_id(id.to_owned());
        }
        redacted
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        let shown = redact_if_internal(self);
        builder
            .content_type(ContentType::html())
            .body(pages::error_page(shown.message(), shown.trace_id()))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

impl From<BlockingError> for Error {
    fn from(err: BlockingError) -> Self {
        error!(error = %err, "blocking task was cancelled");
        Error::internal("Internal server error")
    }
}

/// Run blocking service work on the Actix blocking pool.
///
/// Task-local trace ids do not cross into the pool, so errors raised there
/// are stamped with the caller's id on the way back.
pub(crate) async fn run_blocking<F, T>(work: F) -> HttpResult<T>
where
    F: FnOnce() -> HttpResult<T> + Send + 'static,
    T: Send + 'static,
{
    let trace_id = TraceId::current();
    web::block(work).await?.map_err(|err| match trace_id {
        Some(id) if err.trace_id().is_none() => err.with_trace_id(id.to_string()),
        _ => err,
    })
}
