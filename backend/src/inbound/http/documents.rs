//! Document handlers.
//!
//! ```text
//! GET  /                  listing
//! GET  /new               new-document form
//! POST /create            create {file_name, content}
//! GET  /{name}            rendered document
//! GET  /{name}/edit       edit form
//! POST /{name}            update {content}
//! POST /{name}/delete     delete
//! ```
//!
//! Denials and missing documents become a one-shot error message and a
//! redirect to the listing, except for create-name problems, which re-render
//! the form with `422 Unprocessable Entity`.

use actix_web::http::StatusCode;
use actix_web::http::header::{self, ContentType};
use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;

use crate::domain::{Denial, FlashKind, FlashMessage, Outcome, Session};
use crate::inbound::http::error::{HttpResult, run_blocking};
use crate::inbound::http::pages;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Form body for `POST /create`.
#[derive(Debug, Deserialize)]
pub struct CreateForm {
    /// Proposed document name; surrounding whitespace is ignored.
    #[serde(default)]
    pub file_name: String,
    /// Initial content.
    #[serde(default)]
    pub content: String,
}

/// Form body for `POST /{name}`.
#[derive(Debug, Deserialize)]
pub struct ContentForm {
    /// Replacement content.
    #[serde(default)]
    pub content: String,
}

pub(crate) fn html(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(ContentType::html())
        .body(body)
}

pub(crate) fn redirect_home() -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, "/"))
        .finish()
}

/// Queue `message`, persist the session and send the caller to the listing.
pub(crate) fn redirect_with(
    ctx: &SessionContext,
    mut session: Session,
    kind: FlashKind,
    message: &str,
) -> HttpResult<HttpResponse> {
    session.flash.push(kind, message);
    ctx.store(&session)?;
    Ok(redirect_home())
}

fn redirect_with_failure<T>(
    ctx: &SessionContext,
    session: Session,
    outcome: &Outcome<T>,
) -> HttpResult<HttpResponse> {
    let message = outcome.failure_message().unwrap_or_default();
    redirect_with(ctx, session, FlashKind::Error, message)
}

/// Document listing.
#[get("/")]
pub async fn list_documents(
    state: web::Data<HttpState>,
    ctx: SessionContext,
) -> HttpResult<HttpResponse> {
    let mut session = ctx.load();
    let service = state.documents.clone();
    let names = run_blocking(move || service.list()).await?;
    let messages = session.flash.consume();
    ctx.store(&session)?;
    Ok(html(
        StatusCode::OK,
        pages::index(&names, session.username(), &messages),
    ))
}

/// New-document form. Requires a signed-in caller.
#[get("/new")]
pub async fn new_document(ctx: SessionContext) -> HttpResult<HttpResponse> {
    let mut session = ctx.load();
    if !session.is_signed_in() {
        return redirect_with(
            &ctx,
            session,
            FlashKind::Error,
            &Denial::MustSignIn.message(""),
        );
    }
    let messages = session.flash.consume();
    ctx.store(&session)?;
    Ok(html(StatusCode::OK, pages::new_document("", &messages)))
}

/// Create a document.
#[post("/create")]
pub async fn create_document(
    state: web::Data<HttpState>,
    ctx: SessionContext,
    form: web::Form<CreateForm>,
) -> HttpResult<HttpResponse> {
    let session = ctx.load();
    let CreateForm { file_name, content } = form.into_inner();
    let service = state.documents.clone();
    let snapshot = session.clone();
    let requested = file_name.clone();
    let outcome =
        run_blocking(move || service.create(&snapshot, &requested, content.as_bytes())).await?;

    match outcome {
        Outcome::Ok(confirmation) => {
            redirect_with(&ctx, session, FlashKind::Success, &confirmation.message)
        }
        Outcome::Denied {
            reason: Denial::NameRequired | Denial::ExtensionRequired | Denial::InvalidName,
            message,
        } => {
            let messages = [FlashMessage {
                kind: FlashKind::Error,
                text: message,
            }];
            Ok(html(
                StatusCode::UNPROCESSABLE_ENTITY,
                pages::new_document(file_name.trim(), &messages),
            ))
        }
        failure => redirect_with_failure(&ctx, session, &failure),
    }
}

/// Rendered document with the renderer's content type.
#[get("/{name}")]
pub async fn view_document(
    state: web::Data<HttpState>,
    ctx: SessionContext,
    path: web::Path<String>,
) -> HttpResult<HttpResponse> {
    let session = ctx.load();
    let name = path.into_inner();
    let service = state.documents.clone();
    let snapshot = session.clone();
    let outcome = run_blocking(move || service.view(&snapshot, &name)).await?;

    match outcome {
        Outcome::Ok(rendered) => Ok(HttpResponse::Ok()
            .insert_header((header::CONTENT_TYPE, rendered.content_type.as_str()))
            .body(rendered.body)),
        failure => redirect_with_failure(&ctx, session, &failure),
    }
}

/// Edit form holding the raw content.
#[get("/{name}/edit")]
pub async fn edit_document(
    state: web::Data<HttpState>,
    ctx: SessionContext,
    path: web::Path<String>,
) -> HttpResult<HttpResponse> {
    let mut session = ctx.load();
    let name = path.into_inner();
    let service = state.documents.clone();
    let snapshot = session.clone();
    let outcome = run_blocking(move || service.load_for_edit(&snapshot, &name)).await?;

    match outcome {
        Outcome::Ok(document) => {
            let messages = session.flash.consume();
            ctx.store(&session)?;
            let content = String::from_utf8_lossy(&document.content);
            Ok(html(
                StatusCode::OK,
                pages::edit_document(&document.name, &content, &messages),
            ))
        }
        failure => redirect_with_failure(&ctx, session, &failure),
    }
}

/// Replace a document's content.
#[post("/{name}")]
pub async fn update_document(
    state: web::Data<HttpState>,
    ctx: SessionContext,
    path: web::Path<String>,
    form: web::Form<ContentForm>,
) -> HttpResult<HttpResponse> {
    let session = ctx.load();
    let name = path.into_inner();
    let content = form.into_inner().content;
    let service = state.documents.clone();
    let snapshot = session.clone();
    let outcome =
        run_blocking(move || service.update(&snapshot, &name, content.as_bytes())).await?;

    match outcome {
        Outcome::Ok(confirmation) => {
            redirect_with(&ctx, session, FlashKind::Success, &confirmation.message)
        }
        failure => redirect_with_failure(&ctx, session, &failure),
    }
}

/// Delete a document.
#[post("/{name}/delete")]
pub async fn delete_document(
    state: web::Data<HttpState>,
    ctx: SessionContext,
    path: web::Path<String>,
) -> HttpResult<HttpResponse> {
    let session = ctx.load();
    let name = path.into_inner();
    let service = state.documents.clone();
    let snapshot = session.clone();
    let outcome = run_blocking(move || service.delete(&snapshot, &name)).await?;

    match outcome {
        Outcome::Ok(confirmation) => {
            redirect_with(&ctx, session, FlashKind::Success, &confirmation.message)
        }
        failure => redirect_with_failure(&ctx, session, &failure),
    }
}

#[cfg(test)]
#[path = "documents_tests.rs"]
mod tests;
