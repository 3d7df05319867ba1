//! Sign-in handlers.
//!
//! ```text
//! GET  /users/signin   form
//! POST /users/signin   {username, password}
//! POST /users/signout
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use zeroize::Zeroizing;

use crate::domain::{FlashKind, FlashMessage, Outcome};
use crate::inbound::http::documents::{html, redirect_with};
use crate::inbound::http::error::{HttpResult, run_blocking};
use crate::inbound::http::pages;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Form body for `POST /users/signin`.
#[derive(Deserialize)]
pub struct SignInForm {
    /// Registry username.
    #[serde(default)]
    pub username: String,
    /// Plain password.
    #[serde(default)]
    pub password: String,
}

/// Sign-in form.
#[get("/users/signin")]
pub async fn sign_in_form(ctx: SessionContext) -> HttpResult<HttpResponse> {
    let mut session = ctx.load();
    let messages = session.flash.consume();
    ctx.store(&session)?;
    Ok(html(StatusCode::OK, pages::sign_in("", &messages)))
}

/// Authenticate and mark the session signed in.
#[post("/users/signin")]
pub async fn sign_in(
    state: web::Data<HttpState>,
    ctx: SessionContext,
    form: web::Form<SignInForm>,
) -> HttpResult<HttpResponse> {
    let mut session = ctx.load();
    let SignInForm { username, password } = form.into_inner();
    let password = Zeroizing::new(password);
    let service = state.documents.clone();
    let attempted = username.clone();
    let (session, outcome) = run_blocking(move || {
        let outcome = service.sign_in(&mut session, &attempted, &password)?;
        Ok((session, outcome))
    })
    .await?;

    match outcome {
        Outcome::Ok(confirmation) => {
            redirect_with(&ctx, session, FlashKind::Success, &confirmation.message)
        }
        failure => {
            let messages = [FlashMessage {
                kind: FlashKind::Error,
                text: failure.failure_message().unwrap_or_default().to_owned(),
            }];
            Ok(html(
                StatusCode::UNPROCESSABLE_ENTITY,
                pages::sign_in(&username, &messages),
            ))
        }
    }
}

/// Forget the signed-in user.
#[post("/users/signout")]
pub async fn sign_out(
    state: web::Data<HttpState>,
    ctx: SessionContext,
) -> HttpResult<HttpResponse> {
    let mut session = ctx.load();
    let confirmation = state.documents.sign_out(&mut session);
    redirect_with(&ctx, session, FlashKind::Success, &confirmation.message)
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
