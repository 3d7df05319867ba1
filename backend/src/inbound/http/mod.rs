//! HTTP inbound adapter serving the document pages.

pub mod documents;
pub mod error;
pub mod pages;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

use actix_web::web;
use tracing::info;

use crate::domain::Error;

pub use error::HttpResult;

/// Form extraction settings: undecodable bodies become
/// [`crate::domain::ErrorCode::InvalidRequest`] pages.
fn form_config() -> web::FormConfig {
    web::FormConfig::default().error_handler(|err, req| {
        info!(path = req.path(), error = %err, "rejected form body");
        Error::invalid_request(format!("The submitted form could not be read: {err}")).into()
    })
}

/// Register every route.
///
/// Fixed paths are registered before the `/{name}` catch-alls so that
/// `/new`, `/create` and `/users/*` are never read as document names.
///
/// # Examples
/// ```
/// use actix_web::App;
///
/// let _app = App::new().configure(cms::inbound::http::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(form_config())
        .service(documents::list_documents)
        .service(documents::new_document)
        .service(documents::create_document)
        .service(users::sign_in_form)
        .service(users::sign_in)
        .service(users::sign_out)
        .service(documents::view_document)
        .service(documents::edit_document)
        .service(documents::update_document)
        .service(documents::delete_document);
}
