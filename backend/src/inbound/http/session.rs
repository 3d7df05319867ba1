//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The whole domain [`Session`] (identity plus one-shot messages) is stored
//! as one JSON value in the Actix cookie session. Handlers load it, hand it
//! to the service and store it back before responding.

use actix_session::Session as CookieSession;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, Session};

pub(crate) const SESSION_KEY: &str = "cms";

/// Newtype wrapper over the Actix session exposing the domain session.
#[derive(Clone)]
pub struct SessionContext(CookieSession);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: CookieSession) -> Self {
        Self(session)
    }

    /// Current domain session. A missing or unreadable cookie yields an
    /// anonymous session with no messages.
    pub fn load(&self) -> Session {
        match self.0.get::<Session>(SESSION_KEY) {
            Ok(Some(session)) => session,
            Ok(None) => Session::default(),
            Err(error) => {
                warn!(%error, "discarding unreadable session state");
                Session::default()
            }
        }
    }

    /// Persist `session` into the cookie.
    pub fn store(&self, session: &Session) -> Result<(), Error> {
        self.0
            .insert(SESSION_KEY, session)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = CookieSession::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
