//! Shared HTTP adapter state.
//!
//! Handlers accept this via `actix_web::web::Data` so they depend only on
//! the domain service and stay testable with in-memory ports.

use std::sync::Arc;

use crate::domain::DocumentService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Orchestrator behind every document and sign-in route.
    pub documents: Arc<DocumentService>,
}

impl HttpState {
    /// Wrap an assembled service.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use cms::domain::ports::{InMemoryDocumentStore, StaticUserRegistry};
    /// use cms::domain::{AccessPolicy, DocumentService};
    /// use cms::inbound::http::state::HttpState;
    ///
    /// let service = DocumentService::new(
    ///     Arc::new(InMemoryDocumentStore::default()),
    ///     Arc::new(StaticUserRegistry::default()),
    ///     AccessPolicy::default(),
    /// );
    /// let _state = HttpState::new(service);
    /// ```
    pub fn new(documents: DocumentService) -> Self {
        Self {
            documents: Arc::new(documents),
        }
    }
}
