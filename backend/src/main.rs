//! Backend entry-point: loads settings, wires adapters, and serves HTTP.

mod server;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use cms::config::CmsSettings;
use cms::domain::ports::DocumentStore;
use cms::domain::{AccessPolicy, DocumentService};
use cms::inbound::http::session_config::{BuildMode, session_settings_from_env};
use cms::inbound::http::state::HttpState;
use cms::outbound::{CapStdDocumentStore, YamlUserRegistry};
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = CmsSettings::load()
        .map_err(|e| io::Error::other(format!("failed to load configuration: {e}")))?;
    let env = DefaultEnv::new();
    let session = session_settings_from_env(&env, BuildMode::from_debug_assertions())
        .map_err(io::Error::other)?;
    let bind_addr: SocketAddr = settings.bind_addr().parse().map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid bind address {}: {e}", settings.bind_addr()),
        )
    })?;

    let store: Arc<dyn DocumentStore> = Arc::new(CapStdDocumentStore::open(settings.data_dir())?);
    let users_document = settings.users_document().map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid users file {}: {e}", settings.users_file()),
        )
    })?;
    let registry = Arc::new(YamlUserRegistry::new(store.clone(), users_document));
    let documents = DocumentService::new(
        store,
        registry,
        AccessPolicy::new(settings.restricted_names()),
    );

    let config = ServerConfig::new(session, bind_addr, HttpState::new(documents));
    info!(
        addr = %config.bind_addr(),
        data_dir = %settings.data_dir().display(),
        "starting document server"
    );
    create_server(config)?.await
}
