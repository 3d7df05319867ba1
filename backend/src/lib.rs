//! Flat-file content management: documents on disk, rendered on request,
//! edited by signed-in users.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

pub use middleware::Trace;
