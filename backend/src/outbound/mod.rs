//! Outbound adapters implementing domain ports.
//!
//! - **filesystem**: documents as files under a `cap_std` directory handle
//! - **user_registry**: the YAML `username: hash` registry document
//!
//! Adapters translate between domain types and storage representations.
//! They contain no authorisation logic.

pub mod filesystem;
pub mod user_registry;

pub use filesystem::CapStdDocumentStore;
pub use user_registry::YamlUserRegistry;
