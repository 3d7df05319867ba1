//! Driven port for loading the user registry.

use crate::domain::UserRegistry;

use super::define_port_error;

define_port_error! {
    /// Errors raised while loading the registry.
    pub enum UserRegistryError {
        /// The registry document could not be read.
        Unavailable { message: String } => "user registry unavailable: {message}",
        /// The registry document exists but does not parse.
        Malformed { message: String } => "user registry is malformed: {message}",
    }
}

/// Source of the username → password-hash mapping.
///
/// Loaded per sign-in attempt so edits to the registry take effect without
/// a restart.
#[cfg_attr(test, mockall::automock)]
pub trait UserRegistrySource: Send + Sync {
    /// Load the current registry.
    fn load(&self) -> Result<UserRegistry, UserRegistryError>;
}

/// Registry fixed at construction.
#[derive(Debug, Default, Clone)]
pub struct StaticUserRegistry(UserRegistry);

impl StaticUserRegistry {
    /// Wrap an already-loaded registry.
    pub fn new(registry: UserRegistry) -> Self {
        Self(registry)
    }
}

impl UserRegistrySource for StaticUserRegistry {
    fn load(&self) -> Result<UserRegistry, UserRegistryError> {
        Ok(self.0.clone())
    }
}
