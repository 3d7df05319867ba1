//! Service configuration loaded via OrthoConfig.
//!
//! Values come from `CMS_*` environment variables, command-line flags or a
//! configuration file; anything unset falls back to the defaults below.

use std::path::{Path, PathBuf};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{DocumentName, DocumentNameError, RestrictedNames};

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:4567";
const DEFAULT_USERS_FILE: &str = "users.yml";

/// Runtime settings for the document service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CMS")]
pub struct CmsSettings {
    /// Directory holding the documents.
    pub data_dir: Option<PathBuf>,
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Name of the user registry document inside `data_dir`.
    pub users_file: Option<String>,
}

impl CmsSettings {
    /// Configured data directory, falling back to `data`.
    pub fn data_dir(&self) -> &Path {
        self.data_dir
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_DATA_DIR))
    }

    /// Configured bind address, falling back to `0.0.0.0:4567`.
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Configured registry document name, falling back to `users.yml`.
    pub fn users_file(&self) -> &str {
        self.users_file.as_deref().unwrap_or(DEFAULT_USERS_FILE)
    }

    /// The registry document as a validated name.
    pub fn users_document(&self) -> Result<DocumentName, DocumentNameError> {
        DocumentName::new(self.users_file())
    }

    /// Names only the admin may touch: the user registry.
    pub fn restricted_names(&self) -> RestrictedNames {
        RestrictedNames::new([self.users_file()])
    }
}
