//! Document identity and classification.
//!
//! A document has no identity beyond its name. [`DocumentName`] guarantees
//! the name is safe to resolve inside the storage root; the extension rules
//! used when creating documents live in [`DocumentName::has_valid_extension`].

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest name, in bytes, a single path component may have.
pub const MAX_NAME_LEN: usize = 255;

/// Validation errors returned by [`DocumentName::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentNameError {
    /// Name was empty once trimmed.
    #[error("document name must not be empty")]
    Empty,
    /// Name contains a path separator or NUL byte, or is a `.`/`..` segment.
    #[error("document name must not contain path separators or parent segments")]
    UnsafePath,
    /// Name exceeds [`MAX_NAME_LEN`] bytes.
    #[error("document name must be at most {MAX_NAME_LEN} bytes")]
    TooLong,
}

/// File-system-safe document name.
///
/// ## Invariants
/// - Non-empty and free of surrounding whitespace.
/// - Contains no `/`, `\` or NUL characters and is neither `.` nor `..`,
///   so it always resolves to a direct child of the storage root. Repeated
///   dots elsewhere (`notes..txt`) are allowed.
/// - At most [`MAX_NAME_LEN`] bytes, so it fits in one directory entry.
///
/// # Examples
/// ```
/// use cms::domain::DocumentName;
///
/// let name = DocumentName::new("about.md").expect("valid name");
/// assert_eq!(name.extension(), Some("md"));
/// assert!(DocumentName::new("../secrets.txt").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentName(String);

impl DocumentName {
    /// Validate and construct a name from raw input.
    pub fn new(raw: impl Into<String>) -> Result<Self, DocumentNameError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(DocumentNameError::Empty);
        }
        if raw.trim() != raw || raw == "." || raw == ".." {
            return Err(DocumentNameError::UnsafePath);
        }
        if raw.chars().any(|c| matches!(c, '/' | '\\' | '\0')) {
            return Err(DocumentNameError::UnsafePath);
        }
        if raw.len() > MAX_NAME_LEN {
            return Err(DocumentNameError::TooLong);
        }
        Ok(Self(raw))
    }

    /// Borrow the name as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Substring after the final `.`, if any.
    pub fn extension(&self) -> Option<&str> {
        self.0.rsplit_once('.').map(|(_, ext)| ext)
    }

    /// Whether the name is acceptable for a newly created document: it must
    /// carry an extension containing at least one ASCII letter.
    ///
    /// # Examples
    /// ```
    /// use cms::domain::DocumentName;
    ///
    /// let ok = DocumentName::new("notes.txt").expect("valid");
    /// let numeric = DocumentName::new("notes.1").expect("valid");
    /// let bare = DocumentName::new("notes").expect("valid");
    /// assert!(ok.has_valid_extension());
    /// assert!(!numeric.has_valid_extension());
    /// assert!(!bare.has_valid_extension());
    /// ```
    pub fn has_valid_extension(&self) -> bool {
        self.extension()
            .is_some_and(|ext| ext.chars().any(|c| c.is_ascii_alphabetic()))
    }

    /// Content kind derived from the extension.
    pub fn kind(&self) -> DocumentKind {
        DocumentKind::classify(self)
    }
}

impl AsRef<str> for DocumentName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for DocumentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<DocumentName> for String {
    fn from(value: DocumentName) -> Self {
        value.0
    }
}

impl TryFrom<String> for DocumentName {
    type Error = DocumentNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// How a document's bytes should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// `.md` documents, rendered to HTML.
    Markdown,
    /// Everything else, passed through untouched.
    Plaintext,
}

impl DocumentKind {
    /// Classify a document by its extension. The comparison is
    /// case-sensitive, so `README.MD` is plaintext.
    pub fn classify(name: &DocumentName) -> Self {
        match name.extension() {
            Some("md") => Self::Markdown,
            _ => Self::Plaintext,
        }
    }
}
