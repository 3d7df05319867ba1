//! Authentication primitives: sign-in credentials, the user registry, and
//! password hash verification.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to the service.

use std::collections::HashMap;
use std::fmt;

use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use password_hash::{PasswordHash, SaltString};
use thiserror::Error;
use zeroize::Zeroizing;

/// Domain error returned when sign-in payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated sign-in credentials.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use cms::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" admin ", "secret").unwrap();
/// assert_eq!(creds.username(), "admin");
/// assert_eq!(creds.password(), "secret");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username string suitable for registry lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Failure while producing a password hash.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordHashingError {
    /// The OS random source could not produce a salt.
    #[error("failed to generate salt: {message}")]
    Salt { message: String },
    /// The hasher rejected its inputs.
    #[error("failed to hash password: {message}")]
    Hash { message: String },
}

/// Hash a password into a PHC string (Argon2id, random salt).
///
/// # Examples
/// ```
/// use cms::domain::{hash_password, verify_password};
///
/// let phc = hash_password("secret").expect("hashing works");
/// assert!(verify_password(&phc, "secret"));
/// assert!(!verify_password(&phc, "guess"));
/// ```
pub fn hash_password(password: &str) -> Result<String, PasswordHashingError> {
    let mut salt_bytes = [0u8; 16];
    getrandom::getrandom(&mut salt_bytes).map_err(|err| PasswordHashingError::Salt {
        message: err.to_string(),
    })?;
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|err| PasswordHashingError::Salt {
        message: err.to_string(),
    })?;
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| PasswordHashingError::Hash {
            message: err.to_string(),
        })
}

/// Check `password` against a stored PHC hash.
///
/// Digest comparison inside the verifier is constant-time. A hash that does
/// not parse verifies as `false`.
pub fn verify_password(stored_hash: &str, password: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Loaded mapping of username to password hash.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserRegistry {
    hashes: HashMap<String, String>,
}

impl UserRegistry {
    /// Build a registry from username/hash pairs.
    pub fn new(hashes: HashMap<String, String>) -> Self {
        Self { hashes }
    }

    /// Stored hash for `username`, if present.
    pub fn hash_for(&self, username: &str) -> Option<&str> {
        self.hashes.get(username).map(String::as_str)
    }

    /// Number of registered users.
    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    /// Whether no user is registered.
    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    /// Verify credentials. Unknown users and malformed hashes yield `false`.
    pub fn authenticate(&self, credentials: &LoginCredentials) -> bool {
        self.hash_for(credentials.username())
            .is_some_and(|hash| verify_password(hash, credentials.password()))
    }
}

impl FromIterator<(String, String)> for UserRegistry {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn registry() -> UserRegistry {
        let hash = hash_password("secret").expect("hash");
        [
            ("admin".to_owned(), hash),
            ("broken".to_owned(), "not-a-phc-string".to_owned()),
        ]
        .into_iter()
        .collect()
    }

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyUsername)]
    #[case("   ", "pw", LoginValidationError::EmptyUsername)]
    #[case("user", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("  admin  ", "secret")]
    #[case("alice", " padded password ")]
    fn valid_credentials_trim_username_only(#[case] username: &str, #[case] password: &str) {
        let creds = LoginCredentials::try_from_parts(username, password)
            .expect("valid inputs should succeed");
        assert_eq!(creds.username(), username.trim());
        assert_eq!(creds.password(), password);
    }

    #[rstest]
    #[case("admin", "secret", true)]
    #[case("admin", "wrong", false)]
    #[case("admin", "secret ", false)]
    #[case("nobody", "secret", false)]
    #[case("broken", "secret", false)]
    fn registry_authentication(
        registry: UserRegistry,
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: bool,
    ) {
        let creds = LoginCredentials::try_from_parts(username, password).expect("shape");
        assert_eq!(registry.authenticate(&creds), expected);
    }

    #[test]
    fn hashes_are_salted() {
        let first = hash_password("secret").expect("hash");
        let second = hash_password("secret").expect("hash");
        assert_ne!(first, second);
        assert!(first.starts_with("$argon2"));
    }
}
