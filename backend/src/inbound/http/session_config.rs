//! Cookie-session settings read from the environment.
//!
//! Debug builds fall back to permissive defaults with a warning so a local
//! checkout runs without secrets. Release builds insist on every toggle and
//! a session key of at least [`SESSION_KEY_MIN_LEN`] bytes.

use std::io;
use std::path::{Path, PathBuf};

use actix_web::cookie::{Key, SameSite};
use cap_std::{ambient_authority, fs::Dir};
use mockable::Env;
use tracing::warn;
use zeroize::Zeroize;

const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/session_key";
/// Minimum key length accepted in release builds.
pub const SESSION_KEY_MIN_LEN: usize = 64;
/// `Key::derive_from` panics below this length, so debug builds enforce it too.
const KEY_DERIVE_MIN_LEN: usize = 32;
const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
const SAMESITE_ENV: &str = "SESSION_SAMESITE";
const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// Build mode for session configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Defaults allowed, with warnings.
    Debug,
    /// Every toggle must be explicit and valid.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }

    /// Fall back in debug builds; fail in release builds.
    fn lenient<T>(self, fallback: T, error: SessionConfigError) -> Result<T, SessionConfigError> {
        if self.is_debug() {
            warn!(%error, "session setting defaulted");
            Ok(fallback)
        } else {
            Err(error)
        }
    }
}

/// Validated cookie-session settings.
pub struct SessionSettings {
    /// Signing and encryption key.
    pub key: Key,
    /// Whether the cookie carries the `Secure` attribute.
    pub cookie_secure: bool,
    /// `SameSite` policy for the cookie.
    pub same_site: SameSite,
}

/// Errors raised while validating session configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but unparseable.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// Reading the key file failed.
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The key file is too short for the build mode.
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    /// `SameSite=None` without the `Secure` attribute.
    #[error("SESSION_SAMESITE=None requires SESSION_COOKIE_SECURE=1")]
    InsecureSameSiteNone,
    /// An ephemeral key was requested in a release build.
    #[error("SESSION_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Build session settings from environment variables and build mode.
///
/// # Examples
/// ```
/// use cms::inbound::http::session_config::{BuildMode, session_settings_from_env};
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|_| None);
/// let settings = session_settings_from_env(&env, BuildMode::Debug).expect("debug defaults");
/// assert!(settings.cookie_secure);
/// ```
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = bool_from_env(env, mode, COOKIE_SECURE_ENV, true)?;
    let same_site = same_site_from_env(env, mode, cookie_secure)?;
    let allow_ephemeral = bool_from_env(env, mode, ALLOW_EPHEMERAL_ENV, false)?;
    if allow_ephemeral && !mode.is_debug() {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }
    let key = session_key_from_env(env, mode, allow_ephemeral)?;

    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
    })
}

fn bool_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    name: &'static str,
    fallback: bool,
) -> Result<bool, SessionConfigError> {
    match env.string(name) {
        Some(value) => match parse_bool(&value) {
            Some(flag) => Ok(flag),
            None => mode.lenient(
                fallback,
                SessionConfigError::InvalidEnv {
                    name,
                    value,
                    expected: BOOL_EXPECTED,
                },
            ),
        },
        None => mode.lenient(fallback, SessionConfigError::MissingEnv { name }),
    }
}

fn same_site_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    cookie_secure: bool,
) -> Result<SameSite, SessionConfigError> {
    let fallback = if mode.is_debug() {
        SameSite::Lax
    } else {
        SameSite::Strict
    };
    let Some(value) = env.string(SAMESITE_ENV) else {
        return mode.lenient(fallback, SessionConfigError::MissingEnv { name: SAMESITE_ENV });
    };
    match value.to_ascii_lowercase().as_str() {
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        "none" if cookie_secure => Ok(SameSite::None),
        "none" => mode.lenient(SameSite::None, SessionConfigError::InsecureSameSiteNone),
        _ => mode.lenient(
            fallback,
            SessionConfigError::InvalidEnv {
                name: SAMESITE_ENV,
                value,
                expected: SAMESITE_EXPECTED,
            },
        ),
    }
}

fn session_key_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Key, SessionConfigError> {
    let path = PathBuf::from(
        env.string(KEY_FILE_ENV)
            .unwrap_or_else(|| SESSION_KEY_DEFAULT_PATH.to_owned()),
    );

    match read_key_file(&path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            let min_len = if mode.is_debug() {
                KEY_DERIVE_MIN_LEN
            } else {
                SESSION_KEY_MIN_LEN
            };
            if length < min_len {
                bytes.zeroize();
                return Err(SessionConfigError::KeyTooShort {
                    path,
                    length,
                    min_len,
                });
            }
            let key = Key::derive_from(&bytes);
            bytes.zeroize();
            Ok(key)
        }
        Err(error) if mode.is_debug() || allow_ephemeral => {
            warn!(
                path = %path.display(),
                %error,
                "using temporary session key (dev only)"
            );
            Ok(Key::generate())
        }
        Err(source) => Err(SessionConfigError::KeyRead { path, source }),
    }
}

fn read_key_file(path: &Path) -> io::Result<Vec<u8>> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "key path has no file name")
    })?;
    Dir::open_ambient_dir(parent, ambient_authority())?.read(file_name)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use mockable::MockEnv;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    struct KeyFile {
        _dir: TempDir,
        path: String,
    }

    fn key_file(len: usize) -> KeyFile {
        let dir = tempfile::tempdir().expect("temp dir");
        let root = Dir::open_ambient_dir(dir.path(), ambient_authority()).expect("open dir");
        root.write("session_key", vec![b'k'; len]).expect("write key");
        let path = dir.path().join("session_key").to_string_lossy().into_owned();
        KeyFile { _dir: dir, path }
    }

    #[fixture]
    fn long_key() -> KeyFile {
        key_file(SESSION_KEY_MIN_LEN)
    }

    fn mock_env(vars: HashMap<&'static str, String>) -> MockEnv {
        let mut env = MockEnv::new();
        env.expect_string()
            .times(0..)
            .returning(move |key| vars.get(key).cloned());
        env
    }

    fn release_vars(key_path: &str) -> HashMap<&'static str, String> {
        HashMap::from([
            (KEY_FILE_ENV, key_path.to_owned()),
            (COOKIE_SECURE_ENV, "1".to_owned()),
            (SAMESITE_ENV, "Strict".to_owned()),
            (ALLOW_EPHEMERAL_ENV, "0".to_owned()),
        ])
    }

    #[rstest]
    fn release_accepts_explicit_settings(long_key: KeyFile) {
        let env = mock_env(release_vars(&long_key.path));
        let settings =
            session_settings_from_env(&env, BuildMode::Release).expect("valid release settings");
        assert!(settings.cookie_secure);
        assert_eq!(settings.same_site, SameSite::Strict);
    }

    #[rstest]
    #[case(COOKIE_SECURE_ENV)]
    #[case(SAMESITE_ENV)]
    #[case(ALLOW_EPHEMERAL_ENV)]
    fn release_rejects_missing_toggles(long_key: KeyFile, #[case] missing: &'static str) {
        let mut vars = release_vars(&long_key.path);
        vars.remove(missing);
        let Err(err) = session_settings_from_env(&mock_env(vars), BuildMode::Release) else {
            panic!("missing {missing} should fail");
        };
        assert!(matches!(err, SessionConfigError::MissingEnv { name } if name == missing));
    }

    #[rstest]
    #[case("maybe")]
    #[case("")]
    fn release_rejects_invalid_booleans(long_key: KeyFile, #[case] value: &str) {
        let mut vars = release_vars(&long_key.path);
        vars.insert(COOKIE_SECURE_ENV, value.to_owned());
        let Err(err) = session_settings_from_env(&mock_env(vars), BuildMode::Release) else {
            panic!("invalid boolean should fail");
        };
        assert!(matches!(err, SessionConfigError::InvalidEnv { .. }));
    }

    #[rstest]
    fn release_rejects_short_key() {
        let short = key_file(SESSION_KEY_MIN_LEN - 1);
        let env = mock_env(release_vars(&short.path));
        let Err(err) = session_settings_from_env(&env, BuildMode::Release) else {
            panic!("short key should fail");
        };
        assert!(matches!(err, SessionConfigError::KeyTooShort { length: 63, .. }));
    }

    #[rstest]
    fn release_rejects_missing_key_file() {
        let vars = release_vars("/nonexistent/session_key");
        let Err(err) = session_settings_from_env(&mock_env(vars), BuildMode::Release) else {
            panic!("missing key should fail");
        };
        assert!(matches!(err, SessionConfigError::KeyRead { .. }));
    }

    #[rstest]
    fn release_rejects_ephemeral_keys(long_key: KeyFile) {
        let mut vars = release_vars(&long_key.path);
        vars.insert(ALLOW_EPHEMERAL_ENV, "yes".to_owned());
        let Err(err) = session_settings_from_env(&mock_env(vars), BuildMode::Release) else {
            panic!("ephemeral key should fail");
        };
        assert!(matches!(err, SessionConfigError::EphemeralNotAllowed));
    }

    #[rstest]
    fn release_rejects_insecure_same_site_none(long_key: KeyFile) {
        let mut vars = release_vars(&long_key.path);
        vars.insert(COOKIE_SECURE_ENV, "0".to_owned());
        vars.insert(SAMESITE_ENV, "None".to_owned());
        let Err(err) = session_settings_from_env(&mock_env(vars), BuildMode::Release) else {
            panic!("insecure SameSite=None should fail");
        };
        assert!(matches!(err, SessionConfigError::InsecureSameSiteNone));
    }

    #[rstest]
    fn debug_defaults_without_any_environment() {
        let mut vars = HashMap::new();
        vars.insert(KEY_FILE_ENV, "/nonexistent/session_key".to_owned());
        let settings =
            session_settings_from_env(&mock_env(vars), BuildMode::Debug).expect("debug defaults");
        assert!(settings.cookie_secure);
        assert_eq!(settings.same_site, SameSite::Lax);
    }

    #[rstest]
    #[case("TRUE", Some(true))]
    #[case("n", Some(false))]
    #[case("2", None)]
    fn parse_bool_accepts_common_spellings(#[case] raw: &str, #[case] expected: Option<bool>) {
        assert_eq!(parse_bool(raw), expected);
    }
}
