//! Session cookie settings derived from [`ConsoleSettings`].
//!
//! Debug builds tolerate missing toggles and fall back to a generated key
//! with a warning. Release builds require a readable key of sufficient length
//! and a coherent `SameSite` policy.

use std::path::{Path, PathBuf};

use actix_web::cookie::{Key, SameSite};
use tracing::warn;

use crate::settings::ConsoleSettings;

const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/session_key";
const SESSION_KEY_MIN_LEN: usize = 64;
/// `Key::derive_from` panics below this length.
const DERIVE_MIN_LEN: usize = 32;
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// Build mode for session configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    Debug,
    Release,
}

impl BuildMode {
    #[must_use]
    pub const fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    const fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Validated session cookie settings.
pub struct SessionSettings {
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
}

/// Errors raised while validating session configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    #[error("invalid same_site value '{value}'; expected {SAMESITE_EXPECTED}")]
    InvalidSameSite { value: String },
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    #[error("same_site=None requires cookie_secure=true")]
    InsecureSameSiteNone,
    #[error("allow_ephemeral_session must be false in release builds")]
    EphemeralNotAllowed,
}

/// Derive session settings from loaded configuration.
pub fn session_settings(
    settings: &ConsoleSettings,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    if settings.allow_ephemeral_session && !mode.is_debug() {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }
    let cookie_secure = settings.cookie_secure.unwrap_or_else(|| {
        if mode.is_debug() {
            warn!("cookie_secure not set; defaulting to secure");
        }
        true
    });
    let same_site = same_site(settings.same_site.as_deref(), mode, cookie_secure)?;
    let path = settings
        .session_key_file
        .clone()
        .unwrap_or_else(|| PathBuf::from(SESSION_KEY_DEFAULT_PATH));
    let key = session_key(&path, mode, settings.allow_ephemeral_session)?;
    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
    })
}

fn same_site(
    raw: Option<&str>,
    mode: BuildMode,
    cookie_secure: bool,
) -> Result<SameSite, SessionConfigError> {
    let default = if mode.is_debug() {
        SameSite::Lax
    } else {
        SameSite::Strict
    };
    let Some(value) = raw else {
        return Ok(default);
    };
    match value.to_ascii_lowercase().as_str() {
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        "none" if cookie_secure => Ok(SameSite::None),
        "none" if mode.is_debug() => {
            warn!("same_site=None without secure cookies; browsers may reject the cookie");
            Ok(SameSite::None)
        }
        "none" => Err(SessionConfigError::InsecureSameSiteNone),
        _ if mode.is_debug() => {
            warn!(value, "invalid same_site, using default");
            Ok(default)
        }
        _ => Err(SessionConfigError::InvalidSameSite {
            value: value.to_owned(),
        }),
    }
}

fn session_key(
    path: &Path,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Key, SessionConfigError> {
    match std::fs::read(path) {
        Ok(bytes) if !mode.is_debug() && bytes.len() < SESSION_KEY_MIN_LEN => {
            Err(SessionConfigError::KeyTooShort {
                path: path.to_path_buf(),
                length: bytes.len(),
                min_len: SESSION_KEY_MIN_LEN,
            })
        }
        Ok(bytes) if bytes.len() < DERIVE_MIN_LEN => {
            warn!(
                path = %path.display(),
                length = bytes.len(),
                "session key too short to derive from; using temporary key (dev only)"
            );
            Ok(Key::generate())
        }
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(error) if mode.is_debug() || allow_ephemeral => {
            warn!(
                path = %path.display(),
                error = %error,
                "using temporary session key (dev only)"
            );
            Ok(Key::generate())
        }
        Err(source) => Err(SessionConfigError::KeyRead {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
#[path = "session_config_tests.rs"]
mod tests;
