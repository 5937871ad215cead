//! Console configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `GENSYS_*` environment variables or a config
//! file. Accessors apply defaults and turn raw strings into typed values.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::outbound::supabase::SupabaseConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_STORAGE_BUCKET: &str = "logos";
const DEFAULT_INVITE_BASE_URL: &str = "https://app.gensys.fr";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
const DEFAULT_DEMO_ADMIN_EMAIL: &str = "admin@gensys.local";
const DEFAULT_DEMO_ADMIN_PASSWORD: &str = "gensys-demo";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("invalid URL for {field} '{value}': {source}")]
    Url {
        field: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("GENSYS_SUPABASE_ANON_KEY is required when GENSYS_SUPABASE_URL is set")]
    MissingAnonKey,
}

/// Runtime configuration for the console backend.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "GENSYS")]
pub struct ConsoleSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Hosted backend project URL. Demo mode runs when unset.
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
    /// Service-role key used for staff metadata updates and deletion.
    pub supabase_service_key: Option<String>,
    pub storage_bucket: Option<String>,
    /// Public console URL used to build invitation links.
    pub invite_base_url: Option<String>,
    pub http_timeout_secs: Option<u64>,
    /// File holding the cookie signing key.
    pub session_key_file: Option<PathBuf>,
    pub cookie_secure: Option<bool>,
    /// `Strict`, `Lax` or `None`.
    pub same_site: Option<String>,
    /// Permit a generated session key when the key file is unreadable.
    #[ortho_config(default = false)]
    pub allow_ephemeral_session: bool,
    pub demo_admin_email: Option<String>,
    pub demo_admin_password: Option<String>,
}

impl ConsoleSettings {
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    pub fn storage_bucket(&self) -> &str {
        self.storage_bucket.as_deref().unwrap_or(DEFAULT_STORAGE_BUCKET)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs.unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS))
    }

    pub fn invite_base_url(&self) -> Result<Url, SettingsError> {
        parse_url(
            "invite_base_url",
            self.invite_base_url.as_deref().unwrap_or(DEFAULT_INVITE_BASE_URL),
        )
    }

    /// Hosted backend connection, or `None` for demo mode.
    pub fn supabase(&self) -> Result<Option<SupabaseConfig>, SettingsError> {
        let Some(raw) = self.supabase_url.as_deref() else {
            return Ok(None);
        };
        let anon_key = self
            .supabase_anon_key
            .clone()
            .ok_or(SettingsError::MissingAnonKey)?;
        Ok(Some(SupabaseConfig {
            base_url: parse_url("supabase_url", raw)?,
            anon_key,
            service_key: self.supabase_service_key.clone(),
            timeout: self.http_timeout(),
        }))
    }

    pub fn demo_admin_email(&self) -> &str {
        self.demo_admin_email
            .as_deref()
            .unwrap_or(DEFAULT_DEMO_ADMIN_EMAIL)
    }

    pub fn demo_admin_password(&self) -> &str {
        self.demo_admin_password
            .as_deref()
            .unwrap_or(DEFAULT_DEMO_ADMIN_PASSWORD)
    }
}

fn parse_url(field: &'static str, value: &str) -> Result<Url, SettingsError> {
    Url::parse(value).map_err(|source| SettingsError::Url {
        field,
        value: value.to_owned(),
        source,
    })
}
