//! HTTP server configuration assembled from [`ConsoleSettings`].

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use url::Url;

use gensys_console::inbound::http::session_config::SessionSettings;
use gensys_console::outbound::supabase::SupabaseConfig;
use gensys_console::settings::{ConsoleSettings, SettingsError};

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

/// Credentials for the super-admin seeded into the demo store.
#[derive(Clone)]
pub struct DemoAdmin {
    pub email: String,
    pub password: String,
}

/// Record backend the server wires its adapters against.
#[derive(Clone)]
pub enum BackendConfig {
    Supabase {
        config: SupabaseConfig,
        storage_bucket: String,
    },
    Demo(DemoAdmin),
}

impl BackendConfig {
    /// Short name used in logs and metric labels.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Supabase { .. } => "supabase",
            Self::Demo(_) => "demo",
        }
    }
}

/// Everything `create_server` needs.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) invite_base_url: Url,
    pub(crate) backend: BackendConfig,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Combine loaded settings with validated session settings.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when an address or URL does not parse, or
    /// when the hosted backend is half configured.
    pub fn from_settings(
        settings: &ConsoleSettings,
        session: SessionSettings,
    ) -> Result<Self, SettingsError> {
        let backend = match settings.supabase()? {
            Some(config) => BackendConfig::Supabase {
                config,
                storage_bucket: settings.storage_bucket().to_owned(),
            },
            None => BackendConfig::Demo(DemoAdmin {
                email: settings.demo_admin_email().to_owned(),
                password: settings.demo_admin_password().to_owned(),
            }),
        };
        Ok(Self {
            key: session.key,
            cookie_secure: session.cookie_secure,
            same_site: session.same_site,
            bind_addr: settings.bind_addr()?,
            invite_base_url: settings.invite_base_url()?,
            backend,
            #[cfg(feature = "metrics")]
            prometheus: None,
        })
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    #[must_use]
    pub const fn backend(&self) -> &BackendConfig {
        &self.backend
    }

    #[cfg(feature = "metrics")]
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}
