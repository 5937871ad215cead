//! Shared reqwest client for the hosted backend.
//!
//! This type owns transport details only: base URL joining, API key
//! headers, timeouts and status classification. Port-specific adapters turn
//! [`HttpFailure`] into their own error enums.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap};
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use tracing::warn;

/// Connection settings for the hosted backend.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://abc.supabase.co/`.
    pub base_url: Url,
    /// Public anon key sent as `apikey`.
    pub anon_key: String,
    /// Service-role key for admin calls; admin operations fail without it.
    pub service_key: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

/// Transport or status failure of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpFailure {
    /// The request never produced a response.
    Transport { message: String, timed_out: bool },
    /// The server answered with a non-success status.
    Status { status: StatusCode, message: String },
    /// The request could not be built.
    Invalid { message: String },
}

impl HttpFailure {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    /// Whether retrying later could succeed.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        match self {
            Self::Transport { .. } => true,
            Self::Status { status, .. } => {
                status.is_server_error()
                    || matches!(
                        *status,
                        StatusCode::REQUEST_TIMEOUT | StatusCode::TOO_MANY_REQUESTS
                    )
            }
            Self::Invalid { .. } => false,
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Transport { message, .. }
            | Self::Status { message, .. }
            | Self::Invalid { message } => message,
        }
    }
}

/// Status, headers and body of a successful response.
#[derive(Debug)]
pub struct RawResponse {
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// Reqwest client bound to one project.
#[derive(Clone)]
pub struct SupabaseClient {
    http: Client,
    base_url: Url,
    anon_key: String,
    service_key: Option<String>,
}

impl SupabaseClient {
    /// Build a client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(config: &SupabaseConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            anon_key: config.anon_key.clone(),
            service_key: config.service_key.clone(),
        })
    }

    pub fn endpoint(&self, path: &str) -> Result<Url, HttpFailure> {
        self.base_url
            .join(path)
            .map_err(|error| HttpFailure::invalid(format!("invalid endpoint {path}: {error}")))
    }

    /// Request authorised with the service key when present, else the anon key.
    pub fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let key = self.service_key.as_deref().unwrap_or(&self.anon_key);
        self.http
            .request(method, url)
            .header("apikey", key)
            .header(AUTHORIZATION, format!("Bearer {key}"))
    }

    /// Request authorised with the anon key only.
    pub fn public_request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", self.anon_key.as_str())
            .header(AUTHORIZATION, format!("Bearer {}", self.anon_key))
    }

    /// Request requiring the service key.
    pub fn admin_request(&self, method: Method, url: Url) -> Result<RequestBuilder, HttpFailure> {
        let key = self
            .service_key
            .as_deref()
            .ok_or_else(|| HttpFailure::invalid("service key is not configured"))?;
        Ok(self
            .http
            .request(method, url)
            .header("apikey", key)
            .header(AUTHORIZATION, format!("Bearer {key}")))
    }

    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }
}

/// Send `builder` and classify the outcome.
pub async fn execute(builder: RequestBuilder) -> Result<RawResponse, HttpFailure> {
    let response = builder.send().await.map_err(map_transport_error)?;
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.bytes().await.map_err(map_transport_error)?.to_vec();
    if !status.is_success() {
        let failure = map_status_error(status, &body);
        warn!(status = status.as_u16(), error = %failure.message(), "hosted backend call failed");
        return Err(failure);
    }
    Ok(RawResponse { headers, body })
}

fn map_transport_error(error: reqwest::Error) -> HttpFailure {
    HttpFailure::Transport {
        timed_out: error.is_timeout(),
        message: error.to_string(),
    }
}

pub fn map_status_error(status: StatusCode, body: &[u8]) -> HttpFailure {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };
    HttpFailure::Status { status, message }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
