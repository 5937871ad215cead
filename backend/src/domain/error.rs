//! Console error payload shared by every use-case.
//!
//! The payload is transport agnostic: the HTTP adapter picks a status code
//! from [`ErrorCode`] and serialises the rest as JSON. Validation failures
//! carry `{ "field", "code" }` details, unreachable collections carry
//! `{ "collection" }`.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::TraceId;

macro_rules! error_codes {
    ($(
        $(#[$meta:meta])*
        $variant:ident => $ctor:ident, $fallback:literal;
    )*) => {
        /// Stable machine-readable failure category.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[non_exhaustive]
        #[serde(rename_all = "snake_case")]
        pub enum ErrorCode {
            $($(#[$meta])* $variant,)*
        }

        impl ErrorCode {
            /// Wording used when a caller supplies a blank message.
            #[must_use]
            pub const fn fallback_message(self) -> &'static str {
                match self {
                    $(Self::$variant => $fallback,)*
                }
            }
        }

        impl Error {
            $(
                #[doc = concat!("Shorthand for [`ErrorCode::", stringify!($variant), "`].")]
                pub fn $ctor(message: impl Into<String>) -> Self {
                    Self::new(ErrorCode::$variant, message)
                }
            )*
        }
    };
}

error_codes! {
    /// Malformed input or a failed form rule.
    InvalidRequest => invalid_request, "invalid request";
    /// No signed-in session.
    Unauthorized => unauthorized, "authentication required";
    /// Signed in, but the role or structure scope does not allow it.
    Forbidden => forbidden, "forbidden";
    /// Missing, or outside the caller's structure.
    NotFound => not_found, "not found";
    /// Duplicate account or exhausted staff quota.
    Conflict => conflict, "conflict";
    /// The record store, storage or auth service is unreachable.
    ServiceUnavailable => service_unavailable, "service unavailable";
    /// Anything else. Redacted before reaching clients.
    InternalError => internal, "internal error";
}

impl ErrorCode {
    /// Whether the failure is on the console's side rather than the caller's.
    #[must_use]
    pub const fn is_server_side(self) -> bool {
        matches!(self, Self::ServiceUnavailable | Self::InternalError)
    }
}

/// Error payload returned by use-cases.
///
/// The message is never blank and a present trace id is never blank; both
/// hold for values built here and for values deserialised from JSON.
///
/// # Examples
/// ```
/// use gensys_console::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("jeune introuvable");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireError", into = "WireError")]
pub struct Error {
    code: ErrorCode,
    message: String,
    trace_id: Option<String>,
    details: Option<Value>,
}

/// Rejections raised by the checked constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorValidationError {
    #[error("error message must not be empty")]
    EmptyMessage,
    #[error("trace identifier must not be empty")]
    EmptyTraceId,
}

impl Error {
    /// Build an error, capturing the request's trace id when one is in scope.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let mut message = message.into();
        if message.trim().is_empty() {
            code.fallback_message().clone_into(&mut message);
        }
        Self {
            code,
            message,
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    /// Like [`Error::new`] but refuses blank messages.
    pub fn try_new(
        code: ErrorCode,
        message: impl Into<String>,
    ) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            Err(ErrorValidationError::EmptyMessage)
        } else {
            Ok(Self::new(code, message))
        }
    }

    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    #[must_use]
    pub const fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach a trace id; blank ids leave the error untouched.
    #[must_use]
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        if !id.trim().is_empty() {
            self.trace_id = Some(id);
        }
        self
    }

    /// Attach a trace id, rejecting blank ids.
    pub fn try_with_trace_id(self, id: impl Into<String>) -> Result<Self, ErrorValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ErrorValidationError::EmptyTraceId);
        }
        Ok(self.with_trace_id(id))
    }

    /// Attach structured details.
    ///
    /// ```
    /// use gensys_console::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::invalid_request("nom trop court")
    ///     .with_details(json!({ "field": "nom", "code": "too_short" }));
    /// assert!(err.details().is_some());
    /// ```
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}

/// JSON shape of [`Error`].
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireError {
    code: ErrorCode,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "trace_id")]
    trace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl From<Error> for WireError {
    fn from(Error { code, message, trace_id, details }: Error) -> Self {
        Self {
            code,
            message,
            trace_id,
            details,
        }
    }
}

impl TryFrom<WireError> for Error {
    type Error = ErrorValidationError;

    fn try_from(wire: WireError) -> Result<Self, Self::Error> {
        if wire.message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        if wire.trace_id.as_deref().is_some_and(|id| id.trim().is_empty()) {
            return Err(ErrorValidationError::EmptyTraceId);
        }
        Ok(Self {
            code: wire.code,
            message: wire.message,
            trace_id: wire.trace_id,
            details: wire.details,
        })
    }
}

#[cfg(test)]
mod tests;
