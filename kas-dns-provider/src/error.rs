use serde::{Deserialize, Serialize};

/// Unified error type for all API client operations.
///
/// Each variant includes a `provider` field identifying which client produced the error,
/// plus variant-specific context. All variants are serializable for structured error reporting.
///
/// # Transport Errors
///
/// The following variants mean the request never produced an interpretable reply:
/// - [`NetworkError`](Self::NetworkError) — network connectivity issues
/// - [`Timeout`](Self::Timeout) — request timed out
/// - [`RateLimited`](Self::RateLimited) — HTTP 429
/// - [`HttpStatus`](Self::HttpStatus) — any other non-success status without a fault body
///
/// Nothing in this crate retries them; the caller records the failure and moves on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    NetworkError {
        /// Client that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Client that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The endpoint answered HTTP 429.
    RateLimited {
        /// Client that produced the error.
        provider: String,
        /// `Retry-After` in seconds, if sent.
        retry_after: Option<u64>,
        /// Response body, if any.
        raw_message: Option<String>,
    },

    /// The endpoint answered with a non-success HTTP status and no fault body.
    HttpStatus {
        /// Client that produced the error.
        provider: String,
        /// HTTP status code.
        status: u16,
        /// Truncated response body.
        body: String,
    },

    /// The remote action was rejected with a fault message.
    ///
    /// Only raised by operations that need a structured reply (record listing);
    /// add/delete calls report faults as [`Outcome::Fault`](crate::Outcome::Fault).
    Fault {
        /// Client that produced the error.
        provider: String,
        /// Remote action name.
        action: String,
        /// Fault message as sent by the provider.
        message: String,
    },

    /// The client has no way to perform the requested action.
    UnsupportedAction {
        /// Client that produced the error.
        provider: String,
        /// Remote action name.
        action: String,
    },

    /// A request parameter is invalid.
    InvalidParameter {
        /// Client that produced the error.
        provider: String,
        /// Name of the invalid parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// Failed to parse the reply.
    ParseError {
        /// Client that produced the error.
        provider: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request body.
    SerializationError {
        /// Client that produced the error.
        provider: String,
        /// Details about the serialization failure.
        detail: String,
    },
}

impl ProviderError {
    /// Whether the failure happened below the API layer (network, timeout, HTTP status).
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. }
                | Self::Timeout { .. }
                | Self::RateLimited { .. }
                | Self::HttpStatus { .. }
        )
    }

    /// Whether this is expected behavior (remote rejection, bad input), used for log levels.
    ///
    /// `true` should be logged at `warn`, `false` at `error`.
    /// **Keep this in sync when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::Fault { .. } | Self::UnsupportedAction { .. } | Self::InvalidParameter { .. }
        )
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { provider, detail } => {
                write!(f, "[{provider}] Network error: {detail}")
            }
            Self::Timeout { provider, detail } => {
                write!(f, "[{provider}] Request timeout: {detail}")
            }
            Self::RateLimited {
                provider,
                retry_after,
                ..
            } => {
                if let Some(secs) = retry_after {
                    write!(f, "[{provider}] Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "[{provider}] Rate limited")
                }
            }
            Self::HttpStatus {
                provider,
                status,
                body,
            } => {
                if body.is_empty() {
                    write!(f, "[{provider}] HTTP {status}")
                } else {
                    write!(f, "[{provider}] HTTP {status}: {body}")
                }
            }
            Self::Fault {
                provider,
                action,
                message,
            } => {
                write!(f, "[{provider}] {action} rejected: {message}")
            }
            Self::UnsupportedAction { provider, action } => {
                write!(f, "[{provider}] Unsupported action: {action}")
            }
            Self::InvalidParameter {
                provider,
                param,
                detail,
            } => {
                write!(f, "[{provider}] Invalid parameter '{param}': {detail}")
            }
            Self::ParseError { provider, detail } => {
                write!(f, "[{provider}] Parse error: {detail}")
            }
            Self::SerializationError { provider, detail } => {
                write!(f, "[{provider}] Serialization error: {detail}")
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;
