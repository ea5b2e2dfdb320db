//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use kas_dns_provider::ProviderError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// No credential source produced a complete login/secret pair
    #[error("No credentials found (tried: {})", .attempted.join(", "))]
    CredentialsUnavailable { attempted: Vec<String> },

    /// A single credential source failed while being read
    #[error("Credential source '{source_name}' failed: {detail}")]
    CredentialSource { source_name: String, detail: String },

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system error
    #[error("I/O error: {0}")]
    Io(String),

    /// Provider error (converting from library)
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl CoreError {
    /// Whether it is expected behavior (missing setup, remote rejection), used for log levels.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::CredentialsUnavailable { .. }
            | Self::CredentialSource { .. }
            | Self::Config(_) => true,
            Self::Provider(e) => e.is_expected(),
            Self::Io(_) => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
