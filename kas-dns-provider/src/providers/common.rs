//! Shared helpers for the client implementations

use std::time::Duration;

use reqwest::Client;

use crate::error::{ProviderError, Result};

// ============ HTTP Client ============

/// Connect timeout (seconds)
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Create an HTTP client with the given request timeout
pub fn create_http_client(provider: &str, request_timeout: Duration) -> Result<Client> {
    Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .timeout(request_timeout)
        .build()
        .map_err(|e| ProviderError::NetworkError {
            provider: provider.to_string(),
            detail: format!("Failed to create HTTP client: {e}"),
        })
}

// ============ Domain names ============

/// Strip the trailing dot of a domain name
pub fn normalize_domain_name(name: &str) -> String {
    name.trim_end_matches('.').to_string()
}
