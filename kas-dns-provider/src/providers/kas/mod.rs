//! All-Inkl KAS SOAP client

mod error;
mod http;
mod provider;
mod records;
mod soap;

use std::time::Duration;

use reqwest::Client;

use crate::error::Result;
use crate::providers::common::create_http_client;
use crate::types::Credential;

pub(crate) use records::parse_records;
pub(crate) use soap::build_envelope;

/// Production SOAP endpoint.
pub const DEFAULT_KAS_ENDPOINT: &str = "https://kasapi.kasserver.com/soap/KasApi.php";
/// Name server passed to `get_dns_settings`.
pub const DEFAULT_NAMESERVER: &str = "ns5.kasserver.com";
/// `SOAPAction` header value.
pub(crate) const SOAP_ACTION: &str = "https://kasserver.com/#KasApi";
/// `Content-Type` header value.
pub(crate) const SOAP_CONTENT_TYPE: &str = "text/xml; charset=utf-8";
/// Request timeout (seconds)
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// KAS SOAP API client.
///
/// Authenticates every request with `kas_auth_type = "plain"`.
///
/// # Construction
///
/// ```rust,no_run
/// use kas_dns_provider::{Credential, KasClient};
///
/// let client = KasClient::new(Credential::new("w0123456", "password"))?;
/// # Ok::<(), kas_dns_provider::ProviderError>(())
/// ```
pub struct KasClient {
    pub(crate) client: Client,
    pub(crate) endpoint: String,
    pub(crate) nameserver: String,
    pub(crate) credential: Credential,
}

/// Builder for [`KasClient`].
pub struct KasClientBuilder {
    credential: Credential,
    endpoint: String,
    nameserver: String,
    timeout: Duration,
}

impl KasClientBuilder {
    fn new(credential: Credential) -> Self {
        Self {
            credential,
            endpoint: DEFAULT_KAS_ENDPOINT.to_string(),
            nameserver: DEFAULT_NAMESERVER.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Override the SOAP endpoint (default: [`DEFAULT_KAS_ENDPOINT`]).
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Override the name server sent with `get_dns_settings` (default: [`DEFAULT_NAMESERVER`]).
    pub fn nameserver(mut self, nameserver: impl Into<String>) -> Self {
        self.nameserver = nameserver.into();
        self
    }

    /// Set the request timeout (default: 60s).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the [`KasClient`] instance.
    pub fn build(self) -> Result<KasClient> {
        Ok(KasClient {
            client: create_http_client("kas", self.timeout)?,
            endpoint: self.endpoint,
            nameserver: self.nameserver,
            credential: self.credential,
        })
    }
}

impl KasClient {
    /// Creates a client against the production endpoint.
    pub fn new(credential: Credential) -> Result<Self> {
        Self::builder(credential).build()
    }

    /// Returns a builder for customizing the client.
    pub fn builder(credential: Credential) -> KasClientBuilder {
        KasClientBuilder::new(credential)
    }
}
