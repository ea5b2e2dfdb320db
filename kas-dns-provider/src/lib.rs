//! # kas-dns-provider
//!
//! Wire layer for managing DNS records through the All-Inkl KAS control-panel API.
//!
//! ## Clients
//!
//! | Client | Feature Flag | Transport | Auth Method |
//! |--------|-------------|-----------|-------------|
//! | [`KasClient`] | `kas` | SOAP 1.1 over HTTPS | `kas_auth_type = "plain"` login/password |
//! | [`HubClient`] | `hub` | JSON-RPC `tools/call` | Bearer token |
//!
//! Both implement [`ApiClient`], so callers never see which transport runs an action.
//!
//! ## Feature Flags
//!
//! - **`all-clients`** *(default)* — Enable both clients.
//! - **`kas`** — Direct SOAP client only.
//! - **`hub`** — Automation-hub relay only.
//! - **`native-tls`** *(default)* / **`rustls`** — TLS backend for `reqwest`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use kas_dns_provider::{ApiClient, Credential, DnsRecordSpec, KasClient, RecordType};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = KasClient::new(Credential::new("w0123456", "password"))?;
//!
//!     // 1. Live record list
//!     for record in client.list_records("example.com").await? {
//!         println!("{} {} {} -> {}", record.id, record.name, record.record_type, record.value);
//!     }
//!
//!     // 2. Add a record; "already exists" counts as success
//!     let spec = DnsRecordSpec::new("www", RecordType::Cname, "target.example.net.");
//!     let outcome = client.add_record("example.com", &spec).await?;
//!     assert!(outcome.is_success());
//!     Ok(())
//! }
//! ```
//!
//! ## Replies and Errors
//!
//! A call that reaches the API yields an [`Outcome`]: `Success`, `AlreadyExists`,
//! `Fault(message)` or `Unrecognized(snippet)`. See [`interpret`] for the matching rules.
//!
//! A call that never got a reply yields a [`ProviderError`]; [`ProviderError::is_transport`]
//! tells network, timeout and HTTP-status failures apart from local errors. Nothing retries.

mod error;
mod factory;
mod http_client;
pub mod interpret;
mod providers;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ProviderError, Result};

// Re-export factory
pub use factory::{ClientConfig, create_client};

// Re-export the client trait and request builders (internal traits are not exported)
pub use traits::{ApiClient, add_record_params, delete_record_params, zone_host};

// Re-export types
pub use types::{
    ACTION_ADD_DNS_SETTINGS, ACTION_DELETE_DNS_SETTINGS, ACTION_GET_DNS_SETTINGS, ActionParams,
    Credential, DnsRecordSpec, DnsRecordState, Outcome, RecordType, UnknownRecordType,
};

// Re-export log helpers
pub use utils::log_sanitizer;

// Re-export concrete clients (behind feature flags)
#[cfg(feature = "kas")]
pub use providers::{DEFAULT_KAS_ENDPOINT, DEFAULT_NAMESERVER, KasClient, KasClientBuilder};

#[cfg(feature = "hub")]
pub use providers::{DEFAULT_ADD_RECORD_TOOL, DEFAULT_HUB_ENDPOINT, HubClient, HubClientBuilder};
