//! API client implementations

/// Shared utilities used by client implementations.
pub mod common;

#[cfg(feature = "hub")]
mod hub;
#[cfg(feature = "kas")]
mod kas;

#[cfg(feature = "hub")]
pub use hub::{DEFAULT_ADD_RECORD_TOOL, DEFAULT_HUB_ENDPOINT, HubClient, HubClientBuilder};
#[cfg(feature = "kas")]
pub use kas::{DEFAULT_KAS_ENDPOINT, DEFAULT_NAMESERVER, KasClient, KasClientBuilder};
