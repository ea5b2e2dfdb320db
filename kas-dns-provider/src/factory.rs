//! Client factory.

#[cfg(feature = "hub")]
use std::collections::HashMap;
use std::sync::Arc;
#[cfg(any(feature = "kas", feature = "hub"))]
use std::time::Duration;

use crate::error::Result;
use crate::traits::ApiClient;
#[cfg(feature = "kas")]
use crate::types::Credential;

#[cfg(feature = "hub")]
use crate::providers::HubClient;
#[cfg(feature = "kas")]
use crate::providers::KasClient;

/// Everything needed to build one [`ApiClient`].
#[derive(Debug, Clone)]
pub enum ClientConfig {
    /// Direct SOAP access. Requires feature `kas`.
    #[cfg(feature = "kas")]
    Kas {
        /// KAS login and password.
        credential: Credential,
        /// SOAP endpoint.
        endpoint: String,
        /// Name server sent with `get_dns_settings`.
        nameserver: String,
        /// Request timeout.
        timeout: Duration,
    },

    /// Relay through the automation hub. Requires feature `hub`.
    #[cfg(feature = "hub")]
    Hub {
        /// Hub bearer token.
        token: String,
        /// JSON-RPC endpoint.
        endpoint: String,
        /// Request timeout.
        timeout: Duration,
        /// KAS action → hub tool name; merged over the default table.
        tools: HashMap<String, String>,
    },
}

/// Creates an [`ApiClient`] from the given configuration.
///
/// # Examples
///
/// ```rust,no_run
/// use std::time::Duration;
/// use kas_dns_provider::{ClientConfig, Credential, create_client};
///
/// let client = create_client(ClientConfig::Kas {
///     credential: Credential::new("w0123456", "password"),
///     endpoint: kas_dns_provider::DEFAULT_KAS_ENDPOINT.to_string(),
///     nameserver: kas_dns_provider::DEFAULT_NAMESERVER.to_string(),
///     timeout: Duration::from_secs(60),
/// })?;
/// # Ok::<(), kas_dns_provider::ProviderError>(())
/// ```
pub fn create_client(config: ClientConfig) -> Result<Arc<dyn ApiClient>> {
    match config {
        #[cfg(feature = "kas")]
        ClientConfig::Kas {
            credential,
            endpoint,
            nameserver,
            timeout,
        } => Ok(Arc::new(
            KasClient::builder(credential)
                .endpoint(endpoint)
                .nameserver(nameserver)
                .timeout(timeout)
                .build()?,
        )),
        #[cfg(feature = "hub")]
        ClientConfig::Hub {
            token,
            endpoint,
            timeout,
            tools,
        } => {
            let builder = tools.into_iter().fold(
                HubClient::builder(token).endpoint(endpoint).timeout(timeout),
                |builder, (action, tool)| builder.tool(action, tool),
            );
            Ok(Arc::new(builder.build()?))
        }
    }
}
