//! Automation-hub relay client
//!
//! Routes KAS actions through the hub's JSON-RPC `tools/call` method. The hub holds
//! the KAS login itself; this client only needs the hub's bearer token.

mod error;
mod http;
mod provider;
mod types;

use std::collections::HashMap;
use std::sync::atomic::AtomicU64;
use std::time::Duration;

use reqwest::Client;

use crate::error::Result;
use crate::providers::common::create_http_client;
use crate::types::ACTION_ADD_DNS_SETTINGS;

pub(crate) use types::{
    JsonRpcRequest, error_message, first_content_text, interpret_reply, tool_payload,
};

/// Production hub endpoint.
pub const DEFAULT_HUB_ENDPOINT: &str = "https://mcp-hub-lemon.vercel.app/mcp";
/// Hub tool that performs `add_dns_settings`.
pub const DEFAULT_ADD_RECORD_TOOL: &str = "allinkl.add_dns_record";
/// Request timeout (seconds)
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// JSON-RPC client for the automation hub.
///
/// Each KAS action is mapped to a hub tool name. Actions without a mapped tool fail
/// with [`ProviderError::UnsupportedAction`](crate::ProviderError::UnsupportedAction).
pub struct HubClient {
    pub(crate) client: Client,
    pub(crate) endpoint: String,
    pub(crate) token: String,
    pub(crate) tools: HashMap<String, String>,
    pub(crate) next_id: AtomicU64,
}

/// Builder for [`HubClient`].
pub struct HubClientBuilder {
    token: String,
    endpoint: String,
    timeout: Duration,
    tools: HashMap<String, String>,
}

impl HubClientBuilder {
    fn new(token: String) -> Self {
        let tools = HashMap::from([(
            ACTION_ADD_DNS_SETTINGS.to_string(),
            DEFAULT_ADD_RECORD_TOOL.to_string(),
        )]);
        Self {
            token,
            endpoint: DEFAULT_HUB_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            tools,
        }
    }

    /// Override the hub endpoint (default: [`DEFAULT_HUB_ENDPOINT`]).
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the request timeout (default: 30s).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Map a KAS action to a hub tool, replacing any earlier mapping.
    pub fn tool(mut self, action: impl Into<String>, tool_name: impl Into<String>) -> Self {
        self.tools.insert(action.into(), tool_name.into());
        self
    }

    /// Build the [`HubClient`] instance.
    pub fn build(self) -> Result<HubClient> {
        Ok(HubClient {
            client: create_http_client("hub", self.timeout)?,
            endpoint: self.endpoint,
            token: self.token,
            tools: self.tools,
            next_id: AtomicU64::new(1),
        })
    }
}

impl HubClient {
    /// Creates a client against the production hub with the default tool table.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::builder(token).build()
    }

    /// Returns a builder for customizing the client.
    pub fn builder(token: impl Into<String>) -> HubClientBuilder {
        HubClientBuilder::new(token.into())
    }
}
