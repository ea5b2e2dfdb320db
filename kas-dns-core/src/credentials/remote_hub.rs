//! Credential tool on the automation hub

use std::sync::Arc;

use async_trait::async_trait;
use kas_dns_provider::{ActionParams, HubClient};
use serde_json::Value;

use crate::error::{CoreError, CoreResult};
use crate::traits::{CredentialCandidate, CredentialSource};

/// Variable holding the hub bearer token.
pub const DEFAULT_HUB_TOKEN_VAR: &str = "MCP_HUB_TOKEN";

/// Asks a hub tool for the KAS login.
///
/// The tool answers with `login`/`password` or `account_id`/`secret`.
pub struct RemoteHubSource {
    client: Arc<HubClient>,
    tool: String,
}

impl RemoteHubSource {
    pub fn new(client: Arc<HubClient>, tool: impl Into<String>) -> Self {
        Self {
            client,
            tool: tool.into(),
        }
    }
}

fn string_field(payload: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| payload.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

pub(crate) fn candidate_from_payload(payload: &Value) -> CredentialCandidate {
    CredentialCandidate::new(
        string_field(payload, &["login", "account_id"]),
        string_field(payload, &["password", "secret"]),
    )
}

#[async_trait]
impl CredentialSource for RemoteHubSource {
    fn name(&self) -> &str {
        "hub credential tool"
    }

    async fn fetch(&self) -> CoreResult<Option<CredentialCandidate>> {
        let payload = self
            .client
            .call_tool(&self.tool, &ActionParams::new())
            .await
            .map_err(|e| CoreError::CredentialSource {
                source_name: self.name().to_string(),
                detail: e.to_string(),
            })?;

        let candidate = candidate_from_payload(&payload);
        Ok((!candidate.is_empty()).then_some(candidate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn source(server: &MockServer) -> RemoteHubSource {
        let client = HubClient::builder("hub-token")
            .endpoint(server.uri())
            .build()
            .unwrap();
        RemoteHubSource::new(Arc::new(client), "allinkl.get_credentials")
    }

    #[test]
    fn payload_key_variants() {
        let a = candidate_from_payload(&json!({ "login": "w0123456", "password": "pw" }));
        let b = candidate_from_payload(&json!({ "account_id": "w0123456", "secret": "pw" }));
        assert_eq!(a, b);
        assert!(a.complete().is_some());
    }

    #[tokio::test]
    async fn reads_login_from_tool_result() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("authorization", "Bearer hub-token"))
            .and(body_partial_json(json!({
                "method": "tools/call",
                "params": { "name": "allinkl.get_credentials" }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "result": { "structuredContent": { "login": "w0123456", "password": "pw" } }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let cred = source(&server).fetch().await.unwrap().unwrap().complete().unwrap();
        assert_eq!(cred.account_id, "w0123456");
        assert_eq!(cred.secret, "pw");
    }

    #[tokio::test]
    async fn tool_error_is_source_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "error": { "code": -32601, "message": "unknown tool" }
            })))
            .mount(&server)
            .await;

        let err = source(&server).fetch().await.unwrap_err();
        assert!(err.to_string().contains("unknown tool"), "{err}");
    }
}
