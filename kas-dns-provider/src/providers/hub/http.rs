//! Hub HTTP request methods

use std::sync::atomic::Ordering;

use serde_json::Value;

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::traits::ProviderErrorMapper;
use crate::types::ActionParams;

use super::{HubClient, JsonRpcRequest, error_message, first_content_text, tool_payload};

impl HubClient {
    /// POST one `tools/call` request; returns status and body.
    pub(crate) async fn post_tool_call(
        &self,
        tool: &str,
        arguments: &ActionParams,
    ) -> Result<(u16, String)> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let payload = JsonRpcRequest::tool_call(id, tool, arguments);

        let request = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&payload);

        HttpUtils::execute_request(
            request,
            self.provider_name(),
            "POST",
            &format!("{} (Tool: {tool})", self.endpoint),
        )
        .await
    }

    /// Call a hub tool and return the tool's answer.
    ///
    /// A JSON-RPC error or a result flagged `isError` becomes
    /// [`ProviderError::Fault`](crate::ProviderError::Fault).
    pub async fn call_tool(&self, tool: &str, arguments: &ActionParams) -> Result<Value> {
        let (status, body) = self.post_tool_call(tool, arguments).await?;

        let value: Value = match HttpUtils::parse_json(&body, self.provider_name()) {
            Ok(value) => value,
            Err(_) if status >= 400 => {
                return Err(HttpUtils::status_error(self.provider_name(), status, &body));
            }
            Err(e) => return Err(e),
        };

        if let Some(error) = value.get("error").filter(|e| !e.is_null()) {
            let message = error_message(error);
            log::warn!("[hub] {tool} error: {message}");
            return Err(self.fault_error(tool, message));
        }

        if status >= 400 {
            return Err(HttpUtils::status_error(self.provider_name(), status, &body));
        }

        let result = value
            .get("result")
            .ok_or_else(|| self.parse_error("reply has no result member"))?;

        if result.get("isError").and_then(Value::as_bool) == Some(true) {
            let message = first_content_text(result)
                .unwrap_or("tool reported an error")
                .to_string();
            return Err(self.fault_error(tool, message));
        }

        Ok(tool_payload(result))
    }
}
