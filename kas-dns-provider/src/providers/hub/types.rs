//! Hub JSON-RPC types

use serde::Serialize;
use serde_json::Value;

use crate::interpret::{SNIPPET_LIMIT, classify_fault};
use crate::types::{ActionParams, Outcome};
use crate::utils::log_sanitizer::snippet;

/// `tools/call` request envelope
#[derive(Debug, Serialize)]
pub struct JsonRpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'static str,
    pub params: ToolCallParams<'a>,
}

#[derive(Debug, Serialize)]
pub struct ToolCallParams<'a> {
    pub name: &'a str,
    pub arguments: &'a ActionParams,
}

impl<'a> JsonRpcRequest<'a> {
    pub fn tool_call(id: u64, name: &'a str, arguments: &'a ActionParams) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method: "tools/call",
            params: ToolCallParams { name, arguments },
        }
    }
}

/// Message of a JSON-RPC `error` member; the whole member when it has no `message`.
pub(crate) fn error_message(error: &Value) -> String {
    error
        .get("message")
        .and_then(Value::as_str)
        .map_or_else(|| error.to_string(), str::to_string)
}

/// Text of the first `content` entry of a tool result.
pub(crate) fn first_content_text(result: &Value) -> Option<&str> {
    result
        .get("content")?
        .as_array()?
        .iter()
        .find_map(|c| c.get("text").and_then(Value::as_str))
}

/// The tool's own answer inside a `tools/call` result.
///
/// Prefers `structuredContent`, then a JSON document in the first text content,
/// then the result object itself.
pub(crate) fn tool_payload(result: &Value) -> Value {
    if let Some(structured) = result.get("structuredContent")
        && structured.is_object()
    {
        return structured.clone();
    }
    if let Some(parsed) = first_content_text(result)
        .and_then(|text| serde_json::from_str::<Value>(text).ok())
        .filter(|v| v.is_object() || v.is_array())
    {
        return parsed;
    }
    result.clone()
}

fn reports_success(value: &Value) -> bool {
    value.get("success").and_then(Value::as_bool) == Some(true)
}

/// Classifies a hub reply body.
///
/// `error.message` is a fault (downgraded for "already exists"); a result whose
/// `success` flag is `true` is a success; every other shape is unrecognized.
pub(crate) fn interpret_reply(body: &str) -> Outcome {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return Outcome::Unrecognized(snippet(body, SNIPPET_LIMIT));
    };

    if let Some(error) = value.get("error").filter(|e| !e.is_null()) {
        return classify_fault(error_message(error));
    }

    if let Some(result) = value.get("result").filter(|r| r.is_object()) {
        if result.get("isError").and_then(Value::as_bool) == Some(true) {
            let message = first_content_text(result)
                .unwrap_or("tool reported an error")
                .to_string();
            return classify_fault(message);
        }
        if reports_success(result) || reports_success(&tool_payload(result)) {
            return Outcome::Success;
        }
    }

    Outcome::Unrecognized(snippet(body, SNIPPET_LIMIT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_shape() {
        let args = crate::traits::into_params(json!({ "record_name": "www" }));
        let req = JsonRpcRequest::tool_call(3, "allinkl.add_dns_record", &args);
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            json!({
                "jsonrpc": "2.0",
                "id": 3,
                "method": "tools/call",
                "params": {
                    "name": "allinkl.add_dns_record",
                    "arguments": { "record_name": "www" }
                }
            })
        );
    }

    #[test]
    fn result_success_flag() {
        let body = r#"{"jsonrpc":"2.0","id":1,"result":{"success":true}}"#;
        assert_eq!(interpret_reply(body), Outcome::Success);
    }

    #[test]
    fn result_success_false_is_unrecognized() {
        let body = r#"{"jsonrpc":"2.0","id":1,"result":{"success":false}}"#;
        assert_eq!(interpret_reply(body), Outcome::Unrecognized(body.to_string()));
    }

    #[test]
    fn success_inside_text_content() {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": { "content": [{ "type": "text", "text": "{\"success\":true}" }] }
        })
        .to_string();
        assert_eq!(interpret_reply(&body), Outcome::Success);
    }

    #[test]
    fn error_message_is_fault() {
        let body = r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32000,"message":"zone_not_found"}}"#;
        assert_eq!(
            interpret_reply(body),
            Outcome::Fault("zone_not_found".to_string())
        );
    }

    #[test]
    fn error_already_exists_is_downgraded() {
        let body = r#"{"jsonrpc":"2.0","id":1,"error":{"message":"DNS record already exists"}}"#;
        assert_eq!(interpret_reply(body), Outcome::AlreadyExists);
    }

    #[test]
    fn error_without_message_uses_whole_member() {
        let body = r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32601}}"#;
        assert_eq!(
            interpret_reply(body),
            Outcome::Fault(r#"{"code":-32601}"#.to_string())
        );
    }

    #[test]
    fn tool_error_flag_is_fault() {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": { "isError": true, "content": [{ "type": "text", "text": "Eintrag bereits vorhanden" }] }
        })
        .to_string();
        assert_eq!(interpret_reply(&body), Outcome::AlreadyExists);
    }

    #[test]
    fn non_json_is_unrecognized() {
        let body = "<html>Gateway Timeout</html>";
        assert_eq!(interpret_reply(body), Outcome::Unrecognized(body.to_string()));
    }

    #[test]
    fn payload_prefers_structured_content() {
        let result = json!({
            "structuredContent": { "login": "w0123456" },
            "content": [{ "type": "text", "text": "{\"login\":\"other\"}" }]
        });
        assert_eq!(tool_payload(&result)["login"], "w0123456");
    }

    #[test]
    fn payload_falls_back_to_result() {
        let result = json!({ "login": "w0123456", "content": [{ "type": "text", "text": "plain" }] });
        assert_eq!(tool_payload(&result)["login"], "w0123456");
    }
}
