//! Hub `ApiClient` trait implementation

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::providers::common::normalize_domain_name;
use crate::traits::{ApiClient, ProviderErrorMapper, into_params};
use crate::types::{ACTION_GET_DNS_SETTINGS, ActionParams, DnsRecordState, Outcome};

use super::{HubClient, interpret_reply};

impl HubClient {
    fn tool_for(&self, action: &str) -> Result<&str> {
        self.tools
            .get(action)
            .map(String::as_str)
            .ok_or_else(|| self.unsupported_action(action))
    }
}

/// The hub expects `zone_host` without the trailing dot KAS uses.
fn hub_arguments(params: &ActionParams) -> ActionParams {
    let mut arguments = params.clone();
    if let Some(Value::String(zone)) = arguments.get_mut("zone_host") {
        *zone = normalize_domain_name(zone);
    }
    arguments
}

/// Record field as a string; the hub may send ids as numbers.
fn field(entry: &Value, key: &str) -> Option<String> {
    match entry.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn records_from_payload(payload: &Value) -> Option<Vec<DnsRecordState>> {
    let entries = payload
        .as_array()
        .or_else(|| payload.get("records").and_then(Value::as_array))
        .or_else(|| payload.get("ReturnInfo").and_then(Value::as_array))?;

    Some(
        entries
            .iter()
            .filter_map(|entry| {
                Some(DnsRecordState {
                    id: field(entry, "record_id")?,
                    name: field(entry, "record_name").unwrap_or_default(),
                    record_type: field(entry, "record_type")?,
                    value: field(entry, "record_data").unwrap_or_default(),
                })
            })
            .collect(),
    )
}

#[async_trait]
impl ApiClient for HubClient {
    fn id(&self) -> &'static str {
        "hub"
    }

    async fn call(&self, action: &str, params: &ActionParams) -> Result<Outcome> {
        let tool = self.tool_for(action)?;
        let arguments = hub_arguments(params);
        let (status, body) = self.post_tool_call(tool, &arguments).await?;

        let outcome = interpret_reply(&body);
        if status >= 400 && matches!(outcome, Outcome::Unrecognized(_)) {
            return Err(HttpUtils::status_error(self.provider_name(), status, &body));
        }

        match &outcome {
            Outcome::Success => log::debug!("[hub] {tool}: success"),
            Outcome::AlreadyExists => log::info!("[hub] {tool}: already exists"),
            Outcome::Fault(msg) => log::warn!("[hub] {tool} fault: {msg}"),
            Outcome::Unrecognized(snip) => log::warn!("[hub] {tool}: unrecognized reply: {snip}"),
        }
        Ok(outcome)
    }

    async fn list_records(&self, zone: &str) -> Result<Vec<DnsRecordState>> {
        let tool = self.tool_for(ACTION_GET_DNS_SETTINGS)?;
        let arguments = into_params(json!({ "zone_host": normalize_domain_name(zone) }));
        let payload = self.call_tool(tool, &arguments).await?;

        records_from_payload(&payload)
            .ok_or_else(|| self.parse_error("tool answer carries no record list"))
    }
}
