//! KAS `ApiClient` trait implementation

use async_trait::async_trait;
use serde_json::json;

use crate::error::Result;
use crate::interpret::{SNIPPET_LIMIT, TRUE_MARKER, fault_message, interpret};
use crate::traits::{ApiClient, ProviderErrorMapper, into_params, zone_host};
use crate::types::{ACTION_GET_DNS_SETTINGS, ActionParams, DnsRecordState, Outcome};
use crate::utils::log_sanitizer::snippet;

use super::{KasClient, parse_records};

#[async_trait]
impl ApiClient for KasClient {
    fn id(&self) -> &'static str {
        "kas"
    }

    async fn call(&self, action: &str, params: &ActionParams) -> Result<Outcome> {
        let raw = self.call_raw(action, params).await?;
        let outcome = interpret(&raw);
        match &outcome {
            Outcome::Success => log::debug!("[kas] {action}: success"),
            Outcome::AlreadyExists => log::info!("[kas] {action}: already exists"),
            Outcome::Fault(msg) => log::warn!("[kas] {action} fault: {msg}"),
            Outcome::Unrecognized(snip) => {
                log::warn!("[kas] {action}: unrecognized reply: {snip}");
            }
        }
        Ok(outcome)
    }

    async fn list_records(&self, zone: &str) -> Result<Vec<DnsRecordState>> {
        let params = into_params(json!({
            "zone_host": zone_host(zone),
            "nameserver": self.nameserver,
        }));
        let raw = self.call_raw(ACTION_GET_DNS_SETTINGS, &params).await?;

        if !raw.contains(TRUE_MARKER) {
            if let Some(message) = fault_message(&raw) {
                return Err(self.fault_error(ACTION_GET_DNS_SETTINGS, message));
            }
            return Err(self.parse_error(format!(
                "unrecognized reply: {}",
                snippet(&raw, SNIPPET_LIMIT)
            )));
        }

        let records = parse_records(&raw).map_err(|e| self.parse_error(e))?;
        log::debug!("[kas] {zone}: {} record(s) listed", records.len());
        Ok(records)
    }
}
