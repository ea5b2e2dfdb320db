use async_trait::async_trait;
use serde_json::{Value, json};

use crate::error::{ProviderError, Result};
use crate::types::{
    ACTION_ADD_DNS_SETTINGS, ACTION_DELETE_DNS_SETTINGS, ActionParams, DnsRecordSpec,
    DnsRecordState, Outcome,
};

/// Shortcuts for building client errors (internal use)
pub(crate) trait ProviderErrorMapper {
    /// Client identifier used in every error
    fn provider_name(&self) -> &'static str;

    /// The remote action was rejected with a fault message
    fn fault_error(&self, action: &str, message: impl Into<String>) -> ProviderError {
        ProviderError::Fault {
            provider: self.provider_name().to_string(),
            action: action.to_string(),
            message: message.into(),
        }
    }

    /// The reply could not be parsed
    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// The request body could not be serialized
    fn serialization_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::SerializationError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }
}

/// A client able to run KAS actions.
///
/// `call` is the only transport primitive. The record operations are expressed on top of it,
/// so a client only has to know how to ship an action and read the answer.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Client identifier (`"kas"`, `"hub"`)
    fn id(&self) -> &'static str;

    /// Run one remote action and classify the reply.
    ///
    /// Transport failures are returned as `Err`; faults and unreadable replies are
    /// an `Ok` [`Outcome`].
    async fn call(&self, action: &str, params: &ActionParams) -> Result<Outcome>;

    /// List every record of `zone` (`get_dns_settings`).
    async fn list_records(&self, zone: &str) -> Result<Vec<DnsRecordState>>;

    /// Create one record (`add_dns_settings`).
    async fn add_record(&self, zone: &str, spec: &DnsRecordSpec) -> Result<Outcome> {
        let params = add_record_params(self.id(), zone, spec)?;
        self.call(ACTION_ADD_DNS_SETTINGS, &params).await
    }

    /// Delete one record by id (`delete_dns_settings`).
    async fn delete_record(&self, record_id: &str) -> Result<Outcome> {
        let params = delete_record_params(self.id(), record_id)?;
        self.call(ACTION_DELETE_DNS_SETTINGS, &params).await
    }
}

/// `zone_host` as KAS expects it: the zone with exactly one trailing dot.
pub fn zone_host(zone: &str) -> String {
    format!("{}.", zone.trim_end_matches('.'))
}

/// Parameters of `add_dns_settings`.
pub fn add_record_params(provider: &str, zone: &str, spec: &DnsRecordSpec) -> Result<ActionParams> {
    require_non_empty(provider, "zone_host", zone.trim_end_matches('.'))?;
    require_non_empty(provider, "record_name", &spec.name)?;
    require_non_empty(provider, "record_data", &spec.value)?;

    Ok(into_params(json!({
        "zone_host": zone_host(zone),
        "record_name": spec.name,
        "record_type": spec.record_type.as_str(),
        "record_data": spec.value,
        "record_aux": spec.priority.to_string(),
    })))
}

/// Parameters of `delete_dns_settings`.
pub fn delete_record_params(provider: &str, record_id: &str) -> Result<ActionParams> {
    require_non_empty(provider, "record_id", record_id)?;
    Ok(into_params(json!({ "record_id": record_id })))
}

pub(crate) fn into_params(value: Value) -> ActionParams {
    match value {
        Value::Object(map) => map,
        _ => ActionParams::new(),
    }
}

fn require_non_empty(provider: &str, param: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ProviderError::InvalidParameter {
            provider: provider.to_string(),
            param: param.to_string(),
            detail: "must not be empty".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RecordType;

    #[test]
    fn zone_host_has_single_trailing_dot() {
        assert_eq!(zone_host("baltic-ihub.com"), "baltic-ihub.com.");
        assert_eq!(zone_host("baltic-ihub.com."), "baltic-ihub.com.");
    }

    #[test]
    fn add_params_field_names() {
        let spec = DnsRecordSpec::new(
            "backup-generator",
            RecordType::Cname,
            "7c6be46a197dc3f0.vercel-dns-017.com.",
        );
        let params = add_record_params("kas", "baltic-ihub.com", &spec).unwrap();

        assert_eq!(params["zone_host"], "baltic-ihub.com.");
        assert_eq!(params["record_name"], "backup-generator");
        assert_eq!(params["record_type"], "CNAME");
        assert_eq!(params["record_data"], "7c6be46a197dc3f0.vercel-dns-017.com.");
        assert_eq!(params["record_aux"], "0");
        assert_eq!(params.len(), 5);
    }

    #[test]
    fn add_params_priority_as_string() {
        let mut spec = DnsRecordSpec::new("@", RecordType::Mx, "mx.example.com");
        spec.priority = 10;
        let params = add_record_params("kas", "example.com", &spec).unwrap();
        assert_eq!(params["record_aux"], "10");
    }

    #[test]
    fn add_params_reject_empty_value() {
        let spec = DnsRecordSpec::new("www", RecordType::A, "  ");
        let err = add_record_params("kas", "example.com", &spec).unwrap_err();
        assert!(matches!(
            err,
            ProviderError::InvalidParameter { ref param, .. } if param == "record_data"
        ));
    }

    #[test]
    fn delete_params() {
        let params = delete_record_params("kas", "12345").unwrap();
        assert_eq!(params["record_id"], "12345");
        assert!(delete_record_params("kas", "").is_err());
    }
}
