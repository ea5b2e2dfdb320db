use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ============ Record Type ============

/// DNS record type understood by the KAS API.
///
/// Serialized as uppercase strings (`"A"`, `"AAAA"`, `"CNAME"`, etc.).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Canonical name (alias) record.
    Cname,
    /// Mail exchange record.
    Mx,
    /// Text record.
    Txt,
    /// Name server record.
    Ns,
    /// Service locator record.
    Srv,
    /// Certification authority authorization record.
    Caa,
}

impl RecordType {
    /// Uppercase wire name, as sent in `record_type`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Txt => "TXT",
            Self::Ns => "NS",
            Self::Srv => "SRV",
            Self::Caa => "CAA",
        }
    }

    /// Whether a record type string reported by the provider denotes this type.
    pub fn matches(self, reported: &str) -> bool {
        reported.trim().eq_ignore_ascii_case(self.as_str())
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a supported [`RecordType`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRecordType(pub String);

impl fmt::Display for UnknownRecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported record type: {}", self.0)
    }
}

impl std::error::Error for UnknownRecordType {}

impl FromStr for RecordType {
    type Err = UnknownRecordType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(Self::A),
            "AAAA" => Ok(Self::Aaaa),
            "CNAME" => Ok(Self::Cname),
            "MX" => Ok(Self::Mx),
            "TXT" => Ok(Self::Txt),
            "NS" => Ok(Self::Ns),
            "SRV" => Ok(Self::Srv),
            "CAA" => Ok(Self::Caa),
            _ => Err(UnknownRecordType(s.to_string())),
        }
    }
}

// ============ Records ============

/// Desired state of a single DNS record.
///
/// `name` is the host label relative to the zone (`"backup-generator"`, not the FQDN).
/// `priority` is sent as `record_aux` and is `0` for every type that has no priority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecordSpec {
    /// Host label relative to the zone.
    pub name: String,
    /// Record type to create.
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// Record data (address, target host, text).
    pub value: String,
    /// Priority / auxiliary value.
    #[serde(default)]
    pub priority: u32,
    /// Optional label shown in reports (e.g. a language code).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl DnsRecordSpec {
    /// Creates a record spec with priority `0` and no label.
    pub fn new(name: impl Into<String>, record_type: RecordType, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            record_type,
            value: value.into(),
            priority: 0,
            label: None,
        }
    }

    /// Attaches a report label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Fully qualified host name inside `zone`, without trailing dot.
    pub fn fqdn(&self, zone: &str) -> String {
        format!("{}.{}", self.name, zone.trim_end_matches('.'))
    }
}

/// An existing record as reported by `get_dns_settings`.
///
/// The type stays a free string; the provider also reports types this crate does not model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecordState {
    /// Provider-assigned record id.
    pub id: String,
    /// Host label relative to the zone (empty for the apex).
    pub name: String,
    /// Record type as reported.
    pub record_type: String,
    /// Record data.
    pub value: String,
}

// ============ Credential ============

/// Account identifier and secret used for `kas_login` / `kas_auth_data`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    /// KAS login (account identifier).
    pub account_id: String,
    /// KAS password.
    pub secret: String,
}

impl Credential {
    pub fn new(account_id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("account_id", &self.account_id)
            .field("secret", &crate::utils::log_sanitizer::REDACTED)
            .finish()
    }
}

// ============ Actions ============

/// Request parameters of a KAS action (`KasRequestParams`).
pub type ActionParams = serde_json::Map<String, serde_json::Value>;

/// `get_dns_settings`
pub const ACTION_GET_DNS_SETTINGS: &str = "get_dns_settings";
/// `add_dns_settings`
pub const ACTION_ADD_DNS_SETTINGS: &str = "add_dns_settings";
/// `delete_dns_settings`
pub const ACTION_DELETE_DNS_SETTINGS: &str = "delete_dns_settings";

// ============ Outcome ============

/// Classification of one remote call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail")]
pub enum Outcome {
    /// The provider confirmed the action.
    Success,
    /// The provider rejected the action because the record is already present.
    AlreadyExists,
    /// The provider returned a fault; carries the fault message verbatim.
    Fault(String),
    /// The reply matched no known shape; carries a bounded snippet of the body.
    Unrecognized(String),
}

impl Outcome {
    /// `Success` and `AlreadyExists` both count as success.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success | Self::AlreadyExists)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("success"),
            Self::AlreadyExists => f.write_str("already exists"),
            Self::Fault(msg) => write!(f, "fault: {msg}"),
            Self::Unrecognized(snippet) => write!(f, "unrecognized response: {snippet}"),
        }
    }
}
