//! SOAP envelope construction
//!
//! KAS takes a single `Params` string per request: a JSON object carrying the login,
//! the action name and the action's own parameters.

use serde::Serialize;

use crate::error::Result;
use crate::traits::ProviderErrorMapper;
use crate::types::{ActionParams, Credential};
use crate::utils::log_sanitizer::REDACTED;

use super::KasClient;

const ENVELOPE_HEAD: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
    "<SOAP-ENV:Envelope \n",
    "    xmlns:SOAP-ENV=\"http://schemas.xmlsoap.org/soap/envelope/\"\n",
    "    xmlns:ns1=\"https://kasserver.com/\"\n",
    "    xmlns:xsd=\"http://www.w3.org/2001/XMLSchema\"\n",
    "    xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\"\n",
    "    SOAP-ENV:encodingStyle=\"http://schemas.xmlsoap.org/soap/encoding/\">\n",
    "  <SOAP-ENV:Body>\n",
    "    <ns1:KasApi>\n",
    "      <Params xsi:type=\"xsd:string\">",
);

const ENVELOPE_TAIL: &str = concat!(
    "</Params>\n",
    "    </ns1:KasApi>\n",
    "  </SOAP-ENV:Body>\n",
    "</SOAP-ENV:Envelope>",
);

/// Field order matches what the KAS documentation shows.
#[derive(Serialize)]
struct KasRequest<'a> {
    kas_login: &'a str,
    kas_auth_type: &'static str,
    kas_auth_data: &'a str,
    kas_action: &'a str,
    #[serde(rename = "KasRequestParams")]
    request_params: &'a ActionParams,
}

impl KasClient {
    /// JSON parameter blob for one action, authenticated as `credential`.
    pub(crate) fn params_json(
        &self,
        credential: &Credential,
        action: &str,
        params: &ActionParams,
    ) -> Result<String> {
        let request = KasRequest {
            kas_login: &credential.account_id,
            kas_auth_type: "plain",
            kas_auth_data: &credential.secret,
            kas_action: action,
            request_params: params,
        };

        serde_json::to_string(&request).map_err(|e| self.serialization_error(e))
    }

    /// The blob as it may appear in logs: the password is replaced before encoding.
    pub(crate) fn loggable_params(&self, action: &str, params: &ActionParams) -> String {
        let masked = Credential::new(self.credential.account_id.as_str(), REDACTED);
        self.params_json(&masked, action, params)
            .unwrap_or_else(|e| e.to_string())
    }
}

/// Wraps the JSON blob in the fixed envelope.
///
/// `&`, `<` and `>` are escaped so the blob stays character data.
pub(crate) fn build_envelope(params_json: &str) -> String {
    let escaped = escape_text(params_json);
    let mut envelope =
        String::with_capacity(ENVELOPE_HEAD.len() + escaped.len() + ENVELOPE_TAIL.len());
    envelope.push_str(ENVELOPE_HEAD);
    envelope.push_str(&escaped);
    envelope.push_str(ENVELOPE_TAIL);
    envelope
}

fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
