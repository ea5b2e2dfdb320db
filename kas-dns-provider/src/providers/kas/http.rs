//! KAS HTTP request method

use reqwest::header::CONTENT_TYPE;

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::traits::ProviderErrorMapper;
use crate::types::ActionParams;
use crate::utils::log_sanitizer::truncate_for_log;

use super::{KasClient, SOAP_ACTION, SOAP_CONTENT_TYPE, build_envelope};

impl KasClient {
    /// Send one action and return the raw reply body.
    ///
    /// No structural parsing happens here. An error status whose body carries a SOAP
    /// fault is returned as a reply, since KAS answers faults with HTTP 500.
    pub async fn call_raw(&self, action: &str, params: &ActionParams) -> Result<String> {
        // 1. JSON blob and envelope
        let params_json = self.params_json(&self.credential, action, params)?;
        log::debug!(
            "[kas] Params: {}",
            truncate_for_log(&self.loggable_params(action, params))
        );
        let envelope = build_envelope(&params_json);

        // 2. Send request
        let request = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, SOAP_CONTENT_TYPE)
            .header("SOAPAction", SOAP_ACTION)
            .body(envelope);

        let (status, response_text) = HttpUtils::execute_request(
            request,
            self.provider_name(),
            "POST",
            &format!("{} (Action: {action})", self.endpoint),
        )
        .await?;

        // 3. Error statuses only count as replies when they carry a fault
        if status >= 400 {
            if response_text.contains("faultstring") {
                log::debug!("[kas] {action} answered HTTP {status} with a SOAP fault");
                return Ok(response_text);
            }
            return Err(HttpUtils::status_error(
                self.provider_name(),
                status,
                &response_text,
            ));
        }

        Ok(response_text)
    }
}
