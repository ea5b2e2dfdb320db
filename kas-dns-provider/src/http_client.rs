//! Generic HTTP client tools
//!
//! Shared request/response handling for the SOAP and JSON-RPC clients.
//! Each client builds its own `RequestBuilder` (headers, body) and hands it over here.
//!
//! # design principles
//! - **One send path** - sending requests, logging, and mapping transport failures
//! - **No retries** - a failed call is reported once and the caller decides what to do
//! - **Status codes are passed through** - clients decide whether an error status still carries a readable reply

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::ProviderError;
use crate::utils::log_sanitizer::truncate_for_log;

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns response text
    ///
    /// # Arguments
    /// * `request_builder` - configured request (URL, headers, body)
    /// * `provider_name` - client name (for logging and errors)
    /// * `method_name` - HTTP method name (for logging)
    /// * `url_or_action` - URL or action name (for logging)
    ///
    /// # Returns
    /// * `Ok((status_code, response_text))` - any status except 429 and 502-504
    /// * `Err(ProviderError::Timeout | NetworkError | RateLimited)` - transport failure
    pub async fn execute_request(
        request_builder: RequestBuilder,
        provider_name: &str,
        method_name: &str,
        url_or_action: &str,
    ) -> Result<(u16, String), ProviderError> {
        log::debug!("[{provider_name}] {method_name} {url_or_action}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout {
                    provider: provider_name.to_string(),
                    detail: e.to_string(),
                }
            } else {
                ProviderError::NetworkError {
                    provider: provider_name.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("[{provider_name}] Response Status: {status_code}");

        // Read before the body consumes the response
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        if status_code == 429 {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{provider_name}] Rate limited (HTTP 429), retry_after={retry_after:?}");
            return Err(ProviderError::RateLimited {
                provider: provider_name.to_string(),
                retry_after,
                raw_message: Some(truncate_for_log(&body)),
            });
        }

        if matches!(status_code, 502..=504) {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{provider_name}] Gateway error (HTTP {status_code})");
            return Err(ProviderError::NetworkError {
                provider: provider_name.to_string(),
                detail: format!("HTTP {status_code}: {}", truncate_for_log(&body)),
            });
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| ProviderError::NetworkError {
                provider: provider_name.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!(
            "[{provider_name}] Response Body: {}",
            truncate_for_log(&response_text)
        );

        Ok((status_code, response_text))
    }

    /// Builds the error for a non-success status whose body is not a readable reply.
    pub fn status_error(provider_name: &str, status: u16, body: &str) -> ProviderError {
        log::warn!("[{provider_name}] Unexpected HTTP status {status}");
        ProviderError::HttpStatus {
            provider: provider_name.to_string(),
            status,
            body: truncate_for_log(body),
        }
    }

    /// Parse JSON response
    ///
    /// # Returns
    /// * `Ok(T)` - successfully parsed
    /// * `Err(ProviderError::ParseError)` - parsing failed
    pub fn parse_json<T>(response_text: &str, provider_name: &str) -> Result<T, ProviderError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[{provider_name}] JSON parse failed: {e}");
            log::error!(
                "[{provider_name}] Raw response: {}",
                truncate_for_log(response_text)
            );
            ProviderError::ParseError {
                provider: provider_name.to_string(),
                detail: e.to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client() -> reqwest::Client {
        reqwest::Client::new()
    }

    // ---- execute_request ----

    #[tokio::test]
    async fn returns_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<return>TRUE</return>"))
            .mount(&server)
            .await;

        let result =
            HttpUtils::execute_request(client().post(server.uri()), "test", "POST", "action")
                .await;
        let (status, body) = result.unwrap();
        assert_eq!(status, 200);
        assert_eq!(body, "<return>TRUE</return>");
    }

    #[tokio::test]
    async fn passes_server_error_through() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("fault"))
            .mount(&server)
            .await;

        let (status, body) =
            HttpUtils::execute_request(client().post(server.uri()), "test", "POST", "action")
                .await
                .unwrap();
        assert_eq!(status, 500);
        assert_eq!(body, "fault");
    }

    #[tokio::test]
    async fn maps_429_to_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "7"))
            .mount(&server)
            .await;

        let err =
            HttpUtils::execute_request(client().post(server.uri()), "test", "POST", "action")
                .await
                .unwrap_err();
        assert!(
            matches!(
                err,
                ProviderError::RateLimited {
                    retry_after: Some(7),
                    ..
                }
            ),
            "unexpected error: {err:?}"
        );
    }

    #[tokio::test]
    async fn maps_gateway_errors_to_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err =
            HttpUtils::execute_request(client().post(server.uri()), "test", "POST", "action")
                .await
                .unwrap_err();
        assert!(matches!(err, ProviderError::NetworkError { .. }));
    }

    #[tokio::test]
    async fn maps_slow_response_to_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(std::time::Duration::from_secs(2)))
            .mount(&server)
            .await;

        let request = client()
            .post(server.uri())
            .timeout(std::time::Duration::from_millis(100));
        let err = HttpUtils::execute_request(request, "test", "POST", "action")
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Timeout { .. }));
    }

    #[tokio::test]
    async fn maps_refused_connection_to_network_error() {
        // Port 9 (discard) on localhost is not listening in test environments
        let err = HttpUtils::execute_request(
            client().post("http://127.0.0.1:9/"),
            "test",
            "POST",
            "action",
        )
        .await
        .unwrap_err();
        assert!(err.is_transport());
    }

    // ---- status_error ----

    #[test]
    fn status_error_keeps_status() {
        let err = HttpUtils::status_error("kas", 404, "not found");
        assert!(matches!(
            err,
            ProviderError::HttpStatus { status: 404, .. }
        ));
    }

    // ---- parse_json ----

    #[test]
    fn parse_json_valid() {
        #[derive(serde::Deserialize, Debug, PartialEq)]
        struct Foo {
            x: i32,
        }
        let result: Result<Foo, ProviderError> = HttpUtils::parse_json(r#"{"x":42}"#, "test");
        assert!(
            matches!(&result, Ok(Foo { x: 42 })),
            "unexpected parse result: {result:?}"
        );
    }

    #[test]
    fn parse_json_invalid() {
        #[derive(serde::Deserialize, Debug)]
        #[allow(dead_code)]
        struct Foo {
            x: i32,
        }
        let result: Result<Foo, ProviderError> = HttpUtils::parse_json("not json", "test");
        assert!(
            matches!(&result, Err(ProviderError::ParseError { .. })),
            "unexpected parse result: {result:?}"
        );
    }
}
