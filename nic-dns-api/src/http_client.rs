//! Generic HTTP client tools
//!
//! One place for sending a request, logging it and reading the body, shared by
//! the OAuth token exchange and the dns-master calls.
//!
//! # design principles
//! - **No retries** - every failure is handed back to the caller as-is
//! - **Status is data** - the status code is returned, callers decide what a non-2xx means
//! - **Flexible response parsing** - JSON for OAuth, XML for dns-master

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::NicError;
use crate::utils::log_sanitizer::truncate_for_log;

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns the status code and response text
    ///
    /// # Arguments
    /// * `request_builder` - configured request constructor (URL, headers, body, timeout)
    /// * `method_name` - request method name (such as "GET", "POST", used for logs)
    /// * `url` - request URL (for logging)
    ///
    /// # Returns
    /// * `Ok((status_code, response_text))` - for any HTTP status
    /// * `Err(NicError::Timeout)` - the request exceeded its timeout
    /// * `Err(NicError::Network)` - any other transport failure
    pub async fn execute_request(
        request_builder: RequestBuilder,
        method_name: &str,
        url: &str,
    ) -> Result<(u16, String), NicError> {
        let (status_code, response_text) =
            Self::execute_request_quiet(request_builder, method_name, url).await?;

        log::debug!(
            "[nic] Response Body: {}",
            truncate_for_log(&response_text)
        );

        Ok((status_code, response_text))
    }

    /// Same as [`execute_request`](Self::execute_request) but never logs the
    /// body. Used for the token endpoint, whose responses carry secrets.
    pub async fn execute_request_quiet(
        request_builder: RequestBuilder,
        method_name: &str,
        url: &str,
    ) -> Result<(u16, String), NicError> {
        log::debug!("[nic] {method_name} {url}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                NicError::Timeout {
                    detail: e.to_string(),
                }
            } else {
                NicError::Network {
                    detail: e.to_string(),
                }
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("[nic] Response Status: {status_code}");

        let response_text = response.text().await.map_err(|e| {
            if e.is_timeout() {
                NicError::Timeout {
                    detail: e.to_string(),
                }
            } else {
                NicError::Network {
                    detail: format!("Failed to read response body: {e}"),
                }
            }
        })?;

        Ok((status_code, response_text))
    }

    /// Parse JSON response (OAuth token endpoint)
    pub fn parse_json<T>(response_text: &str) -> Result<T, NicError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[nic] JSON parse failed: {e}");
            log::error!("[nic] Raw response: {}", truncate_for_log(response_text));
            NicError::malformed(format!("invalid JSON: {e}"))
        })
    }

    /// Parse XML response (dns-master endpoints)
    pub fn parse_xml<T>(response_text: &str) -> Result<T, NicError>
    where
        T: DeserializeOwned,
    {
        quick_xml::de::from_str(response_text).map_err(|e| {
            log::error!("[nic] XML parse failed: {e}");
            log::error!("[nic] Raw response: {}", truncate_for_log(response_text));
            NicError::malformed(format!("invalid XML: {e}"))
        })
    }
}

/// Whether an HTTP status code is in the 2xx range.
pub(crate) fn is_success(status_code: u16) -> bool {
    (200..300).contains(&status_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_range() {
        assert!(is_success(200));
        assert!(is_success(204));
        assert!(!is_success(199));
        assert!(!is_success(301));
        assert!(!is_success(401));
        assert!(!is_success(500));
    }

    #[test]
    fn parse_json_valid() {
        #[derive(serde::Deserialize, Debug, PartialEq)]
        struct Foo {
            x: i32,
        }
        let result: Result<Foo, NicError> = HttpUtils::parse_json(r#"{"x":42}"#);
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
        let result: Result<Foo, NicError> = HttpUtils::parse_json("not json");
        assert!(
            matches!(&result, Err(NicError::MalformedResponse { .. })),
            "unexpected parse result: {result:?}"
        );
    }

    #[test]
    fn parse_xml_valid() {
        #[derive(serde::Deserialize, Debug, PartialEq)]
        struct Foo {
            x: i32,
        }
        let result: Result<Foo, NicError> = HttpUtils::parse_xml("<foo><x>42</x></foo>");
        assert!(
            matches!(&result, Ok(Foo { x: 42 })),
            "unexpected parse result: {result:?}"
        );
    }

    #[test]
    fn parse_xml_invalid() {
        #[derive(serde::Deserialize, Debug)]
        #[allow(dead_code)]
        struct Foo {
            x: i32,
        }
        let result: Result<Foo, NicError> = HttpUtils::parse_xml("<foo><x>42</foo>");
        assert!(
            matches!(&result, Err(NicError::MalformedResponse { .. })),
            "unexpected parse result: {result:?}"
        );
    }
}
