//! dns-master request helpers

use reqwest::Method;
use serde::de::DeserializeOwned;

use crate::envelope::{Envelope, parse_envelope};
use crate::error::{NicError, Result};

use super::DnsApi;

/// Logs a failed call at `warn` for expected errors and `error` otherwise.
pub(crate) fn log_failure(method: &Method, path: &str, err: &NicError) {
    if err.is_expected() {
        log::warn!("[nic] {method} {path} failed: {err}");
    } else {
        log::error!("[nic] {method} {path} failed: {err}");
    }
}

impl DnsApi {
    /// Sends a request and unwraps the response envelope.
    ///
    /// HTTP status is not checked here: dns-master reports failures inside the
    /// envelope, which gives better messages than the status line.
    pub(crate) async fn request_data<T: DeserializeOwned>(
        &mut self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<Envelope<T>> {
        let result = match self.session.request(method.clone(), path, body, false).await {
            Ok(text) => parse_envelope(&text),
            Err(e) => Err(e),
        };
        result.inspect_err(|e| log_failure(&method, path, e))
    }

    /// Sends a request with strict status checking and returns the raw body.
    pub(crate) async fn request_raw(&mut self, method: Method, path: &str) -> Result<String> {
        self.session
            .request(method.clone(), path, None, true)
            .await
            .inspect_err(|e| log_failure(&method, path, e))
    }
}
