use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for all dns-master operations.
///
/// Every call either fully succeeds or returns exactly one of these variants;
/// the library never retries on its own except for the single token refresh
/// described on [`Session::request`](crate::Session::request).
///
/// # Local vs. remote errors
///
/// - [`InvalidOperation`](Self::InvalidOperation) and
///   [`MissingCredentials`](Self::MissingCredentials) are raised before any
///   network call.
/// - [`Api`](Self::Api) is the dominant remote failure: the envelope status
///   was not `success`.
/// - [`MalformedResponse`](Self::MalformedResponse) and
///   [`ZoneMismatch`](Self::ZoneMismatch) mean the server broke the response
///   contract and are never expected in normal operation.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum NicError {
    /// The OAuth grant was denied, or refreshing the token failed.
    #[error("Authentication failed: {detail}")]
    Authentication {
        /// Provider's grant-denial reason.
        detail: String,
    },

    /// A password grant was needed but no username/password were configured.
    #[error("Username and password are required to request a token")]
    MissingCredentials,

    /// Non-2xx HTTP status on a request sent with strict status checking.
    #[error("HTTP error {status}. Body: {body}")]
    Transport {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The response envelope status was not `success`.
    #[error("API error: {message}")]
    Api {
        /// Concatenated provider error text.
        message: String,
    },

    /// The response lacked a required `<status>` or `<data>`, or was not XML.
    #[error("Malformed response: {detail}")]
    MalformedResponse {
        /// Details about what was missing.
        detail: String,
    },

    /// Local validation failed before any request was sent.
    #[error("Invalid operation: {detail}")]
    InvalidOperation {
        /// What was rejected and why.
        detail: String,
    },

    /// An `<rr>` element did not carry exactly one known type-specific child.
    #[error("Unsupported record type: {detail}")]
    UnsupportedRecordType {
        /// Description of the offending element.
        detail: String,
    },

    /// The records endpoint answered for a different zone than requested.
    #[error("Zone mismatch: requested '{requested}', server returned '{returned}'")]
    ZoneMismatch {
        /// Zone name sent in the request path.
        requested: String,
        /// Zone name found in the response.
        returned: String,
    },

    /// Network-level failure (connection refused, DNS resolution, ...).
    #[error("Network error: {detail}")]
    Network {
        /// Error details.
        detail: String,
    },

    /// The request exceeded the configured timeout.
    #[error("Request timeout: {detail}")]
    Timeout {
        /// Error details.
        detail: String,
    },

    /// A request body could not be serialized.
    #[error("Serialization error: {detail}")]
    Serialization {
        /// Details about the serialization failure.
        detail: String,
    },

    /// The injected token updater reported a failure.
    #[error("Token persistence failed: {detail}")]
    TokenPersistence {
        /// Error reported by the updater.
        detail: String,
    },
}

impl NicError {
    /// 是否为预期行为（用户输入、凭证错误等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::Authentication { .. }
                | Self::MissingCredentials
                | Self::Api { .. }
                | Self::InvalidOperation { .. }
        )
    }

    pub(crate) fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedResponse {
            detail: detail.into(),
        }
    }

    pub(crate) fn invalid_operation(detail: impl Into<String>) -> Self {
        Self::InvalidOperation {
            detail: detail.into(),
        }
    }
}

/// Convenience type alias for `Result<T, NicError>`.
pub type Result<T> = std::result::Result<T, NicError>;
