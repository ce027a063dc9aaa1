//! Client configuration

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use crate::utils::log_sanitizer::mask_secret;

/// Default API host.
pub const DEFAULT_BASE_URL: &str = "https://api.nic.ru";
/// 默认请求超时（秒）
pub const DEFAULT_TIMEOUT_SECS: u64 = 600;
/// 默认连接超时（秒）
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Everything needed to talk to the NIC.RU API.
///
/// Deserializable so it can come straight from a config file:
///
/// ```rust
/// use nic_dns_api::ClientConfig;
///
/// let config: ClientConfig = serde_json::from_str(r#"{
///     "client_id": "app-id",
///     "client_secret": "app-secret",
///     "username": "123/NIC-D",
///     "password": "secret",
///     "default_service": "MY-SERVICE",
///     "default_zone": "example.com"
/// }"#).unwrap();
/// assert_eq!(config.timeout_secs, 600);
/// ```
#[derive(Clone, Deserialize)]
pub struct ClientConfig {
    pub client_id: String,
    pub client_secret: String,

    /// Account login for the password grant.
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,

    /// OAuth scope, e.g. `GET:/dns-master/.+`.
    #[serde(default)]
    pub scope: Option<String>,

    /// Requested refresh-token lifetime in seconds (`offline` grant parameter).
    #[serde(default)]
    pub offline: Option<u64>,

    #[serde(default)]
    pub default_service: Option<String>,
    #[serde(default)]
    pub default_zone: Option<String>,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl ClientConfig {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            username: None,
            password: None,
            scope: None,
            offline: None,
            default_service: None,
            default_zone: None,
            base_url: default_base_url(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// `{base}/oauth/token`
    pub fn token_url(&self) -> String {
        format!("{}/oauth/token", self.base_url.trim_end_matches('/'))
    }

    /// `{base}/dns-master{path}`
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/dns-master{path}", self.base_url.trim_end_matches('/'))
    }

    pub(crate) fn credentials(&self) -> Option<(&str, &str)> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(username), Some(password)) if !username.is_empty() => Some((username, password)),
            _ => None,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &mask_secret(&self.client_secret))
            .field("username", &self.username)
            .field("password", &self.password.as_deref().map(mask_secret))
            .field("scope", &self.scope)
            .field("offline", &self.offline)
            .field("default_service", &self.default_service)
            .field("default_zone", &self.default_zone)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_applies_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"client_id":"id","client_secret":"secret"}"#).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), Duration::from_secs(600));
        assert!(config.username.is_none());
        assert!(config.credentials().is_none());
    }

    #[test]
    fn urls_are_built_from_base() {
        let mut config = ClientConfig::new("id", "secret");
        config.base_url = "http://127.0.0.1:8080/".to_string();
        assert_eq!(config.token_url(), "http://127.0.0.1:8080/oauth/token");
        assert_eq!(
            config.api_url("/services"),
            "http://127.0.0.1:8080/dns-master/services"
        );
    }

    #[test]
    fn credentials_need_both_parts() {
        let mut config = ClientConfig::new("id", "secret");
        config.username = Some("user".to_string());
        assert!(config.credentials().is_none());
        config.password = Some("pass".to_string());
        assert_eq!(config.credentials(), Some(("user", "pass")));
    }

    #[test]
    fn debug_masks_secrets() {
        let mut config = ClientConfig::new("id", "client-secret-value");
        config.password = Some("password-value".to_string());
        let debug = format!("{config:?}");
        assert!(!debug.contains("client-secret-value"));
        assert!(!debug.contains("password-value"));
    }
}
