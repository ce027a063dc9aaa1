use crate::config::ClientConfig;
use crate::error::Result;
use crate::session::{Session, Token, TokenUpdater};

use super::DnsApi;

/// Programmatic construction of a [`DnsApi`].
///
/// ```rust
/// use nic_dns_api::DnsApi;
///
/// let api = DnsApi::builder("app-id", "app-secret")
///     .credentials("123/NIC-D", "secret")
///     .scope("GET:/dns-master/.+")
///     .default_service("MY-SERVICE")
///     .default_zone("example.com")
///     .build()
///     .unwrap();
/// assert_eq!(api.default_zone(), Some("example.com"));
/// ```
#[must_use]
pub struct DnsApiBuilder {
    config: ClientConfig,
    token: Option<Token>,
    token_updater: Option<Box<dyn TokenUpdater>>,
}

impl DnsApiBuilder {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self::from_config(ClientConfig::new(client_id, client_secret))
    }

    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            config,
            token: None,
            token_updater: None,
        }
    }

    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.config.username = Some(username.into());
        self.config.password = Some(password.into());
        self
    }

    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.config.scope = Some(scope.into());
        self
    }

    /// Requested refresh-token lifetime, in seconds.
    pub fn offline(mut self, seconds: u64) -> Self {
        self.config.offline = Some(seconds);
        self
    }

    pub fn default_service(mut self, service: impl Into<String>) -> Self {
        self.config.default_service = Some(service.into());
        self
    }

    pub fn default_zone(mut self, zone: impl Into<String>) -> Self {
        self.config.default_zone = Some(zone.into());
        self
    }

    /// Overrides `https://api.nic.ru`, e.g. for a test server.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    pub fn timeout_secs(mut self, seconds: u64) -> Self {
        self.config.timeout_secs = seconds;
        self
    }

    /// Previously persisted token to start from.
    pub fn token(mut self, token: Token) -> Self {
        self.token = Some(token);
        self
    }

    pub fn token_updater(mut self, updater: impl TokenUpdater + 'static) -> Self {
        self.token_updater = Some(Box::new(updater));
        self
    }

    pub fn build(self) -> Result<DnsApi> {
        let mut session = Session::new(self.config)?;
        if let Some(token) = self.token {
            session = session.with_token(token);
        }
        session.set_token_updater(self.token_updater);
        Ok(DnsApi::from_session(session))
    }
}
