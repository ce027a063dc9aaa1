//! NIC.RU dns-master API facade

mod builder;
mod http;
mod provider;
mod types;

use urlencoding::encode;

use crate::config::ClientConfig;
use crate::error::{NicError, Result};
use crate::session::{Session, Token};

pub use builder::DnsApiBuilder;

/// Client for the NIC.RU dns-master API.
///
/// Every operation accepts optional `service` / `zone` overrides; `None` falls
/// back to the defaults configured on the client. Operations take `&mut self`
/// because they may renew the OAuth token.
#[derive(Debug)]
pub struct DnsApi {
    session: Session,
    default_service: Option<String>,
    default_zone: Option<String>,
}

/// Service + zone pair a zone-scoped call is sent to.
#[derive(Debug)]
struct ZoneTarget {
    service: String,
    zone: String,
}

impl ZoneTarget {
    /// `/services/{service}/zones/{zone}{suffix}` with both segments percent-encoded.
    fn path(&self, suffix: &str) -> String {
        format!(
            "/services/{}/zones/{}{suffix}",
            encode(&self.service),
            encode(&self.zone)
        )
    }
}

impl DnsApi {
    /// Builds a client from `config`. No network call is made.
    pub fn new(config: ClientConfig) -> Result<Self> {
        DnsApiBuilder::from_config(config).build()
    }

    pub fn builder(client_id: impl Into<String>, client_secret: impl Into<String>) -> DnsApiBuilder {
        DnsApiBuilder::new(client_id, client_secret)
    }

    /// Wraps an existing session; defaults are taken from its config.
    pub fn from_session(session: Session) -> Self {
        let config = session.config();
        Self {
            default_service: config.default_service.clone(),
            default_zone: config.default_zone.clone(),
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn default_service(&self) -> Option<&str> {
        self.default_service.as_deref()
    }

    pub fn set_default_service(&mut self, service: Option<String>) {
        self.default_service = service;
    }

    pub fn default_zone(&self) -> Option<&str> {
        self.default_zone.as_deref()
    }

    pub fn set_default_zone(&mut self, zone: Option<String>) {
        self.default_zone = zone;
    }

    /// Currently held token, if any.
    pub fn token(&self) -> Option<&Token> {
        self.session.token()
    }

    /// Requests a fresh token with the password grant, replacing any held one.
    ///
    /// Normally unnecessary: the first API call authenticates on its own.
    pub async fn get_token(&mut self) -> Result<Token> {
        self.session.authenticate().await
    }

    fn resolve_service(&self, service: Option<&str>) -> Option<String> {
        service
            .or(self.default_service.as_deref())
            .map(str::to_string)
    }

    fn resolve_zone_target(&self, service: Option<&str>, zone: Option<&str>) -> Result<ZoneTarget> {
        let service = self.resolve_service(service).ok_or_else(|| {
            NicError::invalid_operation("no service given and no default service configured")
        })?;
        let zone = zone
            .or(self.default_zone.as_deref())
            .map(str::to_string)
            .ok_or_else(|| {
                NicError::invalid_operation("no zone given and no default zone configured")
            })?;
        Ok(ZoneTarget { service, zone })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api() -> DnsApi {
        DnsApi::builder("id", "secret")
            .default_service("SVC")
            .default_zone("example.com")
            .build()
            .unwrap()
    }

    #[test]
    fn explicit_target_overrides_defaults() {
        let api = api();
        let target = api
            .resolve_zone_target(Some("OTHER"), Some("example.org"))
            .unwrap();
        assert_eq!(target.path("/records"), "/services/OTHER/zones/example.org/records");

        let target = api.resolve_zone_target(None, None).unwrap();
        assert_eq!(target.path(""), "/services/SVC/zones/example.com");
    }

    #[test]
    fn missing_zone_is_invalid_operation() {
        let mut api = api();
        api.set_default_zone(None);
        let err = api.resolve_zone_target(None, None).unwrap_err();
        assert!(matches!(err, NicError::InvalidOperation { .. }));
    }

    #[test]
    fn missing_service_is_invalid_operation() {
        let mut api = api();
        api.set_default_service(None);
        let err = api.resolve_zone_target(None, Some("example.com")).unwrap_err();
        assert!(matches!(err, NicError::InvalidOperation { .. }));
    }

    #[test]
    fn path_segments_are_encoded() {
        let target = ZoneTarget {
            service: "MY SERVICE".to_string(),
            zone: "пример.рф".to_string(),
        };
        assert_eq!(
            target.path("/commit"),
            "/services/MY%20SERVICE/zones/%D0%BF%D1%80%D0%B8%D0%BC%D0%B5%D1%80.%D1%80%D1%84/commit"
        );
    }
}
