//! Shared test helpers: wiremock stubs for the token and dns-master endpoints,
//! plus env-gated context for the live tests.

#![allow(dead_code)]

use std::env;

use nic_dns_api::{DnsApi, DnsApiBuilder, DnsRecord};
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const SERVICE: &str = "SVC";
pub const ZONE: &str = "example.com";

/// Skips the test when any of the environment variables is missing.
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("skipping test: environment variable {} is not set", $var);
                return;
            }
        )+
    };
}

/// Asserts that a `Result` is `Ok` and unwraps it (fails the test otherwise).
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

// ============ Stub server ============

/// `<response>` envelope with `status=success` around `data`.
pub fn success_envelope(data: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" ?>
<response><status>success</status><data>{data}</data></response>"#
    )
}

/// `<response>` envelope with `status=fail` and one error.
pub fn error_envelope(code: u32, text: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" ?>
<response><status>fail</status><errors><error code="{code}">{text}</error></errors></response>"#
    )
}

/// XML response with the right content type.
pub fn xml(status: u16, body: String) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_raw(body, "text/xml")
}

/// Token endpoint answer for `access` / `refresh`.
pub fn token_response(access: &str, refresh: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "access_token": access,
        "refresh_token": refresh,
        "token_type": "Bearer",
        "expires_in": 14400,
    }))
}

/// Stubs the password grant.
pub async fn mount_password_grant(server: &MockServer, access: &str, refresh: &str) {
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_string_contains("grant_type=password"))
        .respond_with(token_response(access, refresh))
        .mount(server)
        .await;
}

/// Stubs the refresh grant.
pub async fn mount_refresh_grant(server: &MockServer, access: &str, refresh: &str) {
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .respond_with(token_response(access, refresh))
        .mount(server)
        .await;
}

/// `/dns-master/services/SVC/zones/example.com{suffix}`
pub fn zone_path(suffix: &str) -> String {
    format!("/dns-master/services/{SERVICE}/zones/{ZONE}{suffix}")
}

/// Builder pointed at the stub server with credentials and default target.
pub fn api_builder(server: &MockServer) -> DnsApiBuilder {
    DnsApi::builder("test-client", "test-secret")
        .base_url(server.uri())
        .credentials("123/NIC-D", "password")
        .default_service(SERVICE)
        .default_zone(ZONE)
        .timeout_secs(5)
}

// ============ Live tests ============

/// Generates a unique record name for live tests.
pub fn generate_test_record_name() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}", &uuid.to_string()[..8])
}

/// Client against the real API, configured from environment variables.
#[derive(Debug)]
pub struct TestContext {
    pub api: DnsApi,
    pub service: String,
    pub zone: String,
}

impl TestContext {
    /// `NIC_CLIENT_ID`, `NIC_CLIENT_SECRET`, `NIC_USERNAME`, `NIC_PASSWORD`,
    /// `NIC_SERVICE`, `TEST_DOMAIN`
    pub fn from_env() -> Option<Self> {
        let service = env::var("NIC_SERVICE").ok()?;
        let zone = env::var("TEST_DOMAIN").ok()?;
        let api = DnsApi::builder(
            env::var("NIC_CLIENT_ID").ok()?,
            env::var("NIC_CLIENT_SECRET").ok()?,
        )
        .credentials(env::var("NIC_USERNAME").ok()?, env::var("NIC_PASSWORD").ok()?)
        .default_service(service.clone())
        .default_zone(zone.clone())
        .build()
        .ok()?;

        Some(Self { api, service, zone })
    }

    /// Finds a record created by the live tests, by name.
    pub async fn find_record(&mut self, name: &str) -> Option<DnsRecord> {
        let records = self.api.records(None, None).await.ok()?;
        records.into_iter().find(|r| r.name == name)
    }

    /// Deletes every leftover `_test-*` record and commits.
    pub async fn cleanup_test_records(&mut self) {
        let Ok(records) = self.api.records(None, None).await else {
            return;
        };
        let mut deleted = 0;
        for record in records.iter().filter(|r| r.name.starts_with("_test-")) {
            if let Some(id) = record.id {
                if self.api.delete_record(id, None, None).await.is_ok() {
                    deleted += 1;
                }
            }
        }
        if deleted > 0 {
            let _ = self.api.commit(None, None).await;
            eprintln!("cleaned up {deleted} test record(s)");
        }
    }
}
