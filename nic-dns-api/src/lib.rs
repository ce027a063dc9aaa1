//! # nic-dns-api
//!
//! Client library for the [NIC.RU](https://www.nic.ru/) (RU-CENTER) DNS hosting
//! API, `dns-master`: XML over HTTPS with OAuth 2.0 authentication.
//!
//! ## What it covers
//!
//! | Operation | Endpoint |
//! |-----------|----------|
//! | [`DnsApi::services`] | `GET /services` |
//! | [`DnsApi::zones`] | `GET /services/{service}/zones` or `GET /zones` |
//! | [`DnsApi::zonefile`] | `GET /services/{service}/zones/{zone}` |
//! | [`DnsApi::records`] | `GET /services/{service}/zones/{zone}/records` |
//! | [`DnsApi::add_records`] | `PUT /services/{service}/zones/{zone}/records` |
//! | [`DnsApi::delete_record`] | `DELETE /services/{service}/zones/{zone}/records/{id}` |
//! | [`DnsApi::commit`] / [`DnsApi::rollback`] | `POST /services/{service}/zones/{zone}/{commit,rollback}` |
//!
//! Record edits are staged on the server until the zone is committed.
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)* - Use the platform's native TLS implementation.
//! - **`rustls`** - Use rustls. Recommended for cross-compilation and Android targets.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use nic_dns_api::{DnsApi, DnsRecord, Token};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut api = DnsApi::builder("app-id", "app-secret")
//!         .credentials("123/NIC-D", "password")
//!         .default_service("MY-SERVICE")
//!         .default_zone("example.com")
//!         .token_updater(|token: &Token| -> std::io::Result<()> {
//!             std::fs::write("nic-token.json", serde_json::to_vec(token)?)
//!         })
//!         .build()?;
//!
//!     for record in api.records(None, None).await? {
//!         println!("{record}");
//!     }
//!
//!     let record = DnsRecord::a("www", "192.0.2.1").with_ttl(300);
//!     api.add_record(&record, None, None).await?;
//!     api.commit(None, None).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`Result<T, NicError>`](NicError). There is no
//! retry logic; the only automatic recovery is one token refresh after an
//! HTTP 401. The most common variants:
//!
//! - [`NicError::Api`] - dns-master answered with a non-`success` status
//! - [`NicError::InvalidOperation`] - rejected locally before any request
//! - [`NicError::Authentication`] - OAuth grant denied or refresh failed
//! - [`NicError::MalformedResponse`] - response did not follow the envelope format
//!
//! [`NicError::is_expected`] tells user-caused failures from broken contracts.

mod api;
mod config;
mod envelope;
mod error;
mod http_client;
mod record;
mod session;
mod types;
mod utils;

// Re-export error types
pub use error::{NicError, Result};

// Re-export client types
pub use api::{DnsApi, DnsApiBuilder};
pub use config::{
    ClientConfig, DEFAULT_BASE_URL, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS,
};
pub use session::{Session, SessionState, Token, TokenUpdater, UpdaterError};

// Re-export data types
pub use envelope::{Envelope, STATUS_SUCCESS, parse_envelope};
pub use record::{DnsRecord, DnsRecordType, HostName, RecordData};
pub use types::{NicService, NicZone, ZoneState};
