//! DNS resource record model
//!
//! A record is a [`DnsRecord`] header (`id`, `name`, `ttl`) around a
//! [`RecordData`] payload. The payload is a closed enum over the seven record
//! types dns-master returns, so every consumer matches exhaustively.

mod format;
mod xml;

use serde::{Deserialize, Serialize};

pub(crate) use xml::{RrXml, records_request_xml};

/// Record type discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DnsRecordType {
    /// Start of authority.
    Soa,
    /// Name server.
    Ns,
    /// IPv4 address.
    A,
    /// IPv6 address.
    Aaaa,
    /// Canonical name (alias).
    Cname,
    /// Mail exchange.
    Mx,
    /// Text.
    Txt,
}

impl DnsRecordType {
    /// Whether dns-master accepts this type through the add-records call.
    ///
    /// Only A, AAAA, CNAME and TXT can be added. This is the provider's business
    /// rule; the XML schema itself could express the others.
    #[must_use]
    pub const fn is_addable(self) -> bool {
        match self {
            Self::A | Self::Aaaa | Self::Cname | Self::Txt => true,
            Self::Soa | Self::Ns | Self::Mx => false,
        }
    }

    /// Uppercase mnemonic (`"A"`, `"AAAA"`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Soa => "SOA",
            Self::Ns => "NS",
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Txt => "TXT",
        }
    }
}

impl std::fmt::Display for DnsRecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Host name sub-record used by SOA, NS, CNAME and MX payloads.
///
/// dns-master wraps every host name in `<name>` with an optional
/// `<idn-name>` holding the Unicode form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostName {
    /// Host name as stored in the zone (punycode for IDN).
    pub name: String,
    /// Unicode form, when the server supplies it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idn_name: Option<String>,
}

impl HostName {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            idn_name: None,
        }
    }
}

/// Type-specific record payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content")]
pub enum RecordData {
    /// SOA record. Read-only.
    #[serde(rename = "SOA")]
    Soa {
        /// Primary name server.
        mname: HostName,
        /// Responsible mailbox.
        rname: HostName,
        serial: u32,
        refresh: u32,
        retry: u32,
        expire: u32,
        minimum: u32,
    },

    /// NS record. Read-only.
    #[serde(rename = "NS")]
    Ns {
        /// Name server host.
        ns: HostName,
    },

    /// A record - maps a hostname to an IPv4 address.
    A {
        /// IPv4 address (e.g., `"1.2.3.4"`).
        address: String,
    },

    /// AAAA record - maps a hostname to an IPv6 address.
    #[serde(rename = "AAAA")]
    Aaaa {
        /// IPv6 address (e.g., `"2001:db8::1"`).
        address: String,
    },

    /// CNAME record - alias from one name to another.
    #[serde(rename = "CNAME")]
    Cname {
        /// Target hostname.
        target: HostName,
    },

    /// MX record. Read-only.
    #[serde(rename = "MX")]
    Mx {
        /// Preference (lower wins).
        preference: u16,
        /// Mail server host.
        exchange: HostName,
    },

    /// TXT record.
    #[serde(rename = "TXT")]
    Txt {
        /// Free text; multiple `<string>` chunks are joined.
        text: String,
    },
}

impl RecordData {
    /// Returns the [`DnsRecordType`] discriminant.
    #[must_use]
    pub const fn record_type(&self) -> DnsRecordType {
        match self {
            Self::Soa { .. } => DnsRecordType::Soa,
            Self::Ns { .. } => DnsRecordType::Ns,
            Self::A { .. } => DnsRecordType::A,
            Self::Aaaa { .. } => DnsRecordType::Aaaa,
            Self::Cname { .. } => DnsRecordType::Cname,
            Self::Mx { .. } => DnsRecordType::Mx,
            Self::Txt { .. } => DnsRecordType::Txt,
        }
    }

    /// Primary value for single-line display.
    #[must_use]
    pub fn display_value(&self) -> String {
        match self {
            Self::Soa { mname, rname, .. } => format!("{} {}", mname.name, rname.name),
            Self::Ns { ns } => ns.name.clone(),
            Self::A { address } | Self::Aaaa { address } => address.clone(),
            Self::Cname { target } => target.name.clone(),
            Self::Mx {
                preference,
                exchange,
            } => format!("{preference} {}", exchange.name),
            Self::Txt { text } => text.clone(),
        }
    }
}

/// One DNS resource record of a zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    /// Server-assigned id; `None` until the record exists on the server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Owner name, relative to the zone (`@` for the apex). Never empty.
    pub name: String,
    /// Unicode form of the owner name, when the server supplies it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idn_name: Option<String>,
    /// TTL in seconds; `None` inherits the zone default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    /// Type-specific payload.
    pub data: RecordData,
}

impl DnsRecord {
    /// Builds an uncommitted record (no id, no TTL).
    #[must_use]
    pub fn new(name: impl Into<String>, data: RecordData) -> Self {
        Self {
            id: None,
            name: name.into(),
            idn_name: None,
            ttl: None,
            data,
        }
    }

    /// New A record.
    #[must_use]
    pub fn a(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self::new(
            name,
            RecordData::A {
                address: address.into(),
            },
        )
    }

    /// New AAAA record.
    #[must_use]
    pub fn aaaa(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self::new(
            name,
            RecordData::Aaaa {
                address: address.into(),
            },
        )
    }

    /// New CNAME record.
    #[must_use]
    pub fn cname(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(
            name,
            RecordData::Cname {
                target: HostName::new(target),
            },
        )
    }

    /// New TXT record. Leading and trailing whitespace is trimmed, as the
    /// XML exchange would drop it anyway.
    #[must_use]
    pub fn txt(name: impl Into<String>, text: impl Into<String>) -> Self {
        let text: String = text.into();
        Self::new(
            name,
            RecordData::Txt {
                text: text.trim().to_string(),
            },
        )
    }

    #[must_use]
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = Some(ttl);
        self
    }

    #[must_use]
    pub const fn record_type(&self) -> DnsRecordType {
        self.data.record_type()
    }

    /// See [`DnsRecordType::is_addable`].
    #[must_use]
    pub const fn is_addable(&self) -> bool {
        self.data.record_type().is_addable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addable_types() {
        assert!(DnsRecordType::A.is_addable());
        assert!(DnsRecordType::Aaaa.is_addable());
        assert!(DnsRecordType::Cname.is_addable());
        assert!(DnsRecordType::Txt.is_addable());
        assert!(!DnsRecordType::Soa.is_addable());
        assert!(!DnsRecordType::Ns.is_addable());
        assert!(!DnsRecordType::Mx.is_addable());
    }

    #[test]
    fn constructors_build_uncommitted_records() {
        let record = DnsRecord::a("www", "192.0.2.1").with_ttl(300);
        assert_eq!(record.id, None);
        assert_eq!(record.name, "www");
        assert_eq!(record.ttl, Some(300));
        assert_eq!(record.record_type(), DnsRecordType::A);
        assert!(record.is_addable());

        let cname = DnsRecord::cname("mail", "@");
        assert_eq!(
            cname.data,
            RecordData::Cname {
                target: HostName::new("@")
            }
        );
    }

    #[test]
    fn display_value_per_variant() {
        assert_eq!(DnsRecord::aaaa("v6", "2001:db8::1").data.display_value(), "2001:db8::1");
        assert_eq!(DnsRecord::txt("t", "hello").data.display_value(), "hello");
        let mx = RecordData::Mx {
            preference: 10,
            exchange: HostName::new("mail"),
        };
        assert_eq!(mx.display_value(), "10 mail");
    }

    #[test]
    fn record_type_serializes_uppercase() {
        let json = serde_json::to_string(&DnsRecordType::Cname).unwrap();
        assert_eq!(json, "\"CNAME\"");
    }
}
