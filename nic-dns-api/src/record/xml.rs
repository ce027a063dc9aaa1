//! XML codec for `<rr>` elements.
//!
//! Server shape:
//!
//! ```xml
//! <rr id="210078">
//!   <name>www</name>
//!   <idn-name>www</idn-name>
//!   <ttl>3600</ttl>
//!   <type>A</type>
//!   <a>192.0.2.1</a>
//! </rr>
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{NicError, Result};
use crate::http_client::HttpUtils;

use super::{DnsRecord, DnsRecordType, HostName, RecordData};

// ============ Wire types (response) ============

#[derive(Debug, Deserialize)]
pub(crate) struct HostNameXml {
    name: String,
    #[serde(rename = "idn-name", default)]
    idn_name: Option<String>,
}

impl From<HostNameXml> for HostName {
    fn from(value: HostNameXml) -> Self {
        Self {
            name: value.name,
            idn_name: value.idn_name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SoaXml {
    mname: HostNameXml,
    rname: HostNameXml,
    serial: u32,
    refresh: u32,
    retry: u32,
    expire: u32,
    minimum: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MxXml {
    preference: u16,
    exchange: HostNameXml,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TxtXml {
    #[serde(rename = "string", default)]
    strings: Vec<String>,
}

/// One `<rr>` element as sent by dns-master.
///
/// Type-specific children are collected as lists so that a record carrying
/// several of them is reported as unsupported instead of silently picking one.
#[derive(Debug, Deserialize)]
pub(crate) struct RrXml {
    #[serde(rename = "@id", default)]
    id_attr: Option<u64>,
    #[serde(default)]
    id: Option<u64>,
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "idn-name", default)]
    idn_name: Option<String>,
    #[serde(default)]
    ttl: Option<u32>,
    #[serde(default)]
    soa: Vec<SoaXml>,
    #[serde(default)]
    ns: Vec<HostNameXml>,
    #[serde(default)]
    a: Vec<String>,
    #[serde(default)]
    aaaa: Vec<String>,
    #[serde(default)]
    cname: Vec<HostNameXml>,
    #[serde(default)]
    mx: Vec<MxXml>,
    #[serde(default)]
    txt: Vec<TxtXml>,
}

impl RrXml {
    fn type_tags(&self) -> Vec<&'static str> {
        let counts = [
            ("soa", self.soa.len()),
            ("ns", self.ns.len()),
            ("a", self.a.len()),
            ("aaaa", self.aaaa.len()),
            ("cname", self.cname.len()),
            ("mx", self.mx.len()),
            ("txt", self.txt.len()),
        ];
        counts
            .into_iter()
            .flat_map(|(tag, n)| std::iter::repeat_n(tag, n))
            .collect()
    }

    fn into_data(self) -> Option<RecordData> {
        if let Some(soa) = self.soa.into_iter().next() {
            return Some(RecordData::Soa {
                mname: soa.mname.into(),
                rname: soa.rname.into(),
                serial: soa.serial,
                refresh: soa.refresh,
                retry: soa.retry,
                expire: soa.expire,
                minimum: soa.minimum,
            });
        }
        if let Some(ns) = self.ns.into_iter().next() {
            return Some(RecordData::Ns { ns: ns.into() });
        }
        if let Some(address) = self.a.into_iter().next() {
            return Some(RecordData::A { address });
        }
        if let Some(address) = self.aaaa.into_iter().next() {
            return Some(RecordData::Aaaa { address });
        }
        if let Some(target) = self.cname.into_iter().next() {
            return Some(RecordData::Cname {
                target: target.into(),
            });
        }
        if let Some(mx) = self.mx.into_iter().next() {
            return Some(RecordData::Mx {
                preference: mx.preference,
                exchange: mx.exchange.into(),
            });
        }
        self.txt.into_iter().next().map(|txt| RecordData::Txt {
            text: txt.strings.concat(),
        })
    }
}

impl TryFrom<RrXml> for DnsRecord {
    type Error = NicError;

    fn try_from(mut rr: RrXml) -> Result<Self> {
        let tags = rr.type_tags();
        if tags.len() != 1 {
            let found = if tags.is_empty() {
                "none".to_string()
            } else {
                tags.join(", ")
            };
            return Err(NicError::UnsupportedRecordType {
                detail: format!(
                    "expected exactly one of soa/ns/a/aaaa/cname/mx/txt in <rr>, found: {found}"
                ),
            });
        }

        let name = rr
            .name
            .take()
            .filter(|n| !n.is_empty())
            .ok_or_else(|| NicError::malformed("<rr> without a <name>"))?;

        let id = rr.id_attr.or(rr.id);
        let idn_name = rr.idn_name.take();
        let ttl = rr.ttl;
        let data = rr.into_data().ok_or_else(|| NicError::UnsupportedRecordType {
            detail: "no type-specific child in <rr>".to_string(),
        })?;

        Ok(Self {
            id,
            name,
            idn_name,
            ttl,
            data,
        })
    }
}

// ============ Wire types (request) ============

#[derive(Debug, Serialize)]
struct HostNameOut<'a> {
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct TxtOut<'a> {
    string: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename = "rr")]
struct RrOut<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    ttl: Option<u32>,
    #[serde(rename = "type")]
    record_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    a: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    aaaa: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cname: Option<HostNameOut<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    txt: Option<TxtOut<'a>>,
}

impl<'a> RrOut<'a> {
    fn from_record(record: &'a DnsRecord) -> Result<Self> {
        let mut out = Self {
            name: &record.name,
            ttl: record.ttl,
            record_type: record.record_type().as_str(),
            a: None,
            aaaa: None,
            cname: None,
            txt: None,
        };

        match &record.data {
            RecordData::A { address } => out.a = Some(address),
            RecordData::Aaaa { address } => out.aaaa = Some(address),
            RecordData::Cname { target } => {
                out.cname = Some(HostNameOut { name: &target.name });
            }
            RecordData::Txt { text } => {
                if text.trim() != text {
                    return Err(NicError::invalid_operation(
                        "TXT text must not start or end with whitespace; it would not survive the XML round trip",
                    ));
                }
                out.txt = Some(TxtOut { string: text });
            }
            RecordData::Soa { .. } | RecordData::Ns { .. } | RecordData::Mx { .. } => {
                return Err(not_addable(record.record_type()));
            }
        }

        Ok(out)
    }
}

#[derive(Debug, Serialize)]
struct RrList<'a> {
    rr: Vec<RrOut<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename = "request")]
struct RecordsRequest<'a> {
    #[serde(rename = "rr-list")]
    rr_list: RrList<'a>,
}

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" ?>"#;

fn not_addable(record_type: DnsRecordType) -> NicError {
    NicError::invalid_operation(format!(
        "{record_type} records cannot be added through dns-master; only A, AAAA, CNAME and TXT are accepted"
    ))
}

fn to_xml_string<T: Serialize>(value: &T) -> Result<String> {
    quick_xml::se::to_string(value).map_err(|e| NicError::Serialization {
        detail: e.to_string(),
    })
}

/// Builds the add-records request document for `records`.
///
/// Fails with `InvalidOperation` on the first non-addable record, so nothing
/// is produced for a partially valid batch.
pub(crate) fn records_request_xml(records: &[DnsRecord]) -> Result<String> {
    let rr = records
        .iter()
        .map(RrOut::from_record)
        .collect::<Result<Vec<_>>>()?;
    let body = to_xml_string(&RecordsRequest {
        rr_list: RrList { rr },
    })?;
    Ok(format!("{XML_DECLARATION}\n{body}"))
}

impl DnsRecord {
    /// Parses one `<rr>` element.
    ///
    /// The variant is chosen by the type-specific child that is present;
    /// zero or several of them yield [`NicError::UnsupportedRecordType`].
    pub fn from_xml(xml: &str) -> Result<Self> {
        let rr: RrXml = HttpUtils::parse_xml(xml)?;
        Self::try_from(rr)
    }

    /// Serializes the record as an `<rr>` element for the add-records call.
    ///
    /// Only A, AAAA, CNAME and TXT are accepted. SOA, NS and MX fail with
    /// [`NicError::InvalidOperation`]: dns-master does not take them on its
    /// write API, even though the XML could express them. TXT text with
    /// leading or trailing whitespace is rejected the same way, since the
    /// parser trims element text. Server-side fields (`id`, `idn_name`) are
    /// not written.
    pub fn to_xml(&self) -> Result<String> {
        to_xml_string(&RrOut::from_record(self)?)
    }
}
