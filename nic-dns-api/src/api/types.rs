//! dns-master `<data>` payload shapes

use serde::Deserialize;

use crate::record::RrXml;
use crate::types::{NicService, NicZone, ZoneState};

/// Attribute booleans come as `"true"`/`"false"`; anything else counts as false.
fn flag(value: Option<&str>) -> bool {
    matches!(value.map(str::trim), Some("true" | "1" | "yes"))
}

fn number(value: Option<&str>) -> Option<u32> {
    value.and_then(|v| v.trim().parse().ok())
}

// ============ Services ============

/// `<data><service .../>...</data>`
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ServicesData {
    #[serde(default)]
    pub service: Vec<ServiceXml>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ServiceXml {
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "@admin", default)]
    admin: Option<String>,
    #[serde(rename = "@payer", default)]
    payer: Option<String>,
    #[serde(rename = "@tariff", default)]
    tariff: Option<String>,
    #[serde(rename = "@domains-limit", default)]
    domains_limit: Option<String>,
    #[serde(rename = "@domains-num", default)]
    domains_num: Option<String>,
    #[serde(rename = "@rr-limit", default)]
    rr_limit: Option<String>,
    #[serde(rename = "@rr-num", default)]
    rr_num: Option<String>,
    #[serde(rename = "@enable", default)]
    enable: Option<String>,
    #[serde(rename = "@has-primary", default)]
    has_primary: Option<String>,
}

impl From<ServiceXml> for NicService {
    fn from(xml: ServiceXml) -> Self {
        Self {
            domains_limit: number(xml.domains_limit.as_deref()),
            domains_num: number(xml.domains_num.as_deref()),
            rr_limit: number(xml.rr_limit.as_deref()),
            rr_num: number(xml.rr_num.as_deref()),
            enabled: flag(xml.enable.as_deref()),
            has_primary: flag(xml.has_primary.as_deref()),
            name: xml.name,
            admin: xml.admin,
            payer: xml.payer,
            tariff: xml.tariff,
        }
    }
}

// ============ Zones ============

/// `<data><zone .../>...</data>`
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ZonesData {
    #[serde(default)]
    pub zone: Vec<ZoneXml>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ZoneXml {
    #[serde(rename = "@id", default)]
    id: Option<String>,
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "@idn-name", default)]
    idn_name: Option<String>,
    #[serde(rename = "@service", default)]
    service: Option<String>,
    #[serde(rename = "@admin", default)]
    admin: Option<String>,
    #[serde(rename = "@payer", default)]
    payer: Option<String>,
    #[serde(rename = "@enable", default)]
    enable: Option<String>,
    #[serde(rename = "@has-primary", default)]
    has_primary: Option<String>,
    #[serde(rename = "@has-changes", default)]
    has_changes: Option<String>,
}

impl From<ZoneXml> for NicZone {
    fn from(xml: ZoneXml) -> Self {
        Self {
            id: xml.id.as_deref().and_then(|v| v.trim().parse().ok()),
            enabled: flag(xml.enable.as_deref()),
            has_primary: flag(xml.has_primary.as_deref()),
            state: ZoneState::from_has_changes(flag(xml.has_changes.as_deref())),
            name: xml.name,
            idn_name: xml.idn_name,
            service: xml.service,
            admin: xml.admin,
            payer: xml.payer,
        }
    }
}

// ============ Records ============

/// `<data><zone name="..."><rr>...</rr></zone></data>`
#[derive(Debug, Deserialize)]
pub(crate) struct RecordsData {
    #[serde(default)]
    pub zone: Vec<ZoneRecordsXml>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ZoneRecordsXml {
    #[serde(rename = "@name", default)]
    pub name: String,
    #[serde(default)]
    pub rr: Vec<RrXml>,
}
