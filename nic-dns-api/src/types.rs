use serde::{Deserialize, Serialize};

// ============ Service Types ============

/// A NIC.RU management contract (service) that scopes one or more zones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NicService {
    /// Service name, used in `/services/{name}/...` paths.
    pub name: String,
    /// Administrative contact handle (e.g. `"123/NIC-REG"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin: Option<String>,
    /// Paying contact handle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payer: Option<String>,
    /// Tariff plan name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tariff: Option<String>,
    /// Maximum number of zones allowed by the tariff.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domains_limit: Option<u32>,
    /// Number of zones currently hosted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domains_num: Option<u32>,
    /// Maximum number of records allowed by the tariff.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rr_limit: Option<u32>,
    /// Number of records currently hosted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rr_num: Option<u32>,
    pub enabled: bool,
    pub has_primary: bool,
}

// ============ Zone Types ============

/// Whether a zone carries uncommitted record edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ZoneState {
    /// Published state equals the edited state.
    Active,
    /// Edits are waiting for [`commit`](crate::DnsApi::commit) or
    /// [`rollback`](crate::DnsApi::rollback).
    PendingChanges,
}

impl ZoneState {
    pub(crate) fn from_has_changes(has_changes: bool) -> Self {
        if has_changes {
            Self::PendingChanges
        } else {
            Self::Active
        }
    }
}

/// A DNS zone hosted under a [`NicService`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NicZone {
    /// Server-assigned zone id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Zone name (punycode for IDN zones).
    pub name: String,
    /// Unicode zone name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idn_name: Option<String>,
    /// Name of the service the zone belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payer: Option<String>,
    pub enabled: bool,
    pub has_primary: bool,
    pub state: ZoneState,
}

impl NicZone {
    /// Shortcut for `state == ZoneState::PendingChanges`.
    pub fn has_changes(&self) -> bool {
        self.state == ZoneState::PendingChanges
    }
}
