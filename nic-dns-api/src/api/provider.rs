//! dns-master operations

use reqwest::Method;
use serde::de::IgnoredAny;

use crate::error::{NicError, Result};
use crate::record::{DnsRecord, records_request_xml};
use crate::types::{NicService, NicZone};

use super::DnsApi;
use super::types::{RecordsData, ServicesData, ZonesData};

impl DnsApi {
    /// Services available to the account.
    pub async fn services(&mut self) -> Result<Vec<NicService>> {
        let data: ServicesData = self
            .request_data(Method::GET, "/services", None)
            .await?
            .into_list();

        Ok(data.service.into_iter().map(NicService::from).collect())
    }

    /// Zones of `service` (or the default service). Without any service, all
    /// zones of the account are listed.
    pub async fn zones(&mut self, service: Option<&str>) -> Result<Vec<NicZone>> {
        let path = match self.resolve_service(service) {
            Some(service) => format!("/services/{}/zones", urlencoding::encode(&service)),
            None => "/zones".to_string(),
        };

        let data: ZonesData = self
            .request_data(Method::GET, &path, None)
            .await?
            .into_list();

        Ok(data.zone.into_iter().map(NicZone::from).collect())
    }

    /// Raw zone file text.
    ///
    /// # Errors
    /// [`NicError::Transport`] on any non-2xx status.
    pub async fn zonefile(&mut self, service: Option<&str>, zone: Option<&str>) -> Result<String> {
        let target = self.resolve_zone_target(service, zone)?;
        self.request_raw(Method::GET, &target.path("")).await
    }

    /// All records of a zone.
    ///
    /// # Errors
    /// * [`NicError::ZoneMismatch`] - the response describes another zone
    /// * [`NicError::UnsupportedRecordType`] - a record could not be decoded;
    ///   the whole listing fails
    pub async fn records(&mut self, service: Option<&str>, zone: Option<&str>) -> Result<Vec<DnsRecord>> {
        let target = self.resolve_zone_target(service, zone)?;

        let data: RecordsData = self
            .request_data(Method::GET, &target.path("/records"), None)
            .await?
            .into_required()?;

        let zone_data = data
            .zone
            .into_iter()
            .next()
            .ok_or_else(|| NicError::malformed("can't find <zone> in response data"))?;

        if zone_data.name != target.zone {
            log::error!(
                "[nic] Records response for zone '{}' while '{}' was requested",
                zone_data.name,
                target.zone
            );
            return Err(NicError::ZoneMismatch {
                requested: target.zone,
                returned: zone_data.name,
            });
        }

        zone_data
            .rr
            .into_iter()
            .map(DnsRecord::try_from)
            .collect::<Result<Vec<_>>>()
            .inspect_err(|e| log::error!("[nic] Failed to decode records of {}: {e}", target.zone))
    }

    /// Adds records to a zone. The change is pending until [`commit`](Self::commit).
    ///
    /// # Errors
    /// [`NicError::InvalidOperation`] without any request when `records` is
    /// empty or holds a SOA, NS or MX record.
    pub async fn add_records(
        &mut self,
        records: &[DnsRecord],
        service: Option<&str>,
        zone: Option<&str>,
    ) -> Result<()> {
        if records.is_empty() {
            return Err(NicError::invalid_operation("no records to add"));
        }
        let body = records_request_xml(records)?;
        let target = self.resolve_zone_target(service, zone)?;

        log::debug!(
            "[nic] Adding {} record(s) to service {} zone {}",
            records.len(),
            target.service,
            target.zone
        );

        self.request_data::<IgnoredAny>(Method::PUT, &target.path("/records"), Some(body))
            .await?;

        log::debug!("[nic] Successfully added {} record(s)", records.len());
        Ok(())
    }

    /// Adds a single record; see [`add_records`](Self::add_records).
    pub async fn add_record(
        &mut self,
        record: &DnsRecord,
        service: Option<&str>,
        zone: Option<&str>,
    ) -> Result<()> {
        self.add_records(std::slice::from_ref(record), service, zone)
            .await
    }

    /// Deletes a record by its server id. Pending until [`commit`](Self::commit).
    pub async fn delete_record(
        &mut self,
        record_id: u64,
        service: Option<&str>,
        zone: Option<&str>,
    ) -> Result<()> {
        let target = self.resolve_zone_target(service, zone)?;

        log::debug!(
            "[nic] Deleting record #{record_id} on service {} zone {}",
            target.service,
            target.zone
        );

        self.request_data::<IgnoredAny>(
            Method::DELETE,
            &target.path(&format!("/records/{record_id}")),
            None,
        )
        .await?;

        log::debug!("[nic] Record #{record_id} deleted");
        Ok(())
    }

    /// Publishes pending changes of a zone.
    pub async fn commit(&mut self, service: Option<&str>, zone: Option<&str>) -> Result<()> {
        let target = self.resolve_zone_target(service, zone)?;
        self.request_data::<IgnoredAny>(Method::POST, &target.path("/commit"), None)
            .await?;
        log::debug!("[nic] Changes committed on zone {}", target.zone);
        Ok(())
    }

    /// Discards pending changes of a zone.
    pub async fn rollback(&mut self, service: Option<&str>, zone: Option<&str>) -> Result<()> {
        let target = self.resolve_zone_target(service, zone)?;
        self.request_data::<IgnoredAny>(Method::POST, &target.path("/rollback"), None)
            .await?;
        log::debug!("[nic] Changes rolled back on zone {}", target.zone);
        Ok(())
    }
}
