//! DNS zone resource implementation.
//!
//! Zones group DNS records under a common suffix; records themselves
//! live in [`dns_record`](crate::resources::dns_record).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{
    decode_page, decode_resource, serialize_to_query, ApiClient, ApiError, Field,
    PaginatedResponse, PatchBuilder, PatchModel,
};

/// A DNS zone within the organisation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DnsZone {
    /// The zone's unique identifier.
    pub id: u64,
    /// The zone name, e.g. `internal`.
    pub name: String,
    /// When the zone was created.
    pub created: DateTime<Utc>,
    /// Free-form notes attached to the zone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Number of records currently in the zone.
    pub record_count: u32,
}

/// Request body for creating a DNS zone.
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DnsZoneCreate {
    /// The zone name.
    pub name: String,
    /// Optional notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Fields that can be modified on a DNS zone.
pub struct DnsZonePatch;

impl PatchModel for DnsZonePatch {}

impl DnsZonePatch {
    /// The zone name.
    pub const NAME: Field<Self, String> = Field::new("name");
    /// Free-form notes.
    pub const NOTES: Field<Self, String> = Field::new("notes");
}

/// Parameters for listing DNS zones.
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DnsZoneListParams {
    /// Filters zones whose name contains the search term.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Zero-based page to fetch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

/// Client for DNS zone operations.
#[derive(Debug, Clone, Copy)]
pub struct DnsZonesClient<'c> {
    api: &'c ApiClient,
}

impl<'c> DnsZonesClient<'c> {
    pub(crate) const fn new(api: &'c ApiClient) -> Self {
        Self { api }
    }

    /// Lists DNS zones.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or an error status.
    pub async fn list(
        &self,
        params: Option<DnsZoneListParams>,
    ) -> Result<PaginatedResponse<DnsZone>, ApiError> {
        let query = params
            .as_ref()
            .map(serialize_to_query)
            .transpose()?
            .filter(|q| !q.is_empty());
        let response = self.api.get("dns/zones", query).await?;
        decode_page(response, "DnsZone")
    }

    /// Fetches a single DNS zone by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the zone does not exist.
    pub async fn get(&self, id: u64) -> Result<DnsZone, ApiError> {
        let response = self.api.get(&format!("dns/zones/{id}"), None).await?;
        decode_resource(response, "DnsZone", Some(&id.to_string()))
    }

    /// Creates a DNS zone.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ValidationFailed`] if the API rejects the zone.
    pub async fn create(&self, create: DnsZoneCreate) -> Result<DnsZone, ApiError> {
        let body = serde_json::to_value(&create)?;
        let response = self.api.post("dns/zones", body).await?;
        decode_resource(response, "DnsZone", None)
    }

    /// Deletes a DNS zone and all its records, returning the zone's final
    /// state.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the zone does not exist.
    pub async fn delete(&self, id: u64) -> Result<DnsZone, ApiError> {
        let response = self.api.delete(&format!("dns/zones/{id}")).await?;
        decode_resource(response, "DnsZone", Some(&id.to_string()))
    }

    /// Starts a partial update of a DNS zone.
    #[must_use]
    pub fn update(&self, id: u64) -> PatchBuilder<'c, DnsZonePatch, DnsZone> {
        self.api.patch_builder(format!("dns/zones/{id}"))
    }
}
