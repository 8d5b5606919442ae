//! DNS record resource implementation.
//!
//! Records are nested under their zone: every route takes the zone id
//! first. A record maps a name inside the zone to one or more enrolled
//! systems, optionally via tags.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{
    decode_page, decode_resource, serialize_to_query, ApiClient, ApiError, Field,
    PaginatedResponse, PatchBuilder, PatchModel,
};

/// A DNS record inside a zone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecord {
    /// The record's unique identifier.
    pub id: u64,
    /// The id of the zone the record belongs to.
    pub zone_id: u64,
    /// The record name inside the zone, e.g. `build-server`.
    pub name: String,
    /// The fully qualified name, e.g. `build-server.internal`.
    pub fqdn: String,
    /// When the record was created.
    pub created: DateTime<Utc>,
    /// Free-form notes attached to the record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Tags whose systems answer for this record.
    #[serde(default)]
    pub tags: Vec<String>,
    /// System ids that answer for this record.
    #[serde(default)]
    pub systems: Vec<String>,
}

/// Request body for creating a DNS record.
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecordCreate {
    /// The record name inside the zone.
    pub name: String,
    /// Optional notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Tags whose systems answer for this record.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// System ids that answer for this record.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub systems: Vec<String>,
}

/// Fields that can be modified on a DNS record.
pub struct DnsRecordPatch;

impl PatchModel for DnsRecordPatch {}

impl DnsRecordPatch {
    /// The record name inside the zone.
    pub const NAME: Field<Self, String> = Field::new("name");
    /// Free-form notes.
    pub const NOTES: Field<Self, String> = Field::new("notes");
    /// Tags whose systems answer for this record. Replaces the whole list.
    pub const TAGS: Field<Self, Vec<String>> = Field::new("tags");
    /// System ids that answer for this record. Replaces the whole list.
    pub const SYSTEMS: Field<Self, Vec<String>> = Field::new("systems");
}

/// Parameters for listing DNS records in a zone.
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecordListParams {
    /// Filters records whose name contains the search term.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Zero-based page to fetch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

/// Client for DNS record operations.
#[derive(Debug, Clone, Copy)]
pub struct DnsRecordsClient<'c> {
    api: &'c ApiClient,
}

impl<'c> DnsRecordsClient<'c> {
    pub(crate) const fn new(api: &'c ApiClient) -> Self {
        Self { api }
    }

    /// Lists the records in a zone.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or an error status.
    pub async fn list(
        &self,
        zone_id: u64,
        params: Option<DnsRecordListParams>,
    ) -> Result<PaginatedResponse<DnsRecord>, ApiError> {
        let query = params
            .as_ref()
            .map(serialize_to_query)
            .transpose()?
            .filter(|q| !q.is_empty());
        let response = self
            .api
            .get(&format!("dns/zones/{zone_id}/records"), query)
            .await?;
        decode_page(response, "DnsRecord")
    }

    /// Fetches a single record by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the record does not exist in
    /// the zone.
    pub async fn get(&self, zone_id: u64, id: u64) -> Result<DnsRecord, ApiError> {
        let response = self
            .api
            .get(&format!("dns/zones/{zone_id}/records/{id}"), None)
            .await?;
        decode_resource(response, "DnsRecord", Some(&id.to_string()))
    }

    /// Creates a record in a zone.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ValidationFailed`] if the API rejects the
    /// record.
    pub async fn create(
        &self,
        zone_id: u64,
        create: DnsRecordCreate,
    ) -> Result<DnsRecord, ApiError> {
        let body = serde_json::to_value(&create)?;
        let response = self
            .api
            .post(&format!("dns/zones/{zone_id}/records"), body)
            .await?;
        decode_resource(response, "DnsRecord", None)
    }

    /// Deletes a record, returning its final state.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the record does not exist.
    pub async fn delete(&self, zone_id: u64, id: u64) -> Result<DnsRecord, ApiError> {
        let response = self
            .api
            .delete(&format!("dns/zones/{zone_id}/records/{id}"))
            .await?;
        decode_resource(response, "DnsRecord", Some(&id.to_string()))
    }

    /// Starts a partial update of a record.
    #[must_use]
    pub fn update(&self, zone_id: u64, id: u64) -> PatchBuilder<'c, DnsRecordPatch, DnsRecord> {
        self.api
            .patch_builder(format!("dns/zones/{zone_id}/records/{id}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dns_record_deserialization() {
        let json = r#"{
            "id": 456,
            "zoneId": 123,
            "name": "build-server",
            "fqdn": "build-server.internal",
            "created": "2024-06-01T12:00:00Z",
            "tags": ["ci"],
            "systems": ["sys-8f2e"]
        }"#;

        let record: DnsRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, 456);
        assert_eq!(record.zone_id, 123);
        assert_eq!(record.fqdn, "build-server.internal");
        assert!(record.notes.is_none());
        assert_eq!(record.tags, vec!["ci".to_string()]);
        assert_eq!(record.systems, vec!["sys-8f2e".to_string()]);
    }

    #[test]
    fn test_dns_record_tolerates_missing_lists() {
        let json = r#"{
            "id": 456,
            "zoneId": 123,
            "name": "build-server",
            "fqdn": "build-server.internal",
            "created": "2024-06-01T12:00:00Z"
        }"#;

        let record: DnsRecord = serde_json::from_str(json).unwrap();
        assert!(record.tags.is_empty());
        assert!(record.systems.is_empty());
    }

    #[test]
    fn test_create_body_omits_empty_lists() {
        let create = DnsRecordCreate {
            name: "build-server".to_string(),
            notes: None,
            tags: vec![],
            systems: vec![],
        };

        let value = serde_json::to_value(&create).unwrap();
        assert_eq!(value, serde_json::json!({"name": "build-server"}));
    }

    #[test]
    fn test_patch_field_names() {
        assert_eq!(DnsRecordPatch::NAME.name(), "name");
        assert_eq!(DnsRecordPatch::NOTES.name(), "notes");
        assert_eq!(DnsRecordPatch::TAGS.name(), "tags");
        assert_eq!(DnsRecordPatch::SYSTEMS.name(), "systems");
    }
}
