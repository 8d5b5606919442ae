//! Tag resource implementation.
//!
//! Tags are addressed by their name (the "ref"), not a numeric id.
//! Renaming a tag through [`TagPatch::TAG`] changes the ref future calls
//! must use.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{
    decode_page, decode_resource, serialize_to_query, ApiClient, ApiError, Field,
    PaginatedResponse, PatchBuilder, PatchModel,
};

/// A tag grouping systems for policies and DNS.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    /// The tag name, used as its identifier in routes.
    pub tag: String,
    /// Display colour as a hex string, e.g. `#1B7EF2`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colour: Option<String>,
    /// Free-form notes attached to the tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// When the tag was created.
    pub created: DateTime<Utc>,
    /// Number of enrolment keys referencing the tag.
    pub keys: u32,
    /// Number of policies referencing the tag.
    pub policies: u32,
    /// Number of DNS records referencing the tag.
    pub dns_records: u32,
    /// Number of systems carrying the tag.
    pub systems: u32,
}

/// Request body for creating a tag.
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TagCreate {
    /// The tag name.
    pub tag: String,
    /// Display colour as a hex string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colour: Option<String>,
    /// Optional notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Fields that can be modified on a tag.
pub struct TagPatch;

impl PatchModel for TagPatch {}

impl TagPatch {
    /// The tag name. Renaming changes the ref used in routes.
    pub const TAG: Field<Self, String> = Field::new("tag");
    /// Display colour as a hex string.
    pub const COLOUR: Field<Self, String> = Field::new("colour");
    /// Free-form notes.
    pub const NOTES: Field<Self, String> = Field::new("notes");
}

/// Parameters for listing tags.
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TagListParams {
    /// Filters tags whose name contains the search term.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Zero-based page to fetch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

/// Client for tag operations.
#[derive(Debug, Clone, Copy)]
pub struct TagsClient<'c> {
    api: &'c ApiClient,
}

impl<'c> TagsClient<'c> {
    pub(crate) const fn new(api: &'c ApiClient) -> Self {
        Self { api }
    }

    /// Lists tags.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or an error status.
    pub async fn list(
        &self,
        params: Option<TagListParams>,
    ) -> Result<PaginatedResponse<Tag>, ApiError> {
        let query = params
            .as_ref()
            .map(serialize_to_query)
            .transpose()?
            .filter(|q| !q.is_empty());
        let response = self.api.get("tags", query).await?;
        decode_page(response, "Tag")
    }

    /// Fetches a single tag by ref.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the tag does not exist.
    pub async fn get(&self, tag_ref: &str) -> Result<Tag, ApiError> {
        let response = self.api.get(&format!("tags/{tag_ref}"), None).await?;
        decode_resource(response, "Tag", Some(tag_ref))
    }

    /// Creates a tag.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ValidationFailed`] if the API rejects the tag.
    pub async fn create(&self, create: TagCreate) -> Result<Tag, ApiError> {
        let body = serde_json::to_value(&create)?;
        let response = self.api.post("tags", body).await?;
        decode_resource(response, "Tag", None)
    }

    /// Deletes a tag, returning its final state. References from keys,
    /// policies and DNS records are removed as well.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the tag does not exist.
    pub async fn delete(&self, tag_ref: &str) -> Result<Tag, ApiError> {
        let response = self.api.delete(&format!("tags/{tag_ref}")).await?;
        decode_resource(response, "Tag", Some(tag_ref))
    }

    /// Starts a partial update of a tag.
    #[must_use]
    pub fn update(&self, tag_ref: &str) -> PatchBuilder<'c, TagPatch, Tag> {
        self.api.patch_builder(format!("tags/{tag_ref}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_deserialization() {
        let json = r##"{
            "tag": "ci-agents",
            "colour": "#1B7EF2",
            "created": "2024-01-05T11:00:00Z",
            "keys": 1,
            "policies": 2,
            "dnsRecords": 0,
            "systems": 16
        }"##;

        let tag: Tag = serde_json::from_str(json).unwrap();
        assert_eq!(tag.tag, "ci-agents");
        assert_eq!(tag.colour, Some("#1B7EF2".to_string()));
        assert!(tag.notes.is_none());
        assert_eq!(tag.systems, 16);
    }

    #[test]
    fn test_create_body_shape() {
        let create = TagCreate {
            tag: "staging".to_string(),
            colour: None,
            notes: Some("short-lived".to_string()),
        };

        let value = serde_json::to_value(&create).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"tag": "staging", "notes": "short-lived"})
        );
    }

    #[test]
    fn test_patch_field_names() {
        assert_eq!(TagPatch::TAG.name(), "tag");
        assert_eq!(TagPatch::COLOUR.name(), "colour");
        assert_eq!(TagPatch::NOTES.name(), "notes");
    }
}
