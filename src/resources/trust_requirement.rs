//! Trust requirement resource implementation.
//!
//! Trust requirements attach extra conditions to policies: a user
//! authentication challenge, or a source-IP constraint. The `settings`
//! payload is requirement-type specific and passed through as JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{
    decode_page, decode_resource, serialize_to_query, ApiClient, ApiError, Field,
    PaginatedResponse, PatchBuilder, PatchModel,
};

/// The kind of condition a trust requirement enforces.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TrustRequirementType {
    /// The connecting user must have authenticated recently.
    UserAuthentication,
    /// The connecting system must hold an approved public IP.
    PublicIp,
}

/// A trust requirement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrustRequirement {
    /// The requirement's unique identifier.
    pub id: u64,
    /// Human-readable description.
    pub description: String,
    /// When the requirement was created.
    pub created: DateTime<Utc>,
    /// The kind of condition enforced.
    #[serde(rename = "type")]
    pub requirement_type: TrustRequirementType,
    /// Free-form notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Type-specific configuration, passed through as JSON.
    pub settings: serde_json::Value,
}

/// Request body for creating a trust requirement.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustRequirementCreate {
    /// Human-readable description.
    pub description: String,
    /// The kind of condition enforced.
    #[serde(rename = "type")]
    pub requirement_type: TrustRequirementType,
    /// Optional notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Type-specific configuration.
    pub settings: serde_json::Value,
}

/// Fields that can be modified on a trust requirement.
#[derive(Debug)]
pub struct TrustRequirementPatch;

impl PatchModel for TrustRequirementPatch {}

impl TrustRequirementPatch {
    /// Human-readable description.
    pub const DESCRIPTION: Field<Self, String> = Field::new("description");
    /// Free-form notes.
    pub const NOTES: Field<Self, String> = Field::new("notes");
    /// Type-specific configuration. Replaces the whole settings object.
    pub const SETTINGS: Field<Self, serde_json::Value> = Field::new("settings");
}

/// Parameters for listing trust requirements.
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TrustRequirementListParams {
    /// Zero-based page to fetch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

/// Client for trust requirement operations.
#[derive(Debug, Clone, Copy)]
pub struct TrustRequirementsClient<'c> {
    api: &'c ApiClient,
}

impl<'c> TrustRequirementsClient<'c> {
    pub(crate) const fn new(api: &'c ApiClient) -> Self {
        Self { api }
    }

    /// Lists trust requirements.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or an error status.
    pub async fn list(
        &self,
        params: Option<TrustRequirementListParams>,
    ) -> Result<PaginatedResponse<TrustRequirement>, ApiError> {
        let query = params
            .as_ref()
            .map(serialize_to_query)
            .transpose()?
            .filter(|q| !q.is_empty());
        let response = self.api.get("trust-requirements", query).await?;
        decode_page(response, "TrustRequirement")
    }

    /// Fetches a single trust requirement by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the requirement does not exist.
    pub async fn get(&self, id: u64) -> Result<TrustRequirement, ApiError> {
        let response = self
            .api
            .get(&format!("trust-requirements/{id}"), None)
            .await?;
        decode_resource(response, "TrustRequirement", Some(&id.to_string()))
    }

    /// Creates a trust requirement.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ValidationFailed`] if the API rejects the
    /// requirement.
    pub async fn create(
        &self,
        create: TrustRequirementCreate,
    ) -> Result<TrustRequirement, ApiError> {
        let body = serde_json::to_value(&create)?;
        let response = self.api.post("trust-requirements", body).await?;
        decode_resource(response, "TrustRequirement", None)
    }

    /// Deletes a trust requirement, returning its final state.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the requirement does not exist.
    pub async fn delete(&self, id: u64) -> Result<TrustRequirement, ApiError> {
        let response = self.api.delete(&format!("trust-requirements/{id}")).await?;
        decode_resource(response, "TrustRequirement", Some(&id.to_string()))
    }

    /// Starts a partial update of a trust requirement.
    #[must_use]
    pub fn update(&self, id: u64) -> PatchBuilder<'c, TrustRequirementPatch, TrustRequirement> {
        self.api.patch_builder(format!("trust-requirements/{id}"))
    }
}
