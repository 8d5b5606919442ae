//! Policy resource implementation.
//!
//! Policies connect sender tags to receiver tags: systems carrying a
//! sender tag may reach systems carrying a receiver tag. A disabled
//! policy stays configured but grants nothing.
//!
//! # Example
//!
//! ```rust,ignore
//! use trellis_api::resources::policy::{PolicyCreate, PolicyPatch};
//!
//! let policy = client.policies().create(PolicyCreate {
//!     description: "CI agents to build servers".to_string(),
//!     is_enabled: true,
//!     sender_tags: vec!["ci-agents".to_string()],
//!     receiver_tags: vec!["build-servers".to_string()],
//!     ..Default::default()
//! }).await?;
//!
//! // Disable it again without touching anything else.
//! let policy = client
//!     .policies()
//!     .update(policy.id)
//!     .set(PolicyPatch::IS_ENABLED, false)?
//!     .apply()
//!     .await?;
//! assert!(!policy.is_enabled);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{
    decode_page, decode_resource, serialize_to_query, ApiClient, ApiError, Field,
    PaginatedResponse, PatchBuilder, PatchModel,
};
use crate::resources::BulkActionResult;

/// A connectivity policy between tagged systems.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    /// The policy's unique identifier.
    pub id: u64,
    /// When the policy was created.
    pub created: DateTime<Utc>,
    /// Human-readable description of what the policy grants.
    pub description: String,
    /// Whether the policy currently grants connectivity.
    pub is_enabled: bool,
    /// Free-form notes attached to the policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Tags whose systems may initiate connections.
    #[serde(default)]
    pub sender_tags: Vec<String>,
    /// Tags whose systems may receive connections.
    #[serde(default)]
    pub receiver_tags: Vec<String>,
}

/// Request body for creating a policy.
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PolicyCreate {
    /// Human-readable description of what the policy grants.
    pub description: String,
    /// Whether the policy grants connectivity immediately.
    pub is_enabled: bool,
    /// Optional notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Tags whose systems may initiate connections.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sender_tags: Vec<String>,
    /// Tags whose systems may receive connections.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub receiver_tags: Vec<String>,
}

/// Fields that can be modified on a policy.
pub struct PolicyPatch;

impl PatchModel for PolicyPatch {}

impl PolicyPatch {
    /// Human-readable description of what the policy grants.
    pub const DESCRIPTION: Field<Self, String> = Field::new("description");
    /// Whether the policy currently grants connectivity.
    pub const IS_ENABLED: Field<Self, bool> = Field::new("isEnabled");
    /// Free-form notes.
    pub const NOTES: Field<Self, String> = Field::new("notes");
    /// Tags whose systems may initiate connections. Replaces the list.
    pub const SENDER_TAGS: Field<Self, Vec<String>> = Field::new("senderTags");
    /// Tags whose systems may receive connections. Replaces the list.
    pub const RECEIVER_TAGS: Field<Self, Vec<String>> = Field::new("receiverTags");
}

/// Sort orders accepted by the policy list endpoint.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum PolicySortOrder {
    /// Sort alphabetically by description.
    Description,
    /// Most recently created first.
    RecentlyCreated,
}

/// Parameters for listing policies.
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PolicyListParams {
    /// Filters policies whose description contains the search term.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Includes disabled policies when `true`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_disabled: Option<bool>,
    /// Sort order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<PolicySortOrder>,
    /// Zero-based page to fetch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

/// Client for policy operations.
#[derive(Debug, Clone, Copy)]
pub struct PoliciesClient<'c> {
    api: &'c ApiClient,
}

impl<'c> PoliciesClient<'c> {
    pub(crate) const fn new(api: &'c ApiClient) -> Self {
        Self { api }
    }

    /// Lists policies.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or an error status.
    pub async fn list(
        &self,
        params: Option<PolicyListParams>,
    ) -> Result<PaginatedResponse<Policy>, ApiError> {
        let query = params
            .as_ref()
            .map(serialize_to_query)
            .transpose()?
            .filter(|q| !q.is_empty());
        let response = self.api.get("policies", query).await?;
        decode_page(response, "Policy")
    }

    /// Fetches a single policy by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the policy does not exist.
    pub async fn get(&self, id: u64) -> Result<Policy, ApiError> {
        let response = self.api.get(&format!("policies/{id}"), None).await?;
        decode_resource(response, "Policy", Some(&id.to_string()))
    }

    /// Creates a policy.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ValidationFailed`] if the API rejects the
    /// policy (e.g. a tag that does not exist).
    pub async fn create(&self, create: PolicyCreate) -> Result<Policy, ApiError> {
        let body = serde_json::to_value(&create)?;
        let response = self.api.post("policies", body).await?;
        decode_resource(response, "Policy", None)
    }

    /// Deletes a policy, returning its final state.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the policy does not exist.
    pub async fn delete(&self, id: u64) -> Result<Policy, ApiError> {
        let response = self.api.delete(&format!("policies/{id}")).await?;
        decode_resource(response, "Policy", Some(&id.to_string()))
    }

    /// Starts a partial update of a policy.
    ///
    /// Returns a fresh [`PatchBuilder`] bound to this policy; nothing is
    /// sent until [`apply`](PatchBuilder::apply) is called.
    #[must_use]
    pub fn update(&self, id: u64) -> PatchBuilder<'c, PolicyPatch, Policy> {
        self.api.patch_builder(format!("policies/{id}"))
    }

    /// Enables several policies in one call.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or an error status.
    pub async fn enable_many(&self, ids: &[u64]) -> Result<BulkActionResult, ApiError> {
        let body = serde_json::json!({ "policyIds": ids });
        let response = self.api.put("policies/enable", body).await?;
        decode_resource(response, "Policy", None)
    }

    /// Disables several policies in one call.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or an error status.
    pub async fn disable_many(&self, ids: &[u64]) -> Result<BulkActionResult, ApiError> {
        let body = serde_json::json!({ "policyIds": ids });
        let response = self.api.put("policies/disable", body).await?;
        decode_resource(response, "Policy", None)
    }

    /// Deletes several policies in one call.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or an error status.
    pub async fn delete_many(&self, ids: &[u64]) -> Result<BulkActionResult, ApiError> {
        let body = serde_json::json!({ "policyIds": ids });
        let response = self.api.post("policies/delete", body).await?;
        decode_resource(response, "Policy", None)
    }
}
