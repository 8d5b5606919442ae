//! Enrolment key resource implementation.
//!
//! Enrolment keys authorise new systems to join the organisation. Keys
//! can be general-purpose (long-lived, reusable) or ephemeral (one
//! enrolment per use), and can require manual approval of each system
//! they enrol.
//!
//! # Example
//!
//! ```rust,ignore
//! use trellis_api::resources::enrolment_key::{EnrolmentKeyCreate, EnrolmentKeyPatch, EnrolmentKeyType, ApprovalMode};
//!
//! // Create a manually-approved key for the build farm.
//! let key = client.enrolment_keys().create(EnrolmentKeyCreate {
//!     description: "Build farm".to_string(),
//!     key_type: EnrolmentKeyType::General,
//!     approval_mode: ApprovalMode::Manual,
//!     ..Default::default()
//! }).await?;
//!
//! // Later, cap its remaining uses.
//! let key = client
//!     .enrolment_keys()
//!     .update(key.id)
//!     .set(EnrolmentKeyPatch::USES_REMAINING, 5)?
//!     .apply()
//!     .await?;
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{
    decode_page, decode_resource, serialize_to_query, ApiClient, ApiError, Field,
    PaginatedResponse, PatchBuilder, PatchModel,
};
use crate::resources::BulkActionResult;

/// The kind of enrolment key.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum EnrolmentKeyType {
    /// Reusable key with an optional remaining-use budget.
    General,
    /// Single-use key that is consumed by one enrolment.
    Ephemeral,
}

/// How systems enrolled with a key are admitted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ApprovalMode {
    /// Enrolled systems join immediately.
    Automatic,
    /// Enrolled systems wait for an operator to approve them.
    Manual,
}

/// An enrolment key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EnrolmentKey {
    /// The key's unique identifier.
    pub id: u64,
    /// When the key was created.
    pub created: DateTime<Utc>,
    /// When the key was last used to enrol a system.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_used: Option<DateTime<Utc>>,
    /// Whether the key is general-purpose or ephemeral.
    #[serde(rename = "type")]
    pub key_type: EnrolmentKeyType,
    /// How enrolled systems are admitted.
    pub approval_mode: ApprovalMode,
    /// The secret key material presented by enrolling systems.
    pub key: String,
    /// Human-readable description of the key's purpose.
    pub description: String,
    /// Whether the key can currently be used.
    pub is_enabled: bool,
    /// Remaining uses, if the key is budgeted. `None` means unlimited.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uses_remaining: Option<i64>,
    /// Free-form notes attached to the key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Tags applied to systems enrolled with this key.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Request body for creating an enrolment key.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrolmentKeyCreate {
    /// Human-readable description of the key's purpose.
    pub description: String,
    /// Whether the key is general-purpose or ephemeral.
    #[serde(rename = "type")]
    pub key_type: EnrolmentKeyType,
    /// How enrolled systems are admitted.
    pub approval_mode: ApprovalMode,
    /// Remaining-use budget; `None` means unlimited.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uses_remaining: Option<i64>,
    /// Optional notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Tags applied to systems enrolled with this key.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Default for EnrolmentKeyCreate {
    fn default() -> Self {
        Self {
            description: String::new(),
            key_type: EnrolmentKeyType::General,
            approval_mode: ApprovalMode::Automatic,
            uses_remaining: None,
            notes: None,
            tags: vec![],
        }
    }
}

/// Fields that can be modified on an enrolment key.
pub struct EnrolmentKeyPatch;

impl PatchModel for EnrolmentKeyPatch {}

impl EnrolmentKeyPatch {
    /// Human-readable description of the key's purpose.
    pub const DESCRIPTION: Field<Self, String> = Field::new("description");
    /// How enrolled systems are admitted.
    pub const APPROVAL_MODE: Field<Self, ApprovalMode> = Field::new("approvalMode");
    /// Whether the key can currently be used.
    pub const IS_ENABLED: Field<Self, bool> = Field::new("isEnabled");
    /// Remaining-use budget.
    pub const USES_REMAINING: Field<Self, i64> = Field::new("usesRemaining");
    /// Free-form notes.
    pub const NOTES: Field<Self, String> = Field::new("notes");
    /// Tags applied to systems enrolled with this key. Replaces the list.
    pub const TAGS: Field<Self, Vec<String>> = Field::new("tags");
}

/// Parameters for listing enrolment keys.
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EnrolmentKeyListParams {
    /// Filters keys whose description contains the search term.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Includes disabled keys when `true`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_disabled: Option<bool>,
    /// Zero-based page to fetch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

/// Client for enrolment key operations.
#[derive(Debug, Clone, Copy)]
pub struct EnrolmentKeysClient<'c> {
    api: &'c ApiClient,
}

impl<'c> EnrolmentKeysClient<'c> {
    pub(crate) const fn new(api: &'c ApiClient) -> Self {
        Self { api }
    }

    /// Lists enrolment keys.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or an error status.
    pub async fn list(
        &self,
        params: Option<EnrolmentKeyListParams>,
    ) -> Result<PaginatedResponse<EnrolmentKey>, ApiError> {
        let query = params
            .as_ref()
            .map(serialize_to_query)
            .transpose()?
            .filter(|q| !q.is_empty());
        let response = self.api.get("enrolment-keys", query).await?;
        decode_page(response, "EnrolmentKey")
    }

    /// Fetches a single enrolment key by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the key does not exist.
    pub async fn get(&self, id: u64) -> Result<EnrolmentKey, ApiError> {
        let response = self.api.get(&format!("enrolment-keys/{id}"), None).await?;
        decode_resource(response, "EnrolmentKey", Some(&id.to_string()))
    }

    /// Creates an enrolment key. The generated key material is in the
    /// returned representation.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ValidationFailed`] if the API rejects the key.
    pub async fn create(&self, create: EnrolmentKeyCreate) -> Result<EnrolmentKey, ApiError> {
        let body = serde_json::to_value(&create)?;
        let response = self.api.post("enrolment-keys", body).await?;
        decode_resource(response, "EnrolmentKey", None)
    }

    /// Starts a partial update of an enrolment key.
    #[must_use]
    pub fn update(&self, id: u64) -> PatchBuilder<'c, EnrolmentKeyPatch, EnrolmentKey> {
        self.api.patch_builder(format!("enrolment-keys/{id}"))
    }

    /// Enables several keys in one call.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or an error status.
    pub async fn enable_many(&self, ids: &[u64]) -> Result<BulkActionResult, ApiError> {
        let body = serde_json::json!({ "keyIds": ids });
        let response = self.api.put("enrolment-keys/enable", body).await?;
        decode_resource(response, "EnrolmentKey", None)
    }

    /// Disables several keys in one call.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or an error status.
    pub async fn disable_many(&self, ids: &[u64]) -> Result<BulkActionResult, ApiError> {
        let body = serde_json::json!({ "keyIds": ids });
        let response = self.api.put("enrolment-keys/disable", body).await?;
        decode_resource(response, "EnrolmentKey", None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enrolment_key_deserialization() {
        let json = r#"{
            "id": 42,
            "created": "2024-02-10T10:00:00Z",
            "lastUsed": "2024-07-01T16:20:00Z",
            "type": "general",
            "approvalMode": "manual",
            "key": "XXXXX-XXXXX-XXXXX-XXXXX-XXXXX",
            "description": "Build farm",
            "isEnabled": true,
            "usesRemaining": 12,
            "tags": ["ci"]
        }"#;

        let key: EnrolmentKey = serde_json::from_str(json).unwrap();
        assert_eq!(key.id, 42);
        assert_eq!(key.key_type, EnrolmentKeyType::General);
        assert_eq!(key.approval_mode, ApprovalMode::Manual);
        assert!(key.is_enabled);
        assert_eq!(key.uses_remaining, Some(12));
        assert_eq!(key.tags, vec!["ci".to_string()]);
    }

    #[test]
    fn test_key_type_wire_values() {
        assert_eq!(
            serde_json::to_value(EnrolmentKeyType::General).unwrap(),
            serde_json::json!("general")
        );
        assert_eq!(
            serde_json::to_value(EnrolmentKeyType::Ephemeral).unwrap(),
            serde_json::json!("ephemeral")
        );
    }

    #[test]
    fn test_approval_mode_wire_values() {
        assert_eq!(
            serde_json::to_value(ApprovalMode::Automatic).unwrap(),
            serde_json::json!("automatic")
        );
        assert_eq!(
            serde_json::to_value(ApprovalMode::Manual).unwrap(),
            serde_json::json!("manual")
        );
    }

    #[test]
    fn test_create_body_uses_type_key_on_the_wire() {
        let create = EnrolmentKeyCreate {
            description: "Build farm".to_string(),
            key_type: EnrolmentKeyType::Ephemeral,
            ..Default::default()
        };

        let value = serde_json::to_value(&create).unwrap();
        assert_eq!(value.get("type"), Some(&serde_json::json!("ephemeral")));
        assert!(value.get("keyType").is_none());
        assert!(value.get("usesRemaining").is_none());
    }

    #[test]
    fn test_patch_field_names() {
        assert_eq!(EnrolmentKeyPatch::DESCRIPTION.name(), "description");
        assert_eq!(EnrolmentKeyPatch::APPROVAL_MODE.name(), "approvalMode");
        assert_eq!(EnrolmentKeyPatch::IS_ENABLED.name(), "isEnabled");
        assert_eq!(EnrolmentKeyPatch::USES_REMAINING.name(), "usesRemaining");
        assert_eq!(EnrolmentKeyPatch::TAGS.name(), "tags");
    }
}
