//! System resource implementation.
//!
//! Systems are the enrolled machines themselves. They are created by
//! enrolment, never through this API, so there is no `create`; removing
//! a system is called *revoking* and permanently invalidates its
//! certificate.
//!
//! # Example
//!
//! ```rust,ignore
//! use trellis_api::resources::system::{SystemListParams, SystemPatch};
//!
//! // Tag every connected build machine.
//! let systems = client.systems().list(Some(SystemListParams {
//!     search: Some("build".to_string()),
//!     ..Default::default()
//! })).await?;
//!
//! for system in systems.iter() {
//!     client
//!         .systems()
//!         .update(&system.system_id)
//!         .set(SystemPatch::TAGS, vec!["build-servers".to_string()])?
//!         .apply()
//!         .await?;
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{
    decode_page, decode_resource, serialize_to_query, ApiClient, ApiError, Field,
    PaginatedResponse, PatchBuilder, PatchModel,
};
use crate::resources::BulkActionResult;

/// Connection state of an enrolled system.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SystemState {
    /// The system currently holds a connection to the platform.
    Connected,
    /// The system is enrolled but not connected.
    Disconnected,
    /// The system has been administratively disabled.
    Disabled,
}

/// An enrolled system.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct System {
    /// The system's identifier, e.g. `sys-8f2e`.
    pub system_id: String,
    /// Operator-assigned description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Hostname reported by the system.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    /// Current connection state.
    pub state: SystemState,
    /// When the current connection was established.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connected_at: Option<DateTime<Utc>>,
    /// When the system was last seen.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<DateTime<Utc>>,
    /// Whether the system is allowed to connect.
    pub is_enabled: bool,
    /// Free-form notes attached to the system.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Tags carried by the system.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Operating system/platform reported by the system.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    /// Agent version reported by the system.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Fields that can be modified on a system.
pub struct SystemPatch;

impl PatchModel for SystemPatch {}

impl SystemPatch {
    /// Operator-assigned description.
    pub const DESCRIPTION: Field<Self, String> = Field::new("description");
    /// Whether the system is allowed to connect.
    pub const IS_ENABLED: Field<Self, bool> = Field::new("isEnabled");
    /// Free-form notes.
    pub const NOTES: Field<Self, String> = Field::new("notes");
    /// Tags carried by the system. Replaces the whole list.
    pub const TAGS: Field<Self, Vec<String>> = Field::new("tags");
}

/// Parameters for listing systems.
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SystemListParams {
    /// Filters systems whose description or hostname contains the term.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Restricts results to one connection state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<SystemState>,
    /// Restricts results to systems carrying all of these tags.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Zero-based page to fetch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

/// Client for system operations.
#[derive(Debug, Clone, Copy)]
pub struct SystemsClient<'c> {
    api: &'c ApiClient,
}

impl<'c> SystemsClient<'c> {
    pub(crate) const fn new(api: &'c ApiClient) -> Self {
        Self { api }
    }

    /// Lists enrolled systems.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or an error status.
    pub async fn list(
        &self,
        params: Option<SystemListParams>,
    ) -> Result<PaginatedResponse<System>, ApiError> {
        let query = params
            .as_ref()
            .map(serialize_to_query)
            .transpose()?
            .filter(|q| !q.is_empty());
        let response = self.api.get("systems", query).await?;
        decode_page(response, "System")
    }

    /// Fetches a single system by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the system does not exist.
    pub async fn get(&self, system_id: &str) -> Result<System, ApiError> {
        let response = self.api.get(&format!("systems/{system_id}"), None).await?;
        decode_resource(response, "System", Some(system_id))
    }

    /// Revokes a system, permanently invalidating its certificate.
    /// Returns the system's final state.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the system does not exist.
    pub async fn revoke(&self, system_id: &str) -> Result<System, ApiError> {
        let response = self.api.delete(&format!("systems/{system_id}")).await?;
        decode_resource(response, "System", Some(system_id))
    }

    /// Starts a partial update of a system.
    #[must_use]
    pub fn update(&self, system_id: &str) -> PatchBuilder<'c, SystemPatch, System> {
        self.api.patch_builder(format!("systems/{system_id}"))
    }

    /// Enables several systems in one call.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or an error status.
    pub async fn enable_many(&self, system_ids: &[&str]) -> Result<BulkActionResult, ApiError> {
        let body = serde_json::json!({ "systemIds": system_ids });
        let response = self.api.put("systems/enable", body).await?;
        decode_resource(response, "System", None)
    }

    /// Disables several systems in one call.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or an error status.
    pub async fn disable_many(&self, system_ids: &[&str]) -> Result<BulkActionResult, ApiError> {
        let body = serde_json::json!({ "systemIds": system_ids });
        let response = self.api.put("systems/disable", body).await?;
        decode_resource(response, "System", None)
    }

    /// Revokes several systems in one call.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or an error status.
    pub async fn revoke_many(&self, system_ids: &[&str]) -> Result<BulkActionResult, ApiError> {
        let body = serde_json::json!({ "systemIds": system_ids });
        let response = self.api.post("systems/revoke", body).await?;
        decode_resource(response, "System", None)
    }
}
