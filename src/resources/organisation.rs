//! Organisation resource implementation.
//!
//! The organisation is a singleton from the client's point of view: the
//! [`ApiClient`](crate::api::ApiClient) is already scoped to one
//! organisation, so the routes here address `/org/{org_id}` itself with
//! no further id segment.
//!
//! # Example
//!
//! ```rust,ignore
//! use trellis_api::resources::organisation::OrganisationPatch;
//!
//! let org = client.organisation().get().await?;
//! println!("{} ({} of {} systems enrolled)", org.name, org.enrolled_systems, org.max_systems);
//!
//! let org = client
//!     .organisation()
//!     .update()
//!     .set(OrganisationPatch::WEBSITE, "https://acme.example".to_string())?
//!     .apply()
//!     .await?;
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{decode_resource, ApiClient, ApiError, Field, PatchBuilder, PatchModel};

/// An organisation: the account-level container for every other resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Organisation {
    /// The organisation's unique identifier.
    pub id: String,
    /// The display name of the organisation.
    pub name: String,
    /// When the organisation was created.
    pub created: DateTime<Utc>,
    /// The subscription plan the organisation is on.
    pub plan: String,
    /// The organisation's website, if set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// A contact phone number, if set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// A contact email address, if set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    /// The maximum number of systems the plan allows.
    pub max_systems: u32,
    /// The number of currently enrolled systems.
    pub enrolled_systems: u32,
}

/// Fields that can be modified on an organisation.
pub struct OrganisationPatch;

impl PatchModel for OrganisationPatch {}

impl OrganisationPatch {
    /// The organisation's website URL.
    pub const WEBSITE: Field<Self, String> = Field::new("website");
    /// A contact phone number.
    pub const PHONE: Field<Self, String> = Field::new("phone");
    /// A contact email address.
    pub const CONTACT_EMAIL: Field<Self, String> = Field::new("contactEmail");
}

/// Client for the organisation resource.
#[derive(Debug, Clone, Copy)]
pub struct OrganisationClient<'c> {
    api: &'c ApiClient,
}

impl<'c> OrganisationClient<'c> {
    pub(crate) const fn new(api: &'c ApiClient) -> Self {
        Self { api }
    }

    /// Fetches the organisation the client is scoped to.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or an error status.
    pub async fn get(&self) -> Result<Organisation, ApiError> {
        let response = self.api.get("", None).await?;
        decode_resource(response, "Organisation", Some(self.api.org_id().as_ref()))
    }

    /// Starts a partial update of the organisation.
    ///
    /// Returns a fresh [`PatchBuilder`]; nothing is sent until
    /// [`apply`](PatchBuilder::apply) is called.
    #[must_use]
    pub fn update(&self) -> PatchBuilder<'c, OrganisationPatch, Organisation> {
        self.api.patch_builder("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_organisation_deserialization() {
        let json = r#"{
            "id": "acme",
            "name": "Acme Corp",
            "created": "2024-03-01T09:00:00Z",
            "plan": "business",
            "website": "https://acme.example",
            "maxSystems": 250,
            "enrolledSystems": 87
        }"#;

        let org: Organisation = serde_json::from_str(json).unwrap();
        assert_eq!(org.id, "acme");
        assert_eq!(org.name, "Acme Corp");
        assert_eq!(org.plan, "business");
        assert_eq!(org.website, Some("https://acme.example".to_string()));
        assert!(org.phone.is_none());
        assert_eq!(org.max_systems, 250);
        assert_eq!(org.enrolled_systems, 87);
    }

    #[test]
    fn test_patch_fields_use_camel_case_wire_names() {
        assert_eq!(OrganisationPatch::WEBSITE.name(), "website");
        assert_eq!(OrganisationPatch::PHONE.name(), "phone");
        assert_eq!(OrganisationPatch::CONTACT_EMAIL.name(), "contactEmail");
    }

    #[test]
    fn test_optional_fields_omitted_when_absent() {
        let org = Organisation {
            id: "acme".to_string(),
            name: "Acme Corp".to_string(),
            created: DateTime::parse_from_rfc3339("2024-03-01T09:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
            plan: "starter".to_string(),
            website: None,
            phone: None,
            contact_email: None,
            max_systems: 10,
            enrolled_systems: 2,
        };

        let value = serde_json::to_value(&org).unwrap();
        assert!(value.get("website").is_none());
        assert!(value.get("phone").is_none());
        assert!(value.get("contactEmail").is_none());
    }
}
