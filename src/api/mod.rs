//! Org-scoped API client and resource infrastructure.
//!
//! This module provides:
//!
//! - **[`ApiClient`]**: the org-scoped client every resource client borrows.
//!   All routes are relative to `/org/{org_id}`.
//! - **[`PatchBuilder`] / [`PatchDocument`] / [`Field`] / [`PatchModel`]**:
//!   the fluent partial-update machinery (see [`patch`]).
//! - **[`PaginatedResponse`]**: the envelope returned by list endpoints.
//! - **[`ApiError`]**: semantic errors for resource operations.
//!
//! # Example
//!
//! ```rust,ignore
//! use trellis_api::{TrellisConfig, AccessToken, OrgId, ApiClient};
//! use trellis_api::resources::policy::PolicyPatch;
//!
//! let config = TrellisConfig::builder()
//!     .access_token(AccessToken::new("tk-live-abc123")?)
//!     .build()?;
//! let client = ApiClient::new(&config, OrgId::new("acme")?);
//!
//! // List, then patch one policy.
//! let policies = client.policies().list(None).await?;
//! let updated = client
//!     .policies()
//!     .update(policies[0].id)
//!     .set(PolicyPatch::IS_ENABLED, false)?
//!     .apply()
//!     .await?;
//! ```

mod errors;
pub mod patch;
mod pagination;
mod query;

pub use errors::ApiError;
pub use pagination::{PaginatedResponse, PaginationMetadata};
pub use patch::{Field, PatchBuilder, PatchDocument, PatchError, PatchModel};
pub use query::serialize_to_query;

use std::collections::HashMap;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::clients::{DataType, HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse};
use crate::config::{OrgId, TrellisConfig};
use crate::resources::dns_record::DnsRecordsClient;
use crate::resources::dns_zone::DnsZonesClient;
use crate::resources::enrolment_key::EnrolmentKeysClient;
use crate::resources::organisation::OrganisationClient;
use crate::resources::policy::PoliciesClient;
use crate::resources::system::SystemsClient;
use crate::resources::tag::TagsClient;
use crate::resources::trust_requirement::TrustRequirementsClient;

/// Client for one Trellis organisation.
///
/// Owns the HTTP transport and the organisation scope; resource clients
/// ([`PoliciesClient`], [`DnsZonesClient`], ...) borrow it and add the
/// per-resource routes on top.
///
/// # Thread Safety
///
/// `ApiClient` is `Send + Sync` and can be shared across async tasks.
/// Create one client per organisation and reuse it; the underlying
/// connection pool is managed by `reqwest`.
#[derive(Debug)]
pub struct ApiClient {
    http_client: HttpClient,
    org_id: OrgId,
}

// Verify ApiClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiClient>();
};

impl ApiClient {
    /// Creates a new client scoped to the given organisation.
    #[must_use]
    pub fn new(config: &TrellisConfig, org_id: OrgId) -> Self {
        let base_path = format!("/org/{org_id}");
        let http_client = HttpClient::new(base_path, config);
        Self {
            http_client,
            org_id,
        }
    }

    /// Returns the organisation this client is scoped to.
    #[must_use]
    pub const fn org_id(&self) -> &OrgId {
        &self.org_id
    }

    /// Sends a GET request to a route relative to `/org/{org_id}`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for request validation or network failures.
    /// Any status code is returned as a response; semantic mapping is the
    /// caller's job.
    pub async fn get(
        &self,
        route: &str,
        query: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, HttpError> {
        let mut builder = HttpRequest::builder(HttpMethod::Get, route);
        if let Some(query) = query {
            builder = builder.query(query);
        }
        self.http_client.request(builder.build()?).await
    }

    /// Sends a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for request validation or network failures.
    pub async fn post(
        &self,
        route: &str,
        body: serde_json::Value,
    ) -> Result<HttpResponse, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Post, route)
            .body(body)
            .body_type(DataType::Json)
            .build()?;
        self.http_client.request(request).await
    }

    /// Sends a PUT request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for request validation or network failures.
    pub async fn put(
        &self,
        route: &str,
        body: serde_json::Value,
    ) -> Result<HttpResponse, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Put, route)
            .body(body)
            .body_type(DataType::Json)
            .build()?;
        self.http_client.request(request).await
    }

    /// Sends a PATCH request with a JSON body.
    ///
    /// This is the transport primitive behind [`PatchBuilder::apply`]:
    /// one call, one round trip, status and body handed back untouched.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for request validation or network failures.
    pub async fn patch(
        &self,
        route: &str,
        body: serde_json::Value,
        timeout: Option<Duration>,
    ) -> Result<HttpResponse, HttpError> {
        let mut builder = HttpRequest::builder(HttpMethod::Patch, route)
            .body(body)
            .body_type(DataType::Json);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        self.http_client.request(builder.build()?).await
    }

    /// Sends a DELETE request.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for request validation or network failures.
    pub async fn delete(&self, route: &str) -> Result<HttpResponse, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Delete, route).build()?;
        self.http_client.request(request).await
    }

    /// Creates a [`PatchBuilder`] bound to the given route.
    ///
    /// Resource clients call this once per `update(id)` to hand the
    /// caller a fluent patch entry point; it is public so that custom or
    /// not-yet-wrapped endpoints can be patched the same way.
    #[must_use]
    pub fn patch_builder<M, R>(&self, route: impl Into<String>) -> PatchBuilder<'_, M, R>
    where
        M: PatchModel,
        R: DeserializeOwned,
    {
        PatchBuilder::new(self, route)
    }

    /// Access to the organisation resource.
    #[must_use]
    pub const fn organisation(&self) -> OrganisationClient<'_> {
        OrganisationClient::new(self)
    }

    /// Access to DNS zones.
    #[must_use]
    pub const fn dns_zones(&self) -> DnsZonesClient<'_> {
        DnsZonesClient::new(self)
    }

    /// Access to DNS records.
    #[must_use]
    pub const fn dns_records(&self) -> DnsRecordsClient<'_> {
        DnsRecordsClient::new(self)
    }

    /// Access to enrolment keys.
    #[must_use]
    pub const fn enrolment_keys(&self) -> EnrolmentKeysClient<'_> {
        EnrolmentKeysClient::new(self)
    }

    /// Access to policies.
    #[must_use]
    pub const fn policies(&self) -> PoliciesClient<'_> {
        PoliciesClient::new(self)
    }

    /// Access to tags.
    #[must_use]
    pub const fn tags(&self) -> TagsClient<'_> {
        TagsClient::new(self)
    }

    /// Access to trust requirements.
    #[must_use]
    pub const fn trust_requirements(&self) -> TrustRequirementsClient<'_> {
        TrustRequirementsClient::new(self)
    }

    /// Access to enrolled systems.
    #[must_use]
    pub const fn systems(&self) -> SystemsClient<'_> {
        SystemsClient::new(self)
    }
}

/// Decodes a response into a single resource representation.
///
/// Maps non-2xx statuses through [`ApiError::from_response`] and decodes
/// the body as the top-level representation of the resource.
pub(crate) fn decode_resource<R: DeserializeOwned>(
    response: HttpResponse,
    resource: &'static str,
    id: Option<&str>,
) -> Result<R, ApiError> {
    if !response.is_ok() {
        return Err(ApiError::from_response(
            response.code,
            &response.body,
            resource,
            id,
            response.request_id(),
        ));
    }

    serde_json::from_value(response.body).map_err(|source| ApiError::Deserialize {
        resource,
        source,
    })
}

/// Decodes a response into a page of resources.
pub(crate) fn decode_page<T: DeserializeOwned>(
    response: HttpResponse,
    resource: &'static str,
) -> Result<PaginatedResponse<T>, ApiError> {
    decode_resource(response, resource, None)
}
