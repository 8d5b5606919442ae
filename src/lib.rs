//! # Trellis API Rust SDK
//!
//! A Rust SDK for the Trellis network-management API, providing type-safe
//! configuration, an async HTTP client, and fluent partial updates for
//! every mutable resource.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`TrellisConfig`] and [`TrellisConfigBuilder`]
//! - Validated newtypes for credentials and identifiers
//! - An org-scoped [`ApiClient`] with typed clients for every resource:
//!   organisation, DNS zones and records, enrolment keys, policies, tags,
//!   trust requirements, and systems
//! - Fluent, compile-time-checked partial updates via
//!   [`PatchBuilder`](api::PatchBuilder)
//! - A common pagination envelope for list endpoints
//!
//! ## Quick Start
//!
//! ```rust
//! use trellis_api::{TrellisConfig, AccessToken, OrgId, ApiClient};
//!
//! let config = TrellisConfig::builder()
//!     .access_token(AccessToken::new("tk-live-abc123").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let client = ApiClient::new(&config, OrgId::new("acme").unwrap());
//! ```
//!
//! ## Partial Updates
//!
//! Mutable resources expose an `update` method returning a patch builder.
//! Set only the fields you want to change; everything else is left
//! untouched server-side:
//!
//! ```rust,ignore
//! use trellis_api::resources::policy::PolicyPatch;
//!
//! let policy = client
//!     .policies()
//!     .update(7)
//!     .set(PolicyPatch::DESCRIPTION, "Allow CI agents".to_string())?
//!     .set(PolicyPatch::IS_ENABLED, true)?
//!     .apply()
//!     .await?;
//!
//! assert!(policy.is_enabled);
//! ```
//!
//! Field selectors are constants declared on each resource's patch model,
//! so a misspelled field name is a compile error, not a 422. Values that
//! would serialise to `null` are rejected before anything is sent.
//!
//! ## Listing Resources
//!
//! ```rust,ignore
//! use trellis_api::resources::system::SystemListParams;
//!
//! let systems = client.systems().list(Some(SystemListParams {
//!     search: Some("build".to_string()),
//!     ..Default::default()
//! })).await?;
//!
//! println!("{} of {:?} systems on this page", systems.len(), systems.total());
//! for system in systems.iter() {
//!     println!("- {}", system.system_id);
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with the Tokio async runtime
//! - **One request per call**: The SDK never retries on its own

pub mod api;
pub mod clients;
pub mod config;
pub mod error;
pub mod resources;

// Re-export public types at crate root for convenience
pub use api::{ApiClient, ApiError, PaginatedResponse, PaginationMetadata};
pub use config::{AccessToken, ApiHost, OrgId, TrellisConfig, TrellisConfigBuilder};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    DataType, HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    HttpResponseError, InvalidHttpRequestError,
};

// Re-export the patch machinery for direct use
pub use api::patch::{Field, PatchBuilder, PatchDocument, PatchError, PatchModel};
