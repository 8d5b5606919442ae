//! Configuration types for the Trellis API SDK.
//!
//! This module provides the core configuration types used to initialise
//! the SDK for API communication with Trellis.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`TrellisConfig`]: The main configuration struct holding all SDK settings
//! - [`TrellisConfigBuilder`]: A builder for constructing [`TrellisConfig`] instances
//! - [`AccessToken`]: A validated bearer token newtype with masked debug output
//! - [`OrgId`]: A validated organisation identifier
//! - [`ApiHost`]: A validated API host URL
//!
//! # Example
//!
//! ```rust
//! use trellis_api::{TrellisConfig, AccessToken};
//!
//! let config = TrellisConfig::builder()
//!     .access_token(AccessToken::new("tk-live-abc123").unwrap())
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;

pub use newtypes::{AccessToken, ApiHost, OrgId};

use std::time::Duration;

use crate::error::ConfigError;

/// Configuration for the Trellis API SDK.
///
/// Holds the bearer token, the API host and transport-level settings.
/// Configuration is instance-based and passed explicitly; there is no
/// global state.
///
/// # Thread Safety
///
/// `TrellisConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use trellis_api::{TrellisConfig, AccessToken, ApiHost};
///
/// let config = TrellisConfig::builder()
///     .access_token(AccessToken::new("tk-live-abc123").unwrap())
///     .host(ApiHost::new("https://api.eu.trellis.network").unwrap())
///     .timeout(Duration::from_secs(30))
///     .build()
///     .unwrap();
///
/// assert_eq!(config.host().as_ref(), "https://api.eu.trellis.network");
/// ```
#[derive(Clone, Debug)]
pub struct TrellisConfig {
    access_token: AccessToken,
    host: ApiHost,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
}

impl TrellisConfig {
    /// Creates a new builder for constructing a `TrellisConfig`.
    #[must_use]
    pub fn builder() -> TrellisConfigBuilder {
        TrellisConfigBuilder::new()
    }

    /// Returns the access token.
    #[must_use]
    pub const fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    /// Returns the API host.
    #[must_use]
    pub const fn host(&self) -> &ApiHost {
        &self.host
    }

    /// Returns the User-Agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the default request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

/// Builder for [`TrellisConfig`].
///
/// The only required field is the access token; the host defaults to the
/// public Trellis API.
#[derive(Debug, Default)]
pub struct TrellisConfigBuilder {
    access_token: Option<AccessToken>,
    host: Option<ApiHost>,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
}

impl TrellisConfigBuilder {
    fn new() -> Self {
        Self::default()
    }

    /// Sets the access token (required).
    #[must_use]
    pub fn access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    /// Sets the API host. Defaults to [`ApiHost::DEFAULT`].
    #[must_use]
    pub fn host(mut self, host: ApiHost) -> Self {
        self.host = Some(host);
        self
    }

    /// Sets a prefix for the User-Agent header, e.g. the calling
    /// application's name and version.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the default timeout applied to every request.
    ///
    /// Individual calls can override this; see
    /// [`PatchBuilder::timeout`](crate::api::PatchBuilder::timeout).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if no access token
    /// was provided.
    pub fn build(self) -> Result<TrellisConfig, ConfigError> {
        let access_token = self
            .access_token
            .ok_or(ConfigError::MissingRequiredField {
                field: "access_token",
            })?;

        Ok(TrellisConfig {
            access_token,
            host: self.host.unwrap_or_default(),
            user_agent_prefix: self.user_agent_prefix,
            timeout: self.timeout,
        })
    }
}

// Verify TrellisConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TrellisConfig>();
};
