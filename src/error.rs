//! Error types for the Trellis API SDK.
//!
//! This module contains error types used throughout the SDK for configuration
//! and validation errors.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use trellis_api::{AccessToken, ConfigError};
//!
//! let result = AccessToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyAccessToken)));
//! ```

use thiserror::Error;

/// Errors that can occur during SDK configuration.
///
/// This enum represents all possible errors that can occur when creating
/// or validating configuration types. Each variant provides a clear,
/// actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Access token cannot be empty.
    #[error("Access token cannot be empty. Please provide a valid Trellis API token.")]
    EmptyAccessToken,

    /// Access token contains whitespace.
    #[error("Access token must not contain whitespace.")]
    AccessTokenContainsWhitespace,

    /// Organisation ID is invalid.
    #[error("Invalid organisation id '{org_id}'. Expected a non-empty identifier of letters, digits and dashes.")]
    InvalidOrgId {
        /// The invalid organisation ID that was provided.
        org_id: String,
    },

    /// API host URL is invalid.
    #[error("Invalid API host '{host}'. Expected an absolute http(s) URL, e.g. 'https://api.trellis.network'.")]
    InvalidApiHost {
        /// The invalid host that was provided.
        host: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}
