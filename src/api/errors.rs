//! Resource-level error types for Trellis API operations.
//!
//! This module contains error types for resource operations, extending the
//! transport-level [`HttpError`](crate::clients::HttpError) with semantic
//! variants like `NotFound` and `ValidationFailed`.
//!
//! # Error Handling
//!
//! The SDK maps HTTP status codes to semantic error variants:
//!
//! - **404**: [`ApiError::NotFound`] - Resource doesn't exist
//! - **422**: [`ApiError::ValidationFailed`] - Validation errors from the API
//! - **Other non-2xx**: [`ApiError::Http`] - Wrapped HTTP error
//!
//! # Example
//!
//! ```rust,ignore
//! use trellis_api::api::ApiError;
//!
//! match client.policies().get(123).await {
//!     Ok(policy) => println!("Found: {}", policy.description),
//!     Err(ApiError::NotFound { resource, id }) => {
//!         println!("{resource} with id {id} not found");
//!     }
//!     Err(ApiError::ValidationFailed { errors, .. }) => {
//!         for (field, messages) in errors {
//!             println!("{field}: {messages:?}");
//!         }
//!     }
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use std::collections::HashMap;

use thiserror::Error;

use crate::clients::{HttpError, HttpResponseError};

/// Error type for Trellis resource operations.
///
/// Maps HTTP error codes to meaningful variants while preserving the
/// request ID for debugging.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The resource was not found (HTTP 404).
    #[error("{resource} with id {id} not found")]
    NotFound {
        /// The type name of the resource (e.g., "Policy", "DnsZone").
        resource: &'static str,
        /// The ID that was requested.
        id: String,
    },

    /// Validation failed for the resource (HTTP 422).
    ///
    /// Returned when the API rejects a create or update request due to
    /// validation errors.
    #[error("Validation failed: {errors:?}")]
    ValidationFailed {
        /// A map of field names to error messages.
        errors: HashMap<String, Vec<String>>,
        /// The request ID for debugging (from X-Request-Id header).
        request_id: Option<String>,
    },

    /// A request parameter struct could not be serialised.
    #[error("Failed to serialize request parameters: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A 2xx response body did not match the expected representation.
    #[error("Failed to deserialize {resource} response: {source}")]
    Deserialize {
        /// The type name of the resource being decoded.
        resource: &'static str,
        /// The underlying deserialisation error.
        source: serde_json::Error,
    },

    /// An HTTP-level error occurred.
    ///
    /// Wraps [`HttpError`] for errors that don't map to a specific
    /// resource error type.
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl ApiError {
    /// Creates an `ApiError` from an HTTP response status code.
    ///
    /// Maps status codes to semantic error variants:
    /// - 404 -> `NotFound`
    /// - 422 -> `ValidationFailed` (parsing errors from body)
    /// - Other -> `Http`
    ///
    /// # Example
    ///
    /// ```rust
    /// use trellis_api::api::ApiError;
    /// use serde_json::json;
    ///
    /// let error = ApiError::from_response(
    ///     404,
    ///     &json!({"error": "Not found"}),
    ///     "Policy",
    ///     Some("123"),
    ///     Some("req-123"),
    /// );
    /// assert!(matches!(error, ApiError::NotFound { .. }));
    /// ```
    #[must_use]
    pub fn from_response(
        code: u16,
        body: &serde_json::Value,
        resource: &'static str,
        id: Option<&str>,
        request_id: Option<&str>,
    ) -> Self {
        match code {
            404 => Self::NotFound {
                resource,
                id: id.unwrap_or("unknown").to_string(),
            },
            422 => Self::ValidationFailed {
                errors: parse_validation_errors(body),
                request_id: request_id.map(ToString::to_string),
            },
            _ => Self::Http(HttpError::Response(HttpResponseError {
                code,
                message: body.to_string(),
                request_id: request_id.map(ToString::to_string),
            })),
        }
    }

    /// Returns the request ID if available.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::ValidationFailed { request_id, .. } => request_id.as_deref(),
            Self::Http(HttpError::Response(e)) => e.request_id.as_deref(),
            _ => None,
        }
    }
}

/// Parses validation errors from an API response body.
///
/// Trellis returns validation errors in the format:
/// ```json
/// {
///   "errors": {
///     "description": ["must not be blank"],
///     "senderTags": ["unknown tag 'buid-agents'"]
///   }
/// }
/// ```
///
/// Or as a flat array:
/// ```json
/// {
///   "errors": ["Description must not be blank"]
/// }
/// ```
fn parse_validation_errors(body: &serde_json::Value) -> HashMap<String, Vec<String>> {
    let mut result = HashMap::new();

    if let Some(errors) = body.get("errors") {
        match errors {
            serde_json::Value::Object(map) => {
                for (field, messages) in map {
                    let msgs: Vec<String> = match messages {
                        serde_json::Value::Array(arr) => arr
                            .iter()
                            .filter_map(|v| v.as_str().map(ToString::to_string))
                            .collect(),
                        serde_json::Value::String(s) => vec![s.clone()],
                        _ => vec![messages.to_string()],
                    };
                    result.insert(field.clone(), msgs);
                }
            }
            serde_json::Value::Array(arr) => {
                let msgs: Vec<String> = arr
                    .iter()
                    .filter_map(|v| v.as_str().map(ToString::to_string))
                    .collect();
                if !msgs.is_empty() {
                    result.insert("base".to_string(), msgs);
                }
            }
            serde_json::Value::String(s) => {
                result.insert("base".to_string(), vec![s.clone()]);
            }
            _ => {}
        }
    }

    result
}

// Verify ApiError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiError>();
};
