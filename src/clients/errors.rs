//! HTTP-specific error types for the Trellis API SDK.
//!
//! This module contains error types for HTTP operations, covering
//! response errors, request validation failures and network failures.
//!
//! # Error Handling
//!
//! The SDK uses specific error types for different failure scenarios:
//!
//! - [`HttpResponseError`]: Non-2xx HTTP responses from the API
//! - [`InvalidHttpRequestError`]: When a request fails validation before sending
//! - [`HttpError`]: Unified error type encompassing all HTTP-related errors
//!
//! # Example
//!
//! ```rust,ignore
//! use trellis_api::clients::HttpError;
//!
//! match client.request(request).await {
//!     Ok(response) => println!("Status: {}", response.code),
//!     Err(HttpError::InvalidRequest(e)) => println!("Invalid request: {e}"),
//!     Err(HttpError::Network(e)) => println!("Network error: {e}"),
//!     Err(HttpError::Response(e)) => println!("API error {}: {}", e.code, e.message),
//! }
//! ```

use thiserror::Error;

/// Error describing a non-successful response from the API.
///
/// Carries the status code and the raw response body so that callers can
/// run their own diagnostics or feed it to a problem-details parser. The
/// SDK core never interprets failure bodies itself.
///
/// # Example
///
/// ```rust
/// use trellis_api::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 404,
///     message: r#"{"error":"Not found"}"#.to_string(),
///     request_id: Some("req-123".to_string()),
/// };
///
/// println!("Status {}: {}", error.code, error.message);
/// ```
#[derive(Debug, Error)]
#[error("HTTP {code}: {message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The raw response body, serialised as JSON text.
    pub message: String,
    /// Reference ID for error reporting (from the X-Request-Id header).
    pub request_id: Option<String>,
}

/// Error returned when an HTTP request fails validation.
///
/// Raised before a request is sent if it fails validation checks, such as
/// a missing body for POST/PUT/PATCH requests or a body provided without
/// a content type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A request body was provided without specifying the body type.
    #[error("Cannot set a body without also setting body_type.")]
    MissingBodyType,

    /// A POST, PUT or PATCH request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },
}

/// Unified error type for all HTTP-related errors.
///
/// This enum provides a single error type for HTTP operations, making it
/// easier to handle errors at API boundaries. Use pattern matching to
/// handle specific error types.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns the HTTP status code, if this error carries a response.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.code),
            _ => None,
        }
    }
}
