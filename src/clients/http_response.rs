//! HTTP response types for the Trellis API SDK.
//!
//! This module provides the [`HttpResponse`] type for accessing parsed
//! API response data.

use std::collections::HashMap;

/// An HTTP response from the Trellis API.
///
/// Contains the status code, headers and the body parsed as JSON. An
/// empty body is represented as [`serde_json::Value::Null`] so that
/// callers expecting a representation can distinguish "no body" from an
/// empty object.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body. `Null` when the body was empty or not JSON.
    pub body: serde_json::Value,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub const fn new(
        code: u16,
        headers: HashMap<String, Vec<String>>,
        body: serde_json::Value,
    ) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the `X-Request-Id` header value, if present.
    ///
    /// This ID is useful for debugging and should be included in error reports.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.headers
            .get("x-request-id")
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_ok_returns_true_for_2xx() {
        for code in 200..=299 {
            let response = HttpResponse::new(code, HashMap::new(), json!({}));
            assert!(response.is_ok(), "Expected is_ok() for code {code}");
        }
    }

    #[test]
    fn test_is_ok_returns_false_for_4xx_and_5xx() {
        for code in [400, 404, 422, 429, 500, 503] {
            let response = HttpResponse::new(code, HashMap::new(), json!({}));
            assert!(!response.is_ok(), "Expected !is_ok() for code {code}");
        }
    }

    #[test]
    fn test_request_id_extraction() {
        let mut headers = HashMap::new();
        headers.insert("x-request-id".to_string(), vec!["abc-123-xyz".to_string()]);

        let response = HttpResponse::new(200, headers, json!({}));
        assert_eq!(response.request_id(), Some("abc-123-xyz"));
    }

    #[test]
    fn test_request_id_absent() {
        let response = HttpResponse::new(200, HashMap::new(), json!({}));
        assert!(response.request_id().is_none());
    }

    #[test]
    fn test_null_body_distinguishable_from_empty_object() {
        let empty = HttpResponse::new(200, HashMap::new(), serde_json::Value::Null);
        assert!(empty.body.is_null());

        let object = HttpResponse::new(200, HashMap::new(), json!({}));
        assert!(!object.body.is_null());
    }
}
