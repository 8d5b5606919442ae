//! HTTP client for Trellis API communication.
//!
//! This module provides the [`HttpClient`] type for making authenticated
//! requests to the Trellis API.

use std::collections::HashMap;

use crate::clients::errors::HttpError;
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::TrellisConfig;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to the Trellis API.
///
/// The client handles:
/// - Base URI construction from the configured API host
/// - Default headers including User-Agent and the bearer token
/// - Response body parsing
///
/// Each request is sent exactly once; retry policy, if wanted, belongs to
/// the caller.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use trellis_api::{TrellisConfig, AccessToken};
/// use trellis_api::clients::{HttpClient, HttpRequest, HttpMethod};
///
/// let config = TrellisConfig::builder()
///     .access_token(AccessToken::new("tk-live-abc123").unwrap())
///     .build()
///     .unwrap();
///
/// let client = HttpClient::new("/org/acme", &config);
///
/// let request = HttpRequest::builder(HttpMethod::Get, "policies")
///     .build()
///     .unwrap();
///
/// let response = client.request(request).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URI (e.g., `https://api.trellis.network`).
    base_uri: String,
    /// Base path (e.g., `/org/acme`).
    base_path: String,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client for the given configuration.
    ///
    /// # Arguments
    ///
    /// * `base_path` - The base path prepended to every request path
    ///   (e.g., `/org/acme`)
    /// * `config` - Configuration providing host, token and timeout
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization
    /// failure).
    #[must_use]
    pub fn new(base_path: impl Into<String>, config: &TrellisConfig) -> Self {
        let base_path = base_path.into();
        let base_uri = config.host().as_ref().to_string();

        // Build User-Agent header
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Trellis API Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", config.access_token().as_ref()),
        );

        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().expect("Failed to create HTTP client");

        Self {
            client,
            base_uri,
            base_path,
            default_headers,
        }
    }

    /// Returns the base URI for this client.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the base path for this client.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends an HTTP request to the Trellis API.
    ///
    /// The request is validated, sent exactly once, and the response body
    /// parsed as JSON. Any status code is returned as a successful
    /// [`HttpResponse`]; mapping non-2xx statuses to errors is left to the
    /// layer that knows the resource being addressed.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - A network error occurs (`Network`), including timeouts
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let separator = if request.path.is_empty() { "" } else { "/" };
        let url = format!(
            "{}{}{separator}{}",
            self.base_uri, self.base_path, request.path
        );

        // Merge headers
        let mut headers = self.default_headers.clone();
        if let Some(body_type) = &request.body_type {
            headers.insert(
                "Content-Type".to_string(),
                body_type.as_content_type().to_string(),
            );
        }
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                headers.insert(key.clone(), value.clone());
            }
        }

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
            HttpMethod::Patch => self.client.patch(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        for (key, value) in &headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(query) = &request.query {
            req_builder = req_builder.query(query);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.to_string());
        }

        if let Some(timeout) = request.timeout {
            req_builder = req_builder.timeout(timeout);
        }

        tracing::debug!(
            method = %request.http_method,
            path = %request.path,
            "Sending request to Trellis API"
        );

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await.unwrap_or_default();

        // An empty or non-JSON body parses to Null so that contract checks
        // downstream can tell "no representation" apart from "{}".
        let body = if body_text.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_str(&body_text).unwrap_or(serde_json::Value::Null)
        };

        let response = HttpResponse::new(code, res_headers, body);

        if !response.is_ok() {
            tracing::warn!(
                status = code,
                request_id = response.request_id().unwrap_or("-"),
                path = %request.path,
                "Trellis API returned an error status"
            );
        }

        Ok(response)
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AccessToken;

    fn create_test_config() -> TrellisConfig {
        TrellisConfig::builder()
            .access_token(AccessToken::new("tk-test-token").unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_client_construction_with_config() {
        let config = create_test_config();
        let client = HttpClient::new("/org/acme", &config);

        assert_eq!(client.base_uri(), "https://api.trellis.network");
        assert_eq!(client.base_path(), "/org/acme");
    }

    #[test]
    fn test_user_agent_header_format() {
        let config = create_test_config();
        let client = HttpClient::new("/org/acme", &config);

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.contains("Trellis API Library v"));
        assert!(user_agent.contains("Rust"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let config = TrellisConfig::builder()
            .access_token(AccessToken::new("tk-test-token").unwrap())
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap();

        let client = HttpClient::new("/org/acme", &config);

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("MyApp/1.0 | "));
        assert!(user_agent.contains("Trellis API Library"));
    }

    #[test]
    fn test_bearer_token_header_injection() {
        let config = create_test_config();
        let client = HttpClient::new("/org/acme", &config);

        assert_eq!(
            client.default_headers().get("Authorization"),
            Some(&"Bearer tk-test-token".to_string())
        );
    }

    #[test]
    fn test_accept_header_is_json() {
        let config = create_test_config();
        let client = HttpClient::new("/org/acme", &config);

        assert_eq!(
            client.default_headers().get("Accept"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpClient>();
    }
}
