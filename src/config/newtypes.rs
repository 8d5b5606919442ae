//! Validated newtypes for SDK configuration values.
//!
//! Each newtype validates its value on construction, so an instance is
//! always well-formed once it exists. [`AccessToken`] additionally masks
//! its value in `Debug` output to keep credentials out of logs.

use std::fmt;

use crate::error::ConfigError;

/// A validated Trellis API access token.
///
/// Tokens are opaque bearer credentials issued from the Trellis portal.
/// The SDK never inspects the token beyond basic well-formedness checks;
/// it is attached verbatim to the `Authorization` header.
///
/// # Debug Masking
///
/// The `Debug` implementation masks the token value so that configuration
/// structs can be logged without leaking credentials.
///
/// # Example
///
/// ```rust
/// use trellis_api::AccessToken;
///
/// let token = AccessToken::new("tk-live-3f9c").unwrap();
/// assert_eq!(token.as_ref(), "tk-live-3f9c");
/// assert_eq!(format!("{token:?}"), "AccessToken(***)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Creates a new access token after validation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAccessToken`] if the token is empty, or
    /// [`ConfigError::AccessTokenContainsWhitespace`] if it contains
    /// whitespace characters.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.is_empty() {
            return Err(ConfigError::EmptyAccessToken);
        }
        if token.chars().any(char::is_whitespace) {
            return Err(ConfigError::AccessTokenContainsWhitespace);
        }
        Ok(Self(token))
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccessToken(***)")
    }
}

/// A validated Trellis organisation identifier.
///
/// Organisation ids appear as the first path segment of every API route
/// (`/org/{org_id}/...`), so they are restricted to URL-safe characters.
///
/// # Example
///
/// ```rust
/// use trellis_api::OrgId;
///
/// let org = OrgId::new("acme").unwrap();
/// assert_eq!(org.as_ref(), "acme");
///
/// assert!(OrgId::new("not/valid").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OrgId(String);

impl OrgId {
    /// Creates a new organisation id after validation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOrgId`] if the id is empty or contains
    /// characters other than ASCII letters, digits and dashes.
    pub fn new(org_id: impl Into<String>) -> Result<Self, ConfigError> {
        let org_id = org_id.into();
        let valid = !org_id.is_empty()
            && org_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-');
        if valid {
            Ok(Self(org_id))
        } else {
            Err(ConfigError::InvalidOrgId { org_id })
        }
    }
}

impl AsRef<str> for OrgId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated API host URL.
///
/// Defaults to the public Trellis API host; overriding it is useful for
/// testing against a local mock server or routing through a proxy. Any
/// trailing slash is stripped so route concatenation stays uniform.
///
/// # Example
///
/// ```rust
/// use trellis_api::ApiHost;
///
/// let host = ApiHost::new("https://api.trellis.network/").unwrap();
/// assert_eq!(host.as_ref(), "https://api.trellis.network");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiHost(String);

impl ApiHost {
    /// The public Trellis API host.
    pub const DEFAULT: &'static str = "https://api.trellis.network";

    /// Creates a new API host after validation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiHost`] if the URL does not start
    /// with `http://` or `https://`, or has no host part.
    pub fn new(host: impl Into<String>) -> Result<Self, ConfigError> {
        let host = host.into();
        let trimmed = host.trim_end_matches('/');
        let rest = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"));
        match rest {
            Some(authority) if !authority.is_empty() => Ok(Self(trimmed.to_string())),
            _ => Err(ConfigError::InvalidApiHost { host }),
        }
    }
}

impl AsRef<str> for ApiHost {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Default for ApiHost {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

// Verify newtypes are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AccessToken>();
    assert_send_sync::<OrgId>();
    assert_send_sync::<ApiHost>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_accepts_non_empty_value() {
        let token = AccessToken::new("tk-live-abc123").unwrap();
        assert_eq!(token.as_ref(), "tk-live-abc123");
    }

    #[test]
    fn test_access_token_rejects_empty_value() {
        assert!(matches!(
            AccessToken::new(""),
            Err(ConfigError::EmptyAccessToken)
        ));
    }

    #[test]
    fn test_access_token_rejects_whitespace() {
        assert!(matches!(
            AccessToken::new("tk live"),
            Err(ConfigError::AccessTokenContainsWhitespace)
        ));
        assert!(matches!(
            AccessToken::new("tk\ttab"),
            Err(ConfigError::AccessTokenContainsWhitespace)
        ));
    }

    #[test]
    fn test_access_token_debug_is_masked() {
        let token = AccessToken::new("super-secret").unwrap();
        let debug = format!("{token:?}");
        assert!(!debug.contains("super-secret"));
        assert_eq!(debug, "AccessToken(***)");
    }

    #[test]
    fn test_org_id_accepts_alphanumeric_and_dashes() {
        assert!(OrgId::new("acme").is_ok());
        assert!(OrgId::new("acme-corp-2").is_ok());
    }

    #[test]
    fn test_org_id_rejects_empty_and_unsafe_characters() {
        assert!(OrgId::new("").is_err());
        assert!(OrgId::new("acme corp").is_err());
        assert!(OrgId::new("acme/corp").is_err());
        assert!(OrgId::new("acme?x=1").is_err());
    }

    #[test]
    fn test_org_id_displays_as_plain_value() {
        let org = OrgId::new("acme").unwrap();
        assert_eq!(org.to_string(), "acme");
    }

    #[test]
    fn test_api_host_accepts_http_and_https() {
        assert!(ApiHost::new("https://api.trellis.network").is_ok());
        assert!(ApiHost::new("http://localhost:9090").is_ok());
    }

    #[test]
    fn test_api_host_strips_trailing_slash() {
        let host = ApiHost::new("https://api.trellis.network///").unwrap();
        assert_eq!(host.as_ref(), "https://api.trellis.network");
    }

    #[test]
    fn test_api_host_rejects_other_schemes_and_bare_hosts() {
        assert!(ApiHost::new("ftp://example.com").is_err());
        assert!(ApiHost::new("api.trellis.network").is_err());
        assert!(ApiHost::new("https://").is_err());
    }

    #[test]
    fn test_api_host_default_is_public_host() {
        assert_eq!(ApiHost::default().as_ref(), "https://api.trellis.network");
    }
}
