//! API base URL type.

use std::fmt;

use url::Url;

use crate::error::{Error, InvalidInputError};

/// A validated base URL for the remote search API.
///
/// URLs must use HTTPS, or HTTP when the host is localhost (used for local
/// mock servers).
///
/// # Example
///
/// ```
/// use userdir_core::ApiUrl;
///
/// let api = ApiUrl::new("https://api.github.com/").unwrap();
/// assert_eq!(api.endpoint("search/users"), "https://api.github.com/search/users");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiUrl(Url);

impl ApiUrl {
    /// Parse and check an API base URL.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::ApiUrl`] if the URL does not parse, is
    /// relative, has no host, or uses plain HTTP for a remote host.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let invalid = |reason: String| InvalidInputError::ApiUrl {
            value: s.to_string(),
            reason,
        };

        let url = Url::parse(s).map_err(|e| invalid(e.to_string()))?;
        if let Some(reason) = Self::rejection(&url) {
            return Err(invalid(reason.to_string()).into());
        }

        Ok(Self(url))
    }

    /// Returns the full URL for an endpoint path below this base.
    pub fn endpoint(&self, path: &str) -> String {
        // Root paths always carry a trailing slash, so trim both sides.
        let base = self.0.as_str().trim_end_matches('/');
        format!("{}/{}", base, path.trim_start_matches('/'))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn rejection(url: &Url) -> Option<&'static str> {
        if url.cannot_be_a_base() {
            return Some("must be an absolute URL");
        }
        let Some(host) = url.host_str() else {
            return Some("must have a host");
        };

        let local = matches!(host, "localhost" | "127.0.0.1" | "[::1]");
        match url.scheme() {
            "https" => None,
            "http" if local => None,
            _ => Some("must use HTTPS (HTTP allowed only for localhost)"),
        }
    }
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_https_url() {
        let api = ApiUrl::new("https://api.github.com").unwrap();
        assert_eq!(api.host(), Some("api.github.com"));
    }

    #[test]
    fn valid_localhost_http() {
        let api = ApiUrl::new("http://127.0.0.1:8080").unwrap();
        assert_eq!(api.host(), Some("127.0.0.1"));
    }

    #[test]
    fn endpoint_construction() {
        let api = ApiUrl::new("https://api.github.com").unwrap();
        assert_eq!(
            api.endpoint("search/users"),
            "https://api.github.com/search/users"
        );
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let api = ApiUrl::new("https://ghe.example.com/api/v3/").unwrap();
        assert_eq!(
            api.endpoint("/search/users"),
            "https://ghe.example.com/api/v3/search/users"
        );
    }

    #[test]
    fn invalid_http_non_localhost() {
        assert!(ApiUrl::new("http://api.github.com").is_err());
    }

    #[test]
    fn invalid_relative_url() {
        assert!(ApiUrl::new("/search/users").is_err());
    }

    #[test]
    fn file_url_rejected() {
        assert!(ApiUrl::new("file:///tmp/api").is_err());
    }

    #[test]
    fn rejection_names_the_reason() {
        let err = ApiUrl::new("http://api.github.com").unwrap_err();
        assert!(err.to_string().contains("HTTPS"));
    }
}
