//! Search API HTTP client implementation.

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, REFERRER_POLICY};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace, warn};

use userdir_core::error::{InvalidInputError, ParseError, RemoteError, TransportError};
use userdir_core::{ApiUrl, Error, Result};

use super::endpoints::{ApiErrorResponse, SEARCH_USERS, SearchUsersQuery, SearchUsersResponse};

/// Default search API base.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

fn transport(err: reqwest::Error) -> Error {
    let err = if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(err)
}

/// Headers attached to every request.
fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("application/json; charset=utf-8"),
    );
    headers.insert(
        HeaderName::from_static("x-permitted-cross-domain-policies"),
        HeaderValue::from_static("none"),
    );
    headers.insert(
        HeaderName::from_static("x-xss-protection"),
        HeaderValue::from_static("1; mode = block"),
    );
    headers.insert(
        HeaderName::from_static("x-content-type-options"),
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(REFERRER_POLICY, HeaderValue::from_static("same-origin"));
    headers
}

/// HTTP client for the user search API.
///
/// Requests are sent once; there is no timeout or retry beyond what the
/// underlying connection does.
#[derive(Debug, Clone)]
pub struct SearchClient {
    client: reqwest::Client,
    api: ApiUrl,
    token: Option<String>,
}

impl SearchClient {
    /// Create a new client for the given API base.
    pub fn new(api: ApiUrl) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("userdir/", env!("CARGO_PKG_VERSION")))
            .default_headers(default_headers())
            .build()
            .map_err(transport)?;

        Ok(Self {
            client,
            api,
            token: None,
        })
    }

    /// Send `token` as a bearer credential on every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if HeaderValue::from_str(&format!("Bearer {}", token)).is_err() {
            return Err(InvalidInputError::Other {
                message: "API token contains characters not allowed in a header".to_string(),
            }
            .into());
        }
        self.token = Some(token);
        Ok(self)
    }

    /// Returns the API base this client is configured for.
    pub fn api(&self) -> &ApiUrl {
        &self.api
    }

    /// Search users matching `query`.
    #[instrument(skip(self), fields(api = %self.api))]
    pub async fn search_users(&self, query: &str) -> Result<SearchUsersResponse> {
        let response: SearchUsersResponse = self
            .query(SEARCH_USERS, &SearchUsersQuery { q: query })
            .await?;

        if response.incomplete_results {
            warn!("Search API returned incomplete results");
        }
        debug!(count = response.items.len(), "Search returned users");

        Ok(response)
    }

    /// Make a GET request against an endpoint.
    async fn query<Q, R>(&self, endpoint: &str, params: &Q) -> Result<R>
    where
        Q: Serialize + std::fmt::Debug,
        R: DeserializeOwned,
    {
        let url = self.api.endpoint(endpoint);
        debug!(endpoint, "API query");
        trace!(?params, "query parameters");

        let mut request = self.client.get(&url).query(params);
        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(transport)?;

        self.handle_response(response).await
    }

    /// Handle a response, parsing the body or error.
    async fn handle_response<R: DeserializeOwned>(&self, response: reqwest::Response) -> Result<R> {
        let status = response.status();
        trace!(status = %status, "API response");

        if status.is_success() {
            let body = response.text().await.map_err(transport)?;
            serde_json::from_str(&body).map_err(|e| {
                ParseError::Response {
                    message: e.to_string(),
                }
                .into()
            })
        } else {
            let error = self.parse_error_response(response).await;
            Err(Error::Remote(error))
        }
    }

    /// Parse an API error response.
    async fn parse_error_response(&self, response: reqwest::Response) -> RemoteError {
        let status = response.status().as_u16();

        match response.json::<ApiErrorResponse>().await {
            Ok(body) => RemoteError::new(status, body.message),
            Err(_) => RemoteError::new(status, None),
        }
    }
}
