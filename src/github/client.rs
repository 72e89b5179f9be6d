//! GitHub API client.

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;

use crate::error::{HubmanError, Result};

/// The authenticated account, as returned by `GET /user`.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub login: String,
    pub name: Option<String>,
}

/// Client for interacting with the GitHub API.
#[derive(Clone)]
pub struct GitHubClient {
    pub(crate) token: String,
    pub(crate) base_url: String,
    pub(crate) client: Client,
}

impl GitHubClient {
    /// Create a new GitHub client with the given token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: "https://api.github.com".into(),
            client: Client::new(),
        }
    }

    /// Create a client against a custom API base URL (GitHub Enterprise).
    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        let mut url = base_url.into();
        // Remove trailing slash if present
        if url.ends_with('/') {
            url.pop();
        }
        Self {
            token: token.into(),
            base_url: url,
            client: Client::new(),
        }
    }

    /// Fetch the account the token belongs to.
    ///
    /// Used once at startup; a failure here is fatal.
    pub fn authenticated_user(&self) -> Result<User> {
        self.get("/user").map_err(|e| HubmanError::Auth {
            message: e.to_string(),
        })
    }

    /// Create an authenticated URL for cloning.
    pub(crate) fn authenticated_url(&self, url: &str) -> String {
        crate::vcs::url::with_token(url, &self.token)
    }

    /// Default headers for API requests.
    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.token)).map_err(|_| {
            HubmanError::Auth {
                message: "token contains characters not valid in a header".into(),
            }
        })?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("hubman"));
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );
        Ok(headers)
    }

    fn send_json<T: serde::de::DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.headers(self.headers()?).send()?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(HubmanError::GitHub {
                message: format!("API request failed ({status}): {body}"),
            });
        }

        response.json().map_err(|e| HubmanError::GitHub {
            message: format!("Failed to parse response: {e}"),
        })
    }

    fn send_unit(&self, request: RequestBuilder) -> Result<()> {
        let response = request.headers(self.headers()?).send()?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(HubmanError::GitHub {
                message: format!("API request failed ({status}): {body}"),
            });
        }
        Ok(())
    }

    /// Make a GET request to the GitHub API.
    pub(crate) fn get<T: serde::de::DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        self.send_json(self.client.get(&url))
    }

    /// GET that maps a 404 to `None` instead of an error.
    pub(crate) fn get_optional<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
    ) -> Result<Option<T>> {
        let url = format!("{}{}", self.base_url, endpoint);
        let response = self.client.get(&url).headers(self.headers()?).send()?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(HubmanError::GitHub {
                message: format!("API request failed ({status}): {body}"),
            });
        }

        response.json().map(Some).map_err(|e| HubmanError::GitHub {
            message: format!("Failed to parse response: {e}"),
        })
    }

    /// Make a POST request to the GitHub API.
    pub(crate) fn post<T: serde::de::DeserializeOwned, B: serde::Serialize>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        self.send_json(self.client.post(&url).json(body))
    }

    /// Make a PATCH request to the GitHub API.
    pub(crate) fn patch<T: serde::de::DeserializeOwned, B: serde::Serialize>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        self.send_json(self.client.patch(&url).json(body))
    }

    /// Make a PUT request to the GitHub API.
    pub(crate) fn put<T: serde::de::DeserializeOwned, B: serde::Serialize>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        self.send_json(self.client.put(&url).json(body))
    }

    /// Make a DELETE request with no body.
    pub(crate) fn delete(&self, endpoint: &str) -> Result<()> {
        let url = format!("{}{}", self.base_url, endpoint);
        self.send_unit(self.client.delete(&url))
    }

    /// Make a DELETE request carrying a JSON body (contents API).
    pub(crate) fn delete_with_body<B: serde::Serialize>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<()> {
        let url = format!("{}{}", self.base_url, endpoint);
        self.send_unit(self.client.delete(&url).json(body))
    }

    /// Get the token for use in clone URLs.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
