//! Releases API client
//!
//! One `ApiClient` serves one repository with one credential for its whole
//! lifetime. Every request goes through [`ApiClient::request`], which
//! attaches the authorization and accept headers; the timeout is set once
//! on the underlying `reqwest::Client`.
//!
//! Operations never return `Err` for an unsuccessful HTTP status. Those
//! come back as `Outcome::Failed`; `Err` means the exchange itself broke
//! (timeout, DNS, connection reset, undecodable success body).

use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::config::ClientConfig;
use crate::domain::ApiResponse;
use crate::error::ReleaseError;

const GITHUB_JSON: &str = "application/vnd.github+json";

/// Client for the releases API of a single repository
pub struct ApiClient {
    http: Client,
    config: ClientConfig,
}

impl ApiClient {
    /// Create a new client
    pub fn new(config: ClientConfig) -> Result<Self, ReleaseError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("release-keeper/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, config })
    }

    /// Get the configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn releases_url(&self) -> String {
        self.config.releases_url()
    }

    pub(crate) fn release_url(&self, release_id: u64) -> String {
        format!("{}/{}", self.releases_url(), release_id)
    }

    pub(crate) fn tag_url(&self, tag: &str) -> String {
        format!("{}/tags/{}", self.releases_url(), urlencoding::encode(tag))
    }

    pub(crate) fn asset_url(&self, asset_id: u64) -> String {
        format!("{}/assets/{}", self.releases_url(), asset_id)
    }

    /// Request with the default headers every call carries
    pub(crate) fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .header(AUTHORIZATION, self.config.credential.header_value())
            .header(ACCEPT, GITHUB_JSON)
    }

    /// Send and read the whole body
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<ApiResponse, ReleaseError> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let url = response.url().to_string();
        let body = response.text().await?;
        debug!(status, url = %url, "API response");
        Ok(ApiResponse::new(status, body))
    }
}

/// Decode a success body
pub(crate) fn decode<T: DeserializeOwned>(
    response: &ApiResponse,
    what: &str,
) -> Result<T, ReleaseError> {
    response.json().map_err(|source| ReleaseError::Decode {
        what: what.to_string(),
        source,
    })
}

/// Log an unexpected status and its decoded message
pub(crate) fn log_rejection(response: &ApiResponse, summary: &str) {
    error!("HTTP status code: {}", response.status);
    if response.json::<serde_json::Value>().is_err() {
        debug!("Response content is not json data");
    }
    error!("{}", response.error_message());
    error!("{}", summary);
}
