use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

pub mod types;

pub use types::{FriendRequest, FriendResponse, Region};

use crate::config::ApiConfig;
use crate::errors::ApiError;
use crate::observability::telemetry::redact_secrets;

/// Trait abstraction over the friend-request endpoint, enabling test mocking.
#[async_trait]
pub trait FriendClient: Send + Sync {
    /// Send one friend request and decode the server's JSON reply.
    ///
    /// Any `Err` is a transport or protocol failure; an application-level
    /// rejection comes back as `Ok` with `success == false`.
    async fn send_friend_request(
        &self,
        request: &FriendRequest,
    ) -> std::result::Result<FriendResponse, ApiError>;
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Network(e.without_url().to_string())
        }
    }
}

/// HTTP client for the friend-request endpoint
pub struct HttpFriendClient {
    client: Client,
    endpoint: Url,
}

impl std::fmt::Debug for HttpFriendClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpFriendClient")
            .field("endpoint", &self.endpoint.as_str())
            .finish()
    }
}

impl HttpFriendClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint)
            .map_err(|e| ApiError::InvalidEndpoint(format!("{}: {}", config.endpoint, e)))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ApiError::InvalidEndpoint(format!(
                "{}: scheme must be http or https",
                config.endpoint
            ))
            .into());
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Endpoint with the request's fields appended as query parameters
    pub fn request_url(&self, request: &FriendRequest) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().extend_pairs(request.query_pairs());
        url
    }
}

#[async_trait]
impl FriendClient for HttpFriendClient {
    async fn send_friend_request(
        &self,
        request: &FriendRequest,
    ) -> std::result::Result<FriendResponse, ApiError> {
        let url = self.request_url(request);
        debug!(url = %redact_secrets(url.as_str()), "Sending friend request");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        // The body is authoritative; a non-2xx status with a well-formed body
        // is still an application-level answer.
        serde_json::from_str::<FriendResponse>(&body).map_err(|e| {
            warn!(status = status.as_u16(), error = %e, "Unparseable friend request response");
            ApiError::Parse(e.to_string())
        })
    }
}
