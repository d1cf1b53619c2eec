//! HTTP transport for page requests.
//!
//! The client only needs one capability from the network: a GET with query
//! parameters that hands back the status and body without judging either.
//! [`HttpGet`] describes that capability and [`HttpClient`] implements it on
//! top of reqwest.

use async_trait::async_trait;
use http::StatusCode;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Status and raw body of a completed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Body decoded as UTF-8, with invalid sequences replaced
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Failure to obtain any response at all
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Network error: {0}")]
pub struct TransportError(pub String);

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError(err.to_string())
    }
}

/// A GET-with-query capability.
///
/// Implementations must return non-2xx responses as `Ok`; only failures that
/// produce no response at all (DNS, connect, timeout) are errors.
#[async_trait]
pub trait HttpGet: Send + Sync + std::fmt::Debug {
    async fn get(
        &self,
        url: &Url,
        query: &[(String, String)],
    ) -> Result<HttpResponse, TransportError>;
}

/// Shared reqwest client with sensible defaults
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Arc<Client>,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, TransportError> {
        Self::with_user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
    }

    /// Create a new HTTP client with a custom user agent
    pub fn with_user_agent(user_agent: &str) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()?;

        Ok(Self {
            client: Arc::new(client),
        })
    }

    /// Create from an existing reqwest Client
    pub fn from_client(client: Arc<Client>) -> Self {
        Self { client }
    }

    /// Get the underlying client
    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl HttpGet for HttpClient {
    async fn get(
        &self,
        url: &Url,
        query: &[(String, String)],
    ) -> Result<HttpResponse, TransportError> {
        let response = self.client.get(url.clone()).query(query).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        Ok(HttpResponse::new(status, body.to_vec()))
    }
}
