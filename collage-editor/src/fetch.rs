//! Background byte retrieval.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Error retrieving background bytes.
///
/// Retrieval failures are never editor faults: the state machine downgrades
/// them to "no background image" and clears the in-progress marker.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure, including an expired deadline.
    #[error("background fetch failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("background fetch returned status {0}")]
    Status(StatusCode),
}

impl FetchError {
    /// Whether this failure was the request deadline expiring.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Http(err) => err.is_timeout(),
            Self::Status(_) => false,
        }
    }
}

/// Retrieves the bytes behind a background URL.
///
/// The controller owns one fetcher for the life of the document and spawns
/// one task per retrieval, so implementations are shared across tasks.
#[async_trait]
pub trait BackgroundFetcher: Send + Sync {
    /// Fetch the raw bytes behind `url`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status, or an
    /// expired deadline.
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchError>;
}

/// HTTP fetcher backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher with no request deadline.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_client(None)
    }

    /// Create a fetcher whose requests give up after `deadline`.
    ///
    /// Expiry surfaces as an ordinary fetch failure; there is no separate
    /// cancellation path.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn with_deadline(deadline: Duration) -> Result<Self, FetchError> {
        Self::with_client(Some(deadline))
    }

    fn with_client(deadline: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = Client::builder().user_agent("collage-editor (emoji-collage)");
        if let Some(deadline) = deadline {
            builder = builder.timeout(deadline);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl BackgroundFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        debug!(%url, "fetching background bytes");
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        let bytes = response.bytes().await?;
        debug!(%url, len = bytes.len(), "background bytes received");
        Ok(bytes.to_vec())
    }
}
