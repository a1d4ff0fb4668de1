//! HTTP implementation of the release listing source

use std::time::Duration;

use tracing::{debug, warn};

use crate::error::UpstreamError;
use crate::upstream::ListingSource;

/// Fetches the listing with a single GET request
pub struct HttpListing {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl HttpListing {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            url: url.to_string(),
            timeout,
        })
    }

    fn classify(&self, err: reqwest::Error) -> UpstreamError {
        if err.is_timeout() {
            UpstreamError::Timeout {
                url: self.url.clone(),
                timeout: self.timeout,
            }
        } else {
            UpstreamError::Network(err)
        }
    }
}

#[async_trait::async_trait]
impl ListingSource for HttpListing {
    fn location(&self) -> String {
        self.url.clone()
    }

    async fn fetch_listing(&self) -> Result<String, UpstreamError> {
        debug!("Fetching release listing from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Release listing returned status {}: {}", status, self.url);
            return Err(UpstreamError::UnexpectedStatus {
                url: self.url.clone(),
                status,
            });
        }

        let body = response.text().await.map_err(|e| self.classify(e))?;
        debug!("Release listing is {} bytes", body.len());

        Ok(body)
    }
}
