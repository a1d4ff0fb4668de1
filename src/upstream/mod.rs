//! Upstream release listing

#[cfg(test)]
use mockall::automock;

use crate::error::UpstreamError;

pub mod http;

pub use http::HttpListing;

/// Trait for fetching the raw release listing
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ListingSource: Send + Sync {
    /// Location the listing is fetched from, used in log messages
    fn location(&self) -> String;

    /// Fetches the listing body
    ///
    /// # Returns
    /// * `Ok(String)` - The page body (HTML or plain text)
    /// * `Err(UpstreamError)` - Transport failure, timeout or non-success status
    async fn fetch_listing(&self) -> Result<String, UpstreamError>;
}
