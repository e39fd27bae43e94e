//! Vendor template fetchers
//!
//! One [`TemplateFetcher`] per vendor family. Every template list request is
//! recorded as an [`HttpLog`](tmplsync_core::HttpLog) so the sync can tell a
//! channel that keeps failing from one that failed once.

mod dialog360;
mod http;
mod registry;
mod twilio;
mod whatsapp;

pub use dialog360::Dialog360Fetcher;
pub use http::VendorHttp;
pub use registry::VendorRegistry;
pub use twilio::TwilioFetcher;
pub use whatsapp::WhatsAppFetcher;

use std::collections::HashSet;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use tmplsync_core::{Channel, DomainError};

/// Errors raised while fetching templates from a vendor
#[derive(Debug, Error)]
pub enum FetchError {
    /// No response was received
    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("request to {url} returned status {status}")]
    Status { url: String, status: u16 },

    /// The vendor answered with `meta.success = false`
    #[error("request to {url} was rejected by the vendor")]
    VendorFailure { url: String },

    #[error("invalid response from {url}: {message}")]
    Decode { url: String, message: String },

    /// The vendor's page links loop or never end
    #[error("stopped paging at {url}: {message}")]
    Pagination { url: String, message: String },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl FetchError {
    /// Whether the vendor may answer the same request next time
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Request { .. }
                | Self::Status { .. }
                | Self::VendorFailure { .. }
                | Self::Decode { .. }
                | Self::Pagination { .. }
        )
    }
}

/// Fetches a channel's raw template list from its vendor
#[async_trait]
pub trait TemplateFetcher: Send + Sync {
    /// Every raw template object the vendor reports for the channel
    async fn fetch(&self, channel: &Channel) -> Result<Vec<Value>, FetchError>;
}

/// Required string value from a channel's config
pub(crate) fn require_config<'a>(channel: &'a Channel, key: &str) -> Result<&'a str, FetchError> {
    channel.config_str(key).ok_or_else(|| {
        FetchError::Domain(DomainError::MissingChannelConfig {
            channel_id: channel.id,
            key: key.to_string(),
        })
    })
}

/// Most pages read from one vendor template list
pub(crate) const MAX_PAGES: usize = 100;

/// Pages read by one listing, at most [`MAX_PAGES`] and none twice
#[derive(Debug, Default)]
pub(crate) struct PageCursor {
    visited: HashSet<String>,
}

impl PageCursor {
    /// Record `url` before requesting it
    ///
    /// `log_url` is the credential-free form used in the error.
    pub(crate) fn visit(&mut self, url: &str, log_url: &str) -> Result<(), FetchError> {
        if self.visited.len() >= MAX_PAGES {
            return Err(FetchError::Pagination {
                url: log_url.to_string(),
                message: format!("more than {MAX_PAGES} pages"),
            });
        }
        if !self.visited.insert(url.to_string()) {
            return Err(FetchError::Pagination {
                url: log_url.to_string(),
                message: "page was already read".to_string(),
            });
        }
        Ok(())
    }
}

/// Array under `key` in a response page, empty when absent
pub(crate) fn page_items(page: &Value, key: &str) -> Vec<Value> {
    page.get(key)
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}
