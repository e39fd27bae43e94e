//! Dialog360 on-premise (`D3`) and cloud (`D3C`) template lists

use async_trait::async_trait;
use serde_json::Value;
use tracing::instrument;

use tmplsync_core::{config_keys, Channel};

use super::http::VendorHttp;
use super::{page_items, require_config, FetchError, TemplateFetcher};

const API_KEY_HEADER: &str = "D360-API-KEY";

/// Fetcher for Dialog360 channels; the whole list comes in one response
pub struct Dialog360Fetcher {
    http: VendorHttp,
}

impl Dialog360Fetcher {
    pub fn new(http: VendorHttp) -> Self {
        Self { http }
    }
}

#[async_trait]
impl TemplateFetcher for Dialog360Fetcher {
    #[instrument(skip(self, channel), fields(channel_id = %channel.id))]
    async fn fetch(&self, channel: &Channel) -> Result<Vec<Value>, FetchError> {
        let base_url = require_config(channel, config_keys::BASE_URL)?;
        let api_key = require_config(channel, config_keys::AUTH_TOKEN)?;

        let url = format!("{}/v1/configs/templates", base_url.trim_end_matches('/'));
        let request = self.http.client().get(&url).header(API_KEY_HEADER, api_key);
        let page = self.http.fetch_page(channel, request, &url).await?;

        Ok(page_items(&page, "waba_templates"))
    }
}
