//! WhatsApp Cloud (`WAC`) and on-premise WhatsApp (`WA`) template lists
//!
//! Both go through the Graph API `message_templates` edge and page with
//! `paging.next`. Cloud channels use the platform's system user token, legacy
//! channels carry their own token and template list domain.

use async_trait::async_trait;
use serde_json::Value;
use tracing::instrument;

use tmplsync_core::{config_keys, Channel, ChannelType, DomainError};

use super::http::{redact, VendorHttp, REDACTED};
use super::{page_items, require_config, FetchError, PageCursor, TemplateFetcher};

const PAGE_LIMIT: &str = "255";
const LEGACY_API_VERSION: &str = "v14.0";

/// Fetcher for Graph API channels
pub struct WhatsAppFetcher {
    http: VendorHttp,
    graph_url: String,
    system_user_token: Option<String>,
}

impl WhatsAppFetcher {
    pub fn new(http: VendorHttp, graph_url: impl Into<String>, system_user_token: Option<String>) -> Self {
        Self {
            http,
            graph_url: graph_url.into(),
            system_user_token,
        }
    }

    /// First page URL and access token for a channel
    fn start(&self, channel: &Channel) -> Result<(String, String), FetchError> {
        if channel.channel_type == ChannelType::WhatsAppCloud {
            let waba_id = require_config(channel, config_keys::WABA_ID)?;
            let token = self
                .system_user_token
                .clone()
                .filter(|t| !t.is_empty())
                .ok_or_else(|| {
                    FetchError::Domain(DomainError::ValidationError(
                        "WhatsApp system user token is not configured".to_string(),
                    ))
                })?;
            let url = format!(
                "{}/{}/message_templates",
                self.graph_url.trim_end_matches('/'),
                waba_id
            );
            Ok((url, token))
        } else {
            let domain = require_config(channel, config_keys::FB_TEMPLATE_LIST_DOMAIN)?;
            let business_id = require_config(channel, config_keys::FB_BUSINESS_ID)?;
            let token = require_config(channel, config_keys::FB_ACCESS_TOKEN)?;
            let url = format!("https://{domain}/{LEGACY_API_VERSION}/{business_id}/message_templates");
            Ok((url, token.to_string()))
        }
    }
}

#[async_trait]
impl TemplateFetcher for WhatsAppFetcher {
    #[instrument(skip(self, channel), fields(channel_id = %channel.id))]
    async fn fetch(&self, channel: &Channel) -> Result<Vec<Value>, FetchError> {
        let (url, token) = self.start(channel)?;

        let first = self
            .http
            .client()
            .get(&url)
            .query(&[("access_token", token.as_str()), ("limit", PAGE_LIMIT)]);
        let log_url = format!("{url}?access_token={REDACTED}&limit={PAGE_LIMIT}");
        let mut cursor = PageCursor::default();
        cursor.visit(&url, &log_url)?;
        let mut page = self.http.fetch_page(channel, first, &log_url).await?;

        let mut templates = page_items(&page, "data");
        while let Some(next) = next_page(&page) {
            let log_url = redact(&next, &token);
            cursor.visit(&next, &log_url)?;
            let request = self.http.client().get(&next);
            page = self.http.fetch_page(channel, request, &log_url).await?;
            templates.extend(page_items(&page, "data"));
        }

        Ok(templates)
    }
}

fn next_page(page: &Value) -> Option<String> {
    page.pointer("/paging/next")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
