//! Twilio Content API (`TWA`) template lists
//!
//! Content entries don't carry their WhatsApp approval, so each one is
//! looked up through `links.approval_fetch` and its `status` and `category`
//! merged into the entry.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument};

use tmplsync_core::{config_keys, Channel};

use super::http::VendorHttp;
use super::{page_items, require_config, FetchError, PageCursor, TemplateFetcher};

/// Status given to entries whose approval couldn't be read
const UNSUBMITTED: &str = "unsubmitted";

/// Fetcher for Twilio WhatsApp senders
pub struct TwilioFetcher {
    http: VendorHttp,
    content_url: String,
}

impl TwilioFetcher {
    pub fn new(http: VendorHttp, content_url: impl Into<String>) -> Self {
        Self {
            http,
            content_url: content_url.into(),
        }
    }

    /// WhatsApp approval `(status, category)` of one content entry
    async fn approval(&self, entry: &Value, account_sid: &str, auth_token: &str) -> Result<(String, String), FetchError> {
        let Some(url) = entry.pointer("/links/approval_fetch").and_then(Value::as_str) else {
            return Ok((UNSUBMITTED.to_string(), String::new()));
        };

        let response = self
            .http
            .client()
            .get(url)
            .basic_auth(account_sid, Some(auth_token))
            .send()
            .await
            .map_err(|err| FetchError::Request {
                url: url.to_string(),
                message: err.to_string(),
            })?;

        if !response.status().is_success() {
            debug!(url = %url, status = %response.status(), "No approval for content");
            return Ok((UNSUBMITTED.to_string(), String::new()));
        }

        let body: Value = response.json().await.map_err(|err| FetchError::Decode {
            url: url.to_string(),
            message: err.to_string(),
        })?;
        let field = |name: &str| {
            body.pointer(&format!("/whatsapp/{name}"))
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        Ok((
            field("status").unwrap_or_else(|| UNSUBMITTED.to_string()),
            field("category").unwrap_or_default(),
        ))
    }
}

#[async_trait]
impl TemplateFetcher for TwilioFetcher {
    #[instrument(skip(self, channel), fields(channel_id = %channel.id))]
    async fn fetch(&self, channel: &Channel) -> Result<Vec<Value>, FetchError> {
        let account_sid = require_config(channel, config_keys::ACCOUNT_SID)?;
        let auth_token = require_config(channel, config_keys::AUTH_TOKEN)?;

        let mut url = format!("{}/Content", self.content_url.trim_end_matches('/'));
        let mut entries = Vec::new();
        let mut cursor = PageCursor::default();
        loop {
            cursor.visit(&url, &url)?;
            let request = self.http.client().get(&url).basic_auth(account_sid, Some(auth_token));
            let page = self.http.fetch_page(channel, request, &url).await?;
            entries.extend(page_items(&page, "contents"));

            match page.pointer("/meta/next_page_url").and_then(Value::as_str) {
                Some(next) if !next.is_empty() => url = next.to_string(),
                _ => break,
            }
        }

        let mut templates = Vec::with_capacity(entries.len());
        for mut entry in entries {
            let (status, category) = self.approval(&entry, account_sid, auth_token).await?;
            if let Some(object) = entry.as_object_mut() {
                object.insert("status".to_string(), Value::String(status));
                object.insert("category".to_string(), Value::String(category));
            }
            templates.push(entry);
        }

        Ok(templates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use serde_json::json;
    use tmplsync_core::{ChannelType, Snowflake, SnowflakeGenerator};
    use tmplsync_db::MemoryStore;
    use wiremock::matchers::{header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn setup(store: &Arc<MemoryStore>, content_url: &str) -> (TwilioFetcher, Channel) {
        let http = VendorHttp::new(
            reqwest::Client::new(),
            store.clone(),
            Arc::new(SnowflakeGenerator::new(1)),
        );
        let channel = Channel::new(Snowflake::new(30), Snowflake::new(1), "Twilio", ChannelType::TwilioWhatsApp)
            .with_config(config_keys::ACCOUNT_SID, "TEST_SID")
            .with_config(config_keys::AUTH_TOKEN, "TEST_TOKEN");
        (TwilioFetcher::new(http, content_url), channel)
    }

    fn content(uri: &str, sid: &str, name: &str) -> Value {
        json!({
            "friendly_name": name,
            "language": "en",
            "sid": sid,
            "links": {"approval_fetch": format!("{uri}/Content/{sid}/ApprovalRequests")},
            "types": {"twilio/text": {"body": "Hello {{1}}"}}
        })
    }

    #[tokio::test]
    async fn test_pages_and_approvals() {
        let server = MockServer::start().await;
        let store = Arc::new(MemoryStore::new());
        let uri = server.uri();

        Mock::given(method("GET"))
            .and(path("/Content"))
            .and(query_param("Page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "contents": [content(&uri, "HX1234503", "quick_reply_template")],
                "meta": {"next_page_url": null}
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/Content"))
            .and(header_exists("authorization"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "contents": [content(&uri, "HX1234502", "text_only_template")],
                "meta": {"next_page_url": format!("{uri}/Content?PageSize=50&Page=1")}
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/Content/HX1234502/ApprovalRequests"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "whatsapp": {"category": "marketing", "status": "rejected"}
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/Content/HX1234503/ApprovalRequests"))
            .respond_with(ResponseTemplate::new(400).set_body_string("Error"))
            .mount(&server)
            .await;

        let (fetcher, channel) = setup(&store, &uri);
        let templates = fetcher.fetch(&channel).await.unwrap();

        assert_eq!(templates.len(), 2);
        assert_eq!(templates[0]["sid"], "HX1234502");
        assert_eq!(templates[0]["status"], "rejected");
        assert_eq!(templates[0]["category"], "marketing");
        assert_eq!(templates[1]["sid"], "HX1234503");
        assert_eq!(templates[1]["status"], "unsubmitted");
        assert_eq!(templates[1]["category"], "");

        // only list requests are logged
        let logs = store.http_logs_for_channel(channel.id);
        assert_eq!(logs.len(), 2);
        assert!(logs.iter().all(|l| !l.is_error));
    }

    #[tokio::test]
    async fn test_self_referencing_next_page() {
        let server = MockServer::start().await;
        let store = Arc::new(MemoryStore::new());
        let uri = server.uri();

        Mock::given(method("GET"))
            .and(path("/Content"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "contents": [content(&uri, "HX1234502", "text_only_template")],
                "meta": {"next_page_url": format!("{uri}/Content")}
            })))
            .mount(&server)
            .await;

        let (fetcher, channel) = setup(&store, &uri);
        let err = tokio::time::timeout(std::time::Duration::from_secs(5), fetcher.fetch(&channel))
            .await
            .expect("fetch should stop on a repeated page")
            .unwrap_err();

        assert!(matches!(err, FetchError::Pagination { .. }));
        assert!(err.is_transient());
        assert_eq!(store.http_logs_for_channel(channel.id).len(), 1);
    }

    #[tokio::test]
    async fn test_vendor_failure() {
        let server = MockServer::start().await;
        let store = Arc::new(MemoryStore::new());

        Mock::given(method("GET"))
            .and(path("/Content"))
            .respond_with(ResponseTemplate::new(400).set_body_string(r#"{ "meta": { "success": false } }"#))
            .mount(&server)
            .await;

        let (fetcher, channel) = setup(&store, &server.uri());
        let err = fetcher.fetch(&channel).await.unwrap_err();

        assert!(matches!(err, FetchError::VendorFailure { .. }));
        assert!(err.is_transient());

        let logs = store.http_logs_for_channel(channel.id);
        assert_eq!(logs.len(), 1);
        assert!(logs[0].is_error);
    }

    #[tokio::test]
    async fn test_unreachable() {
        let store = Arc::new(MemoryStore::new());

        // nothing listens on port 9 of localhost
        let (fetcher, channel) = setup(&store, "http://127.0.0.1:9");
        let err = fetcher.fetch(&channel).await.unwrap_err();

        assert!(matches!(err, FetchError::Request { .. }));
        let logs = store.http_logs_for_channel(channel.id);
        assert_eq!(logs.len(), 1);
        assert!(logs[0].is_error);
        assert_eq!(logs[0].status_code, None);
    }
}
