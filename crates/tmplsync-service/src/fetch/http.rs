//! Shared HTTP plumbing for fetchers

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;
use tracing::debug;

use tmplsync_core::{Channel, HttpLog, HttpLogRepository, HttpLogType, SnowflakeGenerator};

use super::FetchError;

pub(crate) const REDACTED: &str = "********";

/// HTTP client that records every template list request it sends
#[derive(Clone)]
pub struct VendorHttp {
    client: Client,
    http_logs: Arc<dyn HttpLogRepository>,
    ids: Arc<SnowflakeGenerator>,
}

impl VendorHttp {
    pub fn new(client: Client, http_logs: Arc<dyn HttpLogRepository>, ids: Arc<SnowflakeGenerator>) -> Self {
        Self { client, http_logs, ids }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Send one list request, log it and decode its JSON body
    ///
    /// `log_url` is what gets stored; it must not carry credentials.
    pub async fn fetch_page(
        &self,
        channel: &Channel,
        request: RequestBuilder,
        log_url: &str,
    ) -> Result<Value, FetchError> {
        let started = Instant::now();

        let (status_code, outcome) = match request.send().await {
            Ok(response) => {
                let status = response.status();
                let body = response.text().await;
                (
                    Some(i32::from(status.as_u16())),
                    decode_page(log_url, status, body),
                )
            }
            Err(err) => (
                err.status().map(|s| i32::from(s.as_u16())),
                Err(FetchError::Request {
                    url: log_url.to_string(),
                    message: err.to_string(),
                }),
            ),
        };

        let log = HttpLog {
            id: self.ids.generate(),
            org_id: channel.org_id,
            channel_id: channel.id,
            log_type: HttpLogType::WhatsappTemplatesSynced,
            url: log_url.to_string(),
            status_code,
            request_time_ms: i64::try_from(started.elapsed().as_millis()).unwrap_or(i64::MAX),
            is_error: outcome.is_err(),
            created_on: Utc::now(),
        };
        self.http_logs.create(&log).await?;

        debug!(
            channel_id = %channel.id,
            url = %log_url,
            status = ?status_code,
            elapsed_ms = log.request_time_ms,
            "Fetched template page"
        );

        outcome
    }
}

fn decode_page(url: &str, status: StatusCode, body: Result<String, reqwest::Error>) -> Result<Value, FetchError> {
    let body = body.map_err(|err| FetchError::Request {
        url: url.to_string(),
        message: err.to_string(),
    })?;
    let parsed = serde_json::from_str::<Value>(&body);

    let rejected = parsed
        .as_ref()
        .ok()
        .and_then(|v| v.pointer("/meta/success"))
        .and_then(Value::as_bool)
        == Some(false);
    if rejected {
        return Err(FetchError::VendorFailure { url: url.to_string() });
    }

    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    parsed.map_err(|err| FetchError::Decode {
        url: url.to_string(),
        message: err.to_string(),
    })
}

/// Replace every occurrence of `secret` in `url`
pub(crate) fn redact(url: &str, secret: &str) -> String {
    if secret.is_empty() {
        url.to_string()
    } else {
        url.replace(secret, REDACTED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact() {
        assert_eq!(
            redact("https://graph.facebook.com/v18.0/1234/message_templates?access_token=abc&limit=255", "abc"),
            "https://graph.facebook.com/v18.0/1234/message_templates?access_token=********&limit=255"
        );
        assert_eq!(redact("https://example.com", ""), "https://example.com");
    }

    #[test]
    fn test_decode_page() {
        let url = "https://example.com";

        let ok = decode_page(url, StatusCode::OK, Ok(r#"{"data": []}"#.to_string())).unwrap();
        assert_eq!(ok["data"], serde_json::json!([]));

        let rejected = decode_page(url, StatusCode::BAD_REQUEST, Ok(r#"{"meta": {"success": false}}"#.to_string()));
        assert!(matches!(rejected, Err(FetchError::VendorFailure { .. })));

        let status = decode_page(url, StatusCode::BAD_GATEWAY, Ok("Bad gateway".to_string()));
        assert!(matches!(status, Err(FetchError::Status { status: 502, .. })));

        let garbage = decode_page(url, StatusCode::OK, Ok("<html>".to_string())).unwrap_err();
        assert!(matches!(garbage, FetchError::Decode { .. }));
        assert!(garbage.is_transient());
    }
}
