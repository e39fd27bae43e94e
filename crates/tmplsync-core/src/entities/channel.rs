//! Channel entity - a vendor connection owned by an organization

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::value_objects::Snowflake;

/// Channel config keys read by the template sync
pub mod config_keys {
    pub const BASE_URL: &str = "base_url";
    pub const AUTH_TOKEN: &str = "auth_token";
    pub const ACCOUNT_SID: &str = "account_sid";
    pub const FB_NAMESPACE: &str = "fb_namespace";
    pub const FB_BUSINESS_ID: &str = "fb_business_id";
    pub const FB_ACCESS_TOKEN: &str = "fb_access_token";
    pub const FB_TEMPLATE_LIST_DOMAIN: &str = "fb_template_list_domain";
    pub const WABA_ID: &str = "wa_waba_id";
}

/// Channel type, stored as the vendor's short code
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChannelType {
    /// WhatsApp Cloud API (`WAC`)
    WhatsAppCloud,
    /// On-premise WhatsApp Business API (`WA`)
    WhatsAppLegacy,
    /// Dialog360 on-premise API (`D3`)
    Dialog360Legacy,
    /// Dialog360 cloud API (`D3C`)
    Dialog360Cloud,
    /// Twilio WhatsApp sender with Content API templates (`TWA`)
    TwilioWhatsApp,
    /// Any channel type without template support
    Other(String),
}

impl ChannelType {
    pub fn from_code(code: &str) -> Self {
        match code {
            "WAC" => Self::WhatsAppCloud,
            "WA" => Self::WhatsAppLegacy,
            "D3" => Self::Dialog360Legacy,
            "D3C" => Self::Dialog360Cloud,
            "TWA" => Self::TwilioWhatsApp,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Self::WhatsAppCloud => "WAC",
            Self::WhatsAppLegacy => "WA",
            Self::Dialog360Legacy => "D3",
            Self::Dialog360Cloud => "D3C",
            Self::TwilioWhatsApp => "TWA",
            Self::Other(code) => code,
        }
    }

    /// All channel types that carry vendor templates
    pub fn template_types() -> [ChannelType; 5] {
        [
            Self::WhatsAppCloud,
            Self::WhatsAppLegacy,
            Self::Dialog360Legacy,
            Self::Dialog360Cloud,
            Self::TwilioWhatsApp,
        ]
    }
}

impl From<String> for ChannelType {
    fn from(value: String) -> Self {
        Self::from_code(&value)
    }
}

impl From<ChannelType> for String {
    fn from(ct: ChannelType) -> Self {
        ct.code().to_string()
    }
}

impl std::fmt::Display for ChannelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Channel entity
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    pub id: Snowflake,
    pub uuid: Uuid,
    pub org_id: Snowflake,
    pub name: String,
    pub channel_type: ChannelType,
    pub config: Map<String, Value>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Channel {
    /// Create a new active channel with an empty config
    #[must_use]
    pub fn new(id: Snowflake, org_id: Snowflake, name: impl Into<String>, channel_type: ChannelType) -> Self {
        Self {
            id,
            uuid: Uuid::new_v4(),
            org_id,
            name: name.into(),
            channel_type,
            config: Map::new(),
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// Builder-style config setter
    #[must_use]
    pub fn with_config(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.config.insert(key.to_string(), value.into());
        self
    }

    /// Non-empty string config value
    pub fn config_str(&self, key: &str) -> Option<&str> {
        self.config
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_type_codes() {
        for ct in ChannelType::template_types() {
            assert_eq!(ChannelType::from_code(ct.code()), ct);
        }
        assert_eq!(ChannelType::from_code("TG"), ChannelType::Other("TG".to_string()));
        assert_eq!(ChannelType::Other("TG".to_string()).code(), "TG");
    }

    #[test]
    fn test_config_str() {
        let channel = Channel::new(Snowflake::new(1), Snowflake::new(2), "WhatsApp", ChannelType::WhatsAppLegacy)
            .with_config(config_keys::FB_NAMESPACE, "foo_namespace")
            .with_config(config_keys::BASE_URL, "  ")
            .with_config("version", 2);

        assert_eq!(channel.config_str(config_keys::FB_NAMESPACE), Some("foo_namespace"));
        assert_eq!(channel.config_str(config_keys::BASE_URL), None);
        assert_eq!(channel.config_str("version"), None);
        assert_eq!(channel.config_str("missing"), None);
    }
}
