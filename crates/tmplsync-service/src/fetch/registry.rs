//! Channel type → fetcher lookup, built once at start-up

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tmplsync_common::VendorConfig;
use tmplsync_core::ChannelType;

use super::{Dialog360Fetcher, TemplateFetcher, TwilioFetcher, VendorHttp, WhatsAppFetcher};

/// Fetchers keyed by the channel types they serve
#[derive(Clone, Default)]
pub struct VendorRegistry {
    fetchers: HashMap<ChannelType, Arc<dyn TemplateFetcher>>,
}

impl VendorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with a fetcher for every template-capable channel type
    pub fn with_defaults(http: VendorHttp, vendors: &VendorConfig) -> Self {
        let whatsapp: Arc<dyn TemplateFetcher> = Arc::new(WhatsAppFetcher::new(
            http.clone(),
            vendors.whatsapp_api_url.clone(),
            vendors.whatsapp_system_user_token.clone(),
        ));
        let dialog360: Arc<dyn TemplateFetcher> = Arc::new(Dialog360Fetcher::new(http.clone()));
        let twilio: Arc<dyn TemplateFetcher> =
            Arc::new(TwilioFetcher::new(http, vendors.twilio_content_url.clone()));

        Self::new()
            .register(ChannelType::WhatsAppCloud, whatsapp.clone())
            .register(ChannelType::WhatsAppLegacy, whatsapp)
            .register(ChannelType::Dialog360Legacy, dialog360.clone())
            .register(ChannelType::Dialog360Cloud, dialog360)
            .register(ChannelType::TwilioWhatsApp, twilio)
    }

    /// Add or replace the fetcher for a channel type
    #[must_use]
    pub fn register(mut self, channel_type: ChannelType, fetcher: Arc<dyn TemplateFetcher>) -> Self {
        self.fetchers.insert(channel_type, fetcher);
        self
    }

    pub fn get(&self, channel_type: &ChannelType) -> Option<&Arc<dyn TemplateFetcher>> {
        self.fetchers.get(channel_type)
    }

    /// Registered channel types in a stable order
    pub fn channel_types(&self) -> Vec<ChannelType> {
        let mut types: Vec<ChannelType> = self.fetchers.keys().cloned().collect();
        types.sort_by(|a, b| a.code().cmp(b.code()));
        types
    }
}

impl fmt::Debug for VendorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VendorRegistry")
            .field("channel_types", &self.channel_types())
            .finish()
    }
}
