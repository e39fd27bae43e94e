//! # tmplsync-service
//!
//! Application layer: vendor fetchers, template reconciliation, incident
//! handling and the sync run over all channels.

pub mod dto;
pub mod fetch;
pub mod services;

pub use fetch::{FetchError, TemplateFetcher, VendorHttp, VendorRegistry};
pub use services::{
    IncidentPolicy, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
    SyncReport, SyncService, TemplateService, TemplateStore, UpdateSummary,
};
