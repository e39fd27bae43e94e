//! Database models - SQLx-compatible structs for PostgreSQL tables

mod channel;
mod http_log;
mod incident;
mod organization;
mod template;
mod translation;

pub use channel::ChannelModel;
pub use http_log::HttpLogModel;
pub use incident::IncidentModel;
pub use organization::OrganizationModel;
pub use template::TemplateModel;
pub use translation::TranslationModel;
