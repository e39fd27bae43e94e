//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in tmplsync-core.
//! Each repository handles database operations for a specific domain entity.

mod channel;
mod error;
mod http_log;
mod incident;
mod organization;
mod template;
mod translation;

pub use channel::PgChannelRepository;
pub use http_log::PgHttpLogRepository;
pub use incident::PgIncidentRepository;
pub use organization::PgOrganizationRepository;
pub use template::PgTemplateRepository;
pub use translation::PgTranslationRepository;
