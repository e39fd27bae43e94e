//! # tmplsync-core
//!
//! Domain layer containing entities, value objects, vendor payload parsing,
//! template normalization and repository traits.
//! This crate has zero dependencies on infrastructure (database, HTTP, etc.).

pub mod entities;
pub mod error;
pub mod normalize;
pub mod traits;
pub mod value_objects;
pub mod vendor;

// Re-export commonly used types at crate root
pub use entities::{
    config_keys, Channel, ChannelType, Components, HttpLog, HttpLogType, Incident, IncidentType,
    NormalizedComponent, Organization, ParamDescriptor, ParamKind, Template, TemplateTranslation,
    TranslationDraft, TranslationStatus,
};
pub use error::DomainError;
pub use normalize::{normalize_template, NormalizedTemplate, SkipReason};
pub use traits::{
    ChannelRepository, HttpLogRepository, IncidentRepository, OrganizationRepository, RepoResult,
    TemplateRepository, TranslationRepository,
};
pub use value_objects::{Locale, Snowflake, SnowflakeGenerator, SnowflakeParseError};
pub use vendor::{ExternalIdStrategy, ParsedTemplate, VariableScope, VendorFormat, VendorProfile};
