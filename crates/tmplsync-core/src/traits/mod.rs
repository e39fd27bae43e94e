//! Repository traits

mod repositories;

pub use repositories::{
    ChannelRepository, HttpLogRepository, IncidentRepository, OrganizationRepository, RepoResult,
    TemplateRepository, TranslationRepository,
};
