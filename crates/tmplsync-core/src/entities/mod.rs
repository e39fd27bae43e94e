//! Domain entities - core business objects

mod channel;
mod http_log;
mod incident;
mod organization;
mod template;
mod translation;

pub use channel::{config_keys, Channel, ChannelType};
pub use http_log::{HttpLog, HttpLogType};
pub use incident::{Incident, IncidentType};
pub use organization::Organization;
pub use template::Template;
pub use translation::{
    Components, NormalizedComponent, ParamDescriptor, ParamKind, TemplateTranslation,
    TranslationDraft, TranslationStatus,
};
