//! Entity to model mappers
//!
//! Conversions between domain entities (tmplsync-core) and database models.
//! - `From<Model> for Entity` / `TryFrom<Model> for Entity`: database rows to domain objects
//! - `*Insert` structs: entity data prepared for binding

mod channel;
mod http_log;
mod incident;
mod template;
mod translation;

pub use translation::TranslationInsert;
