//! Business logic services
//!
//! This module contains the template store, the sync orchestration and the
//! read side of synced templates.

pub mod context;
pub mod error;
pub mod incident;
pub mod store;
pub mod sync;
pub mod template;

// Re-export all services for convenience
pub use context::{ServiceContext, ServiceContextBuilder, DEFAULT_INCIDENT_THRESHOLD};
pub use error::{ServiceError, ServiceResult};
pub use incident::IncidentPolicy;
pub use store::{TemplateStore, UpdateSummary};
pub use sync::{SyncReport, SyncService};
pub use template::TemplateService;
