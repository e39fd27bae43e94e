//! Data transfer objects
//!
//! This module provides:
//! - Response DTOs for serializing service outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod responses;

pub use mappers::TemplateWithTranslations;
pub use responses::{TemplateResponse, TranslationResponse};
