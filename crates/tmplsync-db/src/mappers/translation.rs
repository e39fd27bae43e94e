//! Template translation entity <-> model mapper

use tmplsync_core::entities::{Components, TemplateTranslation, TranslationStatus};
use tmplsync_core::error::DomainError;
use tmplsync_core::value_objects::{Locale, Snowflake};

use crate::models::TranslationModel;

/// Convert TranslationModel to TemplateTranslation entity
impl TryFrom<TranslationModel> for TemplateTranslation {
    type Error = DomainError;

    fn try_from(model: TranslationModel) -> Result<Self, Self::Error> {
        let status = model
            .status
            .chars()
            .next()
            .and_then(TranslationStatus::from_code)
            .ok_or_else(|| {
                DomainError::DatabaseError(format!(
                    "invalid status '{}' on translation {}",
                    model.status, model.id
                ))
            })?;
        let locale = Locale::parse(&model.locale)
            .ok_or_else(|| DomainError::InvalidLocale(model.locale.clone()))?;

        Ok(TemplateTranslation {
            id: Snowflake::new(model.id),
            template_id: Snowflake::new(model.template_id),
            channel_id: Snowflake::new(model.channel_id),
            locale,
            external_locale: model.external_locale,
            external_id: model.external_id,
            namespace: model.namespace,
            status,
            components: model.components.0,
            variable_count: model.variable_count,
            is_active: model.is_active,
            created_on: model.created_on,
        })
    }
}

/// TemplateTranslation values for database insertion
pub struct TranslationInsert<'a> {
    pub id: i64,
    pub template_id: i64,
    pub channel_id: i64,
    pub locale: String,
    pub external_locale: &'a str,
    pub external_id: &'a str,
    pub namespace: &'a str,
    pub status: String,
    pub components: &'a Components,
    pub variable_count: i32,
    pub is_active: bool,
}

impl<'a> TranslationInsert<'a> {
    pub fn new(translation: &'a TemplateTranslation) -> Self {
        Self {
            id: translation.id.into_inner(),
            template_id: translation.template_id.into_inner(),
            channel_id: translation.channel_id.into_inner(),
            locale: translation.locale.to_string(),
            external_locale: &translation.external_locale,
            external_id: &translation.external_id,
            namespace: &translation.namespace,
            status: translation.status.code().to_string(),
            components: &translation.components,
            variable_count: translation.variable_count,
            is_active: translation.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sqlx::types::Json;

    fn model(status: &str, locale: &str) -> TranslationModel {
        TranslationModel {
            id: 5,
            template_id: 2,
            channel_id: 3,
            locale: locale.to_string(),
            external_locale: "en_US".to_string(),
            external_id: "1234".to_string(),
            namespace: String::new(),
            status: status.to_string(),
            components: Json(Components::new()),
            variable_count: 0,
            is_active: true,
            created_on: Utc::now(),
        }
    }

    #[test]
    fn test_try_from_model() {
        let translation = TemplateTranslation::try_from(model("A", "eng-US")).unwrap();
        assert_eq!(translation.status, TranslationStatus::Approved);
        assert_eq!(translation.locale.to_string(), "eng-US");

        let insert = TranslationInsert::new(&translation);
        assert_eq!(insert.status, "A");
        assert_eq!(insert.locale, "eng-US");
    }

    #[test]
    fn test_invalid_rows_are_errors() {
        assert!(matches!(
            TemplateTranslation::try_from(model("X", "eng")),
            Err(DomainError::DatabaseError(_))
        ));
        assert!(matches!(
            TemplateTranslation::try_from(model("P", "en_US")),
            Err(DomainError::InvalidLocale(_))
        ));
    }
}
