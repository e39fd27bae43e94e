//! Entity to DTO mappers

use tmplsync_core::{Template, TemplateTranslation};

use super::responses::{TemplateResponse, TranslationResponse};

/// Template together with the translations to show for it
#[derive(Debug, Clone)]
pub struct TemplateWithTranslations {
    pub template: Template,
    pub translations: Vec<TemplateTranslation>,
}

impl From<TemplateTranslation> for TranslationResponse {
    fn from(tt: TemplateTranslation) -> Self {
        let content = tt.content();
        Self {
            id: tt.id.to_string(),
            channel_id: tt.channel_id.to_string(),
            locale: tt.locale.to_string(),
            external_locale: tt.external_locale,
            external_id: tt.external_id,
            namespace: tt.namespace,
            status: tt.status,
            components: tt.components,
            variable_count: tt.variable_count,
            content,
            created_on: tt.created_on,
        }
    }
}

impl From<TemplateWithTranslations> for TemplateResponse {
    fn from(t: TemplateWithTranslations) -> Self {
        Self {
            id: t.template.id.to_string(),
            uuid: t.template.uuid,
            name: t.template.name,
            created_on: t.template.created_on,
            modified_on: t.template.modified_on,
            translations: t.translations.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tmplsync_core::{
        Components, Locale, NormalizedComponent, Snowflake, TranslationDraft, TranslationStatus,
    };

    #[test]
    fn test_template_response_json() {
        let mut components = Components::new();
        components.insert(
            "body".into(),
            NormalizedComponent {
                content: "Hello".into(),
                kind: "body".into(),
                display: None,
                params: vec![],
            },
        );
        let translation = TemplateTranslation::from_draft(
            Snowflake::new(3),
            Snowflake::new(2),
            Snowflake::new(1),
            TranslationDraft {
                locale: Locale::from_vendor("en_US").unwrap(),
                status: TranslationStatus::UnsupportedComponents,
                external_id: "1234".into(),
                external_locale: "en_US".into(),
                namespace: String::new(),
                components,
                variable_count: 0,
            },
        );
        let template = Template::new(Snowflake::new(2), Snowflake::new(9), "hello");

        let response = TemplateResponse::from(TemplateWithTranslations {
            template,
            translations: vec![translation],
        });
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["id"], "2");
        assert_eq!(json["name"], "hello");
        assert_eq!(json["translations"][0]["id"], "3");
        assert_eq!(json["translations"][0]["locale"], "eng-US");
        assert_eq!(json["translations"][0]["status"], "unsupported_components");
        assert_eq!(json["translations"][0]["content"], "Hello");
        assert_eq!(json["translations"][0]["components"]["body"]["type"], "body");
    }
}
