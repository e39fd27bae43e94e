//! Template entity <-> model mapper

use tmplsync_core::entities::Template;
use tmplsync_core::value_objects::Snowflake;

use crate::models::TemplateModel;

/// Convert TemplateModel to Template entity
impl From<TemplateModel> for Template {
    fn from(model: TemplateModel) -> Self {
        Template {
            id: Snowflake::new(model.id),
            uuid: model.uuid,
            org_id: Snowflake::new(model.org_id),
            name: model.name,
            created_on: model.created_on,
            modified_on: model.modified_on,
        }
    }
}
