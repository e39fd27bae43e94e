//! Channel and organization entity <-> model mappers

use tmplsync_core::entities::{Channel, ChannelType, Organization};
use tmplsync_core::value_objects::Snowflake;

use crate::models::{ChannelModel, OrganizationModel};

/// Convert ChannelModel to Channel entity
impl From<ChannelModel> for Channel {
    fn from(model: ChannelModel) -> Self {
        Channel {
            id: Snowflake::new(model.id),
            uuid: model.uuid,
            org_id: Snowflake::new(model.org_id),
            name: model.name,
            channel_type: ChannelType::from_code(&model.channel_type),
            config: model.config.0,
            is_active: model.is_active,
            created_at: model.created_at,
        }
    }
}

/// Convert OrganizationModel to Organization entity
impl From<OrganizationModel> for Organization {
    fn from(model: OrganizationModel) -> Self {
        Organization {
            id: Snowflake::new(model.id),
            name: model.name,
            is_active: model.is_active,
            is_suspended: model.is_suspended,
            created_at: model.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;
    use sqlx::types::Json;
    use tmplsync_core::config_keys;

    #[test]
    fn test_channel_from_model() {
        let config = json!({"fb_namespace": "foo_namespace"});
        let model = ChannelModel {
            id: 10,
            uuid: uuid::Uuid::new_v4(),
            org_id: 1,
            name: "WhatsApp".to_string(),
            channel_type: "D3C".to_string(),
            config: Json(config.as_object().cloned().unwrap_or_default()),
            is_active: true,
            created_at: Utc::now(),
        };

        let channel = Channel::from(model);
        assert_eq!(channel.id, Snowflake::new(10));
        assert_eq!(channel.channel_type, ChannelType::Dialog360Cloud);
        assert_eq!(channel.config_str(config_keys::FB_NAMESPACE), Some("foo_namespace"));
    }
}
