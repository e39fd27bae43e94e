//! Incident policy for failing template syncs

use chrono::Utc;
use tracing::{info, instrument, warn};

use tmplsync_core::{Channel, HttpLogType, Incident, IncidentType};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Opens and ends `channel:templates_failed` incidents
pub struct IncidentPolicy<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> IncidentPolicy<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Called after a transient fetch failure
    ///
    /// Opens the incident once the newest `threshold` template sync logs of
    /// the channel are all errors. Returns the open incident, if any.
    #[instrument(skip(self, channel), fields(channel_id = %channel.id))]
    pub async fn record_failure(&self, channel: &Channel) -> ServiceResult<Option<Incident>> {
        let threshold = self.ctx.incident_threshold().max(1);
        let logs = self
            .ctx
            .http_log_repo()
            .recent_for_channel(
                channel.id,
                HttpLogType::WhatsappTemplatesSynced,
                i64::try_from(threshold).unwrap_or(i64::MAX),
            )
            .await?;

        if logs.len() < threshold || logs.iter().any(|log| !log.is_error) {
            return Ok(None);
        }

        let incidents = self.ctx.incident_repo();
        if let Some(open) = incidents
            .find_open(channel.id, IncidentType::ChannelTemplatesFailed)
            .await?
        {
            return Ok(Some(open));
        }

        let incident = Incident::open(
            self.ctx.generate_id(),
            channel.org_id,
            channel.id,
            IncidentType::ChannelTemplatesFailed,
        );
        if let Err(err) = incidents.create(&incident).await {
            // another run opened it between the lookup and the insert
            if err.is_conflict() {
                return Ok(incidents
                    .find_open(channel.id, IncidentType::ChannelTemplatesFailed)
                    .await?);
            }
            return Err(err.into());
        }
        warn!(incident_id = %incident.id, failures = threshold, "Template sync incident opened");

        Ok(Some(incident))
    }

    /// Called after a successful sync; ends the open incident if there is one
    #[instrument(skip(self, channel), fields(channel_id = %channel.id))]
    pub async fn record_success(&self, channel: &Channel) -> ServiceResult<bool> {
        let incidents = self.ctx.incident_repo();
        let Some(open) = incidents
            .find_open(channel.id, IncidentType::ChannelTemplatesFailed)
            .await?
        else {
            return Ok(false);
        };

        incidents.end(open.id, Utc::now()).await?;
        info!(incident_id = %open.id, "Template sync incident ended");
        Ok(true)
    }
}
