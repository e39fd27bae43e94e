//! Sync service
//!
//! Refreshes the templates of every syncable channel, one channel at a time.
//! A failure on one channel never stops the others.

use serde::Serialize;
use tracing::{error, info, instrument, warn};

use tmplsync_core::Channel;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::incident::IncidentPolicy;
use super::store::{TemplateStore, UpdateSummary};

/// Outcome of one sync run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Channels whose templates were reconciled
    pub synced: usize,
    /// Channels whose vendor couldn't be reached or refused the request
    pub failed: usize,
    /// Channels that hit any other error
    pub errored: usize,
}

impl SyncReport {
    pub fn total(&self) -> usize {
        self.synced + self.failed + self.errored
    }
}

/// Sync service
pub struct SyncService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SyncService<'a> {
    /// Create a new SyncService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Refresh templates of all active channels with a registered fetcher
    ///
    /// # Errors
    /// Only fails when the channels can't be listed; per-channel errors are
    /// logged and counted in the report.
    #[instrument(skip(self))]
    pub async fn refresh_templates(&self) -> ServiceResult<SyncReport> {
        let types = self.ctx.registry().channel_types();
        let channels = self.ctx.channel_repo().find_syncable_by_types(&types).await?;

        let mut report = SyncReport::default();
        for channel in &channels {
            match self.sync_channel(channel).await {
                Ok(_) => report.synced += 1,
                Err(err) if err.is_transient_fetch() => {
                    report.failed += 1;
                    warn!(
                        channel_id = %channel.id,
                        channel_uuid = %channel.uuid,
                        error = %err,
                        "Failed to fetch whatsapp templates"
                    );
                    if let Err(err) = IncidentPolicy::new(self.ctx).record_failure(channel).await {
                        error!(channel_id = %channel.id, error = %err, "Error checking template sync incident");
                    }
                }
                Err(err) => {
                    report.errored += 1;
                    error!(
                        channel_id = %channel.id,
                        channel_uuid = %channel.uuid,
                        error_code = %err.error_code(),
                        "Error refreshing whatsapp templates: {err}"
                    );
                }
            }
        }

        info!(
            channels = report.total(),
            synced = report.synced,
            failed = report.failed,
            errored = report.errored,
            "Template sync finished"
        );

        Ok(report)
    }

    /// Fetch and reconcile the templates of a single channel
    #[instrument(skip(self, channel), fields(channel_id = %channel.id, channel_type = %channel.channel_type))]
    pub async fn sync_channel(&self, channel: &Channel) -> ServiceResult<UpdateSummary> {
        let fetcher = self.ctx.registry().get(&channel.channel_type).ok_or_else(|| {
            ServiceError::internal(format!("no fetcher for channel type {}", channel.channel_type))
        })?;

        let raw_templates = fetcher.fetch(channel).await?;
        let summary = TemplateStore::new(self.ctx)
            .update_local_templates(channel, &raw_templates)
            .await?;

        // templates are already stored; a stale incident is retried next run
        if let Err(err) = IncidentPolicy::new(self.ctx).record_success(channel).await {
            error!(error = %err, "Error ending template sync incident");
        }

        info!(
            stored = summary.stored,
            skipped = summary.skipped,
            deactivated = summary.deactivated,
            "Channel templates synced"
        );

        Ok(summary)
    }
}
