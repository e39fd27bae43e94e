//! # tmplsync-worker
//!
//! Wires the Postgres repositories and vendor fetchers into a
//! [`ServiceContext`] and runs the template sync on a fixed interval.

use std::path::Path;
use std::sync::Arc;

use tokio::time::MissedTickBehavior;
use tracing::{error, info};

use tmplsync_common::{AppConfig, AppError, AppResult};
use tmplsync_core::SnowflakeGenerator;
use tmplsync_db::{
    create_pool, run_migrations, PgChannelRepository, PgHttpLogRepository, PgIncidentRepository,
    PgOrganizationRepository, PgTemplateRepository, PgTranslationRepository, PoolConfig,
    DEFAULT_MIGRATIONS_DIR,
};
use tmplsync_service::{
    ServiceContext, ServiceContextBuilder, SyncReport, SyncService, VendorHttp, VendorRegistry,
};

/// Initialize all dependencies and create the service context
pub async fn create_service_context(config: &AppConfig) -> AppResult<ServiceContext> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&PoolConfig::from(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    run_migrations(&pool, Path::new(DEFAULT_MIGRATIONS_DIR))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    let client = reqwest::Client::builder()
        .timeout(config.sync.http_timeout())
        .build()
        .map_err(|e| AppError::ExternalService(e.to_string()))?;

    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));

    // Create repositories
    let org_repo = Arc::new(PgOrganizationRepository::new(pool.clone()));
    let channel_repo = Arc::new(PgChannelRepository::new(pool.clone()));
    let template_repo = Arc::new(PgTemplateRepository::new(pool.clone()));
    let translation_repo = Arc::new(PgTranslationRepository::new(pool.clone()));
    let http_log_repo = Arc::new(PgHttpLogRepository::new(pool.clone()));
    let incident_repo = Arc::new(PgIncidentRepository::new(pool));

    let http = VendorHttp::new(client, http_log_repo.clone(), snowflake_generator.clone());
    let registry = VendorRegistry::with_defaults(http, &config.vendors);
    info!(channel_types = ?registry.channel_types(), "Vendor fetchers registered");

    let ctx = ServiceContextBuilder::new()
        .org_repo(org_repo)
        .channel_repo(channel_repo)
        .template_repo(template_repo)
        .translation_repo(translation_repo)
        .http_log_repo(http_log_repo)
        .incident_repo(incident_repo)
        .registry(Arc::new(registry))
        .snowflake_generator(snowflake_generator)
        .incident_threshold(config.sync.incident_failure_threshold)
        .build()?;

    Ok(ctx)
}

/// Run a single sync over every eligible channel
pub async fn sync_once(ctx: &ServiceContext) -> AppResult<SyncReport> {
    let report = SyncService::new(ctx).refresh_templates().await?;
    info!(
        synced = report.synced,
        failed = report.failed,
        errored = report.errored,
        "Template sync finished"
    );
    Ok(report)
}

/// Run the worker until it is interrupted, or once when `run_once` is set
pub async fn run(config: AppConfig) -> AppResult<()> {
    let ctx = create_service_context(&config).await?;

    if config.sync.run_once {
        sync_once(&ctx).await?;
        return Ok(());
    }

    info!(interval_secs = config.sync.interval_secs, "Starting template sync loop");

    let mut ticker = tokio::time::interval(config.sync.interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                // a failed run is retried on the next tick
                if let Err(e) = sync_once(&ctx).await {
                    error!(error = %e, code = e.error_code(), "Template sync failed");
                }
            }
            result = &mut shutdown => {
                if let Err(e) = result {
                    error!(error = %e, "Failed to listen for shutdown signal");
                }
                info!("Shutdown signal received, stopping");
                break;
            }
        }
    }

    Ok(())
}
