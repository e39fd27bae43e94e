//! Sync orchestration tests: per-channel isolation and incident handling

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tmplsync_core::traits::{
    ChannelRepository, HttpLogRepository, IncidentRepository, OrganizationRepository, RepoResult,
};
use tmplsync_core::{
    config_keys, Channel, ChannelType, DomainError, HttpLog, HttpLogType, Incident, IncidentType,
    Organization, Snowflake, SnowflakeGenerator,
};
use tmplsync_db::MemoryStore;
use tmplsync_service::fetch::Dialog360Fetcher;
use tmplsync_service::{
    FetchError, IncidentPolicy, ServiceContext, SyncReport, SyncService, TemplateFetcher, VendorHttp,
    VendorRegistry,
};

/// Fetcher that replays canned results, then keeps returning an empty list
struct ScriptedFetcher {
    results: Mutex<VecDeque<Result<Vec<Value>, FetchError>>>,
}

impl ScriptedFetcher {
    fn new(results: Vec<Result<Vec<Value>, FetchError>>) -> Self {
        Self {
            results: Mutex::new(results.into()),
        }
    }
}

#[async_trait]
impl TemplateFetcher for ScriptedFetcher {
    async fn fetch(&self, _channel: &Channel) -> Result<Vec<Value>, FetchError> {
        self.results.lock().unwrap().pop_front().unwrap_or(Ok(vec![]))
    }
}

/// Incident repository whose lookups fail
struct BrokenIncidents;

#[async_trait]
impl IncidentRepository for BrokenIncidents {
    async fn find_open(&self, _: Snowflake, _: IncidentType) -> RepoResult<Option<Incident>> {
        Err(DomainError::DatabaseError("connection reset".to_string()))
    }

    async fn create(&self, _: &Incident) -> RepoResult<()> {
        Err(DomainError::DatabaseError("connection reset".to_string()))
    }

    async fn end(&self, _: Snowflake, _: DateTime<Utc>) -> RepoResult<()> {
        Err(DomainError::DatabaseError("connection reset".to_string()))
    }
}

/// Incident repository whose first lookup misses an incident opened elsewhere
struct StaleLookup {
    store: Arc<MemoryStore>,
    stale: Mutex<bool>,
}

#[async_trait]
impl IncidentRepository for StaleLookup {
    async fn find_open(&self, channel_id: Snowflake, incident_type: IncidentType) -> RepoResult<Option<Incident>> {
        if std::mem::replace(&mut *self.stale.lock().unwrap(), false) {
            return Ok(None);
        }
        IncidentRepository::find_open(&*self.store, channel_id, incident_type).await
    }

    async fn create(&self, incident: &Incident) -> RepoResult<()> {
        IncidentRepository::create(&*self.store, incident).await
    }

    async fn end(&self, id: Snowflake, ended_on: DateTime<Utc>) -> RepoResult<()> {
        IncidentRepository::end(&*self.store, id, ended_on).await
    }
}

fn context_with_incidents(
    store: &Arc<MemoryStore>,
    incidents: Arc<dyn IncidentRepository>,
    registry: VendorRegistry,
    ids: Arc<SnowflakeGenerator>,
) -> ServiceContext {
    ServiceContext::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        incidents,
        Arc::new(registry),
        ids,
        1,
    )
}

async fn add_org(store: &MemoryStore, ids: &SnowflakeGenerator, suspended: bool) -> Organization {
    let mut org = Organization::new(ids.generate(), "Nyaruka");
    org.is_suspended = suspended;
    OrganizationRepository::create(store, &org).await.unwrap();
    org
}

async fn add_channel(store: &MemoryStore, channel: Channel) -> Channel {
    ChannelRepository::create(store, &channel).await.unwrap();
    channel
}

fn hello() -> Value {
    json!({
        "id": "1234",
        "name": "hello",
        "language": "en",
        "status": "APPROVED",
        "components": [{"type": "BODY", "text": "Hello {{1}}"}]
    })
}

#[tokio::test]
async fn test_errors_stay_within_channel() {
    let store = Arc::new(MemoryStore::new());
    let ids = Arc::new(SnowflakeGenerator::new(1));
    let org = add_org(&store, &ids, false).await;
    let suspended = add_org(&store, &ids, true).await;

    let wac = add_channel(&store, Channel::new(ids.generate(), org.id, "WAC", ChannelType::WhatsAppCloud)).await;
    let twa = add_channel(&store, Channel::new(ids.generate(), org.id, "TWA", ChannelType::TwilioWhatsApp)).await;
    add_channel(&store, Channel::new(ids.generate(), org.id, "Telegram", ChannelType::from_code("TG"))).await;
    let other_org = add_channel(
        &store,
        Channel::new(ids.generate(), suspended.id, "WAC", ChannelType::WhatsAppCloud),
    )
    .await;

    let registry = VendorRegistry::new()
        .register(
            ChannelType::WhatsAppCloud,
            Arc::new(ScriptedFetcher::new(vec![Ok(vec![hello()])])),
        )
        .register(
            ChannelType::TwilioWhatsApp,
            Arc::new(ScriptedFetcher::new(vec![Err(FetchError::Domain(
                DomainError::MissingChannelConfig {
                    channel_id: twa.id,
                    key: config_keys::ACCOUNT_SID.to_string(),
                },
            ))])),
        );
    let ctx = ServiceContext::from_store(store.clone(), Arc::new(registry), ids);

    let report = SyncService::new(&ctx).refresh_templates().await.unwrap();

    assert_eq!(
        report,
        SyncReport {
            synced: 1,
            failed: 0,
            errored: 1
        }
    );
    assert_eq!(store.translations_for_channel(wac.id).len(), 1);
    assert!(store.translations_for_channel(other_org.id).is_empty());
    assert!(store.incidents_for_channel(twa.id).is_empty());
}

#[tokio::test]
async fn test_incident_after_repeated_failures() {
    let server = MockServer::start().await;
    let store = Arc::new(MemoryStore::new());
    let ids = Arc::new(SnowflakeGenerator::new(1));
    let org = add_org(&store, &ids, false).await;
    let channel = add_channel(
        &store,
        Channel::new(ids.generate(), org.id, "D3C", ChannelType::Dialog360Cloud)
            .with_config(config_keys::BASE_URL, server.uri())
            .with_config(config_keys::AUTH_TOKEN, "123456789"),
    )
    .await;

    let http = VendorHttp::new(reqwest::Client::new(), store.clone(), ids.clone());
    let registry = VendorRegistry::new()
        .register(ChannelType::Dialog360Cloud, Arc::new(Dialog360Fetcher::new(http)));
    let ctx = ServiceContext::from_store(store.clone(), Arc::new(registry), ids);
    let sync = SyncService::new(&ctx);

    Mock::given(method("GET"))
        .and(path("/v1/configs/templates"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    for _ in 0..4 {
        let report = sync.refresh_templates().await.unwrap();
        assert_eq!(report.failed, 1);
    }
    assert!(store.incidents_for_channel(channel.id).is_empty());

    sync.refresh_templates().await.unwrap();
    let incidents = store.incidents_for_channel(channel.id);
    assert_eq!(incidents.len(), 1);
    assert!(incidents[0].is_open());
    assert_eq!(incidents[0].incident_type, IncidentType::ChannelTemplatesFailed);

    // further failures reuse the open incident
    sync.refresh_templates().await.unwrap();
    assert_eq!(store.incidents_for_channel(channel.id).len(), 1);

    server.reset().await;
    Mock::given(method("GET"))
        .and(path("/v1/configs/templates"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"waba_templates": [hello()]})))
        .mount(&server)
        .await;

    let report = sync.refresh_templates().await.unwrap();
    assert_eq!(report.synced, 1);

    let incidents = store.incidents_for_channel(channel.id);
    assert_eq!(incidents.len(), 1);
    assert!(!incidents[0].is_open());
    assert_eq!(store.http_logs_for_channel(channel.id).len(), 7);
}

#[tokio::test]
async fn test_success_resets_failure_streak() {
    let store = Arc::new(MemoryStore::new());
    let ids = Arc::new(SnowflakeGenerator::new(1));
    let org = add_org(&store, &ids, false).await;
    let server = MockServer::start().await;
    let channel = add_channel(
        &store,
        Channel::new(ids.generate(), org.id, "D3", ChannelType::Dialog360Legacy)
            .with_config(config_keys::BASE_URL, server.uri())
            .with_config(config_keys::AUTH_TOKEN, "123456789"),
    )
    .await;

    let http = VendorHttp::new(reqwest::Client::new(), store.clone(), ids.clone());
    let registry = VendorRegistry::new()
        .register(ChannelType::Dialog360Legacy, Arc::new(Dialog360Fetcher::new(http)));
    let ctx = ServiceContext::from_store(store.clone(), Arc::new(registry), ids).with_incident_threshold(2);
    let sync = SyncService::new(&ctx);

    // fail, succeed, fail: never two failures in a row
    for status in [500, 200, 500] {
        server.reset().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({"waba_templates": []})))
            .mount(&server)
            .await;
        sync.refresh_templates().await.unwrap();
    }
    assert!(store.incidents_for_channel(channel.id).is_empty());

    sync.refresh_templates().await.unwrap();
    assert_eq!(store.incidents_for_channel(channel.id).len(), 1);
}

#[tokio::test]
async fn test_incident_error_after_reconcile_counts_as_synced() {
    let store = Arc::new(MemoryStore::new());
    let ids = Arc::new(SnowflakeGenerator::new(1));
    let org = add_org(&store, &ids, false).await;
    let wac = add_channel(&store, Channel::new(ids.generate(), org.id, "WAC", ChannelType::WhatsAppCloud)).await;

    let registry = VendorRegistry::new().register(
        ChannelType::WhatsAppCloud,
        Arc::new(ScriptedFetcher::new(vec![Ok(vec![hello()])])),
    );
    let ctx = context_with_incidents(&store, Arc::new(BrokenIncidents), registry, ids);

    let report = SyncService::new(&ctx).refresh_templates().await.unwrap();

    assert_eq!(
        report,
        SyncReport {
            synced: 1,
            failed: 0,
            errored: 0
        }
    );
    assert_eq!(store.translations_for_channel(wac.id).len(), 1);
}

#[tokio::test]
async fn test_racing_incident_open_returns_existing() {
    let store = Arc::new(MemoryStore::new());
    let ids = Arc::new(SnowflakeGenerator::new(1));
    let org = add_org(&store, &ids, false).await;
    let channel = add_channel(&store, Channel::new(ids.generate(), org.id, "D3C", ChannelType::Dialog360Cloud)).await;

    HttpLogRepository::create(
        &*store,
        &HttpLog {
            id: ids.generate(),
            org_id: org.id,
            channel_id: channel.id,
            log_type: HttpLogType::WhatsappTemplatesSynced,
            url: "https://waba.example/v1/configs/templates".to_string(),
            status_code: Some(500),
            request_time_ms: 12,
            is_error: true,
            created_on: Utc::now(),
        },
    )
    .await
    .unwrap();

    // opened by a concurrent run after our lookup
    let existing = Incident::open(ids.generate(), org.id, channel.id, IncidentType::ChannelTemplatesFailed);
    IncidentRepository::create(&*store, &existing).await.unwrap();

    let incidents = Arc::new(StaleLookup {
        store: store.clone(),
        stale: Mutex::new(true),
    });
    let ctx = context_with_incidents(&store, incidents, VendorRegistry::new(), ids);

    let incident = IncidentPolicy::new(&ctx).record_failure(&channel).await.unwrap();

    assert_eq!(incident.map(|i| i.id), Some(existing.id));
    assert_eq!(store.incidents_for_channel(channel.id).len(), 1);
}
