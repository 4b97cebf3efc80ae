mod agent;
mod analytics;
mod auth;
mod config;
mod errors;
mod generation;
mod jobs;
mod llm_client;
mod models;
mod routes;
mod screening;
mod state;
mod storage;
mod store;

use anyhow::{Context, Result};
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::{Config, S3Config, StorageBackend};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::screening::scoring::{CvScorer, EnrichedCvScorer, KeywordCvScorer};
use crate::state::AppState;
use crate::storage::{LocalResumeStorage, ResumeStorage, S3ResumeStorage};
use crate::store::{seed, RecordStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{}={},tower_http=info",
            env!("CARGO_CRATE_NAME"),
            &config.rust_log
        ))
    });
    let registry = tracing_subscriber::registry().with(filter);
    if config.json_logs {
        registry.with(fmt::layer().json().with_target(false)).init();
    } else {
        registry.with(fmt::layer()).init();
    }

    info!("Starting ATS API v{}", env!("CARGO_PKG_VERSION"));

    // In-memory record store with built-in organizations
    let store = RecordStore::new();
    seed::install_builtin(&store).await;
    if config.seed_demo_data {
        seed::install_demo_data(&store).await;
    }

    // Resume storage
    let storage: Arc<dyn ResumeStorage> = match config.storage_backend {
        StorageBackend::S3 => {
            let s3 = config
                .s3
                .as_ref()
                .context("STORAGE_BACKEND=s3 requires S3 settings")?;
            Arc::new(S3ResumeStorage::new(
                build_s3_client(s3).await,
                s3.bucket.clone(),
            ))
        }
        StorageBackend::Local => Arc::new(LocalResumeStorage::new(config.upload_dir.clone())),
    };
    info!("Resume storage initialized (backend: {})", storage.backend());

    // Optional LLM enrichment
    let llm = match &config.gemini_api_key {
        Some(key) => {
            let client = LlmClient::new(key.clone(), config.llm_timeout)?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(client)
        }
        None => None,
    };

    let cv_scorer: Arc<dyn CvScorer> = match &llm {
        Some(client) => Arc::new(EnrichedCvScorer(client.clone())),
        None => Arc::new(KeywordCvScorer),
    };
    info!("CV scorer: {}", cv_scorer.backend());

    // Build app state
    let state = AppState {
        store: Arc::new(store),
        storage,
        llm,
        config: config.clone(),
        cv_scorer,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once a frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(s3: &S3Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &s3.access_key_id,
        &s3.secret_access_key,
        None,
        None,
        "ats-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&s3.endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}
