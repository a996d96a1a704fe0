//! KYC Verification Dashboard Backend
//!
//! Headless backend for an identity-verification dashboard. It keeps the
//! dashboard's state server-side, produces mock verification results and
//! persists them in a local key-value store.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   KYC DASHBOARD BACKEND                     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐      ┌─────────────────────────────────────┐ │
//! │  │  HTTP API │ ───► │  ViewController                     │ │
//! │  │  (Axum)   │      │  page · form · filters · loading    │ │
//! │  └───────────┘      └──────┬─────────────────────┬────────┘ │
//! │                            ▼                     ▼          │
//! │               ┌──────────────────────┐ ┌──────────────────┐ │
//! │               │ VerificationProvider │ │   RecordStore    │ │
//! │               │ (random mock)        │ │ (prefixed KV)    │ │
//! │               └──────────────────────┘ └──────────────────┘ │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Verification outcomes are random placeholders. Nothing here assesses
//! identity documents, addresses or fraud risk.

pub mod config;
pub mod controller;
pub mod error;
pub mod handlers;
pub mod models;
pub mod provider;
pub mod store;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};

pub use config::Config;
pub use controller::ViewController;
pub use error::{AppError, AppResult};

use provider::{RandomProvider, VerificationProvider};
use store::{FileKeyValueStore, LocalRecordStore, MemoryKeyValueStore, RecordStore, StoreError};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub controller: ViewController,
    pub config: Config,
}

impl AppState {
    /// Wire the configured store and the mock provider, then load history
    pub async fn from_config(config: Config) -> Result<Self, StoreError> {
        let store: Arc<dyn RecordStore> = match &config.data_dir {
            Some(dir) => {
                tracing::info!("Records persisted under {}", dir.display());
                Arc::new(LocalRecordStore::with_prefix(
                    FileKeyValueStore::open(dir)?,
                    config.storage_prefix.clone(),
                ))
            }
            None => {
                tracing::info!("Records kept in memory ({} byte quota)", config.store_quota_bytes);
                Arc::new(LocalRecordStore::with_prefix(
                    MemoryKeyValueStore::with_quota(config.store_quota_bytes),
                    config.storage_prefix.clone(),
                ))
            }
        };

        let provider: Arc<dyn VerificationProvider> =
            Arc::new(RandomProvider::new(config.verification_delay()));

        Ok(Self::with_parts(store, provider, config).await)
    }

    /// Wire explicit store and provider implementations
    pub async fn with_parts(
        store: Arc<dyn RecordStore>,
        provider: Arc<dyn VerificationProvider>,
        config: Config,
    ) -> Self {
        let controller = ViewController::load(store, provider).await;
        Self { controller, config }
    }
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/v1/about", get(handlers::about::get));

    // Dashboard session (page, form, filters, submit)
    let view_routes = Router::new()
        .route("/api/v1/view", get(handlers::view::snapshot))
        .route("/api/v1/view/navigate", post(handlers::view::navigate))
        .route("/api/v1/view/form", put(handlers::view::update_form))
        .route("/api/v1/view/filters", put(handlers::view::update_filters))
        .route("/api/v1/view/submit", post(handlers::view::submit));

    let record_routes = Router::new()
        .route("/api/v1/dashboard", get(handlers::dashboard::summary))
        .route("/api/v1/results/latest", get(handlers::history::latest))
        .route("/api/v1/history", get(handlers::history::list))
        .route("/api/v1/history/:id", get(handlers::history::get))
        .route("/api/v1/verifications", post(handlers::verifications::create))
        .route("/api/v1/uploads", post(handlers::uploads::acknowledge));

    Router::new()
        .merge(public_routes)
        .merge(view_routes)
        .merge(record_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
