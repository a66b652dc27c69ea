pub mod config;
pub mod delivery;
pub mod error;
pub mod form;
pub mod routes;
pub mod state;
pub mod stores;
pub mod submission;

use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::delivery::{BlobStore, WebhookSink};
use crate::state::{AppState, SharedState};
use crate::stores::StoreDirectory;

pub fn build_app(config: Config) -> Router {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .expect("Failed to build reqwest client");

    let stores = config
        .sheets
        .clone()
        .map(|sheets| StoreDirectory::new(sheets, client.clone(), config.store_cache_ttl));
    if stores.is_none() {
        tracing::warn!("Sheets not configured; the store directory is unavailable");
    }

    let webhook = config
        .webhook
        .clone()
        .map(|webhook| WebhookSink::new(webhook, client.clone()));
    if webhook.is_none() {
        tracing::warn!("Webhook not configured; submissions will be rejected");
    }

    let blob = config
        .blob
        .clone()
        .map(|blob| BlobStore::new(blob, client.clone()));
    if blob.is_none() {
        tracing::warn!("Blob store not configured; evidence attachments will be dropped");
    }

    let max_body_size = config.max_body_size;

    let state: SharedState = Arc::new(AppState {
        config,
        stores,
        webhook,
        blob,
    });

    Router::new()
        .merge(routes::api_routes())
        .route("/health", axum::routing::get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(max_body_size))
                .layer(CorsLayer::permissive())
                .layer(SetResponseHeaderLayer::overriding(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    HeaderName::from_static("x-frame-options"),
                    HeaderValue::from_static("DENY"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    HeaderName::from_static("referrer-policy"),
                    HeaderValue::from_static("strict-origin-when-cross-origin"),
                )),
        )
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
