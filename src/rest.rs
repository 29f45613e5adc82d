// Copyright 2026 Vulntrack Contributors
// SPDX-License-Identifier: Apache-2.0

//! HTTP REST API for the bulletin tracker.
//!
//! Thin plumbing over the pipeline: resolve sources via the registry,
//! dispatch scrape passes, render the results as JSON. Cross-origin
//! access is unrestricted.

use crate::aggregate;
use crate::error::TrackerError;
use crate::fetch::PageFetcher;
use crate::model::Stats;
use crate::registry::SourceRegistry;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Shared state for all REST handlers. Read-only after startup.
pub struct AppState {
    pub fetcher: PageFetcher,
    pub registry: SourceRegistry,
}

impl AppState {
    pub fn new(registry: SourceRegistry) -> Self {
        Self {
            fetcher: PageFetcher::new(),
            registry,
        }
    }
}

/// Build the axum Router with all endpoints.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/bulletins", get(handle_bulletins))
        .route("/stats", get(handle_stats))
        .route("/health", get(handle_health))
        .layer(cors)
        .with_state(state)
}

/// Bind the listener and serve until shutdown.
pub async fn serve(addr: SocketAddr, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = router(state);
    tracing::info!("REST API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

// ── Handlers ────────────────────────────────────────────────────

#[derive(serde::Deserialize, Default)]
struct BulletinsParams {
    product: Option<String>,
}

/// `GET /bulletins?product=<key>` — one source when `product` is given,
/// all registered sources otherwise.
async fn handle_bulletins(
    Query(params): Query<BulletinsParams>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, TrackerError> {
    let (product, bulletins) = match params.product {
        Some(key) => {
            let source = state
                .registry
                .get(&key)
                .ok_or_else(|| TrackerError::UnknownSource(key.clone()))?;
            let records = aggregate::scrape_source(&state.fetcher, source).await?;
            (key, records)
        }
        None => {
            let records = aggregate::scrape_all(&state.fetcher, &state.registry).await?;
            ("all".to_string(), records)
        }
    };

    Ok(Json(json!({
        "product": product,
        "count": bulletins.len(),
        "bulletins": bulletins,
    })))
}

/// `GET /stats` — verdict counts over all registered sources.
async fn handle_stats(State(state): State<Arc<AppState>>) -> Result<Json<Stats>, TrackerError> {
    let records = aggregate::scrape_all(&state.fetcher, &state.registry).await?;
    Ok(Json(aggregate::compute_stats(&records)))
}

/// `GET /health` — liveness only, never touches upstream.
async fn handle_health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
