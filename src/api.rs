//! HTTP API for the Cooler Engine.
//!
//! This module exposes a minimal REST API around the estimator using
//! the [`axum`](https://crates.io/crates/axum) framework.  Clients
//! submit location inputs and receive the projected figures in JSON or
//! as a plain-text summary.  The server validates every input through
//! the same engine used by library callers.

use crate::config::Config;
use crate::engine::{compute, compute_batch, sweep_foot_traffic};
use crate::error::EstimateError;
use crate::models::{EstimateInput, EstimateResult};
use crate::params::{load_parameters, BusinessParameters};
use crate::report::render_summary;
use anyhow::Result;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

/// Application state shared across requests.
pub struct AppState {
    pub params: RwLock<BusinessParameters>,
}

/// Request body for `POST /api/sweep`.
#[derive(Debug, Clone, Deserialize)]
pub struct SweepRequest {
    pub base: EstimateInput,
    pub from: u32,
    pub to: u32,
    #[serde(default = "default_sweep_step")]
    pub step: u32,
}

fn default_sweep_step() -> u32 {
    100
}

#[derive(Serialize)]
#[serde(untagged)]
enum BatchEntry {
    Ok { ok: EstimateResult },
    Err { error: String, field: &'static str },
}

/// Build the API router from already loaded parameters.
pub fn router(params: BusinessParameters) -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState {
        params: RwLock::new(params),
    });
    let router = Router::new()
        .route("/api/estimate", post(estimate_handler))
        .route("/api/estimate/batch", post(batch_handler))
        .route("/api/estimate/summary", post(summary_handler))
        .route("/api/sweep", post(sweep_handler))
        .route("/api/parameters", get(parameters_handler))
        .with_state(state.clone());
    (router, state)
}

/// Build the API router and load business parameters from the given
/// file.  Returns the router and a handle to the state.
pub async fn build_router(params_file: &Path) -> Result<(Router, Arc<AppState>)> {
    let params = load_parameters(params_file)?;
    Ok(router(params))
}

fn rejection(err: EstimateError) -> Response {
    warn!(field = err.field(), "rejected estimate input: {err}");
    let body = Json(serde_json::json!({"error": err.to_string(), "field": err.field()}));
    (StatusCode::UNPROCESSABLE_ENTITY, body).into_response()
}

/// Handler for POST /api/estimate
async fn estimate_handler(
    State(app_state): State<Arc<AppState>>,
    Json(input): Json<EstimateInput>,
) -> Response {
    let params = app_state.params.read().await;
    match compute(&input, &params) {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(err) => rejection(err),
    }
}

/// Handler for POST /api/estimate/batch
async fn batch_handler(
    State(app_state): State<Arc<AppState>>,
    Json(inputs): Json<Vec<EstimateInput>>,
) -> Response {
    let params = app_state.params.read().await.clone();
    let outcome = tokio::task::spawn_blocking(move || compute_batch(&inputs, &params)).await;
    match outcome {
        Ok(results) => {
            let entries: Vec<BatchEntry> = results
                .into_iter()
                .map(|result| match result {
                    Ok(ok) => BatchEntry::Ok { ok },
                    Err(err) => BatchEntry::Err {
                        error: err.to_string(),
                        field: err.field(),
                    },
                })
                .collect();
            (StatusCode::OK, Json(entries)).into_response()
        }
        Err(err) => {
            error!("batch estimate task failed: {err}");
            let body = Json(serde_json::json!({"error": err.to_string()}));
            (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
        }
    }
}

/// Handler for POST /api/estimate/summary
async fn summary_handler(
    State(app_state): State<Arc<AppState>>,
    Json(input): Json<EstimateInput>,
) -> Response {
    let params = app_state.params.read().await;
    match compute(&input, &params) {
        Ok(result) => (StatusCode::OK, render_summary(&input, &params, &result)).into_response(),
        Err(err) => rejection(err),
    }
}

/// Handler for POST /api/sweep
async fn sweep_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<SweepRequest>,
) -> Response {
    let params = app_state.params.read().await.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        sweep_foot_traffic(&request.base, request.from, request.to, request.step, &params)
    })
    .await;
    match outcome {
        Ok(Ok(points)) => (StatusCode::OK, Json(points)).into_response(),
        Ok(Err(err)) => rejection(err),
        Err(err) => {
            error!("sweep task failed: {err}");
            let body = Json(serde_json::json!({"error": err.to_string()}));
            (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
        }
    }
}

/// Handler for GET /api/parameters
async fn parameters_handler(State(app_state): State<Arc<AppState>>) -> impl IntoResponse {
    let params = app_state.params.read().await;
    Json(params.clone())
}

/// Launch the API server.  This function loads the parameters named
/// by `config` and binds to its address.  It blocks until the server
/// terminates (e.g. when interrupted).
pub async fn serve(config: &Config) -> Result<()> {
    let (router, _state) = build_router(&config.params_file).await?;
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Server listening on {}", config.bind_addr);
    axum::serve(listener, router).await?;
    Ok(())
}
