/// HTTP request handlers
use crate::clients::HttpClient;
use crate::domain::{Configuration, Health, MergedResult, State as DsnState};
use crate::errors::ApiError;
use crate::services::DsnService;
use axum::{extract::State, Json};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<DsnService<HttpClient>>,
    pub max_config_age: chrono::Duration,
}

/// Successful response wrapper
#[derive(Serialize)]
pub struct SuccessResponse<T: Serialize> {
    pub ok: bool,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Serialize> SuccessResponse<T> {
    pub fn new(data: T) -> Self {
        Self { ok: true, data }
    }
}

/// Health check handler
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        now: Utc::now(),
    })
}

/// Refetch the configuration document
pub async fn get_configuration(
    State(state): State<AppState>,
) -> Result<Json<SuccessResponse<Configuration>>, ApiError> {
    let configuration = state.service.fetch_configuration().await.map_err(|e| {
        warn!("configuration request failed: {}", e);
        e
    })?;
    Ok(Json(SuccessResponse::new(configuration.as_ref().clone())))
}

/// Fetch the live-state document
pub async fn get_state(
    State(state): State<AppState>,
) -> Result<Json<SuccessResponse<DsnState>>, ApiError> {
    let dsn_state = state.service.fetch_state().await.map_err(|e| {
        warn!("state request failed: {}", e);
        e
    })?;
    Ok(Json(SuccessResponse::new(dsn_state)))
}

/// Merged configuration and live state
pub async fn get_merged(
    State(state): State<AppState>,
) -> Result<Json<SuccessResponse<MergedResult>>, ApiError> {
    let merged = state
        .service
        .fetch_merged(state.max_config_age)
        .await
        .map_err(|e| {
            warn!("merged request failed: {}", e);
            e
        })?;
    Ok(Json(SuccessResponse::new(merged)))
}
