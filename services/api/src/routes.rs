use crate::infra::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use damage_estimator::error::AppError;
use damage_estimator::pricing::{
    assess, AssessmentRequest, DamageAssessment, DamageDetection, VehicleSignal,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::atomic::Ordering;
use tracing::info;

#[derive(Debug, Deserialize)]
pub(crate) struct DamageReportRequest {
    #[serde(default)]
    pub(crate) detections: Vec<DamageDetection>,
    #[serde(default)]
    pub(crate) key: Option<String>,
    #[serde(default)]
    pub(crate) image_sha256: Option<String>,
    #[serde(default)]
    pub(crate) vehicle: Option<VehicleSignal>,
}

impl DamageReportRequest {
    /// An explicit key wins over the image digest; empty strings count as absent.
    fn reproducibility_key(&self) -> Option<&str> {
        non_empty(&self.key).or_else(|| non_empty(&self.image_sha256))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/catalog", get(catalog_endpoint))
        .route("/api/v1/damage/report", post(damage_report_endpoint))
        .with_state(state)
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn catalog_endpoint(State(state): State<AppState>) -> Response {
    Json(state.catalog.as_ref()).into_response()
}

/// Parses the body itself so malformed payloads surface as `AppError::Input`.
pub(crate) async fn damage_report_endpoint(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<DamageAssessment>, AppError> {
    let payload: DamageReportRequest = serde_json::from_slice(&body)?;
    Ok(Json(price_request(&state, &payload)))
}

fn price_request(state: &AppState, payload: &DamageReportRequest) -> DamageAssessment {
    let key = payload.reproducibility_key();
    info!(
        detections = payload.detections.len(),
        keyed = key.is_some(),
        vehicle = ?payload.vehicle.map(|signal| signal.is_vehicle),
        "damage report requested"
    );

    let engine = state.engine();
    assess(
        &engine,
        AssessmentRequest {
            vehicle: payload.vehicle,
            detections: &payload.detections,
            key,
            min_confidence: state.min_detection_confidence,
        },
    )
}
