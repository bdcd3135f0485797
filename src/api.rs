// HTTP Surface
//
// Routes used by the Mini App host and operator dashboards.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use prometheus::{Encoder, TextEncoder};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::error;

use crate::eligibility::{BoostInput, Decision, SecondChanceInput};
use crate::metrics::AppMetrics;
use crate::models::{AnalyticsEventRecord, MetricsSummary, NewEvent};
use crate::pricing::PricingOffer;
use crate::service::UpsellService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<UpsellService>,
    pub metrics: Arc<AppMetrics>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/pricing", get(pricing_handler))
        .route("/eligibility/boost", post(boost_handler))
        .route("/eligibility/second-chance", post(second_chance_handler))
        .route("/events", post(track_handler))
        .route("/contests/:contest_id/metrics", get(contest_metrics_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_handler() -> &'static str {
    "OK"
}

async fn metrics_handler(State(state): State<AppState>) -> Response {
    let encoder = TextEncoder::new();
    let metric_families = state.metrics.registry.gather();

    match encoder.encode_to_string(&metric_families) {
        Ok(output) => ([(header::CONTENT_TYPE, encoder.format_type().to_string())], output).into_response(),
        Err(e) => {
            error!("Failed to encode metrics: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn pricing_handler(State(state): State<AppState>) -> Json<[PricingOffer; 2]> {
    Json(state.service.pricing())
}

async fn boost_handler(State(state): State<AppState>, Json(input): Json<BoostInput>) -> Json<Decision> {
    Json(state.service.evaluate_boost(&input))
}

async fn second_chance_handler(
    State(state): State<AppState>,
    Json(input): Json<SecondChanceInput>,
) -> Json<Decision> {
    Json(state.service.evaluate_second_chance(&input))
}

async fn track_handler(
    State(state): State<AppState>,
    Json(event): Json<NewEvent>,
) -> (StatusCode, Json<AnalyticsEventRecord>) {
    (StatusCode::ACCEPTED, Json(state.service.track(event)))
}

async fn contest_metrics_handler(
    State(state): State<AppState>,
    Path(contest_id): Path<String>,
) -> Json<MetricsSummary> {
    Json(state.service.event_metrics(&contest_id))
}
