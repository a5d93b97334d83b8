//! HTTP surface: `POST /v1/eco-route`.
//!
//! Validates the request, runs the blocking planner off the async executor
//! and maps failures onto status codes.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde::{Deserialize, Serialize};

use crate::format::EcoRouteResponse;
use crate::planner::{PlanOptions, PlanRequest, plan};
use crate::traits::GeoLookup;

#[derive(Clone)]
pub struct AppState {
    pub lookup: Arc<dyn GeoLookup>,
    pub options: PlanOptions,
}

impl AppState {
    pub fn new(lookup: Arc<dyn GeoLookup>, options: PlanOptions) -> Self {
        Self { lookup, options }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EcoRouteRequest {
    pub origin: String,
    pub destination: String,
    pub food_preference: String,
    /// Meters.
    pub ev_range: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

/// An error response with its status code.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

pub fn router(state: AppState) -> axum::Router {
    axum::Router::new()
        .route("/v1/eco-route", post(eco_route))
        .route("/healthz", get(healthz))
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

pub async fn eco_route(
    State(state): State<AppState>,
    Json(r): Json<EcoRouteRequest>,
) -> Result<Json<EcoRouteResponse>, ApiError> {
    let request = validate(r)?;
    let AppState { lookup, options } = state;

    let outcome = tokio::task::spawn_blocking(move || plan(&request, lookup.as_ref(), &options))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "planner task did not complete");
            ApiError::internal("internal error")
        })?;

    match outcome {
        Ok(response) => Ok(Json(response)),
        Err(err) => {
            tracing::error!(error = %err, "eco-route request failed");
            Err(ApiError::internal("lookup failed"))
        }
    }
}

/// Rejects blank fields and out-of-range EV ranges.
pub fn validate(r: EcoRouteRequest) -> Result<PlanRequest, ApiError> {
    for (name, value) in [
        ("origin", &r.origin),
        ("destination", &r.destination),
        ("food_preference", &r.food_preference),
    ] {
        if value.trim().is_empty() {
            return Err(ApiError::bad_request(format!("{name} must not be empty")));
        }
    }

    let ev_range_m = u32::try_from(r.ev_range)
        .ok()
        .filter(|&m| m > 0)
        .ok_or_else(|| ApiError::bad_request("ev_range must be a positive number of meters"))?;

    Ok(PlanRequest {
        origin: r.origin,
        destination: r.destination,
        food_preference: r.food_preference,
        ev_range_m,
    })
}
