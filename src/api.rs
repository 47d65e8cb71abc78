//! HTTP API for trip planning

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Deserialize;
use serde_json::json;

use crate::error::TripPlanError;
use crate::models::TripPlan;
use crate::planner::TripPlanner;

/// Shared application state, one planner for all requests
pub struct AppState {
    pub planner: TripPlanner,
}

/// Request body for `POST /api/plan-trip`
#[derive(Debug, Deserialize)]
pub struct PlanTripRequest {
    /// A missing field is treated the same as an empty location
    #[serde(default)]
    pub location: String,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/plan-trip", post(plan_trip))
        .with_state(state)
}

async fn plan_trip(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PlanTripRequest>,
) -> Result<Json<TripPlan>, TripPlanError> {
    let plan = state.planner.plan_trip(&request.location).await?;
    Ok(Json(plan))
}

/// Map the tagged error onto the wire contract. Provider and configuration
/// failures collapse into one generic response; the underlying cause is
/// logged server-side and never exposed to the caller.
impl IntoResponse for TripPlanError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            TripPlanError::Validation { .. } => (StatusCode::BAD_REQUEST, "Location is required"),
            TripPlanError::NotFound { .. } => (StatusCode::NOT_FOUND, "Location not found"),
            TripPlanError::Provider { .. } | TripPlanError::Config { .. } => {
                tracing::error!(error = %self, "trip planning failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
