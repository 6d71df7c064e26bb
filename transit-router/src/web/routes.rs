//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tracing::{error, info, warn};

use crate::planner::{PlanError, Planner};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/stations", get(list_stations))
        .route("/api/lines", get(list_lines))
        .route("/api/routes", post(plan_routes))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List every station with the lines serving it.
async fn list_stations(State(state): State<AppState>) -> Json<StationsResponse> {
    Json(StationsResponse::from_network(&state.network))
}

/// List every line with its route.
async fn list_lines(State(state): State<AppState>) -> Json<LinesResponse> {
    let lines = state
        .network
        .lines()
        .iter()
        .map(LineResult::from_line)
        .collect();
    Json(LinesResponse { lines })
}

/// Plan routes between two coordinates.
async fn plan_routes(
    State(state): State<AppState>,
    Json(req): Json<PlanRoutesRequest>,
) -> Result<Json<PlanRoutesResponse>, AppError> {
    req.origin.validate().map_err(|e| AppError::BadRequest {
        message: format!("origin: {e}"),
    })?;
    req.destination.validate().map_err(|e| AppError::BadRequest {
        message: format!("destination: {e}"),
    })?;

    let k = state.config.route_count(req.k);

    // Search is CPU-bound; keep it off the async workers.
    let routes = tokio::task::spawn_blocking(move || {
        Planner::new(&state.network, &state.config)
            .with_cache(&state.cache)
            .plan(req.origin, req.destination, k)
    })
    .await
    .map_err(|e| AppError::Internal {
        message: format!("route search failed: {e}"),
    })??;

    info!(routes = routes.len(), k, "Planned routes");
    Ok(Json(PlanRoutesResponse { routes }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        match e {
            PlanError::InvalidCoordinate(e) => AppError::BadRequest {
                message: e.to_string(),
            },
            e => {
                error!(error = %e, "Route planning failed");
                AppError::Internal {
                    message: e.to_string(),
                }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        warn!(%status, %message, "Request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
