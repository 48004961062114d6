//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::live::TrainUpdate;
use crate::network::LoadError;
use crate::planner::RouteError;

use super::dto::*;
use super::state::AppState;
use super::ws::live_positions;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/stations", get(list_stations))
        .route("/api/lines", get(list_lines))
        .route("/api/fare", get(get_fare))
        .route("/api/route", get(get_route))
        .route("/api/reload", post(reload_network))
        .route("/api/train_update", post(publish_train_update))
        .route("/ws", get(live_positions))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// All stations with their coordinates and lines.
async fn list_stations(State(state): State<AppState>) -> Json<Vec<StationResult>> {
    let network = state.network.snapshot().await;
    Json(StationResult::all(&network))
}

/// All lines with their stations in order.
async fn list_lines(State(state): State<AppState>) -> Json<Vec<LineResult>> {
    let network = state.network.snapshot().await;
    Json(LineResult::all(&network))
}

/// Pull both station names out of the query.
fn require_pair(query: &PairQuery) -> Result<(&str, &str), AppError> {
    let from = query
        .from
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .ok_or(AppError::MissingParameter { name: "from" })?;
    let to = query
        .to
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .ok_or(AppError::MissingParameter { name: "to" })?;
    Ok((from, to))
}

/// Direct fare between two stations, straight from the fare table.
async fn get_fare(
    State(state): State<AppState>,
    Query(query): Query<PairQuery>,
) -> Result<Json<FareResponse>, AppError> {
    let (from, to) = require_pair(&query)?;
    let network = state.network.snapshot().await;

    let origin = network.station(from).ok_or_else(|| AppError::UnknownStation {
        name: from.to_string(),
    })?;
    let destination = network.station(to).ok_or_else(|| AppError::UnknownStation {
        name: to.to_string(),
    })?;

    let (price, minutes) = if origin == destination {
        (0.0, Some(0))
    } else {
        let record = network
            .fares()
            .get(origin, destination)
            .unwrap_or_default();
        // A pair with only a travel time has no fare to report
        let price = record.price.ok_or_else(|| AppError::FareNotFound {
            message: format!(
                "No fare from {} to {}",
                network.catalog().name(origin),
                network.catalog().name(destination)
            ),
        })?;
        (price, record.minutes)
    };

    Ok(Json(FareResponse {
        from: network.catalog().name(origin).to_string(),
        to: network.catalog().name(destination).to_string(),
        price,
        minutes,
    }))
}

/// Route between two stations with aggregated fare and time.
async fn get_route(
    State(state): State<AppState>,
    Query(query): Query<PairQuery>,
) -> Result<Json<RouteResponse>, AppError> {
    let (from, to) = require_pair(&query)?;
    let network = state.network.snapshot().await;
    let route = state.routes.route(&network, from, to).await?;
    Ok(Json(RouteResponse::from_route(&route, &network)))
}

/// Rebuild the network from its sources and swap it in.
async fn reload_network(State(state): State<AppState>) -> Result<Json<ReloadResponse>, AppError> {
    let report = state.network.reload().await?;
    // Old generations can never be hit again
    state.routes.invalidate_all();
    info!(
        generation = report.generation,
        stations = report.stations,
        "network reloaded via api"
    );
    Ok(Json(ReloadResponse::from(report)))
}

/// Publish a train position to every live subscriber.
async fn publish_train_update(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PublishResponse>, AppError> {
    // Parse JSON manually so we can log the body on failure
    let update: TrainUpdate = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "bad train update");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;
    let receivers = state.broadcaster.publish(update);
    Ok(Json(PublishResponse { receivers }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    MissingParameter { name: &'static str },
    UnknownStation { name: String },
    NoRoute { message: String },
    FareNotFound { message: String },
    BadRequest { message: String },
    Internal { message: String },
}

impl AppError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingParameter { .. } | AppError::BadRequest { .. } => {
                StatusCode::BAD_REQUEST
            }
            AppError::UnknownStation { .. }
            | AppError::NoRoute { .. }
            | AppError::FareNotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable error category.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::MissingParameter { .. } => "missing_parameter",
            AppError::UnknownStation { .. } => "unknown_station",
            AppError::NoRoute { .. } => "no_route",
            AppError::FareNotFound { .. } => "fare_not_found",
            AppError::BadRequest { .. } => "bad_request",
            AppError::Internal { .. } => "internal",
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::MissingParameter { name } => format!("Missing query parameter: {name}"),
            AppError::UnknownStation { name } => format!("Unknown station: {name}"),
            AppError::NoRoute { message }
            | AppError::FareNotFound { message }
            | AppError::BadRequest { message }
            | AppError::Internal { message } => message.clone(),
        }
    }
}

impl From<RouteError> for AppError {
    fn from(e: RouteError) -> Self {
        match e {
            RouteError::UnknownStation(name) => AppError::UnknownStation { name },
            RouteError::NoPath { .. } => AppError::NoRoute {
                message: e.to_string(),
            },
        }
    }
}

impl From<LoadError> for AppError {
    fn from(e: LoadError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let message = self.message();

        if status.is_server_error() {
            error!(%status, code = self.code(), "{message}");
        } else {
            info!(%status, code = self.code(), "{message}");
        }

        let body = Json(ErrorResponse {
            error: message,
            code: self.code(),
        });
        (status, body).into_response()
    }
}
