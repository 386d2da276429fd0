use std::sync::Arc;
use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{BoxError, Json, Router};
use floodroute_core::{Coordinate, Error, HazardSet, RoadGraph, RoadGraphConfig};
use floodroute_core::model::GraphStats;
use geojson::FeatureCollection;
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Immutable routing state shared by all requests
pub struct AppState {
    pub graph: RoadGraph,
    pub hazards: HazardSet,
    pub config: RoadGraphConfig,
}

pub fn router(state: Arc<AppState>, request_timeout: Duration, concurrency_limit: usize) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/graph", get(graph_summary))
        .route("/route", post(route))
        .route("/routes", post(routes_one_to_many))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .layer(GlobalConcurrencyLimitLayer::new(concurrency_limit))
                .timeout(request_timeout),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// --- API DTOs ---

#[derive(Debug, Deserialize)]
pub struct RouteBody {
    pub start: Coordinate,
    pub end: Coordinate,
}

#[derive(Debug, Deserialize)]
pub struct OneToManyBody {
    pub start: Coordinate,
    pub ends: Vec<Coordinate>,
}

#[derive(Debug, Serialize)]
pub struct GraphSummary {
    pub stats: GraphStats,
    pub hazard_count: usize,
    pub config: RoadGraphConfig,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RouteOutcome {
    Found { route: FeatureCollection },
    Failed(ErrorBody),
}

pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(value: Error) -> Self {
        ApiError(value)
    }
}

fn status_for(error: &Error) -> StatusCode {
    match error {
        Error::InvalidData(_) => StatusCode::BAD_REQUEST,
        Error::NoPathExists { .. } => StatusCode::NOT_FOUND,
        Error::InvalidNode(_) | Error::EmptyGraph | Error::EmptyHazardSet => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        Error::IoError(_) | Error::JsonError(_) | Error::GeoJsonError(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn error_body(error: &Error) -> ErrorBody {
    ErrorBody {
        error: error.kind(),
        message: error.to_string(),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        if status.is_server_error() {
            tracing::error!("Routing request failed: {}", self.0);
        } else {
            tracing::debug!("Routing request rejected: {}", self.0);
        }
        (status, Json(error_body(&self.0))).into_response()
    }
}

async fn handle_middleware_error(err: BoxError) -> (StatusCode, Json<ErrorBody>) {
    if err.is::<tower::timeout::error::Elapsed>() {
        (
            StatusCode::REQUEST_TIMEOUT,
            Json(ErrorBody {
                error: "Timeout",
                message: "Routing request timed out".to_string(),
            }),
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                error: "Internal",
                message: err.to_string(),
            }),
        )
    }
}

// --- Handlers ---

async fn graph_summary(State(state): State<Arc<AppState>>) -> Json<GraphSummary> {
    Json(GraphSummary {
        stats: state.graph.stats(),
        hazard_count: state.hazards.len(),
        config: state.config,
    })
}

async fn route(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RouteBody>,
) -> Result<Json<FeatureCollection>, Response> {
    let result = tokio::task::spawn_blocking(move || {
        floodroute_core::safe_route(&state.graph, body.start, body.end)
            .and_then(|route| route.to_geojson())
    })
    .await
    .map_err(join_failure)?;

    result.map(Json).map_err(|e| ApiError(e).into_response())
}

async fn routes_one_to_many(
    State(state): State<Arc<AppState>>,
    Json(body): Json<OneToManyBody>,
) -> Result<Json<Vec<RouteOutcome>>, Response> {
    let outcomes = tokio::task::spawn_blocking(move || {
        floodroute_core::safe_routes_one_to_many(&state.graph, body.start, &body.ends)
            .into_iter()
            .map(|result| match result.and_then(|route| route.to_geojson()) {
                Ok(route) => RouteOutcome::Found { route },
                Err(e) => RouteOutcome::Failed(error_body(&e)),
            })
            .collect::<Vec<_>>()
    })
    .await
    .map_err(join_failure)?;

    Ok(Json(outcomes))
}

fn join_failure(err: tokio::task::JoinError) -> Response {
    tracing::error!("Routing task failed: {err}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            error: "Internal",
            message: "Routing task failed".to_string(),
        }),
    )
        .into_response()
}
