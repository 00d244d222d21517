// GET handlers: version, monitor catalog, thing status, latest observation

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

use super::AppState;
use crate::catalog::MonitorRoute;
use crate::error::{ErrorKind, RetrieveError};
use crate::models::{MonitorType, Observation, ResolvedThing, UnknownMonitorType};
use crate::retrieve::{RequestContext, RetrieveRequest};
use crate::version::{NAME, VERSION};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Error body: `{"error": "<KindName>", "message": "..."}`.
pub(super) enum ApiError {
    Retrieve(RetrieveError),
    UnknownMonitor(UnknownMonitorType),
}

impl From<RetrieveError> for ApiError {
    fn from(e: RetrieveError) -> Self {
        ApiError::Retrieve(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            ApiError::Retrieve(e) => {
                let status = match e.kind() {
                    ErrorKind::ResourceNotFound => StatusCode::NOT_FOUND,
                    ErrorKind::Deserialization => StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorKind::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
                };
                (status, e.kind().name(), e.to_string())
            }
            ApiError::UnknownMonitor(e) => {
                (StatusCode::BAD_REQUEST, "InvalidMonitorTypeError", e.to_string())
            }
        };
        let body = serde_json::json!({ "error": kind, "message": message });
        (status, Json(body)).into_response()
    }
}

/// Request id from `x-request-id` when the caller supplies one, else a fresh UUID.
fn request_context(headers: &HeaderMap) -> RequestContext {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(RequestContext::new)
        .unwrap_or_else(RequestContext::generate)
}

/// GET /version — returns service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

/// GET /api/monitors — monitor types with their observation table and telemetry topic.
pub(super) async fn monitors_handler(State(state): State<AppState>) -> Json<Vec<MonitorRoute>> {
    Json(state.retriever.catalog().routes().to_vec())
}

/// GET /api/things/{thing_id} — registry entry of a provisioned thing.
pub(super) async fn thing_handler(
    State(state): State<AppState>,
    Path(thing_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<ResolvedThing>, ApiError> {
    let ctx = request_context(&headers);
    let thing = state
        .retriever
        .resolve_thing(&RetrieveRequest::new(thing_id), &ctx)
        .await?;
    Ok(Json(thing))
}

/// GET /api/things/{thing_id}/monitors/{monitor_type} — latest observation of that type.
pub(super) async fn latest_observation_handler(
    State(state): State<AppState>,
    Path((thing_id, monitor_type)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<Observation>, ApiError> {
    let monitor_type = monitor_type
        .parse::<MonitorType>()
        .map_err(ApiError::UnknownMonitor)?;
    let ctx = request_context(&headers);
    let observation = state
        .retriever
        .retrieve(monitor_type, &RetrieveRequest::new(thing_id), &ctx)
        .await?;
    Ok(Json(observation))
}
