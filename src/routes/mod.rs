// HTTP routes

mod http;

use axum::{Router, routing::get};
use tower_http::cors::{Any, CorsLayer};

use crate::retrieve::Retriever;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) retriever: Retriever,
}

pub fn app(retriever: Retriever) -> Router {
    let state = AppState { retriever };
    Router::new()
        .route("/", get(|| async { crate::version::banner() })) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/monitors", get(http::monitors_handler)) // GET /api/monitors
        .route("/api/things/{thing_id}", get(http::thing_handler)) // GET /api/things/:id
        .route(
            "/api/things/{thing_id}/monitors/{monitor_type}",
            get(http::latest_observation_handler),
        ) // GET /api/things/:id/monitors/:type
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
