use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

use crate::middleware;
use crate::routes;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/catalog", get(routes::catalog::get_catalog))
        .route("/sessions", post(routes::sessions::create_session))
        .route(
            "/sessions/{id}",
            get(routes::sessions::get_session).delete(routes::sessions::delete_session),
        )
        .route("/sessions/{id}/case", post(routes::sessions::new_case))
        .route("/sessions/{id}/answers", post(routes::sessions::submit_answers))
        .route(
            "/sessions/{id}/evaluation",
            post(routes::sessions::run_evaluation),
        )
        .route(
            "/sessions/{id}/registration",
            post(routes::sessions::register),
        )
        .route("/sessions/{id}/reset", post(routes::sessions::reset))
        .layer(axum_mw::from_fn(middleware::request_log::request_log))
        .layer(cors)
        .with_state(state)
}
