//! Axum router configuration with middleware.
//!
//! Q&A routes live under `/api/v1/`; `/health` and `/db-status` sit at the
//! root. Middleware: CORS, HTTP tracing.

use axum::http::HeaderValue;
use axum::routing::{get, patch, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    let api_routes = Router::new()
        .route(
            "/questions",
            get(handlers::question::list_questions).post(handlers::question::create_question),
        )
        .route(
            "/questions/",
            get(handlers::question::list_questions).post(handlers::question::create_question),
        )
        .route("/questions/{id}", get(handlers::question::get_question))
        .route(
            "/questions/{id}/answers",
            get(handlers::answer::list_answers).post(handlers::answer::post_answer),
        )
        .route("/answers/{id}/vote", post(handlers::answer::vote_answer))
        .route("/answers/{id}/accept", patch(handlers::answer::accept_answer));

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(handlers::health::health_check))
        .route("/db-status", get(handlers::health::db_status))
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS for the configured origins, any method and header.
///
/// Origins that are not valid header values are skipped with a warning.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}
