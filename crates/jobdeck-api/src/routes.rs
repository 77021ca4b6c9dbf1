//! API routes.

use std::sync::Arc;

use axum::middleware;
use axum::routing::{get, patch, post};
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::limit::RequestBodyLimitLayer;

use crate::gate::access_gate;
use crate::handlers::{self, companies, jobs, my_jobs, onboarding, saved};
use crate::middleware::{
    cors_layer, rate_limit_middleware, request_id, request_logging, RateLimiterCache,
};
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    // Everything except the landing page sits behind the access gate.
    let gated_routes = Router::new()
        .route(
            "/onboarding",
            get(onboarding::view).post(onboarding::select_role),
        )
        .route("/jobs", get(jobs::list_jobs))
        .route("/job/:id", get(jobs::get_job).delete(jobs::delete_job))
        .route("/job/:id/hiring-status", patch(jobs::update_hiring_status))
        .route("/job/:id/apply", post(jobs::apply_to_job))
        .route(
            "/job/:id/applications/status",
            patch(jobs::update_application_status),
        )
        .route("/post-job", post(jobs::post_job))
        .route("/saved-jobs", get(saved::list_saved))
        .route("/saved-jobs/:job_id/toggle", post(saved::toggle_saved))
        .route(
            "/companies",
            get(companies::list_companies).post(companies::add_company),
        )
        .route("/my-jobs", get(my_jobs::my_jobs))
        .layer(middleware::from_fn_with_state(state.clone(), access_gate));

    let rate_limiter = Arc::new(RateLimiterCache::new(state.config.rate_limit_rps));

    let app_routes = Router::new()
        .route("/", get(handlers::landing))
        .merge(gated_routes)
        .layer(middleware::from_fn_with_state(
            rate_limiter,
            rate_limit_middleware,
        ));

    let health_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/ready", get(handlers::ready));

    let metrics_routes = if let Some(handle) = metrics_handle {
        Router::new().route("/metrics", get(move || async move { handle.render() }))
    } else {
        Router::new()
    };

    Router::new()
        .merge(app_routes)
        .merge(health_routes)
        .merge(metrics_routes)
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(middleware::from_fn(request_id))
        .layer(middleware::from_fn(request_logging))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
