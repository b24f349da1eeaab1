//! HTTP API Layer
//!
//! JSON API over the claims triage workflows using Axum. Every request runs
//! against one shared [`TriageApp`], backed by the in-process mock services.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers per view (claims, uploads, audit, dashboard)
//! - **Middleware**: Request logging, request ids, tracing, CORS
//! - **DTOs**: Request/Response data transfer objects, with masked identifiers
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let state = AppState::from_config(config)?;
//! axum::serve(listener, create_router(state)).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;

use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use app_state::{Ports, TriageApp};
use core_kernel::{HealthCheckable, SharedClock, SystemClock};
use infra_mock::{MockError, MockServices};

use crate::config::ApiConfig;
use crate::handlers::{audit, claims, dashboard, filters, health, notes, uploads};
use crate::middleware::{log_requests, REQUEST_ID_HEADER};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub app: TriageApp,
    pub config: Arc<ApiConfig>,
    pub adapters: Arc<Vec<Arc<dyn HealthCheckable>>>,
}

impl AppState {
    /// Builds the mock services described by `config` on the system clock
    pub fn from_config(config: ApiConfig) -> Result<Self, MockError> {
        let services = MockServices::from_config(&config.mock)?;
        Ok(Self::with_services(services, config, Arc::new(SystemClock)))
    }

    pub fn with_services(services: MockServices, config: ApiConfig, clock: SharedClock) -> Self {
        let adapters: Vec<Arc<dyn HealthCheckable>> = vec![
            services.claims.clone(),
            services.audit.clone(),
            services.graph.clone(),
            services.stats.clone(),
        ];
        let ports = Ports {
            claims: services.claims,
            audit: services.audit,
            graph: services.graph,
            stats: services.stats,
        };
        Self {
            app: TriageApp::new(ports, clock, config.upload_settings()),
            config: Arc::new(config),
            adapters: Arc::new(adapters),
        }
    }
}

/// Creates the main API router
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let claims_routes = Router::new()
        .route("/", get(claims::list_claims))
        .route("/refresh", post(claims::refresh_claims))
        .route("/:id", get(claims::get_claim))
        .route("/:id/status", put(claims::update_status))
        .route("/:id/notes", get(notes::list_notes).post(notes::create_note));

    let upload_routes = Router::new()
        .route("/", get(uploads::upload_history).post(uploads::upload_file))
        .route("/template", get(uploads::download_template))
        .layer(DefaultBodyLimit::max(state.config.upload_body_limit()));

    let api_routes = Router::new()
        .nest("/claims", claims_routes)
        .nest("/uploads", upload_routes)
        .route("/audit", get(audit::list_entries))
        .route("/graph", get(dashboard::graph))
        .route("/dashboard/stats", get(dashboard::stats))
        .route("/investigation/summary", get(dashboard::investigation))
        .route("/filters", get(filters::get_filters).put(filters::update_filters));

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(axum_middleware::from_fn(log_requests))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(REQUEST_ID_HEADER.clone()))
        .layer(SetRequestIdLayer::new(REQUEST_ID_HEADER.clone(), MakeRequestUuid))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
