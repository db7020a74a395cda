//! HTTP server

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::SessionManager;
use crate::config::Config;
use crate::error::Result;
use crate::store::PlacementStore;

use super::routes;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn PlacementStore>,
    pub sessions: SessionManager,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn PlacementStore>) -> Self {
        let sessions = SessionManager::new(config.session.ttl_minutes);
        Self {
            config,
            store,
            sessions,
        }
    }
}

/// Run the HTTP server until it is shut down
pub async fn run_server(config: Config, store: Arc<dyn PlacementStore>) -> Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, store);

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        // Static entry pages
        .route("/", get(routes::homepage))
        .route("/login", get(routes::login_page).post(routes::login))
        // Accounts and sessions
        .route("/signup", post(routes::signup))
        .route("/logout", get(routes::logout))
        // Role-gated dashboards
        .route("/student-dashboard", get(routes::student_dashboard))
        .route("/recruiter-dashboard", get(routes::recruiter_dashboard))
        // Jobs and applications
        .route("/add-job", post(routes::add_job))
        .route("/jobs-available", get(routes::jobs_available))
        .route("/apply-job", post(routes::apply_job))
        .route("/view-applicants/{job_id}", get(routes::view_applicants))
        // Probes
        .route("/healthz", get(routes::healthz))
        // Everything else gets the 404 document
        .fallback(routes::not_found)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
