//! API endpoints.

mod auth;
mod complaints;
mod dashboard;
mod health;

use axum::Router;

use crate::middleware::AppState;

pub use complaints::{ComplaintResponse, ComplaintSummaryResponse};

/// Create the API router, mounted under `/api`.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .nest("/complaints", complaints::router())
        .nest("/dashboard", dashboard::router())
}

/// Liveness probe, mounted at the root.
pub fn health_router() -> Router<AppState> {
    health::router()
}
