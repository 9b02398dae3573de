//! HTTP API layer for aduan.
//!
//! - **Endpoints**: complaint intake, listings, administrative updates and
//!   sign-in
//! - **Extractors**: authenticated and administrator users
//! - **Middleware**: bearer token authentication
//!
//! Built on Axum 0.8.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::{health_router, router};
