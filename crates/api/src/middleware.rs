//! API middleware.

use aduan_core::{ComplaintService, UserService};
use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub complaint_service: ComplaintService,
    pub user_service: UserService,
}

/// Authentication middleware.
///
/// A valid `Authorization: Bearer <token>` header attaches the user to the
/// request. Invalid or missing tokens are not an error here; extractors on
/// protected routes decide.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
    {
        match state.user_service.authenticate_by_token(token.trim()).await {
            Ok(user) => {
                req.extensions_mut().insert(user);
            }
            Err(e) if e.is_server_error() => {
                tracing::warn!(error = %e, "Token lookup failed");
            }
            Err(_) => {}
        }
    }

    next.run(req).await
}
