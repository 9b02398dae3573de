//! Authentication endpoints.

use aduan_common::AppResult;
use axum::{Json, Router, extract::State, response::IntoResponse, routing::post};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    extractors::AuthUser,
    middleware::AppState,
    response::{self, ApiResponse},
};

/// Signin request.
#[derive(Debug, Deserialize, Validate)]
pub struct SigninRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Signin response.
#[derive(Serialize)]
pub struct SigninResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub token: String,
}

/// Sign in with email and password.
async fn signin(
    State(state): State<AppState>,
    Json(req): Json<SigninRequest>,
) -> AppResult<ApiResponse<SigninResponse>> {
    req.validate()?;

    let (user, token) = state.user_service.sign_in(&req.email, &req.password).await?;

    Ok(ApiResponse::ok(SigninResponse {
        id: user.id,
        name: user.name,
        email: user.email,
        token,
    }))
}

/// Sign out (invalidate current token by regenerating).
async fn signout(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    state.user_service.regenerate_token(&user.id).await?;
    tracing::info!(user_id = %user.id, "Administrator signed out");
    Ok(response::ok())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signin", post(signin))
        .route("/signout", post(signout))
}
