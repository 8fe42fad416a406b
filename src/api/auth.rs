//! Authentication endpoints

use axum::{
    extract::{rejection::FormRejection, State},
    Form, Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    AppState,
};

/// Login form; missing fields are treated as empty and fail the credential check
#[derive(Default, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    /// Unix seconds
    pub expires_at: i64,
}

/// Exchange credentials for a bearer token
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body(content = LoginRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = crate::error::ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    form: Result<Form<LoginRequest>, FormRejection>,
) -> AppResult<Json<LoginResponse>> {
    // An unreadable body carries no credentials, which the verifier rejects
    let request = match form {
        Ok(Form(request)) => request,
        Err(rejection) => {
            tracing::debug!(%rejection, "Login body is not a form");
            LoginRequest::default()
        }
    };
    let auth = state.services.auth.clone();
    // Argon2 verification is CPU bound
    let issued = tokio::task::spawn_blocking(move || auth.login(&request.username, &request.password))
        .await
        .map_err(|e| AppError::Internal(format!("Login task failed: {}", e)))??;

    Ok(Json(LoginResponse {
        token: issued.token,
        token_type: "Bearer".to_string(),
        expires_at: issued.claims.expires_at,
    }))
}
