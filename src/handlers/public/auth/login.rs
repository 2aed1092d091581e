use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Serialize;

use super::CredentialsRequest;
use crate::error::ApiError;
use crate::services::UserService;

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
}

/// POST /api/auth - Exchange credentials for a bearer token
///
/// Expected Output (Success):
/// ```json
/// { "token": "eyJhbGciOiJIUzI1NiI..." }
/// ```
///
/// Unknown user and wrong password both answer 401.
pub async fn login(
    State(users): State<Arc<UserService>>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, ApiError> {
    let Json(request) = payload?;

    if request.username.is_empty() || request.password.is_empty() {
        return Err(ApiError::bad_request("username and password are required"));
    }

    let token = users.authenticate(&request.username, &request.password).await?;

    Ok(Json(AuthResponse { token }))
}
