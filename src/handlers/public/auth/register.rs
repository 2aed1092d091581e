use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::{json, Value};

use super::CredentialsRequest;
use crate::error::ApiError;
use crate::services::UserService;

/// POST /api/register - Create an account with the starting balance
///
/// Expected Input:
/// ```json
/// { "username": "string", "password": "string" }
/// ```
///
/// Responses: 200 on success, 400 for a malformed body, 409 when the
/// username is taken.
pub async fn register(
    State(users): State<Arc<UserService>>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = payload?;

    users.register(&request.username, &request.password).await?;

    Ok(Json(json!({ "message": "Registration successful" })))
}
