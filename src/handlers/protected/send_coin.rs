use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::CoinService;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendCoinRequest {
    pub to_user: String,
    pub amount: i32,
}

/// POST /api/sendCoin - Transfer coins from the caller to another user
///
/// Responses: 200 on success, 400 for a malformed body, non-positive
/// amount or insufficient funds, 404 when the recipient does not exist.
pub async fn send_coin(
    State(coins): State<Arc<CoinService>>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<SendCoinRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = payload?;

    coins
        .send_coin(&user.username, &request.to_user, request.amount)
        .await?;

    Ok(Json(json!({ "message": "Coins sent" })))
}
