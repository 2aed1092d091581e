use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::ItemService;

#[derive(Debug, Deserialize)]
pub struct BuyRequest {
    pub amount: i32,
}

#[derive(Debug, Serialize)]
pub struct BuyResponse {
    pub message: &'static str,
    pub amount: i32,
}

/// POST /api/buy/:item - Buy `amount` units of a catalog item
///
/// The amount is validated before the item or the balance is looked at.
pub async fn buy_item(
    State(items): State<Arc<ItemService>>,
    Extension(user): Extension<AuthUser>,
    Path(item): Path<String>,
    payload: Result<Json<BuyRequest>, JsonRejection>,
) -> Result<Json<BuyResponse>, ApiError> {
    let Json(request) = payload?;

    if request.amount <= 0 {
        return Err(ApiError::bad_request("amount must be a positive integer"));
    }

    let amount = items.buy_item(&user.username, &item, request.amount).await?;

    Ok(Json(BuyResponse {
        message: "Item purchased",
        amount,
    }))
}
