use std::sync::Arc;

use axum::{extract::State, Extension, Json};

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::{UserInfo, UserService};

/// GET /api/info - Balance, inventory and coin history of the caller
///
/// Expected Output (Success):
/// ```json
/// {
///   "coins": 840,
///   "inventory": [{ "type": "t-shirt", "quantity": 2 }],
///   "coinHistory": {
///     "received": [{ "fromUser": "user2", "amount": 100 }],
///     "sent": [{ "toUser": "user3", "amount": 50 }]
///   }
/// }
/// ```
pub async fn user_info(
    State(users): State<Arc<UserService>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserInfo>, ApiError> {
    let info = users.get_info(&user.username).await?;
    Ok(Json(info))
}
