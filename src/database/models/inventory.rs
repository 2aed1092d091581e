use serde::Serialize;
use sqlx::FromRow;

/// Accumulated quantity of one item owned by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct InventoryItem {
    #[serde(rename = "type")]
    pub item_name: String,
    #[serde(rename = "quantity")]
    #[sqlx(rename = "amount")]
    pub quantity: i32,
}
