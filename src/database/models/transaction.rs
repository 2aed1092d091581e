use serde::Serialize;
use sqlx::FromRow;

/// One completed coin transfer. Rows are only ever inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct LedgerEntry {
    pub from_user: String,
    pub to_user: String,
    pub amount: i32,
}
