use serde::Serialize;
use sqlx::FromRow;

/// Row of the `users` table. The password hash never leaves the process.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub coins: i32,
}
