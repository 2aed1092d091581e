use serde::Serialize;
use sqlx::PgPool;
use tracing::{info, warn};

use super::error::ServiceError;
use crate::auth::{hash_password, verify_password, TokenIssuer};
use crate::database::models::{InventoryItem, LedgerEntry, User};
use crate::database::{Database, DatabaseError};

/// Balance every new account starts with
pub const STARTING_COINS: i32 = 1000;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub coins: i32,
    pub inventory: Vec<InventoryItem>,
    pub coin_history: CoinHistory,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CoinHistory {
    pub received: Vec<ReceivedCoins>,
    pub sent: Vec<SentCoins>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceivedCoins {
    pub from_user: String,
    pub amount: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SentCoins {
    pub to_user: String,
    pub amount: i32,
}

/// Registration, authentication and account summaries
pub struct UserService {
    pool: PgPool,
    tokens: TokenIssuer,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(database: &Database, tokens: TokenIssuer, bcrypt_cost: u32) -> Self {
        Self {
            pool: database.pool().clone(),
            tokens,
            bcrypt_cost,
        }
    }

    /// Create a user with the starting balance
    pub async fn register(&self, username: &str, password: &str) -> Result<(), ServiceError> {
        if username.is_empty() || password.is_empty() {
            return Err(ServiceError::InvalidRequest("username and password are required".to_string()));
        }

        let password = password.to_string();
        let cost = self.bcrypt_cost;
        let hash = tokio::task::spawn_blocking(move || hash_password(&password, cost))
            .await
            .map_err(|e| ServiceError::Internal(e.to_string()))??;

        let result = sqlx::query("INSERT INTO users (name, password, coins) VALUES ($1, $2, $3)")
            .bind(username)
            .bind(&hash)
            .bind(STARTING_COINS)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => {
                info!("Registered user {}", username);
                Ok(())
            }
            Err(e) => {
                let err = DatabaseError::Sqlx(e);
                if err.is_unique_violation() {
                    warn!("Registration rejected, user {} already exists", username);
                    Err(ServiceError::UserAlreadyExists(username.to_string()))
                } else {
                    Err(err.into())
                }
            }
        }
    }

    /// Check credentials and issue a bearer token. Unknown users and wrong
    /// passwords fail identically.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<String, ServiceError> {
        let user: Option<User> = sqlx::query_as("SELECT id, name, password, coins FROM users WHERE name = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        let Some(user) = user else {
            warn!("Authentication failed for unknown user {}", username);
            return Err(ServiceError::Unauthorized);
        };

        let password = password.to_string();
        let stored = user.password.clone();
        let verified = tokio::task::spawn_blocking(move || verify_password(&password, &stored))
            .await
            .map_err(|e| ServiceError::Internal(e.to_string()))?;

        if !verified {
            warn!("Authentication failed for {}: wrong password", username);
            return Err(ServiceError::Unauthorized);
        }

        Ok(self.tokens.issue(&user.name)?)
    }

    /// Balance, inventory and coin history of `username`
    pub async fn get_info(&self, username: &str) -> Result<UserInfo, ServiceError> {
        let user: User = sqlx::query_as("SELECT id, name, password, coins FROM users WHERE name = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("user '{}'", username)))?;

        let inventory: Vec<InventoryItem> =
            sqlx::query_as("SELECT item_name, amount FROM inventory WHERE user_id = $1")
                .bind(user.id)
                .fetch_all(&self.pool)
                .await?;

        let ledger: Vec<LedgerEntry> = sqlx::query_as(
            "SELECT from_user, to_user, amount FROM transactions WHERE from_user = $1 OR to_user = $1 ORDER BY id",
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await?;

        Ok(UserInfo {
            coins: user.coins,
            inventory,
            coin_history: classify_history(username, ledger),
        })
    }
}

/// Split ledger rows into coins received by and sent from `username`.
/// A row counts as received whenever its receiver is `username`.
pub fn classify_history(username: &str, ledger: Vec<LedgerEntry>) -> CoinHistory {
    let mut history = CoinHistory::default();

    for entry in ledger {
        if entry.to_user == username {
            history.received.push(ReceivedCoins {
                from_user: entry.from_user,
                amount: entry.amount,
            });
        } else {
            history.sent.push(SentCoins {
                to_user: entry.to_user,
                amount: entry.amount,
            });
        }
    }

    history
}
