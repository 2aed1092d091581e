use sqlx::PgPool;
use tracing::{debug, warn};

use super::error::ServiceError;
use crate::database::Database;

/// Coin transfers between users
pub struct CoinService {
    pool: PgPool,
}

impl CoinService {
    pub fn new(database: &Database) -> Self {
        Self {
            pool: database.pool().clone(),
        }
    }

    /// Move `amount` coins from `from_user` to `to_user` and record the
    /// transfer in the ledger, all in one transaction.
    ///
    /// Both user rows are locked in name order before the balance check, so
    /// concurrent transfers touching the same users serialize instead of
    /// losing updates.
    pub async fn send_coin(&self, from_user: &str, to_user: &str, amount: i32) -> Result<(), ServiceError> {
        if amount <= 0 {
            return Err(ServiceError::InvalidRequest("amount must be a positive integer".to_string()));
        }
        if to_user.is_empty() {
            return Err(ServiceError::InvalidRequest("toUser is required".to_string()));
        }

        let mut tx = self.pool.begin().await?;

        let balances: Vec<(String, i32)> = sqlx::query_as(
            "SELECT name, coins FROM users WHERE name = ANY($1) ORDER BY name FOR UPDATE",
        )
        .bind(vec![from_user.to_string(), to_user.to_string()])
        .fetch_all(&mut *tx)
        .await?;

        if let Err(e) = check_transfer(&balances, from_user, to_user, amount) {
            warn!("Transfer {} -> {} of {} rejected: {}", from_user, to_user, amount, e);
            return Err(e);
        }

        sqlx::query("UPDATE users SET coins = coins - $1 WHERE name = $2")
            .bind(amount)
            .bind(from_user)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE users SET coins = coins + $1 WHERE name = $2")
            .bind(amount)
            .bind(to_user)
            .execute(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO transactions (from_user, to_user, amount) VALUES ($1, $2, $3)")
            .bind(from_user)
            .bind(to_user)
            .bind(amount)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        debug!("Transferred {} coins from {} to {}", amount, from_user, to_user);
        Ok(())
    }
}

/// Preconditions of a transfer, evaluated against the locked balances.
/// A missing sender row counts as insufficient funds.
fn check_transfer(
    balances: &[(String, i32)],
    from_user: &str,
    to_user: &str,
    amount: i32,
) -> Result<(), ServiceError> {
    let sender_coins = balances
        .iter()
        .find(|(name, _)| name == from_user)
        .map(|(_, coins)| *coins);

    match sender_coins {
        Some(coins) if coins >= amount => {}
        _ => return Err(ServiceError::InsufficientFunds),
    }

    if !balances.iter().any(|(name, _)| name == to_user) {
        return Err(ServiceError::RecipientNotFound(to_user.to_string()));
    }

    Ok(())
}
