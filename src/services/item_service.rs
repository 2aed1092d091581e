use sqlx::PgPool;
use tracing::{debug, warn};

use super::catalog;
use super::error::ServiceError;
use crate::database::{Database, DatabaseError};

/// Purchases from the fixed catalog
pub struct ItemService {
    pool: PgPool,
}

impl ItemService {
    pub fn new(database: &Database) -> Self {
        Self {
            pool: database.pool().clone(),
        }
    }

    /// Debit `quantity` × price from `username` and add the items to their
    /// inventory. Returns the purchased quantity.
    pub async fn buy_item(&self, username: &str, item: &str, quantity: i32) -> Result<i32, ServiceError> {
        let total_cost = purchase_cost(item, quantity)?;

        let mut tx = self.pool.begin().await?;

        let buyer: Option<(i32, i32)> = sqlx::query_as("SELECT id, coins FROM users WHERE name = $1 FOR UPDATE")
            .bind(username)
            .fetch_optional(&mut *tx)
            .await?;

        let (user_id, coins) =
            buyer.ok_or_else(|| DatabaseError::NotFound(format!("user '{}'", username)))?;

        if coins < total_cost {
            warn!("{} cannot afford {} x {} ({} < {})", username, quantity, item, coins, total_cost);
            return Err(ServiceError::InsufficientFunds);
        }

        sqlx::query("UPDATE users SET coins = coins - $1 WHERE id = $2")
            .bind(total_cost)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO inventory (user_id, item_name, amount)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, item_name)
            DO UPDATE SET amount = inventory.amount + EXCLUDED.amount
            "#,
        )
        .bind(user_id)
        .bind(item)
        .bind(quantity)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        debug!("{} bought {} x {} for {}", username, quantity, item, total_cost);
        Ok(quantity)
    }
}

/// Validate the quantity and item, returning the total price.
/// A total that overflows `i32` can never be covered by a balance.
fn purchase_cost(item: &str, quantity: i32) -> Result<i32, ServiceError> {
    if quantity <= 0 {
        return Err(ServiceError::InvalidRequest("amount must be a positive integer".to_string()));
    }

    let price = catalog::price_of(item).ok_or_else(|| ServiceError::ItemNotFound(item.to_string()))?;

    price.checked_mul(quantity).ok_or(ServiceError::InsufficientFunds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cost_is_price_times_quantity() {
        assert_eq!(purchase_cost("t-shirt", 2).unwrap(), 160);
        assert_eq!(purchase_cost("socks", 1).unwrap(), 10);
    }

    #[test]
    fn non_positive_quantity_is_invalid() {
        assert!(matches!(purchase_cost("t-shirt", 0), Err(ServiceError::InvalidRequest(_))));
        assert!(matches!(purchase_cost("t-shirt", -3), Err(ServiceError::InvalidRequest(_))));
    }

    #[test]
    fn quantity_is_checked_before_item() {
        assert!(matches!(purchase_cost("car", 0), Err(ServiceError::InvalidRequest(_))));
    }

    #[test]
    fn unknown_item_is_reported() {
        match purchase_cost("car", 1) {
            Err(ServiceError::ItemNotFound(item)) => assert_eq!(item, "car"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn overflowing_total_is_insufficient() {
        assert!(matches!(
            purchase_cost("pink-hoody", i32::MAX),
            Err(ServiceError::InsufficientFunds)
        ));
    }
}
