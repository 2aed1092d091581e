//! Application state shared across handlers

use std::sync::Arc;

use axum::extract::FromRef;

use crate::auth::TokenIssuer;
use crate::config::AppConfig;
use crate::database::Database;
use crate::services::{CoinService, ItemService, UserService};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub database: Database,
    pub tokens: TokenIssuer,
    pub user_service: Arc<UserService>,
    pub coin_service: Arc<CoinService>,
    pub item_service: Arc<ItemService>,
}

impl AppState {
    /// Wire every service to the same pool and token issuer
    pub fn new(database: Database, tokens: TokenIssuer, config: &AppConfig) -> Self {
        let user_service = Arc::new(UserService::new(
            &database,
            tokens.clone(),
            config.security.bcrypt_cost,
        ));
        let coin_service = Arc::new(CoinService::new(&database));
        let item_service = Arc::new(ItemService::new(&database));

        Self {
            database,
            tokens,
            user_service,
            coin_service,
            item_service,
        }
    }
}

impl FromRef<AppState> for TokenIssuer {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}

impl FromRef<AppState> for Database {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.database.clone()
    }
}

impl FromRef<AppState> for Arc<UserService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.user_service.clone()
    }
}

impl FromRef<AppState> for Arc<CoinService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.coin_service.clone()
    }
}

impl FromRef<AppState> for Arc<ItemService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.item_service.clone()
    }
}
